use crate::{
    error::{DropReason, RenderResult},
    renderer::{Render, Renderer},
};
use sql_ast::{
    NodeId,
    kinds::{AssignItem, Delete, SetStatement, Truncate, Update, UpdateSetItem},
};

/// `RETURNING a, b` on its own line.
pub fn returning(r: &mut Renderer<'_>, _id: NodeId, items: &[NodeId]) -> RenderResult {
    r.newline();
    r.keyword("RETURNING ");
    r.join(items, ", ")
}

/// Drops a `RETURNING` list the dialect cannot express.
pub fn drop_returning(r: &mut Renderer<'_>, id: NodeId, items: &[NodeId]) -> RenderResult {
    if items.is_empty() {
        return Ok(());
    }
    r.drop_clause(id, "returning", DropReason::NoEquivalent)
}

fn print_returning(r: &mut Renderer<'_>, id: NodeId, items: &[NodeId]) -> RenderResult {
    if items.is_empty() {
        return Ok(());
    }
    let d = r.dialect();
    d.returning(r, id, items)
}

impl Render for Update {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let table = r.required(id, "table", self.table)?;
        if let Some(with) = self.with {
            r.accept(with)?;
            r.newline();
        }

        r.keyword(if self.only { "UPDATE ONLY " } else { "UPDATE " });
        r.accept(table)?;
        r.newline();
        r.keyword("SET ");
        r.join(&self.items, ", ")?;

        if let Some(from) = self.from {
            r.newline();
            r.keyword("FROM ");
            r.accept(from)?;
        }
        if let Some(where_clause) = self.where_clause {
            r.newline();
            r.keyword("WHERE ");
            r.accept(where_clause)?;
        }
        print_returning(r, id, &self.returning)
    }
}

impl Render for UpdateSetItem {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let column = r.required(id, "column", self.column)?;
        let value = r.required(id, "value", self.value)?;
        r.accept(column)?;
        r.print(" = ");
        r.accept(value)
    }
}

impl Render for Delete {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let table = r.required(id, "table", self.table)?;
        if let Some(with) = self.with {
            r.accept(with)?;
            r.newline();
        }

        r.keyword(if self.only { "DELETE FROM ONLY " } else { "DELETE FROM " });
        r.accept(table)?;
        if let Some(using) = self.using {
            r.newline();
            r.keyword("USING ");
            r.accept(using)?;
        }
        if let Some(where_clause) = self.where_clause {
            r.newline();
            r.keyword("WHERE ");
            r.accept(where_clause)?;
        }
        print_returning(r, id, &self.returning)
    }
}

impl Render for Truncate {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        truncate(r, id, self, true)
    }
}

/// `TRUNCATE TABLE`. Without `options` the `ONLY`, identity and cascade
/// modifiers are dropped.
pub fn truncate(r: &mut Renderer<'_>, id: NodeId, x: &Truncate, options: bool) -> RenderResult {
    r.required(id, "tables", x.tables.first().copied())?;

    r.keyword("TRUNCATE TABLE ");
    if x.only {
        if options {
            r.keyword("ONLY ");
        } else {
            r.drop_clause(id, "only", DropReason::NoEquivalent)?;
        }
    }
    r.join(&x.tables, ", ")?;

    if !options {
        if x.restart_identity.is_some() {
            r.drop_clause(id, "restart_identity", DropReason::NoEquivalent)?;
        }
        if x.cascade.is_some() {
            r.drop_clause(id, "cascade", DropReason::NoEquivalent)?;
        }
        return Ok(());
    }
    match x.restart_identity {
        Some(true) => r.keyword(" RESTART IDENTITY"),
        Some(false) => r.keyword(" CONTINUE IDENTITY"),
        None => {}
    }
    match x.cascade {
        Some(true) => r.keyword(" CASCADE"),
        Some(false) => r.keyword(" RESTRICT"),
        None => {}
    }
    Ok(())
}

impl Render for AssignItem {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        assign_item(r, id, self, " = ")
    }
}

pub fn assign_item(r: &mut Renderer<'_>, id: NodeId, x: &AssignItem, operator: &str) -> RenderResult {
    let target = r.required(id, "target", x.target)?;
    let value = r.required(id, "value", x.value)?;
    r.accept(target)?;
    r.keyword(operator);
    r.accept(value)
}

impl Render for SetStatement {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword("SET ");
        r.join(&self.items, ", ")
    }
}
