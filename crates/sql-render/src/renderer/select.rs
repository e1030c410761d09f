use crate::{
    error::{DropReason, RenderResult},
    renderer::{Render, Renderer, expr::subquery},
};
use sql_ast::{
    NodeId, NodeKind,
    kinds::{
        Fetch, FetchOption, ForClause, GroupBy, Join, JoinType, Limit, LockOption, NullsOrder,
        OrderBy, OrderByItem, QueryBlock, Select, SelectItem, SetQuantifier, SortDirection,
        SubqueryTableSource, TableRef, Union, With, WithEntry,
    },
};

impl Render for Select {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let query = r.required(id, "query", self.query)?;
        if let Some(with) = self.with {
            r.accept(with)?;
            r.newline();
        }
        r.accept(query)?;
        if let Some(order_by) = self.order_by {
            r.newline();
            r.accept(order_by)?;
        }
        if let Some(limit) = self.limit {
            r.newline();
            r.accept(limit)?;
        }
        Ok(())
    }
}

/// Whether the parentheses of a query block are already printed by the
/// node that owns it, directly or through a `Select`.
fn enclosed(r: &Renderer<'_>, id: NodeId) -> bool {
    let parent = r.ancestor_kind(id, 1);
    if r.implies_parens(parent) || r.wrapped_by_select(id) {
        return true;
    }
    matches!(parent, Some(NodeKind::Select(_))) && r.implies_parens(r.ancestor_kind(id, 2))
}

/// Renders a `SELECT` block. `distinct_on` says whether the dialect knows
/// `DISTINCT ON (..)`; otherwise that list is dropped.
pub fn query_block(r: &mut Renderer<'_>, id: NodeId, x: &QueryBlock, distinct_on: bool) -> RenderResult {
    let bracket = r.is_parenthesized(id) && !enclosed(r, id);
    if bracket {
        r.print("(");
    }

    r.keyword("SELECT");
    if !x.distinct_on.is_empty() && distinct_on {
        r.keyword(" DISTINCT ON ");
        r.parenthesized_list(&x.distinct_on)?;
    } else {
        match x.quantifier {
            Some(SetQuantifier::Distinct) => r.keyword(" DISTINCT"),
            Some(SetQuantifier::All) => r.keyword(" ALL"),
            None => {}
        }
        if !x.distinct_on.is_empty() {
            r.drop_clause(id, "distinct_on", DropReason::NoEquivalent)?;
        }
    }
    if !x.items.is_empty() {
        r.print(" ");
        r.join(&x.items, ", ")?;
    }

    if let Some(into) = x.into {
        r.newline();
        r.keyword("INTO ");
        r.accept(into)?;
    }
    if let Some(from) = x.from {
        r.newline();
        r.keyword("FROM ");
        r.accept(from)?;
    }
    if let Some(where_clause) = x.where_clause {
        r.newline();
        r.keyword("WHERE ");
        r.accept(where_clause)?;
    }
    for clause in [x.group_by, x.order_by, x.limit, x.fetch, x.lock].into_iter().flatten() {
        r.accept_on_new_line(clause)?;
    }

    if bracket {
        r.print(")");
    }
    Ok(())
}

impl Render for QueryBlock {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        query_block(r, id, self, false)
    }
}

impl Render for SelectItem {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        r.accept(expr)?;
        if let Some(alias) = &self.alias {
            r.keyword(" AS ");
            r.print(alias);
        }
        Ok(())
    }
}

impl Render for Union {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let left = r.required(id, "left", self.left)?;
        let right = r.required(id, "right", self.right)?;
        r.accept(left)?;
        r.newline();
        r.keyword(self.op.keyword());
        r.newline();
        r.accept(right)
    }
}

impl Render for With {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword(if self.recursive { "WITH RECURSIVE " } else { "WITH " });
        r.join_lines(&self.entries)
    }
}

impl Render for WithEntry {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let query = r.required(id, "query", self.query)?;
        r.print(&self.alias);
        if !self.columns.is_empty() {
            r.print(" (");
            r.print(&self.columns.join(", "));
            r.print(")");
        }
        r.keyword(" AS ");
        subquery(r, query)
    }
}

impl Render for OrderBy {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword("ORDER BY ");
        r.join(&self.items, ", ")
    }
}

impl Render for OrderByItem {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let expr = r.required(id, "expr", self.expr)?;
        r.accept(expr)?;
        match self.direction {
            Some(SortDirection::Asc) => r.keyword(" ASC"),
            Some(SortDirection::Desc) => r.keyword(" DESC"),
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => r.keyword(" NULLS FIRST"),
            Some(NullsOrder::Last) => r.keyword(" NULLS LAST"),
            None => {}
        }
        Ok(())
    }
}

impl Render for GroupBy {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        if !self.items.is_empty() {
            r.keyword("GROUP BY ");
            r.join(&self.items, ", ")?;
        }
        if let Some(having) = self.having {
            if !self.items.is_empty() {
                r.newline();
            }
            r.keyword("HAVING ");
            r.accept(having)?;
        }
        Ok(())
    }
}

/// `LIMIT n OFFSET m`; either part may be absent but not both.
impl Render for Limit {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        if self.row_count.is_none() {
            let offset = r.required(id, "row_count", self.offset)?;
            r.keyword("OFFSET ");
            return r.accept(offset);
        }
        r.keyword("LIMIT ");
        r.accept_opt(self.row_count)?;
        if let Some(offset) = self.offset {
            r.keyword(" OFFSET ");
            r.accept(offset)?;
        }
        Ok(())
    }
}

impl Render for Fetch {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let count = r.required(id, "count", self.count)?;
        r.keyword(match self.option {
            FetchOption::First => "FETCH FIRST ",
            FetchOption::Next => "FETCH NEXT ",
        });
        r.accept(count)?;
        r.keyword(" ROWS ONLY");
        Ok(())
    }
}

impl Render for ForClause {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.keyword(match self.option {
            LockOption::Update => "FOR UPDATE",
            LockOption::Share => "FOR SHARE",
        });
        if !self.of.is_empty() {
            r.keyword(" OF ");
            r.join(&self.of, ", ")?;
        }
        if self.no_wait {
            r.keyword(" NOWAIT");
        }
        if self.skip_locked {
            r.keyword(" SKIP LOCKED");
        }
        Ok(())
    }
}

impl Render for TableRef {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let name = r.required(id, "name", self.name)?;
        r.accept(name)?;
        if let Some(alias) = &self.alias {
            r.print(" ");
            r.print(alias);
        }
        Ok(())
    }
}

impl Render for SubqueryTableSource {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let select = r.required(id, "select", self.select)?;
        subquery(r, select)?;
        if let Some(alias) = &self.alias {
            r.print(" ");
            r.print(alias);
        }
        Ok(())
    }
}

impl Render for Join {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let left = r.required(id, "left", self.left)?;
        let right = r.required(id, "right", self.right)?;
        r.accept(left)?;
        if self.join_type == JoinType::Comma {
            r.print(", ");
        } else {
            r.newline();
            r.keyword(self.join_type.keyword());
            r.print(" ");
        }
        r.accept(right)?;
        if let Some(condition) = self.condition {
            r.keyword(" ON ");
            r.accept(condition)?;
        }
        if !self.using.is_empty() {
            r.keyword(" USING ");
            r.parenthesized_list(&self.using)?;
        }
        Ok(())
    }
}
