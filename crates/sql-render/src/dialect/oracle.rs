use crate::{
    dialect::Dialect,
    error::RenderResult,
    renderer::{
        Renderer,
        create_table::{self, CreateTableClause::{self, *}},
        dml,
        escape::double_quotes,
        expr,
    },
};
use sql_ast::{
    NodeId, NodeKind,
    kinds::{
        AssignItem, CharLiteral, CreateDbLink, CreateTable, Explain, Limit, OracleNode,
        SetTransaction, Truncate,
    },
};

pub const ORACLE_CLAUSES: &[CreateTableClause] = &[Name, Elements, Options, Select];

#[derive(Debug, Clone, Copy, Default)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    /// Quotes are doubled, backslashes are literal.
    fn char_literal(&self, r: &mut Renderer<'_>, id: NodeId, x: &CharLiteral) -> RenderResult {
        expr::char_literal(r, id, x, "", double_quotes)
    }

    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    fn limit(&self, r: &mut Renderer<'_>, id: NodeId, x: &Limit) -> RenderResult {
        if x.row_count.is_none() {
            r.required(id, "row_count", x.offset)?;
        }
        if let Some(offset) = x.offset {
            r.keyword("OFFSET ");
            r.accept(offset)?;
            r.keyword(" ROWS");
            if x.row_count.is_some() {
                r.print(" ");
            }
        }
        if let Some(row_count) = x.row_count {
            r.keyword("FETCH NEXT ");
            r.accept(row_count)?;
            r.keyword(" ROWS ONLY");
        }
        Ok(())
    }

    fn truncate(&self, r: &mut Renderer<'_>, id: NodeId, x: &Truncate) -> RenderResult {
        dml::truncate(r, id, x, false)
    }

    /// Physical attributes are written `name value`.
    fn assign_item(&self, r: &mut Renderer<'_>, id: NodeId, x: &AssignItem) -> RenderResult {
        let attribute = matches!(
            r.ancestor_kind(id, 1),
            Some(NodeKind::CreateTable(_) | NodeKind::Oracle(OracleNode::StorageClause(_)))
        );
        dml::assign_item(r, id, x, if attribute { " " } else { " = " })
    }

    fn create_table_clauses(&self) -> &'static [CreateTableClause] {
        ORACLE_CLAUSES
    }

    /// Table options follow the element list one per line, unbracketed.
    fn create_table_clause(
        &self,
        r: &mut Renderer<'_>,
        id: NodeId,
        x: &CreateTable,
        clause: CreateTableClause,
    ) -> RenderResult {
        if clause != Options {
            return create_table::print_clause(r, id, x, clause);
        }
        for option in &x.options {
            r.newline();
            r.accept(*option)?;
        }
        Ok(())
    }

    fn auto_increment(&self, r: &mut Renderer<'_>) {
        r.keyword(" GENERATED ALWAYS AS IDENTITY");
    }

    fn oracle(&self, r: &mut Renderer<'_>, id: NodeId, x: &OracleNode) -> RenderResult {
        render_native(r, id, x)
    }
}

fn print_set_transaction(r: &mut Renderer<'_>, x: &SetTransaction) -> RenderResult {
    r.keyword("SET TRANSACTION");
    if x.read_only {
        r.keyword(" READ ONLY");
    }
    if let Some(name) = x.name {
        r.keyword(" NAME ");
        r.accept(name)?;
    }
    Ok(())
}

fn print_explain(r: &mut Renderer<'_>, id: NodeId, x: &Explain) -> RenderResult {
    let statement = r.required(id, "statement", x.statement)?;
    r.keyword("EXPLAIN PLAN");
    if let Some(statement_id) = x.statement_id {
        r.keyword(" SET STATEMENT_ID = ");
        r.accept(statement_id)?;
    }
    if let Some(into) = x.into {
        r.keyword(" INTO ");
        r.accept(into)?;
    }
    r.keyword(" FOR");
    r.newline();
    r.accept(statement)
}

fn print_loop_control(r: &mut Renderer<'_>, keyword: &str, label: Option<&str>, when: Option<NodeId>) -> RenderResult {
    r.keyword(keyword);
    if let Some(label) = label {
        r.print(" ");
        r.print(label);
    }
    if let Some(when) = when {
        r.keyword(" WHEN ");
        r.accept(when)?;
    }
    Ok(())
}

fn print_create_db_link(r: &mut Renderer<'_>, id: NodeId, x: &CreateDbLink) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    r.keyword(if x.public { "CREATE PUBLIC DATABASE LINK " } else { "CREATE DATABASE LINK " });
    r.accept(name)?;
    if let Some(user) = x.user {
        r.keyword(" CONNECT TO ");
        r.accept(user)?;
        if let Some(password) = &x.password {
            r.keyword(" IDENTIFIED BY ");
            r.print(password);
        }
    }
    if let Some(using) = x.using {
        r.keyword(" USING ");
        r.accept(using)?;
    }
    Ok(())
}

/// Oracle's own rendering of its node family. Other dialects borrow the
/// expression forms that read the same everywhere.
pub(crate) fn render_native(r: &mut Renderer<'_>, id: NodeId, x: &OracleNode) -> RenderResult {
    match x {
        OracleNode::Sysdate(_) => {
            r.keyword("SYSDATE");
            Ok(())
        }
        OracleNode::OuterJoin(v) => {
            let expr = r.required(id, "expr", v.expr)?;
            r.accept(expr)?;
            r.print("(+)");
            Ok(())
        }
        OracleNode::BinaryFloat(v) => {
            r.print(&format!("{}F", v.value));
            Ok(())
        }
        OracleNode::BinaryDouble(v) => {
            r.print(&format!("{}D", v.value));
            Ok(())
        }
        OracleNode::IsSet(v) => {
            let nested = r.required(id, "nested", v.nested)?;
            r.accept(nested)?;
            r.keyword(" IS A SET");
            Ok(())
        }
        OracleNode::SetTransaction(v) => print_set_transaction(r, v),
        OracleNode::Explain(v) => print_explain(r, id, v),
        OracleNode::AlterTableDropPartition(v) => {
            r.required(id, "partitions", v.partitions.first().copied())?;
            r.keyword("DROP PARTITION ");
            r.join(&v.partitions, ", ")
        }
        OracleNode::AlterTableTruncatePartition(v) => {
            r.required(id, "partitions", v.partitions.first().copied())?;
            r.keyword("TRUNCATE PARTITION ");
            r.join(&v.partitions, ", ")
        }
        OracleNode::Exit(v) => print_loop_control(r, "EXIT", v.label.as_deref(), v.when),
        OracleNode::Continue(v) => print_loop_control(r, "CONTINUE", v.label.as_deref(), v.when),
        OracleNode::Raise(v) => {
            r.keyword("RAISE");
            if let Some(exception) = v.exception {
                r.print(" ");
                r.accept(exception)?;
            }
            Ok(())
        }
        OracleNode::CreateDbLink(v) => print_create_db_link(r, id, v),
        OracleNode::DropDbLink(v) => {
            let name = r.required(id, "name", v.name)?;
            r.keyword(if v.public { "DROP PUBLIC DATABASE LINK " } else { "DROP DATABASE LINK " });
            r.accept(name)
        }
        OracleNode::StorageClause(v) => {
            r.keyword("STORAGE (");
            r.join(&v.items, " ")?;
            r.print(")");
            Ok(())
        }
        OracleNode::LobStorageClause(v) => {
            r.required(id, "items", v.items.first().copied())?;
            r.keyword("LOB ");
            r.parenthesized_list(&v.items)?;
            r.keyword(" STORE AS");
            if let Some(segment) = v.segment {
                r.print(" ");
                r.accept(segment)?;
            }
            Ok(())
        }
        OracleNode::UsingIndexClause(v) => {
            r.keyword("USING INDEX");
            if let Some(index) = v.index {
                r.print(" ");
                r.accept(index)?;
            }
            if let Some(tablespace) = v.tablespace {
                r.keyword(" TABLESPACE ");
                r.accept(tablespace)?;
            }
            Ok(())
        }
    }
}
