use crate::{
    dialect::{Dialect, postgres},
    error::{DropReason, RenderResult},
    renderer::{
        Renderer,
        create_table::{self, CreateTableClause::{self, *}},
        dml,
    },
};
use sql_ast::{
    NodeId,
    kinds::{CreateTable, Limit, OnConflict, OracleNode, PgNode, Truncate},
};

pub const MYSQL_CLAUSES: &[CreateTableClause] = &[Name, Elements, Like, Options, Comment, Select];

#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    /// `LIMIT offset, count`
    fn limit(&self, r: &mut Renderer<'_>, id: NodeId, x: &Limit) -> RenderResult {
        let row_count = r.required(id, "row_count", x.row_count)?;
        r.keyword("LIMIT ");
        if let Some(offset) = x.offset {
            r.accept(offset)?;
            r.print(", ");
        }
        r.accept(row_count)
    }

    fn returning(&self, r: &mut Renderer<'_>, id: NodeId, items: &[NodeId]) -> RenderResult {
        dml::drop_returning(r, id, items)
    }

    fn truncate(&self, r: &mut Renderer<'_>, id: NodeId, x: &Truncate) -> RenderResult {
        dml::truncate(r, id, x, false)
    }

    fn create_table_clauses(&self) -> &'static [CreateTableClause] {
        MYSQL_CLAUSES
    }

    /// Table options are written inline after the element list:
    /// `ENGINE = InnoDB DEFAULT CHARSET = utf8mb4`.
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
        r.newline();
        r.join(&x.options, " ")
    }

    fn postgres(&self, r: &mut Renderer<'_>, id: NodeId, x: &PgNode) -> RenderResult {
        match x {
            PgNode::OnConflict(v) => on_duplicate_key(r, id, v),
            other => postgres::translate_foreign(r, id, other),
        }
    }

    fn oracle(&self, r: &mut Renderer<'_>, id: NodeId, x: &OracleNode) -> RenderResult {
        match x {
            OracleNode::Sysdate(_) => {
                r.keyword("SYSDATE()");
                Ok(())
            }
            _ => r.drop_node(id, DropReason::Unsupported),
        }
    }
}

/// `ON DUPLICATE KEY UPDATE ..` for an upsert. MySQL picks the conflicting
/// key itself, so the target clauses are dropped; `DO NOTHING` has no
/// counterpart.
fn on_duplicate_key(r: &mut Renderer<'_>, id: NodeId, x: &OnConflict) -> RenderResult {
    if x.do_nothing || x.update_items.is_empty() {
        return r.drop_node(id, DropReason::NoEquivalent);
    }
    for (clause, present) in [
        ("target", !x.target.is_empty()),
        ("constraint", x.constraint.is_some()),
        ("where_clause", x.where_clause.is_some()),
        ("update_where", x.update_where.is_some()),
    ] {
        if present {
            r.drop_clause(id, clause, DropReason::NoEquivalent)?;
        }
    }
    r.keyword("ON DUPLICATE KEY UPDATE ");
    r.join(&x.update_items, ", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, renderer::Rendered};
    use sql_ast::{
        Ast,
        kinds::{
            AllColumn, AssignItem, ColumnDef, DataType, Identifier, Insert, IntegerLiteral,
            QueryBlock, SelectItem, Sysdate, TableRef, UpdateSetItem, ValuesRow,
        },
    };

    fn render_with(ast: &Ast, root: NodeId, config: &RenderConfig) -> Rendered {
        let mut r = Renderer::new(ast, &MySql, config);
        r.render(root).unwrap();
        r.finish()
    }

    fn render(ast: &Ast, root: NodeId) -> Rendered {
        render_with(ast, root, &RenderConfig::default().with_pretty(false))
    }

    fn ident(ast: &mut Ast, name: &str) -> NodeId {
        ast.push(Identifier::new(name)).unwrap()
    }

    #[test]
    fn test_limit_with_offset() {
        let mut ast = Ast::new();
        let star = ast.push(AllColumn).unwrap();
        let item = ast.push(SelectItem { expr: Some(star), alias: None }).unwrap();
        let table = ast.push(Identifier::quoted("order")).unwrap();
        let from = ast.push(TableRef { name: Some(table), alias: None }).unwrap();
        let count = ast.push(IntegerLiteral { value: 20 }).unwrap();
        let offset = ast.push(IntegerLiteral { value: 40 }).unwrap();
        let limit = ast
            .push(Limit {
                row_count: Some(count),
                offset: Some(offset),
            })
            .unwrap();
        let id = ast
            .push(QueryBlock {
                items: vec![item],
                from: Some(from),
                limit: Some(limit),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(render(&ast, id).sql, "SELECT * FROM `order` LIMIT 40, 20");
    }

    #[test]
    fn test_on_conflict_becomes_on_duplicate_key() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "counters");
        let table = ast.push(TableRef { name: Some(name), alias: None }).unwrap();
        let key = ident(&mut ast, "id");
        let value = ast.push(IntegerLiteral { value: 1 }).unwrap();
        let row = ast.push(ValuesRow { values: vec![value] }).unwrap();
        let target = ident(&mut ast, "id");
        let column = ident(&mut ast, "hits");
        let hits = ident(&mut ast, "hits");
        let one = ast.push(IntegerLiteral { value: 1 }).unwrap();
        let sum = ast
            .push(sql_ast::kinds::BinaryOp::new(hits, sql_ast::kinds::BinaryOperator::Add, one))
            .unwrap();
        let item = ast
            .push(UpdateSetItem {
                column: Some(column),
                value: Some(sum),
            })
            .unwrap();
        let on_conflict = ast
            .push(OnConflict {
                target: vec![target],
                update_items: vec![item],
                ..Default::default()
            })
            .unwrap();
        let id = ast
            .push(Insert {
                table: Some(table),
                columns: vec![key],
                values: vec![row],
                on_conflict: Some(on_conflict),
                ..Default::default()
            })
            .unwrap();

        let rendered = render(&ast, id);
        assert_eq!(
            rendered.sql,
            "INSERT INTO counters (id) VALUES (1) ON DUPLICATE KEY UPDATE hits = hits + 1"
        );
        assert_eq!(rendered.diagnostics.len(), 1);
        assert_eq!(rendered.diagnostics[0].clause, Some("target"));
    }

    #[test]
    fn test_do_nothing_is_dropped() {
        let mut ast = Ast::new();
        let id = ast
            .push(OnConflict {
                do_nothing: true,
                ..Default::default()
            })
            .unwrap();
        let rendered = render(&ast, id);
        assert_eq!(rendered.sql, "");
        assert_eq!(rendered.diagnostics[0].kind, "OnConflict");
        assert_eq!(rendered.diagnostics[0].reason, DropReason::NoEquivalent);
    }

    #[test]
    fn test_dropped_on_conflict_leaves_no_separator() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "counters");
        let table = ast.push(TableRef { name: Some(name), alias: None }).unwrap();
        let key = ident(&mut ast, "id");
        let value = ast.push(IntegerLiteral { value: 1 }).unwrap();
        let row = ast.push(ValuesRow { values: vec![value] }).unwrap();
        let on_conflict = ast
            .push(OnConflict {
                do_nothing: true,
                ..Default::default()
            })
            .unwrap();
        let id = ast
            .push(Insert {
                table: Some(table),
                columns: vec![key],
                values: vec![row],
                on_conflict: Some(on_conflict),
                ..Default::default()
            })
            .unwrap();

        let compact = render(&ast, id);
        assert_eq!(compact.sql, "INSERT INTO counters (id) VALUES (1)");
        assert_eq!(compact.diagnostics.len(), 1);
        let pretty = render_with(&ast, id, &RenderConfig::default());
        assert_eq!(pretty.sql, "INSERT INTO counters (id)\nVALUES (1)");
    }

    #[test]
    fn test_inline_table_options() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "users");
        let column_name = ident(&mut ast, "id");
        let data_type = ast.push(DataType::new("INT")).unwrap();
        let column = ast
            .push(ColumnDef {
                name: Some(column_name),
                data_type: Some(data_type),
                primary_key: true,
                auto_increment: true,
                ..Default::default()
            })
            .unwrap();
        let mut options = Vec::new();
        for (key, value) in [("ENGINE", "InnoDB"), ("DEFAULT CHARSET", "utf8mb4")] {
            let target = ident(&mut ast, key);
            let value = ident(&mut ast, value);
            options.push(
                ast.push(AssignItem {
                    target: Some(target),
                    value: Some(value),
                })
                .unwrap(),
            );
        }
        let id = ast
            .push(CreateTable {
                name: Some(name),
                elements: vec![column],
                options,
                ..Default::default()
            })
            .unwrap();

        let expected = "CREATE TABLE users (\n\
                        \tid INT PRIMARY KEY AUTO_INCREMENT\n\
                        )\n\
                        ENGINE = InnoDB DEFAULT CHARSET = utf8mb4";
        assert_eq!(render_with(&ast, id, &RenderConfig::default()).sql, expected);
    }

    #[test]
    fn test_sysdate_is_a_function() {
        let mut ast = Ast::new();
        let id = ast.push(Sysdate).unwrap();
        let config = RenderConfig::default().with_uppercase(false);
        assert_eq!(render_with(&ast, id, &config).sql, "sysdate()");
    }
}
