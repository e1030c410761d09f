use crate::{
    error::{DropReason, RenderResult},
    renderer::{Render, Renderer},
};
use sql_ast::{
    NodeId,
    kinds::{Insert, ValuesRow},
};

/// Renders an `INSERT` statement into SQL.
///
/// ```sql
/// INSERT INTO table_name (column1, column2)
/// VALUES (value1, value2),
/// (value3, value4)
/// ```
impl Render for Insert {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let table = r.required(id, "table", self.table)?;
        if let Some(with) = self.with {
            r.accept(with)?;
            r.newline();
        }

        r.keyword("INSERT INTO ");
        r.accept(table)?;
        if self.overwrite {
            r.drop_clause(id, "overwrite", DropReason::NoEquivalent)?;
        }
        if !self.partitions.is_empty() {
            r.drop_clause(id, "partitions", DropReason::NoEquivalent)?;
        }
        if self.if_not_exists {
            r.drop_clause(id, "if_not_exists", DropReason::NoEquivalent)?;
        }

        columns_and_source(r, id, self)?;
        conflict_and_returning(r, id, self)
    }
}

/// Column list followed by the `VALUES` rows or the source query, which
/// starts on its own line.
pub fn columns_and_source(r: &mut Renderer<'_>, id: NodeId, x: &Insert) -> RenderResult {
    columns(r, x)?;
    source(r, id, x)
}

pub fn columns(r: &mut Renderer<'_>, x: &Insert) -> RenderResult {
    if !x.columns.is_empty() {
        r.print(" ");
        r.parenthesized_list(&x.columns)?;
    }
    Ok(())
}

/// The `VALUES` rows or the query, on a new line.
pub fn source(r: &mut Renderer<'_>, id: NodeId, x: &Insert) -> RenderResult {
    if !x.values.is_empty() {
        r.newline();
        r.keyword("VALUES ");
        return r.join_lines(&x.values);
    }
    let query = r.required(id, "query", x.query)?;
    r.newline();
    r.accept(query)
}

pub fn conflict_and_returning(r: &mut Renderer<'_>, id: NodeId, x: &Insert) -> RenderResult {
    if let Some(on_conflict) = x.on_conflict {
        r.accept_on_new_line(on_conflict)?;
    }
    if !x.returning.is_empty() {
        let d = r.dialect();
        d.returning(r, id, &x.returning)?;
    }
    Ok(())
}

impl Render for ValuesRow {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        r.parenthesized_list(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, dialect::Standard, error::RenderError};
    use sql_ast::{
        Ast, Value,
        kinds::{AllColumn, CharLiteral, Identifier, IntegerLiteral, QueryBlock, SelectItem, TableRef},
    };

    fn table(ast: &mut Ast, name: &str) -> NodeId {
        let name = ast.push(Identifier::new(name)).unwrap();
        ast.push(TableRef { name: Some(name), alias: None }).unwrap()
    }

    fn row(ast: &mut Ast, id: i64, name: &str) -> NodeId {
        let id = ast.push(IntegerLiteral { value: id }).unwrap();
        let name = ast.push(CharLiteral::new(name)).unwrap();
        ast.push(ValuesRow { values: vec![id, name] }).unwrap()
    }

    fn users_insert(ast: &mut Ast) -> NodeId {
        let table = table(ast, "users");
        let columns = vec![
            ast.push(Identifier::new("id")).unwrap(),
            ast.push(Identifier::new("name")).unwrap(),
        ];
        let values = vec![row(ast, 1, "Alice"), row(ast, 2, "Bob")];
        ast.push(Insert {
            table: Some(table),
            columns,
            values,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_insert_values() {
        let mut ast = Ast::new();
        let insert = users_insert(&mut ast);
        let config = RenderConfig::default();
        let mut r = Renderer::new(&ast, &Standard, &config);
        r.render(insert).unwrap();

        let expected = r#"INSERT INTO users (id, name)
VALUES (1, 'Alice'),
(2, 'Bob')"#;
        assert_eq!(r.finish().sql, expected);
    }

    #[test]
    fn test_insert_values_parameterized() {
        let mut ast = Ast::new();
        let insert = users_insert(&mut ast);
        let config = RenderConfig::default().with_pretty(false).with_parameterized(true);
        let mut r = Renderer::new(&ast, &Standard, &config);
        r.render(insert).unwrap();
        let rendered = r.finish();

        assert_eq!(rendered.sql, "INSERT INTO users (id, name) VALUES (?, ?), (?, ?)");
        assert_eq!(
            rendered.params,
            vec![
                Value::Int(1),
                Value::String("Alice".into()),
                Value::Int(2),
                Value::String("Bob".into()),
            ]
        );
    }

    #[test]
    fn test_insert_select_drops_partitions() {
        let mut ast = Ast::new();
        let target = table(&mut ast, "archive");
        let key = ast.push(Identifier::new("ds")).unwrap();
        let star = ast.push(AllColumn).unwrap();
        let item = ast.push(SelectItem { expr: Some(star), alias: None }).unwrap();
        let from = table(&mut ast, "events");
        let query = ast
            .push(QueryBlock {
                items: vec![item],
                from: Some(from),
                ..Default::default()
            })
            .unwrap();
        let insert = ast
            .push(Insert {
                table: Some(target),
                partitions: vec![key],
                query: Some(query),
                overwrite: true,
                ..Default::default()
            })
            .unwrap();

        let config = RenderConfig::default().with_pretty(false);
        let mut r = Renderer::new(&ast, &Standard, &config);
        r.render(insert).unwrap();
        let rendered = r.finish();
        assert_eq!(rendered.sql, "INSERT INTO archive SELECT * FROM events");
        let clauses: Vec<_> = rendered.diagnostics.iter().filter_map(|d| d.clause).collect();
        assert_eq!(clauses, vec!["overwrite", "partitions"]);
    }

    #[test]
    fn test_insert_without_source_fails() {
        let mut ast = Ast::new();
        let target = table(&mut ast, "users");
        let insert = ast
            .push(Insert {
                table: Some(target),
                ..Default::default()
            })
            .unwrap();
        let config = RenderConfig::default();
        let mut r = Renderer::new(&ast, &Standard, &config);
        let err = r.render(insert).unwrap_err();
        assert!(matches!(err, RenderError::MissingChild { kind: "Insert", slot: "query", .. }));
        assert!(err.is_precondition());
    }
}
