use sql_ast::{
    Ast, NodeId, Value,
    kinds::{
        AlterTableAlterColumn, AssignItem, CharLiteral, Identifier, Insert, QueryBlock, SelectItem,
        Sysdate, TableRef,
    },
};
use sql_render::{DialectKind, RenderConfig, render};

fn select_column_from(ast: &mut Ast, column: &str, table: &str) -> NodeId {
    let column = ast.push(Identifier::new(column)).unwrap();
    let item = ast.push(SelectItem { expr: Some(column), alias: None }).unwrap();
    let table = ast.push(Identifier::new(table)).unwrap();
    let from = ast.push(TableRef { name: Some(table), alias: None }).unwrap();
    ast.push(QueryBlock {
        items: vec![item],
        from: Some(from),
        ..Default::default()
    })
    .unwrap()
}

// Scenario: one identifier column from one table, upper-case keywords.
// Expected Outcome: SELECT/FROM upper-cased, names untouched.
#[test]
fn select_keywords_follow_case_names_do_not() {
    let mut ast = Ast::new();
    let root = select_column_from(&mut ast, "userName", "Accounts");

    let upper = render(&ast, root, &RenderConfig::default()).unwrap();
    assert_eq!(upper.sql, "SELECT userName\nFROM Accounts");

    let lower = render(&ast, root, &RenderConfig::default().with_uppercase(false)).unwrap();
    assert_eq!(lower.sql, "select userName\nfrom Accounts");
}

// Scenario: Hive insert with one partition assignment and a query body, pretty mode.
// Expected Outcome: PARTITION on the table line, the SELECT on the next line at the
// statement's indent level.
#[test]
fn hive_insert_partition_then_query() {
    let mut ast = Ast::new();
    let table = ast.push(Identifier::new("t")).unwrap();
    let key = ast.push(Identifier::new("ds")).unwrap();
    let value = ast.push(CharLiteral::new("2020-01-01")).unwrap();
    let partition = ast
        .push(AssignItem {
            target: Some(key),
            value: Some(value),
        })
        .unwrap();
    let query = select_column_from(&mut ast, "a", "src");
    let root = ast
        .push(Insert {
            table: Some(table),
            partitions: vec![partition],
            query: Some(query),
            overwrite: true,
            ..Default::default()
        })
        .unwrap();

    let config = RenderConfig::new(DialectKind::Hive);
    let rendered = render(&ast, root, &config).unwrap();
    assert_eq!(
        rendered.sql,
        "INSERT OVERWRITE TABLE t PARTITION (ds = '2020-01-01')\nSELECT a\nFROM src"
    );
    let lines: Vec<&str> = rendered.sql.lines().collect();
    assert!(lines[0].contains("PARTITION (ds = '2020-01-01')"));
    assert!(lines[1].starts_with("SELECT"));
}

// Scenario: a character literal holding a quote and a newline.
// Expected Outcome: `\'` and `\n` escapes inside single quotes.
#[test]
fn literal_quote_and_newline_are_escaped() {
    let mut ast = Ast::new();
    let root = ast.push(CharLiteral::new("it's\nhere")).unwrap();
    let rendered = render(&ast, root, &RenderConfig::default()).unwrap();
    assert_eq!(rendered.sql, r"'it\'s\nhere'");
    assert!(rendered.params.is_empty());
}

// Scenario: the same literal, parameterized.
// Expected Outcome: one placeholder and the original unescaped value.
#[test]
fn literal_is_captured_when_parameterized() {
    let mut ast = Ast::new();
    let root = ast.push(CharLiteral::new("it's\nhere")).unwrap();
    let config = RenderConfig::default().with_parameterized(true);
    let rendered = render(&ast, root, &config).unwrap();
    assert_eq!(rendered.sql, "?");
    assert_eq!(rendered.params, vec![Value::String("it's\nhere".into())]);
    assert_eq!(rendered.replaced, 1);
}

// Scenario: ALTER COLUMN with only SET NOT NULL populated.
// Expected Outcome: nothing but the set-not-null clause.
#[test]
fn alter_column_prints_only_set_clauses() {
    let mut ast = Ast::new();
    let root = ast
        .push(AlterTableAlterColumn {
            set_not_null: true,
            ..Default::default()
        })
        .unwrap();

    for dialect in [DialectKind::Standard, DialectKind::Postgres, DialectKind::MySql] {
        let rendered = render(&ast, root, &RenderConfig::new(dialect)).unwrap();
        assert_eq!(rendered.sql, "ALTER COLUMN SET NOT NULL", "{dialect}");
        assert!(rendered.diagnostics.is_empty());
    }
}

// Scenario: PostgreSQL renderer visiting Oracle SYSDATE.
// Expected Outcome: the PostgreSQL keyword, not the Oracle spelling.
#[test]
fn postgres_translates_sysdate() {
    let mut ast = Ast::new();
    let root = ast.push(Sysdate).unwrap();

    let postgres = render(&ast, root, &RenderConfig::new(DialectKind::Postgres)).unwrap();
    assert_eq!(postgres.sql, "CURRENT_TIMESTAMP");

    let oracle = render(&ast, root, &RenderConfig::new(DialectKind::Oracle)).unwrap();
    assert_eq!(oracle.sql, "SYSDATE");

    let mysql = render(&ast, root, &RenderConfig::new(DialectKind::MySql)).unwrap();
    assert_eq!(mysql.sql, "SYSDATE()");

    let hive = render(&ast, root, &RenderConfig::new(DialectKind::Hive)).unwrap();
    assert_eq!(hive.sql, "");
    assert_eq!(hive.diagnostics.len(), 1);
    assert_eq!(hive.diagnostics[0].dialect, "Hive");
}
