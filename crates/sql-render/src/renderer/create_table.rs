//! `CREATE TABLE` as an ordered pipeline of clause printers.
//!
//! Each dialect lists the clauses it prints in [`Dialect::create_table_clauses`]
//! and may replace any single step through [`Dialect::create_table_clause`].
//! A clause set on the node but missing from the dialect's list is dropped.
//!
//! [`Dialect::create_table_clauses`]: crate::dialect::Dialect::create_table_clauses
//! [`Dialect::create_table_clause`]: crate::dialect::Dialect::create_table_clause

use crate::{
    error::{DropReason, RenderResult},
    renderer::{Render, Renderer},
};
use sql_ast::{
    NodeId,
    kinds::{self, ColumnDef, CreateTable, ForeignKey, PrimaryKey, UniqueKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreateTableClause {
    Name,
    Elements,
    Inherits,
    Using,
    Comment,
    PartitionedBy,
    ClusteredBy,
    SortedBy,
    Buckets,
    SkewedBy,
    RowFormat,
    Like,
    StoredAs,
    StoredBy,
    Location,
    Options,
    Lifecycle,
    Select,
}

use CreateTableClause::*;

pub const STANDARD_CLAUSES: &[CreateTableClause] =
    &[Name, Elements, Comment, PartitionedBy, Like, Options, Select];

impl CreateTableClause {
    pub const ALL: [CreateTableClause; 18] = [
        Name,
        Elements,
        Inherits,
        Using,
        Comment,
        PartitionedBy,
        ClusteredBy,
        SortedBy,
        Buckets,
        SkewedBy,
        RowFormat,
        Like,
        StoredAs,
        StoredBy,
        Location,
        Options,
        Lifecycle,
        Select,
    ];

    /// Slot name used in diagnostics.
    pub fn slot(self) -> &'static str {
        match self {
            Name => "name",
            Elements => "elements",
            Inherits => "inherits",
            Using => "using",
            Comment => "comment",
            PartitionedBy => "partitioned_by",
            ClusteredBy => "clustered_by",
            SortedBy => "sorted_by",
            Buckets => "buckets",
            SkewedBy => "skewed_by",
            RowFormat => "row_format",
            Like => "like",
            StoredAs => "stored_as",
            StoredBy => "stored_by",
            Location => "location",
            Options => "options",
            Lifecycle => "lifecycle",
            Select => "select",
        }
    }

    pub fn is_present(self, x: &CreateTable) -> bool {
        match self {
            Name => x.name.is_some(),
            Elements => !x.elements.is_empty(),
            Inherits => !x.inherits.is_empty(),
            Using => x.using.is_some(),
            Comment => x.comment.is_some(),
            PartitionedBy => !x.partitioned_by.is_empty(),
            ClusteredBy => !x.clustered_by.is_empty(),
            SortedBy => !x.sorted_by.is_empty(),
            Buckets => x.buckets.is_some(),
            SkewedBy => !x.skewed_by.is_empty(),
            RowFormat => x.row_format.is_some(),
            Like => x.like.is_some(),
            StoredAs => x.stored_as.is_some(),
            StoredBy => x.stored_by.is_some(),
            Location => x.location.is_some(),
            Options => !x.options.is_empty(),
            Lifecycle => x.lifecycle.is_some(),
            Select => x.select.is_some(),
        }
    }
}

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        r.required(id, "name", self.name)?;

        r.keyword("CREATE ");
        if self.temporary {
            r.keyword("TEMPORARY ");
        }
        if self.external {
            r.keyword("EXTERNAL ");
        }
        r.keyword("TABLE ");
        if self.if_not_exists {
            r.keyword("IF NOT EXISTS ");
        }
        print_clauses(r, id, self)
    }
}

/// Runs the dialect's clause order over `x`, dropping clauses it leaves out.
pub fn print_clauses(r: &mut Renderer<'_>, id: NodeId, x: &CreateTable) -> RenderResult {
    let d = r.dialect();
    let order = d.create_table_clauses();

    for clause in CreateTableClause::ALL {
        if clause.is_present(x) && !order.contains(&clause) {
            r.drop_clause(id, clause.slot(), DropReason::NoEquivalent)?;
        }
    }
    for &clause in order {
        if clause.is_present(x) {
            d.create_table_clause(r, id, x, clause)?;
        }
    }
    Ok(())
}

/// Default printer for one clause. The name and the element list stay on
/// the statement's first line; every other clause starts a new line.
pub fn print_clause(r: &mut Renderer<'_>, id: NodeId, x: &CreateTable, clause: CreateTableClause) -> RenderResult {
    match clause {
        Name => {
            let name = r.required(id, "name", x.name)?;
            r.accept(name)
        }
        Elements => {
            r.print(" (");
            r.indented(|r| {
                r.break_or("");
                r.join_lines(&x.elements)
            })?;
            r.break_or("");
            r.print(")");
            Ok(())
        }
        Inherits => list_clause(r, "INHERITS ", &x.inherits),
        Using => single_clause(r, "USING ", x.using),
        Comment => single_clause(r, "COMMENT ", x.comment),
        PartitionedBy => list_clause(r, "PARTITIONED BY ", &x.partitioned_by),
        ClusteredBy => list_clause(r, "CLUSTERED BY ", &x.clustered_by),
        SortedBy => list_clause(r, "SORTED BY ", &x.sorted_by),
        Buckets => {
            if let Some(buckets) = x.buckets {
                r.newline();
                r.keyword("INTO ");
                r.print(&buckets.to_string());
                r.keyword(" BUCKETS");
            }
            Ok(())
        }
        SkewedBy => {
            list_clause(r, "SKEWED BY ", &x.skewed_by)?;
            if !x.skewed_on.is_empty() {
                r.keyword(" ON ");
                r.parenthesized_list(&x.skewed_on)?;
            }
            if x.skewed_stored_as_directories {
                r.keyword(" STORED AS DIRECTORIES");
            }
            Ok(())
        }
        RowFormat => single_clause(r, "", x.row_format),
        Like => single_clause(r, "LIKE ", x.like),
        StoredAs => single_clause(r, "STORED AS ", x.stored_as),
        StoredBy => single_clause(r, "STORED BY ", x.stored_by),
        Location => single_clause(r, "LOCATION ", x.location),
        Options => {
            let prefix = r.dialect().table_options_prefix();
            options_block(r, prefix, &x.options)
        }
        Lifecycle => single_clause(r, "LIFECYCLE ", x.lifecycle),
        Select => {
            if let Some(select) = x.select {
                r.newline();
                r.keyword("AS");
                r.newline();
                r.accept(select)?;
            }
            Ok(())
        }
    }
}

pub fn single_clause(r: &mut Renderer<'_>, keyword: &str, child: Option<NodeId>) -> RenderResult {
    let Some(child) = child else {
        return Ok(());
    };
    r.newline();
    r.keyword(keyword);
    r.accept(child)
}

pub fn list_clause(r: &mut Renderer<'_>, keyword: &str, items: &[NodeId]) -> RenderResult {
    if items.is_empty() {
        return Ok(());
    }
    r.newline();
    r.keyword(keyword);
    r.parenthesized_list(items)
}

/// `PREFIX` followed by one option per indented line and a closing `)`.
pub fn options_block(r: &mut Renderer<'_>, prefix: &str, options: &[NodeId]) -> RenderResult {
    r.newline();
    r.keyword(prefix);
    r.indented(|r| {
        r.break_or("");
        r.join_lines(options)
    })?;
    r.break_or("");
    r.print(")");
    Ok(())
}

impl Render for ColumnDef {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let name = r.required(id, "name", self.name)?;
        r.accept(name)?;
        if let Some(data_type) = self.data_type {
            r.print(" ");
            r.accept(data_type)?;
        }
        if self.not_null {
            r.keyword(" NOT NULL");
        }
        if let Some(default) = self.default {
            r.keyword(" DEFAULT ");
            r.accept(default)?;
        }
        if self.primary_key {
            r.keyword(" PRIMARY KEY");
        }
        if self.unique {
            r.keyword(" UNIQUE");
        }
        if self.auto_increment {
            let d = r.dialect();
            d.auto_increment(r);
        }
        if let Some(comment) = self.comment {
            r.keyword(" COMMENT ");
            r.accept(comment)?;
        }
        Ok(())
    }
}

fn constraint_name(r: &mut Renderer<'_>, name: Option<&str>) {
    if let Some(name) = name {
        r.keyword("CONSTRAINT ");
        r.print(name);
        r.print(" ");
    }
}

impl Render for PrimaryKey {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        constraint_name(r, self.name.as_deref());
        r.keyword("PRIMARY KEY ");
        r.parenthesized_list(&self.columns)
    }
}

impl Render for UniqueKey {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        constraint_name(r, self.name.as_deref());
        r.keyword("UNIQUE ");
        r.parenthesized_list(&self.columns)
    }
}

impl Render for ForeignKey {
    fn render(&self, r: &mut Renderer<'_>, id: NodeId) -> RenderResult {
        let references = r.required(id, "references", self.references)?;
        constraint_name(r, self.name.as_deref());
        r.keyword("FOREIGN KEY ");
        r.parenthesized_list(&self.columns)?;
        r.keyword(" REFERENCES ");
        r.accept(references)?;
        if !self.referenced_columns.is_empty() {
            r.print(" ");
            r.parenthesized_list(&self.referenced_columns)?;
        }
        Ok(())
    }
}

/// `ROW FORMAT SERDE ..` or `ROW FORMAT DELIMITED ..` with one
/// terminator per indented line.
impl Render for kinds::RowFormat {
    fn render(&self, r: &mut Renderer<'_>, _id: NodeId) -> RenderResult {
        if let Some(serde) = self.serde {
            r.keyword("ROW FORMAT SERDE ");
            r.accept(serde)?;
            if !self.serde_properties.is_empty() {
                r.keyword(" WITH SERDEPROPERTIES ");
                r.parenthesized_list(&self.serde_properties)?;
            }
            return Ok(());
        }

        r.keyword("ROW FORMAT DELIMITED");
        let terminators = [
            ("FIELDS TERMINATED BY ", self.fields_terminated_by),
            ("ESCAPED BY ", self.escaped_by),
            ("COLLECTION ITEMS TERMINATED BY ", self.collection_items_terminated_by),
            ("MAP KEYS TERMINATED BY ", self.map_keys_terminated_by),
            ("LINES TERMINATED BY ", self.lines_terminated_by),
            ("NULL DEFINED AS ", self.null_defined_as),
        ];
        r.indented(|r| {
            for (keyword, child) in terminators {
                if let Some(child) = child {
                    r.newline();
                    r.keyword(keyword);
                    r.accept(child)?;
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, dialect::Standard, error::RenderError};
    use sql_ast::{
        Ast,
        kinds::{
            AssignItem, CharLiteral, DataType, Identifier, IntegerLiteral, QueryBlock, RowFormat,
            SelectItem, TableRef,
        },
    };

    fn column(ast: &mut Ast, name: &str, data_type: &str) -> ColumnDef {
        let name = ast.push(Identifier::new(name)).unwrap();
        let data_type = ast.push(DataType::new(data_type)).unwrap();
        ColumnDef {
            name: Some(name),
            data_type: Some(data_type),
            ..Default::default()
        }
    }

    fn users_table(ast: &mut Ast) -> CreateTable {
        let name = ast.push(Identifier::new("users")).unwrap();
        let mut id = column(ast, "id", "INT");
        id.primary_key = true;
        id.auto_increment = true;
        let id = ast.push(id).unwrap();
        let mut email = column(ast, "email", "VARCHAR");
        email.not_null = true;
        let email = ast.push(email).unwrap();
        let key = ast.push(Identifier::new("email")).unwrap();
        let unique = ast
            .push(UniqueKey {
                name: Some("uq_email".into()),
                columns: vec![key],
            })
            .unwrap();
        CreateTable {
            if_not_exists: true,
            name: Some(name),
            elements: vec![id, email, unique],
            ..Default::default()
        }
    }

    fn render(ast: &Ast, root: NodeId, config: &RenderConfig) -> crate::renderer::Rendered {
        let mut r = Renderer::new(ast, &Standard, config);
        r.render(root).unwrap();
        assert_eq!(r.indent_level(), 0);
        r.finish()
    }

    #[test]
    fn test_create_table_pretty() {
        let mut ast = Ast::new();
        let table = users_table(&mut ast);
        let id = ast.push(table).unwrap();

        let expected = "CREATE TABLE IF NOT EXISTS users (\n\
                        \tid INT PRIMARY KEY AUTO_INCREMENT,\n\
                        \temail VARCHAR NOT NULL,\n\
                        \tCONSTRAINT uq_email UNIQUE (email)\n\
                        )";
        assert_eq!(render(&ast, id, &RenderConfig::default()).sql, expected);
    }

    #[test]
    fn test_create_table_compact() {
        let mut ast = Ast::new();
        let table = users_table(&mut ast);
        let id = ast.push(table).unwrap();
        let config = RenderConfig::default().with_pretty(false).with_uppercase(false);

        assert_eq!(
            render(&ast, id, &config).sql,
            "create table if not exists users (id INT primary key auto_increment, \
             email VARCHAR not null, constraint uq_email unique (email))"
        );
    }

    #[test]
    fn test_clauses_outside_order_are_dropped() {
        let mut ast = Ast::new();
        let mut table = users_table(&mut ast);
        table.location = Some(ast.push(CharLiteral::new("/warehouse/users")).unwrap());
        table.buckets = Some(8);
        let key = ast.push(CharLiteral::new("fillfactor")).unwrap();
        let value = ast.push(IntegerLiteral { value: 70 }).unwrap();
        let option = ast
            .push(AssignItem {
                target: Some(key),
                value: Some(value),
            })
            .unwrap();
        table.options = vec![option];
        let id = ast.push(table).unwrap();

        let rendered = render(&ast, id, &RenderConfig::default().with_pretty(false));
        assert!(rendered.sql.ends_with(") WITH ('fillfactor' = 70)"), "{}", rendered.sql);
        assert!(!rendered.sql.contains("LOCATION"));
        let dropped: Vec<_> = rendered.diagnostics.iter().filter_map(|d| d.clause).collect();
        assert_eq!(dropped, vec!["buckets", "location"]);
    }

    #[test]
    fn test_create_table_as_select() {
        let mut ast = Ast::new();
        let name = ast.push(Identifier::new("copy")).unwrap();
        let a = ast.push(Identifier::new("a")).unwrap();
        let item = ast.push(SelectItem { expr: Some(a), alias: None }).unwrap();
        let source = ast.push(Identifier::new("src")).unwrap();
        let from = ast.push(TableRef { name: Some(source), alias: None }).unwrap();
        let query = ast
            .push(QueryBlock {
                items: vec![item],
                from: Some(from),
                ..Default::default()
            })
            .unwrap();
        let id = ast
            .push(CreateTable {
                name: Some(name),
                select: Some(query),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(
            render(&ast, id, &RenderConfig::default()).sql,
            "CREATE TABLE copy\nAS\nSELECT a\nFROM src"
        );
    }

    #[test]
    fn test_create_table_requires_name() {
        let mut ast = Ast::new();
        let id = ast.push(CreateTable::default()).unwrap();
        let config = RenderConfig::default();
        let mut r = Renderer::new(&ast, &Standard, &config);
        assert!(matches!(
            r.render(id),
            Err(RenderError::MissingChild { kind: "CreateTable", slot: "name", .. })
        ));
    }

    #[test]
    fn test_row_format_delimited() {
        let mut ast = Ast::new();
        let fields = ast.push(CharLiteral::new(",")).unwrap();
        let lines = ast.push(CharLiteral::new("\n")).unwrap();
        let id = ast
            .push(RowFormat {
                fields_terminated_by: Some(fields),
                lines_terminated_by: Some(lines),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(
            render(&ast, id, &RenderConfig::default()).sql,
            "ROW FORMAT DELIMITED\n\tFIELDS TERMINATED BY ','\n\tLINES TERMINATED BY '\\n'"
        );
    }
}
