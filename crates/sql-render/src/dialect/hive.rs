use crate::{
    dialect::Dialect,
    error::{DropReason, RenderResult},
    renderer::{
        Renderer,
        create_table::{self, CreateTableClause::{self, *}},
        dml,
        escape::escape,
        insert,
    },
};
use sql_ast::{
    NodeId, NodeKind,
    kinds::{
        AddJar, AlterTableAddColumn, CreateFunction, CreateIndex, CreateTable, ExchangePartition,
        HiveInsert, HiveNode, Insert, LoadData, MsckRepair, MultiInsert, Truncate,
    },
};

pub const HIVE_CLAUSES: &[CreateTableClause] = &[
    Name,
    Elements,
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

#[derive(Debug, Clone, Copy, Default)]
pub struct Hive;

impl Dialect for Hive {
    fn name(&self) -> &'static str {
        "Hive"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    /// `INSERT OVERWRITE|INTO TABLE t PARTITION (..) (cols) [IF NOT EXISTS]`.
    fn insert(&self, r: &mut Renderer<'_>, id: NodeId, x: &Insert) -> RenderResult {
        let table = r.required(id, "table", x.table)?;
        if let Some(with) = x.with {
            r.accept(with)?;
            r.newline();
        }
        print_insert_target(r, x.overwrite, table, &x.partitions)?;
        insert::columns(r, x)?;
        if x.if_not_exists {
            r.keyword(" IF NOT EXISTS");
        }
        insert::source(r, id, x)?;

        if x.on_conflict.is_some() {
            r.drop_clause(id, "on_conflict", DropReason::NoEquivalent)?;
        }
        if !x.returning.is_empty() {
            let d = r.dialect();
            d.returning(r, id, &x.returning)?;
        }
        Ok(())
    }

    fn returning(&self, r: &mut Renderer<'_>, id: NodeId, items: &[NodeId]) -> RenderResult {
        dml::drop_returning(r, id, items)
    }

    fn truncate(&self, r: &mut Renderer<'_>, id: NodeId, x: &Truncate) -> RenderResult {
        dml::truncate(r, id, x, false)
    }

    fn create_table_clauses(&self) -> &'static [CreateTableClause] {
        HIVE_CLAUSES
    }

    /// A storage handler given by name is printed as a quoted string, never
    /// as a placeholder.
    fn create_table_clause(
        &self,
        r: &mut Renderer<'_>,
        id: NodeId,
        x: &CreateTable,
        clause: CreateTableClause,
    ) -> RenderResult {
        if clause == StoredBy
            && let Some(handler) = x.stored_by
            && let Some(NodeKind::Identifier(name)) = r.kind_of(handler)
        {
            r.newline();
            r.keyword("STORED BY ");
            if name.name.starts_with(['`', '"', '\'']) {
                r.print(&name.name);
            } else {
                r.print("'");
                r.print(&escape(&name.name));
                r.print("'");
            }
            return Ok(());
        }
        create_table::print_clause(r, id, x, clause)
    }

    fn table_options_prefix(&self) -> &'static str {
        "TBLPROPERTIES ("
    }

    fn create_index(&self, r: &mut Renderer<'_>, id: NodeId, x: &CreateIndex) -> RenderResult {
        print_create_index(r, id, x)
    }

    /// `ADD COLUMNS (a INT, b STRING)`
    fn add_column(&self, r: &mut Renderer<'_>, id: NodeId, x: &AlterTableAddColumn) -> RenderResult {
        r.required(id, "columns", x.columns.first().copied())?;
        r.keyword("ADD COLUMNS ");
        r.parenthesized_list(&x.columns)
    }

    fn hive(&self, r: &mut Renderer<'_>, id: NodeId, x: &HiveNode) -> RenderResult {
        match x {
            HiveNode::HiveInsert(v) => print_hive_insert(r, id, v),
            HiveNode::MultiInsert(v) => print_multi_insert(r, id, v),
            HiveNode::LoadData(v) => print_load_data(r, id, v),
            HiveNode::MsckRepair(v) => print_msck_repair(r, id, v),
            HiveNode::CreateFunction(v) => print_create_function(r, id, v),
            HiveNode::AddJar(v) => print_add_jar(r, v),
            HiveNode::ExchangePartition(v) => print_exchange_partition(r, id, v),
        }
    }
}

fn print_partition_spec(r: &mut Renderer<'_>, partitions: &[NodeId]) -> RenderResult {
    if partitions.is_empty() {
        return Ok(());
    }
    r.keyword(" PARTITION ");
    r.parenthesized_list(partitions)
}

fn print_insert_target(
    r: &mut Renderer<'_>,
    overwrite: bool,
    table: NodeId,
    partitions: &[NodeId],
) -> RenderResult {
    r.keyword(if overwrite { "INSERT OVERWRITE TABLE " } else { "INSERT INTO TABLE " });
    r.accept(table)?;
    print_partition_spec(r, partitions)
}

fn print_hive_insert(r: &mut Renderer<'_>, id: NodeId, x: &HiveInsert) -> RenderResult {
    let table = r.required(id, "table", x.table)?;
    print_insert_target(r, x.overwrite, table, &x.partitions)?;
    if x.if_not_exists {
        r.keyword(" IF NOT EXISTS");
    }
    if !x.values.is_empty() {
        r.newline();
        r.keyword("VALUES ");
        return r.join_lines(&x.values);
    }
    let query = r.required(id, "query", x.query)?;
    r.newline();
    r.accept(query)
}

/// `FROM src` followed by one insert branch per line.
fn print_multi_insert(r: &mut Renderer<'_>, id: NodeId, x: &MultiInsert) -> RenderResult {
    let from = r.required(id, "from", x.from)?;
    r.required(id, "items", x.items.first().copied())?;
    if let Some(with) = x.with {
        r.accept(with)?;
        r.newline();
    }
    r.keyword("FROM ");
    r.accept(from)?;
    for item in &x.items {
        r.newline();
        r.accept(*item)?;
    }
    Ok(())
}

fn print_load_data(r: &mut Renderer<'_>, id: NodeId, x: &LoadData) -> RenderResult {
    let inpath = r.required(id, "inpath", x.inpath)?;
    let into = r.required(id, "into", x.into)?;
    r.keyword(if x.local { "LOAD DATA LOCAL INPATH " } else { "LOAD DATA INPATH " });
    r.accept(inpath)?;
    if x.overwrite {
        r.keyword(" OVERWRITE");
    }
    r.keyword(" INTO TABLE ");
    r.accept(into)?;
    print_partition_spec(r, &x.partitions)
}

fn print_msck_repair(r: &mut Renderer<'_>, id: NodeId, x: &MsckRepair) -> RenderResult {
    match x.table {
        Some(table) => {
            r.keyword("MSCK REPAIR TABLE ");
            if let Some(database) = x.database {
                r.accept(database)?;
                r.print(".");
            }
            r.accept(table)?;
        }
        None => {
            let database = r.required(id, "table", x.database)?;
            r.keyword("MSCK REPAIR DATABASE ");
            r.accept(database)?;
        }
    }
    if x.add_partitions {
        r.keyword(" ADD PARTITIONS");
    }
    Ok(())
}

fn print_create_function(r: &mut Renderer<'_>, id: NodeId, x: &CreateFunction) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    let class_name = r.required(id, "class_name", x.class_name)?;
    r.keyword(if x.temporary { "CREATE TEMPORARY FUNCTION " } else { "CREATE FUNCTION " });
    r.accept(name)?;
    r.keyword(" AS ");
    r.accept(class_name)?;
    if let Some(location) = x.location {
        r.keyword(" USING ");
        if let Some(resource_type) = x.resource_type {
            r.keyword(resource_type.keyword());
            r.print(" ");
        }
        r.accept(location)?;
    }
    if let Some(symbol) = x.symbol {
        r.keyword(" SYMBOL = ");
        r.accept(symbol)?;
    }
    Ok(())
}

fn print_add_jar(r: &mut Renderer<'_>, x: &AddJar) -> RenderResult {
    r.keyword("ADD JAR ");
    r.print(&x.path);
    Ok(())
}

fn print_exchange_partition(r: &mut Renderer<'_>, id: NodeId, x: &ExchangePartition) -> RenderResult {
    let table = r.required(id, "table", x.table)?;
    r.keyword("EXCHANGE PARTITION ");
    r.parenthesized_list(&x.partitions)?;
    r.keyword(" WITH TABLE ");
    r.accept(table)?;
    match x.validation {
        Some(true) => r.keyword(" WITH VALIDATION"),
        Some(false) => r.keyword(" WITHOUT VALIDATION"),
        None => {}
    }
    Ok(())
}

/// Hive's `CREATE INDEX .. ON TABLE t (cols) AS handler ..`, one clause per
/// line after the column list.
fn print_create_index(r: &mut Renderer<'_>, id: NodeId, x: &CreateIndex) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    let table = r.required(id, "table", x.table)?;

    for (clause, present) in [
        ("unique", x.unique),
        ("concurrently", x.concurrently),
        ("using", x.using.is_some()),
        ("tablespace", x.tablespace.is_some()),
        ("where_clause", x.where_clause.is_some()),
    ] {
        if present {
            r.drop_clause(id, clause, DropReason::NoEquivalent)?;
        }
    }

    r.keyword("CREATE INDEX ");
    if x.if_not_exists {
        r.keyword("IF NOT EXISTS ");
    }
    r.accept(name)?;
    r.keyword(" ON TABLE ");
    r.accept(table)?;
    r.print(" ");
    r.parenthesized_list(&x.items)?;

    create_table::single_clause(r, "AS ", x.handler)?;
    if x.deferred_rebuild {
        r.newline();
        r.keyword("WITH DEFERRED REBUILD");
    }
    if !x.properties.is_empty() {
        create_table::options_block(r, "IDXPROPERTIES (", &x.properties)?;
    }
    create_table::single_clause(r, "IN TABLE ", x.in_table)?;
    create_table::single_clause(r, "", x.row_format)?;
    create_table::single_clause(r, "STORED AS ", x.stored_as)?;
    create_table::single_clause(r, "LOCATION ", x.location)?;
    if !x.table_properties.is_empty() {
        create_table::options_block(r, "TBLPROPERTIES (", &x.table_properties)?;
    }
    create_table::single_clause(r, "COMMENT ", x.comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::RenderConfig, renderer::Rendered};
    use sql_ast::{
        Ast, Value,
        kinds::{
            AllColumn, AssignItem, CharLiteral, ColumnDef, DataType, Identifier, IntegerLiteral,
            QueryBlock, ResourceType, RowFormat as RowFormatNode, SelectItem, TableRef,
        },
    };

    fn render_with(ast: &Ast, root: NodeId, config: &RenderConfig) -> Rendered {
        let mut r = Renderer::new(ast, &Hive, config);
        r.render(root).unwrap();
        assert_eq!(r.indent_level(), 0);
        r.finish()
    }

    fn render(ast: &Ast, root: NodeId) -> Rendered {
        render_with(ast, root, &RenderConfig::default())
    }

    fn ident(ast: &mut Ast, name: &str) -> NodeId {
        ast.push(Identifier::new(name)).unwrap()
    }

    fn select_all_from(ast: &mut Ast, table: &str) -> NodeId {
        let star = ast.push(AllColumn).unwrap();
        let item = ast.push(SelectItem { expr: Some(star), alias: None }).unwrap();
        let name = ident(ast, table);
        let from = ast.push(TableRef { name: Some(name), alias: None }).unwrap();
        ast.push(QueryBlock {
            items: vec![item],
            from: Some(from),
            ..Default::default()
        })
        .unwrap()
    }

    fn partition(ast: &mut Ast, key: &str, value: &str) -> NodeId {
        let target = ident(ast, key);
        let value = ast.push(CharLiteral::new(value)).unwrap();
        ast.push(AssignItem {
            target: Some(target),
            value: Some(value),
        })
        .unwrap()
    }

    #[test]
    fn test_insert_overwrite_partition() {
        let mut ast = Ast::new();
        let table = ident(&mut ast, "t");
        let spec = partition(&mut ast, "ds", "2020-01-01");
        let query = select_all_from(&mut ast, "src");
        let id = ast
            .push(Insert {
                table: Some(table),
                partitions: vec![spec],
                query: Some(query),
                overwrite: true,
                ..Default::default()
            })
            .unwrap();

        let rendered = render(&ast, id);
        assert_eq!(
            rendered.sql,
            "INSERT OVERWRITE TABLE t PARTITION (ds = '2020-01-01')\nSELECT *\nFROM src"
        );
        assert!(rendered.diagnostics.is_empty());

        let parameterized = render_with(&ast, id, &RenderConfig::default().with_parameterized(true));
        assert_eq!(
            parameterized.sql,
            "INSERT OVERWRITE TABLE t PARTITION (ds = ?)\nSELECT *\nFROM src"
        );
        assert_eq!(parameterized.params, vec![Value::String("2020-01-01".into())]);
    }

    #[test]
    fn test_returning_is_dropped() {
        let mut ast = Ast::new();
        let table = ident(&mut ast, "t");
        let value = ast.push(IntegerLiteral { value: 1 }).unwrap();
        let row = ast.push(sql_ast::kinds::ValuesRow { values: vec![value] }).unwrap();
        let returned = ident(&mut ast, "id");
        let id = ast
            .push(Insert {
                table: Some(table),
                values: vec![row],
                returning: vec![returned],
                ..Default::default()
            })
            .unwrap();

        let rendered = render_with(&ast, id, &RenderConfig::default().with_pretty(false));
        assert_eq!(rendered.sql, "INSERT INTO TABLE t VALUES (1)");
        assert_eq!(rendered.diagnostics.len(), 1);
        assert_eq!(rendered.diagnostics[0].clause, Some("returning"));
        assert_eq!(rendered.diagnostics[0].reason, DropReason::NoEquivalent);
    }

    #[test]
    fn test_multi_insert() {
        let mut ast = Ast::new();
        let source = ident(&mut ast, "src");
        let from = ast.push(TableRef { name: Some(source), alias: None }).unwrap();

        let mut branches = Vec::new();
        for table in ["a", "b"] {
            let star = ast.push(AllColumn).unwrap();
            let item = ast.push(SelectItem { expr: Some(star), alias: None }).unwrap();
            let query = ast
                .push(QueryBlock {
                    items: vec![item],
                    ..Default::default()
                })
                .unwrap();
            let name = ident(&mut ast, table);
            branches.push(
                ast.push(HiveInsert {
                    overwrite: table == "a",
                    table: Some(name),
                    query: Some(query),
                    ..Default::default()
                })
                .unwrap(),
            );
        }
        let id = ast
            .push(MultiInsert {
                with: None,
                from: Some(from),
                items: branches,
            })
            .unwrap();

        assert_eq!(
            render(&ast, id).sql,
            "FROM src\nINSERT OVERWRITE TABLE a\nSELECT *\nINSERT INTO TABLE b\nSELECT *"
        );
    }

    #[test]
    fn test_load_data_and_msck() {
        let mut ast = Ast::new();
        let path = ast.push(CharLiteral::new("/tmp/events")).unwrap();
        let table = ident(&mut ast, "events");
        let spec = partition(&mut ast, "dt", "2024-05-01");
        let load = ast
            .push(LoadData {
                local: true,
                inpath: Some(path),
                overwrite: true,
                into: Some(table),
                partitions: vec![spec],
            })
            .unwrap();
        assert_eq!(
            render(&ast, load).sql,
            "LOAD DATA LOCAL INPATH '/tmp/events' OVERWRITE INTO TABLE events PARTITION (dt = '2024-05-01')"
        );

        let database = ident(&mut ast, "sales");
        let table = ident(&mut ast, "orders");
        let msck = ast
            .push(MsckRepair {
                database: Some(database),
                table: Some(table),
                add_partitions: true,
            })
            .unwrap();
        assert_eq!(render(&ast, msck).sql, "MSCK REPAIR TABLE sales.orders ADD PARTITIONS");
    }

    #[test]
    fn test_create_function_and_add_jar() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "to_upper");
        let class_name = ast.push(CharLiteral::new("com.example.Upper")).unwrap();
        let location = ast.push(CharLiteral::new("hdfs:///udf.jar")).unwrap();
        let id = ast
            .push(CreateFunction {
                temporary: true,
                name: Some(name),
                class_name: Some(class_name),
                resource_type: Some(ResourceType::Jar),
                location: Some(location),
                symbol: None,
            })
            .unwrap();
        assert_eq!(
            render(&ast, id).sql,
            "CREATE TEMPORARY FUNCTION to_upper AS 'com.example.Upper' USING JAR 'hdfs:///udf.jar'"
        );

        let jar = ast.push(AddJar { path: "/opt/udf.jar".into() }).unwrap();
        let config = RenderConfig::default().with_uppercase(false);
        assert_eq!(render_with(&ast, jar, &config).sql, "add jar /opt/udf.jar");
    }

    #[test]
    fn test_create_index() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "idx_user");
        let table = ident(&mut ast, "events");
        let column = ident(&mut ast, "user_id");
        let handler = ast.push(CharLiteral::new("COMPACT")).unwrap();
        let id = ast
            .push(CreateIndex {
                unique: true,
                name: Some(name),
                table: Some(table),
                items: vec![column],
                handler: Some(handler),
                deferred_rebuild: true,
                ..Default::default()
            })
            .unwrap();

        let rendered = render(&ast, id);
        assert_eq!(
            rendered.sql,
            "CREATE INDEX idx_user ON TABLE events (user_id)\nAS 'COMPACT'\nWITH DEFERRED REBUILD"
        );
        assert_eq!(rendered.diagnostics[0].clause, Some("unique"));
    }

    #[test]
    fn test_create_table_pipeline() {
        let mut ast = Ast::new();
        let name = ast.push(Identifier::quoted("page views")).unwrap();
        let column_name = ident(&mut ast, "url");
        let data_type = ast.push(DataType::new("STRING")).unwrap();
        let column = ast
            .push(ColumnDef {
                name: Some(column_name),
                data_type: Some(data_type),
                ..Default::default()
            })
            .unwrap();
        let separator = ast.push(CharLiteral::new("\t")).unwrap();
        let row_format = ast
            .push(RowFormatNode {
                fields_terminated_by: Some(separator),
                ..Default::default()
            })
            .unwrap();
        let handler = ident(&mut ast, "org.apache.hadoop.hive.hbase.HBaseStorageHandler");
        let key = ast.push(CharLiteral::new("owner")).unwrap();
        let value = ast.push(CharLiteral::new("etl")).unwrap();
        let property = ast
            .push(AssignItem {
                target: Some(key),
                value: Some(value),
            })
            .unwrap();
        let id = ast
            .push(CreateTable {
                external: true,
                name: Some(name),
                elements: vec![column],
                buckets: Some(4),
                row_format: Some(row_format),
                stored_by: Some(handler),
                options: vec![property],
                ..Default::default()
            })
            .unwrap();

        let expected = "CREATE EXTERNAL TABLE `page views` (\n\
                        \turl STRING\n\
                        )\n\
                        INTO 4 BUCKETS\n\
                        ROW FORMAT DELIMITED\n\
                        \tFIELDS TERMINATED BY '\\t'\n\
                        STORED BY 'org.apache.hadoop.hive.hbase.HBaseStorageHandler'\n\
                        TBLPROPERTIES (\n\
                        \t'owner' = 'etl'\n\
                        )";
        let rendered = render(&ast, id);
        assert_eq!(rendered.sql, expected);
        assert!(rendered.diagnostics.is_empty());
    }

    #[test]
    fn test_stored_by_is_never_a_placeholder() {
        let mut ast = Ast::new();
        let name = ident(&mut ast, "t");
        let column_name = ident(&mut ast, "a");
        let data_type = ast.push(DataType::new("INT")).unwrap();
        let column = ast
            .push(ColumnDef {
                name: Some(column_name),
                data_type: Some(data_type),
                ..Default::default()
            })
            .unwrap();
        let handler = ident(&mut ast, "org.apache.hadoop.hive.hbase.HBaseStorageHandler");
        let id = ast
            .push(CreateTable {
                name: Some(name),
                elements: vec![column],
                stored_by: Some(handler),
                ..Default::default()
            })
            .unwrap();

        let config = RenderConfig::default().with_pretty(false).with_parameterized(true);
        let rendered = render_with(&ast, id, &config);
        assert_eq!(
            rendered.sql,
            "CREATE TABLE t (a INT) STORED BY 'org.apache.hadoop.hive.hbase.HBaseStorageHandler'"
        );
        assert!(rendered.params.is_empty());
        assert_eq!(rendered.replaced, sql_ast::count_literals(&ast, id).unwrap());
    }

    #[test]
    fn test_if_not_exists_follows_columns() {
        let mut ast = Ast::new();
        let table = ident(&mut ast, "t");
        let spec = partition(&mut ast, "ds", "2020-01-01");
        let column = ident(&mut ast, "a");
        let query = select_all_from(&mut ast, "src");
        let id = ast
            .push(Insert {
                table: Some(table),
                partitions: vec![spec],
                columns: vec![column],
                query: Some(query),
                overwrite: true,
                if_not_exists: true,
                ..Default::default()
            })
            .unwrap();

        let rendered = render_with(&ast, id, &RenderConfig::default().with_pretty(false));
        assert_eq!(
            rendered.sql,
            "INSERT OVERWRITE TABLE t PARTITION (ds = '2020-01-01') (a) IF NOT EXISTS SELECT * FROM src"
        );
    }

    #[test]
    fn test_add_columns() {
        let mut ast = Ast::new();
        let column_name = ident(&mut ast, "country");
        let data_type = ast.push(DataType::new("STRING")).unwrap();
        let column = ast
            .push(ColumnDef {
                name: Some(column_name),
                data_type: Some(data_type),
                ..Default::default()
            })
            .unwrap();
        let id = ast.push(AlterTableAddColumn { columns: vec![column] }).unwrap();
        assert_eq!(render(&ast, id).sql, "ADD COLUMNS (country STRING)");
    }
}
