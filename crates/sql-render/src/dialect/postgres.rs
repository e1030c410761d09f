use crate::{
    dialect::{Dialect, oracle},
    error::{DropReason, RenderResult},
    renderer::{
        Render, Renderer,
        alter_table,
        create_table::CreateTableClause::{self, *},
        dml,
        escape::escape,
        expr, select,
    },
};
use sql_ast::{
    NodeId, NodeKind,
    kinds::{
        AlterTableAddColumn, AlterTableAlterColumn, AlterDatabase, AlterSchema, Analyze,
        ArrayDataType, AssignItem, AttrExpr, CharLiteral, ConnectTo, CreateDatabase, CreateSchema,
        DropDatabase, DropSchema, Extract, Geometric, Grant, IntervalExpr, OnConflict, OracleNode,
        PgNode, QueryBlock, Show, StartTransaction, TypeCast, Vacuum,
    },
};

pub const POSTGRES_CLAUSES: &[CreateTableClause] = &[Name, Elements, Inherits, Using, Options, Select];

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    /// `E'..'` for C-style strings, `COLLATE "x"` quoted.
    fn char_literal(&self, r: &mut Renderer<'_>, id: NodeId, x: &CharLiteral) -> RenderResult {
        let prefix = if x.c_style { "E" } else { "" };
        expr::char_literal(r, id, x, prefix, escape)
    }

    /// A non-string interval value is folded into the quoted literal:
    /// `INTERVAL '1 DAY'`.
    fn interval(&self, r: &mut Renderer<'_>, id: NodeId, x: &IntervalExpr) -> RenderResult {
        let value = r.required(id, "value", x.value)?;
        let is_string = matches!(r.kind_of(value), Some(NodeKind::CharLiteral(_)));
        if is_string || r.is_parameterized() {
            return x.render(r, id);
        }
        r.keyword("INTERVAL ");
        r.print("'");
        r.accept(value)?;
        if let Some(unit) = x.unit {
            r.print(" ");
            r.keyword(unit.keyword());
        }
        r.print("'");
        Ok(())
    }

    fn array_data_type(&self, r: &mut Renderer<'_>, id: NodeId, x: &ArrayDataType) -> RenderResult {
        let component = r.required(id, "component", x.component)?;
        r.accept(component)?;
        r.print("[]");
        Ok(())
    }

    fn query_block(&self, r: &mut Renderer<'_>, id: NodeId, x: &QueryBlock) -> RenderResult {
        select::query_block(r, id, x, true)
    }

    /// `SET name TO value` inside a `SET` statement.
    fn assign_item(&self, r: &mut Renderer<'_>, id: NodeId, x: &AssignItem) -> RenderResult {
        let in_set = matches!(r.ancestor_kind(id, 1), Some(NodeKind::SetStatement(_)));
        dml::assign_item(r, id, x, if in_set { " TO " } else { " = " })
    }

    fn create_table_clauses(&self) -> &'static [CreateTableClause] {
        POSTGRES_CLAUSES
    }

    fn auto_increment(&self, r: &mut Renderer<'_>) {
        r.keyword(" GENERATED ALWAYS AS IDENTITY");
    }

    /// One `ADD COLUMN` per column.
    fn add_column(&self, r: &mut Renderer<'_>, id: NodeId, x: &AlterTableAddColumn) -> RenderResult {
        r.required(id, "columns", x.columns.first().copied())?;
        for (i, column) in x.columns.iter().enumerate() {
            if i > 0 {
                r.print(", ");
            }
            r.keyword("ADD COLUMN ");
            r.accept(*column)?;
        }
        Ok(())
    }

    fn alter_column(&self, r: &mut Renderer<'_>, id: NodeId, x: &AlterTableAlterColumn) -> RenderResult {
        alter_table::alter_column(r, id, x, true)
    }

    /// A grant without a resource is a role attribute change.
    fn grant(&self, r: &mut Renderer<'_>, id: NodeId, x: &Grant) -> RenderResult {
        if x.resource.is_some() {
            return x.render(r, id);
        }
        r.required(id, "users", x.users.first().copied())?;
        let mut attributes = Vec::new();
        let mut unknown = false;
        for privilege in &x.privileges {
            match role_attribute(privilege) {
                Some(attribute) if !attributes.contains(&attribute) => attributes.push(attribute),
                Some(_) => {}
                None => unknown = true,
            }
        }
        if unknown {
            r.drop_clause(id, "privileges", DropReason::NoEquivalent)?;
        }

        r.keyword("ALTER ROLE ");
        r.join(&x.users, ", ")?;
        for attribute in attributes {
            r.print(" ");
            r.keyword(attribute);
        }
        Ok(())
    }

    fn postgres(&self, r: &mut Renderer<'_>, id: NodeId, x: &PgNode) -> RenderResult {
        render_native(r, id, x)
    }

    /// Oracle compatibility: a few kinds have a PostgreSQL spelling, the
    /// rest are dropped.
    fn oracle(&self, r: &mut Renderer<'_>, id: NodeId, x: &OracleNode) -> RenderResult {
        match x {
            OracleNode::Sysdate(_) => {
                r.keyword("CURRENT_TIMESTAMP");
                Ok(())
            }
            OracleNode::BinaryFloat(v) => {
                r.print(&v.value.to_string());
                Ok(())
            }
            OracleNode::BinaryDouble(v) => {
                r.print(&v.value.to_string());
                Ok(())
            }
            OracleNode::OuterJoin(_) | OracleNode::IsSet(_) => oracle::render_native(r, id, x),
            OracleNode::SetTransaction(_)
            | OracleNode::Explain(_)
            | OracleNode::AlterTableDropPartition(_)
            | OracleNode::AlterTableTruncatePartition(_)
            | OracleNode::Exit(_)
            | OracleNode::Continue(_)
            | OracleNode::Raise(_)
            | OracleNode::CreateDbLink(_)
            | OracleNode::DropDbLink(_)
            | OracleNode::StorageClause(_)
            | OracleNode::LobStorageClause(_)
            | OracleNode::UsingIndexClause(_) => r.drop_node(id, DropReason::NoEquivalent),
        }
    }
}

/// `connect` grants `LOGIN`, any `create ..` grants `CREATEDB`. Other
/// privileges have no role attribute.
fn role_attribute(privilege: &str) -> Option<&'static str> {
    let privilege = privilege.trim().to_lowercase();
    if privilege == "connect" {
        Some("LOGIN")
    } else if privilege.starts_with("create ") {
        Some("CREATEDB")
    } else {
        None
    }
}

/// How dialects without the PostgreSQL family print its kinds: the two
/// casts have an ANSI spelling, attribute pairs print as-is, everything
/// else is dropped.
pub(crate) fn translate_foreign(r: &mut Renderer<'_>, id: NodeId, x: &PgNode) -> RenderResult {
    match x {
        PgNode::TypeCast(cast) => {
            let expr = r.required(id, "expr", cast.expr)?;
            let data_type = r.required(id, "data_type", cast.data_type)?;
            r.keyword("CAST(");
            r.accept(expr)?;
            r.keyword(" AS ");
            r.accept(data_type)?;
            r.print(")");
            Ok(())
        }
        PgNode::Extract(extract) => print_extract(r, id, extract),
        PgNode::AttrExpr(attr) => print_attr(r, id, attr),
        _ => r.drop_node(id, DropReason::Unsupported),
    }
}

fn print_extract(r: &mut Renderer<'_>, id: NodeId, x: &Extract) -> RenderResult {
    let source = r.required(id, "source", x.source)?;
    r.keyword("EXTRACT(");
    r.keyword(&x.field.to_ascii_uppercase());
    r.keyword(" FROM ");
    r.accept(source)?;
    r.print(")");
    Ok(())
}

fn print_attr(r: &mut Renderer<'_>, id: NodeId, x: &AttrExpr) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    r.accept(name)?;
    if let Some(value) = x.value {
        r.print(if x.equals { " = " } else { " " });
        r.accept(value)?;
    }
    Ok(())
}

/// `ON CONFLICT [(target) | ON CONSTRAINT c] [WHERE ..] DO NOTHING | DO UPDATE SET ..`
fn on_conflict_target(r: &mut Renderer<'_>, x: &OnConflict) -> RenderResult {
    if !x.target.is_empty() {
        r.print(" ");
        r.parenthesized_list(&x.target)?;
    }
    if let Some(constraint) = x.constraint {
        r.keyword(" ON CONSTRAINT ");
        r.accept(constraint)?;
    }
    if let Some(where_clause) = x.where_clause {
        r.keyword(" WHERE ");
        r.accept(where_clause)?;
    }
    Ok(())
}

fn print_on_conflict(r: &mut Renderer<'_>, id: NodeId, x: &OnConflict) -> RenderResult {
    r.keyword("ON CONFLICT");
    on_conflict_target(r, x)?;
    if x.do_nothing {
        r.keyword(" DO NOTHING");
        return Ok(());
    }
    r.required(id, "update_items", x.update_items.first().copied())?;
    r.keyword(" DO UPDATE SET ");
    r.join(&x.update_items, ", ")?;
    if let Some(update_where) = x.update_where {
        r.keyword(" WHERE ");
        r.accept(update_where)?;
    }
    Ok(())
}

fn print_type_cast(r: &mut Renderer<'_>, id: NodeId, x: &TypeCast) -> RenderResult {
    let expr = r.required(id, "expr", x.expr)?;
    let data_type = r.required(id, "data_type", x.data_type)?;
    let wrap = !r.is_parenthesized(expr) && matches!(r.kind_of(expr), Some(NodeKind::BinaryOp(_)));
    if wrap {
        r.print("(");
    }
    r.accept(expr)?;
    if wrap {
        r.print(")");
    }
    r.print("::");
    r.accept(data_type)
}

fn print_geometric(r: &mut Renderer<'_>, id: NodeId, x: &Geometric) -> RenderResult {
    let value = r.required(id, "value", x.value)?;
    r.keyword(&x.shape.keyword().to_ascii_uppercase());
    r.print(" ");
    r.accept(value)
}

fn print_show(r: &mut Renderer<'_>, id: NodeId, x: &Show) -> RenderResult {
    let expr = r.required(id, "expr", x.expr)?;
    r.keyword("SHOW ");
    r.accept(expr)
}

fn print_start_transaction(r: &mut Renderer<'_>, x: &StartTransaction) -> RenderResult {
    r.keyword(if x.use_begin { "BEGIN" } else { "START TRANSACTION" });
    Ok(())
}

fn print_connect_to(r: &mut Renderer<'_>, id: NodeId, x: &ConnectTo) -> RenderResult {
    let target = r.required(id, "target", x.target)?;
    r.keyword("CONNECT TO ");
    r.accept(target)
}

fn print_create_database(r: &mut Renderer<'_>, id: NodeId, x: &CreateDatabase) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    r.keyword("CREATE DATABASE ");
    r.accept(name)?;
    if x.with {
        r.keyword(" WITH");
    }
    for option in &x.options {
        r.print(" ");
        r.accept(*option)?;
    }
    Ok(())
}

fn print_drop_database(r: &mut Renderer<'_>, id: NodeId, x: &DropDatabase) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    r.keyword(if x.if_exists { "DROP DATABASE IF EXISTS " } else { "DROP DATABASE " });
    r.accept(name)?;
    if x.force {
        r.keyword(" WITH (FORCE)");
    }
    Ok(())
}

fn print_alter_database(r: &mut Renderer<'_>, id: NodeId, x: &AlterDatabase) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    r.keyword("ALTER DATABASE ");
    r.accept(name)?;

    if let Some(to) = x.rename_to {
        r.keyword(" RENAME TO ");
        r.accept(to)?;
    } else if let Some(owner) = x.owner_to {
        r.keyword(" OWNER TO ");
        r.accept(owner)?;
    } else if let Some(tablespace) = x.set_tablespace {
        r.keyword(" SET TABLESPACE ");
        r.accept(tablespace)?;
    } else if x.refresh_collation_version {
        r.keyword(" REFRESH COLLATION VERSION");
    } else if let Some(parameter) = x.set_parameter {
        r.keyword(" SET ");
        r.accept(parameter)?;
        r.keyword(" TO ");
        match x.set_value {
            Some(value) => r.accept(value)?,
            None => r.keyword("DEFAULT"),
        }
    } else if let Some(parameter) = x.reset_parameter {
        r.keyword(" RESET ");
        r.accept(parameter)?;
    } else if !x.options.is_empty() {
        r.keyword(" WITH");
        for option in &x.options {
            r.print(" ");
            r.accept(*option)?;
        }
    }
    Ok(())
}

fn print_create_schema(r: &mut Renderer<'_>, id: NodeId, x: &CreateSchema) -> RenderResult {
    if x.name.is_none() && x.authorization.is_none() {
        r.required(id, "name", None)?;
    }
    r.keyword(if x.if_not_exists { "CREATE SCHEMA IF NOT EXISTS" } else { "CREATE SCHEMA" });
    if let Some(name) = x.name {
        r.print(" ");
        r.accept(name)?;
    }
    if let Some(role) = x.authorization {
        r.keyword(" AUTHORIZATION ");
        r.accept(role)?;
    }
    Ok(())
}

fn print_drop_schema(r: &mut Renderer<'_>, id: NodeId, x: &DropSchema) -> RenderResult {
    r.required(id, "names", x.names.first().copied())?;
    r.keyword(if x.if_exists { "DROP SCHEMA IF EXISTS " } else { "DROP SCHEMA " });
    r.join(&x.names, ", ")?;
    match x.cascade {
        Some(true) => r.keyword(" CASCADE"),
        Some(false) => r.keyword(" RESTRICT"),
        None => {}
    }
    Ok(())
}

fn print_alter_schema(r: &mut Renderer<'_>, id: NodeId, x: &AlterSchema) -> RenderResult {
    let name = r.required(id, "name", x.name)?;
    r.keyword("ALTER SCHEMA ");
    r.accept(name)?;
    if let Some(to) = x.rename_to {
        r.keyword(" RENAME TO ");
        r.accept(to)?;
    }
    if let Some(owner) = x.owner_to {
        r.keyword(" OWNER TO ");
        r.accept(owner)?;
    }
    Ok(())
}

fn print_vacuum(r: &mut Renderer<'_>, x: &Vacuum) -> RenderResult {
    r.keyword("VACUUM");
    if !x.options.is_empty() {
        r.keyword(&format!(" ({})", x.options.keywords().join(", ")));
    }
    if !x.tables.is_empty() {
        r.print(" ");
        r.join(&x.tables, ", ")?;
    }
    Ok(())
}

fn print_analyze(r: &mut Renderer<'_>, x: &Analyze) -> RenderResult {
    r.keyword("ANALYZE");
    let options: Vec<&str> = [("VERBOSE", x.verbose), ("SKIP_LOCKED", x.skip_locked)]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();
    if !options.is_empty() {
        r.keyword(&format!(" ({})", options.join(", ")));
    }
    if !x.tables.is_empty() {
        r.print(" ");
        r.join(&x.tables, ", ")?;
    }
    Ok(())
}

fn render_native(r: &mut Renderer<'_>, id: NodeId, x: &PgNode) -> RenderResult {
    match x {
        PgNode::TypeCast(v) => print_type_cast(r, id, v),
        PgNode::Extract(v) => print_extract(r, id, v),
        PgNode::Geometric(v) => print_geometric(r, id, v),
        PgNode::OnConflict(v) => print_on_conflict(r, id, v),
        PgNode::Show(v) => print_show(r, id, v),
        PgNode::StartTransaction(v) => print_start_transaction(r, v),
        PgNode::EndTransaction(_) => {
            r.keyword("END");
            Ok(())
        }
        PgNode::ConnectTo(v) => print_connect_to(r, id, v),
        PgNode::CreateDatabase(v) => print_create_database(r, id, v),
        PgNode::AttrExpr(v) => print_attr(r, id, v),
        PgNode::DropDatabase(v) => print_drop_database(r, id, v),
        PgNode::AlterDatabase(v) => print_alter_database(r, id, v),
        PgNode::CreateSchema(v) => print_create_schema(r, id, v),
        PgNode::DropSchema(v) => print_drop_schema(r, id, v),
        PgNode::AlterSchema(v) => print_alter_schema(r, id, v),
        PgNode::Vacuum(v) => print_vacuum(r, v),
        PgNode::Analyze(v) => print_analyze(r, v),
    }
}
