//! Defines the `Dialect` trait for database-specific SQL syntax.
//!
//! Every hook defaults to the base rendering rule, so a dialect overrides
//! only what it spells differently. Dialect-only node families go through
//! [`Dialect::hive`], [`Dialect::postgres`] and [`Dialect::oracle`].

use crate::{
    error::{DropReason, RenderResult},
    renderer::{
        Render, Renderer,
        create_table::{self, CreateTableClause},
        dml, select,
    },
};
use sql_ast::{
    NodeId,
    kinds::{
        AlterTableAddColumn, AlterTableAlterColumn, ArrayDataType, AssignItem, CharLiteral,
        CreateIndex, CreateTable, Delete, Grant, HiveNode, Insert, IntervalExpr, Limit,
        OracleNode, PgNode, QueryBlock, Truncate, Update,
    },
};

mod hive;
mod mysql;
mod oracle;
mod postgres;
mod standard;

pub use hive::Hive;
pub use mysql::MySql;
pub use oracle::Oracle;
pub use postgres::Postgres;
pub use standard::Standard;

pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "PostgreSQL", "Hive").
    fn name(&self) -> &'static str;

    /// Wraps an identifier in the dialect's quotation marks.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - Hive and MySQL use backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', "\"\""))
    }

    /// Placeholder printed for the `index`-th captured literal.
    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn char_literal(&self, r: &mut Renderer<'_>, id: NodeId, x: &CharLiteral) -> RenderResult {
        x.render(r, id)
    }

    fn interval(&self, r: &mut Renderer<'_>, id: NodeId, x: &IntervalExpr) -> RenderResult {
        x.render(r, id)
    }

    fn array_data_type(&self, r: &mut Renderer<'_>, id: NodeId, x: &ArrayDataType) -> RenderResult {
        x.render(r, id)
    }

    fn query_block(&self, r: &mut Renderer<'_>, id: NodeId, x: &QueryBlock) -> RenderResult {
        select::query_block(r, id, x, false)
    }

    fn limit(&self, r: &mut Renderer<'_>, id: NodeId, x: &Limit) -> RenderResult {
        x.render(r, id)
    }

    fn insert(&self, r: &mut Renderer<'_>, id: NodeId, x: &Insert) -> RenderResult {
        x.render(r, id)
    }

    fn update(&self, r: &mut Renderer<'_>, id: NodeId, x: &Update) -> RenderResult {
        x.render(r, id)
    }

    fn delete(&self, r: &mut Renderer<'_>, id: NodeId, x: &Delete) -> RenderResult {
        x.render(r, id)
    }

    fn truncate(&self, r: &mut Renderer<'_>, id: NodeId, x: &Truncate) -> RenderResult {
        x.render(r, id)
    }

    /// Trailing `RETURNING` list of a DML statement owned by `id`.
    fn returning(&self, r: &mut Renderer<'_>, id: NodeId, items: &[NodeId]) -> RenderResult {
        dml::returning(r, id, items)
    }

    fn assign_item(&self, r: &mut Renderer<'_>, id: NodeId, x: &AssignItem) -> RenderResult {
        x.render(r, id)
    }

    fn create_table(&self, r: &mut Renderer<'_>, id: NodeId, x: &CreateTable) -> RenderResult {
        x.render(r, id)
    }

    /// Clauses of `CREATE TABLE` in the order this dialect prints them.
    /// Clauses left out are dropped.
    fn create_table_clauses(&self) -> &'static [CreateTableClause] {
        create_table::STANDARD_CLAUSES
    }

    /// Prints one clause of the create-table pipeline if it is present.
    fn create_table_clause(
        &self,
        r: &mut Renderer<'_>,
        id: NodeId,
        x: &CreateTable,
        clause: CreateTableClause,
    ) -> RenderResult {
        create_table::print_clause(r, id, x, clause)
    }

    /// Opening of the table options list.
    fn table_options_prefix(&self) -> &'static str {
        "WITH ("
    }

    fn auto_increment(&self, r: &mut Renderer<'_>) {
        r.keyword(" AUTO_INCREMENT");
    }

    fn create_index(&self, r: &mut Renderer<'_>, id: NodeId, x: &CreateIndex) -> RenderResult {
        x.render(r, id)
    }

    fn add_column(&self, r: &mut Renderer<'_>, id: NodeId, x: &AlterTableAddColumn) -> RenderResult {
        x.render(r, id)
    }

    fn alter_column(&self, r: &mut Renderer<'_>, id: NodeId, x: &AlterTableAlterColumn) -> RenderResult {
        x.render(r, id)
    }

    fn grant(&self, r: &mut Renderer<'_>, id: NodeId, x: &Grant) -> RenderResult {
        x.render(r, id)
    }

    fn hive(&self, r: &mut Renderer<'_>, id: NodeId, _x: &HiveNode) -> RenderResult {
        r.drop_node(id, DropReason::Unsupported)
    }

    fn postgres(&self, r: &mut Renderer<'_>, id: NodeId, x: &PgNode) -> RenderResult {
        postgres::translate_foreign(r, id, x)
    }

    fn oracle(&self, r: &mut Renderer<'_>, id: NodeId, _x: &OracleNode) -> RenderResult {
        r.drop_node(id, DropReason::Unsupported)
    }
}
