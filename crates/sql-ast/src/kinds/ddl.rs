//! Definition and control statements.

use crate::arena::NodeId;
use serde::{Deserialize, Serialize};

/// `CREATE TABLE`. Every clause slot is optional; which ones a dialect
/// prints, and in what order, is decided by its create-table pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTable {
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub external: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    pub name: Option<NodeId>,
    /// Columns and table constraints.
    #[serde(default)]
    pub elements: Vec<NodeId>,
    #[serde(default)]
    pub inherits: Vec<NodeId>,
    /// Storage provider (`USING parquet`) or access method.
    pub using: Option<NodeId>,
    pub comment: Option<NodeId>,
    #[serde(default)]
    pub partitioned_by: Vec<NodeId>,
    #[serde(default)]
    pub clustered_by: Vec<NodeId>,
    #[serde(default)]
    pub sorted_by: Vec<NodeId>,
    #[serde(default)]
    pub buckets: Option<u32>,
    #[serde(default)]
    pub skewed_by: Vec<NodeId>,
    #[serde(default)]
    pub skewed_on: Vec<NodeId>,
    #[serde(default)]
    pub skewed_stored_as_directories: bool,
    pub row_format: Option<NodeId>,
    pub like: Option<NodeId>,
    pub stored_as: Option<NodeId>,
    pub stored_by: Option<NodeId>,
    pub location: Option<NodeId>,
    /// `AssignItem`s printed as `TBLPROPERTIES (..)` / `WITH (..)`.
    #[serde(default)]
    pub options: Vec<NodeId>,
    pub lifecycle: Option<NodeId>,
    pub select: Option<NodeId>,
}
node!(CreateTable {
    opt name,
    many elements,
    many inherits,
    opt using,
    opt comment,
    many partitioned_by,
    many clustered_by,
    many sorted_by,
    many skewed_by,
    many skewed_on,
    opt row_format,
    opt like,
    opt stored_as,
    opt stored_by,
    opt location,
    many options,
    opt lifecycle,
    opt select,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: Option<NodeId>,
    pub data_type: Option<NodeId>,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub auto_increment: bool,
    pub default: Option<NodeId>,
    pub comment: Option<NodeId>,
}
node!(ColumnDef { opt name, opt data_type, opt default, opt comment });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<NodeId>,
}
node!(PrimaryKey { many columns });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniqueKey {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<NodeId>,
}
node!(UniqueKey { many columns });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub columns: Vec<NodeId>,
    pub references: Option<NodeId>,
    #[serde(default)]
    pub referenced_columns: Vec<NodeId>,
}
node!(ForeignKey { many columns, opt references, many referenced_columns });

/// Hive `ROW FORMAT DELIMITED ..` or `ROW FORMAT SERDE ..`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowFormat {
    pub serde: Option<NodeId>,
    #[serde(default)]
    pub serde_properties: Vec<NodeId>,
    pub fields_terminated_by: Option<NodeId>,
    pub escaped_by: Option<NodeId>,
    pub collection_items_terminated_by: Option<NodeId>,
    pub map_keys_terminated_by: Option<NodeId>,
    pub lines_terminated_by: Option<NodeId>,
    pub null_defined_as: Option<NodeId>,
}
node!(RowFormat {
    opt serde,
    many serde_properties,
    opt fields_terminated_by,
    opt escaped_by,
    opt collection_items_terminated_by,
    opt map_keys_terminated_by,
    opt lines_terminated_by,
    opt null_defined_as,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateIndex {
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub concurrently: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    pub name: Option<NodeId>,
    pub table: Option<NodeId>,
    /// Index method, `USING btree`.
    #[serde(default)]
    pub using: Option<String>,
    #[serde(default)]
    pub items: Vec<NodeId>,
    /// Hive index handler class, `AS 'COMPACT'`.
    pub handler: Option<NodeId>,
    #[serde(default)]
    pub deferred_rebuild: bool,
    /// Hive `IDXPROPERTIES`, or PostgreSQL storage parameters `WITH (..)`.
    #[serde(default)]
    pub properties: Vec<NodeId>,
    pub in_table: Option<NodeId>,
    pub row_format: Option<NodeId>,
    pub stored_as: Option<NodeId>,
    pub location: Option<NodeId>,
    #[serde(default)]
    pub table_properties: Vec<NodeId>,
    pub comment: Option<NodeId>,
    pub tablespace: Option<NodeId>,
    pub where_clause: Option<NodeId>,
}
node!(CreateIndex {
    opt name,
    opt table,
    many items,
    opt handler,
    many properties,
    opt in_table,
    opt row_format,
    opt stored_as,
    opt location,
    many table_properties,
    opt comment,
    opt tablespace,
    opt where_clause,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateView {
    #[serde(default)]
    pub or_replace: bool,
    pub name: Option<NodeId>,
    #[serde(default)]
    pub columns: Vec<NodeId>,
    pub comment: Option<NodeId>,
    pub query: Option<NodeId>,
}
node!(CreateView { opt name, many columns, opt comment, opt query });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropTable {
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub tables: Vec<NodeId>,
    #[serde(default)]
    pub cascade: bool,
    #[serde(default)]
    pub purge: bool,
}
node!(DropTable { many tables });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTable {
    #[serde(default)]
    pub only: bool,
    pub name: Option<NodeId>,
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(AlterTable { opt name, many items });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableAddColumn {
    #[serde(default)]
    pub columns: Vec<NodeId>,
}
node!(AlterTableAddColumn { many columns });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableDropColumn {
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub columns: Vec<NodeId>,
    #[serde(default)]
    pub cascade: bool,
}
node!(AlterTableDropColumn { many columns });

/// `ALTER [COLUMN] ..`. Every part is optional; only the populated ones
/// are printed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableAlterColumn {
    /// Old name when the clause also renames (`CHANGE old new ..`).
    pub origin_column: Option<NodeId>,
    pub column: Option<NodeId>,
    #[serde(default)]
    pub set_not_null: bool,
    #[serde(default)]
    pub drop_not_null: bool,
    pub set_default: Option<NodeId>,
    #[serde(default)]
    pub drop_default: bool,
    pub data_type: Option<NodeId>,
    #[serde(default)]
    pub first: bool,
    pub after: Option<NodeId>,
    #[serde(default)]
    pub to_first: bool,
    /// PostgreSQL `USING expr` conversion for a type change.
    pub using: Option<NodeId>,
}
node!(AlterTableAlterColumn {
    opt origin_column,
    opt column,
    opt set_default,
    opt data_type,
    opt after,
    opt using,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableRename {
    pub to: Option<NodeId>,
}
node!(AlterTableRename { opt to });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableChangeOwner {
    pub owner: Option<NodeId>,
}
node!(AlterTableChangeOwner { opt owner });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default)]
    pub privileges: Vec<String>,
    /// Object the privileges apply to. Without one the statement grants
    /// role attributes.
    pub resource: Option<NodeId>,
    #[serde(default)]
    pub users: Vec<NodeId>,
    #[serde(default)]
    pub with_grant_option: bool,
}
node!(Grant { opt resource, many users });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUser {
    pub user: Option<NodeId>,
    pub password: Option<NodeId>,
    #[serde(default)]
    pub encrypted: bool,
}
node!(CreateUser { opt user, opt password });
