//! Data manipulation statements.

use crate::arena::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub with: Option<NodeId>,
    pub table: Option<NodeId>,
    /// Static partition spec, one `AssignItem` per key.
    #[serde(default)]
    pub partitions: Vec<NodeId>,
    #[serde(default)]
    pub columns: Vec<NodeId>,
    #[serde(default)]
    pub values: Vec<NodeId>,
    pub query: Option<NodeId>,
    pub on_conflict: Option<NodeId>,
    #[serde(default)]
    pub returning: Vec<NodeId>,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub if_not_exists: bool,
}
node!(Insert {
    opt with,
    opt table,
    many partitions,
    many columns,
    many values,
    opt query,
    opt on_conflict,
    many returning,
});

/// One parenthesized row of a `VALUES` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuesRow {
    #[serde(default)]
    pub values: Vec<NodeId>,
}
node!(ValuesRow { many values });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub with: Option<NodeId>,
    pub table: Option<NodeId>,
    #[serde(default)]
    pub items: Vec<NodeId>,
    pub from: Option<NodeId>,
    pub where_clause: Option<NodeId>,
    #[serde(default)]
    pub returning: Vec<NodeId>,
    #[serde(default)]
    pub only: bool,
}
node!(Update {
    opt with,
    opt table,
    many items,
    opt from,
    opt where_clause,
    many returning,
});

/// `column = value` inside `SET`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSetItem {
    pub column: Option<NodeId>,
    pub value: Option<NodeId>,
}
node!(UpdateSetItem { opt column, opt value });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub with: Option<NodeId>,
    pub table: Option<NodeId>,
    pub using: Option<NodeId>,
    pub where_clause: Option<NodeId>,
    #[serde(default)]
    pub returning: Vec<NodeId>,
    #[serde(default)]
    pub only: bool,
}
node!(Delete {
    opt with,
    opt table,
    opt using,
    opt where_clause,
    many returning,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Truncate {
    #[serde(default)]
    pub tables: Vec<NodeId>,
    #[serde(default)]
    pub only: bool,
    /// `Some(true)` is `RESTART IDENTITY`, `Some(false)` `CONTINUE IDENTITY`.
    #[serde(default)]
    pub restart_identity: Option<bool>,
    /// `Some(true)` is `CASCADE`, `Some(false)` `RESTRICT`.
    #[serde(default)]
    pub cascade: Option<bool>,
}
node!(Truncate { many tables });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub into: Option<NodeId>,
    pub using: Option<NodeId>,
    pub on: Option<NodeId>,
    #[serde(default)]
    pub whens: Vec<NodeId>,
}
node!(Merge { opt into, opt using, opt on, many whens });

/// `WHEN MATCHED [AND cond] THEN UPDATE SET ..`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeWhenUpdate {
    pub condition: Option<NodeId>,
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(MergeWhenUpdate { opt condition, many items });

/// `WHEN NOT MATCHED [AND cond] THEN INSERT (..) VALUES (..)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeWhenInsert {
    pub condition: Option<NodeId>,
    #[serde(default)]
    pub columns: Vec<NodeId>,
    #[serde(default)]
    pub values: Vec<NodeId>,
}
node!(MergeWhenInsert { opt condition, many columns, many values });

/// `WHEN MATCHED [AND cond] THEN DELETE`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeWhenDelete {
    pub condition: Option<NodeId>,
}
node!(MergeWhenDelete { opt condition });

/// `target = value`, used by partition specs, table options and `SET`.
/// A missing value renders the target alone (dynamic partition key).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignItem {
    pub target: Option<NodeId>,
    pub value: Option<NodeId>,
}
node!(AssignItem { opt target, opt value });

/// Session `SET name = value[, ..]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetStatement {
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(SetStatement { many items });
