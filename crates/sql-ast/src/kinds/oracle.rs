//! Oracle-only expressions, statements and table clauses.

use crate::arena::NodeId;
use serde::{Deserialize, Serialize};

family! {
    /// Node kinds only Oracle understands.
    OracleNode => Oracle {
        Sysdate,
        OuterJoin,
        BinaryFloat,
        BinaryDouble,
        IsSet,
        SetTransaction,
        Explain,
        AlterTableDropPartition,
        AlterTableTruncatePartition,
        Exit,
        Continue,
        Raise,
        CreateDbLink,
        DropDbLink,
        StorageClause,
        LobStorageClause,
        UsingIndexClause,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sysdate;
node!(Sysdate {});

/// Legacy outer-join marker, `a.id(+)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OuterJoin {
    pub expr: Option<NodeId>,
}
node!(OuterJoin { opt expr });

/// `1.5F`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryFloat {
    pub value: f32,
}
node!(BinaryFloat {});

/// `1.5D`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryDouble {
    pub value: f64,
}
node!(BinaryDouble {});

/// `nested IS A SET`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsSet {
    pub nested: Option<NodeId>,
}
node!(IsSet { opt nested });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetTransaction {
    #[serde(default)]
    pub read_only: bool,
    pub name: Option<NodeId>,
}
node!(SetTransaction { opt name });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explain {
    pub statement_id: Option<NodeId>,
    pub into: Option<NodeId>,
    pub statement: Option<NodeId>,
}
node!(Explain { opt statement_id, opt into, opt statement });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableDropPartition {
    #[serde(default)]
    pub partitions: Vec<NodeId>,
}
node!(AlterTableDropPartition { many partitions });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterTableTruncatePartition {
    #[serde(default)]
    pub partitions: Vec<NodeId>,
}
node!(AlterTableTruncatePartition { many partitions });

/// PL/SQL `EXIT [label] [WHEN cond]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    #[serde(default)]
    pub label: Option<String>,
    pub when: Option<NodeId>,
}
node!(Exit { opt when });

/// PL/SQL `CONTINUE [label] [WHEN cond]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Continue {
    #[serde(default)]
    pub label: Option<String>,
    pub when: Option<NodeId>,
}
node!(Continue { opt when });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Raise {
    pub exception: Option<NodeId>,
}
node!(Raise { opt exception });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDbLink {
    #[serde(default)]
    pub public: bool,
    pub name: Option<NodeId>,
    pub user: Option<NodeId>,
    #[serde(default)]
    pub password: Option<String>,
    pub using: Option<NodeId>,
}
node!(CreateDbLink { opt name, opt user, opt using });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropDbLink {
    #[serde(default)]
    pub public: bool,
    pub name: Option<NodeId>,
}
node!(DropDbLink { opt name });

/// `STORAGE (INITIAL 64K NEXT 1M)`; items are `AssignItem`s printed as
/// `name value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageClause {
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(StorageClause { many items });

/// `LOB (a, b) STORE AS segment`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LobStorageClause {
    #[serde(default)]
    pub items: Vec<NodeId>,
    pub segment: Option<NodeId>,
}
node!(LobStorageClause { many items, opt segment });

/// `USING INDEX [name] [TABLESPACE ts]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsingIndexClause {
    pub index: Option<NodeId>,
    pub tablespace: Option<NodeId>,
}
node!(UsingIndexClause { opt index, opt tablespace });
