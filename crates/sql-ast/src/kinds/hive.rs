//! Hive-only statements.

use crate::arena::NodeId;
use serde::{Deserialize, Serialize};

family! {
    /// Node kinds only Hive understands.
    HiveNode => Hive {
        HiveInsert,
        MultiInsert,
        LoadData,
        MsckRepair,
        CreateFunction,
        AddJar,
        ExchangePartition,
    }
}

/// One branch of a multi-table insert, or a standalone Hive insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HiveInsert {
    #[serde(default)]
    pub overwrite: bool,
    pub table: Option<NodeId>,
    #[serde(default)]
    pub partitions: Vec<NodeId>,
    #[serde(default)]
    pub if_not_exists: bool,
    #[serde(default)]
    pub values: Vec<NodeId>,
    pub query: Option<NodeId>,
}
node!(HiveInsert { opt table, many partitions, many values, opt query });

/// `FROM source INSERT .. INSERT ..`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiInsert {
    pub with: Option<NodeId>,
    pub from: Option<NodeId>,
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(MultiInsert { opt with, opt from, many items });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadData {
    #[serde(default)]
    pub local: bool,
    pub inpath: Option<NodeId>,
    #[serde(default)]
    pub overwrite: bool,
    pub into: Option<NodeId>,
    #[serde(default)]
    pub partitions: Vec<NodeId>,
}
node!(LoadData { opt inpath, opt into, many partitions });

/// `MSCK REPAIR {DATABASE db | TABLE t} [ADD PARTITIONS]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsckRepair {
    pub database: Option<NodeId>,
    pub table: Option<NodeId>,
    #[serde(default)]
    pub add_partitions: bool,
}
node!(MsckRepair { opt database, opt table });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Jar,
    File,
    Archive,
}

impl ResourceType {
    pub fn keyword(self) -> &'static str {
        match self {
            ResourceType::Jar => "JAR",
            ResourceType::File => "FILE",
            ResourceType::Archive => "ARCHIVE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateFunction {
    #[serde(default)]
    pub temporary: bool,
    pub name: Option<NodeId>,
    pub class_name: Option<NodeId>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    pub location: Option<NodeId>,
    pub symbol: Option<NodeId>,
}
node!(CreateFunction { opt name, opt class_name, opt location, opt symbol });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddJar {
    pub path: String,
}
node!(AddJar {});

/// Alter-table item: `EXCHANGE PARTITION (..) WITH TABLE t`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangePartition {
    #[serde(default)]
    pub partitions: Vec<NodeId>,
    pub table: Option<NodeId>,
    /// `Some(true)` is `WITH VALIDATION`, `Some(false)` `WITHOUT VALIDATION`.
    #[serde(default)]
    pub validation: Option<bool>,
}
node!(ExchangePartition { many partitions, opt table });
