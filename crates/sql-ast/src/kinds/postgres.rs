//! PostgreSQL-only expressions and statements.

use crate::arena::NodeId;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

family! {
    /// Node kinds only PostgreSQL understands.
    PgNode => Pg {
        TypeCast,
        Extract,
        Geometric,
        OnConflict,
        Show,
        StartTransaction,
        EndTransaction,
        ConnectTo,
        CreateDatabase,
        AttrExpr,
        DropDatabase,
        AlterDatabase,
        CreateSchema,
        DropSchema,
        AlterSchema,
        Vacuum,
        Analyze,
    }
}

/// `expr::type`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeCast {
    pub expr: Option<NodeId>,
    pub data_type: Option<NodeId>,
}
node!(TypeCast { opt expr, opt data_type });

/// `EXTRACT(field FROM source)`; `field` is printed as a keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extract {
    pub field: String,
    pub source: Option<NodeId>,
}
node!(Extract { opt source });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometricShape {
    Box,
    Point,
    Macaddr,
    Inet,
    Cidr,
    Polygon,
    Circle,
    Lseg,
}

impl GeometricShape {
    pub fn keyword(self) -> &'static str {
        match self {
            GeometricShape::Box => "box",
            GeometricShape::Point => "point",
            GeometricShape::Macaddr => "macaddr",
            GeometricShape::Inet => "inet",
            GeometricShape::Cidr => "cidr",
            GeometricShape::Polygon => "polygon",
            GeometricShape::Circle => "circle",
            GeometricShape::Lseg => "lseg",
        }
    }
}

/// Typed literal such as `point '(1,2)'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometric {
    pub shape: GeometricShape,
    pub value: Option<NodeId>,
}
node!(Geometric { opt value });

/// `ON CONFLICT [(target) | ON CONSTRAINT c] [WHERE ..] DO NOTHING | DO UPDATE SET ..`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnConflict {
    #[serde(default)]
    pub target: Vec<NodeId>,
    pub constraint: Option<NodeId>,
    pub where_clause: Option<NodeId>,
    #[serde(default)]
    pub do_nothing: bool,
    #[serde(default)]
    pub update_items: Vec<NodeId>,
    pub update_where: Option<NodeId>,
}
node!(OnConflict {
    many target,
    opt constraint,
    opt where_clause,
    many update_items,
    opt update_where,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub expr: Option<NodeId>,
}
node!(Show { opt expr });

/// `BEGIN` or `START TRANSACTION`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartTransaction {
    #[serde(default)]
    pub use_begin: bool,
}
node!(StartTransaction {});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndTransaction;
node!(EndTransaction {});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectTo {
    pub target: Option<NodeId>,
}
node!(ConnectTo { opt target });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDatabase {
    pub name: Option<NodeId>,
    #[serde(default)]
    pub with: bool,
    /// `AttrExpr` options such as `OWNER = alice`.
    #[serde(default)]
    pub options: Vec<NodeId>,
}
node!(CreateDatabase { opt name, many options });

/// `name [=] value` option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttrExpr {
    pub name: Option<NodeId>,
    #[serde(default)]
    pub equals: bool,
    pub value: Option<NodeId>,
}
node!(AttrExpr { opt name, opt value });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropDatabase {
    #[serde(default)]
    pub if_exists: bool,
    pub name: Option<NodeId>,
    #[serde(default)]
    pub force: bool,
}
node!(DropDatabase { opt name });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterDatabase {
    pub name: Option<NodeId>,
    pub rename_to: Option<NodeId>,
    pub owner_to: Option<NodeId>,
    pub set_tablespace: Option<NodeId>,
    #[serde(default)]
    pub refresh_collation_version: bool,
    pub set_parameter: Option<NodeId>,
    pub set_value: Option<NodeId>,
    pub reset_parameter: Option<NodeId>,
    /// `WITH` options such as `ALLOW_CONNECTIONS false`.
    #[serde(default)]
    pub options: Vec<NodeId>,
}
node!(AlterDatabase {
    opt name,
    opt rename_to,
    opt owner_to,
    opt set_tablespace,
    opt set_parameter,
    opt set_value,
    opt reset_parameter,
    many options,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSchema {
    #[serde(default)]
    pub if_not_exists: bool,
    pub name: Option<NodeId>,
    pub authorization: Option<NodeId>,
}
node!(CreateSchema { opt name, opt authorization });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropSchema {
    #[serde(default)]
    pub if_exists: bool,
    #[serde(default)]
    pub names: Vec<NodeId>,
    /// `Some(true)` is `CASCADE`, `Some(false)` `RESTRICT`.
    #[serde(default)]
    pub cascade: Option<bool>,
}
node!(DropSchema { many names });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterSchema {
    pub name: Option<NodeId>,
    pub rename_to: Option<NodeId>,
    pub owner_to: Option<NodeId>,
}
node!(AlterSchema { opt name, opt rename_to, opt owner_to });

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct VacuumOptions: u8 {
        const FULL = 1;
        const FREEZE = 1 << 1;
        const VERBOSE = 1 << 2;
        const ANALYZE = 1 << 3;
        const SKIP_LOCKED = 1 << 4;
        const PROCESS_TOAST = 1 << 5;
    }
}

impl VacuumOptions {
    /// Keywords of the set options in declaration order.
    pub fn keywords(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vacuum {
    #[serde(default)]
    pub options: VacuumOptions,
    #[serde(default)]
    pub tables: Vec<NodeId>,
}
node!(Vacuum { many tables });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analyze {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub skip_locked: bool,
    #[serde(default)]
    pub tables: Vec<NodeId>,
}
node!(Analyze { many tables });
