//! Query nodes: `SELECT`, set operations and table sources.

use crate::arena::NodeId;
use serde::{Deserialize, Serialize};

/// A full query: optional `WITH`, a body (query block or set operation)
/// and the outer `ORDER BY`/`LIMIT` that apply to the whole body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub with: Option<NodeId>,
    pub query: Option<NodeId>,
    pub order_by: Option<NodeId>,
    pub limit: Option<NodeId>,
}
node!(Select { opt with, opt query, opt order_by, opt limit });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetQuantifier {
    All,
    Distinct,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBlock {
    #[serde(default)]
    pub quantifier: Option<SetQuantifier>,
    /// PostgreSQL `DISTINCT ON (..)`.
    #[serde(default)]
    pub distinct_on: Vec<NodeId>,
    #[serde(default)]
    pub items: Vec<NodeId>,
    pub into: Option<NodeId>,
    pub from: Option<NodeId>,
    pub where_clause: Option<NodeId>,
    pub group_by: Option<NodeId>,
    pub order_by: Option<NodeId>,
    pub limit: Option<NodeId>,
    pub fetch: Option<NodeId>,
    pub lock: Option<NodeId>,
}
node!(QueryBlock {
    many distinct_on,
    many items,
    opt into,
    opt from,
    opt where_clause,
    opt group_by,
    opt order_by,
    opt limit,
    opt fetch,
    opt lock,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expr: Option<NodeId>,
    #[serde(default)]
    pub alias: Option<String>,
}
node!(SelectItem { opt expr });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnionOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
    Minus,
}

impl UnionOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            UnionOperator::Union => "UNION",
            UnionOperator::UnionAll => "UNION ALL",
            UnionOperator::Intersect => "INTERSECT",
            UnionOperator::Except => "EXCEPT",
            UnionOperator::Minus => "MINUS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Union {
    pub left: Option<NodeId>,
    pub op: UnionOperator,
    pub right: Option<NodeId>,
}
node!(Union { opt left, opt right });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct With {
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub entries: Vec<NodeId>,
}
node!(With { many entries });

/// `alias (columns) AS (query)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WithEntry {
    pub alias: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub query: Option<NodeId>,
}
node!(WithEntry { opt query });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(OrderBy { many items });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullsOrder {
    First,
    Last,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub expr: Option<NodeId>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
    #[serde(default)]
    pub nulls: Option<NullsOrder>,
}
node!(OrderByItem { opt expr });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
    #[serde(default)]
    pub items: Vec<NodeId>,
    pub having: Option<NodeId>,
}
node!(GroupBy { many items, opt having });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub row_count: Option<NodeId>,
    pub offset: Option<NodeId>,
}
node!(Limit { opt row_count, opt offset });

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchOption {
    #[default]
    First,
    Next,
}

/// `FETCH FIRST n ROWS ONLY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fetch {
    #[serde(default)]
    pub option: FetchOption,
    pub count: Option<NodeId>,
}
node!(Fetch { opt count });

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockOption {
    #[default]
    Update,
    Share,
}

/// `FOR UPDATE [OF ..] [NOWAIT | SKIP LOCKED]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForClause {
    #[serde(default)]
    pub option: LockOption,
    #[serde(default)]
    pub of: Vec<NodeId>,
    #[serde(default)]
    pub no_wait: bool,
    #[serde(default)]
    pub skip_locked: bool,
}
node!(ForClause { many of });

/// A named table used as a source or target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: Option<NodeId>,
    #[serde(default)]
    pub alias: Option<String>,
}
node!(TableRef { opt name });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubqueryTableSource {
    pub select: Option<NodeId>,
    #[serde(default)]
    pub alias: Option<String>,
}
node!(SubqueryTableSource { opt select });

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Comma,
    #[default]
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinType::Comma => ",",
            JoinType::Inner => "JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub left: Option<NodeId>,
    #[serde(default)]
    pub join_type: JoinType,
    pub right: Option<NodeId>,
    pub condition: Option<NodeId>,
    #[serde(default)]
    pub using: Vec<NodeId>,
}
node!(Join { opt left, opt right, opt condition, many using });
