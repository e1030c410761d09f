//! Node kinds of the grammar.
//!
//! The common grammar is a flat set of structs wrapped by [`NodeKind`];
//! dialect-only kinds are grouped in one enum per family ([`HiveNode`],
//! [`PgNode`], [`OracleNode`]) so a renderer can handle or decline a whole
//! family at once.

use crate::arena::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod ddl;
pub mod dml;
pub mod expr;
pub mod hive;
pub mod oracle;
pub mod postgres;
pub mod query;

pub use ddl::*;
pub use dml::*;
pub use expr::*;
pub use hive::*;
pub use oracle::*;
pub use postgres::*;
pub use query::*;

/// Structural view of a node kind: its name and its child slots.
pub trait Slots {
    /// Grammar name of the kind.
    fn name(&self) -> &'static str;

    /// Calls `f` for every present child, in grammar order.
    fn for_each_child(&self, f: &mut dyn FnMut(NodeId));

    fn for_each_child_mut(&mut self, f: &mut dyn FnMut(&mut NodeId));

    /// Clears the slot holding `child`. Returns `false` when no slot does.
    fn remove_child(&mut self, child: NodeId) -> bool;

    fn children(&self) -> Vec<NodeId> {
        let mut children = Vec::new();
        self.for_each_child(&mut |id| children.push(id));
        children
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Common,
    Hive,
    Postgres,
    Oracle,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Common => "common",
            Family::Hive => "hive",
            Family::Postgres => "postgres",
            Family::Oracle => "oracle",
        };
        f.write_str(name)
    }
}

node_kind! {
    common {
        // expressions
        Identifier,
        PropertyExpr,
        AllColumn,
        CharLiteral,
        IntegerLiteral,
        NumberLiteral,
        BooleanLiteral,
        NullLiteral,
        DateLiteral,
        TimestampLiteral,
        BinaryLiteral,
        VariantRef,
        BinaryOp,
        UnaryOp,
        FunctionCall,
        Cast,
        InList,
        Between,
        IsNull,
        Exists,
        SubqueryExpr,
        Case,
        CaseWhen,
        ListExpr,
        IntervalExpr,
        DataType,
        ArrayDataType,
        // queries
        Select,
        QueryBlock,
        SelectItem,
        Union,
        With,
        WithEntry,
        OrderBy,
        OrderByItem,
        GroupBy,
        Limit,
        Fetch,
        ForClause,
        TableRef,
        SubqueryTableSource,
        Join,
        // dml
        Insert,
        ValuesRow,
        Update,
        UpdateSetItem,
        Delete,
        Truncate,
        Merge,
        MergeWhenUpdate,
        MergeWhenInsert,
        MergeWhenDelete,
        AssignItem,
        SetStatement,
        // ddl
        CreateTable,
        ColumnDef,
        PrimaryKey,
        UniqueKey,
        ForeignKey,
        RowFormat,
        CreateIndex,
        CreateView,
        DropTable,
        AlterTable,
        AlterTableAddColumn,
        AlterTableDropColumn,
        AlterTableAlterColumn,
        AlterTableRename,
        AlterTableChangeOwner,
        Grant,
        CreateUser,
    }
    families {
        Hive(HiveNode),
        Pg(PgNode),
        Oracle(OracleNode),
    }
}

impl NodeKind {
    pub fn family(&self) -> Family {
        match self {
            NodeKind::Hive(_) => Family::Hive,
            NodeKind::Pg(_) => Family::Postgres,
            NodeKind::Oracle(_) => Family::Oracle,
            _ => Family::Common,
        }
    }

    /// Constant values that parameterized rendering replaces with a
    /// placeholder. `NULL` and booleans stay inline.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::CharLiteral(_)
                | NodeKind::IntegerLiteral(_)
                | NodeKind::NumberLiteral(_)
                | NodeKind::DateLiteral(_)
                | NodeKind::TimestampLiteral(_)
        )
    }

    pub fn is_expression(&self) -> bool {
        match self {
            NodeKind::Identifier(_)
            | NodeKind::PropertyExpr(_)
            | NodeKind::AllColumn(_)
            | NodeKind::CharLiteral(_)
            | NodeKind::IntegerLiteral(_)
            | NodeKind::NumberLiteral(_)
            | NodeKind::BooleanLiteral(_)
            | NodeKind::NullLiteral(_)
            | NodeKind::DateLiteral(_)
            | NodeKind::TimestampLiteral(_)
            | NodeKind::BinaryLiteral(_)
            | NodeKind::VariantRef(_)
            | NodeKind::BinaryOp(_)
            | NodeKind::UnaryOp(_)
            | NodeKind::FunctionCall(_)
            | NodeKind::Cast(_)
            | NodeKind::InList(_)
            | NodeKind::Between(_)
            | NodeKind::IsNull(_)
            | NodeKind::Exists(_)
            | NodeKind::SubqueryExpr(_)
            | NodeKind::Case(_)
            | NodeKind::ListExpr(_)
            | NodeKind::IntervalExpr(_) => true,
            NodeKind::Pg(node) => matches!(
                node,
                PgNode::TypeCast(_) | PgNode::Extract(_) | PgNode::Geometric(_)
            ),
            NodeKind::Oracle(node) => matches!(
                node,
                OracleNode::Sysdate(_)
                    | OracleNode::OuterJoin(_)
                    | OracleNode::BinaryFloat(_)
                    | OracleNode::BinaryDouble(_)
                    | OracleNode::IsSet(_)
            ),
            _ => false,
        }
    }
}
