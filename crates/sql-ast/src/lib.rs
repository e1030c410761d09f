//! Arena-backed SQL syntax tree shared by every dialect renderer.
//!
//! Nodes live in a single [`Ast`] and refer to each other through
//! [`NodeId`]s. Each node records its parent so renderers can make
//! context-dependent decisions (parenthesization, clause placement)
//! without owning references back up the tree.

#[macro_use]
mod macros;

pub mod arena;
pub mod error;
pub mod kinds;
pub mod value;
pub mod visitor;

pub use arena::{Ast, Node, NodeId, SourcePos};
pub use error::AstError;
pub use kinds::{Family, NodeKind, Slots};
pub use value::Value;
pub use visitor::{MAX_DEPTH, Visitor, collect_tables, count_literals};

pub use bigdecimal;
pub use chrono;
