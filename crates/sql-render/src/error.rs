use serde::Serialize;
use sql_ast::{AstError, NodeId};
use std::fmt;
use thiserror::Error;

pub type RenderResult = Result<(), RenderError>;

/// Errors that abort a render call. Partial output is discarded.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A slot the grammar requires was empty when the renderer reached it.
    #[error("{kind} node {node} is missing required `{slot}`")]
    MissingChild {
        node: NodeId,
        kind: &'static str,
        slot: &'static str,
    },

    /// The tree nests deeper than the configured limit.
    #[error("Nesting depth exceeded the limit of {limit}")]
    DepthExceeded { limit: usize },

    /// The rendered text grew past the configured limit.
    #[error("Rendered output exceeded the limit of {limit} bytes")]
    OutputTooLarge { limit: usize },

    /// The tree itself is malformed (dangling id).
    #[error("Malformed tree: {0}")]
    Ast(#[from] AstError),
}

impl RenderError {
    /// The input tree broke a structural requirement.
    pub fn is_precondition(&self) -> bool {
        matches!(self, RenderError::MissingChild { .. } | RenderError::Ast(_))
    }

    /// A configured resource bound was hit.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(
            self,
            RenderError::DepthExceeded { .. } | RenderError::OutputTooLarge { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DropReason {
    /// The dialect does not know the node's family at all.
    Unsupported,
    /// The dialect knows the construct but has no equivalent spelling.
    NoEquivalent,
}

/// A node or clause that was left out of the output on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub node: NodeId,
    pub kind: &'static str,
    /// Set when only one clause of the node was dropped.
    pub clause: Option<&'static str>,
    pub dialect: &'static str,
    pub reason: DropReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            DropReason::Unsupported => "is not supported by",
            DropReason::NoEquivalent => "has no equivalent in",
        };
        match self.clause {
            Some(clause) => write!(
                f,
                "{} clause of {} {} {} {}, dropped",
                clause, self.kind, self.node, reason, self.dialect
            ),
            None => write!(f, "{} {} {} {}, dropped", self.kind, self.node, reason, self.dialect),
        }
    }
}
