use crate::arena::NodeId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("Unknown node id: {0}")]
    UnknownNode(NodeId),

    #[error("Node {child} is already attached to {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("Node {0} cannot be its own child")]
    SelfReference(NodeId),

    #[error("Cycle detected through node {0}")]
    Cycle(NodeId),

    #[error("Node {0} is not attached to a parent")]
    NotAttached(NodeId),

    #[error("Tree nests deeper than the limit of {limit}")]
    DepthExceeded { limit: usize },
}
