use std::result::Result as StdResult;

use thiserror::Error;

use crate::id::NodeId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("configuration: {0}")]
    /// Invalid configuration: unknown layout strategy, anchor, easing, or
    /// event name. The offending operation is aborted and the tree is left
    /// unchanged.
    Configuration(String),

    #[error("node {0:?} is detached or being destroyed")]
    /// The node (or one of its ancestors) is mid-destruction.
    Detached(NodeId),

    #[error("node not found: {0:?}")]
    /// The node id does not refer to a live node.
    NodeNotFound(NodeId),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// Structural mutation would make a node its own ancestor.
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },

    #[error("listener: {0}")]
    /// A listener callback failed.
    Listener(String),

    #[error("invalid operation: {0}")]
    /// The operation is not valid for the node's current state.
    InvalidOperation(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Configuration(e.to_string())
    }
}

impl Error {
    /// Construct a listener error from any displayable failure.
    pub fn listener(msg: impl Into<String>) -> Self {
        Self::Listener(msg.into())
    }
}
