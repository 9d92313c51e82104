//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::NodeId;

/// Document and component lifecycle errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Node was released or never existed.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// `child` is not a direct child of `parent`.
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Text nodes cannot hold children.
    #[error("text node {0} cannot have children")]
    TextNodeChildren(NodeId),

    /// Inserting would make a node its own ancestor.
    #[error("cannot insert {child} under {parent}: it is an ancestor")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// `update()` before `mount()`.
    #[error("component is not mounted")]
    NotMounted,
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DomError>;
