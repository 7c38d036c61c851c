//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent structural violations of a nested set tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node '{title}' has depth {depth} but no parent")]
    MissingParent { title: String, depth: usize },

    #[error("node left {left} must be greater than parent left {parent_left}")]
    LeftBoundary { left: i64, parent_left: i64 },

    #[error("node right {right} must be less than parent right {parent_right}")]
    RightBoundary { right: i64, parent_right: i64 },

    #[error("node depth {depth} must be exactly parent depth {parent_depth} plus one")]
    DepthMismatch { depth: usize, parent_depth: usize },

    #[error("node not found: {0:?}")]
    NodeNotFound(Index),

    #[error("node {0:?} already has a parent")]
    AlreadyAttached(Index),

    #[error("attaching {node:?} under {parent:?} would create a cycle")]
    CycleDetected { node: Index, parent: Index },
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
