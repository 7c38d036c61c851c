//! Domain entities: the external view of a node

use std::fmt;

use serde::{Deserialize, Serialize};

/// Immutable snapshot of a node's nested set values.
///
/// Carries no parent or children, so a list of views is what a storage layer
/// persists as flat rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeView {
    pub depth: usize,
    pub left: i64,
    pub right: i64,
    pub title: String,
}

impl fmt::Display for NodeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {}]", self.title, self.left, self.right)
    }
}
