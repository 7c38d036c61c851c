//! Domain layer: the nested set tree
//!
//! This layer is independent of external concerns (no I/O, no persistence).

pub mod arena;
pub mod entities;
pub mod error;
pub mod rebuild;
pub mod validate;

pub use arena::{NestedSetArena, TreeIterator, TreeNode};
pub use entities::NodeView;
pub use error::{DomainError, DomainResult};
