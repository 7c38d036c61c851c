//! Nested set trees kept in an arena.
//!
//! Every node carries a `left`/`right` interval that strictly contains the
//! intervals of its descendants, so flat snapshots and ancestor/descendant
//! checks need no traversal. After each `append`, `prepend` or `remove_child`
//! the boundaries from the mutation point onward are rebuilt incrementally.
//!
//! ```
//! use nestedset::NestedSetArena;
//!
//! let mut arena = NestedSetArena::new();
//! let root = arena.create_root("root");
//! let a = arena.create_root("a");
//! let b = arena.create_root("b");
//! arena.append(root, a)?;
//! arena.append(root, b)?;
//!
//! let rows = arena.flat(root)?;
//! assert_eq!((rows[0].left, rows[0].right), (0, 5));
//! assert_eq!((rows[2].left, rows[2].right), (3, 4));
//! # Ok::<(), nestedset::DomainError>(())
//! ```

pub mod domain;
pub mod tree_traits;
pub mod util;

pub use domain::{DomainError, DomainResult, NestedSetArena, NodeView, TreeIterator, TreeNode};
pub use generational_arena::Index;
