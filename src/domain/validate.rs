//! Point checks of the nested set invariants. Nothing here repairs a node.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::NestedSetArena;
use crate::domain::error::{DomainError, DomainResult};

impl NestedSetArena {
    /// Checks a single node against its parent.
    ///
    /// A node with nonzero depth needs a parent. With a parent, the first
    /// violated condition of left, right, then depth is reported.
    #[instrument(level = "trace", skip(self))]
    pub fn validate(&self, idx: Index) -> DomainResult<()> {
        let node = self.node(idx)?;
        let Some(parent_idx) = node.parent else {
            if node.depth != 0 {
                return Err(DomainError::MissingParent {
                    title: node.title.clone(),
                    depth: node.depth,
                });
            }
            return Ok(());
        };

        let parent = self.node(parent_idx)?;
        if parent.left >= node.left {
            return Err(DomainError::LeftBoundary {
                left: node.left,
                parent_left: parent.left,
            });
        }
        if parent.right <= node.right {
            return Err(DomainError::RightBoundary {
                right: node.right,
                parent_right: parent.right,
            });
        }
        if parent.depth + 1 != node.depth {
            return Err(DomainError::DepthMismatch {
                depth: node.depth,
                parent_depth: parent.depth,
            });
        }
        Ok(())
    }

    /// Validates every node of the subtree at `idx` in pre-order.
    ///
    /// Uses the stored values as they are; stops at the first violation.
    /// Returns the number of certified nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn validate_tree(&self, idx: Index) -> DomainResult<usize> {
        self.node(idx)?;
        let mut certified = 0;
        for (node_idx, _) in self.iter(idx) {
            self.validate(node_idx)?;
            certified += 1;
        }
        debug!(certified, "tree valid");
        Ok(certified)
    }
}
