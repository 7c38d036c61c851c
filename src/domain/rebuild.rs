//! Incremental re-indexing of nested set boundaries.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::NestedSetArena;
use crate::domain::entities::NodeView;
use crate::domain::error::DomainResult;

/// Cursor of the rebuild walk.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// First visit: assign left and depth, then descend into the first child.
    Enter(Index),
    /// Subtree done: assign right, then go to the next sibling or the parent.
    Close(Index),
}

impl NestedSetArena {
    /// Recomputes boundaries from `start` onward in traversal order.
    ///
    /// Covers the subtree of `start`, every later sibling at each ancestor
    /// level, and the ancestors themselves up to the root. Nodes positioned
    /// before `start` are not touched. Each node is rebuilt at most once.
    ///
    /// Returns the rebuilt nodes in visitation order. Started from a root this
    /// is the pre-order traversal of the whole tree; started further down the
    /// ancestors show up when their subtree is closed.
    #[instrument(level = "debug", skip(self))]
    pub fn rebuild(&mut self, start: Index) -> DomainResult<Vec<Index>> {
        self.node(start)?;
        let mut rebuilt: HashSet<Index> = HashSet::new();
        let mut order = Vec::new();
        let mut step = Step::Enter(start);

        loop {
            step = match step {
                Step::Enter(idx) => {
                    if rebuilt.insert(idx) {
                        self.assign_left(idx)?;
                        order.push(idx);
                    }
                    match self.first_unrebuilt_child(idx, &rebuilt)? {
                        Some(child) => {
                            self.assign_right(idx)?;
                            Step::Enter(child)
                        }
                        None => Step::Close(idx),
                    }
                }
                Step::Close(idx) => {
                    self.assign_right(idx)?;
                    let Some(parent_idx) = self.node(idx)?.parent else {
                        debug!(rebuilt = order.len(), "rebuild reached root");
                        return Ok(order);
                    };
                    match self.next_sibling(idx)? {
                        Some(sibling) => Step::Enter(sibling),
                        None => {
                            // left of an ancestor cannot move, only its right
                            if rebuilt.insert(parent_idx) {
                                order.push(parent_idx);
                            }
                            Step::Close(parent_idx)
                        }
                    }
                }
            };
        }
    }

    /// Rebuilds from `idx` and returns the views in visitation order.
    #[instrument(level = "debug", skip(self))]
    pub fn flat(&mut self, idx: Index) -> DomainResult<Vec<NodeView>> {
        self.rebuild(idx)?
            .into_iter()
            .map(|i| self.to_view(i))
            .collect()
    }

    fn first_unrebuilt_child(&self, idx: Index, rebuilt: &HashSet<Index>) -> DomainResult<Option<Index>> {
        if self.is_leaf(idx)? {
            return Ok(None);
        }
        Ok(self
            .node(idx)?
            .children
            .iter()
            .copied()
            .find(|child| !rebuilt.contains(child)))
    }

    fn assign_left(&mut self, idx: Index) -> DomainResult<()> {
        let (left, depth) = match self.node(idx)?.parent {
            None => (0, None),
            Some(parent_idx) => {
                let parent = self.node(parent_idx)?;
                let left = match self.prev_sibling(idx)? {
                    Some(prev) => self.node(prev)?.right + 1,
                    None => parent.left + 1,
                };
                (left, Some(parent.depth + 1))
            }
        };

        let node = self.node_mut(idx)?;
        node.left = left;
        if let Some(depth) = depth {
            node.depth = depth;
        }
        trace!(?idx, left, depth = node.depth, "assigned left");
        Ok(())
    }

    fn assign_right(&mut self, idx: Index) -> DomainResult<()> {
        let size = self.get_size(idx)?;
        let node = self.node_mut(idx)?;
        node.right = node.left + size - 1;
        trace!(?idx, right = node.right, "assigned right");
        Ok(())
    }
}
