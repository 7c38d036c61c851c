use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::NodeView;
use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based nested set structure.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Opaque label, not interpreted by the tree
    pub title: String,
    /// Distance from the root, 0 for root nodes
    pub depth: usize,
    /// Left boundary of the node's interval
    pub left: i64,
    /// Right boundary of the node's interval
    pub right: i64,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in sibling order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn to_view(&self) -> NodeView {
        NodeView {
            depth: self.depth,
            left: self.left,
            right: self.right,
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    First,
    Last,
}

/// Arena storage for nested set trees.
///
/// Nodes are addressed by generational [`Index`] handles, so parent and child
/// links never own each other and a handle to a deleted node is detected
/// instead of aliasing a newer one. The arena holds any number of standalone
/// nodes and trees; a node without parent is the root of its own tree.
#[derive(Debug)]
pub struct NestedSetArena {
    arena: Arena<TreeNode>,
}

impl Default for NestedSetArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NestedSetArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Creates a node with explicit boundaries and depth.
    ///
    /// With a `parent` the node is appended right away, which rebuilds the
    /// parent's tree and overwrites the given `left`, `right` and `depth`.
    #[instrument(level = "debug", skip(self))]
    pub fn create(
        &mut self,
        title: &str,
        left: i64,
        right: i64,
        depth: usize,
        parent: Option<Index>,
    ) -> DomainResult<Index> {
        if let Some(parent_idx) = parent {
            self.node(parent_idx)?;
        }
        let node_idx = self.arena.insert(TreeNode {
            title: title.to_string(),
            depth,
            left,
            right,
            parent: None,
            children: Vec::new(),
        });

        if let Some(parent_idx) = parent {
            self.append(parent_idx, node_idx)?;
        }
        Ok(node_idx)
    }

    /// Creates a standalone root spanning `[0, 1]`.
    #[instrument(level = "debug", skip(self))]
    pub fn create_root(&mut self, title: &str) -> Index {
        self.arena.insert(TreeNode {
            title: title.to_string(),
            depth: 0,
            left: 0,
            right: 1,
            parent: None,
            children: Vec::new(),
        })
    }

    pub fn node(&self, idx: Index) -> DomainResult<&TreeNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    /// Raw access to a node. Changing fields here bypasses the rebuild.
    pub fn node_mut(&mut self, idx: Index) -> DomainResult<&mut TreeNode> {
        self.arena.get_mut(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    pub fn contains(&self, idx: Index) -> bool {
        self.arena.contains(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn title(&self, idx: Index) -> DomainResult<&str> {
        Ok(self.node(idx)?.title.as_str())
    }

    pub fn parent(&self, idx: Index) -> DomainResult<Option<Index>> {
        Ok(self.node(idx)?.parent)
    }

    pub fn children(&self, idx: Index) -> DomainResult<&[Index]> {
        Ok(self.node(idx)?.children.as_slice())
    }

    pub fn to_view(&self, idx: Index) -> DomainResult<NodeView> {
        Ok(self.node(idx)?.to_view())
    }

    /// Follows parent links up to the root of the node's tree.
    #[instrument(level = "trace", skip(self))]
    pub fn root_of(&self, idx: Index) -> DomainResult<Index> {
        let mut current = idx;
        while let Some(parent_idx) = self.node(current)?.parent {
            current = parent_idx;
        }
        Ok(current)
    }

    /// Pre-order iterator over the subtree rooted at `idx`.
    ///
    /// Follows the children links only; boundaries are not consulted or
    /// refreshed. A stale `idx` yields nothing.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, idx: Index) -> TreeIterator {
        TreeIterator::new(self, idx)
    }

    // ------------------------------------------------------------
    // Structural queries
    // ------------------------------------------------------------

    /// A root is never a leaf, even without children.
    #[instrument(level = "trace", skip(self))]
    pub fn is_leaf(&self, idx: Index) -> DomainResult<bool> {
        let node = self.node(idx)?;
        Ok(node.depth > 0 && node.children.is_empty())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn is_root(&self, idx: Index) -> DomainResult<bool> {
        Ok(self.node(idx)?.parent.is_none())
    }

    /// Parent handle and position of `idx` within the parent's children.
    fn sibling_position(&self, idx: Index) -> DomainResult<Option<(Index, usize)>> {
        let Some(parent_idx) = self.node(idx)?.parent else {
            return Ok(None);
        };
        let position = self
            .node(parent_idx)?
            .children
            .iter()
            .position(|&child| child == idx);
        Ok(position.map(|pos| (parent_idx, pos)))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn prev_sibling(&self, idx: Index) -> DomainResult<Option<Index>> {
        match self.sibling_position(idx)? {
            Some((parent_idx, pos)) if pos > 0 => Ok(Some(self.node(parent_idx)?.children[pos - 1])),
            _ => Ok(None),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn next_sibling(&self, idx: Index) -> DomainResult<Option<Index>> {
        match self.sibling_position(idx)? {
            Some((parent_idx, pos)) => Ok(self.node(parent_idx)?.children.get(pos + 1).copied()),
            None => Ok(None),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn count_next_siblings(&self, idx: Index) -> DomainResult<usize> {
        match self.sibling_position(idx)? {
            Some((parent_idx, pos)) => Ok(self.node(parent_idx)?.children.len() - pos - 1),
            None => Ok(0),
        }
    }

    /// Interval size (`right - left + 1`) derived from the current children.
    ///
    /// 2 for a leaf, otherwise 2 plus the sizes of all children. A childless
    /// root takes the second branch and sums to 2 as well.
    #[instrument(level = "trace", skip(self))]
    pub fn get_size(&self, idx: Index) -> DomainResult<i64> {
        if self.is_leaf(idx)? {
            return Ok(2);
        }
        // every node of the subtree owns exactly two boundaries
        Ok(2 * self.iter(idx).count() as i64)
    }

    // ------------------------------------------------------------
    // Interval queries (stored boundaries, no subtree walk)
    // ------------------------------------------------------------

    /// True if the interval of `ancestor` strictly contains the one of `idx`.
    ///
    /// Boundaries of separate trees overlap, so nodes of different trees are
    /// never related.
    #[instrument(level = "trace", skip(self))]
    pub fn is_descendant_of(&self, idx: Index, ancestor: Index) -> DomainResult<bool> {
        let node = self.node(idx)?;
        let candidate = self.node(ancestor)?;
        if candidate.left >= node.left || node.right >= candidate.right {
            return Ok(false);
        }
        Ok(self.root_of(idx)? == self.root_of(ancestor)?)
    }

    pub fn is_ancestor_of(&self, idx: Index, descendant: Index) -> DomainResult<bool> {
        self.is_descendant_of(descendant, idx)
    }

    /// Number of descendants as encoded by the node's stored boundaries.
    pub fn descendant_count(&self, idx: Index) -> DomainResult<usize> {
        let node = self.node(idx)?;
        Ok(((node.right - node.left - 1) / 2).max(0) as usize)
    }

    // ------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------

    /// Attaches `node` as last child of `parent` and rebuilds from `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn append(&mut self, parent: Index, node: Index) -> DomainResult<()> {
        self.attach(parent, node, Placement::Last)
    }

    /// Attaches `node` as first child of `parent` and rebuilds from `parent`.
    #[instrument(level = "debug", skip(self))]
    pub fn prepend(&mut self, parent: Index, node: Index) -> DomainResult<()> {
        self.attach(parent, node, Placement::First)
    }

    fn attach(&mut self, parent_idx: Index, node_idx: Index, placement: Placement) -> DomainResult<()> {
        self.ensure_attachable(parent_idx, node_idx)?;

        let parent_depth = self.node(parent_idx)?.depth;
        let node = self.node_mut(node_idx)?;
        node.parent = Some(parent_idx);
        node.depth = parent_depth + 1;

        let children = &mut self.node_mut(parent_idx)?.children;
        match placement {
            Placement::First => children.insert(0, node_idx),
            Placement::Last => children.push(node_idx),
        }
        debug!(?parent_idx, ?node_idx, ?placement, "attached node");

        self.rebuild(parent_idx)?;
        Ok(())
    }

    fn ensure_attachable(&self, parent_idx: Index, node_idx: Index) -> DomainResult<()> {
        self.node(parent_idx)?;
        if self.node(node_idx)?.parent.is_some() {
            return Err(DomainError::AlreadyAttached(node_idx));
        }
        let mut current = Some(parent_idx);
        while let Some(idx) = current {
            if idx == node_idx {
                return Err(DomainError::CycleDetected {
                    node: node_idx,
                    parent: parent_idx,
                });
            }
            current = self.node(idx)?.parent;
        }
        Ok(())
    }

    /// Detaches `child` from `parent` and rebuilds from `parent`.
    ///
    /// Returns `false` without touching anything if `child` is not a current
    /// child of `parent`. The detached node keeps its old boundaries and
    /// stays in the arena as a standalone root.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: Index, child: Index) -> DomainResult<bool> {
        let children = &mut self.node_mut(parent)?.children;
        let Some(pos) = children.iter().position(|&c| c == child) else {
            debug!(?child, "not a child, nothing to remove");
            return Ok(false);
        };
        children.remove(pos);

        if let Some(detached) = self.arena.get_mut(child) {
            detached.parent = None;
        }
        self.rebuild(parent)?;
        Ok(true)
    }

    /// Detaches `idx` if attached and frees it with its whole subtree.
    ///
    /// Returns the number of freed nodes. Handles into the subtree become stale.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, idx: Index) -> DomainResult<usize> {
        if let Some(parent_idx) = self.node(idx)?.parent {
            self.remove_child(parent_idx, idx)?;
        }
        let doomed: Vec<Index> = self.iter(idx).map(|(i, _)| i).collect();
        for &i in &doomed {
            self.arena.remove(i);
        }
        debug!(freed = doomed.len(), "deleted subtree");
        Ok(doomed.len())
    }
}

pub struct TreeIterator<'a> {
    arena: &'a NestedSetArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a NestedSetArena, start: Index) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Ok(node) = self.arena.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
