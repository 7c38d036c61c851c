//! Rendering of nested set trees for terminal display.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DomainResult, NestedSetArena};

pub trait TreeNodeConvert {
    fn to_tree_string(&self, idx: Index) -> DomainResult<Tree<String>>;
}

impl TreeNodeConvert for NestedSetArena {
    /// Each node is labelled `title [left, right]` with its stored boundaries.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, idx: Index) -> DomainResult<Tree<String>> {
        let mut tree = Tree::new(self.to_view(idx)?.to_string());

        fn build_tree(arena: &NestedSetArena, node_idx: Index, parent_tree: &mut Tree<String>) -> DomainResult<()> {
            for &child_idx in arena.children(node_idx)? {
                let mut child_tree = Tree::new(arena.to_view(child_idx)?.to_string());
                build_tree(arena, child_idx, &mut child_tree)?;
                parent_tree.push(child_tree);
            }
            Ok(())
        }

        build_tree(self, idx, &mut tree)?;
        Ok(tree)
    }
}
