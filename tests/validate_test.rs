//! Tests for node validation

use nestedset::util::testing;
use nestedset::{DomainError, NestedSetArena};
use rstest::{fixture, rstest};

#[fixture]
fn arena() -> NestedSetArena {
    testing::init_test_setup();
    NestedSetArena::new()
}

#[rstest]
fn given_depth_without_parent_when_validating_then_missing_parent(mut arena: NestedSetArena) {
    let node = arena.create("node", 7, 8, 1, None).unwrap();

    let err = arena.validate(node).unwrap_err();

    assert_eq!(
        err,
        DomainError::MissingParent {
            title: "node".to_string(),
            depth: 1
        }
    );
    assert!(err.to_string().contains("no parent"));
}

#[rstest]
fn given_standalone_root_when_validating_then_ok(mut arena: NestedSetArena) {
    let root = arena.create("root", 3, 4, 0, None).unwrap();

    assert!(arena.validate(root).is_ok());
}

#[rstest]
#[case::below_parent(-1)]
#[case::equal_to_parent(0)]
fn given_left_not_above_parent_when_validating_then_left_boundary(
    mut arena: NestedSetArena,
    #[case] left: i64,
) {
    let parent = arena.create_root("parent");
    let node = arena.create("node", 0, 0, 0, Some(parent)).unwrap();
    arena.node_mut(node).unwrap().left = left;

    assert_eq!(
        arena.validate(node),
        Err(DomainError::LeftBoundary {
            left,
            parent_left: 0
        })
    );
}

#[rstest]
#[case::beyond_parent(99)]
#[case::equal_to_parent(3)]
fn given_right_not_below_parent_when_validating_then_right_boundary(
    mut arena: NestedSetArena,
    #[case] right: i64,
) {
    let parent = arena.create_root("parent");
    let node = arena.create("node", 0, 0, 0, Some(parent)).unwrap();
    arena.node_mut(node).unwrap().right = right;

    assert_eq!(
        arena.validate(node),
        Err(DomainError::RightBoundary {
            right,
            parent_right: 3
        })
    );
}

#[rstest]
fn given_depth_skipping_a_level_when_validating_then_depth_mismatch(mut arena: NestedSetArena) {
    let parent = arena.create_root("parent");
    let node = arena.create("node", 0, 0, 0, Some(parent)).unwrap();
    arena.node_mut(node).unwrap().depth = 2;

    assert_eq!(
        arena.validate(node),
        Err(DomainError::DepthMismatch {
            depth: 2,
            parent_depth: 0
        })
    );
}

#[rstest]
fn given_several_violations_when_validating_then_left_reported_first(mut arena: NestedSetArena) {
    let parent = arena.create_root("parent");
    let node = arena.create("node", 0, 0, 0, Some(parent)).unwrap();
    {
        let raw = arena.node_mut(node).unwrap();
        raw.left = 0;
        raw.right = 10;
        raw.depth = 4;
    }

    assert!(matches!(
        arena.validate(node),
        Err(DomainError::LeftBoundary { .. })
    ));
}

#[rstest]
fn given_tampered_grandchild_when_validating_tree_then_reports_without_repair(
    mut arena: NestedSetArena,
) {
    let root = arena.create_root("root");
    let a = arena.create("a", 0, 1, 0, Some(root)).unwrap();
    let a1 = arena.create("a1", 0, 1, 0, Some(a)).unwrap();
    arena.create("b", 0, 1, 0, Some(root)).unwrap();
    arena.node_mut(a1).unwrap().right = 4;

    let result = arena.validate_tree(root);

    assert_eq!(
        result,
        Err(DomainError::RightBoundary {
            right: 4,
            parent_right: 4
        })
    );
    assert_eq!(arena.node(a1).unwrap().right, 4);
}

#[rstest]
fn given_flat_rows_when_validating_each_node_then_all_pass(mut arena: NestedSetArena) {
    let root = arena.create_root("root");
    let a = arena.create("a", 0, 1, 0, Some(root)).unwrap();
    arena.create("a1", 0, 1, 0, Some(a)).unwrap();
    arena.create("b", 0, 1, 0, Some(root)).unwrap();

    let order = arena.rebuild(root).unwrap();

    assert_eq!(order.len(), 4);
    for idx in order {
        arena.validate(idx).unwrap();
    }
}
