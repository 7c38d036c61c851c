//! Tests for the external node view and tree rendering

use nestedset::tree_traits::TreeNodeConvert;
use nestedset::util::testing;
use nestedset::{NestedSetArena, NodeView};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};

#[fixture]
fn arena() -> NestedSetArena {
    testing::init_test_setup();
    NestedSetArena::new()
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Rows {
    nodes: Vec<NodeView>,
}

#[rstest]
fn given_root_when_viewing_then_only_nested_set_fields(mut arena: NestedSetArena) {
    let root = arena.create_root("");

    let view = arena.to_view(root).unwrap();

    assert_eq!(
        view,
        NodeView {
            depth: 0,
            left: 0,
            right: 1,
            title: String::new()
        }
    );
    let table = toml::Value::try_from(&view).unwrap();
    let mut keys: Vec<_> = table.as_table().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["depth", "left", "right", "title"]);
}

#[rstest]
fn given_flat_rows_when_serializing_then_readable_back(mut arena: NestedSetArena) {
    let root = arena.create_root("root");
    let a = arena.create("a", 0, 1, 0, Some(root)).unwrap();
    arena.create("a1", 0, 1, 0, Some(a)).unwrap();
    let rows = Rows {
        nodes: arena.flat(root).unwrap(),
    };

    let text = toml::to_string(&rows).unwrap();
    let parsed: Rows = toml::from_str(&text).unwrap();

    assert!(text.contains("[[nodes]]"));
    assert!(text.contains("title = \"a1\""));
    assert_eq!(parsed, rows);
}

#[rstest]
fn given_tree_when_rendering_then_shows_boundaries(mut arena: NestedSetArena) {
    let root = arena.create_root("root");
    let a = arena.create("a", 0, 1, 0, Some(root)).unwrap();
    arena.create("a1", 0, 1, 0, Some(a)).unwrap();
    arena.create("b", 0, 1, 0, Some(root)).unwrap();

    let rendered = arena.to_tree_string(root).unwrap().to_string();
    let lines: Vec<_> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "root [0, 7]");
    assert!(lines[1].ends_with("a [1, 4]"));
    assert!(lines[2].ends_with("a1 [2, 3]"));
    assert!(lines[3].ends_with("b [5, 6]"));
}
