use std::cell::RefCell;
use std::rc::Rc;

use lrud::{EventKind, Key, Lrud, LrudConfig, LrudError, LrudEvent, NodeOptions, NodeProps};

/// Records every notification as `kind:id`.
fn record_all(lrud: &mut Lrud) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        EventKind::Focus,
        EventKind::Blur,
        EventKind::Select,
        EventKind::Move,
        EventKind::Active,
        EventKind::Inactive,
    ] {
        let log = Rc::clone(&seen);
        lrud.on(kind, move |e| {
            let tag = serde_json::to_value(e.kind()).unwrap();
            log.borrow_mut()
                .push(format!("{}:{}", tag.as_str().unwrap(), e.node_id()));
        });
    }
    seen
}

fn list(wrapping: bool) -> Lrud {
    let mut lrud = Lrud::new();
    lrud.register("root", NodeOptions::new().vertical()).unwrap();
    lrud.register(
        "list",
        NodeOptions::new().parent("root").horizontal().wrapping(wrapping),
    )
    .unwrap();
    for id in ["x", "y", "z"] {
        lrud.register(id, NodeOptions::new().parent("list")).unwrap();
    }
    lrud.register("footer", NodeOptions::new().parent("root")).unwrap();
    lrud
}

#[test]
fn test_registration_is_idempotent() {
    let mut lrud = list(false);
    lrud.register("y", NodeOptions::new().parent("list")).unwrap();
    lrud.register("y", NodeOptions::new()).unwrap();
    let children = lrud.get_node_by_id("list").unwrap().children();
    assert_eq!(children, ["x", "y", "z"]);
}

#[test]
fn test_unregister_cascades_and_clears_focus() {
    let mut lrud = list(false);
    lrud.focus(Some("y"));
    let seen = record_all(&mut lrud);

    lrud.unregister("list");
    assert_eq!(lrud.node_count(), 2);
    for id in ["list", "x", "y", "z"] {
        assert!(lrud.get_node_by_id(id).is_none(), "{id} survived");
    }
    assert_eq!(lrud.focused_id(), None);
    assert_eq!(*seen.borrow(), vec!["blur:y"]);
    assert_eq!(lrud.get_node_by_id("root").unwrap().children(), ["footer"]);
}

#[test]
fn test_focus_root_lands_on_leaf_with_one_blur_and_focus() {
    let mut lrud = list(false);
    lrud.focus(Some("footer"));
    let seen = record_all(&mut lrud);

    lrud.focus(Some("root"));
    assert_eq!(lrud.focused_id(), Some("footer"));

    lrud.set_active_child("root", "list");
    seen.borrow_mut().clear();
    lrud.focus(Some("root"));
    assert_eq!(lrud.focused_id(), Some("x"));
    assert_eq!(*seen.borrow(), vec!["blur:footer", "focus:x", "active:x"]);
}

#[test]
fn test_wrapping_cycles_both_ways() {
    let mut lrud = list(true);
    lrud.focus(Some("z"));
    assert!(lrud.handle_key(Key::Right));
    assert_eq!(lrud.focused_id(), Some("x"));
    assert!(lrud.handle_key(Key::Left));
    assert_eq!(lrud.focused_id(), Some("z"));
}

#[test]
fn test_non_wrapping_end_bubbles_to_parent() {
    let mut lrud = list(false);
    lrud.focus(Some("z"));
    assert!(!lrud.handle_key(Key::Right));
    assert_eq!(lrud.focused_id(), Some("z"));

    // Off-axis key bubbles to the vertical root instead.
    assert!(lrud.handle_key(Key::Down));
    assert_eq!(lrud.focused_id(), Some("footer"));
}

#[test]
fn test_disabled_children_are_skipped() {
    let mut lrud = list(false);
    lrud.register("x", NodeOptions::new().disabled(true)).unwrap();
    lrud.register("y", NodeOptions::new().disabled(true)).unwrap();

    lrud.focus(Some("list"));
    assert_eq!(lrud.focused_id(), Some("z"));
    assert!(!lrud.handle_key(Key::Left));
    assert_eq!(lrud.focused_id(), Some("z"));
}

#[test]
fn test_disabled_siblings_wrap_back_to_start() {
    let mut lrud = list(true);
    lrud.focus(Some("y"));
    lrud.register("x", NodeOptions::new().disabled(true)).unwrap();
    lrud.register("z", NodeOptions::new().disabled(true)).unwrap();

    assert!(lrud.handle_key(Key::Right));
    assert!(lrud.handle_key(Key::Left));
    assert_eq!(lrud.focused_id(), Some("y"));

    lrud.register("y", NodeOptions::new().disabled(true)).unwrap();
    assert!(!lrud.handle_key(Key::Right));
}

#[test]
fn test_enter_selects_without_moving() {
    let mut lrud = list(false);
    let selected = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&selected);
    lrud.register(
        "y",
        NodeOptions::new().on_select(move |n| s.borrow_mut().push(n.id.clone())),
    )
    .unwrap();
    lrud.focus(Some("y"));

    assert!(lrud.handle_key_event(13));
    assert_eq!(lrud.focused_id(), Some("y"));
    assert_eq!(*selected.borrow(), vec!["y"]);
}

#[test]
fn test_grid_column_clamps_on_down() {
    let mut lrud = Lrud::new();
    lrud.register("grid", NodeOptions::new().vertical().grid(true))
        .unwrap();
    for (row, cells) in [("row1", 4), ("row2", 2)] {
        lrud.register(row, NodeOptions::new().parent("grid").horizontal())
            .unwrap();
        for i in 0..cells {
            lrud.register(&format!("{row}-{i}"), NodeOptions::new().parent(row))
                .unwrap();
        }
    }
    lrud.focus(Some("row1-3"));

    let moves = Rc::new(RefCell::new(Vec::new()));
    let m = Rc::clone(&moves);
    lrud.on(EventKind::Move, move |e| {
        if let LrudEvent::Move(mv) = e {
            m.borrow_mut().push((mv.node.id.clone(), mv.enter.index, mv.leave.index));
        }
    });

    assert!(lrud.handle_key(Key::Down));
    assert_eq!(lrud.focused_id(), Some("row2-1"));
    assert_eq!(*moves.borrow(), vec![("grid".to_string(), 1, 0)]);
}

#[test]
fn test_second_root_policy() {
    let mut lrud = Lrud::new();
    lrud.register("root", NodeOptions::new()).unwrap();
    let err = lrud.register("other", NodeOptions::new()).unwrap_err();
    assert!(matches!(err, LrudError::RootConflict { .. }));
    assert_eq!(lrud.root(), Some("root"));

    let config = LrudConfig::from_json(r#"{"allow_root_replacement": true}"#).unwrap();
    let mut lrud = Lrud::with_config(config);
    lrud.register("root", NodeOptions::new()).unwrap();
    lrud.register("other", NodeOptions::new()).unwrap();
    assert_eq!(lrud.root(), Some("other"));
}

#[test]
fn test_props_json_registration() {
    let mut lrud = Lrud::new();
    let root: NodeProps = serde_json::from_str(r#"{"orientation": "horizontal"}"#).unwrap();
    lrud.register("root", root.into()).unwrap();
    for id in ["a", "b"] {
        let props: NodeProps = serde_json::from_str(r#"{"parent": "root"}"#).unwrap();
        lrud.register(id, props.into()).unwrap();
    }
    lrud.focus(None);
    assert!(lrud.handle_key_event(39));
    assert_eq!(lrud.focused_id(), Some("b"));
}

#[test]
fn test_search_helpers() {
    let mut lrud = list(false);
    lrud.focus(Some("y"));
    let horizontal = |n: &lrud::Node| n.orientation() == lrud::Orientation::Horizontal;

    assert_eq!(lrud.search_up("y", horizontal).map(|n| n.id()), Some("list"));
    assert_eq!(lrud.search_down("root", |n| n.children().is_empty()).map(|n| n.id()), Some("y"));
    assert!(lrud.search_up("root", horizontal).is_none());
}

#[test]
fn test_listener_off_stops_delivery() {
    let mut lrud = list(false);
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let id = lrud.on(EventKind::Focus, move |_| *c.borrow_mut() += 1);

    lrud.focus(Some("x"));
    assert!(lrud.off(id));
    lrud.focus(Some("y"));
    assert_eq!(*count.borrow(), 1);
    assert!(!lrud.off(id));
}
