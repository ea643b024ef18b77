//! Integration tests for the categorized ownership container

use catmap_rs::container::{
    Category, CollectingSink, DictContainer, Key, LeafItem, Ownable,
};
use catmap_rs::error::ContainerError;
use std::rc::Rc;

const VARIABLE: Category = Category::new("V");
const CONSTRAINT: Category = Category::new("C");

fn item(name: &str, category: Category) -> Rc<LeafItem> {
    Rc::new(LeafItem::new(name, category))
}

#[test]
fn test_end_to_end_scenario() {
    // The canonical lifecycle: insert, implicitly replace, re-insert the
    // displaced item elsewhere, delete.
    let sink = Rc::new(CollectingSink::new());
    let mut c = DictContainer::new("c", VARIABLE);
    c.set_sink(sink.clone());

    let a = item("a", VARIABLE);
    let b = item("b", VARIABLE);

    c.insert(1, a.clone()).unwrap();
    assert_eq!(c.len(), 1);
    assert!(sink.is_empty());

    // Assigning b over a succeeds with a replacement diagnostic; a is
    // detached and free again.
    c.insert(1, b.clone()).unwrap();
    assert_eq!(sink.len(), 1);
    assert!(a.owner().is_none());
    assert!(Rc::ptr_eq(&b.owner().unwrap(), c.tag()));

    // The displaced item is unattached, so inserting it under a new key
    // succeeds.
    c.insert(2, a.clone()).unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(a.storage_key(), Some(Key::from(2)));

    c.remove(1).unwrap();
    assert!(b.owner().is_none());
    assert_eq!(c.len(), 1);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_single_ownership_across_containers() {
    let mut block_a = DictContainer::new("block_a", VARIABLE);
    let mut block_b = DictContainer::new("block_b", VARIABLE);
    let x = item("x", VARIABLE);

    block_a.insert("x", x.clone()).unwrap();
    let err = block_b.insert("x", x.clone()).unwrap_err();
    assert_eq!(
        err,
        ContainerError::AlreadyOwned {
            container: "block_b".to_string(),
            key: Key::from("x"),
            owner: "block_a".to_string(),
        }
    );
    assert!(block_b.is_empty());

    // Moving an item requires an explicit detach via removal.
    let x = block_a.remove("x").unwrap();
    assert!(x.owner().is_none());
    block_b.insert("x", x).unwrap();
    assert!(block_a.is_empty());
    assert_eq!(block_b.len(), 1);
}

#[test]
fn test_category_enforcement_leaves_size_unchanged() {
    let mut vars = DictContainer::new("vars", VARIABLE);
    vars.insert(0, item("x", VARIABLE)).unwrap();
    let before = vars.len();

    let err = vars.insert(1, item("c", CONSTRAINT)).unwrap_err();
    assert!(matches!(err, ContainerError::CategoryMismatch { .. }));
    assert_eq!(vars.len(), before);
    let text = format!("{}", err);
    assert!(text.contains("wrong category"));
    assert!(text.contains("expected V, got C"));
}

#[test]
fn test_round_trip() {
    let mut vars = DictContainer::new("vars", VARIABLE);
    let x = item("x", VARIABLE);
    vars.insert((3, 7), x.clone()).unwrap();

    let stored = vars.get((3, 7)).unwrap();
    assert_eq!(stored.storage_key(), Some(Key::from((3, 7))));
    assert!(Rc::ptr_eq(&x.owner().unwrap(), vars.tag()));
    assert_eq!(vars.child_name((3, 7)), "vars[(3, 7)]");
}

#[test]
fn test_detach_on_delete() {
    let mut vars = DictContainer::new("vars", VARIABLE);
    let x = item("x", VARIABLE);
    vars.insert("x", x.clone()).unwrap();

    vars.remove("x").unwrap();
    assert!(x.owner().is_none());
    assert!(x.storage_key().is_none());
    let err = vars.get("x").unwrap_err();
    assert_eq!(
        err,
        ContainerError::KeyNotFound {
            key: Key::from("x")
        }
    );
}

#[test]
fn test_delete_then_reinsert_collapses_to_noop() {
    let sink = Rc::new(CollectingSink::new());
    let mut vars = DictContainer::new("vars", VARIABLE);
    vars.set_sink(sink.clone());

    let x = item("x", VARIABLE);
    vars.insert(0, x.clone()).unwrap();

    // Re-assigning the exact same item to its own key: no error, no
    // diagnostic, no change.
    vars.insert(0, x.clone()).unwrap();
    assert_eq!(vars.len(), 1);
    assert!(sink.is_empty());
    assert_eq!(x.storage_key(), Some(Key::from(0)));
}

#[test]
fn test_iteration_is_restartable_and_ordered() {
    let mut vars = DictContainer::new("vars", VARIABLE);
    let names = ["a", "b", "c"];
    for name in names {
        vars.insert(name, item(name, VARIABLE)).unwrap();
    }

    let first: Vec<Key> = vars.keys().cloned().collect();
    let second: Vec<Key> = vars.keys().cloned().collect();
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![Key::from("a"), Key::from("b"), Key::from("c")]
    );

    for (key, stored) in vars.items() {
        assert_eq!(stored.storage_key().as_ref(), Some(key));
    }
}

#[test]
fn test_key_serialization_round_trip() {
    let key = Key::Tuple(vec![Key::from("scenario"), Key::from(2)]);
    let json = serde_json::to_string(&key).unwrap();
    let back: Key = serde_json::from_str(&json).unwrap();
    assert_eq!(key, back);
}
