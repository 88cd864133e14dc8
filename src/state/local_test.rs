use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: i64,
    label: &'static str,
}

impl LocalId for Item {
    fn local_id(&self) -> i64 {
        self.id
    }

    fn set_local_id(&mut self, id: i64) {
        self.id = id;
    }
}

fn item(id: i64, label: &'static str) -> Item {
    Item { id, label }
}

fn list() -> LocalList<Item> {
    LocalList::from_items(vec![item(1, "a"), item(7, "b"), item(3, "c")])
}

// =============================================================
// Id allocation
// =============================================================

#[test]
fn empty_list_allocates_one() {
    let mut list = LocalList::default();
    assert_eq!(list.insert(item(0, "first")), Ok(1));
    assert_eq!(list.items(), &[item(1, "first")]);
}

#[test]
fn insert_allocates_max_plus_one_and_grows_by_one() {
    let mut list = list();
    let id = list.insert(item(0, "new")).unwrap();
    assert_eq!(id, 8);
    assert_eq!(list.len(), 4);
    assert_eq!(list.get(8).map(|i| i.label), Some("new"));
}

#[test]
fn insert_overrides_caller_id() {
    let mut list = list();
    assert_eq!(list.insert(item(100, "x")), Ok(8));
}

#[test]
fn negative_ids_never_yield_zero_or_below() {
    let mut list = LocalList::from_items(vec![item(-4, "imported"), item(-1, "imported")]);
    assert_eq!(list.next_id(), Some(1));
    assert_eq!(list.insert(item(0, "new")), Ok(1));
    assert_eq!(list.insert(item(0, "next")), Ok(2));
}

#[test]
fn exhausted_id_space_is_an_error_not_a_wrap() {
    let mut list = LocalList::from_items(vec![item(i64::MAX, "last")]);
    assert_eq!(list.next_id(), None);
    assert_eq!(list.insert(item(0, "overflow")), Err(IdsExhausted));
    assert_eq!(list.len(), 1);
}

// =============================================================
// Edits
// =============================================================

#[test]
fn remove_drops_only_matching_entry() {
    let mut list = list();
    assert_eq!(list.remove(7), Some(item(7, "b")));
    assert_eq!(list.items(), &[item(1, "a"), item(3, "c")]);
    assert_eq!(list.remove(7), None);
    assert_eq!(list.len(), 2);
}

#[test]
fn replace_and_modify_target_by_id() {
    let mut list = list();
    assert!(list.replace(item(3, "C")));
    assert!(list.modify(1, |i| i.label = "A"));
    assert!(!list.replace(item(42, "nope")));
    assert!(!list.modify(42, |i| i.label = "nope"));
    assert_eq!(list.items(), &[item(1, "A"), item(7, "b"), item(3, "C")]);
}

#[test]
fn restore_undoes_edits() {
    let mut list = list();
    let before = list.snapshot();
    list.insert(item(0, "temp")).unwrap();
    list.remove(1);
    list.restore(before);
    assert_eq!(list, self::list());
}
