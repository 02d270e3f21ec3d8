use super::*;
use crate::settings::MemoryStorage;

#[test]
fn add_deduplicates() {
    let mut list = ServerList::default();
    assert!(list.add("play.example.net"));
    assert!(!list.add("play.example.net"));
    assert!(!list.add("  play.example.net  "));
    assert_eq!(list.addresses(), ["play.example.net"]);
}

#[test]
fn add_rejects_blank() {
    let mut list = ServerList::default();
    assert!(!list.add("   "));
    assert!(list.addresses().is_empty());
}

#[test]
fn add_preserves_order() {
    let mut list = ServerList::default();
    list.add("b");
    list.add("a");
    assert_eq!(list.addresses(), ["b", "a"]);
}

#[test]
fn save_then_load_round_trips() {
    let mut storage = MemoryStorage::new();
    let mut list = ServerList::default();
    list.add("one");
    list.add("two");
    list.save(&mut storage).unwrap();
    assert_eq!(ServerList::load(&storage), list);
}

#[test]
fn load_missing_is_empty() {
    assert!(ServerList::load(&MemoryStorage::new()).addresses().is_empty());
}

#[test]
fn load_corrupt_is_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_item(SERVERS_STORAGE_KEY, "{oops").unwrap();
    assert!(ServerList::load(&storage).addresses().is_empty());
}

#[test]
fn load_collapses_stored_duplicates() {
    let mut storage = MemoryStorage::new();
    storage.set_item(SERVERS_STORAGE_KEY, r#"["a","a","b"]"#).unwrap();
    assert_eq!(ServerList::load(&storage).addresses(), ["a", "b"]);
}
