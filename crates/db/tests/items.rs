mod support;

use stackly_core::Item;
use support::setup_db;

fn make_item(id: &str, name: &str, created_at: &str) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        description: Some("a description".to_string()),
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
    }
}

#[test]
fn item_round_trip() {
    let test_db = setup_db();
    let db = &test_db.db;

    let item = make_item("abc12345", "Widget", "2024-01-01T09:00:00.000Z");
    db.insert_item(&item).expect("insert");

    let fetched = db.get_item("abc12345").expect("get").expect("item");
    assert_eq!(fetched, item);

    assert!(db.delete_item("abc12345").expect("delete"));
    assert!(db.get_item("abc12345").expect("get").is_none());
    assert!(!db.delete_item("abc12345").expect("delete again"));
}

#[test]
fn update_item_touches_only_supplied_fields() {
    let test_db = setup_db();
    let db = &test_db.db;

    db.insert_item(&make_item("abc12345", "Widget", "2024-01-01T09:00:00.000Z"))
        .expect("insert");

    let updated = db
        .update_item("abc12345", Some("Gadget"), None, "2024-01-02T09:00:00.000Z")
        .expect("update")
        .expect("item");
    assert_eq!(updated.name, "Gadget");
    assert_eq!(updated.description.as_deref(), Some("a description"));
    assert_eq!(updated.updated_at, "2024-01-02T09:00:00.000Z");
    assert_eq!(updated.created_at, "2024-01-01T09:00:00.000Z");

    let missing = db
        .update_item("missing", Some("x"), None, "2024-01-02T09:00:00.000Z")
        .expect("update");
    assert!(missing.is_none());
}

#[test]
fn list_items_newest_first() {
    let test_db = setup_db();
    let db = &test_db.db;

    db.insert_item(&make_item("first000", "First", "2024-01-01T09:00:00.000Z"))
        .expect("insert");
    db.insert_item(&make_item("second00", "Second", "2024-01-02T09:00:00.000Z"))
        .expect("insert");

    let items = db.list_items().expect("list");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "second00");
    assert_eq!(items[1].id, "first000");
}
