mod support;

use support::{seed_user, setup_db};

#[test]
fn create_user_initializes_counters() {
    let test_db = setup_db();
    let user = seed_user(&test_db.db, "fresh@example.com");
    assert_eq!(user.saved_outputs_count, 0);
    assert_eq!(user.favorite_tools_count, 0);
    assert_eq!(user.daily_streak, 0);
    assert_eq!(user.last_streak_date, None);
    assert_eq!(user.total_tokens_used, 0);
    assert_eq!(user.last_login_at, None);
}

#[test]
fn email_lookup_returns_credentials() {
    let test_db = setup_db();
    seed_user(&test_db.db, "lookup@example.com");
    let row = test_db
        .db
        .get_user_auth_by_email("lookup@example.com")
        .expect("lookup")
        .expect("row");
    assert_eq!(row.password_hash, "deadbeef");
    assert_eq!(row.password_salt, "cafe");
    assert_eq!(row.user.email, "lookup@example.com");

    let missing = test_db
        .db
        .get_user_auth_by_email("nobody@example.com")
        .expect("lookup");
    assert!(missing.is_none());
}

#[test]
fn duplicate_email_is_rejected() {
    let test_db = setup_db();
    seed_user(&test_db.db, "dup@example.com");
    let second = test_db.db.create_user(
        "Other",
        "dup@example.com",
        "beef",
        "salt",
        "2024-01-02T00:00:00.000Z",
    );
    assert!(second.is_err());
}

#[test]
fn streak_and_token_updates_round_trip() {
    let test_db = setup_db();
    let user = seed_user(&test_db.db, "counters@example.com");
    let db = &test_db.db;

    db.set_streak(user.id, 4, "2024-01-03").expect("set streak");
    db.add_tokens_used(user.id, 150).expect("add tokens");
    db.add_tokens_used(user.id, 50).expect("add tokens");
    db.adjust_saved_outputs_count(user.id, 1).expect("adjust");
    db.adjust_favorite_tools_count(user.id, 1).expect("adjust");
    db.adjust_favorite_tools_count(user.id, -1).expect("adjust");

    let reloaded = db
        .get_user_by_id(user.id)
        .expect("get user")
        .expect("user");
    assert_eq!(reloaded.daily_streak, 4);
    assert_eq!(reloaded.last_streak_date.as_deref(), Some("2024-01-03"));
    assert_eq!(reloaded.total_tokens_used, 200);
    assert_eq!(reloaded.saved_outputs_count, 1);
    assert_eq!(reloaded.favorite_tools_count, 0);
}

#[test]
fn sessions_resolve_and_revoke() {
    let test_db = setup_db();
    let user = seed_user(&test_db.db, "session@example.com");
    let db = &test_db.db;

    db.insert_session("tok-1", user.id, "2024-01-03T09:00:00.000Z")
        .expect("insert session");
    let resolved = db
        .get_session_user("tok-1")
        .expect("resolve")
        .expect("user");
    assert_eq!(resolved.id, user.id);

    assert!(db.delete_session("tok-1").expect("delete"));
    assert!(db.get_session_user("tok-1").expect("resolve").is_none());
    assert!(!db.delete_session("tok-1").expect("delete again"));
}
