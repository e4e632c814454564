mod support;

use support::{seed_user, setup_db};

#[test]
fn record_usage_accumulates_counts_and_tokens() {
    let mut test_db = setup_db();
    let user = seed_user(&test_db.db, "usage@example.com");
    let db = &mut test_db.db;

    for (tool, tokens) in [("caption", 100), ("caption", 40), ("outline", 60)] {
        db.record_usage(
            user.id,
            "2024-01-03",
            tool,
            &tool.to_uppercase(),
            tokens,
            "2024-01-03T10:00:00.000Z",
        )
        .expect("record usage");
    }

    let days = db
        .list_daily_usage_since(user.id, "2024-01-01")
        .expect("list usage");
    assert_eq!(days.len(), 1);
    let day = &days[0];
    assert_eq!(day.date, "2024-01-03");
    assert_eq!(day.total_requests, 3);
    assert_eq!(day.total_tokens, 200);

    let summed: u64 = day.tools_used.iter().map(|tool| tool.count).sum();
    assert_eq!(summed, day.total_requests);

    assert_eq!(day.tools_used.len(), 2);
    assert_eq!(day.tools_used[0].tool_id, "caption");
    assert_eq!(day.tools_used[0].count, 2);
    assert_eq!(day.tools_used[1].tool_id, "outline");
    assert_eq!(day.tools_used[1].count, 1);
}

#[test]
fn record_usage_keeps_days_separate() {
    let mut test_db = setup_db();
    let user = seed_user(&test_db.db, "days@example.com");
    let db = &mut test_db.db;

    db.record_usage(
        user.id,
        "2024-01-02",
        "caption",
        "Caption",
        50,
        "2024-01-02T09:00:00.000Z",
    )
    .expect("record day one");
    db.record_usage(
        user.id,
        "2024-01-03",
        "caption",
        "Caption",
        70,
        "2024-01-03T09:00:00.000Z",
    )
    .expect("record day two");

    let days = db
        .list_daily_usage_since(user.id, "2024-01-01")
        .expect("list usage");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, "2024-01-03");
    assert_eq!(days[0].total_tokens, 70);
    assert_eq!(days[1].date, "2024-01-02");
    assert_eq!(days[1].total_tokens, 50);
}

#[test]
fn list_daily_usage_since_filters_older_days() {
    let mut test_db = setup_db();
    let user = seed_user(&test_db.db, "window@example.com");
    let db = &mut test_db.db;

    for day in ["2023-12-20", "2024-01-02", "2024-01-05"] {
        db.record_usage(
            user.id,
            day,
            "caption",
            "Caption",
            10,
            "2024-01-05T09:00:00.000Z",
        )
        .expect("record usage");
    }

    let days = db
        .list_daily_usage_since(user.id, "2024-01-01")
        .expect("list usage");
    let dates: Vec<&str> = days.iter().map(|day| day.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-05", "2024-01-02"]);
}

#[test]
fn usage_is_scoped_per_user() {
    let mut test_db = setup_db();
    let alice = seed_user(&test_db.db, "alice@example.com");
    let bob = seed_user(&test_db.db, "bob@example.com");
    let db = &mut test_db.db;

    db.record_usage(
        alice.id,
        "2024-01-03",
        "caption",
        "Caption",
        25,
        "2024-01-03T09:00:00.000Z",
    )
    .expect("record usage");

    let bobs = db
        .list_daily_usage_since(bob.id, "2024-01-01")
        .expect("list usage");
    assert!(bobs.is_empty());
}
