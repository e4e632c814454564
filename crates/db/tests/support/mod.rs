#![allow(dead_code)]

use std::path::PathBuf;

use stackly_core::{SavedOutputInput, TokenUsage, UserAccount};
use stackly_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn seed_user(db: &Db, email: &str) -> UserAccount {
    db.create_user(
        "Test User",
        email,
        "deadbeef",
        "cafe",
        "2024-01-01T00:00:00.000Z",
    )
    .expect("create user")
}

pub fn make_output(tool_id: &str, total_tokens: u64) -> SavedOutputInput {
    SavedOutputInput {
        tool_id: tool_id.to_string(),
        tool_name: tool_id.to_uppercase(),
        input: "an input".to_string(),
        image_url: None,
        file_name: None,
        result: "a result".to_string(),
        tokens_used: TokenUsage {
            prompt_tokens: total_tokens / 2,
            completion_tokens: total_tokens - total_tokens / 2,
            total_tokens,
        },
    }
}
