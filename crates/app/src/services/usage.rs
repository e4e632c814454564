use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::{format_day, now_rfc3339, parse_day, today_local};
use stackly_core::advance_streak;
use stackly_db::Db;

#[derive(Clone)]
pub struct UsageService {
    config: SharedConfig,
}

impl UsageService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Record one usage event: update today's aggregate, bump the user's
    /// all-time token counter, and advance the daily streak.
    ///
    /// Each call counts as one new event; idempotency is not guaranteed.
    pub fn record(
        &self,
        user_id: i64,
        tool_id: &str,
        tool_name: &str,
        tokens_used: u64,
    ) -> Result<()> {
        let mut db = open_db(&self.config)?;
        let today = today_local();
        record_on(&mut db, user_id, tool_id, tool_name, tokens_used, today)
    }
}

fn record_on(
    db: &mut Db,
    user_id: i64,
    tool_id: &str,
    tool_name: &str,
    tokens_used: u64,
    today: NaiveDate,
) -> Result<()> {
    let day = format_day(today);
    let now = now_rfc3339();
    db.record_usage(user_id, &day, tool_id, tool_name, tokens_used, &now)?;
    db.add_tokens_used(user_id, tokens_used)?;

    let user = db
        .get_user_by_id(user_id)?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
    let last = match user.last_streak_date.as_deref() {
        Some(value) => Some(parse_day(value)?),
        None => None,
    };
    let (streak, last_day) = advance_streak(user.daily_streak, last, today);
    let last_day = format_day(last_day);
    if streak != user.daily_streak || Some(last_day.as_str()) != user.last_streak_date.as_deref() {
        db.set_streak(user_id, streak, &last_day)?;
    }
    Ok(())
}
