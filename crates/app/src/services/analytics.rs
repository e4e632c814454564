use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::{format_day, today_local, window_start};
use stackly_core::{AnalyticsSummary, fold_tool_usage};

#[derive(Clone)]
pub struct AnalyticsService {
    config: SharedConfig,
}

impl AnalyticsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Windowed usage summary for one user: per-day aggregates newest first,
    /// window totals, top tools, and the user's streak and all-time token
    /// count. Always recomputed; nothing is cached.
    pub fn snapshot(&self, user_id: i64, window_days: u32) -> Result<AnalyticsSummary> {
        let db = open_db(&self.config)?;
        let user = db
            .get_user_by_id(user_id)?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        let start = window_start(today_local(), window_days);
        let analytics = db.list_daily_usage_since(user_id, &format_day(start))?;
        let total_requests = analytics.iter().map(|day| day.total_requests).sum();
        let total_tokens = analytics.iter().map(|day| day.total_tokens).sum();
        let most_used_tools = fold_tool_usage(&analytics);
        Ok(AnalyticsSummary {
            analytics,
            total_requests,
            total_tokens,
            most_used_tools,
            daily_streak: user.daily_streak,
            total_tokens_used: user.total_tokens_used,
        })
    }
}
