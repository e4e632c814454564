use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUsage {
    pub tool_id: String,
    pub tool_name: String,
    pub count: u64,
    pub last_used_at: String,
}

/// Per-user, per-calendar-day rollup of tool invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub date: String,
    pub tools_used: Vec<ToolUsage>,
    pub total_requests: u64,
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUsageTotal {
    pub tool_id: String,
    pub tool_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
    pub saved_outputs_count: i64,
    pub favorite_tools_count: i64,
    pub daily_streak: u32,
    pub last_streak_date: Option<String>,
    pub total_tokens_used: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOutput {
    pub id: i64,
    pub tool_id: String,
    pub tool_name: String,
    pub input: String,
    pub image_url: Option<String>,
    pub file_name: Option<String>,
    pub result: String,
    pub tokens_used: TokenUsage,
    pub created_at: String,
}

/// Insert-side twin of [`SavedOutput`]; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOutputInput {
    pub tool_id: String,
    pub tool_name: String,
    pub input: String,
    pub image_url: Option<String>,
    pub file_name: Option<String>,
    pub result: String,
    pub tokens_used: TokenUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteTool {
    pub id: i64,
    pub tool_id: String,
    pub tool_name: String,
    pub added_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Text,
    Vision,
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::Text
    }
}

/// One catalog entry: a prompt template plus model-selection policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub id: String,
    pub title: String,
    pub description: String,
    pub prompt: String,
    pub placeholder: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub model: ModelKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub analytics: Vec<DailyUsage>,
    pub total_requests: u64,
    pub total_tokens: u64,
    pub most_used_tools: Vec<ToolUsageTotal>,
    pub daily_streak: u32,
    pub total_tokens_used: u64,
}

/// Maximum number of tools reported by [`fold_tool_usage`].
pub const MOST_USED_TOOLS_LIMIT: usize = 10;

/// Advance a consecutive-day usage streak given the day being recorded.
///
/// Day-granularity state machine over the last recorded streak date:
/// a first recording starts the streak at 1, a second recording on the
/// same day changes nothing, a recording on the day after the last one
/// extends the streak, and any longer gap resets it to 1. A future-dated
/// `last_day` is left untouched; the streak never decrements.
pub fn advance_streak(
    current: u32,
    last_day: Option<NaiveDate>,
    today: NaiveDate,
) -> (u32, NaiveDate) {
    let Some(last) = last_day else {
        return (1, today);
    };
    if last == today {
        return (current, last);
    }
    if last > today {
        return (current, last);
    }
    match today.pred_opt() {
        Some(yesterday) if last == yesterday => (current.saturating_add(1), today),
        _ => (1, today),
    }
}

/// Fold per-day tool usage into per-tool totals across the window.
///
/// `days` is expected newest-first; the retained tool name is the one from
/// the most recent day a tool appears in. The result is sorted descending
/// by count (ties keep first-seen order) and truncated to
/// [`MOST_USED_TOOLS_LIMIT`].
pub fn fold_tool_usage(days: &[DailyUsage]) -> Vec<ToolUsageTotal> {
    let mut totals: Vec<ToolUsageTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for day in days {
        for tool in &day.tools_used {
            match index.get(&tool.tool_id) {
                Some(&at) => totals[at].count += tool.count,
                None => {
                    index.insert(tool.tool_id.clone(), totals.len());
                    totals.push(ToolUsageTotal {
                        tool_id: tool.tool_id.clone(),
                        tool_name: tool.tool_name.clone(),
                        count: tool.count,
                    });
                }
            }
        }
    }
    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals.truncate(MOST_USED_TOOLS_LIMIT);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("date")
    }

    fn usage_day(date: &str, tools: &[(&str, u64)]) -> DailyUsage {
        let tools_used = tools
            .iter()
            .map(|(id, count)| ToolUsage {
                tool_id: id.to_string(),
                tool_name: id.to_uppercase(),
                count: *count,
                last_used_at: format!("{date}T12:00:00.000Z"),
            })
            .collect::<Vec<_>>();
        let total_requests = tools_used.iter().map(|tool| tool.count).sum();
        DailyUsage {
            date: date.to_string(),
            tools_used,
            total_requests,
            total_tokens: 0,
        }
    }

    #[test]
    fn streak_starts_at_one_without_prior_date() {
        assert_eq!(advance_streak(0, None, day("2024-01-03")), (1, day("2024-01-03")));
    }

    #[test]
    fn streak_is_idempotent_within_a_day() {
        let today = day("2024-01-03");
        let (streak, last) = advance_streak(4, Some(today), today);
        assert_eq!(streak, 4);
        assert_eq!(last, today);
    }

    #[test]
    fn streak_extends_on_consecutive_days() {
        let mut streak = 0;
        let mut last = None;
        for date in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            let (next, next_last) = advance_streak(streak, last, day(date));
            streak = next;
            last = Some(next_last);
        }
        assert_eq!(streak, 3);
        assert_eq!(last, Some(day("2024-01-03")));
    }

    #[test]
    fn streak_resets_after_a_gap_day() {
        let (streak, last) = advance_streak(5, Some(day("2024-01-01")), day("2024-01-03"));
        assert_eq!(streak, 1);
        assert_eq!(last, day("2024-01-03"));
    }

    #[test]
    fn streak_ignores_future_dated_marker() {
        let (streak, last) = advance_streak(5, Some(day("2024-01-10")), day("2024-01-03"));
        assert_eq!(streak, 5);
        assert_eq!(last, day("2024-01-10"));
    }

    #[test]
    fn streak_handles_month_boundaries() {
        let (streak, last) = advance_streak(2, Some(day("2024-01-31")), day("2024-02-01"));
        assert_eq!(streak, 3);
        assert_eq!(last, day("2024-02-01"));
    }

    #[test]
    fn fold_accumulates_counts_across_days() {
        let days = vec![
            usage_day("2024-01-03", &[("caption", 2), ("outline", 1)]),
            usage_day("2024-01-02", &[("caption", 3)]),
        ];
        let totals = fold_tool_usage(&days);
        assert_eq!(totals[0].tool_id, "caption");
        assert_eq!(totals[0].count, 5);
        assert_eq!(totals[1].tool_id, "outline");
        assert_eq!(totals[1].count, 1);
    }

    #[test]
    fn fold_is_sorted_non_increasing_and_capped() {
        let tools: Vec<(String, u64)> = (0..15)
            .map(|n| (format!("tool-{n}"), (n as u64) + 1))
            .collect();
        let borrowed: Vec<(&str, u64)> = tools
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        let days = vec![usage_day("2024-01-03", &borrowed)];
        let totals = fold_tool_usage(&days);
        assert_eq!(totals.len(), MOST_USED_TOOLS_LIMIT);
        for pair in totals.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        assert_eq!(totals[0].count, 15);
    }

    #[test]
    fn fold_breaks_ties_by_first_seen_order() {
        let days = vec![usage_day("2024-01-03", &[("beta", 2), ("alpha", 2)])];
        let totals = fold_tool_usage(&days);
        assert_eq!(totals[0].tool_id, "beta");
        assert_eq!(totals[1].tool_id, "alpha");
    }

    #[test]
    fn fold_keeps_name_from_most_recent_day() {
        let mut newest = usage_day("2024-01-03", &[("caption", 1)]);
        newest.tools_used[0].tool_name = "Caption Generator".to_string();
        let mut older = usage_day("2024-01-02", &[("caption", 4)]);
        older.tools_used[0].tool_name = "Old Caption Name".to_string();
        let totals = fold_tool_usage(&[newest, older]);
        assert_eq!(totals[0].tool_name, "Caption Generator");
        assert_eq!(totals[0].count, 5);
    }
}
