use rusqlite::params;
use stackly_core::{DailyUsage, ToolUsage};

use crate::Db;
use crate::error::Result;

impl Db {
    /// Apply one usage event to the (user, day) aggregate.
    ///
    /// Creates the aggregate lazily, bumps the matching tool entry or
    /// appends a new one, and keeps `total_requests` equal to the sum of
    /// the per-tool counts. The whole read-modify-write runs in one
    /// transaction.
    pub fn record_usage(
        &mut self,
        user_id: i64,
        day: &str,
        tool_id: &str,
        tool_name: &str,
        tokens_used: u64,
        now: &str,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO daily_usage (user_id, date) VALUES (?1, ?2)",
            params![user_id, day],
        )?;
        let daily_id: i64 = tx.query_row(
            "SELECT id FROM daily_usage WHERE user_id = ?1 AND date = ?2",
            params![user_id, day],
            |row| row.get(0),
        )?;
        let bumped = tx.execute(
            r#"
            UPDATE daily_tool_usage SET count = count + 1, last_used_at = ?1
            WHERE daily_usage_id = ?2 AND tool_id = ?3
            "#,
            params![now, daily_id, tool_id],
        )?;
        if bumped == 0 {
            tx.execute(
                r#"
                INSERT INTO daily_tool_usage (daily_usage_id, tool_id, tool_name, count, last_used_at)
                VALUES (?1, ?2, ?3, 1, ?4)
                "#,
                params![daily_id, tool_id, tool_name, now],
            )?;
        }
        tx.execute(
            r#"
            UPDATE daily_usage
            SET total_requests = total_requests + 1, total_tokens = total_tokens + ?1
            WHERE id = ?2
            "#,
            params![tokens_used as i64, daily_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Aggregates for a user with `date >= start_day`, newest first.
    /// Tool entries keep their append order within each day.
    pub fn list_daily_usage_since(&self, user_id: i64, start_day: &str) -> Result<Vec<DailyUsage>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, date, total_requests, total_tokens
            FROM daily_usage
            WHERE user_id = ?1 AND date >= ?2
            ORDER BY date DESC
            "#,
        )?;
        let headers = stmt
            .query_map(params![user_id, start_day], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut tool_stmt = self.conn.prepare(
            r#"
            SELECT tool_id, tool_name, count, last_used_at
            FROM daily_tool_usage
            WHERE daily_usage_id = ?1
            ORDER BY id ASC
            "#,
        )?;
        let mut days = Vec::with_capacity(headers.len());
        for (id, date, total_requests, total_tokens) in headers {
            let tools_used = tool_stmt
                .query_map(params![id], |row| {
                    Ok(ToolUsage {
                        tool_id: row.get(0)?,
                        tool_name: row.get(1)?,
                        count: row.get::<_, i64>(2)? as u64,
                        last_used_at: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            days.push(DailyUsage {
                date,
                tools_used,
                total_requests: total_requests as u64,
                total_tokens: total_tokens as u64,
            });
        }
        Ok(days)
    }
}
