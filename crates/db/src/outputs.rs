use rusqlite::{OptionalExtension, Row, params};
use stackly_core::{SavedOutput, SavedOutputInput, TokenUsage};

use crate::Db;
use crate::error::{DbError, Result};

const OUTPUT_COLUMNS: &str = "id, tool_id, tool_name, input, image_url, file_name, result, \
     prompt_tokens, completion_tokens, total_tokens, created_at";

impl Db {
    pub fn insert_saved_output(
        &self,
        user_id: i64,
        output: &SavedOutputInput,
        now: &str,
    ) -> Result<SavedOutput> {
        self.conn.execute(
            r#"
            INSERT INTO saved_output (
              user_id, tool_id, tool_name, input, image_url, file_name, result,
              prompt_tokens, completion_tokens, total_tokens, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                user_id,
                output.tool_id,
                output.tool_name,
                output.input,
                output.image_url,
                output.file_name,
                output.result,
                output.tokens_used.prompt_tokens as i64,
                output.tokens_used.completion_tokens as i64,
                output.tokens_used.total_tokens as i64,
                now,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_saved_output(user_id, id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_saved_output(&self, user_id: i64, id: i64) -> Result<Option<SavedOutput>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {OUTPUT_COLUMNS} FROM saved_output WHERE id = ?1 AND user_id = ?2"
                ),
                params![id, user_id],
                row_to_saved_output,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn list_saved_outputs(
        &self,
        user_id: i64,
        tool_id: Option<&str>,
        limit: u32,
        skip: u32,
    ) -> Result<Vec<SavedOutput>> {
        let mut sql = format!("SELECT {OUTPUT_COLUMNS} FROM saved_output WHERE user_id = ?1");
        if tool_id.is_some() {
            sql.push_str(" AND tool_id = ?2 ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4");
        } else {
            sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3");
        }
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = if let Some(tool_id) = tool_id {
            stmt.query_map(params![user_id, tool_id, limit, skip], row_to_saved_output)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        } else {
            stmt.query_map(params![user_id, limit, skip], row_to_saved_output)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        };
        Ok(rows)
    }

    pub fn count_saved_outputs(&self, user_id: i64, tool_id: Option<&str>) -> Result<u64> {
        let count: i64 = if let Some(tool_id) = tool_id {
            self.conn.query_row(
                "SELECT COUNT(*) FROM saved_output WHERE user_id = ?1 AND tool_id = ?2",
                params![user_id, tool_id],
                |row| row.get(0),
            )?
        } else {
            self.conn.query_row(
                "SELECT COUNT(*) FROM saved_output WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )?
        };
        Ok(count as u64)
    }

    pub fn delete_saved_output(&self, user_id: i64, id: i64) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM saved_output WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}

fn row_to_saved_output(row: &Row<'_>) -> std::result::Result<SavedOutput, rusqlite::Error> {
    Ok(SavedOutput {
        id: row.get(0)?,
        tool_id: row.get(1)?,
        tool_name: row.get(2)?,
        input: row.get(3)?,
        image_url: row.get(4)?,
        file_name: row.get(5)?,
        result: row.get(6)?,
        tokens_used: TokenUsage {
            prompt_tokens: row.get::<_, i64>(7)? as u64,
            completion_tokens: row.get::<_, i64>(8)? as u64,
            total_tokens: row.get::<_, i64>(9)? as u64,
        },
        created_at: row.get(10)?,
    })
}
