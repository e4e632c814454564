use rusqlite::{Row, params};
use stackly_core::FavoriteTool;

use crate::Db;
use crate::error::{DbError, Result};

impl Db {
    pub fn list_favorites(&self, user_id: i64) -> Result<Vec<FavoriteTool>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, tool_id, tool_name, added_at
            FROM favorite_tool
            WHERE user_id = ?1
            ORDER BY added_at DESC, id DESC
            "#,
        )?;
        let rows = stmt
            .query_map(params![user_id], row_to_favorite)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn favorite_exists(&self, user_id: i64, tool_id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM favorite_tool WHERE user_id = ?1 AND tool_id = ?2",
            params![user_id, tool_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn insert_favorite(
        &self,
        user_id: i64,
        tool_id: &str,
        tool_name: &str,
        now: &str,
    ) -> Result<FavoriteTool> {
        self.conn.execute(
            r#"
            INSERT INTO favorite_tool (user_id, tool_id, tool_name, added_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![user_id, tool_id, tool_name, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.conn
            .query_row(
                "SELECT id, tool_id, tool_name, added_at FROM favorite_tool WHERE id = ?1",
                params![id],
                row_to_favorite,
            )
            .map_err(DbError::from)
    }

    pub fn delete_favorite(&self, user_id: i64, tool_id: &str) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM favorite_tool WHERE user_id = ?1 AND tool_id = ?2",
            params![user_id, tool_id],
        )?;
        Ok(deleted > 0)
    }
}

fn row_to_favorite(row: &Row<'_>) -> std::result::Result<FavoriteTool, rusqlite::Error> {
    Ok(FavoriteTool {
        id: row.get(0)?,
        tool_id: row.get(1)?,
        tool_name: row.get(2)?,
        added_at: row.get(3)?,
    })
}
