use rusqlite::{OptionalExtension, Row, params};
use stackly_core::Item;

use crate::Db;
use crate::error::{DbError, Result};

impl Db {
    pub fn insert_item(&self, item: &Item) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO item (id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                item.id,
                item.name,
                item.description,
                item.created_at,
                item.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn get_item(&self, id: &str) -> Result<Option<Item>> {
        self.conn
            .query_row(
                "SELECT id, name, description, created_at, updated_at FROM item WHERE id = ?1",
                params![id],
                row_to_item,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn list_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM item
            ORDER BY created_at DESC, id DESC
            "#,
        )?;
        let rows = stmt
            .query_map([], row_to_item)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Update only the supplied fields; returns None when the id is absent.
    pub fn update_item(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        now: &str,
    ) -> Result<Option<Item>> {
        let updated = self.conn.execute(
            r#"
            UPDATE item
            SET name = COALESCE(?1, name),
                description = COALESCE(?2, description),
                updated_at = ?3
            WHERE id = ?4
            "#,
            params![name, description, now, id],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.get_item(id)
    }

    pub fn delete_item(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM item WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

fn row_to_item(row: &Row<'_>) -> std::result::Result<Item, rusqlite::Error> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
