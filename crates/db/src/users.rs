use rusqlite::{OptionalExtension, Row, params};
use stackly_core::UserAccount;

use crate::Db;
use crate::error::{DbError, Result};

/// Account row joined with its credential material, for login checks.
#[derive(Debug, Clone)]
pub struct UserAuthRow {
    pub user: UserAccount,
    pub password_hash: String,
    pub password_salt: String,
}

const USER_COLUMNS: &str = "id, name, email, created_at, last_login_at, saved_outputs_count, \
     favorite_tools_count, daily_streak, last_streak_date, total_tokens_used";

impl Db {
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        password_salt: &str,
        now: &str,
    ) -> Result<UserAccount> {
        self.conn.execute(
            r#"
            INSERT INTO user_account (name, email, password_hash, password_salt, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![name, email, password_hash, password_salt, now],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_user_by_id(id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserAccount>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM user_account WHERE id = ?1"),
                params![id],
                row_to_user,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn get_user_auth_by_email(&self, email: &str) -> Result<Option<UserAuthRow>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {USER_COLUMNS}, password_hash, password_salt \
                     FROM user_account WHERE email = ?1"
                ),
                params![email],
                |row| {
                    Ok(UserAuthRow {
                        user: row_to_user(row)?,
                        password_hash: row.get(10)?,
                        password_salt: row.get(11)?,
                    })
                },
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn touch_last_login(&self, user_id: i64, now: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE user_account SET last_login_at = ?1 WHERE id = ?2",
            params![now, user_id],
        )?;
        Ok(())
    }

    pub fn add_tokens_used(&self, user_id: i64, tokens: u64) -> Result<()> {
        self.conn.execute(
            "UPDATE user_account SET total_tokens_used = total_tokens_used + ?1 WHERE id = ?2",
            params![tokens as i64, user_id],
        )?;
        Ok(())
    }

    pub fn set_streak(&self, user_id: i64, streak: u32, last_streak_date: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE user_account SET daily_streak = ?1, last_streak_date = ?2 WHERE id = ?3",
            params![streak as i64, last_streak_date, user_id],
        )?;
        Ok(())
    }

    pub fn adjust_saved_outputs_count(&self, user_id: i64, delta: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE user_account SET saved_outputs_count = saved_outputs_count + ?1 WHERE id = ?2",
            params![delta, user_id],
        )?;
        Ok(())
    }

    pub fn adjust_favorite_tools_count(&self, user_id: i64, delta: i64) -> Result<()> {
        self.conn.execute(
            "UPDATE user_account SET favorite_tools_count = favorite_tools_count + ?1 WHERE id = ?2",
            params![delta, user_id],
        )?;
        Ok(())
    }

    pub fn insert_session(&self, token: &str, user_id: i64, now: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token, user_id, now],
        )?;
        Ok(())
    }

    pub fn get_session_user(&self, token: &str) -> Result<Option<UserAccount>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {USER_COLUMNS} FROM user_account \
                     WHERE id = (SELECT user_id FROM session WHERE token = ?1)"
                ),
                params![token],
                row_to_user,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn delete_session(&self, token: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM session WHERE token = ?1", params![token])?;
        Ok(deleted > 0)
    }
}

fn row_to_user(row: &Row<'_>) -> std::result::Result<UserAccount, rusqlite::Error> {
    Ok(UserAccount {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
        last_login_at: row.get(4)?,
        saved_outputs_count: row.get(5)?,
        favorite_tools_count: row.get(6)?,
        daily_streak: row.get::<_, i64>(7)? as u32,
        last_streak_date: row.get(8)?,
        total_tokens_used: row.get::<_, i64>(9)? as u64,
    })
}
