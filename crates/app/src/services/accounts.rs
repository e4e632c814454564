use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::now_rfc3339;
use stackly_core::UserAccount;
use stackly_db::Db;

#[derive(Clone)]
pub struct AccountsService {
    config: SharedConfig,
}

impl AccountsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<(UserAccount, String)> {
        let name = name.trim();
        let chars = name.chars().count();
        if !(2..=50).contains(&chars) {
            return Err(AppError::InvalidInput(
                "name must be between 2 and 50 characters".to_string(),
            ));
        }
        let email = email.trim().to_ascii_lowercase();
        if !is_plausible_email(&email) {
            return Err(AppError::InvalidInput(
                "a valid email is required".to_string(),
            ));
        }
        if password.chars().count() < 6 {
            return Err(AppError::InvalidInput(
                "password must be at least 6 characters".to_string(),
            ));
        }

        let db = self.db()?;
        if db.get_user_auth_by_email(&email)?.is_some() {
            return Err(AppError::InvalidInput(
                "email is already registered".to_string(),
            ));
        }
        let salt = random_hex(16);
        let hash = hash_password(&salt, password);
        let user = db.create_user(name, &email, &hash, &salt, &now_rfc3339())?;
        tracing::info!(user_id = user.id, "registered user");
        let token = issue_session(&db, user.id)?;
        Ok((user, token))
    }

    pub fn login(&self, email: &str, password: &str) -> Result<(UserAccount, String)> {
        let email = email.trim().to_ascii_lowercase();
        let db = self.db()?;
        let auth = db
            .get_user_auth_by_email(&email)?
            .ok_or(AppError::Unauthorized)?;
        if hash_password(&auth.password_salt, password) != auth.password_hash {
            return Err(AppError::Unauthorized);
        }
        db.touch_last_login(auth.user.id, &now_rfc3339())?;
        let token = issue_session(&db, auth.user.id)?;
        let user = db
            .get_user_by_id(auth.user.id)?
            .ok_or(AppError::Unauthorized)?;
        Ok((user, token))
    }

    pub fn authenticate(&self, token: &str) -> Result<Option<UserAccount>> {
        Ok(self.db()?.get_session_user(token)?)
    }

    pub fn logout(&self, token: &str) -> Result<bool> {
        Ok(self.db()?.delete_session(token)?)
    }
}

fn issue_session(db: &Db, user_id: i64) -> Result<String> {
    let token = random_hex(32);
    db.insert_session(&token, user_id, &now_rfc3339())?;
    Ok(token)
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(char::is_whitespace)
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    buf.iter().map(|byte| format!("{:02x}", byte)).collect()
}
