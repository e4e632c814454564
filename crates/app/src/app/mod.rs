use std::path::PathBuf;

use crate::catalog;
use crate::error::{AppError, Result};
use crate::services::AppServices;
use stackly_db::Db;

/// Paths and files needed to run the backend.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub tools_path: PathBuf,
}

/// Application state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf, tools_path: PathBuf) -> Self {
        let config = AppConfig {
            db_path,
            tools_path,
        };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn initialize(&self) -> Result<()> {
        self.setup_db()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))?;
        catalog::sync_tool_defaults(&self.config.tools_path)?;
        Ok(())
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
