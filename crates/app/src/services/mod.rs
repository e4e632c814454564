mod accounts;
mod analytics;
mod favorites;
mod history;
mod items;
mod tools;
mod usage;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use stackly_db::Db;

pub use accounts::AccountsService;
pub use analytics::AnalyticsService;
pub use favorites::FavoritesService;
pub use history::{HistoryPage, HistoryService};
pub use items::{ItemsService, MemoryItemStore};
pub use tools::ToolsService;
pub use usage::UsageService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub accounts: AccountsService,
    pub usage: UsageService,
    pub analytics: AnalyticsService,
    pub history: HistoryService,
    pub favorites: FavoritesService,
    pub items: ItemsService,
    pub tools: ToolsService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        // One ephemeral store per process, shared by every service clone.
        let memory_items = MemoryItemStore::default();
        Self {
            accounts: AccountsService::new(shared.clone()),
            usage: UsageService::new(shared.clone()),
            analytics: AnalyticsService::new(shared.clone()),
            history: HistoryService::new(shared.clone()),
            favorites: FavoritesService::new(shared.clone()),
            items: ItemsService::new(shared.clone(), memory_items),
            tools: ToolsService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
