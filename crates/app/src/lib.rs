pub mod app;
pub mod catalog;
pub mod error;
pub mod inference;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use catalog::{load_default_tools, load_tool_catalog, sync_tool_defaults, write_tool_defaults};
pub use error::{ApiError, AppError, Result};
pub use inference::{Completion, InferenceClient, InferenceConfig};
pub use services::{AppServices, HistoryPage, MemoryItemStore};
pub use startup::{AppPaths, ensure_app_data_dir};
