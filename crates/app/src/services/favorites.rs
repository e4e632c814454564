use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::now_rfc3339;
use stackly_core::FavoriteTool;

#[derive(Clone)]
pub struct FavoritesService {
    config: SharedConfig,
}

impl FavoritesService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn list(&self, user_id: i64) -> Result<Vec<FavoriteTool>> {
        let db = open_db(&self.config)?;
        Ok(db.list_favorites(user_id)?)
    }

    pub fn add(&self, user_id: i64, tool_id: &str, tool_name: &str) -> Result<FavoriteTool> {
        let tool_id = tool_id.trim();
        let tool_name = tool_name.trim();
        if tool_id.is_empty() || tool_name.is_empty() {
            return Err(AppError::InvalidInput(
                "tool_id and tool_name are required".to_string(),
            ));
        }
        let db = open_db(&self.config)?;
        if db.favorite_exists(user_id, tool_id)? {
            return Err(AppError::InvalidInput(
                "tool is already in favorites".to_string(),
            ));
        }
        let favorite = db.insert_favorite(user_id, tool_id, tool_name, &now_rfc3339())?;
        db.adjust_favorite_tools_count(user_id, 1)?;
        Ok(favorite)
    }

    pub fn remove(&self, user_id: i64, tool_id: &str) -> Result<()> {
        let db = open_db(&self.config)?;
        if db.delete_favorite(user_id, tool_id)? {
            db.adjust_favorite_tools_count(user_id, -1)?;
            Ok(())
        } else {
            Err(AppError::NotFound("favorite not found".to_string()))
        }
    }
}
