use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::now_rfc3339;
use stackly_core::{SavedOutput, SavedOutputInput};

/// One page of saved outputs plus the total row count for pagination.
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub outputs: Vec<SavedOutput>,
    pub total: u64,
}

#[derive(Clone)]
pub struct HistoryService {
    config: SharedConfig,
}

impl HistoryService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn list(
        &self,
        user_id: i64,
        tool_id: Option<&str>,
        limit: u32,
        skip: u32,
    ) -> Result<HistoryPage> {
        let db = open_db(&self.config)?;
        let outputs = db.list_saved_outputs(user_id, tool_id, limit, skip)?;
        let total = db.count_saved_outputs(user_id, tool_id)?;
        Ok(HistoryPage { outputs, total })
    }

    pub fn save(&self, user_id: i64, output: SavedOutputInput) -> Result<SavedOutput> {
        if output.tool_id.trim().is_empty()
            || output.tool_name.trim().is_empty()
            || output.input.trim().is_empty()
            || output.result.trim().is_empty()
        {
            return Err(AppError::InvalidInput(
                "tool_id, tool_name, input and result are required".to_string(),
            ));
        }
        let db = open_db(&self.config)?;
        let saved = db.insert_saved_output(user_id, &output, &now_rfc3339())?;
        db.adjust_saved_outputs_count(user_id, 1)?;
        Ok(saved)
    }

    pub fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let db = open_db(&self.config)?;
        if db.delete_saved_output(user_id, id)? {
            db.adjust_saved_outputs_count(user_id, -1)?;
            Ok(())
        } else {
            Err(AppError::NotFound("output not found".to_string()))
        }
    }
}
