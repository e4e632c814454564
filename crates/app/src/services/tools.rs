use crate::catalog;
use crate::error::Result;
use crate::services::SharedConfig;
use stackly_core::ToolConfig;

#[derive(Clone)]
pub struct ToolsService {
    config: SharedConfig,
}

impl ToolsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn list(&self) -> Result<Vec<ToolConfig>> {
        catalog::load_tool_catalog(&self.config.tools_path)
    }

    pub fn get(&self, tool_id: &str) -> Result<Option<ToolConfig>> {
        Ok(self.list()?.into_iter().find(|tool| tool.id == tool_id))
    }
}
