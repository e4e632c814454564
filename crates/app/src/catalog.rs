use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{AppError, Result};
use stackly_core::ToolConfig;

/// Load the tool catalog, preferring the editable defaults file when present.
pub fn load_tool_catalog(path: &Path) -> Result<Vec<ToolConfig>> {
    if path.exists() {
        load_tools_file(path)
    } else {
        load_default_tools()
    }
}

pub fn load_tools_file(path: &Path) -> Result<Vec<ToolConfig>> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(AppError::from)
}

pub fn load_default_tools() -> Result<Vec<ToolConfig>> {
    let data = include_str!("../default-tools.json");
    serde_json::from_str(data).map_err(AppError::from)
}

pub fn write_tool_defaults(path: &Path, tools: &[ToolConfig]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, tools).map_err(AppError::from)
}

/// Materialize the built-in catalog to an editable file on first run.
pub fn sync_tool_defaults(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let tools = load_default_tools()?;
    write_tool_defaults(path, &tools)
}
