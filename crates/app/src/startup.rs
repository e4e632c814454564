use std::path::PathBuf;

use crate::Result;

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub db_path: PathBuf,
    pub tools_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let db_path = app_data_dir.join("stackly.sqlite");
        let tools_path = app_data_dir.join("stackly-tools.json");
        Self {
            app_data_dir,
            db_path,
            tools_path,
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    Ok(())
}
