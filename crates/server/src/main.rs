use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use http_api::HttpState;
use stackly_app::{AppPaths, AppState, InferenceClient, InferenceConfig, ensure_app_data_dir};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let paths = AppPaths::new(resolve_app_data_dir());
    if let Err(err) = ensure_app_data_dir(&paths) {
        tracing::error!(error = %err, "failed to create app data dir");
        std::process::exit(1);
    }

    let app_state = AppState::new(paths.db_path.clone(), paths.tools_path.clone());
    if let Err(err) = app_state.initialize() {
        tracing::error!(error = %err, "failed to initialize application state");
        std::process::exit(1);
    }

    let inference_config = InferenceConfig::from_env();
    if inference_config.api_key.is_none() {
        tracing::warn!("STACKLY_API_KEY is not set; tool invocations will fail");
    }
    let inference = match InferenceClient::new(inference_config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::error!(error = %err, "failed to build inference client");
            std::process::exit(1);
        }
    };

    let state = HttpState::new(app_state, inference);
    let app = http_api::router(state);

    let addr = std::env::var("STACKLY_ADDR").unwrap_or_else(|_| "127.0.0.1:3030".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind server");
    tracing::info!(%addr, db_path = %paths.db_path.display(), "listening");
    axum::serve(listener, app).await.expect("serve");
}

fn resolve_app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STACKLY_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    std::env::current_dir()
        .map(|dir| dir.join("data"))
        .unwrap_or_else(|_| PathBuf::from("data"))
}
