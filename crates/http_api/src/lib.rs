mod auth;
mod errors;
mod handlers;
mod requests;
mod responses;
mod state;

use axum::{
    Router,
    routing::{get, post},
};

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/tools", get(handlers::tools_list))
        .route("/api/tools/:tool_id", post(handlers::tools_invoke))
        .route("/api/analytics", get(handlers::analytics))
        .route(
            "/api/history",
            get(handlers::history_list)
                .post(handlers::history_save)
                .delete(handlers::history_delete),
        )
        .route(
            "/api/favorites",
            get(handlers::favorites_list)
                .post(handlers::favorites_add)
                .delete(handlers::favorites_remove),
        )
        .route(
            "/api/items",
            get(handlers::items_list).post(handlers::items_create),
        )
        .route(
            "/api/items/:id",
            get(handlers::items_get)
                .put(handlers::items_update)
                .delete(handlers::items_delete),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests;
