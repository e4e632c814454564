use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use stackly_core::SavedOutputInput;

use crate::auth::{bearer_token, optional_user, require_user, unauthorized};
use crate::errors::HttpError;
use crate::requests::{
    AddFavoriteRequest, AnalyticsQuery, CreateItemRequest, DeleteOutputQuery, HistoryQuery,
    LoginRequest, RegisterRequest, RemoveFavoriteQuery, SaveOutputRequest, ToolInvokeRequest,
    UpdateItemRequest,
};
use crate::responses::{
    AnalyticsResponse, AuthResponse, FavoriteResponse, FavoritesResponse, HistoryListResponse,
    ItemResponse, ItemsResponse, OutputResponse, Pagination, ToolInvokeResponse, ToolListResponse,
    ToolSummary, ok,
};
use crate::state::HttpState;

const HISTORY_LIMIT_MAX: u32 = 200;
const ANALYTICS_WINDOW_MAX: u32 = 365;

/// One canonical content type; any body that fails strict JSON parsing is a
/// validation error.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            Some("invalid_input".to_string()),
        )),
    }
}

fn bad_request(message: &str) -> HttpError {
    HttpError::new(
        StatusCode::BAD_REQUEST,
        message,
        Some("invalid_input".to_string()),
    )
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn register(
    State(state): State<HttpState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = parse_body(payload)?;
    let (user, token) = state
        .app
        .services
        .accounts
        .register(&req.name, &req.email, &req.password)?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}

pub async fn login(
    State(state): State<HttpState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = parse_body(payload)?;
    let (user, token) = state
        .app
        .services
        .accounts
        .login(&req.email, &req.password)?;
    Ok(Json(AuthResponse {
        success: true,
        token,
        user,
    }))
}

pub async fn logout(
    State(state): State<HttpState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    let token = bearer_token(&headers).ok_or_else(unauthorized)?;
    state.app.services.accounts.logout(token)?;
    Ok(Json(ok()))
}

pub async fn tools_list(
    State(state): State<HttpState>,
) -> Result<impl IntoResponse, HttpError> {
    let tools = state
        .app
        .services
        .tools
        .list()?
        .into_iter()
        .map(ToolSummary::from)
        .collect();
    Ok(Json(ToolListResponse {
        success: true,
        tools,
    }))
}

pub async fn tools_invoke(
    State(state): State<HttpState>,
    Path(tool_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ToolInvokeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let tool = state.app.services.tools.get(&tool_id)?.ok_or_else(|| {
        HttpError::new(
            StatusCode::NOT_FOUND,
            "unknown tool",
            Some("not_found".to_string()),
        )
    })?;
    let req = parse_body(payload)?;
    let input = req.input.trim().to_string();
    if input.is_empty() {
        return Err(bad_request("input is required"));
    }
    if let Some(file_name) = req.file_name.as_deref() {
        tracing::info!(
            tool_id = %tool_id,
            file_name,
            file_type = req.file_type.as_deref().unwrap_or("image"),
            "processing uploaded file"
        );
    }
    let user = optional_user(&state, &headers);

    let prompt = format!("{}{}", tool.prompt, input);
    let completion = state
        .inference
        .complete(&prompt, req.image_url.as_deref())
        .await?;

    // Bookkeeping must never turn a successful invocation into a failed
    // response: run it detached and swallow errors after logging.
    if let (Some(user), Some(usage)) = (user, completion.usage) {
        let services = state.app.services.clone();
        let tool_name = tool.title.clone();
        let output = SavedOutputInput {
            tool_id: tool_id.clone(),
            tool_name: tool_name.clone(),
            input,
            image_url: req.image_url,
            file_name: req.file_name,
            result: completion.text.clone(),
            tokens_used: usage,
        };
        let _ = tokio::task::spawn_blocking(move || {
            if let Err(err) = services.history.save(user.id, output) {
                tracing::error!(user_id = user.id, tool_id = %tool_id, error = %err, "failed to save output");
            }
            if let Err(err) =
                services
                    .usage
                    .record(user.id, &tool_id, &tool_name, usage.total_tokens)
            {
                tracing::error!(user_id = user.id, tool_id = %tool_id, error = %err, "failed to record usage");
            }
        });
    }

    Ok(Json(ToolInvokeResponse {
        success: true,
        result: completion.text,
        usage: completion.usage,
    }))
}

pub async fn analytics(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let days = query.days.unwrap_or(30).clamp(1, ANALYTICS_WINDOW_MAX);
    let summary = state.app.services.analytics.snapshot(user.id, days)?;
    Ok(Json(AnalyticsResponse {
        success: true,
        analytics: summary.analytics,
        total_requests: summary.total_requests,
        total_tokens: summary.total_tokens,
        most_used_tools: summary.most_used_tools,
        daily_streak: summary.daily_streak,
        total_tokens_used: summary.total_tokens_used,
    }))
}

pub async fn history_list(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let limit = query.limit.unwrap_or(50).min(HISTORY_LIMIT_MAX);
    let skip = query.skip.unwrap_or(0);
    let page = state
        .app
        .services
        .history
        .list(user.id, query.tool_id.as_deref(), limit, skip)?;
    let has_more = (skip as u64) + (limit as u64) < page.total;
    Ok(Json(HistoryListResponse {
        success: true,
        outputs: page.outputs,
        pagination: Pagination {
            total: page.total,
            limit,
            skip,
            has_more,
        },
    }))
}

pub async fn history_save(
    State(state): State<HttpState>,
    headers: HeaderMap,
    payload: Result<Json<SaveOutputRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let req = parse_body(payload)?;
    let output = state.app.services.history.save(
        user.id,
        SavedOutputInput {
            tool_id: req.tool_id,
            tool_name: req.tool_name,
            input: req.input,
            image_url: req.image_url,
            file_name: req.file_name,
            result: req.result,
            tokens_used: req.tokens_used,
        },
    )?;
    Ok(Json(OutputResponse {
        success: true,
        output,
    }))
}

pub async fn history_delete(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Query(query): Query<DeleteOutputQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let id = query.id.ok_or_else(|| bad_request("output id is required"))?;
    state.app.services.history.delete(user.id, id)?;
    Ok(Json(ok()))
}

pub async fn favorites_list(
    State(state): State<HttpState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let favorites = state.app.services.favorites.list(user.id)?;
    Ok(Json(FavoritesResponse {
        success: true,
        favorites,
    }))
}

pub async fn favorites_add(
    State(state): State<HttpState>,
    headers: HeaderMap,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let req = parse_body(payload)?;
    let favorite = state
        .app
        .services
        .favorites
        .add(user.id, &req.tool_id, &req.tool_name)?;
    Ok(Json(FavoriteResponse {
        success: true,
        favorite,
    }))
}

pub async fn favorites_remove(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Query(query): Query<RemoveFavoriteQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let user = require_user(&state, &headers)?;
    let tool_id = query
        .tool_id
        .ok_or_else(|| bad_request("tool id is required"))?;
    state.app.services.favorites.remove(user.id, &tool_id)?;
    Ok(Json(ok()))
}

pub async fn items_list(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let items = state.app.services.items.list()?;
    Ok(Json(ItemsResponse {
        success: true,
        items,
    }))
}

pub async fn items_create(
    State(state): State<HttpState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = parse_body(payload)?;
    let item = state
        .app
        .services
        .items
        .create(&req.name, req.description.as_deref())?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            success: true,
            item,
        }),
    ))
}

pub async fn items_get(
    State(state): State<HttpState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let item = state.app.services.items.get(&id)?;
    Ok(Json(ItemResponse {
        success: true,
        item,
    }))
}

pub async fn items_update(
    State(state): State<HttpState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = parse_body(payload)?;
    let item = state
        .app
        .services
        .items
        .update(&id, req.name.as_deref(), req.description.as_deref())?;
    Ok(Json(ItemResponse {
        success: true,
        item,
    }))
}

pub async fn items_delete(
    State(state): State<HttpState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    state.app.services.items.delete(&id)?;
    Ok(Json(ok()))
}
