use serde::Deserialize;
use stackly_core::TokenUsage;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolInvokeRequest {
    pub input: String,
    pub image_url: Option<String>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveOutputRequest {
    pub tool_id: String,
    pub tool_name: String,
    pub input: String,
    pub image_url: Option<String>,
    pub file_name: Option<String>,
    pub result: String,
    pub tokens_used: TokenUsage,
}

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub tool_id: String,
    pub tool_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub tool_id: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOutputQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFavoriteQuery {
    pub tool_id: Option<String>,
}
