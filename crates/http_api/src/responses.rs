use serde::Serialize;
use stackly_core::{
    DailyUsage, FavoriteTool, Item, ModelKind, SavedOutput, TokenUsage, ToolConfig,
    ToolUsageTotal, UserAccount,
};

#[derive(Serialize)]
pub struct OkResponse {
    pub success: bool,
}

pub fn ok() -> OkResponse {
    OkResponse { success: true }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserAccount,
}

/// Catalog entry as exposed to clients; the prompt template stays
/// server-side.
#[derive(Serialize)]
pub struct ToolSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub placeholder: String,
    pub category: Option<String>,
    pub model: ModelKind,
}

impl From<ToolConfig> for ToolSummary {
    fn from(tool: ToolConfig) -> Self {
        Self {
            id: tool.id,
            title: tool.title,
            description: tool.description,
            placeholder: tool.placeholder,
            category: tool.category,
            model: tool.model,
        }
    }
}

#[derive(Serialize)]
pub struct ToolListResponse {
    pub success: bool,
    pub tools: Vec<ToolSummary>,
}

#[derive(Serialize)]
pub struct ToolInvokeResponse {
    pub success: bool,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

#[derive(Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: Vec<DailyUsage>,
    pub total_requests: u64,
    pub total_tokens: u64,
    pub most_used_tools: Vec<ToolUsageTotal>,
    pub daily_streak: u32,
    pub total_tokens_used: u64,
}

#[derive(Serialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub skip: u32,
    pub has_more: bool,
}

#[derive(Serialize)]
pub struct HistoryListResponse {
    pub success: bool,
    pub outputs: Vec<SavedOutput>,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct OutputResponse {
    pub success: bool,
    pub output: SavedOutput,
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub success: bool,
    pub favorites: Vec<FavoriteTool>,
}

#[derive(Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub favorite: FavoriteTool,
}

#[derive(Serialize)]
pub struct ItemsResponse {
    pub success: bool,
    pub items: Vec<Item>,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub success: bool,
    pub item: Item,
}
