use serde::{Deserialize, Serialize};

/// Query parameters accepted by the listing endpoint. All optional; they
/// arrive as raw strings and are interpreted by the query engine so that
/// invalid values produce the documented messages rather than extractor
/// rejections.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub completed: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// The uniform error body for 4xx/5xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
