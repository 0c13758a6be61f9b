use serde::Deserialize;

use slate_common::MasterItem;

/// Outcome the legacy endpoint family reports inside a 200-status body.
/// `success: false` with a message is an ordinary, expected answer.
#[derive(Debug, Clone, Deserialize)]
pub struct Outcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Master list payload. A body without an `items` field is an empty list.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<MasterItem>,
}

/// Master create payload carrying the server-assigned id.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedResponse {
    pub id: String,
}

/// Shape of a master-family error body; only the message matters.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
