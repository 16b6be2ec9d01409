use serde::{Deserialize, Serialize};

/// Fields default to empty so a missing field hits the same validation
/// branch as an empty one.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
    pub language: String,
}
