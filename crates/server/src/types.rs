use fakeartist::ArtistReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

/// The body of `POST /api/check-artist`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckArtistRequest {
    #[serde(default)]
    pub artist_name: Option<String>,
}

/// The report, optionally followed by the intermediate values when `?debug=true`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckArtistResponse {
    #[serde(flatten)]
    pub report: ArtistReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}
