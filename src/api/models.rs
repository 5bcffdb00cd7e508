use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One element of the `GET /repos/{owner}/{repo}/releases` response.
///
/// Only the fields the resolver relies on are required; a record without
/// `tag_name` or `assets` fails deserialization of the whole listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub tag_name: String,
    pub assets: Vec<AssetRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    pub name: String,
    pub browser_download_url: String,
}
