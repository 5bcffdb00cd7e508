//! Client for the GitHub releases listing.

mod client;
mod models;

pub use client::{ApiClient, DEFAULT_REPOSITORY, GITHUB_API_BASE};
pub use models::{AssetRecord, ReleaseRecord};
