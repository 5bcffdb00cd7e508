mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Invalid version constraint: {0}")]
    InvalidConstraint(String),

    #[error("Failed fetching releases ({})", status_label(.status))]
    UpstreamUnavailable { status: Option<u16>, reason: String },

    #[error("Malformed release metadata: {0}")]
    MalformedRelease(String),

    #[error("No releases found upstream")]
    EmptyCatalog,

    #[error("No matching version found for '{0}'")]
    NoMatch(String),

    #[error("Version {version} is not available for {platform} and {arch}")]
    NoMatchingBuild {
        version: String,
        platform: String,
        arch: String,
        expected_name: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SetupError {
    /// HTTP status carried by an upstream failure, if the server answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            SetupError::UpstreamUnavailable { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "no response".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
