// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::SetupError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a SetupError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a SetupError) -> Self {
        let (suggestion, details) = match error {
            SetupError::InvalidConstraint(_) => {
                let suggestion = Some(
                    "Use 'latest', a version such as '1.6.2', or a range such as '~1.6' or \
                     '>=1.5.0 <1.7.0'. See https://semver.org/spec/v2.0.0.html"
                        .to_string(),
                );
                (suggestion, None)
            }
            SetupError::UpstreamUnavailable { status, reason } => {
                let suggestion = match status {
                    Some(401) | Some(403) | Some(429) => Some(
                        "The GitHub API may be rate limiting anonymous requests. Pass \
                         --github-token or set GITHUB_TOKEN."
                            .to_string(),
                    ),
                    Some(404) => Some(
                        "The releases endpoint was not found. Check 'api.repository' and \
                         'api.base_url' in your configuration."
                            .to_string(),
                    ),
                    Some(500..=599) => {
                        Some("GitHub reported a server error. Please try again later.".to_string())
                    }
                    _ => Some("Check your internet connection and proxy settings.".to_string()),
                };
                let details = Some(reason.clone());
                (suggestion, details)
            }
            SetupError::MalformedRelease(msg) => {
                let suggestion = Some(
                    "The release listing did not have the expected shape. Check 'api.base_url' \
                     points at a GitHub-compatible API."
                        .to_string(),
                );
                (suggestion, Some(msg.clone()))
            }
            SetupError::EmptyCatalog => {
                let suggestion = Some(
                    "No releases were published upstream, please contact OpenTofu.".to_string(),
                );
                (suggestion, None)
            }
            SetupError::NoMatch(_) => {
                let suggestion = Some(
                    "Run 'setup-tofu list' to see the releases currently published.".to_string(),
                );
                let details = Some(
                    "Only the most recent releases returned by the API are considered, and \
                     'latest' never selects a prerelease."
                        .to_string(),
                );
                (suggestion, details)
            }
            SetupError::NoMatchingBuild { expected_name, .. } => {
                let suggestion = Some(
                    "Override the detected host with --platform and --arch if needed.".to_string(),
                );
                let details = Some(format!("No release asset named '{expected_name}'"));
                (suggestion, details)
            }
            SetupError::ConfigError(msg) | SetupError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check setup-tofu.toml and any SETUP_TOFU_* environment variables.".to_string(),
                );
                (suggestion, Some(msg.clone()))
            }
            SetupError::DirectoryNotFound(dir) => {
                let suggestion = Some(format!(
                    "Set TF_CLI_CONFIG_FILE or pass --file to choose where to write: {dir}"
                ));
                (suggestion, None)
            }
            SetupError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check the permissions of the target file.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
