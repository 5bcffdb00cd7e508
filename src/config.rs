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

use crate::api::{ApiClient, DEFAULT_REPOSITORY, GITHUB_API_BASE};
use crate::error::{Result, SetupError};
use crate::selection::{BuildSelector, DEFAULT_EXTENSION, DEFAULT_TOOL_NAME};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "setup-tofu.toml";
const CONFIG_PATH_ENV: &str = "SETUP_TOFU_CONFIG";
const ENV_PREFIX: &str = "SETUP_TOFU";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupConfig {
    #[serde(default = "default_tool_name")]
    pub tool_name: String,

    #[serde(default = "default_archive_extension")]
    pub archive_extension: String,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_repository")]
    pub repository: String,

    /// Request timeout. Unset means the request may block indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            tool_name: default_tool_name(),
            archive_extension: default_archive_extension(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            repository: default_repository(),
            timeout_secs: None,
        }
    }
}

fn default_tool_name() -> String {
    DEFAULT_TOOL_NAME.to_string()
}

fn default_archive_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_base_url() -> String {
    GITHUB_API_BASE.to_string()
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

impl SetupConfig {
    /// Load configuration from defaults, an optional TOML file and
    /// `SETUP_TOFU_*` environment variables, later sources winning.
    ///
    /// The file is `path` when given, else `$SETUP_TOFU_CONFIG`, else
    /// `./setup-tofu.toml` if it exists. An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let file = match &explicit {
            Some(path) => {
                log::debug!("Loading config from {path:?}");
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(true)
            }
            None => File::from(Path::new(CONFIG_FILE_NAME))
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SetupError::ConfigError(format!("Failed to load configuration: {e}")))?;

        let config: SetupConfig = settings
            .try_deserialize()
            .map_err(|e| SetupError::ConfigError(format!("Failed to parse configuration: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tool_name.trim().is_empty() {
            return Err(SetupError::InvalidConfig(
                "tool_name must not be empty".to_string(),
            ));
        }
        if self.archive_extension.trim().is_empty() {
            return Err(SetupError::InvalidConfig(
                "archive_extension must not be empty".to_string(),
            ));
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(SetupError::InvalidConfig(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.repository.split('/').filter(|s| !s.is_empty()).count() != 2 {
            return Err(SetupError::InvalidConfig(format!(
                "api.repository must look like 'owner/name', got '{}'",
                self.api.repository
            )));
        }
        Ok(())
    }

    pub fn api_client(&self) -> ApiClient {
        let client = ApiClient::new()
            .with_base_url(self.api.base_url.clone())
            .with_repository(self.api.repository.clone());
        match self.api.timeout_secs {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => client,
        }
    }

    pub fn build_selector(&self) -> BuildSelector {
        BuildSelector::new(self.tool_name.clone()).with_extension(self.archive_extension.clone())
    }
}

pub fn new_setup_config(path: Option<&Path>) -> Result<SetupConfig> {
    SetupConfig::load(path)
}
