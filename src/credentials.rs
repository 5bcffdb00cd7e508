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

//! Credentials block for the CLI configuration file.

use crate::environment::HostEnvironment;
use crate::error::{Result, SetupError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCredentials {
    pub hostname: String,
    pub token: String,
}

impl CliCredentials {
    pub fn new(hostname: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            token: token.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "credentials \"{}\" {{\n  token = \"{}\"\n}}",
            self.hostname, self.token
        )
    }

    /// Write the block to `path`, replacing whatever was there.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            debug!("Creating {}", parent.display());
            fs::create_dir_all(parent)?;
        }

        debug!("Adding credentials to {}", path.display());
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// Location of the CLI configuration file for `tool_name` on `os`.
///
/// `TF_CLI_CONFIG_FILE` takes precedence. Otherwise Windows uses
/// `%APPDATA%\<tool>.rc` and every other OS uses `~/.<tool>rc`.
pub fn config_file_path(env: &HostEnvironment, os: &str, tool_name: &str) -> Result<PathBuf> {
    if let Some(path) = &env.cli_config_file {
        return Ok(path.clone());
    }

    if os == "windows" {
        let app_data = env
            .app_data
            .clone()
            .or_else(dirs::config_dir)
            .ok_or_else(|| SetupError::DirectoryNotFound("APPDATA".to_string()))?;
        Ok(app_data.join(format!("{tool_name}.rc")))
    } else {
        let home = env
            .home
            .clone()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SetupError::DirectoryNotFound("home directory".to_string()))?;
        Ok(home.join(format!(".{tool_name}rc")))
    }
}
