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

use crate::config::SetupConfig;
use crate::credentials::{CliCredentials, config_file_path};
use crate::environment::HostEnvironment;
use crate::error::Result;
use crate::models::Platform;
use log::warn;
use std::path::{Path, PathBuf};

pub struct CredentialsCommand<'a> {
    config: &'a SetupConfig,
    host: &'a HostEnvironment,
}

impl<'a> CredentialsCommand<'a> {
    pub fn new(config: &'a SetupConfig, host: &'a HostEnvironment) -> Result<Self> {
        Ok(Self { config, host })
    }

    pub fn execute(&self, hostname: &str, token: &str, file: Option<&Path>) -> Result<()> {
        if let Some(path) = self.write(hostname, token, file, &Platform::current().os)? {
            println!("Added credentials for {hostname} to {}", path.display());
        }
        Ok(())
    }

    /// Returns the written file, or `None` when there was nothing to write.
    fn write(
        &self,
        hostname: &str,
        token: &str,
        file: Option<&Path>,
        os: &str,
    ) -> Result<Option<PathBuf>> {
        if hostname.is_empty() || token.is_empty() {
            warn!("Both a hostname and a token are needed, not writing credentials");
            return Ok(None);
        }

        let path = match file {
            Some(path) => path.to_path_buf(),
            None => config_file_path(self.host, os, &self.config.tool_name)?,
        };

        CliCredentials::new(hostname, token).write(&path)?;
        Ok(Some(path))
    }
}
