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

use crate::error::{Result, SetupError};
use crate::models::{Build, Release};
use log::debug;

pub const DEFAULT_TOOL_NAME: &str = "tofu";
pub const DEFAULT_EXTENSION: &str = "zip";

/// Picks the artifact of a release that matches a platform and architecture.
///
/// Platform and architecture must already be canonical tokens such as
/// `linux` / `amd64`; no normalization happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSelector {
    tool_name: String,
    extension: String,
}

impl BuildSelector {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// `<tool>_<version>_<platform>_<arch>.<ext>`
    pub fn expected_name(&self, version: &str, platform: &str, arch: &str) -> String {
        format!(
            "{}_{version}_{platform}_{arch}.{}",
            self.tool_name, self.extension
        )
    }

    /// Return the first build whose name equals the expected name.
    pub fn select<'a>(&self, release: &'a Release, platform: &str, arch: &str) -> Result<&'a Build> {
        let expected_name = self.expected_name(&release.version, platform, arch);
        debug!("Looking for build '{expected_name}'");

        release
            .builds
            .iter()
            .find(|build| build.name == expected_name)
            .ok_or_else(|| SetupError::NoMatchingBuild {
                version: release.version.clone(),
                platform: platform.to_string(),
                arch: arch.to_string(),
                expected_name,
            })
    }
}

impl Default for BuildSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_NAME)
    }
}
