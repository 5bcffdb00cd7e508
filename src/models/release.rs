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

use crate::api::{AssetRecord, ReleaseRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A downloadable artifact attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
    pub name: String,
    pub url: String,
}

impl Build {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl From<AssetRecord> for Build {
    fn from(asset: AssetRecord) -> Self {
        Build::new(asset.name, asset.browser_download_url)
    }
}

/// A published release and its builds, in the order upstream listed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// Tag name without its leading `v`. Not validated here.
    pub version: String,
    pub builds: Vec<Build>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Release {
    pub fn new(version: impl Into<String>, builds: Vec<Build>) -> Self {
        Self {
            version: version.into(),
            builds,
            published_at: None,
        }
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    /// Whether the version carries a prerelease component.
    pub fn is_prerelease(&self) -> bool {
        crate::version::parse_loose(&self.version)
            .map(|v| !v.pre.is_empty())
            .unwrap_or(false)
    }
}

impl From<ReleaseRecord> for Release {
    fn from(record: ReleaseRecord) -> Self {
        let version = version_from_tag(&record.tag_name);
        Self {
            version,
            builds: record.assets.into_iter().map(Build::from).collect(),
            published_at: record.published_at,
        }
    }
}

/// Strip a single leading `v` from a tag name.
pub fn version_from_tag(tag_name: &str) -> String {
    tag_name.strip_prefix('v').unwrap_or(tag_name).to_string()
}
