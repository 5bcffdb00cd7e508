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

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::Release;
use log::debug;

/// Anything that can produce a snapshot of published releases.
pub trait ReleaseSource {
    /// Fetch every release in upstream order. A `None` or empty token
    /// means an anonymous request.
    fn fetch(&self, token: Option<&str>) -> Result<Vec<Release>>;
}

/// The upstream release catalog, read through the releases API.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalog {
    client: ApiClient,
}

impl ReleaseCatalog {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new(),
        }
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }
}

impl ReleaseSource for ReleaseCatalog {
    fn fetch(&self, token: Option<&str>) -> Result<Vec<Release>> {
        let records = self.client.list_releases(token)?;
        let releases: Vec<Release> = records.into_iter().map(Release::from).collect();
        debug!("Fetched {} releases", releases.len());
        Ok(releases)
    }
}
