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

//! End-to-end resolution: constraint, catalog, version, then build.

use crate::catalog::ReleaseSource;
use crate::error::{Result, SetupError};
use crate::models::{Build, Release};
use crate::selection::BuildSelector;
use crate::version::{VersionConstraint, VersionResolver};
use log::{debug, info};
use serde::Serialize;
use std::str::FromStr;

/// What the caller asked for. Platform and architecture are canonical tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub constraint: String,
    pub platform: String,
    pub arch: String,
}

impl ResolutionRequest {
    pub fn new(
        constraint: impl Into<String>,
        platform: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            constraint: constraint.into(),
            platform: platform.into(),
            arch: arch.into(),
        }
    }
}

/// The release that satisfied a request and the build picked from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub release: Release,
    pub build: Build,
}

impl Resolution {
    pub fn version(&self) -> &str {
        &self.release.version
    }

    pub fn download_url(&self) -> &str {
        &self.build.url
    }
}

pub struct ReleaseResolver<'a, S: ReleaseSource + ?Sized> {
    source: &'a S,
    selector: BuildSelector,
    resolver: VersionResolver,
}

impl<'a, S: ReleaseSource + ?Sized> ReleaseResolver<'a, S> {
    pub fn new(source: &'a S, selector: BuildSelector) -> Self {
        Self {
            source,
            selector,
            resolver: VersionResolver::new(),
        }
    }

    /// Resolve `constraint` to a single release of the catalog.
    ///
    /// An invalid constraint is reported before the catalog is fetched.
    pub fn find_release(&self, constraint: &str, token: Option<&str>) -> Result<Release> {
        let constraint = VersionConstraint::from_str(constraint)?;

        let releases = self.source.fetch(token)?;
        if releases.is_empty() {
            return Err(SetupError::EmptyCatalog);
        }

        let available: Vec<&str> = releases.iter().map(|r| r.version.as_str()).collect();
        let version = self.resolver.resolve_constraint(&constraint, &available)?;
        info!("Resolved '{constraint}' to version {version}");

        // The resolver only returns strings taken from `available`.
        releases
            .into_iter()
            .find(|release| release.version == version)
            .ok_or_else(|| SetupError::NoMatch(constraint.to_string()))
    }

    /// Resolve a request down to one downloadable build.
    pub fn resolve(&self, request: &ResolutionRequest, token: Option<&str>) -> Result<Resolution> {
        let release = self.find_release(&request.constraint, token)?;
        let build = self
            .selector
            .select(&release, &request.platform, &request.arch)?
            .clone();
        debug!("Selected {} from {}", build.name, build.url);

        Ok(Resolution { release, build })
    }
}
