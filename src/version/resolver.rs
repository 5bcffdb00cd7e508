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
use crate::version::{VersionConstraint, cmp_precedence, parse_loose};
use log::debug;
use std::str::FromStr;

/// Picks one version out of a catalog for a constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionResolver;

impl VersionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Parse `constraint` and resolve it against `available`.
    ///
    /// Fails with `InvalidConstraint` before looking at any candidate when
    /// the constraint is neither `latest` nor a valid version or range.
    pub fn resolve<S: AsRef<str>>(&self, constraint: &str, available: &[S]) -> Result<String> {
        let constraint = VersionConstraint::from_str(constraint)?;
        self.resolve_constraint(&constraint, available)
    }

    /// Return the highest candidate admitted by `constraint`, exactly as it
    /// was spelled in `available`.
    ///
    /// `Latest` never selects a prerelease, even when the newest published
    /// version is one. Candidates that are not valid versions are skipped.
    pub fn resolve_constraint<S: AsRef<str>>(
        &self,
        constraint: &VersionConstraint,
        available: &[S],
    ) -> Result<String> {
        let candidates = available.iter().filter_map(|raw| {
            let raw = raw.as_ref();
            match parse_loose(raw) {
                Some(version) => Some((raw, version)),
                None => {
                    debug!("Skipping unparseable version '{raw}'");
                    None
                }
            }
        });

        let selected = match constraint {
            VersionConstraint::Latest => candidates
                .filter(|(_, version)| version.pre.is_empty())
                .max_by(|a, b| cmp_precedence(&a.1, &b.1)),
            VersionConstraint::Range(range) => candidates
                .filter(|(_, version)| range.matches(version))
                .max_by(|a, b| cmp_precedence(&a.1, &b.1)),
        };

        match selected {
            Some((raw, version)) => {
                debug!("Resolved '{constraint}' to {version}");
                Ok(raw.to_string())
            }
            None => Err(SetupError::NoMatch(constraint.to_string())),
        }
    }
}
