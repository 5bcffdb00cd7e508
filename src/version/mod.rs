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

pub mod parser;
pub mod range;
pub mod resolver;

pub use parser::parse_loose;
pub use range::{Comparator, Op, VersionRange};
pub use resolver::VersionResolver;
pub use semver::Version;

use crate::error::{Result, SetupError};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The sentinel accepted in place of a version or range.
pub const LATEST: &str = "latest";

/// A user-supplied version constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Newest release without a prerelease tag.
    Latest,
    /// Newest release inside the range, prereleases included.
    Range(VersionRange),
}

impl FromStr for VersionConstraint {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        if s == LATEST {
            return Ok(VersionConstraint::Latest);
        }
        VersionRange::parse(s).map(VersionConstraint::Range)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Latest => write!(f, "{LATEST}"),
            VersionConstraint::Range(range) => write!(f, "{}", range.as_str()),
        }
    }
}

/// SemVer 2.0.0 precedence: the numeric core, then the prerelease, with
/// build metadata ignored.
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}
