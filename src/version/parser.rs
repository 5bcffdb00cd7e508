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

use semver::{BuildMetadata, Prerelease, Version};

/// Parse a version leniently.
///
/// On top of strict SemVer this accepts surrounding whitespace, any run of
/// leading `v` / `=` characters, leading zeros in the numeric core, and a
/// prerelease written without its hyphen (`1.2.3beta` == `1.2.3-beta`).
/// Returns `None` for anything that is not a complete `major.minor.patch`.
pub fn parse_loose(input: &str) -> Option<Version> {
    let trimmed = strip_loose_prefix(input);
    let (core, build) = match trimmed.split_once('+') {
        Some((core, build)) => (core, Some(build)),
        None => (trimmed, None),
    };

    let mut parts = core.splitn(3, '.');
    let major = parse_number(parts.next()?)?;
    let minor = parse_number(parts.next()?)?;
    let (patch, pre) = split_patch(parts.next()?)?;

    let build = match build {
        Some(build) => BuildMetadata::new(build).ok()?,
        None => BuildMetadata::EMPTY,
    };

    Some(Version {
        major,
        minor,
        patch,
        pre,
        build,
    })
}

/// A version with possibly missing or wildcard components, as written in a
/// range. `None` means "any".
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Partial {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub pre: Prerelease,
}

impl Partial {
    #[cfg(test)]
    pub(crate) fn is_complete(&self) -> bool {
        self.patch.is_some()
    }
}

/// Parse `1`, `1.2`, `1.x`, `1.2.*`, `*`, `1.2.3-rc.1` and friends.
///
/// Build metadata is accepted and dropped. A prerelease is only kept on a
/// complete version; components following a wildcard are wildcards too.
pub(crate) fn parse_partial(input: &str) -> Option<Partial> {
    let trimmed = strip_loose_prefix(input);
    if trimmed.is_empty() {
        return None;
    }
    let core = match trimmed.split_once('+') {
        Some((core, _)) => core,
        None => trimmed,
    };

    let mut parts = core.splitn(3, '.');
    let major = parse_component(parts.next()?)?;
    let minor = match parts.next() {
        Some(part) => parse_component(part)?,
        None => None,
    };
    let (patch, pre) = match parts.next() {
        Some(part) if is_wildcard(part) => (None, Prerelease::EMPTY),
        Some(part) => {
            let (patch, pre) = split_patch(part)?;
            (Some(patch), pre)
        }
        None => (None, Prerelease::EMPTY),
    };

    let minor = major.and(minor);
    let patch = minor.and(patch);
    let pre = if patch.is_some() {
        pre
    } else {
        Prerelease::EMPTY
    };

    Some(Partial {
        major,
        minor,
        patch,
        pre,
    })
}

fn strip_loose_prefix(input: &str) -> &str {
    input
        .trim()
        .trim_start_matches(|c: char| c == 'v' || c == '=' || c.is_whitespace())
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

fn parse_number(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u64>().ok()
}

fn parse_component(part: &str) -> Option<Option<u64>> {
    if is_wildcard(part) {
        Some(None)
    } else {
        parse_number(part).map(Some)
    }
}

/// Split `3`, `3-rc.1` or `3rc1` into the patch number and its prerelease.
fn split_patch(part: &str) -> Option<(u64, Prerelease)> {
    let digits = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    let patch = parse_number(&part[..digits])?;

    let tail = &part[digits..];
    if tail.is_empty() {
        return Some((patch, Prerelease::EMPTY));
    }
    let identifiers = tail.strip_prefix('-').unwrap_or(tail);
    if identifiers.is_empty() {
        return None;
    }
    let pre = Prerelease::new(identifiers).ok()?;
    Some((patch, pre))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loose_strict_versions() {
        assert_eq!(parse_loose("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(
            parse_loose("1.7.0-alpha1").map(|v| v.to_string()),
            Some("1.7.0-alpha1".to_string())
        );
        assert_eq!(
            parse_loose("1.6.0-rc.1+build.5").map(|v| v.to_string()),
            Some("1.6.0-rc.1+build.5".to_string())
        );
    }

    #[test]
    fn test_parse_loose_lenient_forms() {
        assert_eq!(parse_loose("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_loose("=1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_loose("  v 1.2.3 "), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_loose("01.02.03"), Some(Version::new(1, 2, 3)));
        assert_eq!(
            parse_loose("1.2.3beta").map(|v| v.pre.to_string()),
            Some("beta".to_string())
        );
    }

    #[test]
    fn test_parse_loose_rejects() {
        assert_eq!(parse_loose(""), None);
        assert_eq!(parse_loose("latest"), None);
        assert_eq!(parse_loose("1"), None);
        assert_eq!(parse_loose("1.2"), None);
        assert_eq!(parse_loose("1.2.3.4"), None);
        assert_eq!(parse_loose("1.2.3-"), None);
        assert_eq!(parse_loose("1.2.x"), None);
        assert_eq!(parse_loose("1.2.3-alpha..1"), None);
    }

    #[test]
    fn test_parse_partial() {
        let p = parse_partial("1").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), None, None));

        let p = parse_partial("1.2").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), Some(2), None));

        let p = parse_partial("v1.2.3-rc.1+meta").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), Some(2), Some(3)));
        assert_eq!(p.pre.as_str(), "rc.1");
        assert!(p.is_complete());
    }

    #[test]
    fn test_parse_partial_wildcards() {
        let p = parse_partial("*").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (None, None, None));

        let p = parse_partial("1.x").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), None, None));

        let p = parse_partial("1.2.X").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), Some(2), None));

        // Anything after a wildcard is a wildcard as well.
        let p = parse_partial("1.x.3-beta").unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), None, None));
        assert!(p.pre.is_empty());
    }

    #[test]
    fn test_parse_partial_rejects() {
        assert_eq!(parse_partial(""), None);
        assert_eq!(parse_partial("latest"), None);
        assert_eq!(parse_partial("1.2.3.4"), None);
        assert_eq!(parse_partial("1..2"), None);
        assert_eq!(parse_partial(">=1.2"), None);
    }
}
