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

//! Version ranges in the npm/node-semver syntax that CI users already write
//! for this tool: `~1.6`, `^1.6.0`, `>=1.5 <1.7`, `1.6.x`, `1.5 - 1.6`,
//! alternatives joined with `||`.
//!
//! Ranges always admit prerelease candidates. Upper bounds derived from
//! shorthand are written as `<X.Y.Z-0`, so `~1.2` does not reach into
//! `1.3.0-alpha`.

use crate::error::{Result, SetupError};
use crate::version::cmp_precedence;
use crate::version::parser::{Partial, parse_partial};
use log::trace;
use semver::{Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Exact,
    Greater,
    GreaterEq,
    Less,
    LessEq,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Exact => "",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

impl Comparator {
    pub fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    /// Build metadata on either side is ignored.
    pub fn matches(&self, version: &Version) -> bool {
        let ordering = cmp_precedence(version, &self.version);
        match self.op {
            Op::Exact => ordering == Ordering::Equal,
            Op::Greater => ordering == Ordering::Greater,
            Op::GreaterEq => ordering != Ordering::Less,
            Op::Less => ordering == Ordering::Less,
            Op::LessEq => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.version)
    }
}

/// A union of comparator sets; a version matches when every comparator of
/// at least one set matches. An empty set matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    alternatives: Vec<Vec<Comparator>>,
}

impl VersionRange {
    pub fn parse(input: &str) -> Result<Self> {
        let alternatives = input
            .split("||")
            .map(|alternative| {
                parse_alternative(alternative).ok_or_else(|| {
                    SetupError::InvalidConstraint(format!(
                        "'{}' is not a valid version or range",
                        input.trim()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let range = Self {
            raw: input.trim().to_string(),
            alternatives,
        };
        trace!("Parsed range '{}' as '{range}'", range.raw);
        Ok(range)
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives
            .iter()
            .any(|set| set.iter().all(|comparator| comparator.matches(version)))
    }

    /// The range as the user wrote it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn alternatives(&self) -> &[Vec<Comparator>] {
        &self.alternatives
    }
}

impl FromStr for VersionRange {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self> {
        VersionRange::parse(s)
    }
}

/// Renders the desugared form, e.g. `~1.2` as `>=1.2.0 <1.3.0-0`.
impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, set) in self.alternatives.iter().enumerate() {
            if index > 0 {
                write!(f, "||")?;
            }
            if set.is_empty() {
                write!(f, "*")?;
                continue;
            }
            let rendered: Vec<String> = set.iter().map(|c| c.to_string()).collect();
            write!(f, "{}", rendered.join(" "))?;
        }
        Ok(())
    }
}

const BARE_OPERATORS: &[&str] = &["<", "<=", ">", ">=", "=", "~", "~>", "^"];

fn parse_alternative(alternative: &str) -> Option<Vec<Comparator>> {
    let tokens = tokenize(alternative)?;

    if let [from, dash, to] = tokens.as_slice()
        && dash == "-"
    {
        return hyphen(parse_partial(from)?, parse_partial(to)?);
    }

    let mut comparators = Vec::new();
    for token in &tokens {
        comparators.extend(parse_comparator(token)?);
    }
    Some(comparators)
}

/// Split on whitespace, gluing an operator written apart from its version
/// (`>= 1.2.3`) back onto it.
fn tokenize(alternative: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut pending: Option<&str> = None;

    for word in alternative.split_whitespace() {
        if let Some(operator) = pending.take() {
            tokens.push(format!("{operator}{word}"));
        } else if BARE_OPERATORS.contains(&word) {
            pending = Some(word);
        } else {
            tokens.push(word.to_string());
        }
    }

    if pending.is_some() {
        return None;
    }
    Some(tokens)
}

fn parse_comparator(token: &str) -> Option<Vec<Comparator>> {
    if let Some(rest) = token.strip_prefix("~>").or_else(|| token.strip_prefix('~')) {
        return tilde(parse_partial(rest)?);
    }
    if let Some(rest) = token.strip_prefix('^') {
        return caret(parse_partial(rest)?);
    }

    let (op, rest) = if let Some(rest) = token.strip_prefix(">=") {
        (Op::GreaterEq, rest)
    } else if let Some(rest) = token.strip_prefix("<=") {
        (Op::LessEq, rest)
    } else if let Some(rest) = token.strip_prefix('>') {
        (Op::Greater, rest)
    } else if let Some(rest) = token.strip_prefix('<') {
        (Op::Less, rest)
    } else if let Some(rest) = token.strip_prefix('=') {
        (Op::Exact, rest)
    } else {
        (Op::Exact, token)
    };

    primitive(op, parse_partial(rest)?)
}

fn primitive(op: Op, partial: Partial) -> Option<Vec<Comparator>> {
    if let (Some(major), Some(minor), Some(patch)) = (partial.major, partial.minor, partial.patch) {
        return Some(vec![Comparator::new(
            op,
            with_pre(major, minor, patch, partial.pre),
        )]);
    }

    let Some(major) = partial.major else {
        // `>*` and `<*` can never match; `*`, `>=*`, `<=*` match anything.
        return Some(match op {
            Op::Greater | Op::Less => vec![Comparator::new(Op::Less, floor(0, 0, 0)?)],
            _ => Vec::new(),
        });
    };

    match (op, partial.minor) {
        (Op::Exact, None) => span(floor(major, 0, 0)?, floor(inc(major)?, 0, 0)?),
        (Op::Exact, Some(minor)) => span(floor(major, minor, 0)?, floor(major, inc(minor)?, 0)?),
        (Op::Greater, None) => single(Op::GreaterEq, floor(inc(major)?, 0, 0)?),
        (Op::Greater, Some(minor)) => single(Op::GreaterEq, floor(major, inc(minor)?, 0)?),
        (Op::LessEq, None) => single(Op::Less, floor(inc(major)?, 0, 0)?),
        (Op::LessEq, Some(minor)) => single(Op::Less, floor(major, inc(minor)?, 0)?),
        (op, minor) => single(op, floor(major, minor.unwrap_or(0), 0)?),
    }
}

fn tilde(partial: Partial) -> Option<Vec<Comparator>> {
    let Some(major) = partial.major else {
        return Some(Vec::new());
    };

    match (partial.minor, partial.patch) {
        (None, _) => span(Version::new(major, 0, 0), floor(inc(major)?, 0, 0)?),
        (Some(minor), None) => span(Version::new(major, minor, 0), floor(major, inc(minor)?, 0)?),
        (Some(minor), Some(patch)) => span(
            with_pre(major, minor, patch, partial.pre),
            floor(major, inc(minor)?, 0)?,
        ),
    }
}

fn caret(partial: Partial) -> Option<Vec<Comparator>> {
    let Some(major) = partial.major else {
        return Some(Vec::new());
    };

    match (partial.minor, partial.patch) {
        (None, _) => span(floor(major, 0, 0)?, floor(inc(major)?, 0, 0)?),
        (Some(minor), None) => {
            let upper = if major == 0 {
                floor(0, inc(minor)?, 0)?
            } else {
                floor(inc(major)?, 0, 0)?
            };
            span(floor(major, minor, 0)?, upper)
        }
        (Some(minor), Some(patch)) => {
            let lower = if !partial.pre.is_empty() {
                with_pre(major, minor, patch, partial.pre)
            } else if major == 0 {
                floor(major, minor, patch)?
            } else {
                Version::new(major, minor, patch)
            };
            let upper = match (major, minor) {
                (0, 0) => floor(0, 0, inc(patch)?)?,
                (0, _) => floor(0, inc(minor)?, 0)?,
                _ => floor(inc(major)?, 0, 0)?,
            };
            span(lower, upper)
        }
    }
}

fn hyphen(from: Partial, to: Partial) -> Option<Vec<Comparator>> {
    let mut comparators = Vec::new();

    if let Some(major) = from.major {
        let lower = match (from.minor, from.patch) {
            (None, _) => floor(major, 0, 0)?,
            (Some(minor), None) => floor(major, minor, 0)?,
            (Some(minor), Some(patch)) if !from.pre.is_empty() => {
                with_pre(major, minor, patch, from.pre)
            }
            (Some(minor), Some(patch)) => floor(major, minor, patch)?,
        };
        comparators.push(Comparator::new(Op::GreaterEq, lower));
    }

    if let Some(major) = to.major {
        let upper = match (to.minor, to.patch) {
            (None, _) => Comparator::new(Op::Less, floor(inc(major)?, 0, 0)?),
            (Some(minor), None) => Comparator::new(Op::Less, floor(major, inc(minor)?, 0)?),
            (Some(minor), Some(patch)) if !to.pre.is_empty() => {
                Comparator::new(Op::LessEq, with_pre(major, minor, patch, to.pre))
            }
            (Some(minor), Some(patch)) => {
                Comparator::new(Op::Less, floor(major, minor, inc(patch)?)?)
            }
        };
        comparators.push(upper);
    }

    Some(comparators)
}

fn single(op: Op, version: Version) -> Option<Vec<Comparator>> {
    Some(vec![Comparator::new(op, version)])
}

fn span(lower: Version, upper: Version) -> Option<Vec<Comparator>> {
    Some(vec![
        Comparator::new(Op::GreaterEq, lower),
        Comparator::new(Op::Less, upper),
    ])
}

fn inc(component: u64) -> Option<u64> {
    component.checked_add(1)
}

fn with_pre(major: u64, minor: u64, patch: u64, pre: Prerelease) -> Version {
    Version {
        pre,
        ..Version::new(major, minor, patch)
    }
}

/// `major.minor.patch-0`, the lowest version with that numeric core.
fn floor(major: u64, minor: u64, patch: u64) -> Option<Version> {
    Some(with_pre(major, minor, patch, Prerelease::new("0").ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn desugar(input: &str) -> String {
        VersionRange::parse(input).unwrap().to_string()
    }

    fn matches(range: &str, version: &str) -> bool {
        VersionRange::parse(range).unwrap().matches(&v(version))
    }

    #[test]
    fn test_tilde_desugaring() {
        assert_eq!(desugar("~1.2.3"), ">=1.2.3 <1.3.0-0");
        assert_eq!(desugar("~1.2"), ">=1.2.0 <1.3.0-0");
        assert_eq!(desugar("~1"), ">=1.0.0 <2.0.0-0");
        assert_eq!(desugar("~>1.2"), ">=1.2.0 <1.3.0-0");
        assert_eq!(desugar("~1.2.3-beta.2"), ">=1.2.3-beta.2 <1.3.0-0");
        assert_eq!(desugar("~*"), "*");
    }

    #[test]
    fn test_caret_desugaring() {
        assert_eq!(desugar("^1.2.3"), ">=1.2.3 <2.0.0-0");
        assert_eq!(desugar("^0.2.3"), ">=0.2.3-0 <0.3.0-0");
        assert_eq!(desugar("^0.0.3"), ">=0.0.3-0 <0.0.4-0");
        assert_eq!(desugar("^1.2"), ">=1.2.0-0 <2.0.0-0");
        assert_eq!(desugar("^0.2"), ">=0.2.0-0 <0.3.0-0");
        assert_eq!(desugar("^1"), ">=1.0.0-0 <2.0.0-0");
        assert_eq!(desugar("^1.2.3-rc.1"), ">=1.2.3-rc.1 <2.0.0-0");
        assert_eq!(desugar("^0.0.3-rc.1"), ">=0.0.3-rc.1 <0.0.4-0");
    }

    #[test]
    fn test_x_range_desugaring() {
        assert_eq!(desugar("1.2.x"), ">=1.2.0-0 <1.3.0-0");
        assert_eq!(desugar("1.2"), ">=1.2.0-0 <1.3.0-0");
        assert_eq!(desugar("1"), ">=1.0.0-0 <2.0.0-0");
        assert_eq!(desugar("=1.x"), ">=1.0.0-0 <2.0.0-0");
        assert_eq!(desugar(">1.2"), ">=1.3.0-0");
        assert_eq!(desugar(">1"), ">=2.0.0-0");
        assert_eq!(desugar(">=1.2"), ">=1.2.0-0");
        assert_eq!(desugar("<1.2"), "<1.2.0-0");
        assert_eq!(desugar("<=1.2"), "<1.3.0-0");
        assert_eq!(desugar("<=1"), "<2.0.0-0");
        assert_eq!(desugar("*"), "*");
        assert_eq!(desugar("x"), "*");
        assert_eq!(desugar(""), "*");
        assert_eq!(desugar(">=*"), "*");
        assert_eq!(desugar(">*"), "<0.0.0-0");
    }

    #[test]
    fn test_primitive_and_compound() {
        assert_eq!(desugar("1.2.3"), "1.2.3");
        assert_eq!(desugar("=v1.2.3"), "1.2.3");
        assert_eq!(desugar(">=1.5.0 <1.7.0"), ">=1.5.0 <1.7.0");
        assert_eq!(desugar(">= 1.5.0  < 1.7.0"), ">=1.5.0 <1.7.0");
        assert_eq!(desugar("1.5.x || >=1.7.0"), ">=1.5.0-0 <1.6.0-0||>=1.7.0");
        assert_eq!(desugar("1.6.0-rc1"), "1.6.0-rc1");
    }

    #[test]
    fn test_hyphen_desugaring() {
        assert_eq!(desugar("1.2.3 - 2.3.4"), ">=1.2.3-0 <2.3.5-0");
        assert_eq!(desugar("1.2 - 2.3.4"), ">=1.2.0-0 <2.3.5-0");
        assert_eq!(desugar("1.2.3 - 2.3"), ">=1.2.3-0 <2.4.0-0");
        assert_eq!(desugar("1.2.3 - 2"), ">=1.2.3-0 <3.0.0-0");
        assert_eq!(desugar("1.2.3-rc.1 - 2.3.4-beta"), ">=1.2.3-rc.1 <=2.3.4-beta");
        assert_eq!(desugar("* - 2.0.0"), "<2.0.1-0");
        assert_eq!(desugar("1.0.0 - *"), ">=1.0.0-0");
    }

    #[test]
    fn test_invalid_ranges() {
        for input in [
            "latest",
            "foo",
            "1.2.3.4",
            ">=",
            ">= 1.2 <",
            "1.2.3 -",
            "- 1.2.3",
            ">=1.2.3 - 2.0.0",
            "~1.2.3.4",
            "^foo",
            "1.2.3 | 1.2.4",
            "1.2.3-",
        ] {
            let result = VersionRange::parse(input);
            assert!(
                matches!(result, Err(SetupError::InvalidConstraint(_))),
                "expected '{input}' to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_matching_admits_prereleases() {
        assert!(matches(">=1.6.0-0", "1.6.0-alpha"));
        assert!(matches("^1.6.0-rc.1", "1.7.0-beta"));
        assert!(matches("1.6.x", "1.6.0-rc1"));
        assert!(matches("*", "2.0.0-alpha"));
        assert!(!matches("~1.2", "1.3.0-alpha"));
        assert!(!matches("~1.2", "1.2.0-alpha"));
        assert!(!matches(">=1.6.0", "1.6.0-rc1"));
    }

    #[test]
    fn test_matching_precedence() {
        assert!(matches(">1.0.0-alpha", "1.0.0-alpha.1"));
        assert!(matches(">1.0.0-alpha.1", "1.0.0-alpha.beta"));
        assert!(matches(">1.0.0-alpha.beta", "1.0.0-beta"));
        assert!(matches(">1.0.0-beta.2", "1.0.0-beta.11"));
        assert!(matches(">1.0.0-beta.11", "1.0.0-rc.1"));
        assert!(matches(">1.0.0-rc.1", "1.0.0"));
        assert!(!matches(">1.0.0-beta.11", "1.0.0-beta.2"));
    }

    #[test]
    fn test_matching_ignores_build_metadata() {
        assert!(matches("1.2.3", "1.2.3+build.7"));
        assert!(matches("1.2.3+other", "1.2.3"));
        assert!(!matches(">1.2.3", "1.2.3+build.7"));
    }

    #[test]
    fn test_matching_alternatives() {
        let range = VersionRange::parse("~1.5.0 || ^1.7").unwrap();
        assert!(range.matches(&v("1.5.3")));
        assert!(!range.matches(&v("1.6.0")));
        assert!(range.matches(&v("1.8.1")));
        assert_eq!(range.alternatives().len(), 2);
        assert_eq!(range.as_str(), "~1.5.0 || ^1.7");
    }

    #[test]
    fn test_never_matching_range() {
        let range = VersionRange::parse("<*").unwrap();
        assert!(!range.matches(&v("0.0.0-0")));
        assert!(!range.matches(&v("1.0.0")));
    }
}
