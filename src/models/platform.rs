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

//! Mapping of host OS and CPU identifiers onto the tokens used in release
//! asset names (`darwin`, `linux`, `windows`, ... and `amd64`, `386`,
//! `arm64`, `arm`, ...).

use serde::Serialize;

/// Canonical operating system token for an asset name.
///
/// Accepts both Node-style (`win32`) and Rust-style (`macos`) identifiers.
/// Unknown values pass through lowercased.
pub fn normalize_os(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    match lowered.as_str() {
        "win32" | "windows" | "win" => "windows".to_string(),
        "macos" | "mac" | "darwin" | "osx" => "darwin".to_string(),
        _ => lowered,
    }
}

/// Canonical architecture token for an asset name.
pub fn normalize_arch(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    match lowered.as_str() {
        "x64" | "x86_64" | "amd64" => "amd64".to_string(),
        "x32" | "x86" | "i386" | "i686" | "ia32" => "386".to_string(),
        "aarch64" | "arm64" => "arm64".to_string(),
        _ => lowered,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: normalize_os(os),
            arch: normalize_arch(arch),
        }
    }

    /// The platform this binary runs on.
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Host platform with optional per-field overrides, each normalized.
    pub fn detect(os_override: Option<&str>, arch_override: Option<&str>) -> Self {
        let host = Self::current();
        Self {
            os: os_override.map(normalize_os).unwrap_or(host.os),
            arch: arch_override.map(normalize_arch).unwrap_or(host.arch),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}
