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

#![allow(dead_code)]

use assert_cmd::Command;
use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

pub const RELEASES_PATH: &str = "/repos/opentofu/opentofu/releases";

/// A small catalog in the shape the releases API returns, newest first.
pub fn releases_body() -> &'static str {
    r#"[
  {
    "tag_name": "v1.7.0-alpha1",
    "prerelease": true,
    "published_at": "2024-03-07T12:00:00Z",
    "assets": [
      {"name": "tofu_1.7.0-alpha1_linux_amd64.zip", "browser_download_url": "https://example.com/v1.7.0-alpha1/tofu_1.7.0-alpha1_linux_amd64.zip"}
    ]
  },
  {
    "tag_name": "v1.6.2",
    "published_at": "2024-02-21T09:30:00Z",
    "assets": [
      {"name": "tofu_1.6.2_linux_amd64.zip", "browser_download_url": "https://example.com/v1.6.2/tofu_1.6.2_linux_amd64.zip"},
      {"name": "tofu_1.6.2_windows_amd64.zip", "browser_download_url": "https://example.com/v1.6.2/tofu_1.6.2_windows_amd64.zip"},
      {"name": "tofu_1.6.2_SHA256SUMS", "browser_download_url": "https://example.com/v1.6.2/tofu_1.6.2_SHA256SUMS"}
    ]
  },
  {
    "tag_name": "v1.5.7",
    "published_at": "2023-12-01T08:00:00Z",
    "assets": [
      {"name": "tofu_1.5.7_linux_amd64.zip", "browser_download_url": "https://example.com/v1.5.7/tofu_1.5.7_linux_amd64.zip"},
      {"name": "tofu_1.5.7_darwin_arm64.zip", "browser_download_url": "https://example.com/v1.5.7/tofu_1.5.7_darwin_arm64.zip"}
    ]
  }
]"#
}

pub fn mock_releases(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", RELEASES_PATH)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

/// The binary under test, isolated from the caller's environment and
/// pointed at `api_url`.
pub fn setup_tofu(work_dir: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("setup-tofu").unwrap();
    cmd.current_dir(work_dir.path())
        .env("SETUP_TOFU_API__BASE_URL", api_url)
        .env_remove("SETUP_TOFU_CONFIG")
        .env_remove("GITHUB_TOKEN")
        .env_remove("FORGEJO_ACTIONS")
        .env_remove("GITEA_ACTIONS")
        .env_remove("TF_CLI_CONFIG_FILE")
        .env_remove("RUST_LOG");
    cmd
}
