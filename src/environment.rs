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

use log::debug;
use std::env;
use std::path::PathBuf;

/// Process environment values read once at startup and handed down
/// explicitly. Empty variables are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnvironment {
    pub github_token: Option<String>,
    pub forgejo_actions: bool,
    pub gitea_actions: bool,
    pub home: Option<PathBuf>,
    pub app_data: Option<PathBuf>,
    pub cli_config_file: Option<PathBuf>,
}

impl HostEnvironment {
    pub fn from_process() -> Self {
        Self {
            github_token: non_empty_var("GITHUB_TOKEN"),
            forgejo_actions: non_empty_var("FORGEJO_ACTIONS").is_some(),
            gitea_actions: non_empty_var("GITEA_ACTIONS").is_some(),
            home: non_empty_var("HOME").map(PathBuf::from),
            app_data: non_empty_var("APPDATA").map(PathBuf::from),
            cli_config_file: non_empty_var("TF_CLI_CONFIG_FILE").map(PathBuf::from),
        }
    }

    /// Whether the run happens on a Forgejo or Gitea runner rather than
    /// GitHub Actions.
    pub fn is_foreign_forge(&self) -> bool {
        self.forgejo_actions || self.gitea_actions
    }

    /// Token for the releases API.
    ///
    /// An explicit non-empty token wins. Otherwise `GITHUB_TOKEN` is used,
    /// except on Forgejo and Gitea runners where that variable holds a
    /// token for a different server.
    pub fn github_token(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(token) = explicit.filter(|t| !t.is_empty()) {
            return Some(token.to_string());
        }
        if self.is_foreign_forge() {
            debug!("Not using GITHUB_TOKEN on a Forgejo/Gitea runner");
            return None;
        }
        self.github_token.clone()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_explicit_token_wins() {
        let env = HostEnvironment {
            github_token: Some("from-env".to_string()),
            ..Default::default()
        };
        assert_eq!(env.github_token(Some("explicit")).as_deref(), Some("explicit"));
    }

    #[test]
    fn test_empty_explicit_token_falls_back() {
        let env = HostEnvironment {
            github_token: Some("from-env".to_string()),
            ..Default::default()
        };
        assert_eq!(env.github_token(Some("")).as_deref(), Some("from-env"));
        assert_eq!(env.github_token(None).as_deref(), Some("from-env"));
    }

    #[test]
    fn test_forge_runners_ignore_github_token() {
        let forgejo = HostEnvironment {
            github_token: Some("from-env".to_string()),
            forgejo_actions: true,
            ..Default::default()
        };
        assert_eq!(forgejo.github_token(None), None);
        assert_eq!(forgejo.github_token(Some("explicit")).as_deref(), Some("explicit"));

        let gitea = HostEnvironment {
            github_token: Some("from-env".to_string()),
            gitea_actions: true,
            ..Default::default()
        };
        assert_eq!(gitea.github_token(Some("")), None);
    }

    #[test]
    fn test_no_token_anywhere() {
        assert_eq!(HostEnvironment::default().github_token(None), None);
    }

    #[test]
    #[serial]
    fn test_from_process() {
        let saved: Vec<(&str, Option<String>)> = ["GITHUB_TOKEN", "FORGEJO_ACTIONS", "TF_CLI_CONFIG_FILE"]
            .iter()
            .map(|key| (*key, env::var(key).ok()))
            .collect();

        unsafe {
            env::set_var("GITHUB_TOKEN", "ghp_process");
            env::set_var("FORGEJO_ACTIONS", "");
            env::set_var("TF_CLI_CONFIG_FILE", "/tmp/custom.tfrc");
        }

        let host = HostEnvironment::from_process();
        assert_eq!(host.github_token.as_deref(), Some("ghp_process"));
        assert!(!host.forgejo_actions);
        assert_eq!(host.cli_config_file, Some(PathBuf::from("/tmp/custom.tfrc")));

        unsafe {
            for (key, value) in saved {
                match value {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
