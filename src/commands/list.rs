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

use crate::catalog::{ReleaseCatalog, ReleaseSource};
use crate::config::SetupConfig;
use crate::environment::HostEnvironment;
use crate::error::Result;
use crate::models::{Platform, Release};
use crate::selection::BuildSelector;
use comfy_table::{Cell, CellAlignment, Color, Table};
use log::debug;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    version: &'a str,
    prerelease: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<String>,
    available: bool,
}

pub struct ListCommand<'a> {
    config: &'a SetupConfig,
    host: &'a HostEnvironment,
}

impl<'a> ListCommand<'a> {
    pub fn new(config: &'a SetupConfig, host: &'a HostEnvironment) -> Result<Self> {
        Ok(Self { config, host })
    }

    pub fn execute(&self, github_token: Option<&str>, json: bool) -> Result<()> {
        let catalog = ReleaseCatalog::with_client(self.config.api_client());
        let output = self.run(&catalog, github_token, &Platform::current(), json)?;
        println!("{output}");
        Ok(())
    }

    fn run(
        &self,
        source: &dyn ReleaseSource,
        github_token: Option<&str>,
        platform: &Platform,
        json: bool,
    ) -> Result<String> {
        let token = self.host.github_token(github_token);
        let releases = source.fetch(token.as_deref())?;
        debug!("Listing {} releases for {platform}", releases.len());

        let selector = self.config.build_selector();
        let entries: Vec<ListEntry> = releases
            .iter()
            .map(|release| entry_for(release, &selector, platform))
            .collect();

        if json {
            return Ok(serde_json::to_string_pretty(&entries)?);
        }

        if entries.is_empty() {
            return Ok("No releases found".to_string());
        }

        Ok(render_table(&entries, platform))
    }
}

fn entry_for<'r>(release: &'r Release, selector: &BuildSelector, platform: &Platform) -> ListEntry<'r> {
    ListEntry {
        version: &release.version,
        prerelease: release.is_prerelease(),
        published_at: release
            .published_at
            .map(|at| at.format("%Y-%m-%d").to_string()),
        available: selector
            .select(release, &platform.os, &platform.arch)
            .is_ok(),
    }
}

fn render_table(entries: &[ListEntry], platform: &Platform) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Version"),
        Cell::new("Pre"),
        Cell::new("Published"),
        Cell::new(format!("{}/{}", platform.os, platform.arch)),
    ]);

    for entry in entries {
        let version_cell = if entry.prerelease {
            Cell::new(entry.version).fg(Color::Yellow)
        } else {
            Cell::new(entry.version)
        };
        let available_cell = if entry.available {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("-")
        };

        table.add_row(vec![
            version_cell,
            Cell::new(if entry.prerelease { "yes" } else { "" }),
            Cell::new(entry.published_at.as_deref().unwrap_or("")),
            available_cell.set_alignment(CellAlignment::Center),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Build;
    use chrono::{TimeZone, Utc};

    struct StaticSource(Vec<Release>);

    impl ReleaseSource for StaticSource {
        fn fetch(&self, _token: Option<&str>) -> Result<Vec<Release>> {
            Ok(self.0.clone())
        }
    }

    fn source() -> StaticSource {
        StaticSource(vec![
            Release::new(
                "1.7.0-alpha1",
                vec![Build::new("tofu_1.7.0-alpha1_darwin_arm64.zip", "https://example.com/a")],
            ),
            Release::new(
                "1.6.2",
                vec![Build::new("tofu_1.6.2_linux_amd64.zip", "https://example.com/b")],
            )
            .with_published_at(Utc.with_ymd_and_hms(2024, 2, 21, 9, 30, 0).unwrap()),
        ])
    }

    #[test]
    fn test_list_json() {
        let config = SetupConfig::default();
        let host = HostEnvironment::default();
        let command = ListCommand::new(&config, &host).unwrap();

        let output = command
            .run(&source(), None, &Platform::new("linux", "x86_64"), true)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["version"], "1.7.0-alpha1");
        assert_eq!(value[0]["prerelease"], true);
        assert_eq!(value[0]["available"], false);
        assert!(value[0].get("published_at").is_none());
        assert_eq!(value[1]["version"], "1.6.2");
        assert_eq!(value[1]["available"], true);
        assert_eq!(value[1]["published_at"], "2024-02-21");
    }

    #[test]
    fn test_list_table() {
        let config = SetupConfig::default();
        let host = HostEnvironment::default();
        let command = ListCommand::new(&config, &host).unwrap();

        let output = command
            .run(&source(), None, &Platform::new("darwin", "arm64"), false)
            .unwrap();

        assert!(output.contains("Version"));
        assert!(output.contains("darwin/arm64"));
        assert!(output.contains("1.7.0-alpha1"));
        assert!(output.contains("2024-02-21"));
    }

    #[test]
    fn test_list_empty() {
        let config = SetupConfig::default();
        let host = HostEnvironment::default();
        let command = ListCommand::new(&config, &host).unwrap();

        let output = command
            .run(&StaticSource(vec![]), None, &Platform::current(), false)
            .unwrap();
        assert_eq!(output, "No releases found");
    }
}
