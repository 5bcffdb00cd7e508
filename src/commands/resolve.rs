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
use crate::models::Platform;
use crate::resolution::{ReleaseResolver, Resolution, ResolutionRequest};
use log::debug;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    version: &'a str,
    name: &'a str,
    url: &'a str,
    platform: &'a str,
    arch: &'a str,
}

pub struct ResolveCommand<'a> {
    config: &'a SetupConfig,
    host: &'a HostEnvironment,
}

impl<'a> ResolveCommand<'a> {
    pub fn new(config: &'a SetupConfig, host: &'a HostEnvironment) -> Result<Self> {
        Ok(Self { config, host })
    }

    pub fn execute(
        &self,
        version: &str,
        github_token: Option<&str>,
        platform: Option<&str>,
        arch: Option<&str>,
        json: bool,
    ) -> Result<()> {
        let catalog = ReleaseCatalog::with_client(self.config.api_client());
        let output = self.run(&catalog, version, github_token, platform, arch, json)?;
        println!("{output}");
        Ok(())
    }

    fn run(
        &self,
        source: &dyn ReleaseSource,
        version: &str,
        github_token: Option<&str>,
        platform: Option<&str>,
        arch: Option<&str>,
        json: bool,
    ) -> Result<String> {
        let target = Platform::detect(platform, arch);
        debug!("Resolving '{version}' for {target}");

        let request = ResolutionRequest::new(version, target.os.as_str(), target.arch.as_str());
        let token = self.host.github_token(github_token);

        let resolver = ReleaseResolver::new(source, self.config.build_selector());
        let resolution = resolver.resolve(&request, token.as_deref())?;

        if json {
            render_json(&resolution, &request)
        } else {
            Ok(render_text(&resolution))
        }
    }
}

fn render_text(resolution: &Resolution) -> String {
    format!("{}\n{}", resolution.version(), resolution.download_url())
}

fn render_json(resolution: &Resolution, request: &ResolutionRequest) -> Result<String> {
    let output = ResolveOutput {
        version: resolution.version(),
        name: &resolution.build.name,
        url: resolution.download_url(),
        platform: &request.platform,
        arch: &request.arch,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
