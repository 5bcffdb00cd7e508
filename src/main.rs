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

use clap::{Parser, Subcommand};
use setup_tofu::commands::credentials::CredentialsCommand;
use setup_tofu::commands::list::ListCommand;
use setup_tofu::commands::resolve::ResolveCommand;
use setup_tofu::config::new_setup_config;
use setup_tofu::environment::HostEnvironment;
use setup_tofu::error::{Result, format_error_with_color, get_exit_code};
use setup_tofu::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "setup-tofu")]
#[command(author, version, about = "Resolve OpenTofu CLI releases for CI runs", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to $SETUP_TOFU_CONFIG or ./setup-tofu.toml)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a version constraint to a release and its download URL
    #[command(visible_alias = "r")]
    Resolve {
        /// Version or range to resolve (e.g. "latest", "1.6.2", "~1.6", "<1.7.0")
        #[arg(default_value = "latest")]
        version: String,

        /// Token for the releases API (defaults to $GITHUB_TOKEN on GitHub Actions)
        #[arg(long, value_name = "TOKEN")]
        github_token: Option<String>,

        /// Target operating system (defaults to the host, e.g. linux, darwin, windows)
        #[arg(long)]
        platform: Option<String>,

        /// Target architecture (defaults to the host, e.g. amd64, arm64, 386)
        #[arg(long)]
        arch: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List published releases
    #[command(visible_alias = "ls")]
    List {
        /// Token for the releases API (defaults to $GITHUB_TOKEN on GitHub Actions)
        #[arg(long, value_name = "TOKEN")]
        github_token: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Add a credentials block to the CLI configuration file
    Credentials {
        /// Hostname the token is for (e.g. app.terraform.io)
        #[arg(long)]
        hostname: String,

        /// API token for that hostname
        #[arg(long)]
        token: String,

        /// Write to this file instead of $TF_CLI_CONFIG_FILE or the default location
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
}

fn exit_with(error: &setup_tofu::error::SetupError) -> ! {
    eprintln!(
        "{}",
        format_error_with_color(error, std::io::stderr().is_terminal())
    );
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match new_setup_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    let host = HostEnvironment::from_process();

    let result: Result<()> = (|| match cli.command {
        Commands::Resolve {
            version,
            github_token,
            platform,
            arch,
            json,
        } => {
            let command = ResolveCommand::new(&config, &host)?;
            command.execute(
                &version,
                github_token.as_deref(),
                platform.as_deref(),
                arch.as_deref(),
                json,
            )
        }
        Commands::List { github_token, json } => {
            let command = ListCommand::new(&config, &host)?;
            command.execute(github_token.as_deref(), json)
        }
        Commands::Credentials {
            hostname,
            token,
            file,
        } => {
            let command = CredentialsCommand::new(&config, &host)?;
            command.execute(&hostname, &token, file.as_deref())
        }
    })();

    if let Err(e) = result {
        exit_with(&e);
    }
}
