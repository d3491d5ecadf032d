// subhub: Submodule manager for git hub repositories
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   List | Status | Init | Update | Remote | Add | Remove | Exec
//!   Options | Inis | Version
//! ```

use std::process::ExitCode;

use subhub::cli::global::GlobalOptions;
use subhub::cli::{self, Command};
use subhub::cmd::config::{run_inis_command, run_options_command};
use subhub::cmd::list::run_list_command;
use subhub::cmd::submodule::{
    Hub, run_add_command, run_exec_command, run_init_command, run_remote_command,
    run_remove_command, run_status_command, run_update_command,
};
use subhub::config::loader::ConfigLoader;
use subhub::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use subhub::error::{Result, bail_out};
use subhub::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Invalid option: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let config_files = loader.format_loaded_files();
    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(files = ?config_files, "configuration loaded");

    match dispatch_command(&cli, &config, &config_files).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, config_files: &[String]) -> Result<()> {
    let hub = Hub::from_config(config).with_refresh(!cli.global.no_refresh);

    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(config_files);
            Ok(())
        }
        Some(Command::List(args)) => run_list_command(args, &hub).await,
        Some(Command::Status) => run_status_command(&hub).await,
        Some(Command::Init(args)) => run_init_command(args, &hub).await,
        Some(Command::Update(args)) => run_update_command(args, &hub).await,
        Some(Command::Remote(args)) => run_remote_command(args, &hub).await,
        Some(Command::Add(args)) => run_add_command(args, &hub).await,
        Some(Command::Remove(args)) => run_remove_command(args, &hub).await,
        Some(Command::Exec(args)) => run_exec_command(args, &hub).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(bail_out("no command specified").into())
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

/// Layers: `subhub.toml` < `--ini` files < `SUBHUB_*` env < `--set` and flags.
fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}
