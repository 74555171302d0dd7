// Netprofile - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Netprofile
//!
//! Store named IPv4 interface profiles (static or DHCP) and apply them to
//! network adapters through the system configuration tool.
//!
//! Without a subcommand the interactive menu is started.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};

mod backend;
mod directory;
mod engine;
mod executor;
mod models;
mod planner;
mod privilege;
mod session;
mod storage;
mod store;
mod ui;
mod validator;

use backend::NetshProvider;
use engine::{AdapterSelector, FixedSelector};
use models::{AppConfig, ApplicationResult, Error, Result};
use session::Session;
use storage::JsonProfileRepository;
use ui::{menu, Console};

/// Human-readable application name.
pub const APP_NAME: &str = "Netprofile";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status when the process lacks elevated rights.
const EXIT_NOT_ELEVATED: u8 = 2;

/// Exit status when the configuration tool cannot be run.
const EXIT_TOOL_MISSING: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "netprofile",
    version,
    about = "Apply named IPv4 profiles to network adapters"
)]
struct Cli {
    /// Settings file (default: <config dir>/netprofile/settings.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Profiles document, overriding the settings file
    #[arg(long, global = true, value_name = "FILE")]
    profiles: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive menu (default)
    Interactive,
    /// List network adapters
    Adapters,
    /// List stored profiles
    List,
    /// Create or replace a profile interactively
    Create,
    /// Apply a stored profile
    Apply {
        /// Profile name
        name: String,
        /// Adapter to use if the profile's adapter is gone
        #[arg(long)]
        adapter: Option<String>,
    },
    /// Switch an adapter to DHCP for address and DNS
    Dhcp {
        /// Adapter name (prompted for when omitted)
        adapter: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings_file = cli
        .config
        .clone()
        .unwrap_or_else(storage::default_settings_file);
    init_logging(cli.debug, &settings_file);
    info!("Starting {} v{}", APP_NAME, VERSION);

    match run(cli, settings_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Set up the tracing subscriber on stderr.
///
/// `--debug` wins over the configured level; `RUST_LOG` directives are kept.
fn init_logging(debug: bool, settings_file: &Path) {
    let level = if debug {
        "debug".to_string()
    } else {
        // Settings are loaded properly (with logging) once the subscriber exists
        AppConfig::load_from_file(settings_file)
            .map(|c| c.log_level)
            .unwrap_or_else(|_| "info".to_string())
    };
    let directive = level
        .parse::<tracing_subscriber::filter::Directive>()
        .unwrap_or_else(|_| tracing::Level::INFO.into());

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(directive);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_status(error: &Error) -> u8 {
    match error {
        Error::PrivilegeRequired => EXIT_NOT_ELEVATED,
        Error::ProviderUnavailable(_) => EXIT_TOOL_MISSING,
        _ => 1,
    }
}

/// Resolve settings and the profiles document location.
///
/// The privilege check comes first so a rejected run leaves no files behind.
fn prepare(
    settings_file: &Path,
    profiles: Option<PathBuf>,
    elevated: bool,
) -> Result<(AppConfig, PathBuf)> {
    if !elevated {
        return Err(Error::PrivilegeRequired);
    }
    let config = storage::load_settings(settings_file);
    let profiles_file = match profiles {
        Some(path) => path,
        None => storage::profiles_file_for(&config, settings_file),
    };
    debug!("Profiles document: {:?}", profiles_file);
    Ok((config, profiles_file))
}

fn run(cli: Cli, settings_file: PathBuf) -> Result<()> {
    let (config, profiles_file) = prepare(&settings_file, cli.profiles, privilege::is_elevated())?;

    let provider = NetshProvider::new(&config)?;
    let repository = JsonProfileRepository::new(&profiles_file);
    let mut session = Session::open(config, provider, Box::new(repository));
    let mut console = Console::stdio();

    if let Some(reason) = session.load_error() {
        console.say(format!("Warning: could not load profiles: {}", reason));
        console.say(format!(
            "The current file will be copied to {:?} before it is overwritten.",
            storage::backup_file_for(&profiles_file)
        ));
    }
    for entry in session.rejected() {
        warn!("Skipped profile '{}': {}", entry.name, entry.reason);
        console.say(format!(
            "Warning: skipped profile '{}': {}",
            entry.name, entry.reason
        ));
    }

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => menu::run(&mut session, &mut console),
        Commands::Adapters => menu::list_adapters(&session, &mut console),
        Commands::List => {
            menu::list_profiles(&session, &mut console);
            Ok(())
        }
        Commands::Create => menu::create_profile(&mut session, &mut console),
        Commands::Apply { name, adapter } => {
            let mut fixed;
            let selector: &mut dyn AdapterSelector = match adapter {
                Some(adapter) => {
                    fixed = FixedSelector(Some(adapter));
                    &mut fixed
                }
                None => &mut console,
            };
            let outcome = session.apply(&name, selector)?;
            menu::report_apply(&mut console, &outcome);
            check_result(&outcome.applied.result)
        }
        Commands::Dhcp { adapter: None } => menu::switch_to_dhcp(&mut session, &mut console),
        Commands::Dhcp {
            adapter: Some(adapter),
        } => {
            let result = session.apply_dhcp(&adapter)?;
            menu::report_application(&mut console, &result);
            check_result(&result)
        }
    }
}

/// Turn an unsuccessful application into an error for the exit status.
fn check_result(result: &ApplicationResult) -> Result<()> {
    if result.is_success() {
        return Ok(());
    }
    let failed = match result.aborted_at() {
        Some(index) => result.steps.get(index),
        None => result.failures().next(),
    };
    let operation = failed.map(|s| s.operation.name()).unwrap_or("Apply");
    let reason = if result.is_completed() {
        format!(
            "{} of {} operation(s) failed",
            result.failure_count(),
            result.steps.len()
        )
    } else {
        result.message.clone()
    };
    Err(Error::operation_failed(operation, &result.adapter, reason))
}
