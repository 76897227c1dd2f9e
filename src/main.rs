//! herakles-sysmon - version 0.1.0
//!
//! Command-line front end for the herakles_sysmon library.
//! This is the main entry point that initializes logging, resolves the
//! configuration and dispatches subcommands.

mod cli;
mod commands;
mod config;
mod startup_checks;

use clap::Parser;
use tracing::{debug, info, Level};

use cli::{Args, Commands, LogLevel};
use commands::{command_check, command_list, command_process, command_snapshot, command_system};
use config::{
    config_file_path, resolve_config, show_config, validate_effective_config, Config,
    DEFAULT_INTERVAL_MS, DEFAULT_TOP_N,
};

/// Initializes tracing logging subsystem with configured log level.
fn setup_logging(config: &Config) {
    let level = config.log_level.unwrap_or(LogLevel::Warn);
    let max_level = match level {
        LogLevel::Off => return,
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    };

    // Reports go to stdout, logs to stderr
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    debug!("Logging initialized with level: {:?}", level);
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = resolve_config(&args).map_err(|e| anyhow::anyhow!("{}", e))?;

    if args.check_config {
        if let Err(e) = validate_effective_config(&config) {
            eprintln!("❌ Configuration invalid: {}", e);
            std::process::exit(1);
        }
        println!("✅ Configuration is valid");
        return Ok(());
    }

    if args.show_config {
        return show_config(&config, args.config_format).map_err(|e| anyhow::anyhow!("{}", e));
    }

    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }

    setup_logging(&config);

    if !args.no_config {
        if let Some(path) = config_file_path(args.config.as_deref()) {
            info!("Loaded configuration from: {}", path.display());
        }
    }

    let fs = config.proc_fs();
    debug!(
        "Reading from {} (clock ticks: {})",
        fs.root().display(),
        fs.clock_ticks()
    );

    let command = args.command.unwrap_or(Commands::System {
        sample: false,
        interval_ms: None,
    });

    match command {
        Commands::System {
            sample,
            interval_ms,
        } => {
            let window = (sample || interval_ms.is_some())
                .then(|| config.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS));
            command_system(&fs, window, args.format)
        }
        Commands::Process { pid } => command_process(&fs, pid, args.format),
        Commands::List { .. } => command_list(
            &fs,
            config.top_n.unwrap_or(DEFAULT_TOP_N),
            config.sort_by.unwrap_or(cli::SortKey::Cpu),
            args.format,
        ),
        Commands::Snapshot => command_snapshot(&fs),
        Commands::Check => command_check(&fs),
    }
}
