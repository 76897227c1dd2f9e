//! CLI arguments and subcommands for herakles-sysmon.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Report output format
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Sort key for the process table
#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Cpu,
    Memory,
    Pid,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "herakles-sysmon",
    about = "System and per-process CPU/memory metrics from /proc",
    long_about = "System and per-process CPU/memory metrics from /proc.\n\n\
                  Reads the Linux /proc pseudo-filesystem and reports CPU utilization, \
                  memory utilization, uptime and a per-process table with owner, memory \
                  and lifetime CPU share.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root of the proc filesystem
    #[arg(long, global = true)]
    pub proc_root: Option<PathBuf>,

    /// Log level (defaults to the config value, then warn)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Output format for reports
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show system-wide CPU, memory, uptime and process counts (default)
    System {
        /// Measure CPU between two samples instead of since boot
        #[arg(long)]
        sample: bool,

        /// Sampling window in milliseconds (implies --sample)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Show metrics for a single process
    Process {
        /// Process id
        pid: u32,
    },

    /// Show a process table
    List {
        /// Number of rows to show
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },

    /// Print system summary and all processes as JSON
    Snapshot,

    /// Check that the proc filesystem is readable
    Check,
}
