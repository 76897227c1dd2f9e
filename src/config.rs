//! Configuration management for herakles-sysmon.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, Commands, ConfigFormat, LogLevel, SortKey};
use herakles_sysmon::procfs::{DEFAULT_OS_RELEASE, DEFAULT_PASSWD, DEFAULT_PROC_ROOT};
use herakles_sysmon::ProcFs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Effective configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Data sources
    #[serde(alias = "proc-root")]
    pub proc_root: Option<PathBuf>,
    #[serde(alias = "os-release-path")]
    pub os_release_path: Option<PathBuf>,
    #[serde(alias = "passwd-path")]
    pub passwd_path: Option<PathBuf>,
    /// Overrides sysconf(_SC_CLK_TCK)
    #[serde(alias = "clock-ticks")]
    pub clock_ticks: Option<u64>,

    // Logging
    #[serde(alias = "log-level")]
    pub log_level: Option<LogLevel>,

    // Process table
    #[serde(alias = "top-n")]
    pub top_n: Option<usize>,
    #[serde(alias = "sort-by")]
    pub sort_by: Option<SortKey>,

    /// Sampling window for `system --sample`
    #[serde(alias = "interval-ms")]
    pub interval_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: Some(PathBuf::from(DEFAULT_PROC_ROOT)),
            os_release_path: Some(PathBuf::from(DEFAULT_OS_RELEASE)),
            passwd_path: Some(PathBuf::from(DEFAULT_PASSWD)),
            clock_ticks: None,
            log_level: Some(LogLevel::Warn),
            top_n: Some(DEFAULT_TOP_N),
            sort_by: Some(SortKey::Cpu),
            interval_ms: Some(DEFAULT_INTERVAL_MS),
        }
    }
}

impl Config {
    /// Builds the probe described by this config.
    pub fn proc_fs(&self) -> ProcFs {
        let mut fs = ProcFs::new(
            self.proc_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROC_ROOT)),
        );
        if let Some(p) = &self.os_release_path {
            fs = fs.with_os_release(p);
        }
        if let Some(p) = &self.passwd_path {
            fs = fs.with_passwd(p);
        }
        if let Some(tck) = self.clock_ticks {
            fs = fs.with_clock_ticks(tck);
        }
        fs
    }
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.top_n == Some(0) {
        return Err("top_n must be greater than 0".into());
    }

    if cfg.clock_ticks == Some(0) {
        return Err("clock_ticks must be greater than 0 when set".into());
    }

    if cfg.interval_ms == Some(0) {
        return Err("interval_ms must be greater than 0".into());
    }

    if let Some(root) = &cfg.proc_root {
        if !root.is_dir() {
            return Err(format!("proc_root is not a directory: {}", root.display()).into());
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(root) = &args.proc_root {
        config.proc_root = Some(root.clone());
    }

    if let Some(level) = args.log_level {
        config.log_level = Some(level);
    }

    match &args.command {
        Some(Commands::List { top, sort }) => {
            if let Some(n) = top {
                config.top_n = Some(*n);
            }
            if let Some(key) = sort {
                config.sort_by = Some(*key);
            }
        }
        Some(Commands::System {
            interval_ms: Some(ms),
            ..
        }) => {
            config.interval_ms = Some(*ms);
        }
        _ => {}
    }

    Ok(config)
}

/// The config file that will be loaded: the explicit path if it exists,
/// otherwise the first existing default location.
pub fn config_file_path(path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = path {
        return p.exists().then(|| PathBuf::from(p));
    }

    // Try default locations
    let defaults = [
        "/etc/herakles/sysmon.yaml",
        "/etc/herakles/sysmon.yml",
        "/etc/herakles/sysmon.json",
        "./herakles-sysmon.yaml",
        "./herakles-sysmon.yml",
        "./herakles-sysmon.json",
    ];

    defaults
        .iter()
        .find(|p| Path::new(p).exists())
        .map(PathBuf::from)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = config_file_path(path) else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&path)?;

    let loaded: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        // Default to YAML
        _ => serde_yaml::from_str(&content)?,
    };

    Ok(merge_with_defaults(loaded))
}

/// Fills fields the file left unset with their defaults.
fn merge_with_defaults(loaded: Config) -> Config {
    let d = Config::default();
    Config {
        proc_root: loaded.proc_root.or(d.proc_root),
        os_release_path: loaded.os_release_path.or(d.os_release_path),
        passwd_path: loaded.passwd_path.or(d.passwd_path),
        clock_ticks: loaded.clock_ticks.or(d.clock_ticks),
        log_level: loaded.log_level.or(d.log_level),
        top_n: loaded.top_n.or(d.top_n),
        sort_by: loaded.sort_by.or(d.sort_by),
        interval_ms: loaded.interval_ms.or(d.interval_ms),
    }
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    println!("{output}");
    Ok(())
}
