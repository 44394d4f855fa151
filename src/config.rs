//! Configuration management for titlematch
//!
//! Supports:
//! - TOML config file at XDG locations
//! - Environment variable overrides
//! - Command-line argument overrides

use std::env;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File, FileFormat};
use env_logger::fmt::WriteStyle;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use titlematch::{SearchOrder, DEFAULT_THRESHOLD};

use crate::cli::{GlobalOpts, OutputFormat};

const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Runtime context containing resolved configuration
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    pub global: GlobalOpts,
    pub config: AppConfig,
    config_path: PathBuf,
}

impl RuntimeContext {
    pub fn new(global: &GlobalOpts) -> Result<Self> {
        let config_path = resolve_config_path(global.config.as_ref())?;
        let config = load_config(&config_path, global)?;

        Ok(Self {
            global: global.clone(),
            config,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn init_logging(&self) -> Result<()> {
        if self.global.quiet {
            log::set_max_level(LevelFilter::Off);
            return Ok(());
        }

        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.config.logging.level),
        );

        if let Some(level) = self.cli_log_level() {
            builder.filter_level(level);
        }

        let force_color = env::var_os("FORCE_COLOR").is_some();
        let disable_color = self.global.no_color
            || env::var_os("NO_COLOR").is_some()
            || (!force_color && !std::io::stderr().is_terminal());

        if disable_color {
            builder.write_style(WriteStyle::Never);
        } else if force_color {
            builder.write_style(WriteStyle::Always);
        } else {
            builder.write_style(WriteStyle::Auto);
        }

        builder.try_init().or_else(|err| {
            if self.global.verbose > 0 {
                eprintln!("logger already initialized: {err}");
            }
            Ok(())
        })
    }

    /// Level requested on the command line; `None` defers to the config file
    fn cli_log_level(&self) -> Option<LevelFilter> {
        if self.global.trace {
            Some(LevelFilter::Trace)
        } else if self.global.debug {
            Some(LevelFilter::Debug)
        } else {
            match self.global.verbose {
                0 => None,
                1 => Some(LevelFilter::Info),
                2 => Some(LevelFilter::Debug),
                _ => Some(LevelFilter::Trace),
            }
        }
    }

    /// Get the effective similarity threshold
    pub fn threshold(&self, cli: Option<f64>) -> f64 {
        cli.unwrap_or(self.config.search.threshold)
    }

    /// Get the effective result ordering
    pub fn order(&self, cli: Option<SearchOrder>) -> SearchOrder {
        cli.unwrap_or(self.config.search.order)
    }

    /// Get the effective page size
    pub fn per_page(&self, cli: Option<usize>) -> usize {
        cli.unwrap_or(self.config.search.per_page)
    }

    /// Get the effective output format
    pub fn output_format(&self) -> OutputFormat {
        if self.global.json {
            return OutputFormat::Json;
        }
        self.global
            .output_format
            .unwrap_or(match self.config.output.format.as_str() {
                "json" => OutputFormat::Json,
                "yaml" => OutputFormat::Yaml,
                "table" => OutputFormat::Table,
                _ => OutputFormat::Auto,
            })
    }

    pub fn no_headers(&self) -> bool {
        self.global.no_headers || self.config.output.no_headers
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub threshold: f64,
    pub per_page: usize,
    pub order: SearchOrder,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            per_page: 10,
            order: SearchOrder::Ranked,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub no_headers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "auto".to_string(),
            no_headers: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn resolve_config_path(override_path: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        let expanded = expand_path(path)?;
        if expanded.is_dir() {
            return Ok(expanded.join("config.toml"));
        }
        return Ok(expanded);
    }

    Ok(default_config_dir()?.join("config.toml"))
}

fn load_config(config_path: &Path, global: &GlobalOpts) -> Result<AppConfig> {
    // Create default config if it doesn't exist
    if !config_path.exists() {
        write_default_config(config_path)?;
    }

    let defaults = SearchConfig::default();
    let config = Config::builder()
        .set_default("search.threshold", defaults.threshold)?
        .set_default("search.per_page", defaults.per_page as i64)?
        .set_default("search.order", "ranked")?
        .set_default("output.format", "auto")?
        .set_default("output.no_headers", false)?
        .set_default("logging.level", "warn")?
        .add_source(
            File::from(config_path)
                .format(FileFormat::Toml)
                .required(false),
        )
        // TITLEMATCH__SEARCH__THRESHOLD=0.8 and friends
        .add_source(
            Environment::with_prefix("TITLEMATCH")
                .try_parsing(true)
                .separator("__"),
        )
        .build()
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .context("parsing configuration")?;

    // Apply CLI overrides
    if global.no_headers {
        app_config.output.no_headers = true;
    }

    Ok(app_config)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }

    let config = AppConfig::default();
    let toml = toml::to_string_pretty(&config).context("serializing default config")?;

    let content = format!(
        "# titlematch configuration\n\
        # File: {}\n\
        #\n\
        # Environment variables:\n\
        #   TITLEMATCH_CONFIG - Path to this file\n\
        #   TITLEMATCH__*     - Override any config value (e.g., TITLEMATCH__SEARCH__THRESHOLD=0.8)\n\
        \n\
        {toml}",
        path.display()
    );

    fs::write(path, content).with_context(|| format!("writing config to {}", path.display()))
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    if let Some(text) = path.to_str() {
        let expanded = shellexpand::full(text).context("expanding path")?;
        Ok(PathBuf::from(expanded.to_string()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn default_config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir).join(APP_NAME));
    }

    if let Some(mut dir) = dirs::config_dir() {
        dir.push(APP_NAME);
        return Ok(dir);
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join(APP_NAME))
        .ok_or_else(|| anyhow!("unable to determine configuration directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts_with_config(path: &Path) -> GlobalOpts {
        GlobalOpts {
            config: Some(path.to_path_buf()),
            ..GlobalOpts::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.search.threshold, 0.6);
        assert_eq!(config.search.per_page, 10);
        assert_eq!(config.search.order, SearchOrder::Ranked);
        assert_eq!(config.output.format, "auto");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[search]"));
        assert!(toml.contains("order = \"ranked\""));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_missing_config_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let ctx = RuntimeContext::new(&opts_with_config(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(ctx.config_path(), path);
        assert_eq!(ctx.config.search.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_directory_override_resolves_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RuntimeContext::new(&opts_with_config(dir.path())).unwrap();
        assert_eq!(ctx.config_path(), dir.path().join("config.toml"));
    }

    #[test]
    fn test_file_values_and_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[search]\nthreshold = 0.8\nper_page = 5\norder = \"input\"\n\n[output]\nformat = \"yaml\"\n",
        )
        .unwrap();

        let ctx = RuntimeContext::new(&opts_with_config(&path)).unwrap();
        assert_eq!(ctx.threshold(None), 0.8);
        assert_eq!(ctx.threshold(Some(0.3)), 0.3);
        assert_eq!(ctx.per_page(None), 5);
        assert_eq!(ctx.order(None), SearchOrder::Input);
        assert_eq!(ctx.order(Some(SearchOrder::Ranked)), SearchOrder::Ranked);
        assert_eq!(ctx.output_format(), OutputFormat::Yaml);
    }

    #[test]
    fn test_json_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = opts_with_config(dir.path());
        opts.json = true;
        let ctx = RuntimeContext::new(&opts).unwrap();
        assert_eq!(ctx.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_invalid_order_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\norder = \"sideways\"\n").unwrap();
        assert!(RuntimeContext::new(&opts_with_config(&path)).is_err());
    }
}
