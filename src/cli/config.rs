use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::{
    api::{client::HttpApi, error::ApiError},
    app::session::{DEFAULT_PROBE_TIMEOUT, ReprobePolicy},
    startup::sequencer::StartupSequencer,
};

pub const DEFAULT_CONFIG_FILE: &str = "copyflow.yaml";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "copyflow",
    version,
    about = "Client for the CopyFlow marketing recommendation service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the recommendation service
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to config file (default: copyflow.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Append a JSONL session trace to this file
    #[arg(long, global = true)]
    pub trace_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe the service once and print its connectivity status
    Health,

    /// Submit a product and print the recommended marketing strategy
    Analyze {
        /// Product name
        #[arg(long)]
        name: String,

        /// Product category
        #[arg(long)]
        category: String,

        /// Features, benefits and selling points
        #[arg(long)]
        description: String,

        /// Price (numeric text)
        #[arg(long, default_value = "")]
        price: String,

        /// Target audience: B2C, B2B, teenagers, professionals, families
        #[arg(long, default_value = "")]
        audience: String,

        /// Panel to print: overview, similar, content, insights, all
        #[arg(long, default_value = "overview")]
        tab: String,

        /// Print the normalized result as JSON instead of a panel
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `copyflow.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub startup: StartupConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartupConfig {
    #[serde(default = "default_step")]
    pub step: u8,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            step: 10,
            tick_interval_ms: 200,
            settle_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    #[serde(default)]
    pub reprobe_attempts: u32,

    #[serde(default = "default_reprobe_interval_ms")]
    pub reprobe_interval_ms: u64,

    /// How long `analyze` waits for a startup probe still out after the splash
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            reprobe_attempts: 0,
            reprobe_interval_ms: 2000,
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub file: Option<String>,
}

// Serde default helpers
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_step() -> u8 { 10 }
fn default_tick_interval_ms() -> u64 { 200 }
fn default_settle_ms() -> u64 { 500 }
fn default_reprobe_interval_ms() -> u64 { 2000 }
fn default_probe_timeout_ms() -> u64 { DEFAULT_PROBE_TIMEOUT.as_millis() as u64 }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

impl AppConfig {
    /// Apply CLI overrides on top of the file values.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(file) = &cli.trace_file {
            self.trace.file = Some(file.clone());
        }
        self
    }
}

pub fn build_sequencer(config: &StartupConfig) -> StartupSequencer {
    StartupSequencer::new(
        config.step,
        Duration::from_millis(config.tick_interval_ms),
        Duration::from_millis(config.settle_ms),
    )
}

pub fn build_api(config: &ApiConfig) -> Result<HttpApi, ApiError> {
    HttpApi::with_timeout(
        &config.base_url,
        config.request_timeout_secs.map(Duration::from_secs),
    )
}

pub fn build_reprobe_policy(config: &ConnectivityConfig) -> ReprobePolicy {
    ReprobePolicy {
        attempts: config.reprobe_attempts,
        interval: Duration::from_millis(config.reprobe_interval_ms),
    }
}

pub fn build_probe_timeout(config: &ConnectivityConfig) -> Duration {
    Duration::from_millis(config.probe_timeout_ms)
}
