use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::library::profile::LibraryProfile;

pub const DEFAULT_CONFIG_FILE: &str = "formsmith.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "formsmith",
    version,
    about = "Segment, edit, preview and generate component-library form markup"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Component library profile: v3, v4 or v5
    #[arg(long, global = true)]
    pub library: Option<LibraryProfile>,

    /// Completion endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Completion model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Path to config file (default: formsmith.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the blocks of a markup file with their ids and widget types
    Blocks {
        /// Markup file
        file: PathBuf,
    },

    /// Interpret a markup file and print the rendered outline
    Preview {
        /// Markup file
        file: PathBuf,
    },

    /// Change structured fields of one block and print the new document
    Edit {
        /// Markup file
        file: PathBuf,

        /// Block position, starting at 1
        #[arg(long)]
        block: usize,

        /// Field assignment, e.g. --set placeholder="Your email"
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,

        /// Write the result back to the file instead of printing it
        #[arg(long, default_value_t = false)]
        in_place: bool,
    },

    /// Print the decoded structured fields of one block as JSON
    Fields {
        /// Markup file
        file: PathBuf,

        /// Block position, starting at 1
        #[arg(long)]
        block: usize,
    },

    /// Generate markup from a natural-language prompt
    Generate {
        /// What to build or change
        #[arg(long)]
        prompt: String,

        /// Current markup to send as context
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Completion backend: proxy, chat or mock
        #[arg(long)]
        backend: Option<BackendKind>,
    },

    /// List the insertable component snippets
    Catalog,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Proxy,
    Chat,
    Mock,
}

/// Optional YAML config file: `formsmith.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,

    pub endpoint: Option<String>,

    pub model: Option<String>,

    /// Environment variable holding the bearer token for the chat backend.
    #[serde(default = "default_token_env")]
    pub api_token_env: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            endpoint: None,
            model: None,
            api_token_env: default_token_env(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CompletionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub library: LibraryProfile,

    /// JSON file mirroring the render error log.
    pub error_log: Option<PathBuf>,

    #[serde(default = "default_error_log_capacity")]
    pub error_log_capacity: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            library: LibraryProfile::default(),
            error_log: None,
            error_log_capacity: default_error_log_capacity(),
        }
    }
}

// Serde default helpers
fn default_backend() -> BackendKind { BackendKind::Proxy }
fn default_token_env() -> String { "HF_API_TOKEN".to_string() }
fn default_max_tokens() -> u32 { 1000 }
fn default_temperature() -> f32 { 0.7 }
fn default_timeout_secs() -> u64 { 60 }
fn default_error_log_capacity() -> usize { 10 }

// ============================================================================
// Config File Loading
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {source}")]
    Io { path: String, source: std::io::Error },

    #[error("invalid config file '{path}': {source}")]
    Yaml { path: String, source: serde_yaml::Error },
}

/// Load config from a YAML file, reporting read and parse failures.
pub fn load_config_strict(path: &str) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_string(),
        source,
    })
}

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match load_config_strict(config_path) {
        Ok(config) => config,
        Err(ConfigError::Io { .. }) => AppConfig::default(),
        Err(e) => {
            tracing::warn!(error = %e, "using default configuration");
            AppConfig::default()
        }
    }
}

// ============================================================================
// Resolution (CLI > config file > defaults)
// ============================================================================

/// Settings after merging CLI flags over the config file.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub library: LibraryProfile,
    pub backend: BackendKind,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub completion: CompletionConfig,
    pub preview: PreviewConfig,
}

pub fn resolve_settings(cli: &Cli, config: AppConfig, backend: Option<BackendKind>) -> ResolvedSettings {
    ResolvedSettings {
        library: cli.library.unwrap_or(config.preview.library),
        backend: backend.unwrap_or(config.completion.backend),
        endpoint: cli.endpoint.clone().or_else(|| config.completion.endpoint.clone()),
        model: cli.model.clone().or_else(|| config.completion.model.clone()),
        completion: config.completion,
        preview: config.preview,
    }
}
