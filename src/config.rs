//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::chain::{Chain, DEFAULT_BASE_SEPOLIA_RPC_URL};
use crate::deploy::BuildInfo;
use crate::wallet::{WalletConfig as ProviderWalletConfig, DEFAULT_APP_NAME};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub wallet: WalletConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Submission API configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the PHR backend, e.g. `http://localhost:8000`
    pub base_url: Option<String>,
}

/// Wallet provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Wallet-connect project id
    pub project_id: Option<String>,
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            project_id: None,
        }
    }
}

/// Network configuration. The chain itself is fixed to Base Sepolia.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
}

fn default_rpc_url() -> String {
    DEFAULT_BASE_SEPOLIA_RPC_URL.to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
        }
    }
}

/// Contract deployment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    /// Hex private key of the deployer account
    pub private_key: Option<String>,

    /// Block explorer API key used for source verification
    pub explorer_api_key: Option<String>,

    /// Compiled contract artifact (Hardhat artifact JSON)
    #[serde(default = "default_artifact")]
    pub artifact: PathBuf,

    /// Hardhat build-info file holding the compiler input for verification.
    /// Found through the artifact's `.dbg.json` when unset.
    pub build_info: Option<PathBuf>,

    #[serde(default = "default_confirmations")]
    pub confirmations: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_verify_poll_attempts")]
    pub verify_poll_attempts: u32,
}

fn default_artifact() -> PathBuf {
    PathBuf::from("contracts/artifacts/contracts/PHRRegistry.sol/PHRRegistry.json")
}

fn default_confirmations() -> u64 {
    5
}

fn default_poll_interval() -> u64 {
    2000 // Base produces a block every ~2 seconds
}

fn default_verify_poll_attempts() -> u32 {
    10
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            private_key: None,
            explorer_api_key: None,
            artifact: default_artifact(),
            build_info: None,
            confirmations: default_confirmations(),
            poll_interval_ms: default_poll_interval(),
            verify_poll_attempts: default_verify_poll_attempts(),
        }
    }
}

impl DeployConfig {
    /// Configured build-info path, else the one Hardhat recorded for the
    /// artifact
    pub fn build_info_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.build_info {
            return Some(path.clone());
        }

        match BuildInfo::locate(&self.artifact) {
            Ok(path) => {
                tracing::debug!("Using build-info {:?}", path);
                Some(path)
            }
            Err(e) => {
                tracing::debug!("No build-info next to {:?}: {}", self.artifact, e);
                None
            }
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `PHR_CONFIG`, default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            std::env::var("PHR_CONFIG").ok().map(PathBuf::from),
            dirs::config_dir().map(|p| p.join("phr-onchain").join("config.toml")),
            Some(PathBuf::from("./phr.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API
        if let Some(url) = var("PHR_API_BASE_URL") {
            self.api.base_url = Some(url);
        }

        // Wallet
        if let Some(project_id) = var("PHR_WALLET_CONNECT_PROJECT_ID") {
            self.wallet.project_id = Some(project_id);
        }

        // Network
        if let Some(rpc_url) = var("BASE_SEPOLIA_RPC_URL").filter(|v| !v.is_empty()) {
            self.network.rpc_url = rpc_url;
        }

        // Deployment secrets
        if let Some(key) = var("PRIVATE_KEY").filter(|v| !v.is_empty()) {
            self.deploy.private_key = Some(key);
        }
        if let Some(key) = var("BASESCAN_API_KEY").filter(|v| !v.is_empty()) {
            self.deploy.explorer_api_key = Some(key);
        }

        // Logging
        if let Some(level) = var("PHR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("PHR_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// The configured chain (Base Sepolia with the configured RPC URL)
    pub fn chain(&self) -> Chain {
        Chain::base_sepolia().with_rpc_url(self.network.rpc_url.clone())
    }

    /// Settings for the wallet provider
    pub fn wallet_config(&self) -> ProviderWalletConfig {
        ProviderWalletConfig::new(
            self.wallet.app_name.clone(),
            self.wallet.project_id.as_deref(),
            self.chain(),
        )
    }

    /// API base URL; there is no fallback
    pub fn api_base_url(&self) -> Result<&str, ConfigError> {
        self.api
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing {
                key: "api.base_url",
                env: "PHR_API_BASE_URL",
            })
    }

    /// Deployer private key; there is no fallback
    pub fn private_key(&self) -> Result<&str, ConfigError> {
        self.deploy
            .private_key
            .as_deref()
            .ok_or(ConfigError::Missing {
                key: "deploy.private_key",
                env: "PRIVATE_KEY",
            })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Missing setting `{key}` (set it in the config file or via {env})")]
    Missing {
        key: &'static str,
        env: &'static str,
    },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PHR On-Chain Configuration
#
# Environment variables override these settings:
# - PHR_API_BASE_URL
# - PHR_WALLET_CONNECT_PROJECT_ID
# - BASE_SEPOLIA_RPC_URL
# - PRIVATE_KEY
# - BASESCAN_API_KEY
# - PHR_LOG_LEVEL
# - PHR_LOG_FORMAT

[api]
# Base URL of the PHR backend
base_url = "http://localhost:8000"

[wallet]
# Name shown by wallets when connecting
app_name = "PHR On-Chain"

# Wallet-connect project id (placeholder used when unset)
# project_id = ""

[network]
# Base Sepolia RPC endpoint
rpc_url = "https://sepolia.base.org"

[deploy]
# Deployer key and explorer API key are best supplied via
# PRIVATE_KEY and BASESCAN_API_KEY.

# Compiled registry contract
artifact = "contracts/artifacts/contracts/PHRRegistry.sol/PHRRegistry.json"

# Hardhat build-info file used for source verification
# (default: found through the artifact's .dbg.json)
# build_info = "contracts/artifacts/build-info/<hash>.json"

# Confirmations to wait for after the deployment is mined
confirmations = 5

# Receipt / block polling interval (ms)
poll_interval_ms = 2000

# How many times to poll the explorer for the verification status
verify_poll_attempts = 10

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
