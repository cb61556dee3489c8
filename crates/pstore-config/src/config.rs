// crates/pstore-config/src/config.rs
// ============================================================================
// Module: Parameter Store Configuration
// Description: Configuration loading, environment overlay, and validation.
// Purpose: Provide strict, fail-closed settings for every walkthrough tool.
// Dependencies: pstore-core, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is resolved in three layers: an optional TOML file, then
//! the standard AWS environment variables, then caller overrides (for
//! example CLI flags). [`PstoreConfig::validate`] runs last and rejects
//! anything a client could not use. Secrets are never printed by `Debug`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use pstore_core::AuditSink;
use pstore_core::FileAuditSink;
use pstore_core::NoopAuditSink;
use pstore_core::ParameterName;
use pstore_core::ParameterType;
use pstore_core::StderrAuditSink;
use pstore_core::WalkthroughSettings;
use pstore_core::core::requests::MAX_RESULTS_PER_PAGE;
use pstore_core::runtime::walkthrough::DEFAULT_PATH;
use pstore_core::runtime::walkthrough::DEFAULT_PATH_MAX_RESULTS;
use pstore_core::runtime::walkthrough::DEMO_VALUE;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "pstore.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PSTORE_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

/// Environment variable naming the region.
pub const ENV_REGION: &str = "AWS_REGION";
/// Environment variable naming a custom service endpoint.
pub const ENV_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
/// Environment variable holding the static access key id.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding the static secret key.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Environment variable holding the optional session token.
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
/// Environment variable naming the target parameter.
pub const ENV_PARAMETER_NAME: &str = "AWS_PARAMETER_NAME";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Root Configuration
// ============================================================================

/// Complete walkthrough configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PstoreConfig {
    /// Service connection settings.
    #[serde(default)]
    pub aws: AwsSettings,
    /// Target parameter and walkthrough inputs.
    #[serde(default)]
    pub parameter: ParameterSettings,
    /// Audit log destination.
    #[serde(default)]
    pub audit: AuditConfig,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PstoreConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The explicit path wins, then `PSTORE_CONFIG`, then `pstore.toml` when
    /// it exists. With none of those, defaults are returned. The result is
    /// not validated; overlay the environment first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.source = Some(resolved);
        Ok(config)
    }

    /// Parses configuration from TOML text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads the file, overlays the process environment, and validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn from_environment(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlays AWS environment variables onto the loaded settings.
    ///
    /// Empty variables are ignored. The lookup is injectable so callers can
    /// supply values without touching the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(region) = read(ENV_REGION) {
            self.aws.region = Some(region);
        }
        if let Some(endpoint) = read(ENV_ENDPOINT_URL) {
            self.aws.endpoint_url = Some(endpoint);
        }
        if let Some(access_key_id) = read(ENV_ACCESS_KEY_ID) {
            self.aws.access_key_id = Some(access_key_id);
        }
        if let Some(secret) = read(ENV_SECRET_ACCESS_KEY) {
            self.aws.secret_access_key = Some(secret);
        }
        if let Some(token) = read(ENV_SESSION_TOKEN) {
            self.aws.session_token = Some(token);
        }
        if let Some(name) = read(ENV_PARAMETER_NAME) {
            self.parameter.name = Some(name);
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_for(NameRequirement::Required)
    }

    /// Validates the configuration for a command with the given name needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate_for(&self, names: NameRequirement) -> Result<(), ConfigError> {
        self.aws.validate()?;
        self.parameter.validate(names)?;
        self.audit.validate()
    }

    /// Builds walkthrough inputs from the parameter settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no parameter name is configured.
    pub fn walkthrough_settings(&self) -> Result<WalkthroughSettings, ConfigError> {
        self.parameter.walkthrough_settings()
    }
}

// ============================================================================
// SECTION: Service Settings
// ============================================================================

/// Whether a command reads `parameter.name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRequirement {
    /// The command addresses the configured record.
    Required,
    /// The command never reads the configured name.
    Optional,
}

/// Credential resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// Use the access key, secret, and session token from configuration.
    Static,
    /// Delegate to the SDK's default provider chain.
    #[default]
    DefaultChain,
}

/// Service connection settings.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSettings {
    /// Region identifier; the SDK default applies when absent.
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint, for local emulators.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Credential resolution strategy.
    #[serde(default)]
    pub credentials: CredentialSource,
    /// Static access key id.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Static secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Optional static session token.
    #[serde(default)]
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsSettings")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("credentials", &self.credentials)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AwsSettings {
    /// Validates service settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(region) = &self.region
            && region.trim().is_empty()
        {
            return Err(ConfigError::Invalid("aws.region must be non-empty".to_string()));
        }
        if let Some(endpoint) = &self.endpoint_url {
            let parsed = Url::parse(endpoint.trim()).map_err(|err| {
                ConfigError::Invalid(format!("aws.endpoint_url is not a valid url: {err}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(
                    "aws.endpoint_url must use http:// or https://".to_string(),
                ));
            }
        }
        if self.credentials == CredentialSource::Static {
            if is_blank(self.access_key_id.as_deref()) {
                return Err(ConfigError::Invalid(
                    "static credentials require an access key id".to_string(),
                ));
            }
            if is_blank(self.secret_access_key.as_deref()) {
                return Err(ConfigError::Invalid(
                    "static credentials require a secret access key".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Parameter Settings
// ============================================================================

/// Target parameter and walkthrough inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSettings {
    /// Target record name.
    #[serde(default)]
    pub name: Option<String>,
    /// Value written by the create-or-update step.
    #[serde(default = "default_value")]
    pub value: String,
    /// Type tag written by the create-or-update step.
    #[serde(default = "default_parameter_type", rename = "type")]
    pub parameter_type: ParameterType,
    /// Path read by the path-prefix step.
    #[serde(default = "default_path")]
    pub path: String,
    /// Whether the path-prefix step descends below one level.
    #[serde(default = "default_recursive")]
    pub recursive: bool,
    /// Optional type restriction for the path-prefix step.
    #[serde(default = "default_type_filter")]
    pub type_filter: Option<ParameterType>,
    /// Page size for the path-prefix step.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl Default for ParameterSettings {
    fn default() -> Self {
        Self {
            name: None,
            value: default_value(),
            parameter_type: default_parameter_type(),
            path: default_path(),
            recursive: default_recursive(),
            type_filter: default_type_filter(),
            max_results: default_max_results(),
        }
    }
}

impl ParameterSettings {
    /// Validates parameter settings.
    fn validate(&self, names: NameRequirement) -> Result<(), ConfigError> {
        if names == NameRequirement::Required && is_blank(self.name.as_deref()) {
            return Err(ConfigError::Invalid(format!(
                "parameter.name must be set (or export {ENV_PARAMETER_NAME})"
            )));
        }
        if self.value.is_empty() {
            return Err(ConfigError::Invalid("parameter.value must be non-empty".to_string()));
        }
        if !self.path.starts_with('/') {
            return Err(ConfigError::Invalid("parameter.path must start with '/'".to_string()));
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS_PER_PAGE {
            return Err(ConfigError::Invalid(format!(
                "parameter.max_results must be between 1 and {MAX_RESULTS_PER_PAGE}"
            )));
        }
        Ok(())
    }

    /// Builds walkthrough inputs.
    fn walkthrough_settings(&self) -> Result<WalkthroughSettings, ConfigError> {
        let name = self
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "parameter.name must be set (or export {ENV_PARAMETER_NAME})"
                ))
            })?;
        Ok(WalkthroughSettings {
            name: ParameterName::new(name),
            value: self.value.clone(),
            parameter_type: self.parameter_type,
            path: self.path.clone(),
            recursive: self.recursive,
            type_filter: self.type_filter,
            max_results: self.max_results,
        })
    }
}

// ============================================================================
// SECTION: Audit Settings
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    #[serde(rename = "none")]
    Disabled,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Audit log destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sink == AuditSinkKind::File && self.path.is_none() {
            return Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()));
        }
        Ok(())
    }

    /// Opens the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file sink cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn AuditSink>, ConfigError> {
        match self.sink {
            AuditSinkKind::Disabled => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("audit.path is required for the file sink".to_string())
                })?;
                let sink = FileAuditSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path, returning `None` when no file applies.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR)
        && !env_path.trim().is_empty()
    {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(fallback.is_file().then_some(fallback))
}

/// Returns true when the value is missing or whitespace.
fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

/// Default value written by the walkthrough.
fn default_value() -> String {
    DEMO_VALUE.to_string()
}

/// Default type written by the walkthrough.
const fn default_parameter_type() -> ParameterType {
    ParameterType::SecureString
}

/// Default path read by the walkthrough.
fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

/// Default recursion for path reads.
const fn default_recursive() -> bool {
    true
}

/// Default type filter for path reads.
const fn default_type_filter() -> Option<ParameterType> {
    Some(ParameterType::SecureString)
}

/// Default page size for path reads.
const fn default_max_results() -> u32 {
    DEFAULT_PATH_MAX_RESULTS
}
