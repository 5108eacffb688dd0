// crates/schema-form-config/src/config.rs
// ============================================================================
// Module: Schema Form Configuration
// Description: Configuration loading and validation for Schema Form.
// Purpose: Provide strict, fail-closed config parsing mapped onto core settings.
// Dependencies: schema-form-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with size and path limits. The
//! file path comes from the caller, else the `SCHEMA_FORM_CONFIG`
//! environment variable, else `schema-form.toml` in the working directory.
//! Every section is optional; omitted sections take the core defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use schema_form_core::AllOfMode;
use schema_form_core::DEFAULT_LABEL_PREFIX;
use schema_form_core::DEFAULT_MAX_DEPTH;
use schema_form_core::DEFAULT_SELECTOR_WIDGET;
use schema_form_core::FieldAuditSink;
use schema_form_core::FileAuditSink;
use schema_form_core::NoopAuditSink;
use schema_form_core::RequirednessConfig;
use schema_form_core::StderrAuditSink;
use schema_form_core::VariantResolverConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "schema-form.toml";
/// Environment variable overriding the config path.
pub const CONFIG_ENV_VAR: &str = "SCHEMA_FORM_CONFIG";
/// Maximum config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the untitled option label prefix.
pub const MAX_LABEL_PREFIX_LENGTH: usize = 64;
/// Maximum length of a selector widget name.
pub const MAX_WIDGET_NAME_LENGTH: usize = 64;
/// Upper bound for the requiredness recursion limit.
pub const MAX_REQUIREDNESS_DEPTH: usize = 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Schema Form configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFormConfig {
    /// Variant field settings.
    #[serde(default)]
    pub variants: VariantsConfig,
    /// Requiredness evaluation settings.
    #[serde(default)]
    pub requiredness: RequirednessSection,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl SchemaFormConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.variants.validate()?;
        self.requiredness.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the core variant resolver configuration.
    #[must_use]
    pub fn resolver_config(&self) -> VariantResolverConfig {
        VariantResolverConfig {
            label_prefix: self.variants.label_prefix.clone(),
            selector_widget: self.variants.selector_widget.clone(),
        }
    }

    /// Returns the core requiredness configuration.
    #[must_use]
    pub const fn requiredness_config(&self) -> RequirednessConfig {
        RequirednessConfig {
            all_of: self.requiredness.all_of,
            max_depth: self.requiredness.max_depth,
        }
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log file cannot be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn FieldAuditSink>, ConfigError> {
        if !self.audit.enabled {
            return Ok(Arc::new(NoopAuditSink));
        }
        match &self.audit.path {
            Some(path) => {
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(format!("audit log {path}: {err}")))?;
                Ok(Arc::new(sink))
            }
            None => Ok(Arc::new(StderrAuditSink)),
        }
    }
}

/// Variant field configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantsConfig {
    /// Label prefix for untitled options ("Option 1", ...).
    #[serde(default = "default_label_prefix")]
    pub label_prefix: String,
    /// Widget used for the option selector.
    #[serde(default = "default_selector_widget")]
    pub selector_widget: String,
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            label_prefix: default_label_prefix(),
            selector_widget: default_selector_widget(),
        }
    }
}

impl VariantsConfig {
    /// Validates variant settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_name("variants.label_prefix", &self.label_prefix, MAX_LABEL_PREFIX_LENGTH)?;
        validate_name("variants.selector_widget", &self.selector_widget, MAX_WIDGET_NAME_LENGTH)
    }
}

/// Requiredness configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirednessSection {
    /// `allOf` combination rule.
    #[serde(default)]
    pub all_of: AllOfMode,
    /// Combinator nesting limit.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for RequirednessSection {
    fn default() -> Self {
        Self {
            all_of: AllOfMode::default(),
            max_depth: default_max_depth(),
        }
    }
}

impl RequirednessSection {
    /// Validates requiredness settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_REQUIREDNESS_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "requiredness.max_depth must be between 1 and {MAX_REQUIREDNESS_DEPTH}"
            )));
        }
        Ok(())
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable structured audit events.
    #[serde(default)]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
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
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a short display or widget name.
fn validate_name(field: &str, value: &str, max_length: usize) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > max_length {
        return Err(ConfigError::Invalid(format!("{field} exceeds {max_length} bytes")));
    }
    Ok(())
}

/// Default untitled option label prefix.
fn default_label_prefix() -> String {
    DEFAULT_LABEL_PREFIX.to_string()
}

/// Default selector widget.
fn default_selector_widget() -> String {
    DEFAULT_SELECTOR_WIDGET.to_string()
}

/// Default requiredness recursion limit.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
