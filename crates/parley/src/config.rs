//! Library configuration loaded from TOML and the environment.

use derive_getters::Getters;
use parley_convert::{ConversionOptions, DEFAULT_INLINE_SIZE_THRESHOLD_BYTES};
use parley_error::{ConfigError, ParleyResult};
use parley_tools::{SynthesisOptions, VariadicKeywordPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Overrides `schema.strict` (`true`/`false`/`1`/`0`).
pub const ENV_STRICT: &str = "PARLEY_STRICT";
/// Overrides `conversion.inline_size_threshold_bytes`.
pub const ENV_INLINE_THRESHOLD: &str = "PARLEY_INLINE_THRESHOLD";

/// Schema synthesis settings.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), pattern = "owned", default)]
#[serde(default)]
pub struct SchemaConfig {
    /// Require every parameter and forbid undeclared ones
    strict: bool,
    /// Variadic-keyword handling under strict mode
    on_variadic_keyword: VariadicKeywordPolicy,
}

impl SchemaConfig {
    /// Creates a builder for `SchemaConfig`.
    pub fn builder() -> SchemaConfigBuilder {
        SchemaConfigBuilder::default()
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let options = SynthesisOptions::default();
        Self {
            strict: options.strict,
            on_variadic_keyword: options.on_variadic_keyword,
        }
    }
}

/// History conversion settings.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into), pattern = "owned", default)]
#[serde(default)]
pub struct ConversionConfig {
    /// Inline assets above this size must carry a cloud reference
    inline_size_threshold_bytes: u64,
}

impl ConversionConfig {
    /// Creates a builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            inline_size_threshold_bytes: DEFAULT_INLINE_SIZE_THRESHOLD_BYTES,
        }
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use parley::{ParleyConfig, VariadicKeywordPolicy};
///
/// let config = ParleyConfig::from_toml_str(
///     r#"
///     [schema]
///     on_variadic_keyword = "skip"
///     "#,
/// )
/// .unwrap();
/// assert!(*config.schema().strict());
/// assert_eq!(*config.schema().on_variadic_keyword(), VariadicKeywordPolicy::Skip);
/// assert_eq!(*config.conversion().inline_size_threshold_bytes(), 20 * 1024 * 1024);
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), pattern = "owned", default)]
#[serde(default)]
pub struct ParleyConfig {
    /// `[schema]` table
    schema: SchemaConfig,
    /// `[conversion]` table
    conversion: ConversionConfig,
}

impl ParleyConfig {
    /// Creates a builder for `ParleyConfig`.
    pub fn builder() -> ParleyConfigBuilder {
        ParleyConfigBuilder::default()
    }

    /// Parses configuration from TOML text. Missing tables take defaults.
    pub fn from_toml_str(content: &str) -> ParleyResult<Self> {
        Ok(toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ParleyResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Applies [`ENV_STRICT`] and [`ENV_INLINE_THRESHOLD`] from the process environment.
    pub fn apply_env(self) -> ParleyResult<Self> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, which maps a variable name to its value.
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> ParleyResult<Self> {
        if let Some(value) = lookup(ENV_STRICT) {
            self.schema.strict = parse_flag(ENV_STRICT, &value)?;
            debug!(strict = self.schema.strict, "Strict mode set from environment");
        }
        if let Some(value) = lookup(ENV_INLINE_THRESHOLD) {
            self.conversion.inline_size_threshold_bytes =
                value.trim().parse().map_err(|e| {
                    ConfigError::new(format!("{} must be a byte count: {}", ENV_INLINE_THRESHOLD, e))
                })?;
            debug!(
                threshold = self.conversion.inline_size_threshold_bytes,
                "Inline threshold set from environment"
            );
        }
        Ok(self)
    }

    /// Schema synthesis options for this configuration.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            strict: self.schema.strict,
            on_variadic_keyword: self.schema.on_variadic_keyword,
        }
    }

    /// History conversion options for this configuration.
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            inline_size_threshold_bytes: self.conversion.inline_size_threshold_bytes,
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::new(format!(
            "{} must be true or false, got '{}'",
            key, other
        ))),
    }
}
