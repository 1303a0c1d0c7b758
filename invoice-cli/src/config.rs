//! TOML configuration for `invoice-calc`.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below. Command-line flags override anything set here.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "invoice-calc.log"
//!
//! [invoice]
//! default_kind = "po"
//! freight_charges = "250.00"
//! discount_amount = "0"
//!
//! [output]
//! format = "csv"
//! ```

use std::path::{Path, PathBuf};

use invoice_core::{InvoiceAdjustments, InvoiceKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::report::OutputFormat;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "invoice-calc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub invoice: InvoiceDefaults,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive.
    pub level: String,
    /// Append log records here as well as to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InvoiceDefaults {
    pub default_kind: InvoiceKind,
    pub freight_charges: Decimal,
    pub discount_amount: Decimal,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            default_kind: InvoiceKind::Direct,
            freight_charges: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
        }
    }
}

impl InvoiceDefaults {
    pub fn adjustments(&self) -> InvoiceAdjustments {
        InvoiceAdjustments::new(self.freight_charges, self.discount_amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used
    /// otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }
}
