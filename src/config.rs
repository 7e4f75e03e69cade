//! Emitter configuration.
//!
//! Resolved from the host's configuration tree: the emitter owns the
//! `plugins.emitter` subtree and validates it eagerly, before any
//! subscription or broker client construction.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{EmitterError, Result};

/// JSON pointer to the emitter subtree within the host configuration.
const EMITTER_POINTER: &str = "/plugins/emitter";

/// Top-level message-broker ecosystem selector.
///
/// Unknown values survive parsing as `Other` so routing errors can name
/// the configured vendor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Aws,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vendor::Aws => f.write_str("aws"),
            Vendor::Other(vendor) => f.write_str(vendor),
        }
    }
}

/// The publish/subscribe service within a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Broker {
    Sns,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for Broker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Broker::Sns => f.write_str("sns"),
            Broker::Other(broker) => f.write_str(broker),
        }
    }
}

/// SNS-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnsSettings {
    /// Topic ARN events are published to.
    pub arn: String,
}

/// Logging level accepted from the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Silly,
    Debug,
    Verbose,
    Http,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Map onto a `tracing` filter directive.
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Silly | LogLevel::Verbose => "trace",
            LogLevel::Debug | LogLevel::Http => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Emitter configuration, immutable after construction.
#[derive(Debug, Clone, Deserialize)]
pub struct EmitterConfig {
    /// Broker vendor (only `aws` is implemented).
    pub vendor: Vendor,
    /// Broker service (only `sns` is implemented).
    pub broker: Broker,
    /// SNS settings; required when `broker` is `sns`.
    pub sns: Option<SnsSettings>,
    /// Optional suffix appended to the outbound `type` tag as `.{suffix}`.
    #[serde(rename = "type")]
    pub type_suffix: Option<String>,
    /// Optional logging level requested by the host configuration.
    #[serde(rename = "loggingLevel")]
    pub logging_level: Option<LogLevel>,
}

impl EmitterConfig {
    /// Extract and validate the emitter configuration from the host's
    /// configuration tree.
    pub fn from_host_config(host: &Value) -> Result<Self> {
        let node = host.pointer(EMITTER_POINTER).ok_or_else(|| {
            EmitterError::Config(
                "no 'plugins.emitter' section in host configuration".to_string(),
            )
        })?;

        let config: EmitterConfig = serde_json::from_value(node.clone()).map_err(|e| {
            EmitterError::Config(format!("Failed to parse emitter configuration: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a full host configuration document from YAML text.
    pub fn from_yaml(document: &str) -> Result<Self> {
        let host: Value = serde_yaml::from_str(document).map_err(|e| {
            EmitterError::Config(format!("Failed to parse host configuration: {}", e))
        })?;
        Self::from_host_config(&host)
    }

    /// Validate broker-specific required fields.
    ///
    /// Unknown brokers are rejected here so they never reach the client
    /// factory; unknown vendors are rejected at dispatch, where the
    /// routing branch can name them.
    pub fn validate(&self) -> Result<()> {
        match &self.broker {
            Broker::Sns => match &self.sns {
                Some(sns) if !sns.arn.is_empty() => Ok(()),
                _ => Err(EmitterError::Config(
                    "Need to supply an SNS topic ARN to emit to".to_string(),
                )),
            },
            Broker::Other(broker) => Err(EmitterError::UnsupportedBroker {
                broker: broker.clone(),
            }),
        }
    }
}
