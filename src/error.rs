//! Emitter error taxonomy.

/// Result type for emitter operations.
pub type Result<T> = std::result::Result<T, EmitterError>;

/// Errors that can occur while configuring the emitter or forwarding events.
///
/// `Config`, `Setup`, and the two `Unsupported*` variants signal
/// misconfiguration and are fatal: the emitter must not be used after one
/// of them is returned. `Publish` is surfaced per dispatch and is never
/// retried at this layer.
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    #[error("Invalid emitter configuration: {0}")]
    Config(String),

    #[error("Emitter setup failed: {0}")]
    Setup(String),

    #[error("No current support for emitting to vendor '{vendor}'")]
    UnsupportedVendor { vendor: String },

    #[error("No current support for emitting to broker '{broker}'")]
    UnsupportedBroker { broker: String },

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("No terminal publish is pending; 'done' has not fired yet")]
    DrainNotReady,
}
