//! Publishing clients.
//!
//! This module contains:
//! - `Publisher` trait: the seam between the dispatcher and the broker SDK
//! - `OutboundMessage` / `EventAttributes`: the per-publish wire model
//! - Implementations: SNS (real), Mock (testing)

use async_trait::async_trait;

use crate::error::Result;

pub mod mock;
pub mod sns;

pub use mock::MockPublisher;
pub use sns::SnsPublisher;

/// The two string message attributes attached to every outbound event.
///
/// Constructed fresh per dispatch, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAttributes {
    /// Event name, optionally suffixed with the configured type suffix.
    pub event_type: String,
    /// Originating system tag.
    pub source: String,
}

impl EventAttributes {
    pub fn new(event_type: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source: source.into(),
        }
    }
}

/// One outbound publish request; exists only for the duration of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Broker-side destination (topic ARN for SNS).
    pub destination: String,
    /// JSON-serialized event payload, forwarded verbatim.
    pub body: String,
    /// `type` and `source` tags, encoded as String-typed broker metadata.
    pub attributes: EventAttributes,
}

/// Interface for publishing one message to the configured broker.
///
/// Implementations:
/// - `SnsPublisher`: AWS SNS via the AWS SDK
/// - `MockPublisher`: in-memory recording for testing
///
/// Implementations do not retry; retry behavior, if any, lives below this
/// seam in the broker SDK.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish a single message, returning once the broker accepts or
    /// rejects it.
    async fn publish(&self, message: &OutboundMessage) -> Result<()>;
}
