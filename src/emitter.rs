//! The broker emitter: subscription wiring, handler logic, and drain.
//!
//! Construction order is fixed: resolve configuration, resolve
//! environment credentials (aws only), build the broker client, then bind
//! subscriptions. Any failure aborts before subscription occurs.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::{EmitterConfig, Vendor};
use crate::credentials;
use crate::dispatcher::Dispatcher;
use crate::drain::DrainSlot;
use crate::error::{EmitterError, Result};
use crate::events::{EventKind, HostEvent, EVENT_SOURCE};
use crate::publisher::{EventAttributes, Publisher, SnsPublisher};
use crate::source::EventSource;

/// Forwards host events to the configured broker.
///
/// Cheap to clone; all state is shared and read-only after construction
/// apart from the drain slot.
#[derive(Clone)]
pub struct BrokerEmitter {
    config: Arc<EmitterConfig>,
    dispatcher: Arc<Dispatcher>,
    drain_slot: Arc<DrainSlot>,
}

impl std::fmt::Debug for BrokerEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerEmitter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BrokerEmitter {
    /// Resolve configuration from the host tree, connect to the broker,
    /// and bind the four event handlers.
    pub async fn attach(host_config: &Value, source: &mut dyn EventSource) -> Result<Self> {
        let config = EmitterConfig::from_host_config(host_config)?;
        let emitter = Self::connect(config).await?;
        emitter.bind(source);
        Ok(emitter)
    }

    /// Connect to the configured broker.
    ///
    /// Vendor support is validated before any AWS-specific setup runs, so
    /// an unsupported vendor never touches the environment.
    pub async fn connect(config: EmitterConfig) -> Result<Self> {
        config.validate()?;

        if let Vendor::Other(vendor) = &config.vendor {
            return Err(EmitterError::UnsupportedVendor {
                vendor: vendor.clone(),
            });
        }

        let aws_credentials = credentials::resolve_credentials()?;
        let region = credentials::resolve_region();

        // validate() guarantees sns settings are present.
        let settings = config.sns.as_ref().ok_or_else(|| {
            EmitterError::Config("Need to supply an SNS topic ARN to emit to".to_string())
        })?;

        let publisher = SnsPublisher::connect(settings, &aws_credentials, &region).await?;

        info!(
            vendor = %config.vendor,
            broker = %config.broker,
            "Broker emitter connected"
        );

        Ok(Self::with_publisher(config, Arc::new(publisher)))
    }

    /// Build an emitter around an existing publisher.
    ///
    /// This is the substitution seam for embedding and tests; no broker
    /// or environment setup runs.
    pub fn with_publisher(config: EmitterConfig, publisher: Arc<dyn Publisher>) -> Self {
        let config = Arc::new(config);
        Self {
            dispatcher: Arc::new(Dispatcher::new(Arc::clone(&config), publisher)),
            config,
            drain_slot: Arc::new(DrainSlot::new()),
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Register one handler per host event kind.
    ///
    /// Handler failures are logged; the host's emission mechanism consumes
    /// no return value.
    pub fn bind(&self, source: &mut dyn EventSource) {
        for kind in EventKind::ALL {
            let emitter = self.clone();
            source.on(
                kind,
                Box::new(move |payload| {
                    let emitter = emitter.clone();
                    Box::pin(async move {
                        if let Err(e) = emitter.handle_event(HostEvent::new(kind, payload)).await {
                            error!(
                                event = kind.as_str(),
                                error = %e,
                                "Failed to forward host event"
                            );
                        }
                    })
                }),
            );
        }
        debug!("Bound emitter handlers to host events");
    }

    /// Forward one host event to the broker.
    ///
    /// Non-terminal events await their publish before returning. The
    /// terminal `done` publish is spawned and parked in the drain slot so
    /// shutdown can be sequenced after it without blocking the host's
    /// emission call.
    pub async fn handle_event(&self, event: HostEvent) -> Result<()> {
        let kind = event.kind();
        let attributes = self.attributes_for(kind);
        let payload = event.into_payload();

        if kind.is_terminal() {
            let dispatcher = Arc::clone(&self.dispatcher);
            let handle = tokio::spawn(async move { dispatcher.emit(payload, attributes).await });
            self.drain_slot.store(handle).await;
            Ok(())
        } else {
            self.dispatcher.emit(payload, attributes).await
        }
    }

    /// Compute the `type`/`source` tags for one event kind.
    fn attributes_for(&self, kind: EventKind) -> EventAttributes {
        let event_type = match &self.config.type_suffix {
            Some(suffix) => format!("{}.{}", kind.as_str(), suffix),
            None => kind.as_str().to_string(),
        };
        EventAttributes::new(event_type, EVENT_SOURCE)
    }

    /// Whether a terminal publish is parked awaiting drain.
    pub async fn pending_drain(&self) -> bool {
        self.drain_slot.is_pending().await
    }

    /// Await the terminal publish.
    ///
    /// `DrainNotReady` when `done` has not fired.
    pub async fn drain(&self) -> Result<()> {
        self.drain_slot.drain().await
    }

    /// Host-facing shutdown hook: drain the terminal publish if one is
    /// pending, succeed as a no-op otherwise so shutdown proceeds.
    pub async fn cleanup(&self) -> Result<()> {
        match self.drain_slot.drain().await {
            Err(EmitterError::DrainNotReady) => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Broker, SnsSettings};
    use crate::publisher::MockPublisher;
    use serde_json::json;

    fn aws_sns_config(type_suffix: Option<&str>) -> EmitterConfig {
        EmitterConfig {
            vendor: Vendor::Aws,
            broker: Broker::Sns,
            sns: Some(SnsSettings {
                arn: "arn:aws:sns:us-east-1:123456789012:load-tests".to_string(),
            }),
            type_suffix: type_suffix.map(String::from),
            logging_level: None,
        }
    }

    #[tokio::test]
    async fn test_type_tag_without_suffix() {
        let publisher = Arc::new(MockPublisher::new());
        let emitter =
            BrokerEmitter::with_publisher(aws_sns_config(None), Arc::clone(&publisher) as _);

        emitter
            .handle_event(HostEvent::Stats(json!({"rps": 100})))
            .await
            .unwrap();

        let published = publisher.take_published().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].attributes.event_type, "stats");
        assert_eq!(published[0].attributes.source, "artillery");
    }

    #[tokio::test]
    async fn test_type_tag_with_suffix() {
        let publisher = Arc::new(MockPublisher::new());
        let emitter = BrokerEmitter::with_publisher(
            aws_sns_config(Some("myLabel")),
            Arc::clone(&publisher) as _,
        );

        emitter
            .handle_event(HostEvent::Stats(json!({})))
            .await
            .unwrap();
        emitter
            .handle_event(HostEvent::PhaseStarted(json!({})))
            .await
            .unwrap();

        let published = publisher.take_published().await;
        assert_eq!(published[0].attributes.event_type, "stats.myLabel");
        assert_eq!(published[1].attributes.event_type, "phaseStarted.myLabel");
    }

    #[tokio::test]
    async fn test_done_is_parked_not_awaited_inline() {
        let publisher = Arc::new(MockPublisher::new());
        let emitter =
            BrokerEmitter::with_publisher(aws_sns_config(None), Arc::clone(&publisher) as _);

        emitter
            .handle_event(HostEvent::Done(json!({"summary": true})))
            .await
            .unwrap();
        assert!(emitter.pending_drain().await);

        emitter.drain().await.unwrap();
        assert!(!emitter.pending_drain().await);
        assert_eq!(publisher.published_count().await, 1);
    }
}
