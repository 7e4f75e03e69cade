//! Event dispatch: vendor/broker routing and message construction.
//!
//! Routing is two explicit levels (vendor, then broker) so new backends
//! can be added without touching call sites. Exactly one vendor (`aws`)
//! and one broker (`sns`) are implemented today.

use std::sync::Arc;

use serde_json::Value;
use tracing::error;

use crate::config::{Broker, EmitterConfig, Vendor};
use crate::error::{EmitterError, Result};
use crate::publisher::{EventAttributes, OutboundMessage, Publisher};

/// Routes one event to the configured vendor/broker and publishes it.
///
/// The publisher is an explicit owned dependency rather than state
/// captured behind the scenes, so tests can substitute it.
pub struct Dispatcher {
    config: Arc<EmitterConfig>,
    publisher: Arc<dyn Publisher>,
}

impl Dispatcher {
    pub fn new(config: Arc<EmitterConfig>, publisher: Arc<dyn Publisher>) -> Self {
        Self { config, publisher }
    }

    /// Serialize the payload, attach the attributes, and publish.
    ///
    /// Routing failures signal misconfiguration and are not retriable.
    /// Publish failures are logged and returned; retry, if any, is the
    /// broker SDK's responsibility below this layer.
    pub async fn emit(&self, payload: Value, attributes: EventAttributes) -> Result<()> {
        match &self.config.vendor {
            Vendor::Aws => self.emit_aws(payload, attributes).await,
            Vendor::Other(vendor) => {
                error!(vendor = %vendor, "Cannot emit: vendor not supported");
                Err(EmitterError::UnsupportedVendor {
                    vendor: vendor.clone(),
                })
            }
        }
    }

    async fn emit_aws(&self, payload: Value, attributes: EventAttributes) -> Result<()> {
        match &self.config.broker {
            Broker::Sns => self.emit_aws_sns(payload, attributes).await,
            Broker::Other(broker) => {
                error!(broker = %broker, "Cannot emit: broker not supported");
                Err(EmitterError::UnsupportedBroker {
                    broker: broker.clone(),
                })
            }
        }
    }

    async fn emit_aws_sns(&self, payload: Value, attributes: EventAttributes) -> Result<()> {
        // Guaranteed by config validation; defends hand-built configs.
        let destination = match &self.config.sns {
            Some(sns) => sns.arn.clone(),
            None => {
                return Err(EmitterError::Config(
                    "Need to supply an SNS topic ARN to emit to".to_string(),
                ))
            }
        };

        let body = serde_json::to_string(&payload).map_err(|e| {
            EmitterError::Publish(format!("Failed to serialize event payload: {}", e))
        })?;

        let message = OutboundMessage {
            destination,
            body,
            attributes,
        };

        if let Err(e) = self.publisher.publish(&message).await {
            error!(
                destination = %message.destination,
                event_type = %message.attributes.event_type,
                error = %e,
                "Failed to publish event"
            );
            return Err(e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::MockPublisher;
    use serde_json::json;

    fn make_config(vendor: Vendor, broker: Broker) -> Arc<EmitterConfig> {
        Arc::new(EmitterConfig {
            vendor,
            broker,
            sns: Some(crate::config::SnsSettings {
                arn: "arn:aws:sns:us-east-1:123456789012:load-tests".to_string(),
            }),
            type_suffix: None,
            logging_level: None,
        })
    }

    fn attrs() -> EventAttributes {
        EventAttributes::new("stats", "artillery")
    }

    #[tokio::test]
    async fn test_emit_publishes_serialized_payload() {
        let publisher = Arc::new(MockPublisher::new());
        let dispatcher = Dispatcher::new(
            make_config(Vendor::Aws, Broker::Sns),
            Arc::clone(&publisher) as Arc<dyn Publisher>,
        );

        let payload = json!({"a": 1, "b": "x"});
        dispatcher.emit(payload.clone(), attrs()).await.unwrap();

        let published = publisher.take_published().await;
        assert_eq!(published.len(), 1);
        assert_eq!(
            published[0].destination,
            "arn:aws:sns:us-east-1:123456789012:load-tests"
        );
        assert_eq!(published[0].body, serde_json::to_string(&payload).unwrap());
        assert_eq!(published[0].attributes, attrs());
    }

    #[tokio::test]
    async fn test_emit_unsupported_vendor() {
        let publisher = Arc::new(MockPublisher::new());
        let dispatcher = Dispatcher::new(
            make_config(Vendor::Other("gcp".to_string()), Broker::Sns),
            Arc::clone(&publisher) as Arc<dyn Publisher>,
        );

        let err = dispatcher.emit(json!({}), attrs()).await.unwrap_err();
        match err {
            EmitterError::UnsupportedVendor { vendor } => assert_eq!(vendor, "gcp"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(publisher.published_count().await, 0);
    }

    #[tokio::test]
    async fn test_emit_unsupported_broker() {
        let publisher = Arc::new(MockPublisher::new());
        let dispatcher = Dispatcher::new(
            make_config(Vendor::Aws, Broker::Other("sqs".to_string())),
            Arc::clone(&publisher) as Arc<dyn Publisher>,
        );

        let err = dispatcher.emit(json!({}), attrs()).await.unwrap_err();
        match err {
            EmitterError::UnsupportedBroker { broker } => assert_eq!(broker, "sqs"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(publisher.published_count().await, 0);
    }

    #[tokio::test]
    async fn test_publish_failure_is_surfaced() {
        let publisher = Arc::new(MockPublisher::new());
        publisher.set_fail_on_publish(true).await;
        let dispatcher = Dispatcher::new(
            make_config(Vendor::Aws, Broker::Sns),
            Arc::clone(&publisher) as Arc<dyn Publisher>,
        );

        let result = dispatcher.emit(json!({"a": 1}), attrs()).await;
        assert!(matches!(result, Err(EmitterError::Publish(_))));
    }
}
