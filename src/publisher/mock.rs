//! Mock publisher implementation for testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Notify, RwLock};

use super::{OutboundMessage, Publisher};
use crate::error::{EmitterError, Result};

/// Mock publisher for testing.
///
/// Records published messages and can inject failures. An optional gate
/// parks each publish until the gate is notified, for tests that assert
/// shutdown ordering against an in-flight publish.
#[derive(Default)]
pub struct MockPublisher {
    published: RwLock<Vec<OutboundMessage>>,
    fail_on_publish: RwLock<bool>,
    gate: RwLock<Option<Arc<Notify>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_publish(&self, fail: bool) {
        *self.fail_on_publish.write().await = fail;
    }

    /// Park every subsequent publish until `gate` is notified once per call.
    pub async fn set_gate(&self, gate: Arc<Notify>) {
        *self.gate.write().await = Some(gate);
    }

    pub async fn published_count(&self) -> usize {
        self.published.read().await.len()
    }

    pub async fn take_published(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.published.write().await)
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, message: &OutboundMessage) -> Result<()> {
        let gate = self.gate.read().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if *self.fail_on_publish.read().await {
            return Err(EmitterError::Publish("Mock publish failure".to_string()));
        }
        self.published.write().await.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::EventAttributes;

    fn make_message(event_type: &str) -> OutboundMessage {
        OutboundMessage {
            destination: "arn:aws:sns:us-east-1:123456789012:t".to_string(),
            body: "{}".to_string(),
            attributes: EventAttributes::new(event_type, "artillery"),
        }
    }

    #[tokio::test]
    async fn test_mock_publisher_records() {
        let publisher = MockPublisher::new();
        publisher.publish(&make_message("stats")).await.unwrap();

        assert_eq!(publisher.published_count().await, 1);
        let published = publisher.take_published().await;
        assert_eq!(published[0].attributes.event_type, "stats");
        assert_eq!(publisher.published_count().await, 0);
    }

    #[tokio::test]
    async fn test_mock_publisher_fail_on_publish() {
        let publisher = MockPublisher::new();
        publisher.set_fail_on_publish(true).await;

        let result = publisher.publish(&make_message("stats")).await;
        assert!(matches!(result, Err(EmitterError::Publish(_))));
        assert_eq!(publisher.published_count().await, 0);
    }
}
