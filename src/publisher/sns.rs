//! AWS SNS publisher implementation.
//!
//! Publishes each event to one SNS topic with `type` and `source` as
//! String-typed message attributes. The client is constructed once at
//! setup and never retried; publish failures surface to the dispatcher.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::types::MessageAttributeValue;
use aws_sdk_sns::Client as SnsClient;
use tracing::{debug, info};

use super::{EventAttributes, OutboundMessage, Publisher};
use crate::config::SnsSettings;
use crate::credentials::AwsCredentials;
use crate::error::{EmitterError, Result};

/// Message attribute name for the event type tag.
const TYPE_ATTR: &str = "type";

/// Message attribute name for the event source tag.
const SOURCE_ATTR: &str = "source";

/// Credential provider name reported to the AWS SDK.
const CREDENTIALS_PROVIDER_NAME: &str = "artillery-broker-emitter";

/// AWS SNS publishing client, bound to one topic for its lifetime.
pub struct SnsPublisher {
    client: SnsClient,
}

impl SnsPublisher {
    /// Construct a publisher from validated settings, resolved credentials,
    /// and a resolved region.
    pub async fn connect(
        settings: &SnsSettings,
        credentials: &AwsCredentials,
        region: &str,
    ) -> Result<Self> {
        let provider = aws_sdk_sns::config::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .credentials_provider(provider)
            .load()
            .await;

        let client = SnsClient::new(&aws_config);

        info!(
            region = %region,
            topic_arn = %settings.arn,
            "Connected to AWS SNS"
        );

        Ok(Self { client })
    }
}

/// Build the SNS message attribute map for one outbound event.
fn message_attributes(
    attributes: &EventAttributes,
) -> Result<HashMap<String, MessageAttributeValue>> {
    let mut attrs = HashMap::new();
    attrs.insert(
        TYPE_ATTR.to_string(),
        MessageAttributeValue::builder()
            .data_type("String")
            .string_value(&attributes.event_type)
            .build()
            .map_err(|e| EmitterError::Publish(format!("Failed to build attribute: {}", e)))?,
    );
    attrs.insert(
        SOURCE_ATTR.to_string(),
        MessageAttributeValue::builder()
            .data_type("String")
            .string_value(&attributes.source)
            .build()
            .map_err(|e| EmitterError::Publish(format!("Failed to build attribute: {}", e)))?,
    );
    Ok(attrs)
}

#[async_trait]
impl Publisher for SnsPublisher {
    async fn publish(&self, message: &OutboundMessage) -> Result<()> {
        let attrs = message_attributes(&message.attributes)?;

        self.client
            .publish()
            .topic_arn(&message.destination)
            .message(&message.body)
            .set_message_attributes(Some(attrs))
            .send()
            .await
            .map_err(|e| EmitterError::Publish(format!("Failed to publish to SNS: {}", e)))?;

        debug!(
            destination = %message.destination,
            event_type = %message.attributes.event_type,
            "Published event to SNS"
        );

        Ok(())
    }
}
