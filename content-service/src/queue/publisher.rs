use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_sqs::types::MessageAttributeValue;
use serde_json::json;
use tracing::info;

use crate::models::QaIdentifiers;

use super::{MessageAttribute, MessageQueue, NotificationAction, NotificationInput, QueueError};

/// Visibility delay applied to every notification message.
pub const NOTIFY_DELAY_SECONDS: i32 = 5;

/// SQS-backed message queue.
pub struct SqsQueue {
    client: aws_sdk_sqs::Client,
}

impl SqsQueue {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn send_message(&self, input: &NotificationInput) -> Result<String, QueueError> {
        let mut request = self
            .client
            .send_message()
            .queue_url(&input.queue_url)
            .message_body(&input.message_body)
            .delay_seconds(input.delay_seconds);

        for (name, attribute) in &input.message_attributes {
            let value = MessageAttributeValue::builder()
                .data_type(&attribute.data_type)
                .string_value(&attribute.string_value)
                .build()
                .map_err(|e| QueueError::Backend(e.to_string()))?;
            request = request.message_attributes(name, value);
        }

        let output = request
            .send()
            .await
            .map_err(|e| QueueError::Backend(e.into_service_error().to_string()))?;

        match output.message_id() {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(QueueError::Unacknowledged),
        }
    }
}

/// Builds and sends the delayed notifications that tell the downstream
/// consumer an object operation has completed. One send attempt per call, no
/// local retry or outbox.
pub struct NotificationPublisher {
    queue: Arc<dyn MessageQueue>,
    queue_url: String,
}

impl NotificationPublisher {
    pub fn new(queue: Arc<dyn MessageQueue>, queue_url: String) -> Self {
        Self { queue, queue_url }
    }

    /// Message input for a completed upload: the signed URL, the storage key
    /// and the identifier properties blob.
    pub fn upload_input(
        &self,
        identifiers: &QaIdentifiers,
        url: &str,
        key: &str,
    ) -> NotificationInput {
        let mut attributes = BTreeMap::new();
        attributes.insert("link".to_string(), MessageAttribute::string(url));
        attributes.insert("key".to_string(), MessageAttribute::string(key));
        attributes.insert(
            "properties".to_string(),
            MessageAttribute::string(properties_blob(identifiers)),
        );

        NotificationInput {
            queue_url: self.queue_url.clone(),
            message_body: NotificationAction::Upload.as_str().to_string(),
            delay_seconds: NOTIFY_DELAY_SECONDS,
            message_attributes: attributes,
        }
    }

    /// Message input for a completed delete: the storage key and the
    /// identifier properties blob.
    pub fn delete_input(&self, identifiers: &QaIdentifiers, key: &str) -> NotificationInput {
        let mut attributes = BTreeMap::new();
        attributes.insert("key".to_string(), MessageAttribute::string(key));
        attributes.insert(
            "properties".to_string(),
            MessageAttribute::string(properties_blob(identifiers)),
        );

        NotificationInput {
            queue_url: self.queue_url.clone(),
            message_body: NotificationAction::Delete.as_str().to_string(),
            delay_seconds: NOTIFY_DELAY_SECONDS,
            message_attributes: attributes,
        }
    }

    pub async fn publish(&self, input: &NotificationInput) -> Result<String, QueueError> {
        let message_id = self.queue.send_message(input).await?;
        info!(
            "Published {} notification to queue: message_id={}",
            input.message_body, message_id
        );
        Ok(message_id)
    }
}

fn properties_blob(identifiers: &QaIdentifiers) -> String {
    json!({
        "admin_id": identifiers.admin_id,
        "course_id": identifiers.course_id,
        "topic_id": identifiers.topic_id,
        "thread_id": identifiers.thread_id,
    })
    .to_string()
}
