// Queue layer: message-queue abstraction plus the SQS publisher.

pub mod publisher;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Queue error types
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue did not acknowledge the message")]
    Unacknowledged,

    #[error("queue backend error: {0}")]
    Backend(String),
}

/// Coarse action tag carried as the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Upload,
    Delete,
}

impl NotificationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationAction::Upload => "POST",
            NotificationAction::Delete => "DELETE",
        }
    }
}

/// Single string-typed message attribute, in the queue wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAttribute {
    #[serde(rename = "DataType")]
    pub data_type: String,

    #[serde(rename = "StringValue")]
    pub string_value: String,
}

impl MessageAttribute {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: "String".to_string(),
            string_value: value.into(),
        }
    }
}

/// Complete send-message input. Built once per notification, handed to the
/// queue backend, and echoed back to the HTTP client on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationInput {
    #[serde(rename = "QueueUrl")]
    pub queue_url: String,

    #[serde(rename = "MessageBody")]
    pub message_body: String,

    #[serde(rename = "DelaySeconds")]
    pub delay_seconds: i32,

    #[serde(rename = "MessageAttributes")]
    pub message_attributes: BTreeMap<String, MessageAttribute>,
}

/// Narrow interface over the message-queue backend: one remote call.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Send the message, returning the backend's message id as the send
    /// acknowledgment.
    async fn send_message(&self, input: &NotificationInput) -> Result<String, QueueError>;
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{MessageQueue, NotificationInput, QueueError};

    /// Queue double recording every message it is asked to send.
    #[derive(Default)]
    pub struct RecordingQueue {
        pub sent: Mutex<Vec<NotificationInput>>,
    }

    #[async_trait]
    impl MessageQueue for RecordingQueue {
        async fn send_message(&self, input: &NotificationInput) -> Result<String, QueueError> {
            self.sent.lock().unwrap().push(input.clone());
            Ok("mid-1".to_string())
        }
    }

    /// Queue double whose sends are never acknowledged.
    pub struct UnacknowledgedQueue;

    #[async_trait]
    impl MessageQueue for UnacknowledgedQueue {
        async fn send_message(&self, _input: &NotificationInput) -> Result<String, QueueError> {
            Err(QueueError::Unacknowledged)
        }
    }
}
