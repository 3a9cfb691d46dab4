use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{NotifyDeleteRequest, NotifyUploadRequest};
use crate::queue::{NotificationInput, QueueError};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub message: String,
    #[serde(rename = "SQSInput")]
    pub sqs_input: NotificationInput,
}

fn map_queue_error(e: QueueError) -> ApiError {
    match e {
        QueueError::Unacknowledged => {
            ApiError::BadRequest("Error in sending information to SQS".to_string())
        }
        QueueError::Backend(msg) => {
            error!("Failed to send queue message: {}", msg);
            ApiError::Internal(format!("Error in sending SQS message: {msg}"))
        }
    }
}

/// Notify the downstream consumer that an upload has completed. The client
/// calls this after writing through the signed URL; the service itself never
/// observes the upload.
pub async fn notify_upload(
    State(state): State<AppState>,
    Json(request): Json<NotifyUploadRequest>,
) -> Result<Json<NotifyResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Invalid request: {e}")))?;

    let input = state
        .publisher
        .upload_input(&request.identifiers, &request.url, &request.full_path);
    state
        .publisher
        .publish(&input)
        .await
        .map_err(map_queue_error)?;

    Ok(Json(NotifyResponse {
        message: "QA Pair upload information sent to SQS".to_string(),
        sqs_input: input,
    }))
}

/// Notify the downstream consumer that a delete has completed.
pub async fn notify_delete(
    State(state): State<AppState>,
    Json(request): Json<NotifyDeleteRequest>,
) -> Result<Json<NotifyResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Invalid request: {e}")))?;

    let input = state
        .publisher
        .delete_input(&request.identifiers, &request.key);
    state
        .publisher
        .publish(&input)
        .await
        .map_err(map_queue_error)?;

    Ok(Json(NotifyResponse {
        message: "QA Pair delete information sent to SQS".to_string(),
        sqs_input: input,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::QaIdentifiers;
    use crate::queue::memory::{RecordingQueue, UnacknowledgedQueue};
    use crate::queue::publisher::NotificationPublisher;
    use crate::storage::gateway::ObjectGateway;
    use crate::storage::memory::InMemoryStore;

    fn identifiers() -> QaIdentifiers {
        QaIdentifiers {
            admin_id: "A1".to_string(),
            course_id: "C1".to_string(),
            topic_id: "T1".to_string(),
            thread_id: "TH1".to_string(),
        }
    }

    fn state_with(publisher: NotificationPublisher) -> AppState {
        AppState {
            gateway: Arc::new(ObjectGateway::new(Arc::new(InMemoryStore::default()))),
            publisher: Arc::new(publisher),
        }
    }

    #[tokio::test]
    async fn notify_delete_echoes_the_queue_input() {
        let queue = Arc::new(RecordingQueue::default());
        let state = state_with(NotificationPublisher::new(
            queue.clone(),
            "https://sqs.test/queue".to_string(),
        ));

        let request = NotifyDeleteRequest {
            identifiers: identifiers(),
            key: "A1/C1/T1/QA_Pairs/TH1".to_string(),
        };
        let Json(response) = notify_delete(State(state), Json(request)).await.unwrap();

        assert_eq!(response.sqs_input.message_body, "DELETE");
        assert_eq!(response.sqs_input.delay_seconds, 5);
        assert_eq!(
            response.sqs_input.message_attributes["key"].string_value,
            "A1/C1/T1/QA_Pairs/TH1"
        );
        assert_eq!(queue.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn notify_upload_echoes_the_queue_input() {
        let queue = Arc::new(RecordingQueue::default());
        let state = state_with(NotificationPublisher::new(
            queue.clone(),
            "https://sqs.test/queue".to_string(),
        ));

        let request = NotifyUploadRequest {
            identifiers: identifiers(),
            full_path: "A1/C1/T1/QA_Pairs/TH1".to_string(),
            url: "https://storage.test/signed".to_string(),
        };
        let Json(response) = notify_upload(State(state), Json(request)).await.unwrap();

        assert_eq!(response.sqs_input.message_body, "POST");
        assert_eq!(
            response.sqs_input.message_attributes["link"].string_value,
            "https://storage.test/signed"
        );
        assert_eq!(queue.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unacknowledged_send_maps_to_bad_request() {
        let state = state_with(NotificationPublisher::new(
            Arc::new(UnacknowledgedQueue),
            "https://sqs.test/queue".to_string(),
        ));

        let request = NotifyDeleteRequest {
            identifiers: identifiers(),
            key: "A1/C1/T1/QA_Pairs/TH1".to_string(),
        };
        let err = notify_delete(State(state), Json(request)).await.unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn notify_rejects_empty_segments() {
        let state = state_with(NotificationPublisher::new(
            Arc::new(RecordingQueue::default()),
            "https://sqs.test/queue".to_string(),
        ));

        let mut request = NotifyDeleteRequest {
            identifiers: identifiers(),
            key: "A1/C1/T1/QA_Pairs/TH1".to_string(),
        };
        request.identifiers.thread_id = String::new();

        let err = notify_delete(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
