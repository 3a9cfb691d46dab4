use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{CreateObjectRequest, KeyQuery};
use crate::storage::StorageError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    pub message: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateObjectResponse {
    pub message: String,
    pub url: String,
    #[serde(rename = "fullPath")]
    pub full_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteObjectResponse {
    pub message: String,
    pub key: String,
}

/// Issue a read-capability signed URL for an existing object.
pub async fn get_object_url(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<SignedUrlResponse>, ApiError> {
    let url = state
        .gateway
        .issue_read_url(&query.key)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) => {
                ApiError::NotFound("Object does not exist in given location".to_string())
            }
            StorageError::UrlGeneration(_) => ApiError::BadRequest(
                "Error in generating the signed URL for requested data".to_string(),
            ),
            StorageError::Backend(msg) => {
                error!("Failed to issue read URL for {}: {}", query.key, msg);
                ApiError::Internal(format!("Error in getting object: {msg}"))
            }
        })?;

    Ok(Json(SignedUrlResponse {
        message: "Successfully generated the signed URL for requested data".to_string(),
        url,
    }))
}

/// Provision the ancestry, create the placeholder object and issue a
/// write-capability signed URL for it.
pub async fn create_object(
    State(state): State<AppState>,
    Json(request): Json<CreateObjectRequest>,
) -> Result<Json<CreateObjectResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Invalid request: {e}")))?;

    let (url, full_path) = state
        .gateway
        .create_with_write_url(&request.identifiers, &request.content_type)
        .await
        .map_err(|e| match e {
            StorageError::UrlGeneration(_) => ApiError::BadRequest(
                "Error in generating signed URL for QA conversation".to_string(),
            ),
            StorageError::NotFound(msg) | StorageError::Backend(msg) => {
                error!("Failed to create object: {}", msg);
                ApiError::Internal(format!("Internal server error in setting object: {msg}"))
            }
        })?;

    info!("Created placeholder object and issued write URL: {}", full_path);

    Ok(Json(CreateObjectResponse {
        message: "QA uploaded to AWS and signedURL generated".to_string(),
        url,
        full_path,
    }))
}

/// Delete an existing object.
pub async fn delete_object(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<DeleteObjectResponse>, ApiError> {
    state.gateway.delete(&query.key).await.map_err(|e| match e {
        StorageError::NotFound(_) => {
            ApiError::NotFound("Object does not exist in given location".to_string())
        }
        StorageError::UrlGeneration(msg) | StorageError::Backend(msg) => {
            error!("Failed to delete object {}: {}", query.key, msg);
            ApiError::Internal(format!("Error in deleting object: {msg}"))
        }
    })?;

    info!("Deleted object: {}", query.key);

    Ok(Json(DeleteObjectResponse {
        message: "Successfully deleted the requested data".to_string(),
        key: query.key,
    }))
}
