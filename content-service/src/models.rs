use serde::{Deserialize, Serialize};
use validator::Validate;

/// Folder level under which all QA pair objects live.
pub const QA_PAIRS_FOLDER: &str = "QA_Pairs";

/// Identifier tuple addressing one QA pair thread. The four segments are
/// caller-supplied and together determine the storage key
/// `{admin}/{course}/{topic}/QA_Pairs/{thread}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QaIdentifiers {
    #[serde(rename = "adminID")]
    #[validate(length(min = 1, message = "adminID must not be empty"))]
    pub admin_id: String,

    #[serde(rename = "courseID")]
    #[validate(length(min = 1, message = "courseID must not be empty"))]
    pub course_id: String,

    #[serde(rename = "topicID")]
    #[validate(length(min = 1, message = "topicID must not be empty"))]
    pub topic_id: String,

    #[serde(rename = "threadID")]
    #[validate(length(min = 1, message = "threadID must not be empty"))]
    pub thread_id: String,
}

impl QaIdentifiers {
    /// Full storage key for the thread object.
    pub fn object_key(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.admin_id, self.course_id, self.topic_id, QA_PAIRS_FOLDER, self.thread_id
        )
    }

    /// Ancestor folder paths in root-to-leaf order. Folder markers always
    /// carry the trailing slash so that the existence check and the marker
    /// creation target the same key.
    pub fn ancestor_folders(&self) -> [String; 4] {
        [
            format!("{}/", self.admin_id),
            format!("{}/{}/", self.admin_id, self.course_id),
            format!("{}/{}/{}/", self.admin_id, self.course_id, self.topic_id),
            format!(
                "{}/{}/{}/{}/",
                self.admin_id, self.course_id, self.topic_id, QA_PAIRS_FOLDER
            ),
        ]
    }
}

/// Query parameters for the read-URL and delete endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyQuery {
    pub key: String,
}

/// Body of the create-object request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateObjectRequest {
    #[serde(flatten)]
    #[validate]
    pub identifiers: QaIdentifiers,

    #[serde(rename = "contentType")]
    #[validate(length(min = 1, message = "contentType must not be empty"))]
    pub content_type: String,
}

/// Body of the upload notification request, sent by the client once it has
/// finished writing through the signed URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NotifyUploadRequest {
    #[serde(flatten)]
    #[validate]
    pub identifiers: QaIdentifiers,

    #[serde(rename = "fullPath")]
    pub full_path: String,

    pub url: String,
}

/// Body of the delete notification request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NotifyDeleteRequest {
    #[serde(flatten)]
    #[validate]
    pub identifiers: QaIdentifiers,

    pub key: String,
}
