use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{FileKey, MediaKind, PostId, TagId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub tag: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: TagId::new(id),
            tag: tag.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Session as exposed by the identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    pub user: SessionUser,
}

impl Session {
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.id.as_ref()
    }

    pub fn user_name(&self) -> &str {
        self.user.name.as_deref().unwrap_or_default()
    }

    pub fn user_image(&self) -> &str {
        self.user.image.as_deref().unwrap_or_default()
    }
}

/// Metadata attached by the upload service, after normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerData {
    pub id: i64,
    pub user: String,
}

/// Normalized description of an uploaded media asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub key: FileKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub server_data: ServerData,
}

impl FileDescriptor {
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_mime_type(&self.mime_type)
    }
}

/// Server metadata exactly as the upload widget reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawServerData {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub user: Option<String>,
}

/// One completed upload as reported by the upload widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub key: FileKey,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub server_data: RawServerData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub headline: String,
    pub lead: String,
    pub body: String,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_details: Option<FileDescriptor>,
    pub user_id: i64,
    pub user_name: String,
    pub user_image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn published(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: Some(PostId::new(id)),
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error.into()),
        }
    }
}

/// A published post as served to the read view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub name: String,
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
