use std::sync::Arc;

use serde_json::Value;
use shared::protocol::{FileDescriptor, ServerData, UploadResult};
use tracing::{info, warn};

use crate::{
    activity::PublishActivity,
    draft::DraftStore,
    error::UploadError,
    notify::{Notification, Notifier, ToastPosition, UPLOAD_REJECTED},
    ArticleBackend,
};

pub const MEDIA_POST_ENDPOINT: &str = "mediaPost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Started,
    Completed(Vec<UploadResult>),
    Failed(UploadFailure),
}

pub trait UploadHandler {
    fn on_complete(&self, results: Vec<UploadResult>) -> Result<FileDescriptor, UploadError>;
    fn on_error(&self, failure: UploadFailure);
}

/// Coerces the loosely typed upload id to an integer. Strings follow JS
/// `Number` parsing, including `0x`/`0o`/`0b` prefixes; anything unparseable is 0.
fn coerce_id(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate))
            .unwrap_or(0),
        Value::String(s) => parse_numeric(s.trim()).unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn truncate(f: f64) -> Option<i64> {
    f.is_finite().then(|| f.trunc() as i64)
}

fn parse_numeric(s: &str) -> Option<i64> {
    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    match radix {
        Some(radix) => {
            let digits = &s[2..];
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            i64::from_str_radix(digits, radix).ok()
        }
        None => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().and_then(truncate)),
    }
}

pub fn normalize_upload(result: UploadResult) -> FileDescriptor {
    FileDescriptor {
        url: result.url,
        mime_type: result.mime_type,
        key: result.key,
        name: result.name,
        size: result.size,
        server_data: ServerData {
            id: coerce_id(&result.server_data.id),
            user: result.server_data.user.unwrap_or_default(),
        },
    }
}

pub struct UploadReconciler {
    draft: DraftStore,
    activity: Arc<PublishActivity>,
    backend: Arc<dyn ArticleBackend>,
    notifier: Arc<dyn Notifier>,
    endpoint: String,
}

impl UploadReconciler {
    pub fn new(
        draft: DraftStore,
        activity: Arc<PublishActivity>,
        backend: Arc<dyn ArticleBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            draft,
            activity,
            backend,
            notifier,
            endpoint: MEDIA_POST_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The form shows the widget only while no file is attached.
    pub fn accepts_upload(&self) -> bool {
        self.draft.uploaded_file().is_none()
    }

    pub fn handle(&self, event: UploadEvent) -> Result<Option<FileDescriptor>, UploadError> {
        match event {
            UploadEvent::Started => {
                self.activity.set_uploading(true);
                Ok(None)
            }
            UploadEvent::Completed(results) => self.on_complete(results).map(Some),
            UploadEvent::Failed(failure) => {
                let message = failure.message.clone();
                self.on_error(failure);
                Err(UploadError::Rejected(message))
            }
        }
    }

    /// Deletes the stored file and clears the upload fields. The fields are
    /// cleared even when the backend call fails.
    pub async fn remove(&self) -> Result<Option<FileDescriptor>, UploadError> {
        let Some(file) = self.draft.uploaded_file() else {
            return Ok(None);
        };

        let outcome = self.backend.remove_file(&file.key).await;
        self.draft.clear_upload();

        match outcome {
            Ok(()) => {
                info!(key = %file.key, "removed uploaded file");
                Ok(Some(file))
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!(key = %file.key, error = %message, "failed to remove uploaded file");
                Err(UploadError::Remove {
                    key: file.key.to_string(),
                    message,
                })
            }
        }
    }
}

impl UploadHandler for UploadReconciler {
    fn on_complete(&self, results: Vec<UploadResult>) -> Result<FileDescriptor, UploadError> {
        self.activity.set_uploading(false);
        let Some(first) = results.into_iter().next() else {
            warn!(endpoint = %self.endpoint, "upload completed without results");
            return Err(UploadError::EmptyResult);
        };
        // The attached file is only released through `remove`.
        if let Some(current) = self.draft.uploaded_file() {
            warn!(
                endpoint = %self.endpoint,
                attached = %current.key,
                incoming = %first.key,
                "upload completed while a file is attached"
            );
            return Err(UploadError::AlreadyAttached {
                attached: current.key.to_string(),
                incoming: first.key.to_string(),
            });
        }

        let descriptor = normalize_upload(first);
        info!(
            endpoint = %self.endpoint,
            key = %descriptor.key,
            kind = ?descriptor.media_kind(),
            "upload completed"
        );
        self.draft.set_uploaded_file(descriptor.clone());
        Ok(descriptor)
    }

    fn on_error(&self, failure: UploadFailure) {
        self.activity.set_uploading(false);
        warn!(endpoint = %self.endpoint, error = %failure.message, "upload failed");
        self.notifier
            .notify(Notification::error(UPLOAD_REJECTED).at(ToastPosition::BottomCenter));
    }
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
