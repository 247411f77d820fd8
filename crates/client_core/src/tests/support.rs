use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{FileKey, PostId, UserId},
    protocol::{CreateArticleRequest, Session, SessionUser, SubmissionResult, Tag},
};
use tokio::sync::Notify;

use crate::{
    notify::{Navigator, Notification, Notifier},
    posts::Clipboard,
    ArticleBackend,
};

#[derive(Default)]
pub struct RecordingBackend {
    pub create_response: Mutex<Option<SubmissionResult>>,
    pub fail_with: Option<String>,
    pub gate: Option<Arc<Notify>>,
    pub requests: Mutex<Vec<CreateArticleRequest>>,
    pub removed_files: Mutex<Vec<FileKey>>,
    pub removed_posts: Mutex<Vec<PostId>>,
    pub tags: Vec<Tag>,
}

impl RecordingBackend {
    pub fn responding(result: SubmissionResult) -> Self {
        Self {
            create_response: Mutex::new(Some(result)),
            ..Self::default()
        }
    }

    pub fn failing(err: impl Into<String>) -> Self {
        Self {
            fail_with: Some(err.into()),
            ..Self::default()
        }
    }

    pub fn gated(result: SubmissionResult, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::responding(result)
        }
    }

    pub fn requests(&self) -> Vec<CreateArticleRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn removed_files(&self) -> Vec<FileKey> {
        self.removed_files.lock().expect("files lock").clone()
    }

    pub fn removed_posts(&self) -> Vec<PostId> {
        self.removed_posts.lock().expect("posts lock").clone()
    }
}

#[async_trait]
impl ArticleBackend for RecordingBackend {
    async fn create_article(&self, request: &CreateArticleRequest) -> Result<SubmissionResult> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        Ok(self
            .create_response
            .lock()
            .expect("response lock")
            .clone()
            .unwrap_or_default())
    }

    async fn remove_file(&self, key: &FileKey) -> Result<()> {
        self.removed_files
            .lock()
            .expect("files lock")
            .push(key.clone());
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        Ok(())
    }

    async fn remove_post(&self, id: &PostId) -> Result<()> {
        self.removed_posts
            .lock()
            .expect("posts lock")
            .push(id.clone());
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        if let Some(err) = &self.fail_with {
            return Err(anyhow!("{err}"));
        }
        Ok(self.tags.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifications lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .expect("notifications lock")
            .push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("paths lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.paths.lock().expect("paths lock").push(path.to_string());
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub fail_with: Option<String>,
    written: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn failing(err: impl Into<String>) -> Self {
        Self {
            fail_with: Some(err.into()),
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().expect("clipboard lock").clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if let Some(err) = &self.fail_with {
            return Err(anyhow!(err.clone()));
        }
        self.written
            .lock()
            .expect("clipboard lock")
            .push(text.to_string());
        Ok(())
    }
}

pub fn session(id: &str, name: &str) -> Session {
    Session {
        user: SessionUser {
            id: Some(UserId::new(id)),
            name: Some(name.to_string()),
            image: Some(format!("https://avatars.example/{id}.png")),
        },
    }
}

pub fn tags() -> Vec<Tag> {
    vec![
        Tag::new("1", "Newzio"),
        Tag::new("2", "Sport"),
        Tag::new("3", "Nöje"),
        Tag::new("4", "Other"),
    ]
}
