use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{FileKey, PostId},
    protocol::{CreateArticleRequest, Session, SubmissionResult, Tag},
};

pub mod activity;
pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod notify;
pub mod posts;
pub mod preview;
pub mod slug;
pub mod tags;
pub mod transport;
pub mod upload;
pub mod validation;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

pub use activity::PublishActivity;
pub use controller::SubmissionController;
pub use draft::{Draft, DraftStore};
pub use posts::PostActions;
pub use transport::HttpArticleBackend;
pub use upload::UploadReconciler;

/// Server-side actions of the publishing backend.
#[async_trait]
pub trait ArticleBackend: Send + Sync {
    async fn create_article(&self, request: &CreateArticleRequest) -> Result<SubmissionResult>;
    async fn remove_file(&self, key: &FileKey) -> Result<()>;
    async fn remove_post(&self, id: &PostId) -> Result<()>;
    async fn list_tags(&self) -> Result<Vec<Tag>>;
}

pub struct MissingArticleBackend;

#[async_trait]
impl ArticleBackend for MissingArticleBackend {
    async fn create_article(&self, _request: &CreateArticleRequest) -> Result<SubmissionResult> {
        Err(anyhow!("publishing backend is unavailable"))
    }

    async fn remove_file(&self, key: &FileKey) -> Result<()> {
        Err(anyhow!("publishing backend is unavailable; cannot remove file {key}"))
    }

    async fn remove_post(&self, id: &PostId) -> Result<()> {
        Err(anyhow!("publishing backend is unavailable; cannot remove post {id}"))
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        Err(anyhow!("publishing backend is unavailable"))
    }
}

/// Current session as reported by the authentication provider.
pub trait IdentityProvider: Send + Sync {
    fn current_session(&self) -> Option<Session>;
}

/// Identity fixed at construction, e.g. from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Session>);

impl IdentityProvider for StaticIdentity {
    fn current_session(&self) -> Option<Session> {
        self.0.clone()
    }
}
