use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    domain::{FileKey, PostId},
    error::{ApiError, ApiException},
    protocol::{CreateArticleRequest, SubmissionResult, Tag},
};
use tracing::debug;
use url::Url;

use crate::ArticleBackend;

pub struct HttpArticleBackend {
    http: Client,
    api_base: Url,
}

impl HttpArticleBackend {
    pub fn new(api_base: &str) -> Result<Self> {
        let api_base =
            Url::parse(api_base).with_context(|| format!("invalid api base url '{api_base}'"))?;
        if api_base.cannot_be_a_base() {
            return Err(anyhow!("api base url '{api_base}' cannot carry a path"));
        }
        Ok(Self {
            http: Client::new(),
            api_base,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("api base url '{}' cannot carry a path", self.api_base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments)?;
        let res = self
            .http
            .delete(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?;
        let status = res.status();
        if status.is_success() {
            return Ok(());
        }
        let body = res.bytes().await.unwrap_or_default();
        Err(api_failure(status, &body))
    }
}

/// Turns a non-success response into an error, preferring the backend's message.
fn api_failure(status: StatusCode, body: &[u8]) -> anyhow::Error {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(api_error) => anyhow::Error::new(ApiException::from(api_error))
            .context(format!("backend returned {status}")),
        Err(_) => anyhow!("backend returned {status}"),
    }
}

#[async_trait]
impl ArticleBackend for HttpArticleBackend {
    async fn create_article(&self, request: &CreateArticleRequest) -> Result<SubmissionResult> {
        let url = self.endpoint(&["articles"])?;
        let res = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?;
        let status = res.status();
        let body = res.bytes().await.context("failed to read create article response")?;
        debug!(%status, bytes = body.len(), "create article response");

        // Rejections arrive as a SubmissionResult body, whatever the status.
        match serde_json::from_slice::<SubmissionResult>(&body) {
            Ok(result) => Ok(result),
            Err(_) if !status.is_success() => Err(api_failure(status, &body)),
            Err(err) => Err(err).context("malformed create article response"),
        }
    }

    async fn remove_file(&self, key: &FileKey) -> Result<()> {
        self.delete(&["files", key.as_str()]).await
    }

    async fn remove_post(&self, id: &PostId) -> Result<()> {
        self.delete(&["posts", id.as_str()]).await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let url = self.endpoint(&["tags"])?;
        let res = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to reach {url}"))?;
        let status = res.status();
        if !status.is_success() {
            let body = res.bytes().await.unwrap_or_default();
            return Err(api_failure(status, &body));
        }
        res.json().await.context("malformed tag list")
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
