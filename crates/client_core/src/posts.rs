use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{
    domain::PostId,
    protocol::{Post, Session},
};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    error::PostActionError,
    notify::{
        Navigator, Notification, Notifier, LINK_COPIED, LINK_COPY_FAILED, POST_DELETED,
        POST_DELETE_FAILED,
    },
    ArticleBackend, IdentityProvider,
};

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostMedia {
    Video(String),
    Image(String),
    Missing,
}

/// Posts store only the media URL; `.mp4` files play as video.
pub fn post_media(url: Option<&str>) -> PostMedia {
    match url {
        Some(url) if url.ends_with(".mp4") => PostMedia::Video(url.to_string()),
        Some(url) if !url.is_empty() => PostMedia::Image(url.to_string()),
        _ => PostMedia::Missing,
    }
}

pub fn can_delete(post: &Post, session: Option<&Session>) -> bool {
    session
        .and_then(Session::user_id)
        .is_some_and(|id| *id == post.user_id)
}

pub fn share_link(site_url: &str, title_slug: &str, id: &PostId) -> String {
    format!("{}/{}/{}", site_url.trim_end_matches('/'), title_slug, id)
}

/// Strict relative time with a suffix, e.g. `3 minutes ago` or `in 2 days`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const UNITS: [(&str, f64, f64); 5] = [
        ("minute", 1.0, 60.0),
        ("hour", 60.0, 1_440.0),
        ("day", 1_440.0, 43_200.0),
        ("month", 43_200.0, 525_600.0),
        ("year", 525_600.0, f64::INFINITY),
    ];

    let millis = (now - then).num_milliseconds();
    let past = millis >= 0;
    let minutes = millis.unsigned_abs() as f64 / 60_000.0;

    let (unit, value) = if minutes < 1.0 {
        ("second", (millis.unsigned_abs() as f64 / 1_000.0).round())
    } else {
        UNITS
            .iter()
            .find(|(_, _, upper)| minutes < *upper)
            .map(|(unit, per, _)| (*unit, (minutes / per).round()))
            .unwrap_or(("year", (minutes / 525_600.0).round()))
    };

    let value = value as u64;
    let plural = if value == 1 { "" } else { "s" };
    if past {
        format!("{value} {unit}{plural} ago")
    } else {
        format!("in {value} {unit}{plural}")
    }
}

pub fn published_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("published {}", relative_time(created_at, now))
}

pub struct PostActions {
    backend: Arc<dyn ArticleBackend>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    clipboard: Arc<dyn Clipboard>,
    site_url: String,
    deleted: watch::Sender<bool>,
}

impl PostActions {
    pub fn new(
        backend: Arc<dyn ArticleBackend>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        clipboard: Arc<dyn Clipboard>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            identity,
            notifier,
            navigator,
            clipboard,
            site_url: site_url.into(),
            deleted: watch::Sender::new(false),
        }
    }

    /// Raised once a post has been deleted so listing views can refresh.
    pub fn subscribe_deleted(&self) -> watch::Receiver<bool> {
        self.deleted.subscribe()
    }

    pub fn can_delete(&self, post: &Post) -> bool {
        can_delete(post, self.identity.current_session().as_ref())
    }

    pub async fn delete(&self, post: &Post) -> Result<(), PostActionError> {
        if !self.can_delete(post) {
            warn!(post_id = %post.id, "delete requested by non-author");
            return Err(PostActionError::NotOwner(post.id.to_string()));
        }

        if let Err(err) = self.backend.remove_post(&post.id).await {
            error!(post_id = %post.id, error = %format!("{err:#}"), "failed to delete post");
            self.notifier.notify(Notification::error(POST_DELETE_FAILED));
            return Err(PostActionError::Remove {
                id: post.id.to_string(),
                message: format!("{err:#}"),
            });
        }

        self.deleted.send_replace(true);
        self.navigator.push("/");
        self.notifier.notify(Notification::success(POST_DELETED));
        info!(post_id = %post.id, "post deleted");
        Ok(())
    }

    pub fn share_link(&self, title_slug: &str, id: &PostId) -> String {
        share_link(&self.site_url, title_slug, id)
    }

    /// Copies the share link to the clipboard and returns it.
    pub fn share(&self, title_slug: &str, id: &PostId) -> Result<String, PostActionError> {
        let link = self.share_link(title_slug, id);
        if let Err(err) = self.clipboard.write_text(&link) {
            error!(%link, error = %format!("{err:#}"), "failed to copy share link");
            self.notifier.notify(Notification::error(LINK_COPY_FAILED));
            return Err(PostActionError::Clipboard(format!("{err:#}")));
        }
        self.notifier.notify(Notification::success(LINK_COPIED));
        Ok(link)
    }
}

#[cfg(test)]
#[path = "tests/posts_tests.rs"]
mod tests;
