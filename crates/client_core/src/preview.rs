use shared::{domain::MediaKind, protocol::Session};
use tokio::sync::watch;

use crate::draft::{Draft, DraftStore};

pub const HEADLINE_PLACEHOLDER: &str = "Your headline";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMedia {
    pub kind: MediaKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewModel {
    pub headline: String,
    pub lead: String,
    pub body: String,
    pub tag: Option<String>,
    pub author: String,
    pub media: Option<PreviewMedia>,
}

impl PreviewModel {
    pub fn from_draft(draft: &Draft, session: Option<&Session>) -> Self {
        let headline = if draft.headline.is_empty() {
            HEADLINE_PLACEHOLDER.to_string()
        } else {
            draft.headline.clone()
        };
        Self {
            headline,
            lead: draft.lead.clone(),
            body: draft.body.clone(),
            tag: (!draft.tag.is_empty()).then(|| draft.tag.clone()),
            author: session.map(|s| s.user_name().to_string()).unwrap_or_default(),
            media: draft.uploaded_file.as_ref().map(|file| PreviewMedia {
                kind: file.media_kind(),
                url: file.url.clone(),
            }),
        }
    }
}

/// A preview pane with its own subscription to the draft.
pub struct DraftPreview {
    rx: watch::Receiver<Draft>,
    session: Option<Session>,
}

impl DraftPreview {
    pub fn new(store: &DraftStore, session: Option<Session>) -> Self {
        Self {
            rx: store.subscribe(),
            session,
        }
    }

    /// True when the draft changed since the last render.
    pub fn is_stale(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    pub fn render(&mut self) -> PreviewModel {
        let draft = self.rx.borrow_and_update();
        PreviewModel::from_draft(&draft, self.session.as_ref())
    }

    /// Waits for the next draft change. `None` once every store handle is gone.
    pub async fn next(&mut self) -> Option<PreviewModel> {
        self.rx.changed().await.ok()?;
        Some(self.render())
    }
}

#[cfg(test)]
#[path = "tests/preview_tests.rs"]
mod tests;
