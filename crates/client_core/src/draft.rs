use std::sync::Arc;

use shared::protocol::FileDescriptor;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub headline: String,
    pub lead: String,
    pub body: String,
    pub tag: String,
    pub uploaded_file: Option<FileDescriptor>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone)]
pub struct DraftStore {
    tx: Arc<watch::Sender<Draft>>,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Draft::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> Draft {
        self.tx.borrow().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&Draft) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Draft> {
        self.tx.subscribe()
    }

    /// Applies `f` and wakes subscribers only when the draft actually changed.
    pub fn update(&self, f: impl FnOnce(&mut Draft)) -> bool {
        self.tx.send_if_modified(|draft| {
            let before = draft.clone();
            f(draft);
            *draft != before
        })
    }

    pub fn set_headline(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|draft| draft.headline = value);
    }

    pub fn set_lead(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|draft| draft.lead = value);
    }

    pub fn set_body(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|draft| draft.body = value);
    }

    pub fn set_tag(&self, value: impl Into<String>) {
        let value = value.into();
        self.update(|draft| draft.tag = value);
    }

    /// Picking the tag that is already selected clears the selection.
    pub fn toggle_tag(&self, selected: &str) {
        self.update(|draft| {
            if draft.tag == selected {
                draft.tag.clear();
            } else {
                draft.tag = selected.to_string();
            }
        });
    }

    pub fn set_uploaded_file(&self, file: FileDescriptor) {
        self.update(|draft| draft.uploaded_file = Some(file));
    }

    pub fn uploaded_file(&self) -> Option<FileDescriptor> {
        self.read(|draft| draft.uploaded_file.clone())
    }

    /// Drops the upload fields and returns what was stored.
    pub fn clear_upload(&self) -> Option<FileDescriptor> {
        let mut taken = None;
        self.update(|draft| taken = draft.uploaded_file.take());
        taken
    }

    pub fn reset(&self) {
        self.tx.send_replace(Draft::default());
        debug!("draft reset to defaults");
    }
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;
