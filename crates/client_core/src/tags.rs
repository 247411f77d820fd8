use std::cmp::Ordering;

use anyhow::{Context, Result};
use shared::{domain::UserId, protocol::Tag};
use tracing::warn;

use crate::ArticleBackend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPolicy {
    /// Tags only privileged users may pick.
    pub restricted_tags: Vec<String>,
    pub privileged_user_ids: Vec<UserId>,
    /// Tags pinned to the end of the list, in input order.
    pub trailing_tags: Vec<String>,
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self {
            restricted_tags: vec!["Newzio".into()],
            privileged_user_ids: vec![UserId::new("87246869")],
            trailing_tags: vec!["Other".into(), "Newzio".into()],
        }
    }
}

impl TagPolicy {
    pub fn is_privileged(&self, user_id: Option<&UserId>) -> bool {
        user_id.is_some_and(|id| self.privileged_user_ids.contains(id))
    }

    pub fn is_visible(&self, tag: &str, user_id: Option<&UserId>) -> bool {
        !self.restricted_tags.iter().any(|t| t == tag) || self.is_privileged(user_id)
    }

    fn is_trailing(&self, tag: &str) -> bool {
        self.trailing_tags.iter().any(|t| t == tag)
    }
}

/// Tags offered to `user_id`, sorted for display.
pub fn selectable_tags(tags: &[Tag], user_id: Option<&UserId>, policy: &TagPolicy) -> Vec<Tag> {
    let mut visible: Vec<Tag> = tags
        .iter()
        .filter(|tag| policy.is_visible(&tag.tag, user_id))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        match (policy.is_trailing(&a.tag), policy.is_trailing(&b.tag)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a
                .tag
                .to_lowercase()
                .cmp(&b.tag.to_lowercase())
                .then_with(|| a.tag.cmp(&b.tag)),
        }
    });
    visible
}

/// Fetches the tag list. An untagged draft can do without it, so a failure
/// is only propagated when `required` is set.
pub async fn load_tags(backend: &dyn ArticleBackend, required: bool) -> Result<Vec<Tag>> {
    match backend.list_tags().await {
        Ok(tags) => Ok(tags),
        Err(err) if required => Err(err).context("could not load tag list"),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "could not load tag list");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
#[path = "tests/tags_tests.rs"]
mod tests;
