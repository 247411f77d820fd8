use std::sync::Arc;

use shared::protocol::{CreateArticleRequest, Session, SubmissionResult, Tag};
use tracing::{error, info, warn};

use crate::{
    activity::PublishActivity,
    draft::{Draft, DraftStore},
    error::{FieldErrors, SubmitError},
    notify::{
        Navigator, Notification, Notifier, ToastPosition, ARTICLE_PUBLISHED,
        PUBLISH_FAILED_UNEXPECTEDLY,
    },
    slug::destination_path,
    tags::{selectable_tags, TagPolicy},
    validation::validate_draft,
    ArticleBackend, IdentityProvider,
};

/// Combines the draft with the author's identity. Missing identity fields
/// become `0` or the empty string.
pub fn build_request(draft: &Draft, session: Option<&Session>) -> CreateArticleRequest {
    CreateArticleRequest {
        headline: draft.headline.clone(),
        lead: draft.lead.clone(),
        body: draft.body.clone(),
        tag: draft.tag.clone(),
        upload_details: draft.uploaded_file.clone(),
        user_id: session
            .and_then(Session::user_id)
            .map(|id| id.numeric())
            .unwrap_or(0),
        user_name: session
            .map(|s| s.user_name().to_string())
            .unwrap_or_default(),
        user_image: session
            .map(|s| s.user_image().to_string())
            .unwrap_or_default(),
    }
}

pub struct SubmissionController {
    draft: DraftStore,
    activity: Arc<PublishActivity>,
    backend: Arc<dyn ArticleBackend>,
    identity: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    tags: Vec<Tag>,
    tag_policy: TagPolicy,
}

impl SubmissionController {
    pub fn new(
        draft: DraftStore,
        backend: Arc<dyn ArticleBackend>,
        identity: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            draft,
            activity: Arc::new(PublishActivity::default()),
            backend,
            identity,
            notifier,
            navigator,
            tags: Vec::new(),
            tag_policy: TagPolicy::default(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>, policy: TagPolicy) -> Self {
        self.tags = tags;
        self.tag_policy = policy;
        self
    }

    pub fn draft(&self) -> &DraftStore {
        &self.draft
    }

    pub fn activity(&self) -> Arc<PublishActivity> {
        Arc::clone(&self.activity)
    }

    pub fn can_publish(&self) -> bool {
        self.activity.can_publish()
    }

    pub fn selectable_tags(&self) -> Vec<Tag> {
        let session = self.identity.current_session();
        selectable_tags(
            &self.tags,
            session.as_ref().and_then(Session::user_id),
            &self.tag_policy,
        )
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let draft = self.draft.snapshot();
        validate_draft(&draft, &self.selectable_tags())
    }

    pub fn publish_label(&self) -> String {
        if self.activity.is_uploading() {
            return "Waiting for news cover to upload...".to_string();
        }
        if self.activity.is_submitting() {
            return "Publishing...".to_string();
        }
        match self.identity.current_session() {
            Some(session) if !session.user_name().is_empty() => {
                format!("Publish as {}", session.user_name())
            }
            _ => "Publish article".to_string(),
        }
    }

    pub async fn submit(&self) -> Result<SubmissionResult, SubmitError> {
        let Some(_in_flight) = self.activity.try_begin_submission() else {
            warn!(
                uploading = self.activity.is_uploading(),
                "publish requested while another operation is in flight"
            );
            return Err(SubmitError::Busy);
        };

        let draft = self.draft.snapshot();
        validate_draft(&draft, &self.selectable_tags()).map_err(SubmitError::Validation)?;

        let session = self.identity.current_session();
        let request = build_request(&draft, session.as_ref());
        info!(
            headline = %request.headline,
            tag = %request.tag,
            user_id = request.user_id,
            has_upload = request.upload_details.is_some(),
            "publishing article"
        );

        let result = match self.backend.create_article(&request).await {
            Ok(result) => result,
            Err(err) => {
                error!(error = %format!("{err:#}"), "create article call failed");
                return Err(self.fail_unexpectedly(format!("{err:#}")));
            }
        };

        if !result.success {
            let message = result
                .error
                .clone()
                .unwrap_or_else(|| PUBLISH_FAILED_UNEXPECTEDLY.to_string());
            warn!(error = %message, "backend rejected article");
            self.notifier
                .notify(Notification::error(message.clone()).at(ToastPosition::BottomCenter));
            return Err(SubmitError::Rejected(message));
        }

        let Some(post_id) = result.id.clone() else {
            error!("backend reported success without a post id");
            return Err(self.fail_unexpectedly("backend reported success without a post id"));
        };

        self.draft.reset();
        self.notifier
            .notify(Notification::success(ARTICLE_PUBLISHED).at(ToastPosition::BottomCenter));
        let destination = destination_path(&request.tag, &request.headline, &post_id);
        info!(post_id = %post_id, %destination, "article published");
        self.navigator.push(&destination);

        Ok(result)
    }

    fn fail_unexpectedly(&self, reason: impl Into<String>) -> SubmitError {
        self.notifier.notify(
            Notification::error(PUBLISH_FAILED_UNEXPECTEDLY).at(ToastPosition::BottomCenter),
        );
        SubmitError::Unexpected(reason.into())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
