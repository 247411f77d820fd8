use std::fmt;

pub const ARTICLE_PUBLISHED: &str = "Article successfully published.";
pub const PUBLISH_FAILED_UNEXPECTEDLY: &str =
    "Something went wrong while publishing. Please try again.";
pub const UPLOAD_REJECTED: &str =
    "The file(s) you are trying to upload are either too many or too large";
pub const POST_DELETED: &str = "News successfully deleted.";
pub const POST_DELETE_FAILED: &str = "The news post could not be deleted. Please try again.";
pub const LINK_COPIED: &str = "News copied to clipboard.";
pub const LINK_COPY_FAILED: &str = "The link could not be copied.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPosition {
    #[default]
    BottomRight,
    BottomCenter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub position: ToastPosition,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            position: ToastPosition::default(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            position: ToastPosition::default(),
        }
    }

    pub fn at(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
        };
        write!(f, "[{marker}] {}", self.message)
    }
}

/// Displays transient notifications to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Client-side router.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}
