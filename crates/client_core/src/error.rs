use std::fmt;

use thiserror::Error;

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Headline,
    Lead,
    Body,
    Tag,
}

/// Inline validation failure. The display text is the copy shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("There is no headline!")]
    HeadlineMissing,
    #[error("The headline might be too short!")]
    HeadlineTooShort,
    #[error("The headline is too long!")]
    HeadlineTooLong,
    #[error("Headline cannot start or end with spaces!")]
    HeadlineEdgeSpace,
    #[error("The lead is too short!")]
    LeadTooShort,
    #[error("The lead is too long!")]
    LeadTooLong,
    #[error("The lead cannot start or end with spaces!")]
    LeadEdgeSpace,
    #[error("The body is too long!")]
    BodyTooLong,
    #[error("The selected tag is not available!")]
    UnknownTag,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::HeadlineMissing
            | Self::HeadlineTooShort
            | Self::HeadlineTooLong
            | Self::HeadlineEdgeSpace => Field::Headline,
            Self::LeadTooShort | Self::LeadTooLong | Self::LeadEdgeSpace => Field::Lead,
            Self::BodyTooLong => Field::Body,
            Self::UnknownTag => Field::Tag,
        }
    }
}

/// Every field failure found in one pass over a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: Field) -> Option<FieldError> {
        self.0.iter().copied().find(|err| err.field() == field)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("publishing is disabled while an upload or another submission is in flight")]
    Busy,
    #[error("draft is invalid: {0}")]
    Validation(FieldErrors),
    #[error("publishing was rejected: {0}")]
    Rejected(String),
    #[error("unexpected publishing failure: {0}")]
    Unexpected(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload finished without any files")]
    EmptyResult,
    #[error("file {attached} is already attached; discarded upload {incoming}")]
    AlreadyAttached { attached: String, incoming: String },
    #[error("upload service rejected the files: {0}")]
    Rejected(String),
    #[error("failed to remove uploaded file {key}: {message}")]
    Remove { key: String, message: String },
}

#[derive(Debug, Error)]
pub enum PostActionError {
    #[error("only the author can delete post {0}")]
    NotOwner(String),
    #[error("failed to delete post {id}: {message}")]
    Remove { id: String, message: String },
    #[error("failed to copy share link: {0}")]
    Clipboard(String),
}
