use std::fmt;

use shared::protocol::Tag;

use crate::{
    draft::Draft,
    error::{FieldError, FieldErrors},
};

pub const HEADLINE_MIN_LEN: usize = 4;
pub const HEADLINE_MAX_LEN: usize = 64;
pub const LEAD_MIN_LEN: usize = 8;
pub const LEAD_MAX_LEN: usize = 256;
pub const BODY_MAX_LEN: usize = 4096;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn has_edge_space(value: &str) -> bool {
    value.starts_with(' ') || value.ends_with(' ')
}

pub fn validate_headline(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::HeadlineMissing);
    }
    let len = char_len(value);
    if len < HEADLINE_MIN_LEN {
        return Err(FieldError::HeadlineTooShort);
    }
    if len > HEADLINE_MAX_LEN {
        return Err(FieldError::HeadlineTooLong);
    }
    if has_edge_space(value) {
        return Err(FieldError::HeadlineEdgeSpace);
    }
    Ok(())
}

/// The lead is optional: an empty value always passes.
pub fn validate_lead(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Ok(());
    }
    let len = char_len(value);
    if len < LEAD_MIN_LEN {
        return Err(FieldError::LeadTooShort);
    }
    if len > LEAD_MAX_LEN {
        return Err(FieldError::LeadTooLong);
    }
    if has_edge_space(value) {
        return Err(FieldError::LeadEdgeSpace);
    }
    Ok(())
}

pub fn validate_body(value: &str) -> Result<(), FieldError> {
    if char_len(value) > BODY_MAX_LEN {
        return Err(FieldError::BodyTooLong);
    }
    Ok(())
}

/// An empty tag is allowed; anything else must be one of `selectable`.
pub fn validate_tag(value: &str, selectable: &[Tag]) -> Result<(), FieldError> {
    if value.is_empty() || selectable.iter().any(|tag| tag.tag == value) {
        Ok(())
    } else {
        Err(FieldError::UnknownTag)
    }
}

pub fn validate_draft(draft: &Draft, selectable: &[Tag]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    let checks = [
        validate_headline(&draft.headline),
        validate_lead(&draft.lead),
        validate_body(&draft.body),
        validate_tag(&draft.tag, selectable),
    ];
    for err in checks.into_iter().filter_map(Result::err) {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Character counter rendered under a bounded field, e.g. `12/64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCounter {
    pub used: usize,
    pub limit: usize,
}

impl FieldCounter {
    pub fn new(value: &str, limit: usize) -> Self {
        Self {
            used: char_len(value),
            limit,
        }
    }

    pub fn headline(value: &str) -> Self {
        Self::new(value, HEADLINE_MAX_LEN)
    }

    pub fn lead(value: &str) -> Self {
        Self::new(value, LEAD_MAX_LEN)
    }

    pub fn body(value: &str) -> Self {
        Self::new(value, BODY_MAX_LEN)
    }

    /// The form highlights the field once the limit is reached.
    pub fn is_at_limit(&self) -> bool {
        self.used >= self.limit
    }
}

impl fmt::Display for FieldCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.used, self.limit)
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
