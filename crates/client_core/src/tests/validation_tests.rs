use super::*;
use crate::error::Field;
use proptest::prelude::*;

fn tags() -> Vec<Tag> {
    vec![Tag::new("1", "Sport"), Tag::new("2", "Politik")]
}

#[test]
fn headline_checks_run_in_form_order() {
    assert_eq!(validate_headline(""), Err(FieldError::HeadlineMissing));
    assert_eq!(validate_headline("abc"), Err(FieldError::HeadlineTooShort));
    assert_eq!(validate_headline(" ab"), Err(FieldError::HeadlineTooShort));
    assert_eq!(
        validate_headline(&"x".repeat(65)),
        Err(FieldError::HeadlineTooLong)
    );
    assert_eq!(validate_headline(" abcd"), Err(FieldError::HeadlineEdgeSpace));
    assert_eq!(validate_headline("abcd "), Err(FieldError::HeadlineEdgeSpace));
    assert_eq!(validate_headline("abcd"), Ok(()));
    assert_eq!(validate_headline(&"x".repeat(64)), Ok(()));
}

#[test]
fn headline_length_counts_characters_not_bytes() {
    assert_eq!(validate_headline("åäöå"), Ok(()));
    assert_eq!(validate_headline(&"ö".repeat(64)), Ok(()));
}

#[test]
fn lead_is_optional_but_bounded() {
    assert_eq!(validate_lead(""), Ok(()));
    assert_eq!(validate_lead("short"), Err(FieldError::LeadTooShort));
    assert_eq!(validate_lead(&"l".repeat(257)), Err(FieldError::LeadTooLong));
    assert_eq!(validate_lead(" eight chars"), Err(FieldError::LeadEdgeSpace));
    assert_eq!(validate_lead("exactly8"), Ok(()));
}

#[test]
fn body_is_capped() {
    assert_eq!(validate_body(""), Ok(()));
    assert_eq!(validate_body(&"b".repeat(4096)), Ok(()));
    assert_eq!(validate_body(&"b".repeat(4097)), Err(FieldError::BodyTooLong));
}

#[test]
fn tag_must_be_selectable_or_empty() {
    assert_eq!(validate_tag("", &tags()), Ok(()));
    assert_eq!(validate_tag("Sport", &tags()), Ok(()));
    assert_eq!(validate_tag("sport", &tags()), Err(FieldError::UnknownTag));
    assert_eq!(validate_tag("Newzio", &tags()), Err(FieldError::UnknownTag));
}

#[test]
fn validate_draft_reports_every_failing_field() {
    let draft = Draft {
        headline: "ab".into(),
        lead: "tiny".into(),
        tag: "Weather".into(),
        ..Draft::default()
    };

    let errors = validate_draft(&draft, &tags()).expect_err("draft should be invalid");
    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors.for_field(Field::Headline),
        Some(FieldError::HeadlineTooShort)
    );
    assert_eq!(errors.for_field(Field::Lead), Some(FieldError::LeadTooShort));
    assert_eq!(errors.for_field(Field::Tag), Some(FieldError::UnknownTag));
    assert_eq!(errors.for_field(Field::Body), None);
}

#[test]
fn validate_draft_accepts_minimal_draft() {
    let draft = Draft {
        headline: "News".into(),
        ..Draft::default()
    };
    assert!(validate_draft(&draft, &tags()).is_ok());
}

#[test]
fn counter_flags_the_limit() {
    let counter = FieldCounter::headline(&"h".repeat(64));
    assert!(counter.is_at_limit());
    assert_eq!(counter.to_string(), "64/64");

    let counter = FieldCounter::lead("abc");
    assert!(!counter.is_at_limit());
    assert_eq!(counter.to_string(), "3/256");
}

proptest! {
    #[test]
    fn headline_valid_iff_bounded_without_edge_spaces(value in "[ a-zåäö]{0,80}") {
        let len = value.chars().count();
        let expected = (HEADLINE_MIN_LEN..=HEADLINE_MAX_LEN).contains(&len)
            && !value.starts_with(' ')
            && !value.ends_with(' ');
        prop_assert_eq!(validate_headline(&value).is_ok(), expected);
    }

    #[test]
    fn lead_valid_iff_empty_or_bounded_without_edge_spaces(value in "[ a-z]{0,300}") {
        let len = value.chars().count();
        let expected = value.is_empty()
            || ((LEAD_MIN_LEN..=LEAD_MAX_LEN).contains(&len)
                && !value.starts_with(' ')
                && !value.ends_with(' '));
        prop_assert_eq!(validate_lead(&value).is_ok(), expected);
    }
}
