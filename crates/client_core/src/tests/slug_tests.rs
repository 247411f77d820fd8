use super::*;

#[test]
fn empty_text_falls_back_per_context() {
    assert_eq!(compute_slug("", SlugContext::Tag), "article");
    assert_eq!(compute_slug("", SlugContext::Headline), "untitled");
    assert_eq!(compute_slug("   ", SlugContext::Headline), "untitled");
}

#[test]
fn folds_scandinavian_vowels_and_hyphenates() {
    assert_eq!(
        compute_slug("Överraskning Ångström", SlugContext::Headline),
        "overraskning-angstrom"
    );
    assert_eq!(compute_slug("Räksmörgås", SlugContext::Tag), "raksmorgas");
}

#[test]
fn collapses_whitespace_runs_into_one_hyphen() {
    assert_eq!(
        compute_slug("Breaking \t news\n\ntoday", SlugContext::Headline),
        "breaking-news-today"
    );
}

#[test]
fn leaves_other_characters_alone() {
    assert_eq!(compute_slug("Ü-Boot 2024!", SlugContext::Headline), "ü-boot-2024!");
}

#[test]
fn destination_path_percent_encodes_each_segment() {
    let path = destination_path("Sport", "Vem vann? Ü", &PostId::new("42"));
    assert_eq!(path, "/sport/vem-vann%3F-%C3%BC/42");
}

#[test]
fn destination_path_uses_placeholders_for_empty_fields() {
    let path = destination_path("", "", &PostId::new("abc"));
    assert_eq!(path, "/article/untitled/abc");
}
