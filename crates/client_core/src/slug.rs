use shared::domain::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugContext {
    Tag,
    Headline,
}

impl SlugContext {
    pub fn fallback(self) -> &'static str {
        match self {
            Self::Tag => "article",
            Self::Headline => "untitled",
        }
    }
}

pub fn compute_slug(text: &str, context: SlugContext) -> String {
    if text.trim().is_empty() {
        return context.fallback().to_string();
    }

    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        slug.push(match ch {
            'ö' => 'o',
            'ä' | 'å' => 'a',
            other => other,
        });
    }
    slug
}

pub fn destination_path(tag: &str, headline: &str, post_id: &PostId) -> String {
    format!(
        "/{}/{}/{}",
        urlencoding::encode(&compute_slug(tag, SlugContext::Tag)),
        urlencoding::encode(&compute_slug(headline, SlugContext::Headline)),
        urlencoding::encode(post_id.as_str()),
    )
}

#[cfg(test)]
#[path = "tests/slug_tests.rs"]
mod tests;
