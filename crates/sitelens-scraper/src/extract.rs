//! Pattern-matching metadata extraction from raw page markup.
//!
//! Deliberately regex-based rather than DOM-based: the input is whatever
//! bytes the site served, frequently malformed, and every rule must degrade
//! to absence instead of failing. Each field lookup runs independently over
//! the full document; no lookup short-circuits another.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{PageMetadata, SocialLinks};

/// Body-text excerpt cap, in characters.
const TEXT_EXCERPT_LIMIT: usize = 5000;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>([^<]+)</title>").expect("valid title regex"));
static META_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+name=["']description["']\s+content=["']([^"']+)["']"#)
        .expect("valid meta-description regex")
});
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style>").expect("valid style regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?linkedin\.com/(?:company|in)/([^\s"'<>]+)"#)
        .expect("valid linkedin regex")
});
static TWITTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?twitter\.com/([^\s"'<>]+)"#).expect("valid twitter regex")
});
static FACEBOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?facebook\.com/([^\s"'<>]+)"#)
        .expect("valid facebook regex")
});
static INSTAGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?instagram\.com/([^\s"'<>]+)"#)
        .expect("valid instagram regex")
});
static YOUTUBE_HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?youtube\.com/@([^\s"'<>/]+)"#)
        .expect("valid youtube handle regex")
});
static YOUTUBE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://(?:www\.)?youtube\.com/(?:channel|c|user)/([^\s"'<>]+)"#)
        .expect("valid youtube path regex")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
        .expect("valid phone regex")
});

/// Derives [`PageMetadata`] from raw markup. Pure and deterministic; a field
/// that cannot be found is absent, never an error.
#[must_use]
pub fn extract_metadata(html: &str) -> PageMetadata {
    PageMetadata {
        title: first_capture(&TITLE_RE, html).unwrap_or_default(),
        description: first_capture(&META_DESC_RE, html).unwrap_or_default(),
        text: body_text(html),
        social_links: social_links(html),
        email: EMAIL_RE.find(html).map(|m| m.as_str().to_owned()),
        phone: phone(html),
    }
}

/// First capture group of `re` in `html`, trimmed.
fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .map(|caps| caps[1].trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Markup with `<script>`/`<style>` elements removed, remaining tags
/// stripped, whitespace collapsed, truncated to [`TEXT_EXCERPT_LIMIT`].
fn body_text(html: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&without_styles, " ");
    let collapsed = WHITESPACE_RE.replace_all(&without_tags, " ");
    collapsed.trim().chars().take(TEXT_EXCERPT_LIMIT).collect()
}

/// First match per platform, normalized to a canonical profile URL. Multiple
/// matches for one platform are not de-duplicated; later ones are ignored.
fn social_links(html: &str) -> SocialLinks {
    SocialLinks {
        linkedin: first_capture(&LINKEDIN_RE, html)
            .map(|id| format!("https://linkedin.com/company/{id}")),
        twitter: first_capture(&TWITTER_RE, html).map(|id| format!("https://twitter.com/{id}")),
        facebook: first_capture(&FACEBOOK_RE, html).map(|id| format!("https://facebook.com/{id}")),
        instagram: first_capture(&INSTAGRAM_RE, html)
            .map(|id| format!("https://instagram.com/{id}")),
        youtube: youtube_link(html),
    }
}

/// Prefers the newer `@handle` form; falls back to `channel`/`c`/`user`
/// paths, normalizing a bare ID to `channel/<id>`.
fn youtube_link(html: &str) -> Option<String> {
    if let Some(handle) = first_capture(&YOUTUBE_HANDLE_RE, html) {
        return Some(format!("https://youtube.com/@{handle}"));
    }
    first_capture(&YOUTUBE_PATH_RE, html).map(|id| {
        if id.contains('/') {
            format!("https://youtube.com/{id}")
        } else {
            format!("https://youtube.com/channel/{id}")
        }
    })
}

/// First North-American 3-3-4 digit grouping, normalized to
/// `+1-NNN-NNN-NNNN`.
fn phone(html: &str) -> Option<String> {
    PHONE_RE
        .captures(html)
        .map(|caps| format!("+1-{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}
