//! Cache-key derivation from request URLs.
//!
//! Two URLs differing only by case, query, or fragment collide to the same
//! key by design, so repeat lookups hit the cache instead of the agent.

use url::Url;

/// Derives the cache key for a URL: `scheme://host/path`, lower-cased,
/// stripped of query string and fragment.
///
/// Malformed input falls back to the lower-cased raw string so the caller
/// still gets a deterministic key.
#[must_use]
pub fn cache_key(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            format!("{}://{}{}", url.scheme(), host, url.path()).to_lowercase()
        }
        Err(_) => raw.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_scheme_and_host() {
        assert_eq!(
            cache_key("HTTP://Example.com/Foo"),
            cache_key("http://example.com/Foo")
        );
    }

    #[test]
    fn path_case_collides_by_design() {
        assert_eq!(
            cache_key("http://example.com/Foo"),
            "http://example.com/foo"
        );
    }

    #[test]
    fn query_is_stripped() {
        assert_eq!(
            cache_key("http://example.com/foo?x=1"),
            "http://example.com/foo"
        );
    }

    #[test]
    fn fragment_is_stripped() {
        assert_eq!(
            cache_key("https://example.com/about#team"),
            "https://example.com/about"
        );
    }

    #[test]
    fn bare_host_keeps_root_path() {
        assert_eq!(cache_key("https://example.com"), "https://example.com/");
    }

    #[test]
    fn malformed_url_falls_back_to_lowercased_input() {
        assert_eq!(cache_key("Not A Url"), "not a url");
    }
}
