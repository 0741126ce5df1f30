//! URL normalization for cross-engine result deduplication

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Query parameters that identify the click, not the resource
const TRACKING_PARAMS: &[&str] = &[
    // Google
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "gclsrc",
    // Facebook
    "fbclid",
    "fb_source",
    "fb_ref",
    // Microsoft
    "msclkid",
    // Twitter
    "twclid",
    // Mailchimp
    "mc_eid",
    "mc_cid",
    // General
    "ref",
    "ref_",
    "click_id",
    "campaign_id",
    "ad_id",
];

static TRACKING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^utm_").unwrap(),
        Regex::new(r"^_ga").unwrap(),
        Regex::new(r"^_hs").unwrap(),
    ]
});

fn is_tracking_param(param: &str) -> bool {
    TRACKING_PARAMS.contains(&param) || TRACKING_PATTERNS.iter().any(|p| p.is_match(param))
}

/// Build the normalized dedup key for a result URL.
///
/// Collapses scheme, `www.` prefix, casing and trailing slashes, and strips
/// tracking query parameters, so the same resource reached via different
/// engines maps to one key. Unparseable URLs fall back to a trimmed
/// lowercase form of the raw string.
pub fn dedup_key(url: &str) -> String {
    let parsed = match Url::parse(url.trim()) {
        Ok(u) => u,
        Err(_) => return url.trim().trim_end_matches('/').to_lowercase(),
    };

    let host = parsed
        .host_str()
        .unwrap_or("")
        .trim_start_matches("www.")
        .to_string();
    let path = parsed.path().trim_end_matches('/');

    let kept_params: Vec<String> = parsed
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();

    let mut key = format!("{}{}", host, path);
    if !kept_params.is_empty() {
        key.push('?');
        key.push_str(&kept_params.join("&"));
    }
    key.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_and_www_collapse() {
        assert_eq!(
            dedup_key("https://www.example.com/page"),
            dedup_key("http://example.com/page")
        );
    }

    #[test]
    fn test_trailing_slash_and_case_collapse() {
        assert_eq!(
            dedup_key("https://example.com/Page/"),
            dedup_key("https://example.com/page")
        );
    }

    #[test]
    fn test_tracking_params_stripped() {
        assert_eq!(
            dedup_key("https://example.com/a?utm_source=google&utm_medium=cpc&fbclid=xyz"),
            dedup_key("https://example.com/a")
        );
    }

    #[test]
    fn test_meaningful_params_kept() {
        let with_query = dedup_key("https://example.com/search?q=rust&page=2");
        assert!(with_query.contains("q=rust"));
        assert!(with_query.contains("page=2"));
        assert_ne!(with_query, dedup_key("https://example.com/search?q=rust"));
    }

    #[test]
    fn test_mixed_params_filtered() {
        assert_eq!(
            dedup_key("https://example.com/a?q=test&utm_campaign=x"),
            dedup_key("https://example.com/a?q=test")
        );
    }

    #[test]
    fn test_unparseable_url_falls_back() {
        assert_eq!(dedup_key("not a url "), "not a url");
    }
}
