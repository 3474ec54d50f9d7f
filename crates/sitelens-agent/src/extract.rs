//! Resilient structured-data extraction from free-text agent output.
//!
//! The service is asked for bare JSON but routinely wraps its answer in
//! prose or markdown fences. Extraction runs an ordered list of locator
//! strategies; the first located candidate that parses wins. A located
//! candidate that fails to parse is reported as a parse error, while no
//! candidate at all is reported as an extraction error carrying the
//! original text for diagnostics.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Value;
use sitelens_core::{BusinessProfile, ContactInfo, SocialMedia};

use crate::error::AgentError;

static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid fenced-block regex")
});

/// A named locator strategy: given the raw text, return a JSON-shaped
/// candidate substring or nothing.
type Locator = fn(&str) -> Option<String>;

/// Ordered strategies, first parse success wins.
const STRATEGIES: &[(&str, Locator)] = &[
    ("brace-span", locate_brace_span),
    ("fenced-block", locate_fenced_block),
];

/// Recovers a [`BusinessProfile`] from arbitrary agent output, stamping
/// `extracted_at` with the current time.
///
/// # Errors
///
/// - [`AgentError::NoJson`] if no strategy locates a JSON-shaped substring.
/// - [`AgentError::Parse`] if a substring is located but none parses.
pub fn extract_profile(raw: &str) -> Result<BusinessProfile, AgentError> {
    extract_profile_at(raw, Utc::now())
}

/// [`extract_profile`] with an explicit timestamp, for deterministic tests.
pub fn extract_profile_at(
    raw: &str,
    extracted_at: DateTime<Utc>,
) -> Result<BusinessProfile, AgentError> {
    let mut parse_failure: Option<(String, serde_json::Error)> = None;

    for (name, locate) in STRATEGIES {
        let Some(candidate) = locate(raw) else {
            continue;
        };
        match serde_json::from_str::<Value>(&candidate) {
            Ok(parsed @ Value::Object(_)) => {
                tracing::debug!(strategy = %name, "located parseable JSON object");
                return Ok(coerce_profile(&parsed, extracted_at));
            }
            // Candidates are brace-delimited, so a non-object parse cannot
            // happen; skip rather than panic if a strategy ever loosens.
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(strategy = %name, error = %err, "candidate did not parse");
                if parse_failure.is_none() {
                    parse_failure = Some((candidate, err));
                }
            }
        }
    }

    match parse_failure {
        Some((candidate, source)) => Err(AgentError::Parse { candidate, source }),
        None => Err(AgentError::NoJson {
            response: raw.to_owned(),
        }),
    }
}

/// Greedy outer-brace span: first `{` through last `}`.
fn locate_brace_span(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(raw[start..=end].to_owned())
}

/// Interior of the first fenced code block, optionally tagged `json`.
fn locate_fenced_block(raw: &str) -> Option<String> {
    FENCED_BLOCK_RE
        .captures(raw)
        .map(|caps| caps[1].to_owned())
}

/// Explicit schema step mapping a parsed object onto the record shape.
///
/// One uniform default rule for every field: absent, non-string, or empty
/// values collapse to `None`. A completely missing nested object yields
/// all-absent sub-fields rather than failing the record. `website` is the
/// lone non-optional field and defaults to the empty string.
fn coerce_profile(parsed: &Value, extracted_at: DateTime<Utc>) -> BusinessProfile {
    let contact = &parsed["contact"];
    let social = &parsed["socialMedia"];

    BusinessProfile {
        name: string_field(parsed, "name"),
        description: string_field(parsed, "description"),
        website: string_field(parsed, "website").unwrap_or_default(),
        contact: ContactInfo {
            email: string_field(contact, "email"),
            phone: string_field(contact, "phone"),
        },
        social_media: SocialMedia {
            linkedin: string_field(social, "linkedin"),
            twitter: string_field(social, "twitter"),
            facebook: string_field(social, "facebook"),
            instagram: string_field(social, "instagram"),
            youtube: string_field(social, "youtube"),
        },
        registration_number: string_field(parsed, "registrationNumber"),
        extracted_at,
    }
}

/// Reads `value[key]` as a non-empty string, `None` otherwise.
fn string_field(value: &Value, key: &str) -> Option<String> {
    value[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
