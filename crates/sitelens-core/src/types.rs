use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The canonical extracted record returned to callers regardless of which
/// path (agent or heuristic scrape) produced it.
///
/// Optional fields are `Some(non-empty)` or `None`; an empty string never
/// stands in for absence. `website` is the one non-optional string and
/// defaults to empty when unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: String,
    pub contact: ContactInfo,
    #[serde(rename = "socialMedia")]
    pub social_media: SocialMedia,
    #[serde(rename = "registrationNumber")]
    pub registration_number: Option<String>,
    /// Stamped at the moment extraction completes, never mutated afterward.
    #[serde(rename = "extractedAt")]
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialMedia {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

impl BusinessProfile {
    /// An all-absent profile for `website`, stamped `extracted_at` now.
    #[must_use]
    pub fn empty(website: impl Into<String>, extracted_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            description: None,
            website: website.into(),
            contact: ContactInfo::default(),
            social_media: SocialMedia::default(),
            registration_number: None,
            extracted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_with_wire_casing() {
        let profile = BusinessProfile::empty("https://acme.com", Utc::now());
        let json = serde_json::to_value(&profile).expect("serialize profile");
        assert!(json.get("socialMedia").is_some());
        assert!(json.get("registrationNumber").is_some());
        assert!(json.get("extractedAt").is_some());
        assert_eq!(json["website"], "https://acme.com");
    }

    #[test]
    fn empty_profile_has_all_optionals_absent() {
        let profile = BusinessProfile::empty("", Utc::now());
        assert!(profile.name.is_none());
        assert!(profile.contact.email.is_none());
        assert!(profile.social_media.youtube.is_none());
        assert!(profile.registration_number.is_none());
    }
}
