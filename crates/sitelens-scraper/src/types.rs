use chrono::Utc;
use sitelens_core::{BusinessProfile, ContactInfo, SocialMedia};

/// Intermediate output of the heuristic extractor. Transient: produced and
/// consumed within one extraction attempt, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Tag-stripped body text, truncated to 5000 characters.
    pub text: String,
    pub social_links: SocialLinks,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

impl PageMetadata {
    /// Maps the heuristic fields onto the canonical record shape, stamping
    /// `extracted_at` now. Empty strings become absence; the page never
    /// yields a registration number.
    #[must_use]
    pub fn into_profile(self, url: &str) -> BusinessProfile {
        let non_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };

        BusinessProfile {
            name: non_empty(self.title),
            description: non_empty(self.description),
            website: url.to_owned(),
            contact: ContactInfo {
                email: self.email,
                phone: self.phone,
            },
            social_media: SocialMedia {
                linkedin: self.social_links.linkedin,
                twitter: self.social_links.twitter,
                facebook: self.social_links.facebook,
                instagram: self.social_links.instagram,
                youtube: self.social_links.youtube,
            },
            registration_number: None,
            extracted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_profile_maps_title_to_name_and_drops_empties() {
        let metadata = PageMetadata {
            title: "Acme Corp".to_owned(),
            description: String::new(),
            text: "irrelevant".to_owned(),
            social_links: SocialLinks {
                twitter: Some("https://twitter.com/acme".to_owned()),
                ..SocialLinks::default()
            },
            email: Some("hello@acme.com".to_owned()),
            phone: None,
        };

        let profile = metadata.into_profile("https://acme.com");
        assert_eq!(profile.name.as_deref(), Some("Acme Corp"));
        assert!(profile.description.is_none());
        assert_eq!(profile.website, "https://acme.com");
        assert_eq!(
            profile.social_media.twitter.as_deref(),
            Some("https://twitter.com/acme")
        );
        assert!(profile.registration_number.is_none());
    }
}
