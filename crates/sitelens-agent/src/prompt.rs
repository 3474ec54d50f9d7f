//! Task prompt sent to the external extraction service.

/// Builds the research-agent prompt for one target URL.
///
/// The prompt pins the exact JSON shape the structured-data extractor
/// expects and tells the service to use its own web-browsing capability.
/// Whether the service actually visited the page is not verified; only the
/// shape of what comes back is.
#[must_use]
pub fn build_prompt(url: &str) -> String {
    format!(
        r#"You are a web research agent. Analyze this website and extract structured business information.

Website URL: {url}

Extract and respond with ONLY a valid JSON object (no markdown, no code blocks, no additional text) in this exact format:
{{
  "name": "company name",
  "description": "brief description",
  "website": "url",
  "contact": {{
    "email": "email or null",
    "phone": "phone or null"
  }},
  "socialMedia": {{
    "linkedin": "url or null",
    "twitter": "url or null",
    "facebook": "url or null",
    "instagram": "url or null",
    "youtube": "url or null"
  }},
  "registrationNumber": "registration number or null"
}}

Task:
1. Use web_search tool to visit and analyze the website
2. Extract company name, description, contact info
3. Find all social media profiles (LinkedIn, Twitter, Facebook, Instagram, YouTube)
4. Look for business registration number if available
5. Return ONLY the JSON object with all extracted information"#
    )
}
