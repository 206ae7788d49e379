use serde::{Deserialize, Serialize};

/// Dashboard-wide branding. Always replaced as a whole, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub logo_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Nebula Nav".to_string(),
            logo_url: String::new(),
        }
    }
}
