use serde::{Deserialize, Serialize};

/// Category assigned when a link is saved without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Pseudo-category that matches every link when browsing.
pub const ALL_CATEGORIES: &str = "All";

/// A saved dashboard link.
///
/// Serialized with the camelCase keys used by the backup envelope and the
/// persisted `nebula_links` record. Optional fields are omitted when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL or emoji shown next to the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

/// User-supplied fields for adding or editing a link.
///
/// Every field is optional so the same draft type serves both "add" (where
/// title and url are required) and "edit" (where missing fields keep their
/// current value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl LinkDraft {
    pub fn new(title: &str, url: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// Seed links shown on a fresh install, before anything has been saved.
pub fn default_links() -> Vec<Link> {
    let now = chrono::Utc::now().timestamp_millis();
    let seed = [
        ("1", "Google", "https://google.com", "Search", "The world's most popular search engine."),
        ("2", "GitHub", "https://github.com", "Dev", "Where the world builds software."),
        ("3", "YouTube", "https://youtube.com", "Media", "Broadcast yourself."),
        ("4", "ChatGPT", "https://chat.openai.com", "AI", "AI conversation partner."),
    ];
    seed.iter()
        .map(|(id, title, url, category, description)| Link {
            id: id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            category: category.to_string(),
            description: Some(description.to_string()),
            icon: None,
            created_at: now,
        })
        .collect()
}
