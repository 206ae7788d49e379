//! Link Manager for Nebula Nav.
//!
//! Implements `LinkManagerTrait`: CRUD over the in-memory link collection
//! plus the browse-side category list and search filter. Persistence is the
//! caller's concern; this type only owns the `Vec<Link>`.

use std::collections::BTreeSet;

use crate::types::errors::LinkError;
use crate::types::link::{Link, LinkDraft, ALL_CATEGORIES, DEFAULT_CATEGORY};

/// Trait defining link collection operations.
pub trait LinkManagerTrait {
    fn add_link(&mut self, draft: LinkDraft, now_ms: i64) -> Result<Link, LinkError>;
    fn update_link(&mut self, id: &str, draft: LinkDraft) -> Result<Link, LinkError>;
    fn remove_link(&mut self, id: &str) -> Result<Link, LinkError>;
    fn get_link(&self, id: &str) -> Option<&Link>;
    fn list_links(&self) -> &[Link];
    /// `"All"` followed by every distinct category, sorted.
    fn categories(&self) -> Vec<String>;
    /// Links matching a case-insensitive query on title, url or description,
    /// restricted to `category` unless it is `None` or `"All"`.
    fn filter_links(&self, query: &str, category: Option<&str>) -> Vec<Link>;
}

/// In-memory link collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkManager {
    links: Vec<Link>,
}

impl LinkManager {
    pub fn new(links: Vec<Link>) -> Self {
        Self { links }
    }

    /// Replaces the whole collection, e.g. after a restore.
    pub fn replace_all(&mut self, links: Vec<Link>) {
        self.links = links;
    }

    pub fn into_links(self) -> Vec<Link> {
        self.links
    }

    /// Time-based id, bumped past any id already in use.
    fn next_id(&self, now_ms: i64) -> String {
        let mut candidate = now_ms;
        while self.links.iter().any(|l| l.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

/// Trims a string and drops it when nothing is left.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Prefixes `https://` onto addresses typed without a scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Host part of an absolute URL, without userinfo or port.
pub fn url_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit('@').next()?;
    let host = match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    };
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Icon to display for a link: its own icon, else a favicon for its host.
pub fn icon_url(link: &Link) -> String {
    if let Some(icon) = link.icon.as_deref().filter(|i| !i.trim().is_empty()) {
        return icon.to_string();
    }
    match url_host(&link.url) {
        Some(host) => format!("https://www.google.com/s2/favicons?domain={}&sz=64", host),
        None => String::new(),
    }
}

impl LinkManagerTrait for LinkManager {
    /// Adds a link. Title and url are required; a blank category becomes `General`.
    fn add_link(&mut self, draft: LinkDraft, now_ms: i64) -> Result<Link, LinkError> {
        let title = non_blank(draft.title).ok_or(LinkError::MissingField("title"))?;
        let url = non_blank(draft.url).ok_or(LinkError::MissingField("url"))?;

        let link = Link {
            id: self.next_id(now_ms),
            title,
            url: normalize_url(&url),
            category: non_blank(draft.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: non_blank(draft.description),
            icon: non_blank(draft.icon),
            created_at: now_ms,
        };
        self.links.push(link.clone());
        Ok(link)
    }

    /// Merges the draft over an existing link. `id` and `created_at` never change.
    ///
    /// An explicitly blank description or icon clears the field. The edit is
    /// built on a copy, so a rejected draft leaves the stored link untouched.
    fn update_link(&mut self, id: &str, draft: LinkDraft) -> Result<Link, LinkError> {
        let slot = self
            .links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| LinkError::NotFound(id.to_string()))?;

        let mut edited = slot.clone();
        if let Some(title) = draft.title {
            edited.title = non_blank(Some(title)).ok_or(LinkError::MissingField("title"))?;
        }
        if let Some(url) = draft.url {
            let url = non_blank(Some(url)).ok_or(LinkError::MissingField("url"))?;
            edited.url = normalize_url(&url);
        }
        if let Some(category) = draft.category {
            edited.category = non_blank(Some(category)).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        }
        if draft.description.is_some() {
            edited.description = non_blank(draft.description);
        }
        if draft.icon.is_some() {
            edited.icon = non_blank(draft.icon);
        }

        *slot = edited.clone();
        Ok(edited)
    }

    fn remove_link(&mut self, id: &str) -> Result<Link, LinkError> {
        let pos = self
            .links
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| LinkError::NotFound(id.to_string()))?;
        Ok(self.links.remove(pos))
    }

    fn get_link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    fn list_links(&self) -> &[Link] {
        &self.links
    }

    fn categories(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self.links.iter().map(|l| l.category.as_str()).collect();
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(distinct.into_iter().map(str::to_string))
            .collect()
    }

    fn filter_links(&self, query: &str, category: Option<&str>) -> Vec<Link> {
        let needle = query.to_lowercase();
        let category = category.filter(|c| *c != ALL_CATEGORIES);

        self.links
            .iter()
            .filter(|link| {
                let matches_search = link.title.to_lowercase().contains(&needle)
                    || link.url.to_lowercase().contains(&needle)
                    || link
                        .description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false);
                let matches_category = category.map(|c| link.category == c).unwrap_or(true);
                matches_search && matches_category
            })
            .cloned()
            .collect()
    }
}
