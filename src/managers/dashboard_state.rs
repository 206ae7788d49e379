//! In-memory application state for Nebula Nav.
//!
//! `DashboardState` is the single source of truth the UI renders from. It
//! carries a generation counter that every local mutation bumps, so a
//! background pull that started before the mutation can tell its result is
//! stale.

use std::sync::{Arc, Mutex};

use crate::managers::link_manager::{LinkManager, LinkManagerTrait};
use crate::types::link::Link;
use crate::types::site::SiteConfig;

/// State shared between the request path and detached sync tasks.
pub type SharedState = Arc<Mutex<DashboardState>>;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    links: LinkManager,
    site_config: SiteConfig,
    generation: u64,
}

impl DashboardState {
    pub fn new(links: Vec<Link>, site_config: SiteConfig) -> Self {
        Self {
            links: LinkManager::new(links),
            site_config,
            generation: 0,
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }

    pub fn links(&self) -> &LinkManager {
        &self.links
    }

    /// Applies a local edit to the link collection.
    ///
    /// The generation only moves when the edit succeeds; a rejected edit must
    /// not invalidate a pull that is still in flight.
    pub fn edit_links<T, E>(
        &mut self,
        edit: impl FnOnce(&mut LinkManager) -> Result<T, E>,
    ) -> Result<T, E> {
        let value = edit(&mut self.links)?;
        self.generation += 1;
        Ok(value)
    }

    pub fn site_config(&self) -> &SiteConfig {
        &self.site_config
    }

    /// Replaces the site config as a local edit. Bumps the generation.
    pub fn set_site_config(&mut self, config: SiteConfig) {
        self.generation += 1;
        self.site_config = config;
    }

    /// Records a local edit that lives outside this struct (e.g. a password change).
    pub fn touch(&mut self) {
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Overwrites links and site config wholesale, leaving the generation alone.
    ///
    /// Used when remote data wins; local edits made afterwards still bump.
    pub fn replace(&mut self, links: Vec<Link>, site_config: SiteConfig) {
        self.links.replace_all(links);
        self.site_config = site_config;
    }

    /// Owned copy of the collection and config, for building a snapshot.
    pub fn snapshot(&self) -> (Vec<Link>, SiteConfig) {
        (self.links.list_links().to_vec(), self.site_config.clone())
    }
}
