//! Process-wide holder for the loaded registry
//!
//! The catalog is owned by the caller and passed where it is needed; it is
//! never a `static`. Readers take an `Arc` snapshot, so a reload or unload
//! never invalidates a registry someone is still using.

use crate::error::{Result, SkillError};
use crate::registry::{LoadOptions, SkillRegistry};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Skill catalog with an explicit load / unload lifecycle
#[derive(Debug, Default)]
pub struct SkillCatalog {
    options: LoadOptions,
    current: RwLock<Option<Arc<SkillRegistry>>>,
}

impl SkillCatalog {
    /// Create an unloaded catalog
    #[must_use]
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            current: RwLock::new(None),
        }
    }

    /// Load (or reload) skills from `roots`.
    ///
    /// The new registry is built completely before it replaces the current
    /// one; on error the catalog keeps whatever it held before.
    pub fn load<I, P>(&self, roots: I) -> Result<Arc<SkillRegistry>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let registry = Arc::new(SkillRegistry::load_all(roots, &self.options)?);

        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::clone(&registry));

        if previous.is_some() {
            info!("Skill catalog reloaded ({} skills)", registry.len());
        }

        Ok(registry)
    }

    /// Drop the loaded registry. Returns whether anything was loaded.
    pub fn unload(&self) -> bool {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if previous.is_some() {
            info!("Skill catalog unloaded");
        }
        previous.is_some()
    }

    /// Check whether a registry is loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Snapshot of the loaded registry
    pub fn current(&self) -> Result<Arc<SkillRegistry>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SkillError::NotLoaded)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_catalog() {
        let catalog = SkillCatalog::default();
        assert!(!catalog.is_loaded());
        assert!(matches!(catalog.current(), Err(SkillError::NotLoaded)));
        assert!(!catalog.unload());
    }

    #[test]
    fn test_load_then_unload() {
        let catalog = SkillCatalog::default();
        let registry = catalog.load(["/nonexistent/skillmatch"]).unwrap();
        assert!(registry.is_empty());
        assert!(catalog.is_loaded());

        assert!(catalog.unload());
        assert!(!catalog.is_loaded());
        // Snapshots outlive the unload
        assert!(registry.is_empty());
    }
}
