//! Skillmatch Skills
//!
//! Loads Markdown skill documents (YAML front-matter + body) from directory
//! trees into a [`SkillRegistry`], and ranks them against free-text context
//! with a lexical [`Matcher`].
//!
//! ## Skill document format
//!
//! ```text
//! ---
//! name: debug:react
//! description: Hydration mismatch, unexpected re-render loops, stale closures.
//! ---
//!
//! # Debugging React
//! ...
//! ```
//!
//! The identifier prefix (`debug:`, `refactor:`) determines the skill's
//! category.
//!
//! ## Lifecycle
//!
//! A [`SkillRegistry`] is read-only once loaded. Hosts that need to reload
//! or drop skills at runtime hold a [`SkillCatalog`].

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod catalog;
pub mod document;
pub mod error;
pub mod matcher;
pub mod registry;

pub use catalog::SkillCatalog;
pub use document::{parse_skill_document, read_skill_file};
pub use error::{Result, SkillError};
pub use matcher::Matcher;
pub use registry::{check_root, LoadOptions, SkillRegistry};
pub use skillmatch_types::{Category, Skill, SkillMatch, SkillMetadata, SkillSummary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Matcher, SkillCatalog, SkillError, SkillRegistry};
}
