//! Skillmatch Types - Core types shared by the skills library and the CLI
//!
//! This module defines the skill data model: the parsed front-matter, the
//! loaded skill record, and the borrowed views handed out by the registry
//! and the matcher.

pub mod category;
pub mod skill;

pub use category::{Category, ParseCategoryError};
pub use skill::{Skill, SkillMatch, SkillMetadata, SkillSummary};
