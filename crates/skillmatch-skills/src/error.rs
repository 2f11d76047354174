//! Error types for skill loading and lookup

use std::path::PathBuf;
use thiserror::Error;

/// Skill registry errors
#[derive(Debug, Error)]
pub enum SkillError {
    /// Front-matter missing, unparsable, or lacking a required field
    #[error("Malformed skill {path:?}: {reason}")]
    MalformedSkill {
        /// Offending document
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Two documents declare the same identifier
    #[error("Duplicate skill '{id}' declared in {first:?} and {second:?}")]
    DuplicateSkill {
        /// Colliding identifier
        id: String,
        /// Document loaded first
        first: PathBuf,
        /// Document that collided
        second: PathBuf,
    },

    /// Lookup miss
    #[error("Skill '{id}' not found")]
    NotFound {
        /// Requested identifier
        id: String,
    },

    /// Root directory passed to `load` does not exist
    #[error("Skills directory {path:?} does not exist")]
    RootNotFound {
        /// Missing root
        path: PathBuf,
    },

    /// Root passed to `load` exists but is not a directory
    #[error("Skills path {path:?} is not a directory")]
    NotADirectory {
        /// Offending root
        path: PathBuf,
    },

    /// Catalog queried before `load`
    #[error("Skill catalog is not loaded")]
    NotLoaded,

    /// I/O failure while reading the tree
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl SkillError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SkillError::MalformedSkill {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, SkillError>;
