use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the category prefix and the rest of an identifier
pub const ID_SEPARATOR: char = ':';

/// Skill category, derived from the identifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `debug:*` skills
    Debug,
    /// `refactor:*` skills
    Refactor,
    /// Anything without a recognised prefix
    Other,
}

impl Category {
    /// Derive the category from an identifier such as `debug:react`.
    pub fn from_id(id: &str) -> Self {
        match id.split_once(ID_SEPARATOR) {
            Some((prefix, _)) => prefix.parse().unwrap_or(Category::Other),
            None => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Debug => "debug",
            Category::Refactor => "refactor",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown skill category '{0}' (expected debug, refactor or other)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Category::Debug),
            "refactor" => Ok(Category::Refactor),
            "other" => Ok(Category::Other),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}
