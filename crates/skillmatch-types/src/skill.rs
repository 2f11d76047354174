use crate::Category;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Front-matter of a skill document.
///
/// `name` and `description` are optional here so that a document missing
/// them can be reported by field rather than as a generic YAML error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMetadata {
    /// Skill identifier, e.g. `debug:react`
    pub name: Option<String>,
    /// Trigger description used for matching
    pub description: Option<String>,
    /// Free-form version string. Quote it in front-matter: bare YAML numbers
    /// are accepted but go through `f64`, so `1.10` is stored as `"1.1"`.
    #[serde(default, deserialize_with = "version_string")]
    pub version: Option<String>,
    /// Display-only tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Accept a string, integer or float; floats keep only what `f64` preserves
fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Version {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Version>::deserialize(deserializer)?.map(|v| match v {
        Version::Text(s) => s,
        Version::Int(i) => i.to_string(),
        Version::Float(f) => format!("{f:?}"),
    }))
}

/// A loaded skill: identifier, trigger description and Markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub id: String,
    pub description: String,
    pub body: String,
    pub category: Category,
    pub version: Option<String>,
    pub tags: Vec<String>,
    /// File the skill was loaded from
    pub path: PathBuf,
}

impl Skill {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let id = id.into();
        Self {
            category: Category::from_id(&id),
            id,
            description: description.into(),
            body: body.into(),
            version: None,
            tags: Vec::new(),
            path: path.into(),
        }
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrowed listing view of this skill
    pub fn summary(&self) -> SkillSummary<'_> {
        SkillSummary {
            id: &self.id,
            description: &self.description,
            category: self.category,
        }
    }

    /// One-line summary for an LLM system prompt.
    /// Format: "- {id}: {description}"
    pub fn to_summary_line(&self) -> String {
        format!("- {}: {}", self.id, self.description)
    }
}

/// Identifier and description of a skill, as yielded by registry listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillSummary<'a> {
    pub id: &'a str,
    pub description: &'a str,
    pub category: Category,
}

/// A matcher hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub id: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_category() {
        let skill = Skill::new("refactor:vue", "Refactor Vue code", "body", "/tmp/vue.md");
        assert_eq!(skill.category, Category::Refactor);
        assert_eq!(skill.summary().id, "refactor:vue");
    }

    #[test]
    fn test_summary_line() {
        let skill = Skill::new("debug:react", "React issues", "body", "/tmp/react.md");
        assert_eq!(skill.to_summary_line(), "- debug:react: React issues");
    }

    #[test]
    fn test_metadata_missing_fields_deserialize_as_none() {
        let meta: SkillMetadata = serde_yaml::from_str("name: debug:go\n").unwrap();
        assert_eq!(meta.name.as_deref(), Some("debug:go"));
        assert!(meta.description.is_none());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_metadata_numeric_version() {
        let meta: SkillMetadata =
            serde_yaml::from_str("name: a\ndescription: b\nversion: 1.0\n").unwrap();
        assert_eq!(meta.version.as_deref(), Some("1.0"));

        let meta: SkillMetadata =
            serde_yaml::from_str("name: a\ndescription: b\nversion: 2\n").unwrap();
        assert_eq!(meta.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_metadata_quoted_version_kept_verbatim() {
        let meta: SkillMetadata =
            serde_yaml::from_str("name: a\ndescription: b\nversion: \"1.10\"\n").unwrap();
        assert_eq!(meta.version.as_deref(), Some("1.10"));

        // Unquoted, the trailing zero is lost to float parsing
        let meta: SkillMetadata =
            serde_yaml::from_str("name: a\ndescription: b\nversion: 1.10\n").unwrap();
        assert_eq!(meta.version.as_deref(), Some("1.1"));
    }
}
