//! Skill document parsing
//!
//! Each skill is a Markdown file that starts with YAML front-matter:
//!
//! ```text
//! ---
//! name: debug:react
//! description: Hydration mismatch, unexpected re-render, stale state.
//! ---
//!
//! # Debugging React
//! ...
//! ```

use crate::error::{Result, SkillError};
use regex::Regex;
use skillmatch_types::{Skill, SkillMetadata};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

/// Names longer than this are logged, not rejected
const MAX_NAME_LENGTH: usize = 64;
/// Descriptions longer than this are logged, not rejected
const MAX_DESCRIPTION_LENGTH: usize = 1024;

const FRONT_MATTER_PATTERN: &str = r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n(.*))?\z";
const IDENTIFIER_PATTERN: &str = r"^[a-z0-9][a-z0-9._-]*(:[a-z0-9][a-z0-9._-]*)*$";

static FRONT_MATTER_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(FRONT_MATTER_PATTERN));
static IDENTIFIER_RE: LazyLock<std::result::Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN));

fn compiled<'r>(re: &'r std::result::Result<Regex, regex::Error>, path: &Path) -> Result<&'r Regex> {
    re.as_ref()
        .map_err(|e| SkillError::malformed(path, format!("failed to compile regex: {e}")))
}

/// Read and parse a skill document from disk
pub fn read_skill_file(path: &Path) -> Result<Skill> {
    let content = fs::read_to_string(path).map_err(|source| SkillError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_skill_document(&content, path)
}

/// Parse a skill document. `path` is recorded on the skill and used in errors.
pub fn parse_skill_document(content: &str, path: &Path) -> Result<Skill> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (yaml, body) = split_front_matter(content, path)?;

    let metadata: SkillMetadata = serde_yaml::from_str(yaml)
        .map_err(|e| SkillError::malformed(path, format!("invalid YAML front-matter: {e}")))?;

    let (id, description) = validate_metadata(&metadata, path)?;

    let body = body.trim();
    if body.is_empty() {
        return Err(SkillError::malformed(path, format!("skill '{id}' has an empty body")));
    }

    Ok(Skill::new(id, description, body, path)
        .with_version(metadata.version)
        .with_tags(metadata.tags))
}

/// Split a document into its YAML front-matter and Markdown body
fn split_front_matter<'a>(content: &'a str, path: &Path) -> Result<(&'a str, &'a str)> {
    let captures = compiled(&FRONT_MATTER_RE, path)?
        .captures(content)
        .ok_or_else(|| SkillError::malformed(path, "no valid YAML front-matter found"))?;

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    Ok((yaml, body))
}

/// Check required fields and the identifier format, returning `(id, description)`
fn validate_metadata(metadata: &SkillMetadata, path: &Path) -> Result<(String, String)> {
    let name = required_field(metadata.name.as_deref(), "name", path)?;
    let description = required_field(metadata.description.as_deref(), "description", path)?;

    if name.len() > MAX_NAME_LENGTH {
        warn!(
            "Skill name '{}' exceeds {} characters (was {})",
            name,
            MAX_NAME_LENGTH,
            name.len()
        );
    }

    if !compiled(&IDENTIFIER_RE, path)?.is_match(name) {
        return Err(SkillError::malformed(
            path,
            format!(
                "skill name '{name}' must be lowercase letters, digits, '-', '_' or '.', \
                 in ':'-separated segments"
            ),
        ));
    }

    if description.len() > MAX_DESCRIPTION_LENGTH {
        warn!(
            "Skill '{}' description exceeds {} characters (was {})",
            name,
            MAX_DESCRIPTION_LENGTH,
            description.len()
        );
    }

    Ok((name.to_string(), description.to_string()))
}

fn required_field<'a>(value: Option<&'a str>, field: &str, path: &Path) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SkillError::malformed(
            path,
            format!("missing required front-matter field '{field}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use skillmatch_types::Category;

    fn parse(content: &str) -> Result<Skill> {
        parse_skill_document(content, Path::new("/skills/test.md"))
    }

    fn reason(err: SkillError) -> String {
        match err {
            SkillError::MalformedSkill { reason, .. } => reason,
            other => panic!("expected MalformedSkill, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_skill_document() {
        let content = r#"---
name: debug:react
description: Hydration mismatch, unexpected re-render loops, stale closures.
version: "1.2"
tags: [frontend, react]
---

# Debugging React

Check the server and client render output first.
"#;

        let skill = parse(content).unwrap();
        assert_eq!(skill.id, "debug:react");
        assert_eq!(
            skill.description,
            "Hydration mismatch, unexpected re-render loops, stale closures."
        );
        assert_eq!(skill.category, Category::Debug);
        assert_eq!(skill.version.as_deref(), Some("1.2"));
        assert_eq!(skill.tags, vec!["frontend", "react"]);
        assert!(skill.body.starts_with("# Debugging React"));
        assert_eq!(skill.path(), Path::new("/skills/test.md"));
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\nname: refactor:vue\r\ndescription: Options to Composition API\r\n---\r\nUse setup().\r\n";
        let skill = parse(content).unwrap();
        assert_eq!(skill.id, "refactor:vue");
        assert_eq!(skill.body, "Use setup().");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = "---\nname: debug:k8s\ndescription: Pods stuck\nallowed-tools: [Bash]\n---\nkubectl describe pod";
        assert_eq!(parse(content).unwrap().id, "debug:k8s");
    }

    #[test]
    fn test_missing_front_matter() {
        let err = parse("# Just markdown\n").unwrap_err();
        assert!(reason(err).contains("front-matter"));
    }

    #[test]
    fn test_unclosed_front_matter() {
        let err = parse("---\nname: debug:x\ndescription: y\n\nbody").unwrap_err();
        assert!(matches!(err, SkillError::MalformedSkill { .. }));
    }

    #[test]
    fn test_missing_description() {
        let err = parse("---\nname: debug:go\n---\nbody").unwrap_err();
        assert!(reason(err).contains("'description'"));
    }

    #[test]
    fn test_blank_name() {
        let err = parse("---\nname: \"  \"\ndescription: d\n---\nbody").unwrap_err();
        assert!(reason(err).contains("'name'"));
    }

    #[test]
    fn test_invalid_identifier() {
        let err = parse("---\nname: Debug React\ndescription: d\n---\nbody").unwrap_err();
        assert!(reason(err).contains("Debug React"));
    }

    #[test]
    fn test_empty_body() {
        let err = parse("---\nname: debug:go\ndescription: d\n---\n\n   \n").unwrap_err();
        assert!(reason(err).contains("empty body"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse("---\nname: [unclosed\ndescription: d\n---\nbody").unwrap_err();
        assert!(reason(err).contains("invalid YAML"));
    }

    #[test]
    fn test_patterns_compile() {
        assert!(FRONT_MATTER_RE.is_ok());
        assert!(IDENTIFIER_RE.is_ok());
        // The shared statics serve repeated parses
        for _ in 0..3 {
            assert!(parse("---\nname: debug:go\ndescription: d\n---\nbody").is_ok());
        }
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_skill_file(Path::new("/nonexistent/skill.md")).unwrap_err();
        assert!(matches!(err, SkillError::Io { .. }));
    }
}
