//! Skills registry for loading and looking up skills
//!
//! Walks one or more directory trees, parses every skill document and
//! indexes it by identifier. Loading is fail-fast: a single malformed or
//! duplicate document aborts the whole load.

use crate::document::read_skill_file;
use crate::error::{Result, SkillError};
use crate::matcher::Matcher;
use skillmatch_types::{Category, Skill, SkillMatch, SkillSummary};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Which files under a root count as skill documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// File extensions treated as skill documents (case-insensitive)
    pub extensions: Vec<String>,
    /// File names never treated as skill documents (case-insensitive)
    pub ignore: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
            ignore: vec!["README.md".to_string()],
        }
    }
}

impl LoadOptions {
    fn is_skill_document(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(OsStr::to_str) else {
            return false;
        };

        if self.ignore.iter().any(|i| i.eq_ignore_ascii_case(file_name)) {
            return false;
        }

        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Registry holding every loaded skill, read-only once built
#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    /// Skills in load order
    skills: Vec<Skill>,
    /// Identifier -> position in `skills`
    index: HashMap<String, usize>,
}

impl SkillRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Personal skills directory: ~/.skillmatch/skills/
    #[must_use]
    pub fn personal_skills_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skillmatch").join("skills"))
    }

    /// Project skills directory: ./.skillmatch/skills/
    #[must_use]
    pub fn project_skills_dir() -> PathBuf {
        PathBuf::from(".skillmatch/skills")
    }

    /// Load every skill under `root` with default options
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(root, &LoadOptions::default())
    }

    /// Load every skill under `root`. A missing root or a root that is not
    /// a directory is an error.
    pub fn load_with(root: impl AsRef<Path>, options: &LoadOptions) -> Result<Self> {
        let root = root.as_ref();
        check_root(root)?;

        let mut registry = Self::new();
        registry.scan_directory(root, options)?;

        info!("Loaded {} skills from {:?}", registry.len(), root);
        Ok(registry)
    }

    /// Load skills from several roots into one registry.
    ///
    /// Roots that do not exist are skipped; identifiers must still be unique
    /// across all of them.
    pub fn load_all<I, P>(roots: I, options: &LoadOptions) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut registry = Self::new();
        let mut scanned = 0usize;

        for root in roots {
            let root = root.as_ref();

            if !root.exists() {
                debug!("Skills directory does not exist: {:?}", root);
                continue;
            }

            if !root.is_dir() {
                warn!("Skills path is not a directory: {:?}", root);
                continue;
            }

            registry.scan_directory(root, options)?;
            scanned += 1;
        }

        info!(
            "Loaded {} skills from {} directories",
            registry.len(),
            scanned
        );
        Ok(registry)
    }

    /// Build a registry from already-parsed skills
    pub fn from_skills(skills: impl IntoIterator<Item = Skill>) -> Result<Self> {
        let mut registry = Self::new();
        for skill in skills {
            registry.insert(skill)?;
        }
        Ok(registry)
    }

    /// Walk a tree in file-name order and insert every skill document found.
    /// Symlinks are followed; a symlink loop is reported as `SkillError::Io`.
    fn scan_directory(&mut self, root: &Path, options: &LoadOptions) -> Result<()> {
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop"));
                SkillError::Io { path, source }
            })?;

            if !entry.file_type().is_file() || !options.is_skill_document(entry.path()) {
                continue;
            }

            let skill = read_skill_file(entry.path())?;
            debug!("Discovered skill: {} at {:?}", skill.id, entry.path());
            self.insert(skill)?;
        }

        Ok(())
    }

    fn insert(&mut self, skill: Skill) -> Result<()> {
        if let Some(&existing) = self.index.get(&skill.id) {
            return Err(SkillError::DuplicateSkill {
                id: skill.id,
                first: self.skills[existing].path.clone(),
                second: skill.path,
            });
        }

        self.index.insert(skill.id.clone(), self.skills.len());
        self.skills.push(skill);
        Ok(())
    }

    /// Get a skill by identifier
    pub fn get(&self, id: &str) -> Result<&Skill> {
        self.index
            .get(id)
            .map(|&i| &self.skills[i])
            .ok_or_else(|| SkillError::NotFound { id: id.to_string() })
    }

    /// Get the Markdown body of a skill
    pub fn body(&self, id: &str) -> Result<&str> {
        self.get(id).map(|s| s.body.as_str())
    }

    /// Check whether a skill is loaded
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Identifiers and descriptions of all skills, in load order.
    ///
    /// Each call starts a fresh pass over the registry.
    pub fn list(&self) -> impl Iterator<Item = SkillSummary<'_>> + '_ {
        self.skills.iter().map(Skill::summary)
    }

    /// All loaded skills, in load order
    pub fn skills(&self) -> impl Iterator<Item = &Skill> + '_ {
        self.skills.iter()
    }

    /// Skills of one category, in load order
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Skill> + '_ {
        self.skills.iter().filter(move |s| s.category == category)
    }

    /// Get number of skills
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Rank skills against free-text context, best first
    #[must_use]
    pub fn match_skills(&self, query: &str, top_k: usize) -> Vec<SkillMatch> {
        Matcher::new(self).match_skills(query, top_k)
    }

    /// Generate skills list for LLM system prompt
    /// Format:
    /// Available skills:
    /// - debug:react: Description of when the skill applies
    /// - refactor:vue: Another description...
    #[must_use]
    pub fn generate_system_prompt(&self) -> String {
        if self.skills.is_empty() {
            return String::new();
        }

        let mut prompt = String::from("\n\nAvailable skills:\n");

        for skill in self.sorted() {
            prompt.push_str(&skill.to_summary_line());
            prompt.push('\n');
        }

        prompt
    }

    /// Generate a concise, comma-separated skills list
    #[must_use]
    pub fn generate_skills_list(&self) -> String {
        if self.skills.is_empty() {
            return "No skills available".to_string();
        }

        self.sorted()
            .iter()
            .map(|s| format!("{}: {}", s.id, s.description))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn sorted(&self) -> Vec<&Skill> {
        let mut sorted: Vec<_> = self.skills.iter().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        sorted
    }
}

/// Fail unless `root` exists and is a directory
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(SkillError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    if !root.is_dir() {
        return Err(SkillError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
