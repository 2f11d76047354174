use serde::Deserialize;
use skillmatch_logging::LogFormat;
use skillmatch_skills::{LoadOptions, SkillRegistry};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[skills]
directories = []          # Extra skill roots; SKILLMATCH_SKILLS_DIR adds one more
extensions = ["md"]
ignore = ["README.md"]
personal = true           # ~/.skillmatch/skills
project = true            # ./.skillmatch/skills

[matcher]
top_k = 3

[logging]
level = "warn"  # trace, debug, info, warn, error
format = "text" # text or json
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SkillsConfig {
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    #[serde(default = "default_true")]
    pub personal: bool,
    #[serde(default = "default_true")]
    pub project: bool,
}

fn default_extensions() -> Vec<String> {
    LoadOptions::default().extensions
}

fn default_ignore() -> Vec<String> {
    LoadOptions::default().ignore
}

fn default_true() -> bool {
    true
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            extensions: default_extensions(),
            ignore: default_ignore(),
            personal: true,
            project: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MatcherConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.skillmatch/skillmatch.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skillmatch").join("skillmatch.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<Option<PathBuf>> {
        let Some(config_path) = Self::global_config_path() else {
            return Ok(None);
        };

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(Some(config_path))
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.skillmatch/skillmatch.toml (auto-created if missing)
    /// 2. Local override: ./skillmatch.toml (workspace, optional)
    /// 3. Explicit `--config` file (optional)
    /// 4. Environment variables (highest priority)
    pub fn load(extra: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut config_builder = config::Config::builder();

        // Layer 1: Global config
        if let Some(global_config_path) = Self::ensure_global_config()? {
            config_builder = config_builder.add_source(config::File::from(global_config_path));
        }

        // Layer 2: Local workspace config (optional override)
        config_builder =
            config_builder.add_source(config::File::with_name("skillmatch").required(false));

        // Layer 3: Explicit config file (must exist when given)
        if let Some(path) = extra {
            config_builder = config_builder.add_source(config::File::from(path));
        }

        // Layer 4: Environment variables with SKILLMATCH__ prefix
        config_builder = config_builder.add_source(environment());

        // Layer 5: Apply convenience env var overrides (highest priority)
        if let Ok(level) = env::var("SKILLMATCH_LOG") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        let mut config: Self = config_builder.build()?.try_deserialize()?;

        if let Ok(dir) = env::var("SKILLMATCH_SKILLS_DIR") {
            if !dir.is_empty() {
                config.skills.directories.push(dir);
            }
        }

        Ok(config)
    }

    /// Which files count as skill documents
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            extensions: self.skills.extensions.clone(),
            ignore: self.skills.ignore.clone(),
        }
    }

    /// Skill roots in load order: personal, project, then configured directories
    pub fn skill_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::new();

        if self.skills.personal {
            if let Some(dir) = SkillRegistry::personal_skills_dir() {
                roots.push(dir);
            }
        }

        if self.skills.project {
            roots.push(SkillRegistry::project_skills_dir());
        }

        roots.extend(self.skills.directories.iter().map(|d| expand_tilde(d)));
        roots
    }
}

/// `SKILLMATCH__SECTION__KEY` variables; list keys take comma-separated values,
/// e.g. `SKILLMATCH__SKILLS__DIRECTORIES=/srv/skills,~/team-skills`
fn environment() -> config::Environment {
    config::Environment::with_prefix("SKILLMATCH")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("skills.directories")
        .with_list_parse_key("skills.extensions")
        .with_list_parse_key("skills.ignore")
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}
