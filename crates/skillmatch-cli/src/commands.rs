use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skillmatch_skills::{check_root, SkillCatalog, SkillRegistry};
use skillmatch_types::{Category, Skill, SkillMatch};
use std::path::PathBuf;
use tracing::{debug, info};

/// Browse and match Markdown skills
#[derive(Debug, Parser)]
#[command(name = "skillmatch", version, about)]
pub struct Cli {
    /// Skill root to load (repeatable); replaces the configured roots
    #[arg(short = 'd', long = "dir", global = true)]
    pub dirs: Vec<PathBuf>,

    /// Extra config file layered over the global and local ones
    #[arg(short, long, global = true, env = "SKILLMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List loaded skills
    List {
        /// Only show one category (debug, refactor, other)
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        json: bool,
    },
    /// Print the body of a skill
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Rank skills against free-text context
    Match {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Maximum number of results (defaults to matcher.top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print the skills section of an LLM system prompt
    Prompt,
}

/// Load the registry and execute one command
pub fn run(cli: Cli, config: &Config) -> Result<()> {
    // Configured roots may be absent; roots named on the command line may not
    let roots = if cli.dirs.is_empty() {
        config.skill_roots()
    } else {
        for dir in &cli.dirs {
            check_root(dir)?;
        }
        cli.dirs.clone()
    };
    debug!("Skill roots: {:?}", roots);

    let catalog = SkillCatalog::new(config.load_options());
    let registry = catalog
        .load(&roots)
        .context("Failed to load skills")?;
    info!("Loaded {} skills", registry.len());

    let output = match cli.command {
        Command::List { category, json } => render_list(&registry, category, json)?,
        Command::Show { id, json } => {
            let skill = registry.get(&id)?;
            if json {
                serde_json::to_string_pretty(skill)?
            } else {
                render_skill(skill)
            }
        }
        Command::Match { query, top_k, json } => {
            let query = query.join(" ");
            let matches = registry.match_skills(&query, top_k.unwrap_or(config.matcher.top_k));
            render_matches(&matches, json)?
        }
        Command::Prompt => registry.generate_system_prompt().trim().to_string(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn render_list(registry: &SkillRegistry, category: Option<Category>, json: bool) -> Result<String> {
    let summaries: Vec<_> = registry
        .list()
        .filter(|s| category.is_none_or(|c| s.category == c))
        .collect();

    if json {
        return Ok(serde_json::to_string_pretty(&summaries)?);
    }

    if summaries.is_empty() {
        return Ok("No skills found".to_string());
    }

    let mut out = format!("Available skills ({}):\n", summaries.len());
    for s in summaries {
        out.push_str(&format!("\n  {} [{}]\n    {}\n", s.id, s.category, s.description));
    }
    Ok(out.trim_end().to_string())
}

fn render_skill(skill: &Skill) -> String {
    let mut out = format!("{} [{}]\n", skill.id, skill.category);
    if let Some(version) = &skill.version {
        out.push_str(&format!("Version: {version}\n"));
    }
    if !skill.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", skill.tags.join(", ")));
    }
    out.push_str(&format!("File: {}\n\n{}", skill.path.display(), skill.body));
    out
}

fn render_matches(matches: &[SkillMatch], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(matches)?);
    }

    if matches.is_empty() {
        return Ok("No matching skills".to_string());
    }

    Ok(matches
        .iter()
        .map(|m| format!("{:>6.2}  {}", m.score, m.id))
        .collect::<Vec<_>>()
        .join("\n"))
}
