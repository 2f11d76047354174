//! Lexical matcher ranking skill descriptions against free-text context
//!
//! Scoring: one point per distinct query token found in a description, plus
//! half a point per adjacent query token pair that also appears adjacently in
//! the description. Skills scoring zero are not returned. Ties are broken by
//! identifier so results are deterministic.

use crate::registry::SkillRegistry;
use skillmatch_types::SkillMatch;
use std::collections::HashSet;

/// Bonus for each shared adjacent token pair
const BIGRAM_BONUS: f64 = 0.5;
/// Tokens shorter than this are dropped
const MIN_TOKEN_LEN: usize = 2;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
    "but", "by", "can", "do", "does", "for", "from", "has", "have", "how", "i", "if", "in",
    "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or", "our", "so", "some",
    "such", "that", "the", "their", "them", "then", "there", "these", "this", "to", "too",
    "use", "using", "was", "we", "were", "what", "when", "where", "which", "while", "why",
    "will", "with", "you", "your",
];

/// Split text into lowercase word tokens, dropping stop-words and short tokens
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

fn bigrams(tokens: &[String]) -> HashSet<(&str, &str)> {
    tokens
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect()
}

struct IndexedSkill<'a> {
    id: &'a str,
    tokens: Vec<String>,
}

/// Pre-tokenised view over a registry
pub struct Matcher<'a> {
    entries: Vec<IndexedSkill<'a>>,
}

impl<'a> Matcher<'a> {
    /// Tokenise every description in `registry`
    #[must_use]
    pub fn new(registry: &'a SkillRegistry) -> Self {
        let entries = registry
            .list()
            .map(|s| IndexedSkill {
                id: s.id,
                tokens: tokenize(s.description),
            })
            .collect();

        Self { entries }
    }

    /// Score of one description against the prepared query
    #[allow(clippy::cast_precision_loss)]
    fn score<'t>(
        query: &[String],
        query_pairs: &HashSet<(&'t str, &'t str)>,
        description: &'t [String],
    ) -> f64 {
        let words: HashSet<&str> = description.iter().map(String::as_str).collect();
        let pairs = bigrams(description);

        let word_hits = query.iter().filter(|t| words.contains(t.as_str())).count();
        let pair_hits = query_pairs.intersection(&pairs).count();

        word_hits as f64 + pair_hits as f64 * BIGRAM_BONUS
    }

    /// Return at most `top_k` skills by descending score, ties by identifier
    #[must_use]
    pub fn match_skills(&self, query: &str, top_k: usize) -> Vec<SkillMatch> {
        if top_k == 0 || self.entries.is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(query);
        let query_pairs = bigrams(&tokens);

        let mut seen = HashSet::new();
        let distinct: Vec<String> = tokens
            .iter()
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();

        if distinct.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(&str, f64)> = self
            .entries
            .iter()
            .map(|e| (e.id, Self::score(&distinct, &query_pairs, &e.tokens)))
            .filter(|(_, score)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored.truncate(top_k);

        scored
            .into_iter()
            .map(|(id, score)| SkillMatch {
                id: id.to_string(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use skillmatch_types::Skill;

    fn registry(skills: &[(&str, &str)]) -> SkillRegistry {
        SkillRegistry::from_skills(
            skills
                .iter()
                .map(|(id, d)| Skill::new(*id, *d, "body", format!("/skills/{id}.md"))),
        )
        .unwrap()
    }

    fn ids(matches: &[SkillMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Fix the Hydration-Mismatch in my component!"),
            vec!["fix", "hydration", "mismatch", "component"]
        );
    }

    #[test]
    fn test_hydration_scenario() {
        let registry = registry(&[
            (
                "debug:react",
                "Debug React issues: hydration mismatch errors, unexpected re-render loops",
            ),
            (
                "debug:vue",
                "Debug Vue reactivity problems and SSR hydration warnings",
            ),
        ]);

        let matches = registry.match_skills("hydration mismatch in my component", 1);
        assert_eq!(ids(&matches), vec!["debug:react"]);
        assert!((matches[0].score - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ties_broken_by_identifier() {
        let registry = registry(&[
            ("debug:vue", "hydration warnings"),
            ("debug:nuxt", "hydration errors"),
        ]);
        let matches = registry.match_skills("hydration", 5);
        assert_eq!(ids(&matches), vec!["debug:nuxt", "debug:vue"]);
    }

    #[test]
    fn test_zero_scores_excluded() {
        let registry = registry(&[("debug:go", "goroutine leaks"), ("debug:rust", "borrow checker")]);
        let matches = registry.match_skills("borrow checker complains", 10);
        assert_eq!(ids(&matches), vec!["debug:rust"]);
    }

    #[test]
    fn test_top_k_bounds() {
        let registry = registry(&[
            ("debug:a", "docker build"),
            ("debug:b", "docker compose"),
            ("debug:c", "docker network"),
        ]);
        assert_eq!(registry.match_skills("docker", 2).len(), 2);
        assert!(registry.match_skills("docker", 0).is_empty());
    }

    #[test]
    fn test_empty_registry_and_query() {
        let empty = SkillRegistry::new();
        assert!(empty.match_skills("anything at all", 3).is_empty());

        let registry = registry(&[("debug:a", "docker build")]);
        assert!(registry.match_skills("", 3).is_empty());
        assert!(registry.match_skills("the of and", 3).is_empty());
    }

    #[test]
    fn test_repeated_query_tokens_counted_once() {
        let registry = registry(&[("debug:a", "docker build")]);
        let matches = registry.match_skills("docker docker docker", 1);
        assert!((matches[0].score - 1.0).abs() < f64::EPSILON);
    }
}
