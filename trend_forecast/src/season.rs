//! Season ordering registry
//!
//! Season labels such as `Fall24` or `Spring25` do not sort
//! chronologically as strings, so every component orders and groups
//! seasons by the 1-based rank assigned here.

use crate::error::{Result, TrendError};
use regex::Regex;

/// Canonical chronological list of season labels
#[derive(Debug, Clone)]
pub struct SeasonRegistry {
    /// Labels in chronological order
    labels: Vec<String>,
    /// Matches any label embedded in an identifier
    token_pattern: Regex,
}

impl SeasonRegistry {
    /// Create a registry from labels listed in chronological order
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_string())
            .collect();

        if labels.is_empty() {
            return Err(TrendError::InvalidConfig(
                "Season registry needs at least one season".to_string(),
            ));
        }

        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(TrendError::InvalidConfig(format!(
                    "Season at position {} is empty",
                    i + 1
                )));
            }
            if labels[..i].iter().any(|l| l.eq_ignore_ascii_case(label)) {
                return Err(TrendError::InvalidConfig(format!(
                    "Season '{}' is listed more than once",
                    label
                )));
            }
        }

        // Longer tokens first so "Fall2024" wins over "Fall24"
        let mut tokens: Vec<&String> = labels.iter().collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let token_pattern = Regex::new(&format!(
            r"(?i)(?:^|[^a-z0-9])({})(?:[^a-z0-9]|$)",
            alternation
        ))
        .map_err(|e| TrendError::InvalidConfig(format!("Invalid season pattern: {}", e)))?;

        Ok(Self {
            labels,
            token_pattern,
        })
    }

    /// 1-based chronological rank of a canonical season label
    pub fn rank(&self, season: &str) -> Result<usize> {
        self.labels
            .iter()
            .position(|label| label == season)
            .map(|idx| idx + 1)
            .ok_or_else(|| TrendError::UnknownSeason(season.to_string()))
    }

    /// Resolve a label case-insensitively to its canonical spelling
    pub fn canonicalize(&self, label: &str) -> Result<&str> {
        let label = label.trim();
        self.labels
            .iter()
            .find(|known| known.eq_ignore_ascii_case(label))
            .map(String::as_str)
            .ok_or_else(|| TrendError::UnknownSeason(label.to_string()))
    }

    /// Find the season token embedded in an identifier such as
    /// `runway/Fall25/designer/look_01.jpg`. The leftmost token wins.
    pub fn resolve_identifier(&self, identifier: &str) -> Result<&str> {
        let token = self
            .token_pattern
            .captures(identifier)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| TrendError::UnknownSeason(identifier.to_string()))?;

        self.canonicalize(token.as_str())
    }

    /// Label at a given rank
    pub fn label(&self, rank: usize) -> Option<&str> {
        rank.checked_sub(1)
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    /// Most recent season in the registry
    pub fn latest(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// All labels in chronological order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of seasons in the registry
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the registry holds no seasons (never true for a constructed registry)
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Consecutive `(earlier, later)` season pairs in chronological order
    pub fn consecutive_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.labels
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}
