// Content scorer trait — the swap-ready abstraction.
//
// This trait defines the interface for remote toxicity scoring. The
// production implementation uses Google's Perspective API; tests substitute
// a canned scorer. Verdict construction lives above the seam so a provider
// only has to return raw per-category scores.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use super::categories::Category;

/// Raw per-category summary scores from a scoring provider.
///
/// Providers omit categories they have no score for; verdict construction
/// defaults absent categories to 0.
#[derive(Debug, Clone, Default)]
pub struct CategoryScores {
    scores: HashMap<Category, f64>,
}

impl CategoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score (0.0 to 1.0) for a category.
    pub fn set(&mut self, category: Category, score: f64) {
        self.scores.insert(category, score);
    }

    /// The recorded score for a category, if the provider returned one.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.scores.get(&category).copied()
    }
}

impl FromIterator<(Category, f64)> for CategoryScores {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Trait for scoring text against the moderation categories. Implementations
/// are async because providers require HTTP API calls.
#[async_trait]
pub trait ContentScorer: Send + Sync {
    /// Score a single text, returning whatever category scores the provider
    /// produced. Errors here are converted to a fail-closed verdict by the
    /// caller, never surfaced past `check_content`.
    async fn score(&self, text: &str) -> Result<CategoryScores>;
}
