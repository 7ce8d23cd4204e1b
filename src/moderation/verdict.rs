// Verdict construction — mapping raw category scores to a flag decision.
//
// A verdict is built from provider scores by comparing each category against
// its fixed threshold. Scoring failures fail CLOSED: if we can't check the
// content, it is flagged as problematic rather than waved through.

use serde::Serialize;
use tracing::error;

use super::categories::{humanize, Category};
use super::traits::{CategoryScores, ContentScorer};

/// One category's scored outcome inside a verdict.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    /// Attribute name ("TOXICITY", "SEVERE_TOXICITY", ...).
    pub name: String,
    pub score: f64,
    pub threshold: f64,
    /// True when `score >= threshold`.
    pub exceeded: bool,
}

/// The structured outcome of content moderation scoring.
#[derive(Debug, Clone, Serialize)]
pub struct ModerationVerdict {
    pub is_problematic: bool,
    /// Per-category scores, in the fixed category order.
    pub categories: Vec<CategoryScore>,
    /// Aggregate score: the maximum across all categories.
    pub score: f64,
    pub message: String,
}

impl ModerationVerdict {
    /// Verdict for empty or whitespace-only input. No remote call is made
    /// for such content.
    pub fn empty_content() -> Self {
        Self {
            is_problematic: false,
            categories: Vec::new(),
            score: 0.0,
            message: "Empty content".to_string(),
        }
    }

    /// Fail-closed verdict used when the scoring call fails.
    pub fn fail_safe() -> Self {
        Self {
            is_problematic: true,
            categories: Vec::new(),
            score: 1.0,
            message: "Error checking content. To be safe, content is flagged as potentially problematic."
                .to_string(),
        }
    }

    /// Build a verdict from raw provider scores.
    ///
    /// Every category appears in the result; categories the provider didn't
    /// score default to 0. The aggregate score is the maximum across all
    /// categories, and the content is problematic iff at least one category
    /// meets or exceeds its threshold.
    pub fn from_scores(scores: &CategoryScores) -> Self {
        let mut categories = Vec::with_capacity(Category::ALL.len());
        let mut highest: f64 = 0.0;

        for category in Category::ALL {
            let score = scores.get(category).unwrap_or(0.0);
            highest = highest.max(score);
            let threshold = category.threshold();
            categories.push(CategoryScore {
                name: category.as_str().to_string(),
                score,
                threshold,
                exceeded: score >= threshold,
            });
        }

        let flagged: Vec<&CategoryScore> = categories.iter().filter(|c| c.exceeded).collect();
        let is_problematic = !flagged.is_empty();

        let message = if is_problematic {
            let names: Vec<String> = flagged.iter().map(|c| humanize(&c.name)).collect();
            format!("Content flagged for: {}", names.join(", "))
        } else {
            "Content appears safe".to_string()
        };

        Self {
            is_problematic,
            categories,
            score: highest,
            message,
        }
    }

    /// The categories whose scores met or exceeded their thresholds.
    pub fn exceeded_categories(&self) -> impl Iterator<Item = &CategoryScore> {
        self.categories.iter().filter(|c| c.exceeded)
    }
}

/// Check text content against the moderation categories.
///
/// Never errors: empty content short-circuits to a safe verdict without a
/// remote call, and any scorer failure is logged and converted to the
/// fail-closed verdict.
pub async fn check_content(scorer: &dyn ContentScorer, text: &str) -> ModerationVerdict {
    if text.trim().is_empty() {
        return ModerationVerdict::empty_content();
    }

    match scorer.score(text).await {
        Ok(scores) => ModerationVerdict::from_scores(&scores),
        Err(err) => {
            error!(error = %err, "Content check failed; flagging content as problematic");
            ModerationVerdict::fail_safe()
        }
    }
}
