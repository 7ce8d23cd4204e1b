// Explanation and feedback layer — turning verdicts into prose.
//
// Maps a verdict to a human-readable explanation, a can-post signal, and
// concrete revision suggestions. All lookup tables are static; unknown
// category names fall back to their humanized form so a verdict built from
// a future provider never breaks the explanation path.

use crate::moderation::categories::{humanize, Category};
use crate::moderation::traits::ContentScorer;
use crate::moderation::verdict::{check_content, ModerationVerdict};

/// The result of analyzing a piece of content: the raw verdict plus derived
/// feedback and the posting decision.
#[derive(Debug, Clone)]
pub struct ContentAnalysis {
    pub verdict: ModerationVerdict,
    pub feedback: String,
    pub can_post: bool,
}

/// Explain why content was flagged, in plain language.
pub fn explain_content_issues(verdict: &ModerationVerdict) -> String {
    if !verdict.is_problematic {
        return "No issues detected with this content.".to_string();
    }

    let issues: Vec<String> = verdict
        .exceeded_categories()
        .map(|c| format!("{} (score: {:.2})", category_explanation(&c.name), c.score))
        .collect();

    if issues.is_empty() {
        // Fail-safe verdicts carry no category detail
        return "Content was flagged but specific issues could not be determined.".to_string();
    }

    format!(
        "This content may contain: {}. Consider revising before posting.",
        issues.join(", ")
    )
}

/// Analyze content: score it, derive feedback, and decide whether it can be
/// posted as-is.
pub async fn analyze_content(scorer: &dyn ContentScorer, text: &str) -> ContentAnalysis {
    let verdict = check_content(scorer, text).await;

    let feedback = if verdict.is_problematic {
        explain_content_issues(&verdict)
    } else {
        "Content appears safe to post.".to_string()
    };

    let can_post = !verdict.is_problematic;

    ContentAnalysis {
        verdict,
        feedback,
        can_post,
    }
}

/// Suggest concrete revisions for flagged content.
///
/// Returns a header line followed by two bullets per exceeded category, in
/// the verdict's category order. Safe content gets a single all-clear line.
pub fn suggest_improvements(verdict: &ModerationVerdict) -> Vec<String> {
    if !verdict.is_problematic {
        return vec!["No improvements needed. Content appears safe to post.".to_string()];
    }

    let mut suggestions =
        vec!["Consider revising your content to address the following issues:".to_string()];

    for category in verdict.exceeded_categories() {
        for line in category_suggestions(&category.name) {
            suggestions.push(line);
        }
    }

    suggestions
}

/// Fixed phrase describing what a flagged category means.
fn category_explanation(name: &str) -> String {
    match Category::from_name(name) {
        Some(Category::Toxicity) => "toxic or rude language".to_string(),
        Some(Category::SevereToxicity) => {
            "very hateful, aggressive, or disrespectful language".to_string()
        }
        Some(Category::IdentityAttack) => {
            "negative or hateful comments targeting identity".to_string()
        }
        Some(Category::Insult) => "insulting or negative comments".to_string(),
        Some(Category::Profanity) => {
            "swear words, curse words, or other obscene language".to_string()
        }
        Some(Category::Threat) => {
            "threatening language or content that suggests violence".to_string()
        }
        None => humanize(name),
    }
}

/// Fixed revision advice for a flagged category.
fn category_suggestions(name: &str) -> Vec<String> {
    match Category::from_name(name) {
        Some(Category::Toxicity) | Some(Category::SevereToxicity) => vec![
            "• Use more neutral or positive language".to_string(),
            "• Express your point without aggressive or hostile tone".to_string(),
        ],
        Some(Category::IdentityAttack) => vec![
            "• Avoid references to identity characteristics (race, gender, religion, etc.)"
                .to_string(),
            "• Focus on ideas rather than personal attributes".to_string(),
        ],
        Some(Category::Insult) => vec![
            "• Rephrase critical points constructively".to_string(),
            "• Focus on actions or ideas rather than personal attacks".to_string(),
        ],
        Some(Category::Profanity) => vec![
            "• Replace profanity with more appropriate language".to_string(),
            "• Consider if your point can be made without strong language".to_string(),
        ],
        Some(Category::Threat) => vec![
            "• Remove any language that could be perceived as threatening".to_string(),
            "• Express disagreement or frustration without implying harm".to_string(),
        ],
        None => vec![format!("• Review content for {}", humanize(name))],
    }
}
