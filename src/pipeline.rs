// The moderation gate pipeline: analyze, decide, publish.
//
// PostGate wires a content scorer to the Twitter client. Content that the
// scorer flags is held back with an explanation and revision suggestions
// unless the caller explicitly forces the post through. Callers always get
// a PostDecision value — no error escapes the gate.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{error, info};

use crate::analysis::{analyze_content, suggest_improvements};
use crate::moderation::traits::ContentScorer;
use crate::twitter::{TweetDraft, TwitterClient};

/// Options for a gated post.
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
    /// Publish even if the content is flagged as problematic.
    pub force_post: bool,
    /// Previously-uploaded media ids to attach (at most 4 are used).
    pub media_ids: Vec<String>,
}

/// The unified outcome of a check-and-post run.
#[derive(Debug, Clone, Serialize)]
pub struct PostDecision {
    pub posted: bool,
    pub problematic: bool,
    pub feedback: String,
    pub tweet_id: Option<String>,
    pub error: Option<String>,
}

/// The content-moderation gate in front of the publish action.
pub struct PostGate {
    scorer: Arc<dyn ContentScorer>,
    twitter: TwitterClient,
}

impl PostGate {
    pub fn new(scorer: Arc<dyn ContentScorer>, twitter: TwitterClient) -> Self {
        Self { scorer, twitter }
    }

    /// Moderate `content` and post it to Twitter if it passes (or is forced).
    ///
    /// This is the single outermost safety net: any failure below is
    /// converted into a generic decision value here, so callers never see
    /// an error.
    pub async fn check_and_post(&self, content: &str, options: &PostOptions) -> PostDecision {
        match self.run(content, options).await {
            Ok(decision) => decision,
            Err(err) => {
                error!(error = %err, "Unexpected failure in the posting pipeline");
                PostDecision {
                    posted: false,
                    problematic: false,
                    feedback: "An error occurred while processing your request.".to_string(),
                    tweet_id: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn run(&self, content: &str, options: &PostOptions) -> Result<PostDecision> {
        let analysis = analyze_content(self.scorer.as_ref(), content).await;

        // Flagged content is held back unless the caller forces it through.
        if analysis.verdict.is_problematic && !options.force_post {
            info!("Content flagged; withholding post");
            let suggestions = suggest_improvements(&analysis.verdict);
            return Ok(PostDecision {
                posted: false,
                problematic: true,
                feedback: format!("{}\n\n{}", analysis.feedback, suggestions.join("\n")),
                tweet_id: None,
                error: None,
            });
        }

        let draft = TweetDraft::new(content).with_media(options.media_ids.clone());
        let result = self.twitter.post_tweet(&draft).await;

        if !result.success {
            return Ok(PostDecision {
                posted: false,
                problematic: analysis.verdict.is_problematic,
                feedback: analysis.feedback,
                tweet_id: None,
                error: result.error,
            });
        }

        let feedback = if analysis.verdict.is_problematic {
            format!(
                "Content was posted despite being flagged: {}",
                analysis.feedback
            )
        } else {
            "Content was posted successfully.".to_string()
        };

        Ok(PostDecision {
            posted: true,
            problematic: analysis.verdict.is_problematic,
            feedback,
            tweet_id: result.id,
            error: None,
        })
    }
}
