// Google Perspective API implementation.
//
// Perspective API analyzes text for toxicity, identity attacks, insults, etc.
// It's free to use but rate-limited to ~1 QPS — acceptable here because the
// gate makes exactly one scoring call per outbound post. Wrapped behind the
// ContentScorer trait so it can be swapped out.
//
// API docs: https://developers.perspectiveapi.com/s/about-the-api-methods

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::categories::Category;
use super::traits::{CategoryScores, ContentScorer};

/// Default Perspective API endpoint.
pub const DEFAULT_API_URL: &str = "https://commentanalyzer.googleapis.com";

/// Perspective API content scorer.
pub struct PerspectiveScorer {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PerspectiveScorer {
    /// Create a new Perspective API scorer with the given API key.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_API_URL)
    }

    /// Create a scorer pointing at a non-default base URL (for testing).
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("gatepost/0.1 (content-moderation gate)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ContentScorer for PerspectiveScorer {
    async fn score(&self, text: &str) -> Result<CategoryScores> {
        let url = format!("{}/v1alpha1/comments:analyze", self.base_url);

        let request = AnalyzeRequest {
            comment: Comment {
                text: text.to_string(),
            },
            requested_attributes: RequestedAttributes {
                toxicity: AttributeConfig {},
                severe_toxicity: AttributeConfig {},
                identity_attack: AttributeConfig {},
                insult: AttributeConfig {},
                profanity: AttributeConfig {},
                threat: AttributeConfig {},
            },
            languages: vec!["en".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .context("Failed to call Perspective API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Perspective API returned {}: {}", status, body);
        }

        let result: AnalyzeResponse = response
            .json()
            .await
            .context("Failed to parse Perspective API response")?;

        let mut scores = CategoryScores::new();
        for category in Category::ALL {
            if let Some(value) = extract_score(&result, category.as_str()) {
                scores.set(category, value);
            }
        }

        debug!(
            text_preview = &text[..text.len().min(50)],
            "Scored text against Perspective API"
        );

        Ok(scores)
    }
}

/// Extract a specific attribute's summary score from the API response.
fn extract_score(response: &AnalyzeResponse, attribute: &str) -> Option<f64> {
    response
        .attribute_scores
        .get(attribute)
        .map(|score| score.summary_score.value)
}

// --- Perspective API request/response types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest {
    comment: Comment,
    requested_attributes: RequestedAttributes,
    languages: Vec<String>,
}

#[derive(Serialize)]
struct Comment {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RequestedAttributes {
    toxicity: AttributeConfig,
    severe_toxicity: AttributeConfig,
    identity_attack: AttributeConfig,
    insult: AttributeConfig,
    profanity: AttributeConfig,
    threat: AttributeConfig,
}

#[derive(Serialize)]
struct AttributeConfig {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    attribute_scores: std::collections::HashMap<String, AttributeScore>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
    summary_score: SummaryScore,
}

#[derive(Deserialize)]
struct SummaryScore {
    value: f64,
}
