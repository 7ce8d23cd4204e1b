// Composition tests for the posting gate.
//
// These exercise the full pipeline — analyze, decide, publish — with a
// canned scorer standing in for Perspective and a wiremock server standing
// in for Twitter. No real network access.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gatepost::moderation::{Category, CategoryScores, ContentScorer};
use gatepost::pipeline::{PostGate, PostOptions};
use gatepost::twitter::{TwitterClient, TwitterCredentials};

/// Scorer returning fixed scores, or failing on demand.
struct StaticScorer {
    scores: Vec<(Category, f64)>,
    fail: bool,
}

impl StaticScorer {
    fn with(scores: &[(Category, f64)]) -> Self {
        Self {
            scores: scores.to_vec(),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            scores: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ContentScorer for StaticScorer {
    async fn score(&self, _text: &str) -> Result<CategoryScores> {
        if self.fail {
            anyhow::bail!("scorer unavailable");
        }
        Ok(self.scores.iter().copied().collect())
    }
}

fn gate_for(server: &MockServer, scorer: StaticScorer) -> PostGate {
    let credentials = TwitterCredentials {
        api_key: "ck".to_string(),
        api_secret: "cs".to_string(),
        access_token: "at".to_string(),
        access_secret: "as".to_string(),
    };
    let twitter =
        TwitterClient::with_base_urls(credentials, &server.uri(), &server.uri()).unwrap();
    PostGate::new(Arc::new(scorer), twitter)
}

fn tweet_created(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": id, "text": "echo" } }))
}

// ============================================================
// Gate closed — flagged content is withheld
// ============================================================

#[tokio::test]
async fn flagged_content_is_withheld_without_publish_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(tweet_created("0"))
        .expect(0)
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::with(&[(Category::Toxicity, 0.9)]));
    let decision = gate
        .check_and_post("you are all idiots", &PostOptions::default())
        .await;

    assert!(!decision.posted);
    assert!(decision.problematic);
    assert!(decision.tweet_id.is_none());
    assert!(decision.error.is_none());
    // Feedback is the explanation, a blank line, then the suggestions
    assert!(decision.feedback.contains("This content may contain: toxic or rude language"));
    assert!(decision.feedback.contains("\n\n"));
    assert!(decision
        .feedback
        .contains("Consider revising your content to address the following issues:"));
    assert!(decision.feedback.contains("• Use more neutral or positive language"));
}

#[tokio::test]
async fn scorer_failure_fails_closed_and_withholds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(tweet_created("0"))
        .expect(0)
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::failing());
    let decision = gate
        .check_and_post("perfectly fine text", &PostOptions::default())
        .await;

    assert!(!decision.posted);
    assert!(decision.problematic);
    assert!(decision
        .feedback
        .contains("Content was flagged but specific issues could not be determined."));
}

// ============================================================
// Gate open — safe or forced content is published
// ============================================================

#[tokio::test]
async fn safe_content_is_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(tweet_created("111"))
        .expect(1)
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::with(&[(Category::Toxicity, 0.05)]));
    let decision = gate
        .check_and_post("what a lovely day", &PostOptions::default())
        .await;

    assert!(decision.posted);
    assert!(!decision.problematic);
    assert_eq!(decision.tweet_id.as_deref(), Some("111"));
    assert_eq!(decision.feedback, "Content was posted successfully.");
}

#[tokio::test]
async fn force_post_publishes_flagged_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(tweet_created("222"))
        .expect(1)
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::with(&[(Category::Insult, 0.8)]));
    let options = PostOptions {
        force_post: true,
        ..Default::default()
    };
    let decision = gate.check_and_post("you absolute walnut", &options).await;

    assert!(decision.posted);
    assert!(decision.problematic);
    assert_eq!(decision.tweet_id.as_deref(), Some("222"));
    assert!(decision
        .feedback
        .starts_with("Content was posted despite being flagged:"));
    assert!(decision.feedback.contains("insulting or negative comments"));
}

#[tokio::test]
async fn media_ids_flow_through_the_gate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(tweet_created("333"))
        .expect(1)
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::with(&[]));
    let options = PostOptions {
        force_post: false,
        media_ids: vec!["m1".to_string(), "m2".to_string()],
    };
    let decision = gate.check_and_post("holiday photos", &options).await;
    assert!(decision.posted);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["media"]["media_ids"], json!(["m1", "m2"]));
}

// ============================================================
// Publish failures surface in the decision
// ============================================================

#[tokio::test]
async fn publish_failure_is_reported_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("over capacity"))
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::with(&[]));
    let decision = gate
        .check_and_post("hello world", &PostOptions::default())
        .await;

    assert!(!decision.posted);
    assert!(!decision.problematic);
    assert_eq!(decision.feedback, "Content appears safe to post.");
    assert!(decision.error.unwrap().contains("500"));
}

#[tokio::test]
async fn empty_content_passes_moderation_but_fails_publish_validation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(tweet_created("0"))
        .expect(0)
        .mount(&server)
        .await;

    let gate = gate_for(&server, StaticScorer::with(&[]));
    let decision = gate.check_and_post("   ", &PostOptions::default()).await;

    assert!(!decision.posted);
    assert!(!decision.problematic);
    assert!(decision.error.unwrap().contains("cannot be empty"));
}
