// Twitter API client — tweet publishing and media upload.
//
// Two write endpoints: POST /2/tweets (JSON) and the v1.1 media upload
// (multipart). Both are signed with OAuth 1.0a user context. Publish
// failures never escape as errors: the client normalizes success and
// failure into a PublishResult so the gate always has a value to report.

use std::path::Path;

use anyhow::{Context, Result};
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::auth::{authorization_header, TwitterCredentials};

/// Default endpoints. Overridable for tests and proxies.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com";
pub const DEFAULT_UPLOAD_URL: &str = "https://upload.twitter.com";

/// Twitter's per-tweet character limit.
pub const TWEET_MAX_CHARS: usize = 280;

/// Twitter allows at most 4 media attachments per tweet.
pub const MAX_MEDIA_PER_TWEET: usize = 4;

/// An outbound tweet: text plus optional previously-uploaded media ids.
#[derive(Debug, Clone)]
pub struct TweetDraft {
    pub text: String,
    pub media_ids: Vec<String>,
}

impl TweetDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            media_ids: Vec::new(),
        }
    }

    pub fn with_media(mut self, media_ids: Vec<String>) -> Self {
        self.media_ids = media_ids;
        self
    }
}

/// The normalized outcome of a publish attempt. Exactly one of `id` and
/// `error` is populated, according to `success`.
#[derive(Debug, Clone, Serialize)]
pub struct PublishResult {
    pub success: bool,
    pub id: Option<String>,
    pub error: Option<String>,
}

impl PublishResult {
    fn posted(id: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(message.into()),
        }
    }
}

/// Authenticated client for the Twitter write endpoints.
pub struct TwitterClient {
    client: reqwest::Client,
    credentials: TwitterCredentials,
    api_url: String,
    upload_url: String,
}

impl TwitterClient {
    /// Create a client against the production endpoints.
    pub fn new(credentials: TwitterCredentials) -> Result<Self> {
        Self::with_base_urls(credentials, DEFAULT_API_URL, DEFAULT_UPLOAD_URL)
    }

    /// Create a client pointing at non-default endpoints (for testing).
    pub fn with_base_urls(
        credentials: TwitterCredentials,
        api_url: &str,
        upload_url: &str,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("gatepost/0.1 (content-moderation gate)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            credentials,
            api_url: api_url.trim_end_matches('/').to_string(),
            upload_url: upload_url.trim_end_matches('/').to_string(),
        })
    }

    /// Publish a tweet.
    ///
    /// Validates locally first — empty or over-length text never reaches the
    /// network. Remote failures are logged and normalized into the result.
    pub async fn post_tweet(&self, draft: &TweetDraft) -> PublishResult {
        if let Some(reason) = validate_text(&draft.text) {
            return PublishResult::failed(reason);
        }

        // Twitter accepts at most 4 attachments; extras are dropped.
        if draft.media_ids.len() > MAX_MEDIA_PER_TWEET {
            debug!(
                supplied = draft.media_ids.len(),
                kept = MAX_MEDIA_PER_TWEET,
                "Truncating media attachments"
            );
        }
        let media_ids: Vec<String> = draft
            .media_ids
            .iter()
            .take(MAX_MEDIA_PER_TWEET)
            .cloned()
            .collect();

        match self.send_tweet(&draft.text, &media_ids).await {
            Ok(id) => {
                info!(tweet_id = %id, "Tweet posted");
                PublishResult::posted(id)
            }
            Err(err) => {
                error!(error = %err, "Error posting to Twitter");
                PublishResult::failed(err.to_string())
            }
        }
    }

    async fn send_tweet(&self, text: &str, media_ids: &[String]) -> Result<String> {
        let url = format!("{}/2/tweets", self.api_url);

        let request = TweetRequest {
            text: text.to_string(),
            media: if media_ids.is_empty() {
                None
            } else {
                Some(TweetMedia {
                    media_ids: media_ids.to_vec(),
                })
            },
        };

        // JSON bodies contribute no parameters to the OAuth signature.
        let auth = authorization_header(&self.credentials, "POST", &url, &[]);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&request)
            .send()
            .await
            .context("Failed to call Twitter API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Twitter API returned {}: {}", status, body);
        }

        let result: TweetResponse = response
            .json()
            .await
            .context("Failed to parse Twitter API response")?;

        Ok(result.data.id)
    }

    /// Upload a media file for later attachment to a tweet.
    ///
    /// Returns the assigned media id, or `None` if the upload failed (the
    /// failure is logged, never raised).
    pub async fn upload_media(&self, path: &Path) -> Option<String> {
        match self.send_media(path).await {
            Ok(id) => {
                info!(media_id = %id, path = %path.display(), "Media uploaded");
                Some(id)
            }
            Err(err) => {
                error!(error = %err, path = %path.display(), "Error uploading media to Twitter");
                None
            }
        }
    }

    async fn send_media(&self, path: &Path) -> Result<String> {
        let url = format!("{}/1.1/media/upload.json", self.upload_url);

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read media file {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());

        let form = multipart::Form::new().part("media", multipart::Part::bytes(bytes).file_name(file_name));

        // Multipart bodies, like JSON, are excluded from the signature.
        let auth = authorization_header(&self.credentials, "POST", &url, &[]);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await
            .context("Failed to call Twitter media upload")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Twitter media upload returned {}: {}", status, body);
        }

        let result: MediaUploadResponse = response
            .json()
            .await
            .context("Failed to parse media upload response")?;

        Ok(result.media_id_string)
    }
}

/// Local validation applied before any network call.
///
/// Returns a failure reason, or `None` when the text is publishable. The
/// limit counts characters, not bytes — a tweet full of emoji is measured
/// by what the user sees.
fn validate_text(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return Some("Post text cannot be empty".to_string());
    }

    let length = text.chars().count();
    if length > TWEET_MAX_CHARS {
        return Some(format!(
            "Post exceeds Twitter's {TWEET_MAX_CHARS} character limit ({length} characters)"
        ));
    }

    None
}

// --- Twitter API request/response types ---

#[derive(Serialize)]
struct TweetRequest {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<TweetMedia>,
}

#[derive(Serialize)]
struct TweetMedia {
    media_ids: Vec<String>,
}

#[derive(Deserialize)]
struct TweetResponse {
    data: TweetData,
}

#[derive(Deserialize)]
struct TweetData {
    id: String,
}

#[derive(Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}
