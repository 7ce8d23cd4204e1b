use std::env;

use anyhow::Result;

use crate::twitter::TwitterCredentials;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub perspective_api_key: String,
    pub twitter_api_key: String,
    pub twitter_api_secret: String,
    pub twitter_access_token: String,
    pub twitter_access_secret: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loading is lenient; each command validates the credentials it
    /// actually needs via the `require_*` methods before doing any work.
    pub fn load() -> Result<Self> {
        Ok(Self {
            perspective_api_key: env::var("PERSPECTIVE_API_KEY").unwrap_or_default(),
            twitter_api_key: env::var("TWITTER_API_KEY").unwrap_or_default(),
            twitter_api_secret: env::var("TWITTER_API_SECRET").unwrap_or_default(),
            twitter_access_token: env::var("TWITTER_ACCESS_TOKEN").unwrap_or_default(),
            twitter_access_secret: env::var("TWITTER_ACCESS_SECRET").unwrap_or_default(),
        })
    }

    /// Check that the Perspective API key is configured.
    /// Call this before any operation that needs content scoring.
    pub fn require_perspective(&self) -> Result<()> {
        if self.perspective_api_key.is_empty() {
            anyhow::bail!(
                "PERSPECTIVE_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the full Twitter credential tuple is configured.
    /// Call this before any operation that posts or uploads.
    pub fn require_twitter(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("TWITTER_API_KEY", &self.twitter_api_key),
            ("TWITTER_API_SECRET", &self.twitter_api_secret),
            ("TWITTER_ACCESS_TOKEN", &self.twitter_access_token),
            ("TWITTER_ACCESS_SECRET", &self.twitter_access_secret),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "Missing required environment variables: {}.\n\
                 Add them to your .env file. See .env.example for details.",
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// The Twitter credential tuple for request signing.
    pub fn twitter_credentials(&self) -> TwitterCredentials {
        TwitterCredentials {
            api_key: self.twitter_api_key.clone(),
            api_secret: self.twitter_api_secret.clone(),
            access_token: self.twitter_access_token.clone(),
            access_secret: self.twitter_access_secret.clone(),
        }
    }
}
