// Twitter API client — OAuth 1.0a signing, tweet publishing, media upload.

pub mod auth;
pub mod client;

pub use auth::TwitterCredentials;
pub use client::{PublishResult, TweetDraft, TwitterClient, MAX_MEDIA_PER_TWEET, TWEET_MAX_CHARS};
