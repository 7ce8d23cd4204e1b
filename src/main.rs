use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use gatepost::analysis::analyze_content;
use gatepost::analysis::suggest_improvements;
use gatepost::config::Config;
use gatepost::moderation::PerspectiveScorer;
use gatepost::output;
use gatepost::pipeline::{PostGate, PostOptions};
use gatepost::twitter::TwitterClient;

/// Gatepost: a content-moderation gate for outbound tweets.
///
/// Scores text against toxicity-style categories and only lets it through
/// to Twitter when it passes (or when you force it).
#[derive(Parser)]
#[command(name = "gatepost", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text without posting
    Analyze {
        /// The text to analyze
        text: String,

        /// Emit the analysis as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Moderate text and post it to Twitter if it passes
    Post {
        /// The text to post
        text: String,

        /// Post even if the content is flagged as problematic
        #[arg(long)]
        force: bool,

        /// Previously-uploaded media id to attach (repeatable, max 4 used)
        #[arg(long = "media-id")]
        media_ids: Vec<String>,

        /// Media file to upload and attach (repeatable)
        #[arg(long = "media")]
        media_files: Vec<PathBuf>,

        /// Emit the decision as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Upload a media file and print its id
    Upload {
        /// Path to the media file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gatepost=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { text, json } => {
            config.require_perspective()?;
            let scorer = PerspectiveScorer::new(config.perspective_api_key.clone())?;

            let analysis = analyze_content(&scorer, &text).await;
            let suggestions = suggest_improvements(&analysis.verdict);

            if json {
                let value = serde_json::json!({
                    "verdict": analysis.verdict,
                    "feedback": analysis.feedback,
                    "can_post": analysis.can_post,
                    "suggestions": suggestions,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::display_analysis(&analysis, &suggestions);
            }
        }

        Commands::Post {
            text,
            force,
            media_ids,
            media_files,
            json,
        } => {
            config.require_perspective()?;
            config.require_twitter()?;

            let scorer = PerspectiveScorer::new(config.perspective_api_key.clone())?;
            let twitter = TwitterClient::new(config.twitter_credentials())?;

            // Upload any media files first; failed uploads are skipped with
            // a warning rather than aborting the post.
            let mut all_media_ids = media_ids;
            for path in &media_files {
                match twitter.upload_media(path).await {
                    Some(id) => all_media_ids.push(id),
                    None => warn!(path = %path.display(), "Media upload failed; posting without it"),
                }
            }

            let gate = PostGate::new(Arc::new(scorer), twitter);
            let options = PostOptions {
                force_post: force,
                media_ids: all_media_ids,
            };

            let decision = gate.check_and_post(&text, &options).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                output::display_decision(&decision);
            }
        }

        Commands::Upload { path } => {
            config.require_twitter()?;
            let twitter = TwitterClient::new(config.twitter_credentials())?;

            match twitter.upload_media(&path).await {
                Some(id) => println!("Media uploaded: {id}"),
                None => anyhow::bail!("Media upload failed for {}", path.display()),
            }
        }
    }

    Ok(())
}
