//! vimeo-upload — command-line client for the Vimeo upload API.
//!
//! Set VIMEO_ACCESS_TOKEN (and optionally VIMEO_API_URL). Uses Bearer auth.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use vimeo_upload_cli::{format_video_row, init_tracing, SettingsArgs};
use vimeo_upload_client::VimeoClient;
use vimeo_upload_core::models::{player_embed_url, Video, VideoSettings};
use vimeo_upload_core::{ClientConfig, ErrorMetadata, UploadError};

#[derive(Parser)]
#[command(name = "vimeo-upload", about = "Vimeo upload API CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the authenticated account
    Me,
    /// List your videos
    Videos {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Upload a video file with the streaming strategy
    Upload {
        /// Path to the video file
        file: std::path::PathBuf,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Update settings of an existing video
    Settings {
        /// Video URI (e.g. /videos/76979871)
        uri: String,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Delete a video
    Delete {
        /// Video URI (e.g. /videos/76979871)
        uri: String,
    },
    /// Print the embeddable player URL for a video link
    PlayerUrl {
        /// Video link (e.g. https://vimeo.com/76979871)
        link: String,
    },
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Attach the stage and error code so failures can be told apart in scripts.
fn describe(err: UploadError) -> anyhow::Error {
    let code = err.error_code();
    anyhow::Error::new(err).context(format!("Request failed ({})", code))
}

fn print_player_url(link: &str) -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("Failed to load client configuration")?;
    let video = Video {
        link: Some(link.to_string()),
        ..Default::default()
    };
    let id = video.embed_id().context("Invalid video link")?;
    print_json(&serde_json::json!({
        "embed_id": id,
        "player_url": player_embed_url(&config.player_base_url, id),
    }))
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let client: VimeoClient = VimeoClient::from_env()
        .context("Failed to create API client. Set VIMEO_ACCESS_TOKEN and VIMEO_API_URL")?;

    match command {
        Commands::Me => {
            let user = client.me().await.map_err(describe)?;
            print_json(&serde_json::to_value(&user)?)?;
        }
        Commands::Videos { format } => {
            let page = client.my_videos().await.map_err(describe)?;
            match format {
                OutputFormat::Json => print_json(&serde_json::to_value(&page)?)?,
                OutputFormat::Table => {
                    for video in &page.data {
                        println!("{}", format_video_row(video));
                    }
                    println!("{} of {} videos", page.data.len(), page.total);
                }
            }
        }
        Commands::Upload { file, settings } => {
            let settings = VideoSettings::from(settings);
            let outcome = client.upload(&file, &settings).await.map_err(describe)?;
            let player_url = outcome.video.player_url(client.player_base_url()).ok();
            print_json(&serde_json::json!({
                "video_uri": outcome.video_uri,
                "link": outcome.video.link,
                "player_url": player_url,
            }))?;
        }
        Commands::Settings { uri, settings } => {
            let settings = VideoSettings::from(settings);
            let video = client
                .update_settings(&uri, &settings)
                .await
                .map_err(describe)?;
            print_json(&serde_json::to_value(&video)?)?;
        }
        Commands::Delete { uri } => {
            client.delete_video(&uri).await.map_err(describe)?;
            print_json(
                &serde_json::json!({ "success": true, "message": format!("Video {} deleted", uri) }),
            )?;
        }
        Commands::PlayerUrl { link } => print_player_url(&link)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::PlayerUrl { link } => print_player_url(&link),
        command => run(command).await,
    }
}
