use clap::Args;
use vimeo_upload_core::models::{PrivacyView, Video, VideoSettings};

/// Video settings accepted by the `upload` and `settings` subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Video title
    #[arg(long)]
    pub title: Option<String>,
    /// Video description
    #[arg(long)]
    pub description: Option<String>,
    /// Who can view the video: anybody, nobody, contacts, password, unlisted, disable
    #[arg(long)]
    pub privacy: Option<PrivacyView>,
    /// Password required to view the video (with --privacy password)
    #[arg(long)]
    pub password: Option<String>,
}

impl From<SettingsArgs> for VideoSettings {
    fn from(args: SettingsArgs) -> Self {
        VideoSettings {
            title: args.title,
            description: args.description,
            privacy: args.privacy,
            password: args.password,
        }
    }
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// One table row for `videos --format table`.
pub fn format_video_row(video: &Video) -> String {
    format!(
        "{:<24} {:<32} {:<12} {}",
        truncate_string(&video.uri, 24),
        truncate_string(video.name.as_deref().unwrap_or("-"), 32),
        video.status.as_deref().unwrap_or("-"),
        video.link.as_deref().unwrap_or("-"),
    )
}


/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
