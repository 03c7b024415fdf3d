//! HTTP client for the Vimeo upload API.
//!
//! `RequestSerializer` builds one request per lifecycle step, upload
//! strategies decide how a video's bytes are sent, and `VimeoClient` runs
//! those requests through a `Transport` (by default `reqwest`).
//! The CLI crate uses this client directly.

pub mod api;
pub mod operation;
pub mod serializer;
pub mod strategy;
pub mod transport;

use anyhow::{Context, Result};
use vimeo_upload_core::ClientConfig;

pub use operation::{UploadOperation, UploadOutcome};
pub use serializer::RequestSerializer;
pub use strategy::{StreamingUploadStrategy, UploadStrategy};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};

/// Client for the Vimeo API, generic over the transport.
#[derive(Clone, Debug)]
pub struct VimeoClient<T = HttpTransport> {
    serializer: RequestSerializer,
    transport: T,
    player_base_url: String,
}

impl VimeoClient<HttpTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.access_token.is_none() {
            anyhow::bail!("Missing access token. Set VIMEO_ACCESS_TOKEN");
        }
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create client from environment (see `ClientConfig::from_env`).
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Failed to load client configuration")?;
        Self::new(&config)
    }
}

impl<T: Transport> VimeoClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            serializer: RequestSerializer::from_config(config),
            transport,
            player_base_url: config.player_base_url.clone(),
        }
    }

    pub fn serializer(&self) -> &RequestSerializer {
        &self.serializer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn player_base_url(&self) -> &str {
        &self.player_base_url
    }
}

// Re-export domain types for convenience.
pub use vimeo_upload_core::models::{
    PrivacyView, RequestBody, RequestDescriptor, UploadApproach, User, Video, VideoPage,
    VideoSettings,
};
