//! Transport collaborator: sends a `RequestDescriptor` and returns the response.

use anyhow::Context;
use async_trait::async_trait;
use http::Method;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Body, Client};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use vimeo_upload_core::models::{RequestBody, RequestDescriptor};
use vimeo_upload_core::{ClientConfig, UploadErrorKind, UploadResult, UploadStage};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to open request body {}: {source}", .path.display())]
    Body {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Response as seen by the upload orchestration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub location: Option<String>,
    /// JSON body, or the raw text as a JSON string when the body is not JSON
    pub body: Option<JsonValue>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport with bearer auth.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    access_token: Option<String>,
    accept: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            access_token: config.access_token.clone(),
            accept: config.accept_header(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .header(ACCEPT, self.accept.as_str());

        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Parameters if request.method == Method::GET => {
                builder.query(&request.parameters)
            }
            RequestBody::Parameters => builder.json(&request.parameters),
            RequestBody::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| TransportError::Body {
                        path: path.clone(),
                        source,
                    })?;
                builder.body(Body::wrap_stream(ReaderStream::new(file)))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                JsonValue::String(String::from_utf8_lossy(&bytes).into_owned())
            }))
        };

        Ok(TransportResponse {
            status,
            location,
            body,
        })
    }
}

/// Send `request` and turn transport failures and non-2xx statuses into
/// errors tagged with `stage`.
pub async fn send_checked<T>(
    transport: &T,
    stage: UploadStage,
    request: &RequestDescriptor,
) -> UploadResult<TransportResponse>
where
    T: Transport + ?Sized,
{
    debug!(%stage, method = %request.method, url = %request.url, "Sending request");

    let response = transport
        .send(request)
        .await
        .map_err(|e| UploadErrorKind::Transport(e.to_string()).in_stage(stage))?;

    if !response.is_success() {
        let body = match &response.body {
            Some(JsonValue::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        warn!(%stage, status = response.status, "API request failed");
        return Err(UploadErrorKind::Status {
            status: response.status,
            body,
        }
        .in_stage(stage));
    }

    Ok(response)
}

/// Deserialize the JSON body of a successful response.
pub fn decode_body<D: DeserializeOwned>(
    stage: UploadStage,
    response: TransportResponse,
) -> UploadResult<D> {
    let body = response.body.ok_or_else(|| {
        UploadErrorKind::Decode("response body is empty".to_string()).in_stage(stage)
    })?;

    serde_json::from_value(body)
        .map_err(|e| UploadErrorKind::Decode(e.to_string()).in_stage(stage))
}
