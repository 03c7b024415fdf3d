//! Upload orchestration: create → upload bytes → activate → apply settings.
//!
//! Steps run strictly in sequence. The first failure stops the chain and is
//! returned tagged with its stage; nothing is retried here.

use std::path::Path;
use tracing::{debug, info};
use vimeo_upload_core::models::{Video, VideoSettings};
use vimeo_upload_core::{UploadErrorKind, UploadResult, UploadStage};

use crate::serializer::RequestSerializer;
use crate::strategy::{StreamingUploadStrategy, UploadStrategy};
use crate::transport::{decode_body, send_checked, Transport};

/// Result of a completed upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Canonical URI of the uploaded video
    pub video_uri: String,
    /// Video resource returned by the create step
    pub video: Video,
}

pub struct UploadOperation<'a, T: Transport + ?Sized> {
    serializer: &'a RequestSerializer,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> UploadOperation<'a, T> {
    pub fn new(serializer: &'a RequestSerializer, transport: &'a T) -> Self {
        Self {
            serializer,
            transport,
        }
    }

    /// Upload `file` with the streaming strategy.
    pub async fn run(&self, file: &Path, settings: &VideoSettings) -> UploadResult<UploadOutcome> {
        self.run_with::<StreamingUploadStrategy>(file, settings).await
    }

    async fn run_with<S: UploadStrategy>(
        &self,
        file: &Path,
        settings: &VideoSettings,
    ) -> UploadResult<UploadOutcome> {
        info!(file = %file.display(), approach = %S::APPROACH, "Creating video");
        let request = self.serializer.create_video_request(file)?;
        let response = send_checked(self.transport, UploadStage::Create, &request).await?;
        let video: Video = decode_body(UploadStage::Create, response)?;
        if video.uri.is_empty() {
            return Err(UploadErrorKind::Decode("created video has no uri".to_string())
                .in_stage(UploadStage::Create));
        }

        let upload_link = S::upload_link(&video)
            .map_err(|e| UploadErrorKind::from(e).in_stage(UploadStage::Upload))?;

        info!(video_uri = %video.uri, "Uploading video bytes");
        let request = S::upload_request(Some(self.serializer), file, &upload_link)?;
        send_checked(self.transport, UploadStage::Upload, &request).await?;

        let mut video_uri = video.uri.clone();
        if let Some(complete_uri) = video.complete_uri() {
            info!(complete_uri, "Activating video");
            let request = self.serializer.activate_video_request(complete_uri)?;
            let response = send_checked(self.transport, UploadStage::Activate, &request).await?;
            if let Some(location) = response.location.filter(|l| !l.is_empty()) {
                video_uri = location;
            }
        } else {
            debug!(video_uri = %video.uri, "No activation required");
        }

        if settings.is_empty() {
            debug!("No video settings to apply");
        } else {
            info!(video_uri = %video_uri, "Applying video settings");
            let request = self.serializer.video_settings_request(&video_uri, settings)?;
            send_checked(self.transport, UploadStage::VideoSettings, &request).await?;
        }

        info!(video_uri = %video_uri, "Upload complete");
        Ok(UploadOutcome { video_uri, video })
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::transport::TransportResponse;
    use http::Method;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use url::Url;
    use vimeo_upload_core::models::{PrivacyView, RequestBody};
    use vimeo_upload_core::UploadLinkError;

    fn serializer() -> RequestSerializer {
        RequestSerializer::new(Url::parse("https://api.vimeo.com").unwrap())
    }

    fn video_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0123456789").unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_upload_sequence() {
        let transport = RecordingTransport::with_responses(vec![
            ok(json!({
                "uri": "/videos/76979871",
                "upload": {
                    "approach": "streaming",
                    "upload_link": "https://upload.example.com/put",
                    "complete_uri": "/users/42/uploads/7?video_file_id=9"
                }
            })),
            TransportResponse {
                status: 200,
                ..Default::default()
            },
            TransportResponse {
                status: 201,
                location: Some("/videos/76979871".to_string()),
                body: None,
            },
            ok(json!({"uri": "/videos/76979871", "name": "Holiday"})),
        ]);
        let serializer = serializer();
        let file = video_file();
        let settings = VideoSettings::new()
            .with_title("Holiday")
            .with_privacy(PrivacyView::Unlisted);

        let outcome = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &settings)
            .await
            .unwrap();
        assert_eq!(outcome.video_uri, "/videos/76979871");

        let sent = transport.sent();
        assert_eq!(sent.len(), 4);

        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].url.as_str(), "https://api.vimeo.com/me/videos");
        assert_eq!(sent[0].parameters["size"], 10);

        assert_eq!(sent[1].method, Method::PUT);
        assert_eq!(sent[1].url.as_str(), "https://upload.example.com/put");
        assert_eq!(sent[1].body, RequestBody::File(file.path().to_path_buf()));

        assert_eq!(sent[2].method, Method::DELETE);
        assert_eq!(
            sent[2].url.as_str(),
            "https://api.vimeo.com/users/42/uploads/7?video_file_id=9"
        );

        assert_eq!(sent[3].method, Method::PATCH);
        assert_eq!(sent[3].url.as_str(), "https://api.vimeo.com/videos/76979871");
        assert_eq!(sent[3].parameters["name"], "Holiday");
    }

    #[tokio::test]
    async fn test_without_complete_uri_or_settings() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "uri": "/videos/5",
            "upload": {"approach": "streaming", "upload_link": "https://upload.example.com/5"}
        }))]);
        let serializer = serializer();
        let file = video_file();

        let outcome = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &VideoSettings::new())
            .await
            .unwrap();

        assert_eq!(outcome.video_uri, "/videos/5");
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].method, Method::PUT);
    }

    #[tokio::test]
    async fn test_wrong_approach_stops_before_upload() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "uri": "/videos/5",
            "upload": {"approach": "tus", "upload_link": "https://files.tus.vimeo.com/5"}
        }))]);
        let serializer = serializer();
        let file = video_file();

        let err = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &VideoSettings::new())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), UploadStage::Upload);
        assert!(matches!(
            err.kind(),
            UploadErrorKind::UploadLink(UploadLinkError::WrongType)
        ));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_is_tagged() {
        let transport = RecordingTransport::with_responses(vec![TransportResponse {
            status: 401,
            location: None,
            body: Some(json!({"error": "unauthorized"})),
        }]);
        let serializer = serializer();
        let file = video_file();

        let err = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &VideoSettings::new())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), UploadStage::Create);
        assert!(matches!(err.kind(), UploadErrorKind::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_missing_file_sends_nothing() {
        let transport = RecordingTransport::default();
        let serializer = serializer();

        let err = UploadOperation::new(&serializer, &transport)
            .run(Path::new("/nonexistent/clip.mp4"), &VideoSettings::new())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), UploadStage::Create);
        assert!(transport.sent().is_empty());
    }

    fn created_with_activation() -> TransportResponse {
        ok(json!({
            "uri": "/videos/76979871",
            "upload": {
                "approach": "streaming",
                "upload_link": "https://upload.example.com/put",
                "complete_uri": "/users/42/uploads/7"
            }
        }))
    }

    fn status(status: u16) -> TransportResponse {
        TransportResponse {
            status,
            ..Default::default()
        }
    }

    async fn run_until_failure(responses: Vec<TransportResponse>) -> (UploadStage, usize) {
        let transport = RecordingTransport::with_responses(responses);
        let serializer = serializer();
        let file = video_file();
        let settings = VideoSettings::new().with_title("Holiday");

        let err = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &settings)
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), UploadErrorKind::Status { .. }));
        (err.stage(), transport.sent().len())
    }

    #[tokio::test]
    async fn test_upload_failure_stops_sequence() {
        let (stage, sent) = run_until_failure(vec![created_with_activation(), status(500)]).await;
        assert_eq!(stage, UploadStage::Upload);
        assert_eq!(sent, 2);
    }

    #[tokio::test]
    async fn test_activate_failure_stops_sequence() {
        let (stage, sent) =
            run_until_failure(vec![created_with_activation(), status(200), status(404)]).await;
        assert_eq!(stage, UploadStage::Activate);
        assert_eq!(sent, 3);
    }

    #[tokio::test]
    async fn test_settings_failure_is_tagged() {
        let (stage, sent) = run_until_failure(vec![
            created_with_activation(),
            status(200),
            status(201),
            status(400),
        ])
        .await;
        assert_eq!(stage, UploadStage::VideoSettings);
        assert_eq!(sent, 4);
    }

    #[tokio::test]
    async fn test_null_uri_is_reported_as_create_error() {
        let transport = RecordingTransport::with_responses(vec![ok(json!({
            "uri": null,
            "upload": {"approach": "streaming", "upload_link": "https://upload.example.com/5"}
        }))]);
        let serializer = serializer();
        let file = video_file();

        let err = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &VideoSettings::new())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), UploadStage::Create);
        assert!(err.to_string().contains("created video has no uri"));
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = vimeo_upload_core::ClientConfig::new(Url::parse("http://127.0.0.1:9").unwrap())
            .with_access_token("secret-token");
        let transport = crate::transport::HttpTransport::new(&config).unwrap();
        let serializer = RequestSerializer::from_config(&config);
        let file = video_file();

        let err = UploadOperation::new(&serializer, &transport)
            .run(file.path(), &VideoSettings::new())
            .await
            .unwrap_err();

        assert_eq!(err.stage(), UploadStage::Create);
        assert!(matches!(err.kind(), UploadErrorKind::Transport(_)));
    }
}
