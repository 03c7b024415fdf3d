//! Request construction for every step of the upload lifecycle.
//!
//! `RequestSerializer` holds no connection state, only the base locator and
//! the per-endpoint method table. Each builder is a pure function of its
//! inputs (apart from reading file metadata) and tags failures with the
//! stage it builds for.

use http::Method;
use serde_json::{json, Map, Value as JsonValue};
use std::fs;
use std::path::Path;
use tracing::debug;
use url::Url;
use vimeo_upload_core::models::{RequestDescriptor, VideoSettings};
use vimeo_upload_core::{ClientConfig, EndpointMethods, UploadErrorKind, UploadResult, UploadStage};

const ME_PATH: &str = "/me";
const MY_VIDEOS_PATH: &str = "/me/videos";

/// Content type sent with streaming uploads.
pub const UPLOAD_CONTENT_TYPE: &str = "video/mp4";

#[derive(Clone, Debug)]
pub struct RequestSerializer {
    base_url: Url,
    methods: EndpointMethods,
}

impl RequestSerializer {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            methods: EndpointMethods::default(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            methods: config.methods.clone(),
        }
    }

    pub fn with_methods(mut self, methods: EndpointMethods) -> Self {
        self.methods = methods;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path or absolute URI against the base locator.
    fn resolve(&self, uri: &str, stage: UploadStage) -> UploadResult<Url> {
        self.base_url.join(uri).map_err(|source| {
            UploadErrorKind::InvalidUrl {
                url: uri.to_string(),
                source,
            }
            .in_stage(stage)
        })
    }

    /// `GET /me`
    pub fn me_request(&self) -> UploadResult<RequestDescriptor> {
        let url = self.resolve(ME_PATH, UploadStage::Me)?;
        Ok(RequestDescriptor::new(Method::GET, url))
    }

    /// `GET /me/videos`
    pub fn my_videos_request(&self) -> UploadResult<RequestDescriptor> {
        let url = self.resolve(MY_VIDEOS_PATH, UploadStage::MyVideos)?;
        Ok(RequestDescriptor::new(Method::GET, url))
    }

    /// `POST /me/videos` announcing a streaming upload of `file`.
    pub fn create_video_request(&self, file: &Path) -> UploadResult<RequestDescriptor> {
        let parameters = create_video_base_parameters(file)?;
        self.create_video_request_with_url(MY_VIDEOS_PATH, parameters)
    }

    /// `POST {uri}` with caller-supplied parameters.
    pub fn create_video_request_with_url(
        &self,
        uri: &str,
        parameters: Map<String, JsonValue>,
    ) -> UploadResult<RequestDescriptor> {
        let url = self.resolve(uri, UploadStage::Create)?;
        debug!(url = %url, "Built create video request");
        Ok(RequestDescriptor::new(Method::POST, url).with_parameters(parameters))
    }

    /// `PUT {destination}` carrying the bytes of `source`.
    pub fn upload_video_request(
        &self,
        source: &Path,
        destination: &str,
    ) -> UploadResult<RequestDescriptor> {
        if !source.is_file() {
            return Err(UploadErrorKind::SourceFileMissing(source.to_path_buf())
                .in_stage(UploadStage::Upload));
        }

        let url = self.resolve(destination, UploadStage::Upload)?;
        let length = file_length(source, UploadStage::Upload)?;
        debug!(url = %url, length, "Built upload request");

        Ok(RequestDescriptor::new(Method::PUT, url)
            .with_header("Content-Length", length.to_string())
            .with_header("Content-Type", UPLOAD_CONTENT_TYPE)
            .with_file_body(source))
    }

    /// Finalize an upload. The verb comes from the endpoint method table.
    pub fn activate_video_request(&self, uri: &str) -> UploadResult<RequestDescriptor> {
        if uri.is_empty() {
            return Err(UploadErrorKind::EmptyVideoUri.in_stage(UploadStage::Activate));
        }
        let url = self.resolve(uri, UploadStage::Activate)?;
        Ok(RequestDescriptor::new(self.methods.activate.clone(), url))
    }

    /// `PATCH {video_uri}` with the serialized settings.
    pub fn video_settings_request(
        &self,
        video_uri: &str,
        settings: &VideoSettings,
    ) -> UploadResult<RequestDescriptor> {
        if video_uri.is_empty() {
            return Err(UploadErrorKind::EmptyVideoUri.in_stage(UploadStage::VideoSettings));
        }

        let url = self.resolve(video_uri, UploadStage::VideoSettings)?;

        let parameters = settings.parameters();
        if parameters.is_empty() {
            return Err(UploadErrorKind::EmptyParameters.in_stage(UploadStage::VideoSettings));
        }

        Ok(RequestDescriptor::new(Method::PATCH, url).with_parameters(parameters))
    }

    /// `DELETE {video_uri}`
    pub fn delete_video_request(&self, video_uri: &str) -> UploadResult<RequestDescriptor> {
        if video_uri.is_empty() {
            return Err(UploadErrorKind::EmptyVideoUri.in_stage(UploadStage::Delete));
        }
        let url = self.resolve(video_uri, UploadStage::Delete)?;
        Ok(RequestDescriptor::new(Method::DELETE, url))
    }
}

/// Parameters announcing a streaming upload: `{type: "streaming", size: <bytes>}`.
pub fn create_video_base_parameters(file: &Path) -> UploadResult<Map<String, JsonValue>> {
    let length = file_length(file, UploadStage::Create)?;

    let mut parameters = Map::new();
    parameters.insert("type".to_string(), json!("streaming"));
    parameters.insert("size".to_string(), json!(length));
    Ok(parameters)
}

fn file_length(path: &Path, stage: UploadStage) -> UploadResult<u64> {
    fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| UploadErrorKind::FileLength(e).in_stage(stage))
}
