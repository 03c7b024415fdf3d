//! Error types module
//!
//! Two failure families live here. `UploadLinkError` is returned by an upload
//! strategy when a video cannot be uploaded the way that strategy works.
//! `UploadError` covers everything else and always carries the `UploadStage`
//! (the step of the upload lifecycle) that produced it, so callers can match
//! on the stage instead of inspecting message text.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like empty input
    Debug,
    /// Warning level - for remote failures that may go away on their own
    Warn,
    /// Error level - for misuse and unexpected failures
    Error,
}

/// Metadata describing how an error should be reported.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "SOURCE_FILE_MISSING")
    fn error_code(&self) -> &'static str;

    /// Whether the same request could succeed if sent again
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Upload lifecycle stage an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadStage {
    Me,
    MyVideos,
    Create,
    Upload,
    Activate,
    VideoSettings,
    Delete,
}

impl UploadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStage::Me => "Me",
            UploadStage::MyVideos => "MyVideos",
            UploadStage::Create => "Create",
            UploadStage::Upload => "Upload",
            UploadStage::Activate => "Activate",
            UploadStage::VideoSettings => "VideoSettings",
            UploadStage::Delete => "Delete",
        }
    }
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Reasons an upload strategy cannot produce an upload link for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadLinkError {
    /// The video advertises an upload approach this strategy does not handle
    #[error("Upload approach does not match the upload strategy")]
    WrongType,

    /// The approach matches but the video carries no upload link
    #[error("Upload link is unavailable")]
    Unavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadErrorKind {
    #[error("Request serializer is not available")]
    MissingSerializer,

    #[error(
        "Attempt to construct upload request but the source file does not exist: {}",
        .0.display()
    )]
    SourceFileMissing(PathBuf),

    #[error("Unable to calculate file length: {0}")]
    FileLength(#[source] io::Error),

    #[error("videoUri has length of 0")]
    EmptyVideoUri,

    #[error("Parameters dictionary is empty")]
    EmptyParameters,

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    UploadLink(#[from] UploadLinkError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl UploadErrorKind {
    /// Attribute this failure to a lifecycle stage.
    pub fn in_stage(self, stage: UploadStage) -> UploadError {
        UploadError { stage, kind: self }
    }
}

/// A failure tagged with the lifecycle stage that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{stage} error: {kind}")]
pub struct UploadError {
    pub stage: UploadStage,
    #[source]
    pub kind: UploadErrorKind,
}

impl UploadError {
    pub fn new(stage: UploadStage, kind: UploadErrorKind) -> Self {
        Self { stage, kind }
    }

    pub fn stage(&self) -> UploadStage {
        self.stage
    }

    pub fn kind(&self) -> &UploadErrorKind {
        &self.kind
    }
}

/// Result type for request building and upload operations
pub type UploadResult<T> = Result<T, UploadError>;

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        match &self.kind {
            UploadErrorKind::MissingSerializer => "MISSING_SERIALIZER",
            UploadErrorKind::SourceFileMissing(_) => "SOURCE_FILE_MISSING",
            UploadErrorKind::FileLength(_) => "FILE_LENGTH_UNAVAILABLE",
            UploadErrorKind::EmptyVideoUri => "EMPTY_VIDEO_URI",
            UploadErrorKind::EmptyParameters => "EMPTY_PARAMETERS",
            UploadErrorKind::InvalidUrl { .. } => "INVALID_URL",
            UploadErrorKind::UploadLink(UploadLinkError::WrongType) => "UPLOAD_LINK_WRONG_TYPE",
            UploadErrorKind::UploadLink(UploadLinkError::Unavailable) => {
                "UPLOAD_LINK_UNAVAILABLE"
            }
            UploadErrorKind::Transport(_) => "TRANSPORT_ERROR",
            UploadErrorKind::Status { .. } => "API_STATUS_ERROR",
            UploadErrorKind::Decode(_) => "DECODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match &self.kind {
            UploadErrorKind::Transport(_) => true,
            UploadErrorKind::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    fn log_level(&self) -> LogLevel {
        match &self.kind {
            UploadErrorKind::MissingSerializer
            | UploadErrorKind::InvalidUrl { .. }
            | UploadErrorKind::Decode(_) => LogLevel::Error,
            UploadErrorKind::Transport(_) | UploadErrorKind::Status { .. } => LogLevel::Warn,
            _ => LogLevel::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(UploadStage::Me.to_string(), "Me");
        assert_eq!(UploadStage::MyVideos.to_string(), "MyVideos");
        assert_eq!(UploadStage::VideoSettings.to_string(), "VideoSettings");
    }

    #[test]
    fn test_error_display_includes_stage_and_message() {
        let err = UploadErrorKind::EmptyVideoUri.in_stage(UploadStage::Delete);
        assert_eq!(err.stage(), UploadStage::Delete);
        assert_eq!(err.to_string(), "Delete error: videoUri has length of 0");
    }

    #[test]
    fn test_source_file_missing_message() {
        let err = UploadError::new(
            UploadStage::Upload,
            UploadErrorKind::SourceFileMissing(PathBuf::from("/tmp/missing.mp4")),
        );
        assert!(err.to_string().contains("source file does not exist"));
        assert!(err.to_string().contains("/tmp/missing.mp4"));
        assert_eq!(err.error_code(), "SOURCE_FILE_MISSING");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_status() {
        let server_error = UploadErrorKind::Status {
            status: 503,
            body: "unavailable".to_string(),
        }
        .in_stage(UploadStage::Upload);
        assert!(server_error.is_recoverable());
        assert_eq!(server_error.log_level(), LogLevel::Warn);

        let not_found = UploadErrorKind::Status {
            status: 404,
            body: "missing".to_string(),
        }
        .in_stage(UploadStage::Activate);
        assert!(!not_found.is_recoverable());
        assert_eq!(not_found.error_code(), "API_STATUS_ERROR");
    }

    #[test]
    fn test_upload_link_error_converts() {
        let kind: UploadErrorKind = UploadLinkError::Unavailable.into();
        let err = kind.in_stage(UploadStage::Upload);
        assert_eq!(err.error_code(), "UPLOAD_LINK_UNAVAILABLE");
        assert_eq!(err.to_string(), "Upload error: Upload link is unavailable");
    }

    #[test]
    fn test_missing_serializer_is_error_level() {
        let err = UploadErrorKind::MissingSerializer.in_stage(UploadStage::Upload);
        assert_eq!(err.log_level(), LogLevel::Error);
        assert!(!err.is_recoverable());
    }
}
