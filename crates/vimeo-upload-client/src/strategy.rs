//! Upload strategies.
//!
//! A strategy decides whether a video can be uploaded the way it works and,
//! if so, builds the byte-upload request. New approaches (e.g. resumable
//! chunked uploads) are added as sibling implementations of `UploadStrategy`
//! without touching the request serializer.

use std::path::Path;
use vimeo_upload_core::models::{RequestDescriptor, UploadApproach, Video};
use vimeo_upload_core::{UploadErrorKind, UploadLinkError, UploadResult, UploadStage};

use crate::serializer::RequestSerializer;

pub trait UploadStrategy {
    /// Upload approach handled by this strategy.
    const APPROACH: UploadApproach;

    /// Upload link for `video`.
    ///
    /// Fails with `WrongType` when the video advertises another approach and
    /// with `Unavailable` when the approach matches but no link is present.
    fn upload_link(video: &Video) -> Result<String, UploadLinkError> {
        if video.upload_approach() != Self::APPROACH {
            return Err(UploadLinkError::WrongType);
        }

        match video.upload_link() {
            Some(link) if !link.is_empty() => Ok(link.to_string()),
            _ => Err(UploadLinkError::Unavailable),
        }
    }

    /// Request sending the bytes at `file` to `upload_link`.
    fn upload_request(
        serializer: Option<&RequestSerializer>,
        file: &Path,
        upload_link: &str,
    ) -> UploadResult<RequestDescriptor>;
}

/// Single `PUT` of the whole file to the video's streaming upload link.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingUploadStrategy;

impl UploadStrategy for StreamingUploadStrategy {
    const APPROACH: UploadApproach = UploadApproach::Streaming;

    fn upload_request(
        serializer: Option<&RequestSerializer>,
        file: &Path,
        upload_link: &str,
    ) -> UploadResult<RequestDescriptor> {
        let serializer = serializer
            .ok_or_else(|| UploadErrorKind::MissingSerializer.in_stage(UploadStage::Upload))?;

        serializer.upload_video_request(file, upload_link)
    }
}
