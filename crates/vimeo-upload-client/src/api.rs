//! Domain methods for the Vimeo client.

use std::path::Path;
use tracing::info;
use vimeo_upload_core::models::{User, Video, VideoPage, VideoSettings};
use vimeo_upload_core::{UploadResult, UploadStage};

use crate::operation::{UploadOperation, UploadOutcome};
use crate::transport::{decode_body, send_checked, Transport};
use crate::VimeoClient;

impl<T: Transport> VimeoClient<T> {
    /// Fetch the authenticated account.
    pub async fn me(&self) -> UploadResult<User> {
        let request = self.serializer().me_request()?;
        let response = send_checked(self.transport(), UploadStage::Me, &request).await?;
        decode_body(UploadStage::Me, response)
    }

    /// List the authenticated account's videos (first page).
    pub async fn my_videos(&self) -> UploadResult<VideoPage> {
        let request = self.serializer().my_videos_request()?;
        let response = send_checked(self.transport(), UploadStage::MyVideos, &request).await?;
        decode_body(UploadStage::MyVideos, response)
    }

    /// Upload a local file and apply `settings` to the new video.
    pub async fn upload(&self, file: &Path, settings: &VideoSettings) -> UploadResult<UploadOutcome> {
        UploadOperation::new(self.serializer(), self.transport())
            .run(file, settings)
            .await
    }

    /// Apply settings to an existing video and return the updated resource.
    pub async fn update_settings(
        &self,
        video_uri: &str,
        settings: &VideoSettings,
    ) -> UploadResult<Video> {
        let request = self.serializer().video_settings_request(video_uri, settings)?;
        let response =
            send_checked(self.transport(), UploadStage::VideoSettings, &request).await?;
        decode_body(UploadStage::VideoSettings, response)
    }

    /// Delete a video.
    pub async fn delete_video(&self, video_uri: &str) -> UploadResult<()> {
        let request = self.serializer().delete_video_request(video_uri)?;
        send_checked(self.transport(), UploadStage::Delete, &request).await?;
        info!(video_uri, "Video deleted");
        Ok(())
    }
}
