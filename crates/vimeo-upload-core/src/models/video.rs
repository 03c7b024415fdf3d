use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Mechanism a video advertises for receiving uploaded bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadApproach {
    /// Single PUT of the whole file to `upload_link`
    Streaming,
    /// Resumable chunked upload
    Tus,
    /// Browser form POST
    Post,
    /// Vimeo fetches the file from a public URL
    Pull,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Display for UploadApproach {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadApproach::Streaming => write!(f, "streaming"),
            UploadApproach::Tus => write!(f, "tus"),
            UploadApproach::Post => write!(f, "post"),
            UploadApproach::Pull => write!(f, "pull"),
            UploadApproach::Unknown => write!(f, "unknown"),
        }
    }
}

fn approach_or_unknown<'de, D>(deserializer: D) -> Result<UploadApproach, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<UploadApproach>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Upload affordances of a video resource.
///
/// `upload_link` is only meaningful together with `approach`: a link handed
/// out for one approach cannot be used with another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoUpload {
    #[serde(default, deserialize_with = "approach_or_unknown")]
    pub approach: UploadApproach,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Video resource as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<VideoUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedIdError {
    #[error("Video has no link")]
    MissingLink,
    #[error("Video link has no path segment: {0}")]
    NoPathSegment(String),
    #[error("Video link ends with an empty path segment: {0}")]
    EmptyId(String),
}

impl Video {
    /// Upload approach, `Unknown` when the video carries no upload object.
    pub fn upload_approach(&self) -> UploadApproach {
        self.upload
            .as_ref()
            .map(|upload| upload.approach)
            .unwrap_or_default()
    }

    pub fn upload_link(&self) -> Option<&str> {
        self.upload.as_ref()?.upload_link.as_deref()
    }

    pub fn complete_uri(&self) -> Option<&str> {
        self.upload.as_ref()?.complete_uri.as_deref()
    }

    /// Canonical video id: the trailing path segment of `link`.
    pub fn embed_id(&self) -> Result<&str, EmbedIdError> {
        let link = self.link.as_deref().ok_or(EmbedIdError::MissingLink)?;
        let path = link.split(['?', '#']).next().unwrap_or(link);
        let (_, id) = path
            .rsplit_once('/')
            .ok_or_else(|| EmbedIdError::NoPathSegment(link.to_string()))?;
        if id.is_empty() {
            return Err(EmbedIdError::EmptyId(link.to_string()));
        }
        Ok(id)
    }

    /// Embeddable player URL for this video.
    pub fn player_url(&self, player_base_url: &str) -> Result<String, EmbedIdError> {
        Ok(player_embed_url(player_base_url, self.embed_id()?))
    }
}

/// Player embed URL for a video id, with the byline hidden.
pub fn player_embed_url(player_base_url: &str, embed_id: &str) -> String {
    format!(
        "{}/{}?byline=false",
        player_base_url.trim_end_matches('/'),
        embed_id
    )
}

/// One page of `GET /me/videos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub per_page: u64,
    #[serde(default)]
    pub data: Vec<Video>,
}
