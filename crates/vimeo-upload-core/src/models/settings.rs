use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Who can view a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyView {
    Anybody,
    Nobody,
    Contacts,
    Password,
    Unlisted,
    Disable,
}

impl Display for PrivacyView {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PrivacyView::Anybody => write!(f, "anybody"),
            PrivacyView::Nobody => write!(f, "nobody"),
            PrivacyView::Contacts => write!(f, "contacts"),
            PrivacyView::Password => write!(f, "password"),
            PrivacyView::Unlisted => write!(f, "unlisted"),
            PrivacyView::Disable => write!(f, "disable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown privacy view: {0}")]
pub struct ParsePrivacyViewError(String);

impl FromStr for PrivacyView {
    type Err = ParsePrivacyViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anybody" => Ok(PrivacyView::Anybody),
            "nobody" => Ok(PrivacyView::Nobody),
            "contacts" => Ok(PrivacyView::Contacts),
            "password" => Ok(PrivacyView::Password),
            "unlisted" => Ok(PrivacyView::Unlisted),
            "disable" => Ok(PrivacyView::Disable),
            _ => Err(ParsePrivacyViewError(s.to_string())),
        }
    }
}

/// Settings applied to a video once its bytes are uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSettings {
    pub title: Option<String>,
    pub description: Option<String>,
    pub privacy: Option<PrivacyView>,
    pub password: Option<String>,
}

impl VideoSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_privacy(mut self, privacy: PrivacyView) -> Self {
        self.privacy = Some(privacy);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Parameter mapping for `PATCH {video_uri}`. Unset and empty fields are omitted.
    pub fn parameters(&self) -> Map<String, JsonValue> {
        let mut params = Map::new();

        if let Some(title) = non_empty(&self.title) {
            params.insert("name".to_string(), json!(title));
        }
        if let Some(description) = non_empty(&self.description) {
            params.insert("description".to_string(), json!(description));
        }
        if let Some(privacy) = self.privacy {
            params.insert("privacy".to_string(), json!({ "view": privacy }));
        }
        if let Some(password) = non_empty(&self.password) {
            params.insert("password".to_string(), json!(password));
        }

        params
    }

    pub fn is_empty(&self) -> bool {
        self.parameters().is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
