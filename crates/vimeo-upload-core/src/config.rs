//! Configuration module
//!
//! Client configuration: the base locator every relative API path is resolved
//! against, credentials, the API version requested through the Accept header,
//! and the HTTP method used by endpoints whose verb is configurable.

use anyhow::{bail, Context};
use http::Method;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.vimeo.com";
pub const DEFAULT_PLAYER_URL: &str = "https://player.vimeo.com/video/";
const DEFAULT_API_VERSION: &str = "3.4";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP methods for endpoints whose verb is not fixed by the API contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointMethods {
    pub activate: Method,
}

impl Default for EndpointMethods {
    fn default() -> Self {
        Self {
            activate: Method::DELETE,
        }
    }
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub access_token: Option<String>,
    pub player_base_url: String,
    pub timeout_secs: u64,
    pub api_version: String,
    pub methods: EndpointMethods,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            access_token: None,
            player_base_url: DEFAULT_PLAYER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_version: DEFAULT_API_VERSION.to_string(),
            methods: EndpointMethods::default(),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Load configuration from environment:
    /// VIMEO_API_URL, VIMEO_ACCESS_TOKEN, VIMEO_PLAYER_URL, VIMEO_TIMEOUT_SECS,
    /// VIMEO_API_VERSION, VIMEO_ACTIVATE_METHOD.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("VIMEO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("VIMEO_API_URL is not a valid URL: {}", base_url))?;

        let mut config = Self::new(base_url);
        config.access_token = lookup("VIMEO_ACCESS_TOKEN").filter(|t| !t.is_empty());

        if let Some(player) = lookup("VIMEO_PLAYER_URL") {
            config.player_base_url = player;
        }
        if let Some(timeout) = lookup("VIMEO_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse()
                .with_context(|| format!("VIMEO_TIMEOUT_SECS must be an integer: {}", timeout))?;
        }
        if let Some(version) = lookup("VIMEO_API_VERSION") {
            config.api_version = version;
        }
        if let Some(method) = lookup("VIMEO_ACTIVATE_METHOD") {
            config.methods.activate = parse_endpoint_method(&method)?;
        }

        Ok(config)
    }

    /// Reject configurations that could never produce a usable request.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            bail!(
                "Base URL must use http or https, got '{}'",
                self.base_url.scheme()
            );
        }
        if self.timeout_secs == 0 {
            bail!("Timeout must be greater than 0 seconds");
        }
        if self.api_version.trim().is_empty() {
            bail!("API version must not be empty");
        }
        Ok(())
    }

    /// Accept header value selecting the configured API version.
    pub fn accept_header(&self) -> String {
        format!("application/vnd.vimeo.*+json;version={}", self.api_version)
    }
}

fn parse_endpoint_method(value: &str) -> Result<Method, anyhow::Error> {
    match value.trim().to_ascii_uppercase().as_str() {
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        other => bail!("Unsupported endpoint method: {}", other),
    }
}
