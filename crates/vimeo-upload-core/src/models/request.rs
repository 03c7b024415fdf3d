use http::Method;
use serde_json::{Map, Value as JsonValue};
use std::path::PathBuf;
use url::Url;

/// Where the bytes of a request body come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Body (or query string, for GET) encoded from `RequestDescriptor::parameters`
    Parameters,
    /// Raw bytes of a local file, read when the request is sent
    File(PathBuf),
}

/// A fully formed outbound request. Built fresh for every call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub parameters: Map<String, JsonValue>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            parameters: Map::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_parameters(mut self, parameters: Map<String, JsonValue>) -> Self {
        if !parameters.is_empty() {
            self.body = RequestBody::Parameters;
        }
        self.parameters = parameters;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_file_body(mut self, path: impl Into<PathBuf>) -> Self {
        self.body = RequestBody::File(path.into());
        self
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url() -> Url {
        Url::parse("https://api.vimeo.com/me").unwrap()
    }

    #[test]
    fn test_new_descriptor_is_empty() {
        let request = RequestDescriptor::new(Method::GET, url());
        assert!(request.parameters.is_empty());
        assert!(request.headers.is_empty());
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[test]
    fn test_empty_parameters_keep_empty_body() {
        let request = RequestDescriptor::new(Method::POST, url()).with_parameters(Map::new());
        assert_eq!(request.body, RequestBody::Empty);

        let mut params = Map::new();
        params.insert("type".to_string(), json!("streaming"));
        let request = RequestDescriptor::new(Method::POST, url()).with_parameters(params);
        assert_eq!(request.body, RequestBody::Parameters);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = RequestDescriptor::new(Method::PUT, url())
            .with_header("Content-Type", "video/mp4")
            .with_file_body("/tmp/clip.mp4");
        assert_eq!(request.header("content-type"), Some("video/mp4"));
        assert_eq!(request.header("Content-Length"), None);
        assert_eq!(request.body, RequestBody::File(PathBuf::from("/tmp/clip.mp4")));
    }
}
