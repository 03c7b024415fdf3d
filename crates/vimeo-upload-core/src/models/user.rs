use serde::{Deserialize, Serialize};

/// Account returned by `GET /me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uri: String,
    pub name: Option<String>,
    pub link: Option<String>,
    pub account: Option<String>,
}
