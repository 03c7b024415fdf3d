//! Data models for the upload client
//!
//! API resources (videos, users), the settings value applied after an upload,
//! and the descriptor type every request builder produces.

mod request;
mod settings;
mod user;
mod video;

// Re-export all models for convenient imports
pub use request::*;
pub use settings::*;
pub use user::*;
pub use video::*;
