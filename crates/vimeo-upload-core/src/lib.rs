//! Vimeo Upload Core Library
//!
//! This crate provides the domain models, error types and configuration
//! shared by the upload client and the command-line front end.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, EndpointMethods};
pub use error::{
    ErrorMetadata, LogLevel, UploadError, UploadErrorKind, UploadLinkError, UploadResult,
    UploadStage,
};
