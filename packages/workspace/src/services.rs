//! External services the editor calls out to.
//!
//! Text generation and image hosting are black boxes behind these traits.
//! Their failures are reported to the user and never reach the tree.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Content generation failed: {0}")]
    GenerationFailed(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),
}

/// AI text generation
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Alternatives for an existing headline
    async fn alternative_headlines(&self, existing: &str) -> Result<Vec<String>, ServiceError>;

    /// A paragraph of copy about `topic`
    async fn text_block(&self, topic: &str) -> Result<String, ServiceError>;
}

/// Image hosting
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Upload `bytes` and return the public URL
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ServiceError>;
}
