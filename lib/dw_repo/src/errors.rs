//! Repository errors definition.

use std::io;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("io error: {0}")]
    IO(#[from] io::Error),

    #[error("invalid program model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("duplicate class in hierarchy graph: {0}")]
    DuplicateClass(String),

    #[error("invalid type descriptor: {0:?}")]
    InvalidType(String),

    #[error("invalid method descriptor: {0:?}")]
    InvalidDescriptor(String),
}
