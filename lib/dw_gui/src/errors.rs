//! GUI analysis errors definition.

use crate::window::Window;
use dw_repo::errors::RepoError;
use std::io;
use thiserror::Error;

pub type GuiResult<T> = Result<T, GuiError>;

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("io error: {0}")]
    IO(#[from] io::Error),

    #[error("invalid gui facts: {0}")]
    Json(#[from] serde_json::Error),

    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("declared type of variable '{0}' is not a class type: {1}")]
    NotAClassType(String, String),

    #[error("unknown listener interface: {0}")]
    UnknownListener(String),

    #[error("malformed window identity: {0:?}")]
    MalformedWindow(Window),

    #[error("launcher node already set to {0}")]
    LauncherAlreadySet(Window),

    #[error("no main activity to launch")]
    MissingLauncher,

    #[error("transition from {0} toward the launcher")]
    TransitionToLauncher(Window),
}
