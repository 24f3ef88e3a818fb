//! Global error handling.
//!
//! Each sub-crate of the project defines its own type error.
//! Their types can be unified, for example in a main function,
//! when winding results at the top-level.
//!
//! ```rust,no_run
//! use droidnav::prelude::*;
//!
//! fn main() -> DwResult<()> { // can return a DwError
//!    let _model = droidnav::repo::open("app.json")?; // can return a RepoError
//!    Ok(())
//! }
//! ```

use dw_gui::errors::GuiError;
use dw_repo::errors::RepoError;
use std::io;
use thiserror::Error;

/// An alias for result that can be a [`DwError`].
pub type DwResult<T> = Result<T, DwError>;

/// The main error type for error winding at the top-level.
/// It mainly consists of transparent wrapper over error types that
/// are defined in dependencies.
#[derive(Debug, Error)]
pub enum DwError {
    /// Custom error for reporting bad command line arguments usage.
    #[error("bad arguments: {0}")]
    BadArguments(String),

    /// Error that can be returned from [I/O operations](std::io).
    #[error(transparent)]
    IO(#[from] io::Error),

    /// Error that can be returned from regex compilation.
    #[error(transparent)]
    Regex(#[from] regex::Error),

    /// Error that can be returned from json (de)serialization.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Error that can be returned from [`dw_repo`] functions.
    #[error(transparent)]
    Repo(#[from] RepoError),

    /// Error that can be returned from [`dw_gui`] functions.
    #[error(transparent)]
    Gui(#[from] GuiError),
}
