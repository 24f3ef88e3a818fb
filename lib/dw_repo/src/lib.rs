//! This crate provides the program representation used by the `DroidNav`
//! analyses: classes, methods and their hierarchy, loaded from serialized
//! program models.

pub mod errors;
pub mod hierarchy;
pub mod model;
pub mod repo;
pub mod types;

pub use model::open;
