//! Listener registrations and the resolution of their event handlers.

mod instance;
mod resolver;
mod specification;

pub use instance::{ListenerInstance, VarNode};
pub use resolver::Resolver;
pub use specification::{ListenerEntry, ListenerSpecification, ListenerTypes};
