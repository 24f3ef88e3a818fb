//! Window transition graph (WTG).

mod builder;
mod graph;
mod transition;

pub use builder::{WtgBuilder, WtgOptions};
pub use graph::{Edge, EdgeId, Node, NodeId, Wtg, WtgEdge, WtgNode};
pub use transition::{Callback, StackOperation};
