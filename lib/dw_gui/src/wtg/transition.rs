use crate::window::Window;
use dw_repo::repo::MethodUid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated effect of a handler on the activity back stack.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOperation {
    Push(Window),
    Pop(Window),
}

impl fmt::Display for StackOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Push(w) => write!(f, "PUSH {w}"),
            Self::Pop(w) => write!(f, "POP {w}"),
        }
    }
}

impl StackOperation {
    #[inline]
    #[must_use]
    pub fn is_push_op(&self) -> bool {
        matches!(self, Self::Push(_))
    }

    #[inline]
    pub fn window(&self) -> &Window {
        match self {
            Self::Push(w) | Self::Pop(w) => w,
        }
    }
}

/// Lifecycle callback run on a window as part of a transition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Callback {
    window: Window,
    handler: MethodUid,
}

impl Callback {
    #[must_use]
    pub fn new(window: Window, handler: MethodUid) -> Self {
        Self { window, handler }
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn event_handler(&self) -> MethodUid {
        self.handler
    }
}
