//! GUI facts computed upstream and consumed by the graph builder.
//!
//! ```json
//! {
//!   "main_activity": { "kind": "activity", "class": "com/example/Main" },
//!   "windows": [
//!     { "window": { "kind": "activity", "class": "com/example/Detail" },
//!       "callbacks": ["com/example/Detail->onCreate(Landroid/os/Bundle;)V"] }
//!   ],
//!   "registrations": [
//!     { "window": { "kind": "activity", "class": "com/example/Main" },
//!       "listener": "android/view/View$OnClickListener",
//!       "source": { "kind": "variable", "name": "r1", "type": "Lcom/example/MyListener;" } }
//!   ],
//!   "handlers": [
//!     { "method": "com/example/MyListener->onClick(Landroid/view/View;)V",
//!       "targets": [ { "kind": "activity", "class": "com/example/Detail" } ],
//!       "stack_ops": [ { "push": { "kind": "activity", "class": "com/example/Detail" } } ] }
//!   ]
//! }
//! ```

use crate::errors::GuiResult;
use crate::event::EventType;
use crate::window::Window;
use crate::wtg::StackOperation;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct GuiFacts {
    #[serde(default)]
    pub main_activity: Option<Window>,
    #[serde(default)]
    pub windows: Vec<WindowFacts>,
    /// Listener interfaces completing the builtin table.
    #[serde(default)]
    pub listeners: Vec<ListenerModel>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub handlers: Vec<HandlerFacts>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowFacts {
    pub window: Window,
    /// Lifecycle callbacks run when the window is shown, in order.
    #[serde(default)]
    pub callbacks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerModel {
    pub interface: String,
    pub event: EventType,
    pub prototypes: Vec<String>,
}

/// Where the candidate runtime types of a registered listener come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListenerSource {
    /// All subtypes of a declared class or interface.
    Interface { class: String },
    /// All subtypes of the static type of a variable.
    Variable {
        name: String,
        #[serde(rename = "type")]
        type_: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub window: Window,
    /// Listener interface, selecting the event type and handler prototypes.
    pub listener: String,
    /// Defaults to the listener interface itself.
    #[serde(default)]
    pub source: Option<ListenerSource>,
    #[serde(default)]
    pub inline_handlers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackFacts {
    pub window: Window,
    pub method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerFacts {
    pub method: String,
    #[serde(default)]
    pub targets: Vec<Window>,
    #[serde(default)]
    pub stack_ops: Vec<StackOperation>,
    #[serde(default)]
    pub callbacks: Vec<CallbackFacts>,
}

impl GuiFacts {
    pub fn from_json(s: &str) -> GuiResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Reads gui facts from a json file.
pub fn open<P: AsRef<Path>>(path: P) -> GuiResult<GuiFacts> {
    let file = File::open(path.as_ref())?;
    let facts = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("gui facts {:?} loaded", path.as_ref());
    Ok(facts)
}
