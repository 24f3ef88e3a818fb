//! Window identities.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    /// Synthetic entry point of the application.
    Launcher,
    Activity,
    Dialog,
    OptionsMenu,
    ContextMenu,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Launcher => write!(f, "LAUNCHER"),
            Self::Activity => write!(f, "ACT"),
            Self::Dialog => write!(f, "DIALOG"),
            Self::OptionsMenu => write!(f, "OMENU"),
            Self::ContextMenu => write!(f, "CMENU"),
        }
    }
}

/// A static identity for one UI screen: its kind and the class
/// implementing it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Window {
    kind: WindowKind,
    #[serde(default)]
    class: String,
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            WindowKind::Launcher => write!(f, "{}", self.kind),
            _ => write!(f, "{}[{}]", self.kind, self.class),
        }
    }
}

impl Window {
    #[must_use]
    pub fn new(kind: WindowKind, class: &str) -> Self {
        Self {
            kind,
            class: class.to_string(),
        }
    }

    #[must_use]
    pub fn launcher() -> Self {
        Self::new(WindowKind::Launcher, "")
    }

    #[must_use]
    pub fn activity(class: &str) -> Self {
        Self::new(WindowKind::Activity, class)
    }

    #[must_use]
    pub fn dialog(class: &str) -> Self {
        Self::new(WindowKind::Dialog, class)
    }

    #[inline]
    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    #[inline]
    pub fn class_name(&self) -> &str {
        &self.class
    }

    #[inline]
    pub fn is_launcher(&self) -> bool {
        self.kind == WindowKind::Launcher
    }

    #[inline]
    pub fn is_activity(&self) -> bool {
        self.kind == WindowKind::Activity
    }

    /// The launcher is the only window without class; other windows must
    /// carry a valid dex class name (`com/example/Main`).
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.is_launcher() {
            return self.class.is_empty();
        }
        !self.class.is_empty()
            && !self.class.starts_with('/')
            && !self.class.ends_with('/')
            && !self
                .class
                .chars()
                .any(|c| c == ';' || c == '[' || c == '.' || c.is_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_windows() {
        assert!(Window::launcher().is_well_formed());
        assert!(Window::activity("com/example/Main").is_well_formed());
        assert!(Window::dialog("com/example/Main$1").is_well_formed());
        assert!(!Window::activity("").is_well_formed());
        assert!(!Window::activity("com.example.Main").is_well_formed());
        assert!(!Window::activity("Lcom/example/Main;").is_well_formed());
        assert!(!Window::new(WindowKind::Launcher, "com/example/Main").is_well_formed());
    }

    #[test]
    fn display() {
        assert_eq!(Window::launcher().to_string(), "LAUNCHER");
        assert_eq!(Window::activity("a/Main").to_string(), "ACT[a/Main]");
        assert_eq!(
            Window::new(WindowKind::OptionsMenu, "a/Main").to_string(),
            "OMENU[a/Main]"
        );
    }

    #[test]
    fn deserialize() {
        let w: Window = serde_json::from_str(r#"{ "kind": "context-menu", "class": "a/Main" }"#).unwrap();
        assert_eq!(w, Window::new(WindowKind::ContextMenu, "a/Main"));
        let l: Window = serde_json::from_str(r#"{ "kind": "launcher" }"#).unwrap();
        assert!(l.is_launcher());
    }
}
