use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of UI events that may trigger a window transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Click,
    LongClick,
    ItemClick,
    ItemLongClick,
    ItemSelected,
    Touch,
    Key,
    Scroll,
    Drag,
    FocusChange,
    EditorAction,
    CheckChange,
    TextChange,
    MenuItemClick,
    DialogClick,
    DialogCancel,
    DialogDismiss,
    DialogKey,
    ImplicitLaunch,
    ImplicitBack,
    ImplicitRotate,
    ImplicitHome,
    ImplicitLifecycle,
}

impl EventType {
    /// Implicit events are not triggered through a widget listener.
    #[must_use]
    pub const fn is_implicit(self) -> bool {
        matches!(
            self,
            Self::ImplicitLaunch
                | Self::ImplicitBack
                | Self::ImplicitRotate
                | Self::ImplicitHome
                | Self::ImplicitLifecycle
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::LongClick => "long_click",
            Self::ItemClick => "item_click",
            Self::ItemLongClick => "item_long_click",
            Self::ItemSelected => "item_selected",
            Self::Touch => "touch",
            Self::Key => "key",
            Self::Scroll => "scroll",
            Self::Drag => "drag",
            Self::FocusChange => "focus_change",
            Self::EditorAction => "editor_action",
            Self::CheckChange => "check_change",
            Self::TextChange => "text_change",
            Self::MenuItemClick => "menu_item_click",
            Self::DialogClick => "dialog_click",
            Self::DialogCancel => "dialog_cancel",
            Self::DialogDismiss => "dialog_dismiss",
            Self::DialogKey => "dialog_key",
            Self::ImplicitLaunch => "implicit_launch",
            Self::ImplicitBack => "implicit_back",
            Self::ImplicitRotate => "implicit_rotate",
            Self::ImplicitHome => "implicit_home",
            Self::ImplicitLifecycle => "implicit_lifecycle",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_display() {
        for event in [EventType::Click, EventType::ItemLongClick, EventType::ImplicitBack] {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{event}\""));
        }
        assert!(EventType::ImplicitLaunch.is_implicit());
        assert!(!EventType::DialogClick.is_implicit());
    }
}
