//! Listener interfaces known to the analysis, with their event types and
//! handler prototypes.

use crate::errors::GuiResult;
use crate::event::EventType;
use crate::facts::ListenerModel;
use crate::oracle::{ListenerTypeOracle, ProgramOracle};
use dw_repo::repo::ClassUid;
use dw_repo::types::SubSignature;
use lazy_static::lazy_static;
use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

const ANDROID_TABLE: &[(&str, EventType, &[&str])] = &[
    (
        "android/view/View$OnClickListener",
        EventType::Click,
        &["onClick(Landroid/view/View;)V"],
    ),
    (
        "android/view/View$OnLongClickListener",
        EventType::LongClick,
        &["onLongClick(Landroid/view/View;)Z"],
    ),
    (
        "android/view/View$OnTouchListener",
        EventType::Touch,
        &["onTouch(Landroid/view/View;Landroid/view/MotionEvent;)Z"],
    ),
    (
        "android/view/View$OnKeyListener",
        EventType::Key,
        &["onKey(Landroid/view/View;ILandroid/view/KeyEvent;)Z"],
    ),
    (
        "android/view/View$OnFocusChangeListener",
        EventType::FocusChange,
        &["onFocusChange(Landroid/view/View;Z)V"],
    ),
    (
        "android/view/View$OnDragListener",
        EventType::Drag,
        &["onDrag(Landroid/view/View;Landroid/view/DragEvent;)Z"],
    ),
    (
        "android/widget/AdapterView$OnItemClickListener",
        EventType::ItemClick,
        &["onItemClick(Landroid/widget/AdapterView;Landroid/view/View;IJ)V"],
    ),
    (
        "android/widget/AdapterView$OnItemLongClickListener",
        EventType::ItemLongClick,
        &["onItemLongClick(Landroid/widget/AdapterView;Landroid/view/View;IJ)Z"],
    ),
    (
        "android/widget/AdapterView$OnItemSelectedListener",
        EventType::ItemSelected,
        &[
            "onItemSelected(Landroid/widget/AdapterView;Landroid/view/View;IJ)V",
            "onNothingSelected(Landroid/widget/AdapterView;)V",
        ],
    ),
    (
        "android/widget/AbsListView$OnScrollListener",
        EventType::Scroll,
        &[
            "onScroll(Landroid/widget/AbsListView;III)V",
            "onScrollStateChanged(Landroid/widget/AbsListView;I)V",
        ],
    ),
    (
        "android/widget/TextView$OnEditorActionListener",
        EventType::EditorAction,
        &["onEditorAction(Landroid/widget/TextView;ILandroid/view/KeyEvent;)Z"],
    ),
    (
        "android/widget/CompoundButton$OnCheckedChangeListener",
        EventType::CheckChange,
        &["onCheckedChanged(Landroid/widget/CompoundButton;Z)V"],
    ),
    (
        "android/text/TextWatcher",
        EventType::TextChange,
        &[
            "afterTextChanged(Landroid/text/Editable;)V",
            "beforeTextChanged(Ljava/lang/CharSequence;III)V",
            "onTextChanged(Ljava/lang/CharSequence;III)V",
        ],
    ),
    (
        "android/view/MenuItem$OnMenuItemClickListener",
        EventType::MenuItemClick,
        &["onMenuItemClick(Landroid/view/MenuItem;)Z"],
    ),
    (
        "android/content/DialogInterface$OnClickListener",
        EventType::DialogClick,
        &["onClick(Landroid/content/DialogInterface;I)V"],
    ),
    (
        "android/content/DialogInterface$OnCancelListener",
        EventType::DialogCancel,
        &["onCancel(Landroid/content/DialogInterface;)V"],
    ),
    (
        "android/content/DialogInterface$OnDismissListener",
        EventType::DialogDismiss,
        &["onDismiss(Landroid/content/DialogInterface;)V"],
    ),
    (
        "android/content/DialogInterface$OnKeyListener",
        EventType::DialogKey,
        &["onKey(Landroid/content/DialogInterface;ILandroid/view/KeyEvent;)Z"],
    ),
];

lazy_static! {
    static ref ANDROID_LISTENERS: ListenerSpecification = {
        let mut listeners = ListenerSpecification::new();
        for (interface, event_type, prototypes) in ANDROID_TABLE {
            listeners.register(interface, *event_type, prototypes.iter().copied())
                .expect("invalid builtin listener prototype");
        }
        listeners
    };
}

#[derive(Debug, Clone)]
pub struct ListenerEntry {
    event_type: EventType,
    prototypes: BTreeSet<SubSignature>,
}

impl ListenerEntry {
    #[inline]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    #[inline]
    pub fn prototypes(&self) -> &BTreeSet<SubSignature> {
        &self.prototypes
    }
}

/// Listener interfaces table, keyed by interface class name.
#[derive(Debug, Clone, Default)]
pub struct ListenerSpecification {
    entries: BTreeMap<String, ListenerEntry>,
}

impl ListenerSpecification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin table of Android framework listener interfaces.
    #[must_use]
    pub fn android() -> Self {
        ANDROID_LISTENERS.clone()
    }

    /// Adds (or completes) the entry of a listener interface.
    pub fn register<'s, I>(&mut self, interface: &str, event_type: EventType, prototypes: I) -> GuiResult<()>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let prototypes = prototypes
            .into_iter()
            .map(SubSignature::try_from)
            .collect::<Result<BTreeSet<_>, _>>()?;
        let entry = self
            .entries
            .entry(interface.to_string())
            .or_insert_with(|| ListenerEntry {
                event_type,
                prototypes: BTreeSet::new(),
            });
        if entry.event_type != event_type {
            log::warn!(
                "listener {} event type changed from {} to {}",
                interface,
                entry.event_type,
                event_type
            );
            entry.event_type = event_type;
        }
        entry.prototypes.extend(prototypes);
        Ok(())
    }

    pub fn register_models(&mut self, models: &[ListenerModel]) -> GuiResult<()> {
        for model in models {
            self.register(
                &model.interface,
                model.event,
                model.prototypes.iter().map(String::as_str),
            )?;
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, interface: &str) -> Option<&ListenerEntry> {
        self.entries.get(interface)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ListenerEntry)> {
        self.entries
            .iter()
            .map(|(interface, entry)| (interface.as_str(), entry))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes the set of classes implementing one of the known listener
    /// interfaces in the given program.
    #[must_use]
    pub fn listener_types(&self, program: &dyn ProgramOracle) -> ListenerTypes {
        let mut classes = BTreeSet::new();
        for interface in self.entries.keys() {
            match program.class_by_name(interface) {
                Some(uid) => classes.extend(program.subtypes_of(uid)),
                None => log::trace!("listener interface {} not referenced by program", interface),
            }
        }
        ListenerTypes(classes)
    }
}

/// The classes recognized as listener implementations.
#[derive(Debug, Clone, Default)]
pub struct ListenerTypes(BTreeSet<ClassUid>);

impl From<BTreeSet<ClassUid>> for ListenerTypes {
    fn from(classes: BTreeSet<ClassUid>) -> Self {
        Self(classes)
    }
}

impl ListenerTypes {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ListenerTypeOracle for ListenerTypes {
    fn is_listener_type(&self, class: ClassUid) -> bool {
        self.0.contains(&class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn builtin_table() {
        let listeners = ListenerSpecification::android();
        assert_eq!(listeners.len(), ANDROID_TABLE.len());
        let entry = listeners.get(ON_CLICK_LISTENER).unwrap();
        assert_eq!(entry.event_type(), EventType::Click);
        assert!(entry
            .prototypes()
            .contains(&SubSignature::try_from(ON_CLICK).unwrap()));
        assert_eq!(
            listeners.get("android/text/TextWatcher").unwrap().prototypes().len(),
            3
        );
    }

    #[test]
    fn register_completes_entries() {
        let mut listeners = ListenerSpecification::new();
        listeners.register("a/Listener", EventType::Click, ["onA()V"]).unwrap();
        listeners.register("a/Listener", EventType::Click, ["onB()V", "onA()V"]).unwrap();
        assert_eq!(listeners.get("a/Listener").unwrap().prototypes().len(), 2);
        assert!(listeners.register("a/Other", EventType::Key, ["onA("]).is_err());
        assert!(listeners.get("a/Other").is_none());
    }

    #[test]
    fn listener_types_of_program() {
        let repo = fixture_repo(
            vec![on_click_listener()],
            vec![
                class("a/Impl", None, &[ON_CLICK_LISTENER], &[ON_CLICK]),
                class("a/Sub", Some("a/Impl"), &[], &[]),
                class("a/Other", None, &[], &[ON_CLICK]),
            ],
        );
        let types = ListenerSpecification::android().listener_types(&repo);
        let uid = |name: &str| repo.get_class_by_name(name).unwrap().uid();
        assert!(types.is_listener_type(uid("a/Impl")));
        assert!(types.is_listener_type(uid("a/Sub")));
        assert!(!types.is_listener_type(uid("a/Other")));
    }
}
