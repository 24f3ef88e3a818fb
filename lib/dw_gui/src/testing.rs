//! In-memory hierarchies shared by unit tests.

use crate::event::EventType;
use crate::listener::ListenerSpecification;
use dw_repo::model::{ClassModel, MethodModel, ProgramModel};
use dw_repo::repo::{MethodUid, Repo};
use dw_repo::types::{MethodDescr, SubSignature};
use std::collections::BTreeSet;
use std::convert::TryFrom;

pub(crate) const ON_CLICK_LISTENER: &str = "android/view/View$OnClickListener";
pub(crate) const ON_CLICK: &str = "onClick(Landroid/view/View;)V";

pub(crate) fn concrete_method(signature: &str) -> MethodModel {
    MethodModel {
        signature: signature.to_string(),
        is_abstract: false,
        native: false,
    }
}

pub(crate) fn abstract_method(signature: &str) -> MethodModel {
    MethodModel {
        signature: signature.to_string(),
        is_abstract: true,
        native: false,
    }
}

pub(crate) fn class(
    name: &str,
    superclass: Option<&str>,
    interfaces: &[&str],
    methods: &[&str],
) -> ClassModel {
    ClassModel {
        name: name.to_string(),
        superclass: superclass.map(str::to_string),
        interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
        interface: false,
        methods: methods.iter().map(|s| concrete_method(s)).collect(),
    }
}

pub(crate) fn on_click_listener() -> ClassModel {
    ClassModel {
        name: ON_CLICK_LISTENER.to_string(),
        superclass: None,
        interfaces: Vec::new(),
        interface: true,
        methods: vec![abstract_method(ON_CLICK)],
    }
}

/// Builds a closed repository from system and application classes.
pub(crate) fn fixture_repo(system: Vec<ClassModel>, application: Vec<ClassModel>) -> Repo {
    let mut repo = Repo::new();
    repo.register_model(&ProgramModel { classes: system }, true)
        .unwrap();
    repo.register_model(&ProgramModel { classes: application }, false)
        .unwrap();
    repo.close_hierarchy().unwrap();
    repo
}

pub(crate) fn find_method(repo: &Repo, descr: &str) -> MethodUid {
    let descr = MethodDescr::try_from(descr).unwrap();
    repo.find_method_by_descriptor(&descr).unwrap().uid()
}

pub(crate) fn on_click_prototypes() -> BTreeSet<SubSignature> {
    [SubSignature::try_from(ON_CLICK).unwrap()]
        .into_iter()
        .collect()
}

pub(crate) fn on_click_specification() -> ListenerSpecification {
    let mut listeners = ListenerSpecification::new();
    listeners.register(ON_CLICK_LISTENER, EventType::Click, [ON_CLICK])
        .unwrap();
    listeners
}
