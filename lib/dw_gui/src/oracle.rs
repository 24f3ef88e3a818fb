//! Read-only queries the GUI analyses need from the program representation.
//!
//! Both oracles are injected (never global) so that resolution and graph
//! construction can run against any hierarchy, including test fixtures.
//! They are `Sync` because listener sites are resolved in parallel.

use dw_repo::repo::{ClassUid, MethodUid, Repo};
use dw_repo::types::{MethodDescr, SubSignature};
use std::collections::BTreeSet;

pub trait ProgramOracle: Sync {
    fn class_by_name(&self, name: &str) -> Option<ClassUid>;

    fn class_name(&self, class: ClassUid) -> Option<&str>;

    /// The class itself and every class extending or implementing it,
    /// transitively.
    fn subtypes_of(&self, class: ClassUid) -> BTreeSet<ClassUid>;

    /// Nearest class of the superclass chain of `class` (included) that
    /// declares a method with subsignature `subsig`.
    fn match_virtual_dispatch(&self, subsig: &SubSignature, class: ClassUid) -> Option<ClassUid>;

    /// Method declared by `class` with subsignature `subsig`.
    fn method_of(&self, class: ClassUid, subsig: &SubSignature) -> Option<MethodUid>;

    fn method_by_descriptor(&self, descr: &MethodDescr) -> Option<MethodUid>;

    fn method_descriptor(&self, method: MethodUid) -> Option<&MethodDescr>;

    fn is_concrete(&self, method: MethodUid) -> bool;

    fn is_application_class(&self, class: ClassUid) -> bool;
}

pub trait ListenerTypeOracle: Sync {
    /// Independent check that `class` is a legitimate listener implementation.
    fn is_listener_type(&self, class: ClassUid) -> bool;
}

impl ProgramOracle for Repo {
    fn class_by_name(&self, name: &str) -> Option<ClassUid> {
        self.get_class_by_name(name).map(|class| class.uid())
    }

    fn class_name(&self, class: ClassUid) -> Option<&str> {
        self.get_class(class).map(|class| class.name())
    }

    fn subtypes_of(&self, class: ClassUid) -> BTreeSet<ClassUid> {
        self.get_class(class)
            .map(|class| self.subtypes(class))
            .unwrap_or_default()
    }

    fn match_virtual_dispatch(&self, subsig: &SubSignature, class: ClassUid) -> Option<ClassUid> {
        let class = self.get_class(class)?;
        self.match_for_virtual_dispatch(subsig, class)
            .map(|matched| matched.uid())
    }

    fn method_of(&self, class: ClassUid, subsig: &SubSignature) -> Option<MethodUid> {
        self.get_class(class)?
            .get_method(subsig, self)
            .map(|method| method.uid())
    }

    fn method_by_descriptor(&self, descr: &MethodDescr) -> Option<MethodUid> {
        self.find_method_by_descriptor(descr)
            .map(|method| method.uid())
    }

    fn method_descriptor(&self, method: MethodUid) -> Option<&MethodDescr> {
        self.get_method(method).map(|method| method.descriptor())
    }

    fn is_concrete(&self, method: MethodUid) -> bool {
        self.get_method(method)
            .map_or(false, |method| method.is_concrete())
    }

    fn is_application_class(&self, class: ClassUid) -> bool {
        self.get_class(class)
            .map_or(false, |class| class.is_application())
    }
}
