//! A repository to centralize application and dependencies classes.

use crate::errors::RepoResult;
use crate::hierarchy::Hierarchy;
use crate::model::{ClassModel, ProgramModel};
use crate::repo::*;
use crate::types::{MethodDescr, SubSignature};
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::ops;

pub struct Repo {
    hierarchy: Hierarchy,
    counters: RepoCounters,
    methods: Vec<Method>,
}

impl Default for Repo {
    fn default() -> Self {
        Self {
            hierarchy: Hierarchy::new(),
            counters: RepoCounters::new(),
            methods: Vec::new(),
        }
    }
}

impl ops::Index<MethodUid> for Repo {
    type Output = Method;

    fn index(&self, muid: MethodUid) -> &Method {
        &self.methods[muid.idx()]
    }
}

impl Repo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every class of a program model. System models describe
    /// the framework: their classes are never considered as application code.
    pub fn register_model(&mut self, model: &ProgramModel, is_system: bool) -> RepoResult<()> {
        for class in &model.classes {
            self.register_class(class, is_system)?;
        }
        Ok(())
    }

    fn register_class(&mut self, class_model: &ClassModel, is_system: bool) -> RepoResult<()> {
        let class_name = class_model.name.as_str();
        log::trace!(
            "pushing '{}'{} in repository",
            class_name,
            if is_system { " (SYS)" } else { "" }
        );

        let mut uid_to_update = None;
        if let Some(class_h) = self.hierarchy.get_class(class_name) {
            if class_h.is_defined() {
                log::warn!(
                    "class '{}'{} has already been pushed in repository",
                    class_name,
                    if is_system { " (SYS)" } else { "" }
                );
                // no change of the hierarchy nor of the repository for this class
                return Ok(());
            }
            uid_to_update = Some(class_h.uid());
        }

        let class_uid = uid_to_update.unwrap_or_else(|| self.counters.new_class_uid());
        let mut class_methods = Vec::with_capacity(class_model.methods.len());
        for method_model in &class_model.methods {
            let subsig = SubSignature::try_from(method_model.signature.as_str())?;
            let method_uid = self.counters.new_method_uid();
            self.methods.push(Method::new(
                method_uid,
                class_uid,
                MethodDescr::new(class_name, subsig),
                method_model.is_abstract,
                method_model.native,
            ));
            class_methods.push(method_uid);
        }

        let class = Class::new(
            class_uid,
            class_name,
            is_system,
            class_model.interface,
            class_methods,
        );
        if uid_to_update.is_some() {
            self.hierarchy.update_class(class)?;
        } else {
            self.hierarchy.insert_class(class)?;
        }

        // filling in the hierarchy links
        if let Some(superclass_name) = &class_model.superclass {
            self.ensure_declared(superclass_name)?;
            self.hierarchy.insert_extends(class_name, superclass_name)?;
        }
        for interface_name in &class_model.interfaces {
            self.ensure_declared(interface_name)?;
            self.hierarchy.insert_implements(class_name, interface_name)?;
        }

        Ok(())
    }

    fn ensure_declared(&mut self, class_name: &str) -> RepoResult<()> {
        if !self.hierarchy.contains_class(class_name) {
            self.hierarchy
                .insert_class(Class::new_no_def(self.counters.new_class_uid(), class_name))?;
        }
        Ok(())
    }

    pub fn close_hierarchy(&mut self) -> RepoResult<()> {
        self.hierarchy.close(&mut self.counters)
    }

    #[inline]
    #[must_use]
    pub const fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    #[inline]
    pub fn iter_classes(&self) -> impl Iterator<Item = &Class> {
        self.hierarchy.iter_classes()
    }

    pub fn iter_missing_classes(&self) -> impl Iterator<Item = &str> {
        self.hierarchy
            .iter_classes()
            .filter_map(|class| (!class.is_defined()).then(|| class.name()))
    }

    pub fn get_class_by_name(&self, name: &str) -> Option<&Class> {
        self.hierarchy.get_class(name)
    }

    pub fn get_class(&self, uid: ClassUid) -> Option<&Class> {
        self.hierarchy.get_class_by_uid(uid)
    }

    pub fn get_method(&self, uid: MethodUid) -> Option<&Method> {
        self.methods.get(uid.idx())
    }

    pub fn find_method_by_descriptor(&self, descriptor: &MethodDescr) -> Option<&Method> {
        let class = self.get_class_by_name(descriptor.definer())?;
        class.get_method(descriptor.subsignature(), self)
    }

    /// Returns all the classes that may be the runtime type of an object
    /// statically typed as `class` (the class itself included).
    #[must_use]
    pub fn subtypes(&self, class: &Class) -> BTreeSet<ClassUid> {
        self.hierarchy.all_subtypes(class)
    }

    /// Static virtual dispatch: walks the superclass chain from `class`
    /// (included) and returns the first class declaring a method with the
    /// given subsignature.
    #[must_use]
    pub fn match_for_virtual_dispatch(&self, subsig: &SubSignature, class: &Class) -> Option<&Class> {
        let mut visited = BTreeSet::new();
        let mut current = self.get_class(class.uid());
        while let Some(cl) = current {
            if !visited.insert(cl.uid()) {
                log::warn!("inheritance cycle detected on class {}", cl.name());
                return None;
            }
            if cl.get_method(subsig, self).is_some() {
                return Some(cl);
            }
            current = self.hierarchy.superclass(cl);
        }
        None
    }

    pub fn nb_classes(&self) -> usize {
        self.counters.nb_classes()
    }

    pub fn nb_methods(&self) -> usize {
        self.counters.nb_methods()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::JAVA_LANG_OBJECT;
    use crate::model::MethodModel;

    fn class(name: &str, superclass: Option<&str>, interfaces: &[&str], methods: &[&str]) -> ClassModel {
        ClassModel {
            name: name.to_string(),
            superclass: superclass.map(str::to_string),
            interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
            interface: false,
            methods: methods
                .iter()
                .map(|s| MethodModel {
                    signature: s.to_string(),
                    is_abstract: false,
                    native: false,
                })
                .collect(),
        }
    }

    const ON_CLICK: &str = "onClick(Landroid/view/View;)V";

    fn sample_repo() -> Repo {
        let sys = ProgramModel {
            classes: vec![class("android/app/Activity", None, &[], &["onCreate(Landroid/os/Bundle;)V"])],
        };
        let app = ProgramModel {
            classes: vec![
                class("a/Base", Some("android/app/Activity"), &["android/view/View$OnClickListener"], &[ON_CLICK]),
                class("a/Child", Some("a/Base"), &[], &[]),
                class("a/GrandChild", Some("a/Child"), &[], &[ON_CLICK]),
            ],
        };
        let mut repo = Repo::new();
        repo.register_model(&sys, true).unwrap();
        repo.register_model(&app, false).unwrap();
        repo.close_hierarchy().unwrap();
        repo
    }

    #[test]
    fn register_and_close() {
        let repo = sample_repo();
        // 4 defined classes, the listener interface and java/lang/Object
        assert_eq!(repo.nb_classes(), 6);
        assert_eq!(repo.nb_methods(), 3);
        let missing: Vec<&str> = repo.iter_missing_classes().collect();
        assert!(missing.contains(&"android/view/View$OnClickListener"));
        assert!(missing.contains(&JAVA_LANG_OBJECT));
        assert!(repo.get_class_by_name("android/app/Activity").unwrap().is_system());
        assert!(repo.get_class_by_name("a/Base").unwrap().is_application());
        let grand_child = repo.get_class_by_name("a/GrandChild").unwrap();
        let parents: Vec<&str> = repo
            .hierarchy()
            .all_parents(grand_child)
            .into_iter()
            .map(|class| class.name())
            .collect();
        assert!(parents.contains(&"android/app/Activity"));
        assert!(parents.contains(&"android/view/View$OnClickListener"));
        assert!(parents.contains(&JAVA_LANG_OBJECT));
    }

    #[test]
    fn late_definition_keeps_uid() {
        let mut repo = Repo::new();
        repo.register_model(
            &ProgramModel {
                classes: vec![class("a/Child", Some("a/Base"), &[], &[])],
            },
            false,
        )
        .unwrap();
        let uid = repo.get_class_by_name("a/Base").unwrap().uid();
        assert!(!repo.get_class_by_name("a/Base").unwrap().is_defined());
        repo.register_model(
            &ProgramModel {
                classes: vec![class("a/Base", None, &[], &[ON_CLICK])],
            },
            false,
        )
        .unwrap();
        let base = repo.get_class_by_name("a/Base").unwrap();
        assert!(base.is_defined());
        assert_eq!(base.uid(), uid);
        assert_eq!(repo.get_class(uid).unwrap().name(), "a/Base");
    }

    #[test]
    fn subtypes_of_interface() {
        let repo = sample_repo();
        let listener = repo
            .get_class_by_name("android/view/View$OnClickListener")
            .unwrap();
        let names: BTreeSet<&str> = repo
            .subtypes(listener)
            .into_iter()
            .map(|uid| repo.get_class(uid).unwrap().name())
            .collect();
        let expected: BTreeSet<&str> = [
            "android/view/View$OnClickListener",
            "a/Base",
            "a/Child",
            "a/GrandChild",
        ]
        .into_iter()
        .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn virtual_dispatch_walk() {
        let repo = sample_repo();
        let subsig = SubSignature::try_from(ON_CLICK).unwrap();
        let child = repo.get_class_by_name("a/Child").unwrap();
        let grandchild = repo.get_class_by_name("a/GrandChild").unwrap();
        let activity = repo.get_class_by_name("android/app/Activity").unwrap();
        assert_eq!(
            repo.match_for_virtual_dispatch(&subsig, child).unwrap().name(),
            "a/Base"
        );
        assert_eq!(
            repo.match_for_virtual_dispatch(&subsig, grandchild).unwrap().name(),
            "a/GrandChild"
        );
        assert!(repo.match_for_virtual_dispatch(&subsig, activity).is_none());
    }

    #[test]
    fn find_method() {
        let repo = sample_repo();
        let descr = MethodDescr::try_from("a/GrandChild->onClick(Landroid/view/View;)V").unwrap();
        let method = repo.find_method_by_descriptor(&descr).unwrap();
        assert!(method.is_concrete());
        assert_eq!(repo.get_method(method.uid()).unwrap().descriptor(), &descr);
        let missing = MethodDescr::try_from("a/Child->onClick(Landroid/view/View;)V").unwrap();
        assert!(repo.find_method_by_descriptor(&missing).is_none());
    }
}
