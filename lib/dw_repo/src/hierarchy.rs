//! Classes hierarchy graph representation.

use crate::errors::{RepoError, RepoResult};
use crate::repo::{Class, ClassUid, RepoCounters};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, EdgeRef, Reversed};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use Direction::Outgoing;

pub const JAVA_LANG_OBJECT: &str = "java/lang/Object";

#[derive(Debug, PartialEq, Eq)]
pub enum Inheritance {
    Extends,
    Implements,
}

impl fmt::Display for Inheritance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Extends => write!(f, "<extends>"),
            Self::Implements => write!(f, "<implements>"),
        }
    }
}

/// Inheritance graph: edges go from a class to its direct parents.
#[derive(Debug)]
pub struct Hierarchy {
    inner: DiGraph<Class, Inheritance>,
    node_ids: BTreeMap<String, NodeIndex>,
    uid_ids: BTreeMap<ClassUid, NodeIndex>,
}

impl Hierarchy {
    pub(crate) fn new() -> Self {
        Self {
            inner: DiGraph::new(),
            node_ids: BTreeMap::new(),
            uid_ids: BTreeMap::new(),
        }
    }

    pub(crate) fn insert_class(&mut self, class: Class) -> RepoResult<()> {
        if self.node_ids.contains_key(class.name()) {
            return Err(RepoError::DuplicateClass(class.name().to_string()));
        }

        let class_name = class.name().to_string();
        let uid = class.uid();
        let id = self.inner.add_node(class);
        self.node_ids.insert(class_name, id);
        self.uid_ids.insert(uid, id);
        Ok(())
    }

    pub(crate) fn update_class(&mut self, class: Class) -> RepoResult<()> {
        if let Some(id) = self.node_ids.get(class.name()) {
            self.inner[*id] = class;
            Ok(())
        } else {
            Err(RepoError::ClassNotFound(class.name().to_string()))
        }
    }

    pub(crate) fn contains_class(&self, class_name: &str) -> bool {
        self.node_ids.contains_key(class_name)
    }

    pub fn iter_classes(&self) -> impl Iterator<Item = &Class> {
        self.inner.node_weights()
    }

    pub(crate) fn insert_extends(&mut self, class: &str, superclass: &str) -> RepoResult<()> {
        self.insert_link(class, superclass, Inheritance::Extends)
    }

    pub(crate) fn insert_implements(&mut self, class: &str, interface: &str) -> RepoResult<()> {
        self.insert_link(class, interface, Inheritance::Implements)
    }

    fn insert_link(&mut self, from: &str, to: &str, link: Inheritance) -> RepoResult<()> {
        let src = self
            .node_ids
            .get(from)
            .ok_or_else(|| RepoError::ClassNotFound(from.to_string()))?;
        let dst = self
            .node_ids
            .get(to)
            .ok_or_else(|| RepoError::ClassNotFound(to.to_string()))?;
        self.inner.add_edge(*src, *dst, link);
        Ok(())
    }

    /// Makes every root of the graph inherit from `java/lang/Object`.
    pub(crate) fn close(&mut self, counters: &mut RepoCounters) -> RepoResult<()> {
        if !self.contains_class(JAVA_LANG_OBJECT) {
            self.insert_class(Class::new_no_def(
                counters.new_class_uid(),
                JAVA_LANG_OBJECT,
            ))?;
        }

        let id_orphans: Vec<NodeIndex> = self
            .inner
            .externals(Outgoing)
            .filter(|id| self.inner[*id].name() != JAVA_LANG_OBJECT)
            .collect();

        for id in id_orphans {
            let class_name = self.inner[id].name().to_string();
            log::debug!("add missing java.lang.Object inheritance to {}", class_name);
            self.insert_extends(&class_name, JAVA_LANG_OBJECT)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn get_class(&self, class_name: &str) -> Option<&Class> {
        self.node_ids.get(class_name).map(|id| &self.inner[*id])
    }

    #[must_use]
    pub fn get_class_by_uid(&self, uid: ClassUid) -> Option<&Class> {
        self.uid_ids.get(&uid).map(|id| &self.inner[*id])
    }

    /// Returns the direct superclass, following the `Extends` link.
    #[must_use]
    pub fn superclass(&self, class: &Class) -> Option<&Class> {
        let id = self.node_ids.get(class.name())?;
        self.inner
            .edges_directed(*id, Outgoing)
            .find(|edge| *edge.weight() == Inheritance::Extends)
            .map(|edge| &self.inner[edge.target()])
    }

    /// Returns the class itself and all its transitive parents
    /// (superclasses and interfaces).
    #[must_use]
    pub fn all_parents(&self, class: &Class) -> BTreeSet<&Class> {
        let mut parents = BTreeSet::new();
        if let Some(id) = self.node_ids.get(class.name()) {
            let mut dfs = Dfs::new(&self.inner, *id);
            while let Some(id) = dfs.next(&self.inner) {
                parents.insert(&self.inner[id]);
            }
        }
        parents
    }

    /// Returns the class itself and all the classes that transitively
    /// extend or implement it.
    #[must_use]
    pub fn all_subtypes(&self, class: &Class) -> BTreeSet<ClassUid> {
        let mut subtypes = BTreeSet::new();
        if let Some(id) = self.node_ids.get(class.name()) {
            let reversed = Reversed(&self.inner);
            let mut dfs = Dfs::new(reversed, *id);
            while let Some(id) = dfs.next(reversed) {
                subtypes.insert(self.inner[id].uid());
            }
        }
        subtypes
    }

    #[must_use]
    pub fn to_dot(&self) -> String {
        self.to_dot_filtered(|_| true)
    }

    /// Dot export restricted to classes accepted by the given filter.
    pub fn to_dot_filtered<F>(&self, filter: F) -> String
    where
        F: Fn(&Class) -> bool,
    {
        let graph = self.inner.filter_map(
            |_, class| filter(class).then_some(class),
            |_, link| Some(link),
        );
        format!(
            "{}",
            Dot::with_attr_getters(
                &graph,
                &[Config::EdgeNoLabel],
                &|_, edge| {
                    let style = match edge.weight() {
                        Inheritance::Extends => "solid",
                        Inheritance::Implements => "dashed",
                    };
                    format!("arrowType=empty,style={style}")
                },
                &|_, (_, class)| {
                    let shape = if !class.is_defined() {
                        "none"
                    } else if class.is_interface() {
                        "ellipse"
                    } else {
                        "box"
                    };
                    let color = if class.is_system() { "#00000088" } else { "black" };
                    format!("color={color},shape={shape}")
                }
            )
        )
    }
}
