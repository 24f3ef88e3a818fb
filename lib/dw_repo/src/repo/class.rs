use crate::repo::*;
use crate::types::SubSignature;
use std::cmp::Ordering;
use std::fmt;

/// The enriched class definition.
#[derive(Debug, Clone)]
pub struct Class {
    // Unique identifier in the repository
    uid: ClassUid,
    // Flag to indicate that the class body is known (not only referenced)
    defined: bool,
    // Flag to indicate that the class is part of the API and not of the analyzed application
    system: bool,
    interface: bool,
    name: String,
    // List of contained methods (declaration level)
    methods: Vec<MethodUid>,
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.uid == other.uid
    }
}

impl Eq for Class {}

impl PartialOrd for Class {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Class {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uid.cmp(&other.uid)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Class {
    /// Builds an enriched class definition from its model.
    pub(crate) fn new(
        uid: ClassUid,
        name: &str,
        system: bool,
        interface: bool,
        methods: Vec<MethodUid>,
    ) -> Self {
        Self {
            uid,
            defined: true,
            system,
            interface,
            name: name.to_string(),
            methods,
        }
    }

    /// Builds a class that is only referenced (as a parent) but never defined.
    pub(crate) fn new_no_def(uid: ClassUid, name: &str) -> Self {
        Self {
            uid,
            defined: false,
            system: false,
            interface: false,
            name: name.to_string(),
            methods: Vec::new(),
        }
    }

    #[inline]
    pub fn uid(&self) -> ClassUid {
        self.uid
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.defined
    }

    #[inline]
    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.system
    }

    #[inline]
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        self.interface
    }

    /// Application classes are the defined, non-system ones.
    #[inline]
    #[must_use]
    pub const fn is_application(&self) -> bool {
        self.defined && !self.system
    }

    /// Returns the method declared by this class with the given subsignature.
    pub fn get_method<'r>(&self, subsig: &SubSignature, repo: &'r Repo) -> Option<&'r Method> {
        self.methods
            .iter()
            .map(|muid| &repo[*muid])
            .find(|meth| meth.subsignature() == subsig)
    }
}
