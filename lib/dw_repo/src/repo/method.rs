use crate::repo::{ClassUid, MethodUid};
use crate::types::{MethodDescr, SubSignature};
use std::fmt;

/// The enriched method definition.
#[derive(Debug, Clone)]
pub struct Method {
    // Unique identifier in the repository
    uid: MethodUid,
    // Declaring class
    class: ClassUid,
    descriptor: MethodDescr,
    is_abstract: bool,
    is_native: bool,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.descriptor.fmt(f)
    }
}

impl Method {
    pub(crate) fn new(
        uid: MethodUid,
        class: ClassUid,
        descriptor: MethodDescr,
        is_abstract: bool,
        is_native: bool,
    ) -> Self {
        Self {
            uid,
            class,
            descriptor,
            is_abstract,
            is_native,
        }
    }

    #[inline]
    pub fn uid(&self) -> MethodUid {
        self.uid
    }

    #[inline]
    pub fn class(&self) -> ClassUid {
        self.class
    }

    #[inline]
    pub fn descriptor(&self) -> &MethodDescr {
        &self.descriptor
    }

    #[inline]
    pub fn subsignature(&self) -> &SubSignature {
        self.descriptor.subsignature()
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    #[inline]
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[inline]
    #[must_use]
    pub const fn is_native(&self) -> bool {
        self.is_native
    }

    /// A concrete method has a body: it is neither abstract nor native.
    #[inline]
    #[must_use]
    pub const fn is_concrete(&self) -> bool {
        !self.is_abstract && !self.is_native
    }
}
