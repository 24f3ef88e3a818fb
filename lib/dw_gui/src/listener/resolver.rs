//! Class hierarchy based resolution of event handlers.

use crate::oracle::{ListenerTypeOracle, ProgramOracle};
use dw_repo::repo::{ClassUid, MethodUid};
use dw_repo::types::SubSignature;
use std::collections::BTreeSet;

/// Devirtualizes listener callbacks: given the handler prototypes of a
/// listener interface and the possible runtime types of a listener object,
/// computes the concrete methods that virtual dispatch can reach.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    program: &'a dyn ProgramOracle,
    listeners: &'a dyn ListenerTypeOracle,
}

impl<'a> Resolver<'a> {
    pub fn new(program: &'a dyn ProgramOracle, listeners: &'a dyn ListenerTypeOracle) -> Self {
        Self { program, listeners }
    }

    #[inline]
    pub fn program(&self) -> &'a dyn ProgramOracle {
        self.program
    }

    /// Resolves every prototype against every candidate type.
    ///
    /// A resolved method is kept only if its class belongs to the analyzed
    /// application, is recognized as a listener type, and if the method is
    /// concrete. Other matches are dropped silently, which under-approximates
    /// the handlers set.
    #[must_use]
    pub fn concrete_handlers(
        &self,
        handler_prototypes: &BTreeSet<SubSignature>,
        listener_types: &BTreeSet<ClassUid>,
    ) -> BTreeSet<MethodUid> {
        let mut handlers = BTreeSet::new();
        for possible_type in listener_types {
            for prototype in handler_prototypes {
                let Some(matched) = self.program.match_virtual_dispatch(prototype, *possible_type) else {
                    continue;
                };
                if !self.program.is_application_class(matched)
                    || !self.listeners.is_listener_type(matched)
                {
                    continue;
                }
                if let Some(handler) = self.program.method_of(matched, prototype) {
                    if self.program.is_concrete(handler) {
                        handlers.insert(handler);
                    }
                }
            }
        }
        handlers
    }

    /// Resolution from a declared type: every subtype of `declared` is a
    /// candidate runtime type.
    #[must_use]
    pub fn from_declared_type(
        &self,
        handler_prototypes: &BTreeSet<SubSignature>,
        declared: ClassUid,
    ) -> BTreeSet<MethodUid> {
        let listener_types = self.program.subtypes_of(declared);
        log::trace!(
            "{} candidate listener types for {}",
            listener_types.len(),
            self.program.class_name(declared).unwrap_or("?"),
        );
        self.concrete_handlers(handler_prototypes, &listener_types)
    }
}
