//! Listener objects registered on windows and their event handlers.

use crate::errors::{GuiError, GuiResult};
use crate::event::EventType;
use crate::listener::Resolver;
use crate::window::Window;
use dw_repo::repo::{ClassUid, MethodUid};
use dw_repo::types::{SubSignature, Type};
use std::collections::BTreeSet;
use std::fmt;

/// A local variable holding a listener object at a registration site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarNode {
    name: String,
    declared_type: Type,
}

impl VarNode {
    #[must_use]
    pub fn new(name: &str, declared_type: Type) -> Self {
        Self {
            name: name.to_string(),
            declared_type,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn declared_type(&self) -> &Type {
        &self.declared_type
    }
}

/// One listener registration site and the handlers resolved for it.
///
/// Handlers found by prototype matching and handlers recorded inline are
/// kept apart, so that consumers can tell where a handler comes from. Both
/// sets only grow.
#[derive(Debug, Clone)]
pub struct ListenerInstance {
    window: Window,
    listener_class: String,
    event_type: EventType,
    handler_prototypes: BTreeSet<SubSignature>,
    event_handler_methods: BTreeSet<MethodUid>,
    // Handlers registered without interface relationship, their name may
    // differ from the prototypes one.
    inline_event_handler_methods: BTreeSet<MethodUid>,
}

impl fmt::Display for ListenerInstance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} listener {} on {}",
            self.event_type, self.listener_class, self.window
        )
    }
}

impl ListenerInstance {
    #[must_use]
    pub fn new(
        window: Window,
        listener_class: &str,
        event_type: EventType,
        handler_prototypes: BTreeSet<SubSignature>,
    ) -> Self {
        Self {
            window,
            listener_class: listener_class.to_string(),
            event_type,
            handler_prototypes,
            event_handler_methods: BTreeSet::new(),
            inline_event_handler_methods: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn listener_class(&self) -> &str {
        &self.listener_class
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    #[inline]
    pub fn handler_prototypes(&self) -> &BTreeSet<SubSignature> {
        &self.handler_prototypes
    }

    #[inline]
    pub fn event_handler_methods(&self) -> &BTreeSet<MethodUid> {
        &self.event_handler_methods
    }

    #[inline]
    pub fn inline_event_handler_methods(&self) -> &BTreeSet<MethodUid> {
        &self.inline_event_handler_methods
    }

    /// Resolves handlers with all the subtypes of a declared listener class
    /// or interface as candidates. Returns the handlers found by this call.
    pub fn resolve_from_declared_interface(
        &mut self,
        resolver: &Resolver,
        interface: ClassUid,
    ) -> BTreeSet<MethodUid> {
        let handlers = resolver.from_declared_type(&self.handler_prototypes, interface);
        self.event_handler_methods.extend(handlers.iter().copied());
        handlers
    }

    /// Resolves handlers with all the subtypes of the static type of a
    /// variable as candidates. Returns the handlers found by this call.
    pub fn resolve_from_variable(
        &mut self,
        resolver: &Resolver,
        var: &VarNode,
    ) -> GuiResult<BTreeSet<MethodUid>> {
        let class_name = var.declared_type().as_class_name().ok_or_else(|| {
            GuiError::NotAClassType(var.name().to_string(), var.declared_type().to_string())
        })?;
        let declared = resolver
            .program()
            .class_by_name(class_name)
            .ok_or_else(|| GuiError::ClassNotFound(class_name.to_string()))?;
        Ok(self.resolve_from_declared_interface(resolver, declared))
    }

    pub fn record_inline_handlers<I>(&mut self, methods: I)
    where
        I: IntoIterator<Item = MethodUid>,
    {
        self.inline_event_handler_methods.extend(methods);
    }

    #[must_use]
    pub fn all_event_handlers(&self) -> BTreeSet<MethodUid> {
        self.event_handler_methods
            .union(&self.inline_event_handler_methods)
            .copied()
            .collect()
    }
}
