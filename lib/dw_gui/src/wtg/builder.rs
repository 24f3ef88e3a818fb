//! Window transition graph construction from listener registrations and
//! navigation facts.

use crate::errors::{GuiError, GuiResult};
use crate::event::EventType;
use crate::facts::{GuiFacts, HandlerFacts, ListenerSource, Registration};
use crate::listener::{ListenerInstance, ListenerSpecification, Resolver, VarNode};
use crate::oracle::ProgramOracle;
use crate::window::Window;
use crate::wtg::{Callback, StackOperation, Wtg, WtgEdge};
use dw_repo::repo::MethodUid;
use dw_repo::types::{MethodDescr, Type};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WtgOptions {
    /// Returning with the back button from each pushed activity.
    pub implicit_back: bool,
    /// Screen rotation recreating each activity.
    pub implicit_rotate: bool,
}

impl Default for WtgOptions {
    fn default() -> Self {
        Self {
            implicit_back: true,
            implicit_rotate: false,
        }
    }
}

struct Navigation<'f> {
    targets: &'f [Window],
    stack_ops: &'f [StackOperation],
    callbacks: Vec<Callback>,
}

pub struct WtgBuilder<'a> {
    program: &'a dyn ProgramOracle,
    specification: &'a ListenerSpecification,
    options: WtgOptions,
}

impl<'a> WtgBuilder<'a> {
    pub fn new(program: &'a dyn ProgramOracle, specification: &'a ListenerSpecification) -> Self {
        Self {
            program,
            specification,
            options: WtgOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: WtgOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolves the handlers of every registration site. Sites that cannot
    /// be resolved are reported and left out.
    pub fn resolve_listeners(&self, facts: &GuiFacts) -> GuiResult<Vec<ListenerInstance>> {
        let mut specification = self.specification.clone();
        specification.register_models(&facts.listeners)?;
        let listener_types = specification.listener_types(self.program);
        log::debug!("{} listener types", listener_types.len());
        let resolver = Resolver::new(self.program, &listener_types);

        let instances: Vec<ListenerInstance> = facts
            .registrations
            .par_iter()
            .filter_map(|site| match self.resolve_site(&resolver, &specification, site) {
                Ok(instance) => {
                    log::trace!("{}: {} handlers", instance, instance.all_event_handlers().len());
                    Some(instance)
                }
                Err(err) => {
                    log::warn!("skipping {} listener on {}: {}", site.listener, site.window, err);
                    None
                }
            })
            .collect();
        log::info!(
            "{}/{} listener sites resolved",
            instances.len(),
            facts.registrations.len()
        );
        Ok(instances)
    }

    fn resolve_site(
        &self,
        resolver: &Resolver,
        specification: &ListenerSpecification,
        site: &Registration,
    ) -> GuiResult<ListenerInstance> {
        let entry = specification
            .get(&site.listener)
            .ok_or_else(|| GuiError::UnknownListener(site.listener.clone()))?;
        let mut instance = ListenerInstance::new(
            site.window.clone(),
            &site.listener,
            entry.event_type(),
            entry.prototypes().clone(),
        );
        match &site.source {
            Some(ListenerSource::Variable { name, type_ }) => {
                let var = VarNode::new(name, Type::try_from(type_.as_str())?);
                instance.resolve_from_variable(resolver, &var)?;
            }
            source => {
                let class = match source {
                    Some(ListenerSource::Interface { class }) => class,
                    _ => &site.listener,
                };
                let declared = self
                    .program
                    .class_by_name(class)
                    .ok_or_else(|| GuiError::ClassNotFound(class.clone()))?;
                instance.resolve_from_declared_interface(resolver, declared);
            }
        }
        let inline = site
            .inline_handlers
            .iter()
            .map(|descr| self.resolve_method(descr))
            .collect::<GuiResult<Vec<_>>>()?;
        instance.record_inline_handlers(inline);
        Ok(instance)
    }

    fn resolve_method(&self, descr: &str) -> GuiResult<MethodUid> {
        let parsed = MethodDescr::try_from(descr)?;
        self.program
            .method_by_descriptor(&parsed)
            .ok_or_else(|| GuiError::MethodNotFound(descr.to_string()))
    }

    fn resolve_callback(&self, window: &Window, descr: &str) -> Option<Callback> {
        match self.resolve_method(descr) {
            Ok(method) => Some(Callback::new(window.clone(), method)),
            Err(err) => {
                log::warn!("ignoring callback of {}: {}", window, err);
                None
            }
        }
    }

    fn lifecycle_callbacks(&self, facts: &GuiFacts) -> BTreeMap<Window, Vec<Callback>> {
        let mut lifecycle: BTreeMap<Window, Vec<Callback>> = BTreeMap::new();
        for window_facts in &facts.windows {
            let callbacks = window_facts
                .callbacks
                .iter()
                .filter_map(|descr| self.resolve_callback(&window_facts.window, descr));
            lifecycle
                .entry(window_facts.window.clone())
                .or_default()
                .extend(callbacks);
        }
        lifecycle
    }

    fn navigation_facts<'f>(&self, facts: &'f GuiFacts) -> BTreeMap<MethodUid, Navigation<'f>> {
        let mut navigation = BTreeMap::new();
        for HandlerFacts {
            method,
            targets,
            stack_ops,
            callbacks,
        } in &facts.handlers
        {
            let handler = match self.resolve_method(method) {
                Ok(handler) => handler,
                Err(err) => {
                    log::warn!("ignoring navigation facts: {}", err);
                    continue;
                }
            };
            let callbacks = callbacks
                .iter()
                .filter_map(|cb| self.resolve_callback(&cb.window, &cb.method))
                .collect();
            if navigation
                .insert(
                    handler,
                    Navigation {
                        targets,
                        stack_ops,
                        callbacks,
                    },
                )
                .is_some()
            {
                log::warn!("navigation facts of {} defined twice, keeping the last", method);
            }
        }
        navigation
    }

    /// Builds the graph. Any structural error (malformed window, second
    /// launcher) aborts the construction.
    pub fn build(&self, facts: &GuiFacts) -> GuiResult<Wtg> {
        let instances = self.resolve_listeners(facts)?;
        let lifecycle = self.lifecycle_callbacks(facts);
        let navigation = self.navigation_facts(facts);
        let callbacks_of = |window: &Window| lifecycle.get(window).cloned().unwrap_or_default();

        let mut wtg = Wtg::new();
        let launcher = Window::launcher();
        wtg.set_launcher_node(&launcher)?;
        for window_facts in &facts.windows {
            wtg.add_node(&window_facts.window)?;
        }

        let main = facts
            .main_activity
            .as_ref()
            .ok_or(GuiError::MissingLauncher)?;
        let launch = WtgEdge::new(
            EventType::ImplicitLaunch,
            BTreeSet::new(),
            callbacks_of(main),
            vec![StackOperation::Push(main.clone())],
        );
        wtg.add_edge(&launcher, main, launch)?;

        let no_ops: &[StackOperation] = &[];
        for instance in &instances {
            let owner = instance.window();
            // handlers leading to the same transition share one edge
            let mut transitions: BTreeMap<(&Window, &[StackOperation], Vec<Callback>), BTreeSet<MethodUid>> =
                BTreeMap::new();
            for handler in instance.all_event_handlers() {
                match navigation.get(&handler) {
                    Some(nav) if !nav.targets.is_empty() => {
                        for target in nav.targets {
                            if target.is_launcher() {
                                log::warn!("ignoring transition of {} toward the launcher", handler);
                                continue;
                            }
                            let mut callbacks = nav.callbacks.clone();
                            if target != owner {
                                callbacks.extend(callbacks_of(target));
                            }
                            transitions
                                .entry((target, nav.stack_ops, callbacks))
                                .or_default()
                                .insert(handler);
                        }
                    }
                    Some(nav) => {
                        transitions
                            .entry((owner, nav.stack_ops, nav.callbacks.clone()))
                            .or_default()
                            .insert(handler);
                    }
                    None => {
                        log::debug!("no navigation facts for handler {}", handler);
                        transitions
                            .entry((owner, no_ops, Vec::new()))
                            .or_default()
                            .insert(handler);
                    }
                }
            }
            for ((target, stack_ops, callbacks), handlers) in transitions {
                let edge = WtgEdge::new(instance.event_type(), handlers, callbacks, stack_ops.to_vec());
                insert_edge(&mut wtg, owner, target, edge)?;
            }
        }

        if self.options.implicit_back {
            let back_edges: Vec<(Window, Window)> = wtg
                .edges()
                .filter_map(|edge| {
                    let source = edge.source_node().window();
                    let target = edge.target_node().window();
                    let pushed = edge
                        .stack_ops()
                        .iter()
                        .any(|op| op.is_push_op() && op.window() == target);
                    (pushed && target.is_activity() && source != target && !source.is_launcher())
                        .then(|| (target.clone(), source.clone()))
                })
                .collect();
            for (source, target) in back_edges {
                let edge = WtgEdge::new(
                    EventType::ImplicitBack,
                    BTreeSet::new(),
                    Vec::new(),
                    vec![StackOperation::Pop(source.clone())],
                );
                insert_edge(&mut wtg, &source, &target, edge)?;
            }
        }

        if self.options.implicit_rotate {
            let activities: Vec<Window> = wtg
                .nodes()
                .map(|node| node.window())
                .filter(|window| window.is_activity())
                .cloned()
                .collect();
            for window in activities {
                let edge = WtgEdge::new(
                    EventType::ImplicitRotate,
                    BTreeSet::new(),
                    callbacks_of(&window),
                    vec![
                        StackOperation::Pop(window.clone()),
                        StackOperation::Push(window.clone()),
                    ],
                );
                insert_edge(&mut wtg, &window, &window, edge)?;
            }
        }

        log::info!("wtg: {} nodes, {} edges", wtg.nb_nodes(), wtg.nb_edges());
        Ok(wtg)
    }
}

fn insert_edge(wtg: &mut Wtg, source: &Window, target: &Window, edge: WtgEdge) -> GuiResult<()> {
    if wtg.contains_edge(source, target, &edge) {
        log::trace!("edge {} -> {} already present", source, target);
        return Ok(());
    }
    wtg.add_edge(source, target, edge)?;
    Ok(())
}
