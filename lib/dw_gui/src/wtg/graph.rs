//! Window transition graph representation.

use crate::errors::{GuiError, GuiResult};
use crate::event::EventType;
use crate::window::{Window, WindowKind};
use crate::wtg::{Callback, StackOperation};
use dw_repo::repo::MethodUid;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction::{Incoming, Outgoing};
use std::collections::{BTreeMap, BTreeSet};
use std::{fmt, ptr};

pub type NodeId = NodeIndex;
pub type EdgeId = EdgeIndex;

#[derive(Debug, Clone)]
pub struct WtgNode {
    window: Window,
}

impl fmt::Display for WtgNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.window.fmt(f)
    }
}

/// Attributes of a transition. Several transitions may link the same
/// windows: each call site of the graph construction adds its own edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WtgEdge {
    event_type: EventType,
    event_handlers: BTreeSet<MethodUid>,
    callbacks: Vec<Callback>,
    stack_ops: Vec<StackOperation>,
}

impl fmt::Display for WtgEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.event_type)?;
        for (i, op) in self.stack_ops.iter().enumerate() {
            if i == 0 {
                write!(f, " / ")?;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

impl WtgEdge {
    #[must_use]
    pub fn new(
        event_type: EventType,
        event_handlers: BTreeSet<MethodUid>,
        callbacks: Vec<Callback>,
        stack_ops: Vec<StackOperation>,
    ) -> Self {
        Self {
            event_type,
            event_handlers,
            callbacks,
            stack_ops,
        }
    }
}

#[derive(Debug, Default)]
pub struct Wtg {
    inner: DiGraph<WtgNode, WtgEdge>,
    node_ids: BTreeMap<Window, NodeIndex>,
    launcher: Option<NodeIndex>,
}

impl Wtg {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node of `window`, creating it on first use.
    pub fn add_node(&mut self, window: &Window) -> GuiResult<NodeId> {
        if let Some(id) = self.node_ids.get(window) {
            return Ok(*id);
        }
        if !window.is_well_formed() {
            return Err(GuiError::MalformedWindow(window.clone()));
        }
        log::trace!("new wtg node {}", window);
        let id = self.inner.add_node(WtgNode {
            window: window.clone(),
        });
        self.node_ids.insert(window.clone(), id);
        Ok(id)
    }

    /// Adds a new transition, never merged with existing ones. Nothing is
    /// inserted when one of the windows referenced by the transition is
    /// malformed, or when it leads to the launcher.
    pub fn add_edge(&mut self, source: &Window, target: &Window, edge: WtgEdge) -> GuiResult<EdgeId> {
        let referenced = [source, target]
            .into_iter()
            .chain(edge.stack_ops.iter().map(StackOperation::window))
            .chain(edge.callbacks.iter().map(Callback::window));
        for window in referenced {
            if !window.is_well_formed() {
                return Err(GuiError::MalformedWindow(window.clone()));
            }
        }
        if target.is_launcher() {
            return Err(GuiError::TransitionToLauncher(source.clone()));
        }

        let src = self.add_node(source)?;
        let dst = self.add_node(target)?;
        log::trace!("new wtg edge {} -> {}: {}", source, target, edge);
        Ok(self.inner.add_edge(src, dst, edge))
    }

    /// Checks whether a transition with the very same attributes already
    /// links `source` to `target`.
    #[must_use]
    pub fn contains_edge(&self, source: &Window, target: &Window, edge: &WtgEdge) -> bool {
        match (self.node_ids.get(source), self.node_ids.get(target)) {
            (Some(src), Some(dst)) => self
                .inner
                .edges_connecting(*src, *dst)
                .any(|e| e.weight() == edge),
            _ => false,
        }
    }

    pub fn set_launcher_node(&mut self, window: &Window) -> GuiResult<NodeId> {
        let id = self.add_node(window)?;
        match self.launcher {
            Some(launcher) if launcher != id => Err(GuiError::LauncherAlreadySet(
                self.inner[launcher].window.clone(),
            )),
            _ => {
                self.launcher = Some(id);
                Ok(id)
            }
        }
    }

    #[must_use]
    pub fn launcher_node(&self) -> Option<Node> {
        self.launcher.map(|id| Node { wtg: self, id })
    }

    #[must_use]
    pub fn node(&self, window: &Window) -> Option<Node> {
        self.node_ids.get(window).map(|id| Node { wtg: self, id: *id })
    }

    #[must_use]
    pub fn node_by_id(&self, id: NodeId) -> Option<Node> {
        self.inner
            .node_weight(id)
            .map(|_| Node { wtg: self, id })
    }

    #[must_use]
    pub fn edge_by_id(&self, id: EdgeId) -> Option<Edge> {
        self.inner
            .edge_endpoints(id)
            .map(|(source, target)| Edge {
                wtg: self,
                id,
                source,
                target,
            })
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> {
        self.inner.node_indices().map(move |id| Node { wtg: self, id })
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> {
        self.inner.edge_references().map(move |e| Edge {
            wtg: self,
            id: e.id(),
            source: e.source(),
            target: e.target(),
        })
    }

    #[must_use]
    pub fn nb_nodes(&self) -> usize {
        self.inner.node_count()
    }

    #[must_use]
    pub fn nb_edges(&self) -> usize {
        self.inner.edge_count()
    }

    /// Sub-graph restricted to the windows accepted by `filter`. Edges are
    /// kept when both of their ends are.
    #[must_use]
    pub fn filter_windows<F>(&self, filter: F) -> Self
    where
        F: Fn(&Window) -> bool,
    {
        let inner = self.inner.filter_map(
            |_, node| filter(&node.window).then(|| node.clone()),
            |_, edge| Some(edge.clone()),
        );
        let node_ids: BTreeMap<Window, NodeIndex> = inner
            .node_indices()
            .map(|id| (inner[id].window.clone(), id))
            .collect();
        let launcher = self
            .launcher
            .and_then(|id| node_ids.get(&self.inner[id].window).copied());
        Self {
            inner,
            node_ids,
            launcher,
        }
    }

    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut res = String::new();
        res.push_str("digraph {\n");
        res.push_str("  rankdir=LR;\n");
        res.push_str(&format!(
            "{}",
            Dot::with_attr_getters(
                &self.inner,
                &[Config::GraphContentOnly],
                &|_, edge| {
                    if edge.weight().event_type.is_implicit() {
                        "style=dashed".to_string()
                    } else {
                        String::new()
                    }
                },
                &|_, (_, node)| {
                    let shape = match node.window.kind() {
                        WindowKind::Launcher => "doublecircle",
                        WindowKind::Activity => "box",
                        WindowKind::Dialog => "ellipse",
                        WindowKind::OptionsMenu | WindowKind::ContextMenu => "note",
                    };
                    format!("shape={shape}")
                }
            )
        ));
        res.push('}');
        res
    }
}

/// Read-only view over a node of a [`Wtg`].
#[derive(Clone, Copy)]
pub struct Node<'g> {
    wtg: &'g Wtg,
    id: NodeIndex,
}

impl<'g> PartialEq for Node<'g> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.wtg, other.wtg) && self.id == other.id
    }
}

impl<'g> Eq for Node<'g> {}

impl<'g> fmt::Debug for Node<'g> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node({:?}, {})", self.id, self.window())
    }
}

impl<'g> fmt::Display for Node<'g> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.window().fmt(f)
    }
}

impl<'g> Node<'g> {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn window(&self) -> &'g Window {
        &self.wtg.inner[self.id].window
    }

    #[inline]
    pub fn is_launcher(&self) -> bool {
        self.wtg.launcher == Some(self.id)
    }

    pub fn in_edges(&self) -> impl Iterator<Item = Edge<'g>> {
        self.edges_directed(true)
    }

    pub fn out_edges(&self) -> impl Iterator<Item = Edge<'g>> {
        self.edges_directed(false)
    }

    fn edges_directed(&self, incoming: bool) -> impl Iterator<Item = Edge<'g>> {
        let wtg = self.wtg;
        let direction = if incoming { Incoming } else { Outgoing };
        wtg.inner
            .edges_directed(self.id, direction)
            .map(move |e| Edge {
                wtg,
                id: e.id(),
                source: e.source(),
                target: e.target(),
            })
    }
}

/// Read-only view over an edge of a [`Wtg`].
#[derive(Clone, Copy)]
pub struct Edge<'g> {
    wtg: &'g Wtg,
    id: EdgeIndex,
    source: NodeIndex,
    target: NodeIndex,
}

impl<'g> PartialEq for Edge<'g> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.wtg, other.wtg) && self.id == other.id
    }
}

impl<'g> Eq for Edge<'g> {}

impl<'g> fmt::Debug for Edge<'g> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Edge({:?}, {} -> {}: {})",
            self.id,
            self.source_node(),
            self.target_node(),
            self.weight()
        )
    }
}

impl<'g> Edge<'g> {
    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[inline]
    pub fn source_node(&self) -> Node<'g> {
        Node {
            wtg: self.wtg,
            id: self.source,
        }
    }

    #[inline]
    pub fn target_node(&self) -> Node<'g> {
        Node {
            wtg: self.wtg,
            id: self.target,
        }
    }

    #[inline]
    pub fn weight(&self) -> &'g WtgEdge {
        &self.wtg.inner[self.id]
    }

    #[inline]
    pub fn event_type(&self) -> EventType {
        self.weight().event_type
    }

    #[inline]
    pub fn event_handlers(&self) -> &'g BTreeSet<MethodUid> {
        &self.weight().event_handlers
    }

    #[inline]
    pub fn callbacks(&self) -> &'g [Callback] {
        &self.weight().callbacks
    }

    #[inline]
    pub fn stack_ops(&self) -> &'g [StackOperation] {
        &self.weight().stack_ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handlers(repo: &dw_repo::repo::Repo, descrs: &[&str]) -> BTreeSet<MethodUid> {
        descrs
            .iter()
            .map(|d| crate::testing::find_method(repo, d))
            .collect()
    }

    fn click_repo() -> dw_repo::repo::Repo {
        use crate::testing::*;
        fixture_repo(
            vec![on_click_listener()],
            vec![class(
                "a/Launcher",
                None,
                &[ON_CLICK_LISTENER],
                &[ON_CLICK, "onOther(Landroid/view/View;)V"],
            )],
        )
    }

    #[test]
    fn node_deduplication() {
        let mut wtg = Wtg::new();
        let main = Window::activity("a/Main");
        let first = wtg.add_node(&main).unwrap();
        let second = wtg.add_node(&main).unwrap();
        assert_eq!(first, second);
        assert_eq!(wtg.nb_nodes(), 1);

        let detail = Window::activity("a/Detail");
        wtg.add_edge(&main, &detail, WtgEdge::new(EventType::Click, BTreeSet::new(), vec![], vec![]))
            .unwrap();
        wtg.add_edge(&detail, &main, WtgEdge::new(EventType::Click, BTreeSet::new(), vec![], vec![]))
            .unwrap();
        assert_eq!(wtg.nb_nodes(), 2);
        assert_eq!(wtg.node(&main).unwrap().id(), first);
        assert_eq!(wtg.nodes().count(), 2);
    }

    #[test]
    fn edges_multiplicity() {
        let repo = click_repo();
        let mut wtg = Wtg::new();
        let launcher = Window::activity("a/Launcher");
        let detail = Window::activity("a/Detail");
        let h1 = handlers(&repo, &["a/Launcher->onClick(Landroid/view/View;)V"]);
        let h2 = handlers(&repo, &["a/Launcher->onOther(Landroid/view/View;)V"]);
        let push = vec![StackOperation::Push(detail.clone())];
        let e1 = wtg
            .add_edge(&launcher, &detail, WtgEdge::new(EventType::Click, h1, vec![], push.clone()))
            .unwrap();
        let e2 = wtg
            .add_edge(&launcher, &detail, WtgEdge::new(EventType::Click, h2, vec![], push))
            .unwrap();
        assert_ne!(e1, e2);
        assert_eq!(wtg.nb_edges(), 2);
        assert_eq!(wtg.edges().count(), 2);

        let node = wtg.node(&launcher).unwrap();
        let out: Vec<EdgeId> = node.out_edges().map(|e| e.id()).collect();
        assert_eq!(out.len(), 2);
        assert!(out.contains(&e1) && out.contains(&e2));
        assert_eq!(node.in_edges().count(), 0);
        assert_eq!(wtg.node(&detail).unwrap().in_edges().count(), 2);
        let handlers_union: BTreeSet<MethodUid> = node
            .out_edges()
            .flat_map(|e| e.event_handlers().iter().copied())
            .collect();
        assert_eq!(handlers_union.len(), 2);
    }

    #[test]
    fn identical_edge_lookup() {
        let mut wtg = Wtg::new();
        let a = Window::activity("a/A");
        let b = Window::dialog("a/B");
        let edge = WtgEdge::new(EventType::Click, BTreeSet::new(), vec![], vec![StackOperation::Push(b.clone())]);
        assert!(!wtg.contains_edge(&a, &b, &edge));
        wtg.add_edge(&a, &b, edge.clone()).unwrap();
        assert!(wtg.contains_edge(&a, &b, &edge));
        assert!(!wtg.contains_edge(&b, &a, &edge));
        let other = WtgEdge::new(EventType::LongClick, BTreeSet::new(), vec![], vec![]);
        assert!(!wtg.contains_edge(&a, &b, &other));
    }

    #[test]
    fn malformed_window() {
        let mut wtg = Wtg::new();
        let bad = Window::activity("");
        assert!(matches!(wtg.add_node(&bad), Err(GuiError::MalformedWindow(_))));
        let edge = WtgEdge::new(EventType::Click, BTreeSet::new(), vec![], vec![]);
        assert!(wtg.add_edge(&Window::activity("a/A"), &bad, edge).is_err());
        assert_eq!(wtg.nb_edges(), 0);
        assert_eq!(wtg.nb_nodes(), 0);
    }

    #[test]
    fn malformed_window_in_transition() {
        let repo = click_repo();
        let on_click = crate::testing::find_method(&repo, "a/Launcher->onClick(Landroid/view/View;)V");
        let mut wtg = Wtg::new();
        let main = Window::activity("a/Main");
        let detail = Window::activity("a/Detail");

        let pushed = WtgEdge::new(
            EventType::Click,
            BTreeSet::new(),
            vec![],
            vec![StackOperation::Push(Window::activity("a.Detail; bad"))],
        );
        assert!(matches!(
            wtg.add_edge(&main, &detail, pushed),
            Err(GuiError::MalformedWindow(_))
        ));

        let called = WtgEdge::new(
            EventType::Click,
            BTreeSet::new(),
            vec![Callback::new(Window::dialog("a/Confirm/"), on_click)],
            vec![],
        );
        assert!(matches!(
            wtg.add_edge(&main, &detail, called),
            Err(GuiError::MalformedWindow(_))
        ));
        assert_eq!(wtg.nb_nodes(), 0);
        assert_eq!(wtg.nb_edges(), 0);
    }

    #[test]
    fn launcher_has_no_incoming_edge() {
        let mut wtg = Wtg::new();
        let launcher = Window::launcher();
        let main = Window::activity("a/Main");
        wtg.set_launcher_node(&launcher).unwrap();
        for event_type in [EventType::Click, EventType::ImplicitBack, EventType::ImplicitLaunch] {
            let edge = WtgEdge::new(event_type, BTreeSet::new(), vec![], vec![]);
            assert!(matches!(
                wtg.add_edge(&main, &launcher, edge),
                Err(GuiError::TransitionToLauncher(_))
            ));
        }
        assert!(wtg.node(&main).is_none());
        assert_eq!(wtg.launcher_node().unwrap().in_edges().count(), 0);
    }

    #[test]
    fn single_launcher() {
        let mut wtg = Wtg::new();
        assert!(wtg.launcher_node().is_none());
        let id = wtg.set_launcher_node(&Window::launcher()).unwrap();
        assert_eq!(wtg.set_launcher_node(&Window::launcher()).unwrap(), id);
        assert!(matches!(
            wtg.set_launcher_node(&Window::activity("a/Main")),
            Err(GuiError::LauncherAlreadySet(_))
        ));
        let launcher = wtg.launcher_node().unwrap();
        assert!(launcher.is_launcher());
        assert_eq!(launcher.window(), &Window::launcher());
    }

    #[test]
    fn filtered_graph() {
        let mut wtg = Wtg::new();
        let main = Window::activity("a/Main");
        let dialog = Window::dialog("a/Main$Confirm");
        let other = Window::activity("b/Other");
        wtg.set_launcher_node(&Window::launcher()).unwrap();
        let edge = WtgEdge::new(EventType::Click, BTreeSet::new(), vec![], vec![]);
        wtg.add_edge(&Window::launcher(), &main, edge.clone()).unwrap();
        wtg.add_edge(&main, &dialog, edge.clone()).unwrap();
        wtg.add_edge(&main, &other, edge).unwrap();

        let sub = wtg.filter_windows(|w| w.class_name().starts_with("a/"));
        assert_eq!(sub.nb_nodes(), 2);
        assert_eq!(sub.nb_edges(), 1);
        assert!(sub.launcher_node().is_none());
        let e = sub.edges().next().unwrap();
        assert_eq!(e.source_node().window(), &main);
        assert_eq!(e.target_node().window(), &dialog);

        let with_launcher = wtg.filter_windows(|w| !w.class_name().starts_with("b/"));
        assert!(with_launcher.launcher_node().is_some());
        assert_eq!(with_launcher.nb_edges(), 2);
    }

    #[test]
    fn dot_export() {
        let mut wtg = Wtg::new();
        let main = Window::activity("a/Main");
        wtg.set_launcher_node(&Window::launcher()).unwrap();
        let edge = WtgEdge::new(
            EventType::ImplicitLaunch,
            BTreeSet::new(),
            vec![],
            vec![StackOperation::Push(main.clone())],
        );
        wtg.add_edge(&Window::launcher(), &main, edge).unwrap();
        let dot = wtg.to_dot();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("implicit_launch / PUSH ACT[a/Main]"));
        assert!(dot.contains("style=dashed"));
        assert!(dot.contains("shape=doublecircle"));
    }

    #[test]
    fn edge_view_attributes() {
        let repo = click_repo();
        let launcher = Window::activity("a/Launcher");
        let click = crate::testing::find_method(&repo, "a/Launcher->onClick(Landroid/view/View;)V");
        let other = crate::testing::find_method(&repo, "a/Launcher->onOther(Landroid/view/View;)V");
        let mut wtg = Wtg::new();
        let id = wtg
            .add_edge(
                &launcher,
                &launcher,
                WtgEdge::new(
                    EventType::Click,
                    [click].into_iter().collect(),
                    vec![Callback::new(launcher.clone(), other)],
                    vec![],
                ),
            )
            .unwrap();
        let edge = wtg.edge_by_id(id).unwrap();
        assert_eq!(edge.source_node(), edge.target_node());
        assert_eq!(edge.event_type(), EventType::Click);
        assert!(edge.event_handlers().contains(&click));
        assert_eq!(edge.callbacks()[0].window(), &launcher);
        assert_eq!(edge.callbacks()[0].event_handler(), other);
        assert!(edge.stack_ops().is_empty());
    }
}
