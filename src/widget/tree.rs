//! Retained widget tree with lazy rebuilds.
//!
//! Every logical position in the tree is a node in a slotmap arena. Each node
//! caches what its widget built last time in a [`WidgetNode`], so resolving
//! the tree only reruns builds whose signals changed. Children are matched to
//! existing nodes by position; a node keeps its cache only while it holds the
//! very same widget instance.

use std::sync::Arc;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::reactive::WidgetNode;

use super::element::Element;
use super::traits::WidgetRef;

new_key_type! {
    /// Identifies a node in the widget tree.
    pub struct NodeId;
}

struct TreeNode {
    widget: WidgetRef,
    build: WidgetNode<Option<WidgetRef>>,
}

impl TreeNode {
    fn new(widget: WidgetRef) -> Self {
        Self { widget, build: WidgetNode::new() }
    }
}

fn same_widget(a: &WidgetRef, b: &WidgetRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// The mounted widget tree.
pub struct WidgetTree {
    nodes: SlotMap<NodeId, TreeNode>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    root: Option<NodeId>,
    rebuilds: usize,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            root: None,
            rebuilds: 0,
        }
    }

    /// Replace the whole tree with `root`.
    pub fn mount(&mut self, root: WidgetRef) {
        self.nodes.clear();
        self.children.clear();
        let id = self.nodes.insert(TreeNode::new(root));
        self.children.insert(id, Vec::new());
        self.root = Some(id);
    }

    /// Whether any node needs to rebuild.
    pub fn is_dirty(&self) -> bool {
        self.nodes.values().any(|n| n.build.is_dirty())
    }

    /// Number of nodes, composites included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Builds rerun by the last [`resolve`](Self::resolve).
    pub fn last_rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Bring every node up to date and return the element tree.
    pub fn resolve(&mut self) -> Option<Element> {
        self.rebuilds = 0;
        let root = self.root?;
        let element = self.resolve_node(root, Vec::new());
        tracing::trace!(rebuilds = self.rebuilds, nodes = self.nodes.len(), "widget tree resolved");
        element
    }

    fn resolve_node(&mut self, id: NodeId, mut owners: Vec<WidgetRef>) -> Option<Element> {
        let node = self.nodes.get_mut(id)?;
        let widget = Arc::clone(&node.widget);
        if node.build.is_dirty() {
            self.rebuilds += 1;
        }
        let built = node.build.build(|ctx| widget.build(ctx)).clone();

        match built {
            Some(child) => {
                let child_id = *self.reconcile(id, vec![child]).first()?;
                owners.push(widget);
                self.resolve_node(child_id, owners)
            }
            None => {
                let child_ids = self.reconcile(id, widget.children());
                let children = child_ids
                    .into_iter()
                    .filter_map(|c| self.resolve_node(c, Vec::new()))
                    .collect();
                Some(Element::new(widget, owners, children))
            }
        }
    }

    /// Match `widgets` against the existing children of `parent` by position.
    fn reconcile(&mut self, parent: NodeId, widgets: Vec<WidgetRef>) -> Vec<NodeId> {
        let existing = self.children.get(parent).cloned().unwrap_or_default();
        let mut ids = Vec::with_capacity(widgets.len());

        for (i, widget) in widgets.into_iter().enumerate() {
            let reused = existing.get(i).copied().and_then(|id| {
                let node = self.nodes.get_mut(id)?;
                if !same_widget(&node.widget, &widget) {
                    *node = TreeNode::new(widget.clone());
                }
                Some(id)
            });
            let id = match reused {
                Some(id) => id,
                None => {
                    let id = self.nodes.insert(TreeNode::new(widget));
                    self.children.insert(id, Vec::new());
                    id
                }
            };
            ids.push(id);
        }

        for &stale in existing.iter().skip(ids.len()) {
            self.remove(stale);
        }
        self.children.insert(parent, ids.clone());
        ids
    }

    /// Drop a node and its whole subtree.
    fn remove(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(current) {
                stack.extend(kids);
            }
            self.nodes.remove(current);
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("last_rebuilds", &self.rebuilds)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
