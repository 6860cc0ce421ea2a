//! Build context and dirty-tracked widget nodes.
//!
//! A [`WidgetNode`] caches the result of a build function and rebuilds it
//! only when its dirty flag is set. During a rebuild the node hands a
//! [`BuildContext`] to the build function; signals read through that context
//! subscribe the node, and a later change to any of them marks it dirty.
//!
//! Every rebuild installs a fresh [`NodeHandle`]. Signals hold only weak
//! references to handles, so subscriptions made by an earlier build (or by a
//! node that has since been dropped) expire on their own.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

// ---------------------------------------------------------------------------
// NodeHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub(crate) struct NodeState {
    dirty: AtomicBool,
}

impl NodeState {
    pub(crate) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }
}

/// Shared dirty flag for one build of one node.
///
/// Cloning yields another reference to the same flag.
#[derive(Clone, Default)]
pub struct NodeHandle {
    state: Arc<NodeState>,
}

impl NodeHandle {
    /// A fresh, clean handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a signal this node depends on has changed.
    pub fn is_dirty(&self) -> bool {
        self.state.dirty.load(Ordering::Acquire)
    }

    /// Flag the node for rebuild.
    pub fn mark_dirty(&self) {
        self.state.mark_dirty();
    }

    pub(crate) fn downgrade(&self) -> Weak<NodeState> {
        Arc::downgrade(&self.state)
    }
}

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// BuildContext
// ---------------------------------------------------------------------------

/// The node currently being built, passed explicitly to every build call.
///
/// [`Signal::get`](super::Signal::get) takes a context and subscribes its
/// node. An untracked context subscribes nothing.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    node: Option<&'a NodeHandle>,
}

impl<'a> BuildContext<'a> {
    /// A context that subscribes `node` to every signal read through it.
    pub fn new(node: &'a NodeHandle) -> Self {
        Self { node: Some(node) }
    }

    /// A context with no current node.
    pub fn untracked() -> BuildContext<'static> {
        BuildContext { node: None }
    }

    /// The node being built, if any.
    pub fn node(&self) -> Option<&'a NodeHandle> {
        self.node
    }

    /// Whether reads through this context create subscriptions.
    pub fn is_tracking(&self) -> bool {
        self.node.is_some()
    }
}

// ---------------------------------------------------------------------------
// WidgetNode
// ---------------------------------------------------------------------------

/// A lazily rebuilt, cached build result.
///
/// [`build`](Self::build) returns the cache while the node is clean and
/// reruns the build function otherwise.
pub struct WidgetNode<T> {
    handle: NodeHandle,
    cached: Option<T>,
}

impl<T> WidgetNode<T> {
    /// A node with no cached result.
    pub fn new() -> Self {
        Self { handle: NodeHandle::new(), cached: None }
    }

    /// Whether the next [`build`](Self::build) call will rerun the build function.
    pub fn is_dirty(&self) -> bool {
        self.cached.is_none() || self.handle.is_dirty()
    }

    /// Force a rebuild on the next [`build`](Self::build) call.
    pub fn mark_dirty(&self) {
        self.handle.mark_dirty();
    }

    /// The cached result, if one exists. Never triggers a build.
    pub fn cached(&self) -> Option<&T> {
        self.cached.as_ref()
    }

    /// The handle signals subscribe to for the current build.
    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    /// Return the cached result, rebuilding first if the node is dirty.
    ///
    /// A rebuild swaps in a fresh handle before calling `f`, so only the
    /// signals read during this call keep the node subscribed.
    pub fn build(&mut self, f: impl FnOnce(&BuildContext<'_>) -> T) -> &T {
        let value = match self.cached.take() {
            Some(value) if !self.handle.is_dirty() => value,
            _ => {
                self.handle = NodeHandle::new();
                f(&BuildContext::new(&self.handle))
            }
        };
        self.cached.insert(value)
    }

    /// Remove the cached result, leaving the node dirty.
    pub fn take(&mut self) -> Option<T> {
        self.cached.take()
    }
}

impl<T> Default for WidgetNode<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for WidgetNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("dirty", &self.is_dirty())
            .field("cached", &self.cached)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
