//! `Signal<T>` and `AnySignal<T>`: shared reactive cells.
//!
//! A signal stores a value plus the set of nodes that read it during their
//! last build. Reading through a tracking [`BuildContext`] subscribes the
//! context's node; writing a new value marks every subscriber dirty and
//! drops the subscriber set, so nodes re-subscribe on their next build.
//!
//! [`Signal`] skips notification when the new value equals the old one.
//! [`AnySignal`] always notifies, for payloads without a useful `PartialEq`.
//!
//! Both are cheap to clone and safe to share across threads: values and
//! listener sets live behind one mutex per signal.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::build::{BuildContext, NodeState};

// ---------------------------------------------------------------------------
// Shared cell
// ---------------------------------------------------------------------------

struct Slot<T> {
    value: T,
    listeners: Vec<Weak<NodeState>>,
}

impl<T> Slot<T> {
    /// Add the context's node to the listener set, once.
    fn track(&mut self, ctx: &BuildContext<'_>) {
        let Some(node) = ctx.node() else {
            return;
        };
        let weak = node.downgrade();
        self.listeners.retain(|w| w.strong_count() > 0);
        if !self.listeners.iter().any(|w| w.ptr_eq(&weak)) {
            self.listeners.push(weak);
        }
    }

    fn live_listeners(&self) -> usize {
        self.listeners.iter().filter(|w| w.strong_count() > 0).count()
    }
}

struct Cell<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Cell<T> {
    fn new(value: T) -> Self {
        Self { slot: Arc::new(Mutex::new(Slot { value, listeners: Vec::new() })) }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with<R>(&self, ctx: &BuildContext<'_>, f: impl FnOnce(&T) -> R) -> R {
        let mut slot = self.lock();
        slot.track(ctx);
        f(&slot.value)
    }

    fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock().value)
    }

    /// Replace the value when `changed(old, new)` holds, then mark every
    /// drained listener dirty outside the lock.
    fn replace(&self, value: T, changed: impl FnOnce(&T, &T) -> bool) -> bool {
        let listeners = {
            let mut slot = self.lock();
            if !changed(&slot.value, &value) {
                return false;
            }
            slot.value = value;
            std::mem::take(&mut slot.listeners)
        };
        notify(listeners);
        true
    }

    fn listener_count(&self) -> usize {
        self.lock().live_listeners()
    }
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self { slot: Arc::clone(&self.slot) }
    }
}

fn notify(listeners: Vec<Weak<NodeState>>) {
    let mut woken = 0usize;
    for node in listeners.iter().filter_map(Weak::upgrade) {
        node.mark_dirty();
        woken += 1;
    }
    if woken > 0 {
        tracing::trace!(listeners = woken, "signal changed");
    }
}

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

/// A reactive cell with equality-gated change notification.
///
/// ```
/// use trellis_tui::reactive::{BuildContext, Signal};
///
/// let count = Signal::new(0);
/// count.set(1);
/// assert_eq!(count.get(&BuildContext::untracked()), 1);
/// ```
pub struct Signal<T> {
    cell: Cell<T>,
}

impl<T> Signal<T> {
    /// Create a signal holding `value`.
    pub fn new(value: T) -> Self {
        Self { cell: Cell::new(value) }
    }

    /// Read the value, subscribing the context's node.
    pub fn get(&self, ctx: &BuildContext<'_>) -> T
    where
        T: Clone,
    {
        self.cell.with(ctx, T::clone)
    }

    /// Read by reference, subscribing the context's node.
    pub fn with<R>(&self, ctx: &BuildContext<'_>, f: impl FnOnce(&T) -> R) -> R {
        self.cell.with(ctx, f)
    }

    /// Read the value without subscribing anything.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.cell.peek_with(T::clone)
    }

    /// Read by reference without subscribing anything.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.cell.peek_with(f)
    }

    /// Number of live subscribed nodes.
    pub fn listener_count(&self) -> usize {
        self.cell.listener_count()
    }
}

impl<T: PartialEq> Signal<T> {
    /// Store `value`. A value equal to the current one is a no-op;
    /// otherwise every subscriber is marked dirty and unsubscribed.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        self.cell.replace(value, |old, new| old != new)
    }

    /// `set(f(&self.peek()))`. `f` runs without the lock held, so it may
    /// read this signal.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool
    where
        T: Clone,
    {
        let next = f(&self.peek());
        self.set(next)
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { cell: self.cell.clone() }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.peek_with(|v| f.debug_struct("Signal").field("value", v).finish())
    }
}

// ---------------------------------------------------------------------------
// AnySignal
// ---------------------------------------------------------------------------

/// A reactive cell that notifies on every write.
pub struct AnySignal<T> {
    cell: Cell<T>,
}

impl<T> AnySignal<T> {
    /// Create a signal holding `value`.
    pub fn new(value: T) -> Self {
        Self { cell: Cell::new(value) }
    }

    /// Read the value, subscribing the context's node.
    pub fn get(&self, ctx: &BuildContext<'_>) -> T
    where
        T: Clone,
    {
        self.cell.with(ctx, T::clone)
    }

    /// Read by reference, subscribing the context's node.
    pub fn with<R>(&self, ctx: &BuildContext<'_>, f: impl FnOnce(&T) -> R) -> R {
        self.cell.with(ctx, f)
    }

    /// Read the value without subscribing anything.
    pub fn peek(&self) -> T
    where
        T: Clone,
    {
        self.cell.peek_with(T::clone)
    }

    /// Read by reference without subscribing anything.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.cell.peek_with(f)
    }

    /// Store `value` and mark every subscriber dirty.
    pub fn set(&self, value: T) {
        self.cell.replace(value, |_, _| true);
    }

    /// `set(f(&self.peek()))`. `f` runs without the lock held.
    pub fn update(&self, f: impl FnOnce(&T) -> T)
    where
        T: Clone,
    {
        let next = f(&self.peek());
        self.set(next);
    }

    /// Number of live subscribed nodes.
    pub fn listener_count(&self) -> usize {
        self.cell.listener_count()
    }
}

impl<T> Clone for AnySignal<T> {
    fn clone(&self) -> Self {
        Self { cell: self.cell.clone() }
    }
}

impl<T: Default> Default for AnySignal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for AnySignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnySignal")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
