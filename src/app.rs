//! App: configuration, the render pass, input routing and the run loop.
//!
//! [`App`] owns the widget tree and every piece of per-frame state. A render
//! pass rebuilds dirty nodes, lays the resolved tree out against the screen,
//! and walks it once to fill the widget registry, the focus order, the
//! widget keybinds and the frame buffer. Input is routed against the state
//! of the last pass. [`App::headless`] skips the terminal entirely for tests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::animation::AnimationController;
use crate::error::{Error, Result};
use crate::event::binding::{KeyBindingRegistry, Keybind};
use crate::event::click::{ClickChain, DEFAULT_CLICK_TIMEOUT};
use crate::event::context::{ClickEvent, EventContext, FocusRequest, ScrollEvent};
use crate::event::focus::{FocusCollector, FocusManager};
use crate::event::hover::{HoverEvent, HoverTracker};
use crate::event::input::{InputEvent, KeyEvent, MouseAction, MouseButton, MouseEvent};
use crate::event::registry::WidgetRegistry;
use crate::geometry::{Offset, Rect, Size};
use crate::layout::{compute_layout, ComputedLayout, Constraints};
use crate::reactive::{AnySignal, Signal};
use crate::render::compositor::{CellUpdate, Compositor};
use crate::render::driver::Terminal;
use crate::widget::{Element, Widget, WidgetRef, WidgetTree};

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional window title.
    pub title: Option<String>,
    /// Animation tick rate. Zero is treated as one.
    pub fps: u32,
    /// Window in which repeated clicks on one target form a chain.
    pub click_timeout: Duration,
    /// Capture mouse input.
    pub mouse: bool,
    /// Draw on the alternate screen.
    pub alt_screen: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            fps: 60,
            click_timeout: DEFAULT_CLICK_TIMEOUT,
            mouse: true,
            alt_screen: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    pub fn with_click_timeout(mut self, timeout: Duration) -> Self {
        self.click_timeout = timeout;
        self
    }

    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.alt_screen = alt_screen;
        self
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Clonable stop signal for [`App::run`].
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Side effects collected from one handler invocation.
#[derive(Debug, Default)]
struct Outcome {
    quit: bool,
    focus: Option<FocusRequest>,
}

impl Outcome {
    fn from_context(mut cx: EventContext<'_>) -> Self {
        Self { quit: cx.quit_requested(), focus: cx.take_focus_request() }
    }
}

enum Step {
    Input(Option<InputEvent>),
    Tick,
    Cancelled,
}

/// The interactive runtime.
pub struct App {
    config: AppConfig,
    tree: WidgetTree,
    registry: WidgetRegistry,
    focus: FocusManager,
    focus_signal: AnySignal<Option<String>>,
    hover: HoverTracker,
    clicks: ClickChain,
    bindings: KeyBindingRegistry,
    keybinds: Vec<Keybind>,
    animations: AnimationController,
    layout: Option<ComputedLayout>,
    screen: Compositor,
    presented: Compositor,
    running: bool,
}

impl App {
    /// An app with a zero-sized screen; [`run`](Self::run) sizes it from the
    /// terminal.
    pub fn new(config: AppConfig) -> Self {
        Self {
            tree: WidgetTree::new(),
            registry: WidgetRegistry::new(),
            focus: FocusManager::new(),
            focus_signal: AnySignal::new(None),
            hover: HoverTracker::new(),
            clicks: ClickChain::new(config.click_timeout),
            bindings: KeyBindingRegistry::with_defaults(),
            keybinds: Vec::new(),
            animations: AnimationController::new(config.fps),
            layout: None,
            screen: Compositor::new(0, 0),
            presented: Compositor::new(0, 0),
            running: true,
            config,
        }
    }

    /// An app of fixed size with no terminal, for tests.
    pub fn headless(width: u16, height: u16) -> Self {
        let mut app = Self::new(AppConfig::default());
        app.screen = Compositor::new(width, height);
        app
    }

    /// Replace the root widget. Takes effect on the next render.
    pub fn mount(&mut self, root: impl Widget + 'static) {
        self.mount_ref(Arc::new(root));
    }

    pub fn mount_ref(&mut self, root: WidgetRef) {
        self.tree.mount(root);
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingRegistry {
        &mut self.bindings
    }

    /// The focused widget id, mirrored for widgets that draw focus state.
    pub fn focus_signal(&self) -> AnySignal<Option<String>> {
        self.focus_signal.clone()
    }

    /// The hovered widget id.
    pub fn hover_signal(&self) -> Signal<Option<String>> {
        self.hover.signal()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.hovered()
    }

    pub fn focus_manager(&self) -> &FocusManager {
        &self.focus
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Layout of the last render pass.
    pub fn layout(&self) -> Option<&ComputedLayout> {
        self.layout.as_ref()
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The frame produced by the last render pass.
    pub fn screen(&self) -> &Compositor {
        &self.screen
    }

    pub fn animations(&mut self) -> &mut AnimationController {
        &mut self.animations
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.running = false;
    }

    // ── Render pass ──────────────────────────────────────────────────

    /// Rebuild, lay out and paint the tree, then re-resolve hover against
    /// the new bounds. A hover change repaints once more.
    pub fn render(&mut self) {
        self.compose();
        if self.reconcile_hover() {
            self.compose();
        }
    }

    fn compose(&mut self) {
        self.screen.clear();
        self.registry.reset();
        self.keybinds.clear();

        let mut focusables = FocusCollector::new();
        match self.tree.resolve() {
            Some(root) => {
                let area = self.screen.area();
                let layout = compute_layout(&root, Constraints::loose(area.size()));
                let margin = layout.margin;
                let mut paint = Paint {
                    registry: &mut self.registry,
                    screen: &mut self.screen,
                    focusables: &mut focusables,
                    keybinds: &mut self.keybinds,
                };
                paint.element(&root, &layout, Offset::new(margin.left, margin.top), area);
                trace!(
                    rebuilds = self.tree.last_rebuilds(),
                    widgets = self.registry.len(),
                    width = layout.size.width,
                    height = layout.size.height,
                    "frame composed"
                );
                self.layout = Some(layout);
            }
            None => self.layout = None,
        }

        let previous = self.focus.focused_entry().map(|entry| Arc::clone(&entry.widget));
        self.focus.set_focusables(focusables.finish());
        if self.focus.focused().is_none() {
            if let Some(widget) = previous {
                self.blur_unmounted(&widget);
                self.focus_signal.set(None);
            }
        }
    }

    /// The focused widget left the tree: focus is already cleared, so only
    /// `on_blur` runs. Quit is honored, focus requests are dropped.
    fn blur_unmounted(&mut self, widget: &WidgetRef) {
        let mut cx = EventContext::new(&mut self.animations);
        if let Some(focusable) = widget.as_focusable() {
            focusable.on_blur(&mut cx);
        }
        if cx.quit_requested() {
            self.running = false;
        }
    }

    /// Cells changed since the last call, for presenting.
    pub fn take_updates(&mut self) -> Vec<CellUpdate> {
        let updates = self.screen.diff(&self.presented);
        self.presented = self.screen.clone();
        updates
    }

    /// Resize the screen and force a full redraw.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.screen = Compositor::with_size(Size::new(width, height));
        self.presented = Compositor::new(0, 0);
        debug!(width, height, "screen resized");
    }

    // ── Input routing ────────────────────────────────────────────────

    /// Route one input event, then render.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(&key),
            InputEvent::Mouse(mouse) => self.handle_mouse(&mouse),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::FocusGained | InputEvent::FocusLost | InputEvent::Paste(_) => {
                trace!(?event, "input ignored");
            }
        }
        if self.running {
            self.render();
        }
    }

    /// Advance animations by one frame, then render.
    pub fn handle_tick(&mut self) {
        let finished = self.animations.update();
        trace!(finished, active = self.animations.len(), "animation tick");
        self.render();
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let focused = self.focus.focused_entry().map(|entry| Arc::clone(&entry.widget));
        let mut cx = EventContext::new(&mut self.animations);

        let mut handled = focused
            .as_ref()
            .and_then(|widget| widget.as_key_handler())
            .is_some_and(|handler| handler.on_key(key, &mut cx));
        if !handled {
            if let Some(bind) = self.keybinds.iter().find(|bind| bind.matches(key)) {
                trace!(description = %bind.description, "widget keybind");
                bind.action.run(&mut cx);
                handled = true;
            }
        }
        if !handled {
            match self.bindings.resolve(key) {
                Some(action) => action.run(&mut cx),
                None => trace!(?key, "unbound key"),
            }
        }

        let outcome = Outcome::from_context(cx);
        self.apply(outcome);
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        self.update_hover(mouse);
        match mouse.kind {
            MouseAction::Down(button) => self.mouse_down(mouse, button),
            MouseAction::Up(button) => self.mouse_up(mouse, button),
            MouseAction::ScrollUp => self.scroll(mouse, -1),
            MouseAction::ScrollDown => self.scroll(mouse, 1),
            MouseAction::Moved | MouseAction::Drag(_) => {}
        }
    }

    /// Topmost clickable under the pointer, with its bounds and click-chain
    /// target.
    fn clickable_at(&self, x: i32, y: i32) -> Option<(WidgetRef, Rect, String)> {
        let index = self.registry.position_where(x, y, |w| w.as_clickable().is_some())?;
        let entry = self.registry.entries().get(index)?;
        let target = entry.id.clone().unwrap_or_else(|| format!("#{index}"));
        Some((Arc::clone(&entry.widget), entry.bounds, target))
    }

    fn mouse_down(&mut self, mouse: &MouseEvent, button: MouseButton) {
        let Some((widget, bounds, target)) = self.clickable_at(mouse.x, mouse.y) else {
            return;
        };
        let count = self.clicks.next_click(&target, button, mouse.x, mouse.y, Instant::now());
        let event = ClickEvent {
            count,
            button,
            x: mouse.x - bounds.x,
            y: mouse.y - bounds.y,
            modifiers: mouse.modifiers,
        };

        let mut cx = EventContext::new(&mut self.animations);
        if let Some(clickable) = widget.as_clickable() {
            clickable.on_click(&event, &mut cx);
        }
        let mut outcome = Outcome::from_context(cx);
        if outcome.focus.is_none() && widget.as_focusable().is_some() {
            outcome.focus = widget.widget_id().map(|id| FocusRequest::Focus(id.to_owned()));
        }
        self.apply(outcome);
    }

    fn mouse_up(&mut self, mouse: &MouseEvent, button: MouseButton) {
        let Some((widget, bounds, target)) = self.clickable_at(mouse.x, mouse.y) else {
            return;
        };
        let event = ClickEvent {
            count: self.clicks.release_count(&target, button),
            button,
            x: mouse.x - bounds.x,
            y: mouse.y - bounds.y,
            modifiers: mouse.modifiers,
        };
        let mut cx = EventContext::new(&mut self.animations);
        if let Some(clickable) = widget.as_clickable() {
            clickable.on_release(&event, &mut cx);
        }
        let outcome = Outcome::from_context(cx);
        self.apply(outcome);
    }

    fn scroll(&mut self, mouse: &MouseEvent, delta: i32) {
        let Some((widget, bounds, _)) = self.clickable_at(mouse.x, mouse.y) else {
            return;
        };
        let event = ScrollEvent {
            delta,
            x: mouse.x - bounds.x,
            y: mouse.y - bounds.y,
            modifiers: mouse.modifiers,
        };
        let mut cx = EventContext::new(&mut self.animations);
        if let Some(clickable) = widget.as_clickable() {
            clickable.on_scroll(&event, &mut cx);
        }
        let outcome = Outcome::from_context(cx);
        self.apply(outcome);
    }

    fn update_hover(&mut self, mouse: &MouseEvent) {
        let registry = &self.registry;
        let mut cx = EventContext::new(&mut self.animations);
        self.hover.update(
            mouse.x,
            mouse.y,
            mouse.modifiers,
            mouse.kind.button(),
            |x, y| hover_target(registry, x, y),
            |event| dispatch_hover(registry, event, &mut cx),
        );
        let outcome = Outcome::from_context(cx);
        self.apply(outcome);
    }

    /// Whether any hover event fired.
    fn reconcile_hover(&mut self) -> bool {
        let registry = &self.registry;
        let mut cx = EventContext::new(&mut self.animations);
        let mut fired = false;
        self.hover.reconcile(
            |x, y| hover_target(registry, x, y),
            |event| {
                fired = true;
                dispatch_hover(registry, event, &mut cx);
            },
        );
        let outcome = Outcome::from_context(cx);
        self.apply(outcome);
        fired
    }

    // ── Handler outcomes ─────────────────────────────────────────────

    fn apply(&mut self, outcome: Outcome) {
        if outcome.quit {
            debug!("quit requested");
            self.running = false;
        }
        if let Some(request) = outcome.focus {
            self.apply_focus(request);
        }
    }

    fn apply_focus(&mut self, request: FocusRequest) {
        let before = self.focus.focused().map(str::to_owned);
        match request {
            FocusRequest::Focus(id) => {
                if !self.focus.request_focus(&id) {
                    debug!(id = %id, "focus request rejected");
                }
            }
            FocusRequest::Next => {
                self.focus.focus_next();
            }
            FocusRequest::Previous => {
                self.focus.focus_previous();
            }
            FocusRequest::Clear => self.focus.clear(),
        }
        let after = self.focus.focused().map(str::to_owned);
        if before == after {
            return;
        }

        let lookup = |id: &Option<String>| {
            let id = id.as_deref()?;
            let entry = self.focus.focusables().iter().find(|e| e.id == id)?;
            Some(Arc::clone(&entry.widget))
        };
        let (old, new) = (lookup(&before), lookup(&after));

        let mut cx = EventContext::new(&mut self.animations);
        if let Some(focusable) = old.as_ref().and_then(|w| w.as_focusable()) {
            focusable.on_blur(&mut cx);
        }
        if let Some(focusable) = new.as_ref().and_then(|w| w.as_focusable()) {
            focusable.on_focus(&mut cx);
        }
        // Focus requests from focus callbacks are dropped; quit is honored.
        if cx.quit_requested() {
            self.running = false;
        }
        self.focus_signal.set(after);
    }

    // ── Run loop ─────────────────────────────────────────────────────

    /// Drive the app against `terminal` until quit, cancellation or a
    /// terminal failure.
    ///
    /// Shutdown always runs in the same order: mouse capture off, terminal
    /// restored, animation controller stopped. The first error wins.
    pub async fn run<T: Terminal>(&mut self, terminal: &mut T, cancel: CancelToken) -> Result<()> {
        let result = match terminal.enter(&self.config) {
            Ok(()) => self.event_loop(terminal, &cancel).await,
            Err(error) => Err(error),
        };

        let mouse = terminal.disable_mouse();
        let restore = terminal.restore();
        self.animations.stop();
        debug!(ok = result.is_ok(), "run loop stopped");
        result.and(mouse).and(restore)
    }

    async fn event_loop<T: Terminal>(&mut self, terminal: &mut T, cancel: &CancelToken) -> Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);
        let mut events = terminal.events()?;
        self.render();
        terminal.present(&self.take_updates())?;
        debug!(width = size.width, height = size.height, "run loop started");

        while self.running {
            let step = tokio::select! {
                _ = cancel.cancelled() => Step::Cancelled,
                event = events.recv() => Step::Input(event),
                Some(_) = self.animations.next_tick() => Step::Tick,
            };
            match step {
                Step::Cancelled => {
                    debug!("run loop cancelled");
                    break;
                }
                Step::Input(Some(event)) => self.handle_input(event),
                Step::Input(None) => return Err(Error::EventChannelClosed),
                Step::Tick => self.handle_tick(),
            }

            let updates = self.take_updates();
            if !updates.is_empty() {
                terminal.present(&updates)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("widgets", &self.registry.len())
            .field("focused", &self.focus.focused())
            .field("hovered", &self.hover.hovered())
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Render walk
// ---------------------------------------------------------------------------

/// One depth-first walk over the resolved tree and its layout.
struct Paint<'a> {
    registry: &'a mut WidgetRegistry,
    screen: &'a mut Compositor,
    focusables: &'a mut FocusCollector,
    keybinds: &'a mut Vec<Keybind>,
}

impl Paint<'_> {
    fn element(&mut self, element: &Element, layout: &ComputedLayout, origin: Offset, clip: Rect) {
        let bounds = layout.size.at(origin);
        let visible = bounds.intersection(clip);

        // Composites share their child's bounds and sit beneath it.
        let mut traps = 0;
        for widget in element.owners.iter().chain(std::iter::once(&element.widget)) {
            self.registry.push(Arc::clone(widget), bounds);
            if let Some(trap) = widget.focus_trap() {
                self.focusables.push_trap(trap);
                traps += 1;
            }
            self.collect(widget);
        }

        let strips = element.widget.render(bounds);
        self.screen.place_strips(&strips, visible);

        for (child, placed) in element.children.iter().zip(&layout.children) {
            self.element(child, &placed.layout, origin + placed.offset, visible);
        }
        for _ in 0..traps {
            self.focusables.pop_trap();
        }
    }

    fn collect(&mut self, widget: &WidgetRef) {
        self.keybinds.extend(widget.keybinds());
        if widget.as_focusable().is_none() {
            return;
        }
        match widget.widget_id() {
            Some(id) => self.focusables.collect(Arc::clone(widget), id),
            None => debug!(widget = widget.widget_type(), "focusable widget without id skipped"),
        }
    }
}

/// Topmost widget with an id under `(x, y)`.
fn hover_target(registry: &WidgetRegistry, x: i32, y: i32) -> Option<(String, Rect)> {
    let entry = registry.widget_at_where(x, y, |w| w.widget_id().is_some())?;
    Some((entry.id.clone()?, entry.bounds))
}

fn dispatch_hover(registry: &WidgetRegistry, event: &HoverEvent, cx: &mut EventContext<'_>) {
    let hoverable = registry.widget_by_id(&event.widget_id).and_then(|e| e.widget.as_hoverable());
    if let Some(hoverable) = hoverable {
        hoverable.on_hover(event, cx);
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::binding::BindingAction;
    use crate::event::input::{Key, Modifiers};
    use crate::event::hover::HoverKind;
    use crate::layout::LayoutKind;
    use crate::widget::{Focusable, Hoverable};
    use crate::widgets::{Button, Component, Flex, Label, TrapScope};
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn key(code: Key) -> InputEvent {
        InputEvent::Key(KeyEvent::plain(code))
    }

    fn mouse(kind: MouseAction, x: i32, y: i32) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(kind, x, y))
    }

    fn buttons(app: &App, ids: &[&str]) -> Flex {
        ids.iter().fold(Flex::column(), |col, id| {
            col.child(Button::new(*id, id.to_uppercase()).focus_signal(app.focus_signal()))
        })
    }

    /// Focusable, hoverable leaf that records its callbacks.
    #[derive(Default)]
    struct Tracked {
        blurs: Arc<AtomicUsize>,
        hovers: Arc<Mutex<Vec<HoverKind>>>,
    }

    impl Widget for Tracked {
        fn widget_type(&self) -> &str {
            "Tracked"
        }

        fn layout_kind(&self) -> LayoutKind {
            LayoutKind::Leaf { content: Size::new(4, 1) }
        }

        fn widget_id(&self) -> Option<&str> {
            Some("t")
        }

        fn as_focusable(&self) -> Option<&dyn Focusable> {
            Some(self)
        }

        fn as_hoverable(&self) -> Option<&dyn Hoverable> {
            Some(self)
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl Focusable for Tracked {
        fn on_blur(&self, _cx: &mut EventContext<'_>) {
            self.blurs.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl Hoverable for Tracked {
        fn on_hover(&self, event: &HoverEvent, _cx: &mut EventContext<'_>) {
            self.hovers.lock().unwrap().push(event.kind);
        }
    }

    // -----------------------------------------------------------------------
    // Config
    // -----------------------------------------------------------------------

    #[test]
    fn config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.fps, 60);
        assert_eq!(config.click_timeout, Duration::from_millis(500));
        assert!(config.mouse && config.alt_screen);
        assert!(config.title.is_none());
    }

    #[test]
    fn config_builder() {
        let config = AppConfig::new().with_title("demo").with_fps(0).with_mouse(false).with_alt_screen(false);
        assert_eq!(config.title.as_deref(), Some("demo"));
        assert_eq!(config.fps, 1);
        assert!(!config.mouse && !config.alt_screen);
    }

    // -----------------------------------------------------------------------
    // Render pass
    // -----------------------------------------------------------------------

    #[test]
    fn render_without_root_is_empty() {
        let mut app = App::headless(10, 2);
        app.render();
        assert!(app.registry().is_empty());
        assert!(app.layout().is_none());
    }

    #[test]
    fn render_registers_in_paint_order() {
        let mut app = App::headless(20, 5);
        app.mount(Flex::column().child(Label::new("a")).child(Label::new("b")));
        app.render();

        let types: Vec<&str> = app.registry().entries().iter().map(|e| e.widget.widget_type()).collect();
        assert_eq!(types, vec!["Column", "Label", "Label"]);
        assert_eq!(app.registry().entries()[2].bounds, Rect::new(0, 1, 1, 1));
        assert_eq!(app.screen().to_text(), "a\nb\n\n\n");
    }

    #[test]
    fn take_updates_returns_only_changes() {
        let mut app = App::headless(4, 1);
        app.mount(Label::new("ab"));
        app.render();
        assert_eq!(app.take_updates().len(), 4);
        app.render();
        assert!(app.take_updates().is_empty());
    }

    // -----------------------------------------------------------------------
    // Keys and focus
    // -----------------------------------------------------------------------

    #[test]
    fn tab_cycles_focus_and_mirrors_signal() {
        let mut app = App::headless(20, 5);
        app.mount(buttons(&app, &["a", "b"]));
        app.render();
        assert_eq!(app.focused(), None);

        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("a"));
        assert_eq!(app.focus_signal().peek(), Some("a".to_owned()));
        app.handle_input(key(Key::Tab));
        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("a"));
        app.handle_input(key(Key::BackTab));
        assert_eq!(app.focused(), Some("b"));
    }

    #[test]
    fn trap_confines_tab() {
        let mut app = App::headless(30, 6);
        let signal = app.focus_signal();
        app.mount(
            Flex::column()
                .child(Button::new("outside", "O").focus_signal(signal.clone()))
                .child(TrapScope::new(
                    "dialog",
                    Flex::row()
                        .child(Button::new("yes", "Y").focus_signal(signal.clone()))
                        .child(Button::new("no", "N").focus_signal(signal)),
                )),
        );
        app.render();
        assert_eq!(app.focus_manager().focusables()[1].trap_id, "dialog");

        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("outside"));
        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("yes"));
        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("no"));
        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("yes"));
    }

    #[test]
    fn focused_key_handler_runs_before_bindings() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let mut app = App::headless(20, 3);
        app.mount(Button::new("ok", "OK").on_press(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        app.render();
        app.handle_input(key(Key::Enter));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        app.handle_input(key(Key::Tab));
        app.handle_input(key(Key::Enter));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn widget_keybinds_precede_app_bindings() {
        struct Shortcut;
        impl Widget for Shortcut {
            fn widget_type(&self) -> &str {
                "Shortcut"
            }
            fn keybinds(&self) -> Vec<Keybind> {
                vec![Keybind::new(Key::Char('q'), Modifiers::NONE, "quit", BindingAction::Quit)]
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        let mut app = App::headless(10, 2);
        app.bindings_mut().bind(Key::Char('q'), Modifiers::NONE, BindingAction::FocusNext);
        app.mount(Shortcut);
        app.render();
        app.handle_input(key(Key::Char('q')));
        assert!(!app.is_running());
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::headless(10, 2);
        app.render();
        app.handle_input(InputEvent::Key(KeyEvent::new(Key::Char('c'), Modifiers::CTRL)));
        assert!(!app.is_running());
    }

    // -----------------------------------------------------------------------
    // Mouse
    // -----------------------------------------------------------------------

    #[test]
    fn click_presses_and_focuses() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let mut app = App::headless(20, 3);
        app.mount(Button::new("go", "Go").on_press(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        app.render();

        app.handle_input(mouse(MouseAction::Down(MouseButton::Left), 1, 0));
        app.handle_input(mouse(MouseAction::Up(MouseButton::Left), 1, 0));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(app.focused(), Some("go"));

        app.handle_input(mouse(MouseAction::Down(MouseButton::Left), 15, 2));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn hover_follows_pointer() {
        let mut app = App::headless(20, 4);
        app.mount(buttons(&app, &["a", "b"]));
        app.render();

        app.handle_input(mouse(MouseAction::Moved, 0, 0));
        assert_eq!(app.hovered(), Some("a"));
        app.handle_input(mouse(MouseAction::Moved, 0, 1));
        assert_eq!(app.hovered(), Some("b"));
        app.handle_input(mouse(MouseAction::Moved, 10, 3));
        assert_eq!(app.hovered(), None);
    }

    #[test]
    fn hover_reconciles_after_remount() {
        let mut app = App::headless(20, 4);
        app.mount(buttons(&app, &["a"]));
        app.render();
        app.handle_input(mouse(MouseAction::Moved, 0, 0));
        assert_eq!(app.hovered(), Some("a"));

        app.mount(Label::new("gone"));
        app.render();
        assert_eq!(app.hovered(), None);
    }

    #[test]
    fn hover_dispatches_leave_and_enter() {
        let tracked = Tracked::default();
        let hovers = Arc::clone(&tracked.hovers);
        let mut app = App::headless(20, 4);
        app.mount(Flex::column().child(tracked));
        app.render();

        app.handle_input(mouse(MouseAction::Moved, 1, 0));
        app.handle_input(mouse(MouseAction::Moved, 2, 0));
        app.handle_input(mouse(MouseAction::Moved, 10, 3));
        assert_eq!(*hovers.lock().unwrap(), vec![HoverKind::Enter, HoverKind::Leave]);
    }

    #[test]
    fn hover_styling_survives_rebuild() {
        let count = Signal::new(0);
        let mut app = App::headless(10, 1);
        let hover = app.hover_signal();
        let c = count.clone();
        app.mount(Component::new("counter", move |cx| {
            let inc = c.clone();
            Arc::new(
                Button::new("inc", format!("{}", c.get(cx)))
                    .hover_signal(hover.clone())
                    .on_press(move |_| {
                        inc.update(|n| n + 1);
                    }),
            ) as WidgetRef
        }));
        app.render();

        app.handle_input(mouse(MouseAction::Moved, 2, 0));
        assert!(app.screen().get_cell(2, 0).is_some_and(|c| c.style.bold));
        app.handle_input(mouse(MouseAction::Down(MouseButton::Left), 2, 0));
        assert_eq!(count.peek(), 1);
        assert_eq!(app.tree().last_rebuilds(), 1);
        assert_eq!(app.screen().get_cell(2, 0).map(|c| c.ch), Some('1'));
        assert!(app.screen().get_cell(2, 0).is_some_and(|c| c.style.bold));
    }

    #[test]
    fn unmounting_focused_widget_blurs_it() {
        let tracked = Tracked::default();
        let blurs = Arc::clone(&tracked.blurs);
        let mut app = App::headless(20, 2);
        app.mount(tracked);
        app.render();
        app.handle_input(key(Key::Tab));
        assert_eq!(app.focused(), Some("t"));

        app.mount(Label::new("gone"));
        app.render();
        assert_eq!(app.focused(), None);
        assert_eq!(blurs.load(Ordering::SeqCst), 1);
        assert_eq!(app.focus_signal().peek(), None);

        app.render();
        assert_eq!(blurs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn resize_reallocates_screen() {
        let mut app = App::headless(10, 2);
        app.mount(Label::new("x"));
        app.render();
        app.take_updates();
        app.handle_input(InputEvent::Resize { width: 12, height: 3 });
        assert_eq!(app.screen().size(), Size::new(12, 3));
        assert_eq!(app.take_updates().len(), 36);
    }

    // -----------------------------------------------------------------------
    // CancelToken
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn cancel_token_resolves_for_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        token.cancel();
        clone.cancelled().await;
        assert!(clone.is_cancelled());
    }
}
