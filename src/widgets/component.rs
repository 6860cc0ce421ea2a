//! Closure-backed composite widget.

use std::any::Any;
use std::sync::Arc;

use crate::reactive::BuildContext;
use crate::widget::traits::{Widget, WidgetRef};

type BuildFn = Arc<dyn Fn(&BuildContext<'_>) -> WidgetRef + Send + Sync>;

/// A composite whose build is a closure.
///
/// Signals read through the closure's context make the component rebuild
/// when they change; nothing else does.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trellis_tui::reactive::Signal;
/// use trellis_tui::widgets::{Component, Label};
///
/// let count = Signal::new(0);
/// let view = Component::new("counter", move |cx| {
///     Arc::new(Label::new(format!("count: {}", count.get(cx))))
/// });
/// assert_eq!(view.name(), "counter");
/// ```
#[derive(Clone)]
pub struct Component {
    name: String,
    build: BuildFn,
}

impl Component {
    pub fn new(
        name: impl Into<String>,
        build: impl Fn(&BuildContext<'_>) -> WidgetRef + Send + Sync + 'static,
    ) -> Self {
        Self { name: name.into(), build: Arc::new(build) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Widget for Component {
    fn widget_type(&self) -> &str {
        "Component"
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Option<WidgetRef> {
        Some((self.build)(ctx))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component").field("name", &self.name).finish_non_exhaustive()
    }
}
