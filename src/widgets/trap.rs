//! Focus trap scope.

use std::any::Any;
use std::sync::Arc;

use crate::reactive::BuildContext;
use crate::widget::traits::{Widget, WidgetRef};

/// Confines Tab navigation to the focusables beneath it while one of them
/// has focus.
///
/// `TrapScope` is a composite: it stands in for its child in layout and adds
/// nothing visible. Traps nest; an inner trap with a different id forms its
/// own cycle.
#[derive(Clone)]
pub struct TrapScope {
    trap_id: String,
    child: WidgetRef,
}

impl TrapScope {
    pub fn new(trap_id: impl Into<String>, child: impl Widget + 'static) -> Self {
        Self::from_ref(trap_id, Arc::new(child))
    }

    pub fn from_ref(trap_id: impl Into<String>, child: WidgetRef) -> Self {
        Self { trap_id: trap_id.into(), child }
    }

    pub fn trap_id(&self) -> &str {
        &self.trap_id
    }
}

impl Widget for TrapScope {
    fn widget_type(&self) -> &str {
        "TrapScope"
    }

    fn build(&self, _ctx: &BuildContext<'_>) -> Option<WidgetRef> {
        Some(Arc::clone(&self.child))
    }

    fn focus_trap(&self) -> Option<&str> {
        Some(&self.trap_id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for TrapScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrapScope")
            .field("trap_id", &self.trap_id)
            .field("child", &self.child.widget_type())
            .finish()
    }
}
