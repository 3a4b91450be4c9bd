#![forbid(unsafe_code)]

//! Layout actions and the dispatch seam.
//!
//! Hosts never mutate [`NineZoneState`](crate::state::NineZoneState)
//! directly. Interaction code describes what happened as a
//! [`NineZoneAction`] and hands it to a [`Dispatch`] implementation, which
//! is usually a [`LayoutStore`](crate::reducer::LayoutStore) but can be any
//! closure.

use ninezone_core::{Point, Rect};

use crate::state::{FloatingWidgetId, PanelSide, TabId, WidgetId};

/// Where a dragged tab is dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum TabDropTarget {
    /// Into an existing widget's tab strip at `index` (clamped).
    Widget { widget_id: WidgetId, index: usize },
    /// Into a new widget appended to the panel on `side`.
    Panel {
        side: PanelSide,
        new_widget_id: WidgetId,
    },
    /// Into a new floating widget.
    FloatingWidget {
        new_widget_id: FloatingWidgetId,
        bounds: Rect,
    },
}

/// A semantic layout action.
#[derive(Debug, Clone, PartialEq)]
pub enum NineZoneAction {
    /// `side` and `floating_widget_id` record the host's context when the
    /// gesture started. The reducer resolves placement from the state.
    WidgetTabClick {
        side: Option<PanelSide>,
        widget_id: WidgetId,
        id: TabId,
    },
    WidgetTabDoubleClick {
        side: Option<PanelSide>,
        floating_widget_id: Option<FloatingWidgetId>,
        widget_id: WidgetId,
        id: TabId,
    },
    WidgetTabDragStart {
        floating_widget_id: Option<FloatingWidgetId>,
        widget_id: WidgetId,
        id: TabId,
        /// Pointer position when the drag started.
        position: Point,
    },
    WidgetTabDragEnd {
        target: TabDropTarget,
    },
    FloatingWidgetBringToFront {
        id: FloatingWidgetId,
    },
}

impl NineZoneAction {
    /// Stable action type name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::WidgetTabClick { .. } => "WIDGET_TAB_CLICK",
            Self::WidgetTabDoubleClick { .. } => "WIDGET_TAB_DOUBLE_CLICK",
            Self::WidgetTabDragStart { .. } => "WIDGET_TAB_DRAG_START",
            Self::WidgetTabDragEnd { .. } => "WIDGET_TAB_DRAG_END",
            Self::FloatingWidgetBringToFront { .. } => "FLOATING_WIDGET_BRING_TO_FRONT",
        }
    }
}

/// Receiver of layout actions.
pub trait Dispatch {
    fn dispatch(&mut self, action: NineZoneAction);
}

impl<F: FnMut(NineZoneAction)> Dispatch for F {
    fn dispatch(&mut self, action: NineZoneAction) {
        self(action);
    }
}

/// Records every dispatched action in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLog {
    actions: Vec<NineZoneAction>,
}

impl ActionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn actions(&self) -> &[NineZoneAction] {
        &self.actions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Drain the recorded actions.
    pub fn take(&mut self) -> Vec<NineZoneAction> {
        std::mem::take(&mut self.actions)
    }
}

impl Dispatch for ActionLog {
    fn dispatch(&mut self, action: NineZoneAction) {
        self.actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_dispatch() {
        let mut seen = Vec::new();
        let mut sink = |a: NineZoneAction| seen.push(a.kind());
        sink.dispatch(NineZoneAction::FloatingWidgetBringToFront { id: "fw1".into() });
        assert_eq!(seen, vec!["FLOATING_WIDGET_BRING_TO_FRONT"]);
    }

    #[test]
    fn log_records_in_order() {
        let mut log = ActionLog::new();
        log.dispatch(NineZoneAction::FloatingWidgetBringToFront { id: "a".into() });
        log.dispatch(NineZoneAction::FloatingWidgetBringToFront { id: "b".into() });
        assert_eq!(log.len(), 2);
        let drained = log.take();
        assert!(log.is_empty());
        assert_eq!(
            drained[1],
            NineZoneAction::FloatingWidgetBringToFront { id: "b".into() }
        );
    }
}
