#![forbid(unsafe_code)]

//! Widget tab host.
//!
//! A [`WidgetTab`] binds one tab of one widget to a
//! [`PointerGestureClassifier`] and translates the classifier's outcomes
//! into [`NineZoneAction`]s. The host view forwards raw pointer input and
//! wakes the tab when [`WidgetTab::next_deadline`] passes.
//!
//! # Example
//!
//! ```
//! use ninezone_layout::{ActionLog, NineZoneAction, PanelSide, WidgetTab};
//! use ninezone_core::Point;
//! use web_time::{Duration, Instant};
//!
//! let mut tab = WidgetTab::new("w1", "t1").with_side(PanelSide::Left);
//! let mut log = ActionLog::new();
//! let t0 = Instant::now();
//!
//! tab.pointer_down(Point::ORIGIN, t0, &mut log);
//! tab.pointer_up(Point::ORIGIN, t0, &mut log);
//! assert!(log.is_empty());
//!
//! tab.tick(t0 + Duration::from_millis(300), &mut log);
//! assert_eq!(log.actions()[0].kind(), "WIDGET_TAB_CLICK");
//! ```

use ninezone_core::{
    Gesture, GestureConfig, InputEvent, Point, PointerGestureClassifier, TimerHandle,
};
use web_time::Instant;

use crate::action::{Dispatch, NineZoneAction};
use crate::error::{LayoutError, Result};
use crate::state::{FloatingWidgetId, NineZoneState, PanelSide, TabId, WidgetId, WidgetLocation};

/// Interaction state of a single widget tab.
#[derive(Debug)]
pub struct WidgetTab {
    tab_id: TabId,
    widget_id: WidgetId,
    side: Option<PanelSide>,
    floating_widget_id: Option<FloatingWidgetId>,
    classifier: PointerGestureClassifier<TabId>,
}

impl WidgetTab {
    /// Tab `tab_id` hosted by `widget_id`, with no panel or floating context.
    #[must_use]
    pub fn new(widget_id: impl Into<WidgetId>, tab_id: impl Into<TabId>) -> Self {
        Self {
            tab_id: tab_id.into(),
            widget_id: widget_id.into(),
            side: None,
            floating_widget_id: None,
            classifier: PointerGestureClassifier::default(),
        }
    }

    /// Build a tab host with the context `state` currently gives `tab_id`.
    pub fn for_tab(state: &NineZoneState, tab_id: &str) -> Result<Self> {
        let (widget_id, _) = state
            .tab_location(tab_id)
            .ok_or_else(|| LayoutError::UnknownTab(tab_id.to_owned()))?;
        let tab = Self::new(widget_id.clone(), tab_id);
        Ok(match state.widget_location(widget_id) {
            Some(WidgetLocation::Panel(side)) => tab.with_side(side),
            Some(WidgetLocation::Floating(id)) => tab.with_floating_widget(id),
            None => tab,
        })
    }

    #[must_use]
    pub fn with_side(mut self, side: PanelSide) -> Self {
        self.side = Some(side);
        self
    }

    #[must_use]
    pub fn with_floating_widget(mut self, id: impl Into<FloatingWidgetId>) -> Self {
        self.floating_widget_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: GestureConfig) -> Self {
        self.classifier.set_config(config);
        self
    }

    #[must_use]
    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    #[must_use]
    pub fn side(&self) -> Option<PanelSide> {
        self.side
    }

    #[must_use]
    pub fn floating_widget_id(&self) -> Option<&str> {
        self.floating_widget_id.as_deref()
    }

    /// Whether a drag started from this tab is still held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.classifier.is_dragging()
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.classifier.next_deadline()
    }

    /// Handle of the currently armed click timer.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.classifier.pending_timer()
    }

    /// Route a raw input event to the matching handler.
    pub fn handle_event(&mut self, event: &InputEvent, now: Instant, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.process(event, &self.tab_id, now);
        self.forward(outcome, dispatch);
        if matches!(event, InputEvent::PointerMove(_)) {
            self.drain_queued(now, dispatch);
        }
    }

    pub fn pointer_down(&mut self, pos: Point, now: Instant, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.on_pointer_down(self.tab_id.clone(), pos, now);
        self.forward(outcome, dispatch);
    }

    /// A move that starts a drag after an overdue click dispatches the click
    /// and then the drag start.
    pub fn pointer_move(&mut self, pos: Point, now: Instant, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.on_pointer_move(pos, now);
        self.forward(outcome, dispatch);
        self.drain_queued(now, dispatch);
    }

    pub fn pointer_up(&mut self, pos: Point, now: Instant, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.on_pointer_up(pos, now);
        self.forward(outcome, dispatch);
    }

    pub fn touch_start(&mut self, touches: usize, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.on_touch_start(self.tab_id.clone(), touches);
        self.forward(outcome, dispatch);
    }

    /// Resolve a pending click whose window has closed by `now`.
    pub fn tick(&mut self, now: Instant, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.poll(now);
        self.forward(outcome, dispatch);
    }

    /// Host timer callback. Stale handles are ignored.
    pub fn timer_elapsed(&mut self, handle: TimerHandle, now: Instant, dispatch: &mut impl Dispatch) {
        let outcome = self.classifier.on_timer(handle, now);
        self.forward(outcome, dispatch);
    }

    /// Drop any in-progress gesture.
    pub fn reset(&mut self) {
        self.classifier.reset();
    }

    fn drain_queued(&mut self, now: Instant, dispatch: &mut impl Dispatch) {
        // The click timer is cancelled while dragging, so this only yields a
        // queued drag start.
        if self.classifier.is_dragging() {
            let outcome = self.classifier.poll(now);
            self.forward(outcome, dispatch);
        }
    }

    fn forward(&self, outcome: Option<Gesture<TabId>>, dispatch: &mut impl Dispatch) {
        if let Some(action) = outcome.and_then(|g| self.action_for(g)) {
            tracing::trace!(action = action.kind(), tab = %self.tab_id, "tab dispatch");
            dispatch.dispatch(action);
        }
    }

    fn action_for(&self, gesture: Gesture<TabId>) -> Option<NineZoneAction> {
        let action = match gesture {
            Gesture::Click { target } => NineZoneAction::WidgetTabClick {
                side: self.side,
                widget_id: self.widget_id.clone(),
                id: target,
            },
            Gesture::DoubleClick { target } => NineZoneAction::WidgetTabDoubleClick {
                side: self.side,
                floating_widget_id: self.floating_widget_id.clone(),
                widget_id: self.widget_id.clone(),
                id: target,
            },
            Gesture::DragStart {
                target, position, ..
            } => NineZoneAction::WidgetTabDragStart {
                floating_widget_id: self.floating_widget_id.clone(),
                widget_id: self.widget_id.clone(),
                id: target,
                position,
            },
            // Only floating widgets have a z-order.
            Gesture::BringToFront { .. } => NineZoneAction::FloatingWidgetBringToFront {
                id: self.floating_widget_id.clone()?,
            },
        };
        Some(action)
    }
}
