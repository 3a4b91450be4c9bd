#![forbid(unsafe_code)]

//! Gesture recognition: turns raw pointer input into semantic outcomes.
//!
//! [`PointerGestureClassifier`] is a stateful processor fed with pointer-down,
//! pointer-move, pointer-up and touch-start input. It resolves each gesture
//! session into exactly one [`Gesture`]: `Click`, `DoubleClick` or
//! `DragStart`. Touch-start produces `BringToFront` on the side, without
//! touching the session.
//!
//! # State Machine
//!
//! ```text
//!            down                 up (1st)                 timer
//!   Idle ──────────▶ Pressed ──────────────▶ Pending ─────────────▶ Click
//!                      │                        │ down (same target)
//!                      │ move ≥ threshold       ▼
//!                      ▼                     Pressed ── up (2nd) ──▶ DoubleClick
//!                  DragStart
//! ```
//!
//! # Invariants
//!
//! 1. At most one session is live. A pointer-down on another target, or one
//!    that arrives when nothing is pending, starts a fresh session and
//!    cancels any pending timer.
//! 2. Outcomes are mutually exclusive per session: `Click` XOR `DoubleClick`
//!    XOR `DragStart`.
//! 3. Drag distance is measured from the session's pointer-down origin, not
//!    incrementally.
//! 4. Once a drag starts, no click is emitted for that session and further
//!    moves are ignored until the next pointer-down.
//! 5. A deferred click only fires through the handle of the current timer
//!    arming; superseded armings are stale.
//!
//! # Failure Modes
//!
//! None are reported. Out-of-order input (move or up without a down) is a
//! no-op. If the host misses the deferred-click wakeup, the overdue click is
//! flushed by the next pointer-down or pointer-up instead of being lost.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

use crate::deferred::{DeferredTimer, TimerHandle};
use crate::event::InputEvent;
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How pointer displacement is measured against the drag threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum DistanceMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Largest displacement along a single axis.
    MaxAxis,
}

impl DistanceMetric {
    /// Displacement between `from` and `to` under this metric.
    #[inline]
    #[must_use]
    pub fn measure(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Euclidean => from.distance_to(to),
            Self::MaxAxis => from.max_axis_distance_to(to),
        }
    }
}

/// Thresholds and timeouts for gesture recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Minimum displacement (pixels) before a drag starts (default: 10).
    pub drag_threshold: f64,
    /// Time window for double-click detection (default: 300ms).
    pub double_click_window: Duration,
    /// Displacement measure (default: Euclidean).
    pub distance_metric: DistanceMetric,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 10.0,
            double_click_window: Duration::from_millis(300),
            distance_metric: DistanceMetric::Euclidean,
        }
    }
}

impl GestureConfig {
    /// Set the drag threshold in pixels.
    #[must_use]
    pub fn with_drag_threshold(mut self, pixels: f64) -> Self {
        self.drag_threshold = pixels;
        self
    }

    /// Set the double-click window.
    #[must_use]
    pub fn with_double_click_window(mut self, window: Duration) -> Self {
        self.double_click_window = window;
        self
    }

    /// Set the displacement measure.
    #[must_use]
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Semantic outcome of a gesture, carrying the identity of its target.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture<T> {
    /// One click, resolved after the double-click window closed.
    Click { target: T },
    /// Two clicks within the double-click window.
    DoubleClick { target: T },
    /// Pointer moved past the drag threshold while pressed.
    DragStart {
        target: T,
        /// Pointer-down position of the session.
        origin: Point,
        /// Position that crossed the threshold.
        position: Point,
    },
    /// Touch contact on a floating container.
    BringToFront { target: T },
}

impl<T> Gesture<T> {
    /// Target the outcome refers to.
    #[must_use]
    pub fn target(&self) -> &T {
        match self {
            Self::Click { target }
            | Self::DoubleClick { target }
            | Self::DragStart { target, .. }
            | Self::BringToFront { target } => target,
        }
    }

    /// Returns true for `Click` and `DoubleClick`.
    #[must_use]
    pub fn is_click(&self) -> bool {
        matches!(self, Self::Click { .. } | Self::DoubleClick { .. })
    }

    /// Returns true for `DragStart`.
    #[must_use]
    pub fn is_drag(&self) -> bool {
        matches!(self, Self::DragStart { .. })
    }

    /// Convert the target identity.
    pub fn map_target<U>(self, f: impl FnOnce(T) -> U) -> Gesture<U> {
        match self {
            Self::Click { target } => Gesture::Click { target: f(target) },
            Self::DoubleClick { target } => Gesture::DoubleClick { target: f(target) },
            Self::DragStart {
                target,
                origin,
                position,
            } => Gesture::DragStart {
                target: f(target),
                origin,
                position,
            },
            Self::BringToFront { target } => Gesture::BringToFront { target: f(target) },
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Transient state of one pointer-down-to-resolution interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSession<T> {
    target: T,
    origin: Point,
    down_at: Instant,
    click_count: u8,
    last_click_at: Option<Instant>,
    pressed: bool,
}

impl<T> GestureSession<T> {
    fn pressed(target: T, origin: Point, down_at: Instant) -> Self {
        Self {
            target,
            origin,
            down_at,
            click_count: 0,
            last_click_at: None,
            pressed: true,
        }
    }

    /// Target pressed at pointer-down.
    #[inline]
    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Position recorded at the latest pointer-down.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Time of the latest pointer-down.
    #[inline]
    #[must_use]
    pub fn down_at(&self) -> Instant {
        self.down_at
    }

    /// Completed down/up cycles not yet resolved.
    #[inline]
    #[must_use]
    pub fn click_count(&self) -> u8 {
        self.click_count
    }

    /// Time of the most recent completed click.
    #[inline]
    #[must_use]
    pub fn last_click_at(&self) -> Option<Instant> {
        self.last_click_at
    }

    /// Whether the pointer is currently held.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

// ---------------------------------------------------------------------------
// PointerGestureClassifier
// ---------------------------------------------------------------------------

/// Stateful classifier that resolves pointer input into [`Gesture`]s.
///
/// Every handler takes the current time from the caller. Deferred clicks are
/// resolved either by calling [`poll`](Self::poll) on each tick or by
/// scheduling a wakeup at [`next_deadline`](Self::next_deadline) and
/// reporting it through [`on_timer`](Self::on_timer).
///
/// A single event can resolve two outcomes: a move that crosses the drag
/// threshold after the pending click became due yields the overdue `Click`
/// first. The `DragStart` is then queued and returned by the next call to
/// `poll`, `on_timer`, `on_pointer_move` or `on_pointer_up`, with
/// [`next_deadline`](Self::next_deadline) reporting it as due immediately.
pub struct PointerGestureClassifier<T> {
    config: GestureConfig,
    session: Option<GestureSession<T>>,
    dragging: bool,
    timer: DeferredTimer,
    queued: Option<(Gesture<T>, Instant)>,
}

impl<T> fmt::Debug for PointerGestureClassifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerGestureClassifier")
            .field("pressed", &self.is_pressed())
            .field("dragging", &self.dragging)
            .field("pending", &self.timer.is_armed())
            .field("queued", &self.queued.is_some())
            .finish()
    }
}

impl<T> Default for PointerGestureClassifier<T> {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<T> PointerGestureClassifier<T> {
    /// Create a classifier with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            dragging: false,
            timer: DeferredTimer::new(),
            queued: None,
        }
    }

    /// Whether the pointer is held within a live session.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.pressed)
    }

    /// Whether a drag started and the pointer has not been released yet.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The live session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession<T>> {
        self.session.as_ref()
    }

    /// Handle of the pending deferred-click timer.
    #[inline]
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer.handle()
    }

    /// When the host should next call [`poll`](Self::poll).
    #[inline]
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.queued {
            Some((_, at)) => Some(*at),
            None => self.timer.deadline(),
        }
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Applies to input received afterwards.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Drop the session and cancel any pending timer without emitting.
    pub fn reset(&mut self) {
        self.session = None;
        self.dragging = false;
        self.timer.cancel();
        self.queued = None;
    }

    fn take_queued(&mut self) -> Option<Gesture<T>> {
        self.queued.take().map(|(gesture, _)| gesture)
    }
}

impl<T: Clone + PartialEq + fmt::Debug> PointerGestureClassifier<T> {
    /// Process a raw event, returning the outcome it resolves, if any.
    ///
    /// `target` is the widget under the pointer; it is only consulted for
    /// pointer-down and touch-start.
    pub fn process(&mut self, event: &InputEvent, target: &T, now: Instant) -> Option<Gesture<T>> {
        match *event {
            InputEvent::PointerDown(pos) => self.on_pointer_down(target.clone(), pos, now),
            InputEvent::PointerMove(pos) => self.on_pointer_move(pos, now),
            InputEvent::PointerUp(pos) => self.on_pointer_up(pos, now),
            InputEvent::TouchStart { touches } => self.on_touch_start(target.clone(), touches),
        }
    }

    /// Pointer pressed on `target` at `pos`.
    ///
    /// Starts a fresh session unless this press is the second half of a
    /// double-click on the same target. Only returns an outcome when an
    /// earlier click was already overdue.
    pub fn on_pointer_down(&mut self, target: T, pos: Point, now: Instant) -> Option<Gesture<T>> {
        self.dragging = false;
        let flushed = self.poll(now);

        let continues = flushed.is_none()
            && self.timer.is_armed()
            && self.session.as_ref().is_some_and(|s| s.target == target);

        if continues {
            if let Some(session) = self.session.as_mut() {
                session.origin = pos;
                session.down_at = now;
                session.pressed = true;
            }
        } else {
            if self.timer.cancel() {
                crate::trace!(?target, "pending click superseded");
            }
            self.session = Some(GestureSession::pressed(target, pos, now));
        }
        flushed
    }

    /// Pointer moved to `pos`.
    ///
    /// Emits `DragStart` once the displacement from the pointer-down origin
    /// reaches the drag threshold. A click that is already due at `now` is
    /// emitted first and the drag start is queued behind it.
    pub fn on_pointer_move(&mut self, pos: Point, now: Instant) -> Option<Gesture<T>> {
        if self.dragging {
            return self.take_queued();
        }
        let flushed = self.poll(now);
        let Some(session) = self.session.as_ref().filter(|s| s.pressed) else {
            return flushed;
        };
        let distance = self.config.distance_metric.measure(session.origin, pos);
        if distance < self.config.drag_threshold {
            return flushed;
        }

        let Some(session) = self.session.take() else {
            return flushed;
        };
        self.timer.cancel();
        self.dragging = true;
        let drag = Gesture::DragStart {
            target: session.target,
            origin: session.origin,
            position: pos,
        };
        match flushed {
            Some(click) => {
                crate::debug!(?drag, "drag start queued behind overdue click");
                self.queued = Some((drag, now));
                Some(click)
            }
            None => emitted(drag),
        }
    }

    /// Pointer released.
    ///
    /// Emits `DoubleClick` for a second click inside the window; otherwise
    /// arms the deferred-click timer.
    pub fn on_pointer_up(&mut self, _pos: Point, now: Instant) -> Option<Gesture<T>> {
        if self.dragging {
            self.dragging = false;
            return self.take_queued();
        }
        let window = self.config.double_click_window;
        let session = self.session.as_mut().filter(|s| s.pressed)?;
        session.pressed = false;

        // The host missed the wakeup for the previous click. Emit it now and
        // treat this release as the first click of a new resolution.
        if self.timer.is_due(now) {
            let target = session.target.clone();
            session.click_count = 1;
            session.last_click_at = Some(now);
            self.timer.arm(now + window);
            return emitted(Gesture::Click { target });
        }

        session.click_count = session.click_count.saturating_add(1);
        let within_window = session
            .last_click_at
            .is_some_and(|last| now.duration_since(last) < window);

        if session.click_count >= 2 && within_window {
            self.timer.cancel();
            let session = self.session.take()?;
            return emitted(Gesture::DoubleClick {
                target: session.target,
            });
        }

        session.click_count = 1;
        session.last_click_at = Some(now);
        self.timer.arm(now + window);
        None
    }

    /// Touch contact began on `target` with `touches` active points.
    ///
    /// Independent of the click/drag session.
    pub fn on_touch_start(&mut self, target: T, touches: usize) -> Option<Gesture<T>> {
        if touches == 0 {
            return None;
        }
        emitted(Gesture::BringToFront { target })
    }

    /// Resolve the deferred click if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Gesture<T>> {
        if self.queued.is_some() {
            return self.take_queued();
        }
        self.timer.fire_if_due(now)?;
        self.resolve_deferred_click()
    }

    /// Host wakeup for a timer armed by this classifier.
    ///
    /// Stale handles (cancelled or superseded armings) are ignored. A queued
    /// outcome is returned regardless of `handle`.
    pub fn on_timer(&mut self, handle: TimerHandle, now: Instant) -> Option<Gesture<T>> {
        if self.queued.is_some() {
            return self.take_queued();
        }
        if !self.timer.fire(handle, now) {
            return None;
        }
        self.resolve_deferred_click()
    }

    fn resolve_deferred_click(&mut self) -> Option<Gesture<T>> {
        let session = self.session.as_mut()?;
        if session.click_count == 0 {
            return None;
        }
        let target = if session.pressed {
            // A new press is in progress; it keeps the session alive.
            session.click_count = 0;
            session.last_click_at = None;
            session.target.clone()
        } else {
            self.session.take()?.target
        };
        emitted(Gesture::Click { target })
    }
}

fn emitted<T: fmt::Debug>(gesture: Gesture<T>) -> Option<Gesture<T>> {
    crate::debug!(?gesture, "gesture resolved");
    Some(gesture)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
