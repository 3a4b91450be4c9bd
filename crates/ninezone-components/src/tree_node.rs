#![forbid(unsafe_code)]

//! Drop-target state for a single tree row.
//!
//! The host's drag-and-drop layer reports whether a drag is over the row,
//! whether the row itself is being dragged, and whether the current payload
//! may be dropped here. [`DragDropTreeNode`] keeps the hover mode those
//! reports imply and exposes it as [`DropIndicator`] flags for rendering.

use ninezone_core::{DropZone, DropZoneConfig, DropZoneTracker, Rect};

use crate::tree::DropPosition;

/// Visual state of a tree row during drag-and-drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropIndicator {
    pub above: bool,
    pub on: bool,
    pub below: bool,
    pub dragging: bool,
}

impl DropIndicator {
    /// Whether any drop zone is highlighted.
    #[must_use]
    pub fn is_drop_target(&self) -> bool {
        self.above || self.on || self.below
    }
}

/// Drop-target host for one tree row.
#[derive(Debug, Clone, Default)]
pub struct DragDropTreeNode {
    is_over: bool,
    is_dragging: bool,
    can_drop: bool,
    tracker: DropZoneTracker,
}

impl DragDropTreeNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: DropZoneConfig) -> Self {
        Self {
            tracker: DropZoneTracker::new(config),
            ..Self::default()
        }
    }

    /// A drag entered (`true`) or left (`false`) this row.
    pub fn set_over(&mut self, is_over: bool) {
        if !is_over {
            self.drag_leave();
        } else {
            self.is_over = true;
        }
    }

    /// This row is (or stops being) the drag source.
    pub fn set_dragging(&mut self, is_dragging: bool) {
        self.is_dragging = is_dragging;
    }

    /// Whether the current payload may be dropped on this row.
    pub fn set_can_drop(&mut self, can_drop: bool) {
        self.can_drop = can_drop;
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    #[must_use]
    pub fn can_drop(&self) -> bool {
        self.can_drop
    }

    /// Current hover mode. `On` until the pointer is classified otherwise.
    #[must_use]
    pub fn hover(&self) -> DropZone {
        self.tracker.current().unwrap_or_default()
    }

    /// Drag moved over the row whose bounds are `rect`.
    ///
    /// Ignored unless a drag is over this row. Returns the new hover mode
    /// when it changed.
    pub fn on_drag_over(&mut self, pointer_y: f64, rect: &Rect) -> Option<DropZone> {
        if !self.is_over {
            return None;
        }
        let previous = self.hover();
        self.tracker.update(pointer_y, rect);
        let zone = self.hover();
        (zone != previous).then_some(zone)
    }

    /// Drag left the row. Hover mode returns to `On`.
    pub fn drag_leave(&mut self) {
        self.is_over = false;
        self.tracker.reset();
    }

    #[must_use]
    pub fn indicator(&self) -> DropIndicator {
        let active = self.can_drop && self.is_over;
        let zone = self.hover();
        DropIndicator {
            above: active && zone == DropZone::Above,
            on: active && zone == DropZone::On,
            below: active && zone == DropZone::Below,
            dragging: self.is_dragging,
        }
    }

    /// Where a drop right now would land, if one is allowed.
    #[must_use]
    pub fn drop_position(&self) -> Option<DropPosition> {
        (self.can_drop && self.is_over).then(|| self.hover().into())
    }
}
