#![forbid(unsafe_code)]

//! Core: pointer gesture and drop zone classification.
//!
//! # Role in ninezone
//! `ninezone-core` is the interaction layer. It turns raw pointer and touch
//! input delivered by a hosting view into semantic outcomes, without any
//! knowledge of how widgets are rendered.
//!
//! # Primary responsibilities
//! - **PointerGestureClassifier**: click / double click / drag start
//!   disambiguation, plus the touch bring-to-front shortcut.
//! - **DropZone**: above / on / below classification for drag-and-drop
//!   reordering feedback.
//! - **DeferredTimer**: the cancellable single-shot timer that resolves a
//!   pending click once the double-click window closes.
//! - **InteractionConfig**: thresholds and windows, optionally loaded from
//!   TOML or JSON.
//!
//! # How it fits in the system
//! `ninezone-layout` wires the gesture classifier into widget tabs and maps
//! outcomes to layout actions. `ninezone-components` wires the drop zone
//! classifier into tree nodes. Both are plain state machines driven by the
//! host's event loop; time is always passed in by the caller.

pub mod config;
pub mod deferred;
pub mod drop_zone;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

pub use config::{ConfigError, GestureSettings, InteractionConfig};
pub use deferred::{DeferredTimer, TimerHandle};
pub use drop_zone::{DropZone, DropZoneConfig, DropZoneTracker, classify};
pub use event::InputEvent;
pub use geometry::{Point, Rect};
pub use gesture::{DistanceMetric, Gesture, GestureConfig, GestureSession, PointerGestureClassifier};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
