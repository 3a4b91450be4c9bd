#![forbid(unsafe_code)]

//! Layout: nine-zone state, actions and widget tab hosts.
//!
//! # Role in ninezone
//! `ninezone-layout` owns the docking model. Side panels and floating
//! widgets host tabs; user interaction on a tab is classified by
//! `ninezone-core` and becomes a [`NineZoneAction`] that [`reduce`] applies
//! to a [`NineZoneState`].
//!
//! # Primary responsibilities
//! - **NineZoneState**: panels, widgets, tabs, floating z-order and the
//!   dragged tab, with builders that reject inconsistent layouts.
//! - **WidgetTab**: per-tab gesture wiring that dispatches actions.
//! - **reduce / LayoutStore**: pure state transitions and a store that
//!   applies dispatched actions.

pub mod action;
pub mod error;
pub mod reducer;
pub mod state;
pub mod tab;

pub use action::{ActionLog, Dispatch, NineZoneAction, TabDropTarget};
pub use error::{LayoutError, Result};
pub use reducer::{LayoutStore, reduce};
pub use state::{
    DraggedTabState, FloatingWidgetId, FloatingWidgetState, FloatingWidgetsState, NineZoneState,
    PanelSide, PanelState, PanelsState, TabArgs, TabHome, TabId, TabState, WidgetArgs, WidgetId,
    WidgetLocation, WidgetState, create_tab_state,
};
pub use tab::WidgetTab;
