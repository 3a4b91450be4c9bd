use thiserror::Error;

use crate::state::{TabId, WidgetId};

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

/// Reasons a layout builder or action can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unknown widget: {0}")]
    UnknownWidget(WidgetId),

    #[error("unknown tab: {0}")]
    UnknownTab(TabId),

    #[error("unknown floating widget: {0}")]
    UnknownFloatingWidget(WidgetId),

    #[error("tab {tab_id} is not hosted by widget {widget_id}")]
    TabNotInWidget { tab_id: TabId, widget_id: WidgetId },

    #[error("tab {tab_id} is already hosted by widget {widget_id}")]
    TabAlreadyPlaced { tab_id: TabId, widget_id: WidgetId },

    #[error("duplicate widget id: {0}")]
    DuplicateWidget(WidgetId),

    #[error("duplicate tab id: {0}")]
    DuplicateTab(TabId),

    #[error("widget {0} must host at least one tab")]
    EmptyWidget(WidgetId),

    #[error("no tab is being dragged")]
    NoDraggedTab,

    #[error("tab {0} is already being dragged")]
    DragInProgress(TabId),
}
