#![forbid(unsafe_code)]

//! Nine-zone layout model.
//!
//! Widgets live either in one of the four side panels or float above the
//! content. Each widget hosts an ordered list of tabs, one of which is
//! active. Tabs are registered separately in [`NineZoneState::tabs`] so the
//! same tab record follows a tab as it is dragged between widgets.
//!
//! # Invariants
//!
//! 1. Every widget hosts at least one tab and its active tab is one of them.
//! 2. A tab is hosted by at most one widget. While dragged it is hosted by
//!    none and is recorded in [`NineZoneState::dragged_tab`].
//! 3. A widget is referenced by exactly one panel or by the floating set.
//! 4. A floating widget shares its id with the widget it hosts.
//! 5. [`FloatingWidgetsState::all_ids`] is the z-order, front-most last.

use ahash::AHashMap;
use ninezone_core::{Point, Rect};

use crate::error::{LayoutError, Result};

pub type TabId = String;
pub type WidgetId = String;
pub type FloatingWidgetId = WidgetId;

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// Side of the content area a panel is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl PanelSide {
    /// All sides in declaration order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Returns true for panels laid out horizontally (top and bottom).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Lowercase name, as used in action payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Widgets docked to one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub side: PanelSide,
    /// Widgets from first to last along the panel.
    pub widgets: Vec<WidgetId>,
    pub collapsed: bool,
}

impl PanelState {
    fn new(side: PanelSide) -> Self {
        Self {
            side,
            widgets: Vec::new(),
            collapsed: false,
        }
    }
}

/// The four side panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelsState {
    pub left: PanelState,
    pub right: PanelState,
    pub top: PanelState,
    pub bottom: PanelState,
}

impl Default for PanelsState {
    fn default() -> Self {
        Self {
            left: PanelState::new(PanelSide::Left),
            right: PanelState::new(PanelSide::Right),
            top: PanelState::new(PanelSide::Top),
            bottom: PanelState::new(PanelSide::Bottom),
        }
    }
}

impl PanelsState {
    #[must_use]
    pub fn get(&self, side: PanelSide) -> &PanelState {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
            PanelSide::Top => &self.top,
            PanelSide::Bottom => &self.bottom,
        }
    }

    pub fn get_mut(&mut self, side: PanelSide) -> &mut PanelState {
        match side {
            PanelSide::Left => &mut self.left,
            PanelSide::Right => &mut self.right,
            PanelSide::Top => &mut self.top,
            PanelSide::Bottom => &mut self.bottom,
        }
    }

    /// Side whose panel holds `widget_id`.
    #[must_use]
    pub fn side_of(&self, widget_id: &str) -> Option<PanelSide> {
        PanelSide::ALL
            .into_iter()
            .find(|side| self.get(*side).widgets.iter().any(|w| w == widget_id))
    }
}

// ---------------------------------------------------------------------------
// Tabs and widgets
// ---------------------------------------------------------------------------

/// A tab record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub id: TabId,
    pub label: String,
    pub icon_spec: Option<String>,
    /// Hide the tab together with the rest of the UI while it floats.
    pub hide_with_ui_when_floating: bool,
}

/// Optional fields for [`create_tab_state`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabArgs {
    pub label: Option<String>,
    pub icon_spec: Option<String>,
    pub hide_with_ui_when_floating: bool,
}

impl TabArgs {
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn icon_spec(mut self, icon_spec: impl Into<String>) -> Self {
        self.icon_spec = Some(icon_spec.into());
        self
    }

    #[must_use]
    pub fn hide_with_ui_when_floating(mut self, hide: bool) -> Self {
        self.hide_with_ui_when_floating = hide;
        self
    }
}

/// Create a tab record. The label defaults to the id.
#[must_use]
pub fn create_tab_state(id: impl Into<TabId>, args: TabArgs) -> TabState {
    let id = id.into();
    TabState {
        label: args.label.unwrap_or_else(|| id.clone()),
        icon_spec: args.icon_spec,
        hide_with_ui_when_floating: args.hide_with_ui_when_floating,
        id,
    }
}

/// A tab container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub id: WidgetId,
    pub tabs: Vec<TabId>,
    pub active_tab_id: TabId,
    pub minimized: bool,
}

impl WidgetState {
    /// Position of `tab_id` within this widget.
    #[must_use]
    pub fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t == tab_id)
    }
}

/// Optional fields for widget builders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetArgs {
    /// Defaults to the first tab.
    pub active_tab_id: Option<TabId>,
    pub minimized: bool,
}

impl WidgetArgs {
    #[must_use]
    pub fn active_tab(mut self, tab_id: impl Into<TabId>) -> Self {
        self.active_tab_id = Some(tab_id.into());
        self
    }

    #[must_use]
    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = minimized;
        self
    }
}

// ---------------------------------------------------------------------------
// Floating widgets
// ---------------------------------------------------------------------------

/// Placement of a floating widget.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingWidgetState {
    pub id: FloatingWidgetId,
    pub bounds: Rect,
    /// Panel the widget was undocked from, if any.
    pub home: Option<PanelSide>,
}

/// All floating widgets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FloatingWidgetsState {
    pub by_id: AHashMap<FloatingWidgetId, FloatingWidgetState>,
    /// Z-order, front-most last.
    pub all_ids: Vec<FloatingWidgetId>,
}

impl FloatingWidgetsState {
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Id of the front-most floating widget.
    #[must_use]
    pub fn front(&self) -> Option<&FloatingWidgetId> {
        self.all_ids.last()
    }

    pub(crate) fn insert(&mut self, state: FloatingWidgetState) {
        self.all_ids.push(state.id.clone());
        self.by_id.insert(state.id.clone(), state);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<FloatingWidgetState> {
        self.all_ids.retain(|i| i != id);
        self.by_id.remove(id)
    }
}

// ---------------------------------------------------------------------------
// Drag state
// ---------------------------------------------------------------------------

/// Where a dragged tab came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabHome {
    Panel {
        side: PanelSide,
        widget_id: WidgetId,
        tab_index: usize,
    },
    Floating {
        floating_widget_id: FloatingWidgetId,
        tab_index: usize,
    },
}

/// A tab detached from its widget and following the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggedTabState {
    pub tab_id: TabId,
    pub position: Point,
    pub home: TabHome,
}

/// Where a widget currently lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetLocation {
    Panel(PanelSide),
    Floating(FloatingWidgetId),
}

// ---------------------------------------------------------------------------
// NineZoneState
// ---------------------------------------------------------------------------

/// Complete layout state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NineZoneState {
    pub panels: PanelsState,
    pub widgets: AHashMap<WidgetId, WidgetState>,
    pub tabs: AHashMap<TabId, TabState>,
    pub floating_widgets: FloatingWidgetsState,
    pub dragged_tab: Option<DraggedTabState>,
}

impl NineZoneState {
    /// Empty layout: four empty panels, no widgets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tab record.
    pub fn add_tab(mut self, id: impl Into<TabId>, args: TabArgs) -> Result<Self> {
        let tab = create_tab_state(id, args);
        if self.tabs.contains_key(&tab.id) {
            return Err(LayoutError::DuplicateTab(tab.id));
        }
        self.tabs.insert(tab.id.clone(), tab);
        Ok(self)
    }

    /// Append a widget hosting `tabs` to the panel on `side`.
    ///
    /// Tab records may be registered before or after the widget.
    pub fn add_panel_widget<I>(
        mut self,
        side: PanelSide,
        id: impl Into<WidgetId>,
        tabs: I,
        args: WidgetArgs,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<TabId>,
    {
        let widget = self.new_widget(id.into(), tabs, args)?;
        self.panels.get_mut(side).widgets.push(widget.id.clone());
        self.widgets.insert(widget.id.clone(), widget);
        Ok(self)
    }

    /// Add a floating widget hosting `tabs`, placed in front of the others.
    pub fn add_floating_widget<I>(
        mut self,
        id: impl Into<FloatingWidgetId>,
        tabs: I,
        bounds: Rect,
        args: WidgetArgs,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<TabId>,
    {
        let widget = self.new_widget(id.into(), tabs, args)?;
        self.floating_widgets.insert(FloatingWidgetState {
            id: widget.id.clone(),
            bounds,
            home: None,
        });
        self.widgets.insert(widget.id.clone(), widget);
        Ok(self)
    }

    fn new_widget<I>(&self, id: WidgetId, tabs: I, args: WidgetArgs) -> Result<WidgetState>
    where
        I: IntoIterator,
        I::Item: Into<TabId>,
    {
        if self.widgets.contains_key(&id) {
            return Err(LayoutError::DuplicateWidget(id));
        }
        let tabs: Vec<TabId> = tabs.into_iter().map(Into::into).collect();
        for (index, tab_id) in tabs.iter().enumerate() {
            let placed = match self.tab_location(tab_id) {
                Some((widget_id, _)) => Some(widget_id.clone()),
                None => tabs[..index].contains(tab_id).then(|| id.clone()),
            };
            if let Some(widget_id) = placed {
                return Err(LayoutError::TabAlreadyPlaced {
                    tab_id: tab_id.clone(),
                    widget_id,
                });
            }
            if self.dragged_tab.as_ref().is_some_and(|d| &d.tab_id == tab_id) {
                return Err(LayoutError::DragInProgress(tab_id.clone()));
            }
        }
        let active_tab_id = match (args.active_tab_id, tabs.first()) {
            (Some(active), _) if tabs.contains(&active) => active,
            (Some(active), _) => {
                return Err(LayoutError::TabNotInWidget {
                    tab_id: active,
                    widget_id: id,
                });
            }
            (None, Some(first)) => first.clone(),
            (None, None) => return Err(LayoutError::EmptyWidget(id)),
        };
        Ok(WidgetState {
            id,
            tabs,
            active_tab_id,
            minimized: args.minimized,
        })
    }

    /// Widget hosting `tab_id` and the tab's index within it.
    #[must_use]
    pub fn tab_location(&self, tab_id: &str) -> Option<(&WidgetId, usize)> {
        self.widgets
            .values()
            .find_map(|w| w.tab_index(tab_id).map(|index| (&w.id, index)))
    }

    /// Where `widget_id` lives.
    #[must_use]
    pub fn widget_location(&self, widget_id: &str) -> Option<WidgetLocation> {
        if self.floating_widgets.contains(widget_id) {
            return Some(WidgetLocation::Floating(widget_id.to_owned()));
        }
        self.panels.side_of(widget_id).map(WidgetLocation::Panel)
    }

    /// Whether `tab_id` disappears while the host hides its UI. Only tabs
    /// hosted by a floating widget and flagged `hide_with_ui_when_floating`
    /// do; docked tabs always stay.
    #[must_use]
    pub fn hides_with_ui(&self, tab_id: &str) -> bool {
        let flagged = self
            .tabs
            .get(tab_id)
            .is_some_and(|tab| tab.hide_with_ui_when_floating);
        flagged
            && self
                .tab_location(tab_id)
                .is_some_and(|(widget_id, _)| self.floating_widgets.contains(widget_id))
    }

    /// Floating tabs hidden along with the UI, back to front.
    #[must_use]
    pub fn tabs_hidden_with_ui(&self) -> Vec<&TabId> {
        self.floating_widgets
            .all_ids
            .iter()
            .filter_map(|id| self.widgets.get(id))
            .flat_map(|widget| widget.tabs.iter())
            .filter(|tab_id| self.hides_with_ui(tab_id))
            .collect()
    }

    pub(crate) fn widget_mut(&mut self, widget_id: &str) -> Result<&mut WidgetState> {
        self.widgets
            .get_mut(widget_id)
            .ok_or_else(|| LayoutError::UnknownWidget(widget_id.to_owned()))
    }

    /// Drop `widget_id` from the widget map and from its panel or the
    /// floating set.
    pub(crate) fn remove_widget(&mut self, widget_id: &str) {
        self.widgets.remove(widget_id);
        self.floating_widgets.remove(widget_id);
        for side in PanelSide::ALL {
            self.panels.get_mut(side).widgets.retain(|w| w != widget_id);
        }
    }
}
