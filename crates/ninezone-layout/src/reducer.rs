#![forbid(unsafe_code)]

//! Layout state transitions.
//!
//! [`reduce`] is a pure function from the current state and an action to the
//! next state. It works on a copy, so a rejected action leaves the input
//! untouched. [`LayoutStore`] wraps a state and applies actions dispatched by
//! widget hosts.

use ninezone_core::Point;
use tracing::{debug, warn};

use crate::action::{Dispatch, NineZoneAction, TabDropTarget};
use crate::error::{LayoutError, Result};
use crate::state::{
    DraggedTabState, FloatingWidgetState, NineZoneState, TabHome, TabId, WidgetId,
    WidgetLocation, WidgetState,
};

/// Compute the state that follows `action`.
pub fn reduce(state: &NineZoneState, action: &NineZoneAction) -> Result<NineZoneState> {
    let mut next = state.clone();
    match action {
        // The side and floating hints describe the host's view when the
        // gesture started. Placement is always read back from the state.
        NineZoneAction::WidgetTabClick { widget_id, id, .. } => tab_click(&mut next, widget_id, id)?,
        NineZoneAction::WidgetTabDoubleClick { widget_id, id, .. } => {
            tab_double_click(&mut next, widget_id, id)?;
        }
        NineZoneAction::WidgetTabDragStart {
            widget_id,
            id,
            position,
            ..
        } => tab_drag_start(&mut next, widget_id, id, *position)?,
        NineZoneAction::WidgetTabDragEnd { target } => tab_drag_end(&mut next, target)?,
        NineZoneAction::FloatingWidgetBringToFront { id } => bring_to_front(&mut next, id)?,
    }
    debug!(action = action.kind(), "layout action applied");
    Ok(next)
}

fn ensure_hosts(widget: &WidgetState, tab_id: &str) -> Result<usize> {
    widget
        .tab_index(tab_id)
        .ok_or_else(|| LayoutError::TabNotInWidget {
            tab_id: tab_id.to_owned(),
            widget_id: widget.id.clone(),
        })
}

fn tab_click(state: &mut NineZoneState, widget_id: &str, tab_id: &str) -> Result<()> {
    let side = state.panels.side_of(widget_id);
    let shares_panel = side.is_some_and(|s| state.panels.get(s).widgets.len() > 1);

    let widget = state.widget_mut(widget_id)?;
    ensure_hosts(widget, tab_id)?;
    let was_active = widget.active_tab_id == tab_id;
    widget.active_tab_id = tab_id.to_owned();
    if widget.minimized {
        widget.minimized = false;
    } else if was_active && shares_panel {
        widget.minimized = true;
    }

    if let Some(side) = side {
        state.panels.get_mut(side).collapsed = false;
    }
    Ok(())
}

fn tab_double_click(state: &mut NineZoneState, widget_id: &str, tab_id: &str) -> Result<()> {
    let floating = state.floating_widgets.contains(widget_id);
    let widget = state.widget_mut(widget_id)?;
    ensure_hosts(widget, tab_id)?;
    if widget.active_tab_id != tab_id {
        widget.active_tab_id = tab_id.to_owned();
        return Ok(());
    }
    if floating {
        widget.minimized = !widget.minimized;
    }
    Ok(())
}

fn tab_drag_start(
    state: &mut NineZoneState,
    widget_id: &str,
    tab_id: &str,
    position: Point,
) -> Result<()> {
    if let Some(dragged) = &state.dragged_tab {
        return Err(LayoutError::DragInProgress(dragged.tab_id.clone()));
    }
    let location = state
        .widget_location(widget_id)
        .ok_or_else(|| LayoutError::UnknownWidget(widget_id.to_owned()))?;

    let widget = state.widget_mut(widget_id)?;
    let tab_index = ensure_hosts(widget, tab_id)?;
    widget.tabs.remove(tab_index);
    let now_empty = widget.tabs.is_empty();
    if !now_empty && widget.active_tab_id == tab_id {
        widget.active_tab_id = widget.tabs[0].clone();
    }
    if now_empty {
        state.remove_widget(widget_id);
    }

    let home = match location {
        WidgetLocation::Panel(side) => TabHome::Panel {
            side,
            widget_id: widget_id.to_owned(),
            tab_index,
        },
        WidgetLocation::Floating(floating_widget_id) => TabHome::Floating {
            floating_widget_id,
            tab_index,
        },
    };
    state.dragged_tab = Some(DraggedTabState {
        tab_id: tab_id.to_owned(),
        position,
        home,
    });
    Ok(())
}

fn single_tab_widget(state: &NineZoneState, id: &WidgetId, tab_id: TabId) -> Result<WidgetState> {
    if state.widgets.contains_key(id) {
        return Err(LayoutError::DuplicateWidget(id.clone()));
    }
    Ok(WidgetState {
        id: id.clone(),
        tabs: vec![tab_id.clone()],
        active_tab_id: tab_id,
        minimized: false,
    })
}

fn tab_drag_end(state: &mut NineZoneState, target: &TabDropTarget) -> Result<()> {
    let dragged = state.dragged_tab.take().ok_or(LayoutError::NoDraggedTab)?;
    let tab_id = dragged.tab_id;

    match target {
        TabDropTarget::Widget { widget_id, index } => {
            let widget = state.widget_mut(widget_id)?;
            let index = (*index).min(widget.tabs.len());
            widget.tabs.insert(index, tab_id.clone());
            widget.active_tab_id = tab_id;
            widget.minimized = false;
        }
        TabDropTarget::Panel {
            side,
            new_widget_id,
        } => {
            let widget = single_tab_widget(state, new_widget_id, tab_id)?;
            let panel = state.panels.get_mut(*side);
            panel.widgets.push(widget.id.clone());
            panel.collapsed = false;
            state.widgets.insert(widget.id.clone(), widget);
        }
        TabDropTarget::FloatingWidget {
            new_widget_id,
            bounds,
        } => {
            let widget = single_tab_widget(state, new_widget_id, tab_id)?;
            let home = match dragged.home {
                TabHome::Panel { side, .. } => Some(side),
                TabHome::Floating { .. } => None,
            };
            state.floating_widgets.insert(FloatingWidgetState {
                id: widget.id.clone(),
                bounds: *bounds,
                home,
            });
            state.widgets.insert(widget.id.clone(), widget);
        }
    }
    Ok(())
}

fn bring_to_front(state: &mut NineZoneState, id: &str) -> Result<()> {
    let ids = &mut state.floating_widgets.all_ids;
    let index = ids
        .iter()
        .position(|i| i == id)
        .ok_or_else(|| LayoutError::UnknownFloatingWidget(id.to_owned()))?;
    let id = ids.remove(index);
    ids.push(id);
    Ok(())
}

// ---------------------------------------------------------------------------
// LayoutStore
// ---------------------------------------------------------------------------

/// Owns a layout state and applies dispatched actions to it.
#[derive(Debug, Clone, Default)]
pub struct LayoutStore {
    state: NineZoneState,
    rejected: usize,
}

impl LayoutStore {
    #[must_use]
    pub fn new(state: NineZoneState) -> Self {
        Self { state, rejected: 0 }
    }

    #[must_use]
    pub fn state(&self) -> &NineZoneState {
        &self.state
    }

    /// Number of actions rejected so far.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Apply `action`, keeping the current state when it is rejected.
    pub fn apply(&mut self, action: &NineZoneAction) -> Result<()> {
        self.state = reduce(&self.state, action)?;
        Ok(())
    }

    #[must_use]
    pub fn into_state(self) -> NineZoneState {
        self.state
    }
}

impl Dispatch for LayoutStore {
    fn dispatch(&mut self, action: NineZoneAction) {
        if let Err(err) = self.apply(&action) {
            self.rejected += 1;
            warn!(action = action.kind(), %err, "layout action rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PanelSide, TabArgs, WidgetArgs};
    use ninezone_core::Rect;
    use tracing_test::traced_test;

    fn two_widget_left_panel() -> NineZoneState {
        NineZoneState::new()
            .add_panel_widget(PanelSide::Left, "w1", ["t1", "t2"], WidgetArgs::default())
            .unwrap()
            .add_panel_widget(PanelSide::Left, "w2", ["t3"], WidgetArgs::default())
            .unwrap()
            .add_tab("t1", TabArgs::default())
            .unwrap()
            .add_tab("t2", TabArgs::default())
            .unwrap()
            .add_tab("t3", TabArgs::default())
            .unwrap()
    }

    fn click(widget_id: &str, id: &str) -> NineZoneAction {
        NineZoneAction::WidgetTabClick {
            side: Some(PanelSide::Left),
            widget_id: widget_id.into(),
            id: id.into(),
        }
    }

    fn drag_start(widget_id: &str, id: &str) -> NineZoneAction {
        NineZoneAction::WidgetTabDragStart {
            floating_widget_id: None,
            widget_id: widget_id.into(),
            id: id.into(),
            position: Point::new(10.0, 10.0),
        }
    }

    // --- Tab click ---

    #[test]
    fn click_activates_tab() {
        let state = reduce(&two_widget_left_panel(), &click("w1", "t2")).unwrap();
        assert_eq!(state.widgets["w1"].active_tab_id, "t2");
        assert!(!state.widgets["w1"].minimized);
    }

    #[test]
    fn click_active_tab_minimizes_shared_panel_widget() {
        let state = reduce(&two_widget_left_panel(), &click("w1", "t1")).unwrap();
        assert!(state.widgets["w1"].minimized);

        let state = reduce(&state, &click("w1", "t1")).unwrap();
        assert!(!state.widgets["w1"].minimized);
    }

    #[test]
    fn click_active_tab_of_lone_widget_keeps_it_open() {
        let state = NineZoneState::new()
            .add_panel_widget(PanelSide::Right, "w1", ["t1"], WidgetArgs::default())
            .unwrap();
        let state = reduce(
            &state,
            &NineZoneAction::WidgetTabClick {
                side: None,
                widget_id: "w1".into(),
                id: "t1".into(),
            },
        )
        .unwrap();
        assert!(!state.widgets["w1"].minimized);
    }

    #[test]
    fn click_resolves_panel_from_state_not_hint() {
        let mut state = NineZoneState::new()
            .add_panel_widget(PanelSide::Left, "w1", ["t1"], WidgetArgs::default())
            .unwrap()
            .add_panel_widget(PanelSide::Right, "w2", ["t2"], WidgetArgs::default())
            .unwrap()
            .add_panel_widget(PanelSide::Right, "w3", ["t3"], WidgetArgs::default())
            .unwrap();
        state.panels.right.collapsed = true;
        state.panels.left.collapsed = true;

        let stale = NineZoneAction::WidgetTabClick {
            side: Some(PanelSide::Right),
            widget_id: "w1".into(),
            id: "t1".into(),
        };
        let next = reduce(&state, &stale).unwrap();
        // w1 is alone on the left, so clicking its active tab keeps it open.
        assert!(!next.widgets["w1"].minimized);
        assert!(!next.panels.left.collapsed);
        assert!(next.panels.right.collapsed);
    }

    #[test]
    fn double_click_ignores_floating_hint_for_panel_widget() {
        let state = reduce(
            &two_widget_left_panel(),
            &NineZoneAction::WidgetTabDoubleClick {
                side: None,
                floating_widget_id: Some("w1".into()),
                widget_id: "w1".into(),
                id: "t1".into(),
            },
        )
        .unwrap();
        assert!(!state.widgets["w1"].minimized);
    }

    #[test]
    fn click_restores_minimized_widget_and_expands_panel() {
        let mut state = two_widget_left_panel();
        state.widgets.get_mut("w1").unwrap().minimized = true;
        state.panels.left.collapsed = true;

        let state = reduce(&state, &click("w1", "t2")).unwrap();
        assert!(!state.widgets["w1"].minimized);
        assert!(!state.panels.left.collapsed);
    }

    #[test]
    fn click_unknown_ids_is_rejected_without_change() {
        let state = two_widget_left_panel();
        assert_eq!(
            reduce(&state, &click("nope", "t1")).unwrap_err(),
            LayoutError::UnknownWidget("nope".into())
        );
        assert_eq!(
            reduce(&state, &click("w1", "t3")).unwrap_err(),
            LayoutError::TabNotInWidget {
                tab_id: "t3".into(),
                widget_id: "w1".into()
            }
        );
        assert_eq!(state, two_widget_left_panel());
    }

    // --- Double click ---

    #[test]
    fn double_click_floating_toggles_minimized() {
        let state = NineZoneState::new()
            .add_floating_widget("fw1", ["t1", "t2"], Rect::from_size(200.0, 100.0), WidgetArgs::default())
            .unwrap();
        let action = NineZoneAction::WidgetTabDoubleClick {
            side: None,
            floating_widget_id: Some("fw1".into()),
            widget_id: "fw1".into(),
            id: "t1".into(),
        };
        let state = reduce(&state, &action).unwrap();
        assert!(state.widgets["fw1"].minimized);
        let state = reduce(&state, &action).unwrap();
        assert!(!state.widgets["fw1"].minimized);
    }

    #[test]
    fn double_click_inactive_tab_activates_only() {
        let state = NineZoneState::new()
            .add_floating_widget("fw1", ["t1", "t2"], Rect::default(), WidgetArgs::default())
            .unwrap();
        let state = reduce(
            &state,
            &NineZoneAction::WidgetTabDoubleClick {
                side: None,
                floating_widget_id: Some("fw1".into()),
                widget_id: "fw1".into(),
                id: "t2".into(),
            },
        )
        .unwrap();
        assert_eq!(state.widgets["fw1"].active_tab_id, "t2");
        assert!(!state.widgets["fw1"].minimized);
    }

    #[test]
    fn double_click_panel_widget_does_not_minimize() {
        let state = reduce(
            &two_widget_left_panel(),
            &NineZoneAction::WidgetTabDoubleClick {
                side: Some(PanelSide::Left),
                floating_widget_id: None,
                widget_id: "w1".into(),
                id: "t1".into(),
            },
        )
        .unwrap();
        assert!(!state.widgets["w1"].minimized);
    }

    // --- Drag ---

    #[test]
    fn drag_start_detaches_tab() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w1", "t1")).unwrap();
        let w1 = &state.widgets["w1"];
        assert_eq!(w1.tabs, vec!["t2".to_string()]);
        assert_eq!(w1.active_tab_id, "t2");
        let dragged = state.dragged_tab.as_ref().unwrap();
        assert_eq!(dragged.tab_id, "t1");
        assert_eq!(
            dragged.home,
            TabHome::Panel {
                side: PanelSide::Left,
                widget_id: "w1".into(),
                tab_index: 0
            }
        );
        // The tab record stays registered.
        assert!(state.tabs.contains_key("t1"));
    }

    #[test]
    fn drag_start_of_last_tab_removes_widget() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w2", "t3")).unwrap();
        assert!(!state.widgets.contains_key("w2"));
        assert_eq!(state.panels.left.widgets, vec!["w1".to_string()]);
    }

    #[test]
    fn second_drag_start_is_rejected() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w1", "t1")).unwrap();
        assert_eq!(
            reduce(&state, &drag_start("w1", "t2")).unwrap_err(),
            LayoutError::DragInProgress("t1".into())
        );
    }

    #[test]
    fn drag_end_into_widget_clamps_index() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w1", "t1")).unwrap();
        let state = reduce(
            &state,
            &NineZoneAction::WidgetTabDragEnd {
                target: TabDropTarget::Widget {
                    widget_id: "w2".into(),
                    index: 99,
                },
            },
        )
        .unwrap();
        assert_eq!(state.widgets["w2"].tabs, vec!["t3".to_string(), "t1".to_string()]);
        assert_eq!(state.widgets["w2"].active_tab_id, "t1");
        assert!(state.dragged_tab.is_none());
    }

    #[test]
    fn drag_end_into_new_panel_widget() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w1", "t1")).unwrap();
        let state = reduce(
            &state,
            &NineZoneAction::WidgetTabDragEnd {
                target: TabDropTarget::Panel {
                    side: PanelSide::Bottom,
                    new_widget_id: "w9".into(),
                },
            },
        )
        .unwrap();
        assert_eq!(state.panels.bottom.widgets, vec!["w9".to_string()]);
        assert_eq!(state.widgets["w9"].tabs, vec!["t1".to_string()]);
    }

    #[test]
    fn drag_end_into_floating_widget_remembers_home() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w1", "t1")).unwrap();
        let bounds = Rect::new(50.0, 60.0, 200.0, 120.0);
        let state = reduce(
            &state,
            &NineZoneAction::WidgetTabDragEnd {
                target: TabDropTarget::FloatingWidget {
                    new_widget_id: "fw1".into(),
                    bounds,
                },
            },
        )
        .unwrap();
        let fw = &state.floating_widgets.by_id["fw1"];
        assert_eq!(fw.bounds, bounds);
        assert_eq!(fw.home, Some(PanelSide::Left));
        assert_eq!(state.floating_widgets.front(), Some(&"fw1".to_string()));
    }

    #[test]
    fn drag_end_without_drag_is_rejected() {
        let err = reduce(
            &two_widget_left_panel(),
            &NineZoneAction::WidgetTabDragEnd {
                target: TabDropTarget::Panel {
                    side: PanelSide::Top,
                    new_widget_id: "w9".into(),
                },
            },
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::NoDraggedTab);
    }

    #[test]
    fn drag_end_onto_existing_widget_id_keeps_drag() {
        let state = reduce(&two_widget_left_panel(), &drag_start("w1", "t1")).unwrap();
        let err = reduce(
            &state,
            &NineZoneAction::WidgetTabDragEnd {
                target: TabDropTarget::Panel {
                    side: PanelSide::Top,
                    new_widget_id: "w2".into(),
                },
            },
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateWidget("w2".into()));
        assert!(state.dragged_tab.is_some());
    }

    // --- Floating z-order ---

    #[test]
    fn bring_to_front_reorders() {
        let state = NineZoneState::new()
            .add_floating_widget("fw1", ["t1"], Rect::default(), WidgetArgs::default())
            .unwrap()
            .add_floating_widget("fw2", ["t2"], Rect::default(), WidgetArgs::default())
            .unwrap();
        let state = reduce(
            &state,
            &NineZoneAction::FloatingWidgetBringToFront { id: "fw1".into() },
        )
        .unwrap();
        assert_eq!(
            state.floating_widgets.all_ids,
            vec!["fw2".to_string(), "fw1".to_string()]
        );
    }

    #[test]
    fn bring_unknown_to_front_is_rejected() {
        assert_eq!(
            reduce(
                &NineZoneState::new(),
                &NineZoneAction::FloatingWidgetBringToFront { id: "x".into() }
            )
            .unwrap_err(),
            LayoutError::UnknownFloatingWidget("x".into())
        );
    }

    // --- Store ---

    #[traced_test]
    #[test]
    fn store_logs_and_counts_rejections() {
        let mut store = LayoutStore::new(two_widget_left_panel());
        store.dispatch(click("w1", "t2"));
        store.dispatch(click("missing", "t1"));

        assert_eq!(store.rejected(), 1);
        assert_eq!(store.state().widgets["w1"].active_tab_id, "t2");
        assert!(logs_contain("layout action rejected"));
    }
}
