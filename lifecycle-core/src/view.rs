//! View state of the organizer page
//!
//! All transitions are pure (`reduce`). [`ViewController`] wraps the state
//! with the side effects: measuring through a [`LayoutProbe`] and holding the
//! viewport subscription while a phase is selected.
//!
//! ```text
//! NoSelection --click i--> PhaseSelected(i) --click j--> PhaseSelected(j)
//!      ^                        |
//!      +---- click i / close / rotate / switch methodology
//! ```

use crate::listeners::{ListenerGuard, ViewportEvent, ViewportListeners};
use crate::models::{MethodologyKind, ReferenceData};
use crate::positioner::{ElementHandle, LayoutProbe, OverlayPosition, OverlayPositioner, Side};

/// Tab of the roles/requirements browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserTab {
    #[default]
    Roles,
    NonFunctional,
}

impl BrowserTab {
    pub fn label(&self) -> &'static str {
        match self {
            BrowserTab::Roles => "Roles y requisitos",
            BrowserTab::NonFunctional => "Requisitos no funcionales",
        }
    }

    pub fn all() -> &'static [BrowserTab] {
        &[BrowserTab::Roles, BrowserTab::NonFunctional]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowserState {
    pub tab: BrowserTab,
    /// Selected role key (roles tab)
    pub role: Option<String>,
    /// Selected requirement id, functional or non-functional
    pub requirement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Lifecycle currently expanded by the selector
    pub methodology: Option<MethodologyKind>,
    pub selected_phase: Option<usize>,
    pub overlay: Option<OverlayPosition>,
    /// A phase was selected and its overlay waits for the next layout pass
    pub awaiting_layout: bool,
    /// Open roles/requirements modal
    pub browser: Option<BrowserState>,
}

impl ViewState {
    pub fn selection(&self) -> Option<(MethodologyKind, usize)> {
        Some((self.methodology?, self.selected_phase?))
    }

    pub fn is_selected(&self, kind: MethodologyKind, index: usize) -> bool {
        self.selection() == Some((kind, index))
    }

    /// Rotation of the selector arrow in degrees
    pub fn selector_angle(&self) -> f32 {
        match self.methodology {
            Some(MethodologyKind::Development) => 0.0,
            Some(MethodologyKind::Testing) => 180.0,
            None => 90.0,
        }
    }

    fn clear_selection(&mut self) {
        self.selected_phase = None;
        self.overlay = None;
        self.awaiting_layout = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Cycles none -> SDLC -> STLC -> none
    RotateSelector,
    ShowMethodology(Option<MethodologyKind>),
    /// Click on phase `index` of the active methodology
    ClickPhase(usize),
    CloseOverlay,
    OverlayPlaced(OverlayPosition),
    OpenBrowser(BrowserTab),
    CloseBrowser,
    SwitchTab(BrowserTab),
    SelectRole(String),
    SelectRequirement(String),
}

/// Computes the state following `event`
pub fn reduce(state: &ViewState, event: &ViewEvent, data: &ReferenceData) -> ViewState {
    let mut next = state.clone();

    match event {
        ViewEvent::RotateSelector => {
            next.clear_selection();
            next.methodology = match state.methodology {
                None => Some(MethodologyKind::Development),
                Some(MethodologyKind::Development) => Some(MethodologyKind::Testing),
                Some(MethodologyKind::Testing) => None,
            };
        }
        ViewEvent::ShowMethodology(kind) => {
            if *kind != state.methodology {
                next.clear_selection();
                next.methodology = *kind;
            }
        }
        ViewEvent::ClickPhase(index) => {
            let Some(kind) = state.methodology else {
                return next;
            };
            if *index >= data.methodology(kind).phases.len() {
                log::debug!("Ignoring click on {}[{}]: no such phase", kind, index);
                return next;
            }
            if state.selected_phase == Some(*index) {
                next.clear_selection();
            } else {
                next.selected_phase = Some(*index);
                next.overlay = None;
                next.awaiting_layout = true;
            }
        }
        ViewEvent::CloseOverlay => next.clear_selection(),
        ViewEvent::OverlayPlaced(position) => {
            if state.selected_phase.is_some() {
                next.overlay = Some(*position);
                next.awaiting_layout = false;
            }
        }
        ViewEvent::OpenBrowser(tab) => {
            next.browser = Some(BrowserState {
                tab: *tab,
                ..BrowserState::default()
            });
        }
        ViewEvent::CloseBrowser => next.browser = None,
        ViewEvent::SwitchTab(tab) => {
            if let Some(browser) = next.browser.as_mut() {
                if browser.tab != *tab {
                    browser.tab = *tab;
                    browser.requirement = None;
                }
            }
        }
        ViewEvent::SelectRole(key) => {
            if let Some(browser) = next.browser.as_mut() {
                if data.role(key).is_ok() {
                    browser.tab = BrowserTab::Roles;
                    browser.role = Some(key.clone());
                    browser.requirement = None;
                }
            }
        }
        ViewEvent::SelectRequirement(id) => {
            if let Some(browser) = next.browser.as_mut() {
                if data.test_cases_for(id).is_ok() {
                    browser.requirement = Some(id.clone());
                }
            }
        }
    }

    next
}

/// Owns the view state, the positioner and the viewport subscription
pub struct ViewController {
    data: ReferenceData,
    state: ViewState,
    positioner: OverlayPositioner,
    listeners: ViewportListeners,
    subscription: Option<ListenerGuard>,
    forced_side: Option<Side>,
    /// Rendered overlay height, once measured
    overlay_height: Option<f32>,
    recomputations: usize,
}

impl ViewController {
    pub fn new(
        data: ReferenceData,
        positioner: OverlayPositioner,
        listeners: ViewportListeners,
    ) -> Self {
        Self {
            data,
            state: ViewState::default(),
            positioner,
            listeners,
            subscription: None,
            forced_side: None,
            overlay_height: None,
            recomputations: 0,
        }
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn positioner(&self) -> &OverlayPositioner {
        &self.positioner
    }

    /// Overrides the automatic side choice; `None` restores it
    pub fn force_side(&mut self, side: Option<Side>) {
        self.forced_side = side;
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Number of overlay placements computed so far
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        let next = reduce(&self.state, &event, &self.data);
        if next.selection() != self.state.selection() {
            self.overlay_height = None;
        }
        self.state = next;
        self.sync_subscription();
    }

    /// Called once the render pass that applied the selection has finished
    pub fn settle<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> bool {
        if !self.state.awaiting_layout {
            return false;
        }
        self.reposition(probe)
    }

    /// Resize/scroll notification; ignored while nothing is subscribed
    pub fn on_viewport_event<P: LayoutProbe + ?Sized>(
        &mut self,
        event: ViewportEvent,
        probe: &P,
    ) -> bool {
        if self.subscription.is_none() {
            return false;
        }
        log::trace!("Repositioning overlay after {:?}", event);
        self.reposition(probe)
    }

    /// Boundary pass, once the overlay has been rendered with `overlay_height`
    pub fn correct<P: LayoutProbe + ?Sized>(&mut self, overlay_height: f32, probe: &P) -> bool {
        if self.state.overlay.is_none() || self.overlay_height == Some(overlay_height) {
            return false;
        }
        self.overlay_height = Some(overlay_height);
        self.reposition(probe)
    }

    /// Drops the selection and the subscription, as when the view goes away
    pub fn unmount(&mut self) {
        self.dispatch(ViewEvent::CloseOverlay);
        self.subscription = None;
    }

    fn sync_subscription(&mut self) {
        match (self.state.selected_phase.is_some(), self.subscription.is_some()) {
            (true, false) => self.subscription = Some(self.listeners.subscribe()),
            (false, true) => self.subscription = None,
            _ => {}
        }
    }

    /// Returns true when the overlay position changed
    fn reposition<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> bool {
        let Some((methodology, index)) = self.state.selection() else {
            return false;
        };
        let trigger = ElementHandle::Phase { methodology, index };
        let placed = match self.overlay_height {
            Some(height) => {
                self.positioner
                    .locate_within_viewport(probe, trigger, self.forced_side, height)
            }
            None => self.positioner.locate(probe, trigger, self.forced_side),
        };
        let Some(position) = placed else {
            return false;
        };

        self.recomputations += 1;
        if self.state.overlay == Some(position) && !self.state.awaiting_layout {
            return false;
        }
        self.dispatch(ViewEvent::OverlayPlaced(position));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeLayout {
        rects: HashMap<ElementHandle, Rect>,
        viewport: Size,
    }

    impl FakeLayout {
        fn with_phases(kind: MethodologyKind, count: usize) -> Self {
            let mut rects = HashMap::new();
            rects.insert(ElementHandle::Container, Rect::new(50.0, 80.0, 1100.0, 2000.0));
            for index in 0..count {
                rects.insert(
                    ElementHandle::Phase {
                        methodology: kind,
                        index,
                    },
                    Rect::new(300.0, 100.0 + 70.0 * index as f32, 400.0, 50.0),
                );
            }
            Self {
                rects,
                viewport: Size::new(1200.0, 800.0),
            }
        }

        fn scroll_by(&mut self, dy: f32) {
            for rect in self.rects.values_mut() {
                rect.top -= dy;
            }
        }
    }

    impl LayoutProbe for FakeLayout {
        fn measure(&self, element: ElementHandle) -> Option<Rect> {
            self.rects.get(&element).copied()
        }

        fn viewport_size(&self) -> Size {
            self.viewport
        }
    }

    fn controller() -> (ViewController, ViewportListeners) {
        let listeners = ViewportListeners::new();
        let controller = ViewController::new(
            ReferenceData::builtin(),
            OverlayPositioner::default(),
            listeners.clone(),
        );
        (controller, listeners)
    }

    #[test]
    fn test_rotate_cycle() {
        let data = ReferenceData::builtin();
        let mut state = ViewState::default();
        assert_eq!(state.selector_angle(), 90.0);

        state = reduce(&state, &ViewEvent::RotateSelector, &data);
        assert_eq!(state.methodology, Some(MethodologyKind::Development));
        assert_eq!(state.selector_angle(), 0.0);

        state = reduce(&state, &ViewEvent::RotateSelector, &data);
        assert_eq!(state.methodology, Some(MethodologyKind::Testing));
        assert_eq!(state.selector_angle(), 180.0);

        state = reduce(&state, &ViewEvent::RotateSelector, &data);
        assert_eq!(state.methodology, None);
    }

    #[test]
    fn test_click_without_methodology_is_ignored() {
        let data = ReferenceData::builtin();
        let state = reduce(&ViewState::default(), &ViewEvent::ClickPhase(0), &data);
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn test_click_out_of_range_is_ignored() {
        let data = ReferenceData::builtin();
        let state = reduce(&ViewState::default(), &ViewEvent::RotateSelector, &data);
        let after = reduce(&state, &ViewEvent::ClickPhase(99), &data);
        assert_eq!(after, state);
    }

    #[test]
    fn test_toggle_same_phase_returns_to_no_selection() {
        let data = ReferenceData::builtin();
        let initial = reduce(&ViewState::default(), &ViewEvent::RotateSelector, &data);

        let selected = reduce(&initial, &ViewEvent::ClickPhase(2), &data);
        assert!(selected.is_selected(MethodologyKind::Development, 2));
        assert!(selected.awaiting_layout);

        let placed = reduce(
            &selected,
            &ViewEvent::OverlayPlaced(OverlayPosition {
                top: 1.0,
                left: 2.0,
                side: Side::After,
                anchor: 1.0,
            }),
            &data,
        );
        assert!(placed.overlay.is_some());

        let toggled = reduce(&placed, &ViewEvent::ClickPhase(2), &data);
        assert_eq!(toggled, initial);
    }

    #[test]
    fn test_click_other_phase_moves_selection() {
        let data = ReferenceData::builtin();
        let mut state = reduce(&ViewState::default(), &ViewEvent::RotateSelector, &data);
        state = reduce(&state, &ViewEvent::ClickPhase(0), &data);
        state = reduce(&state, &ViewEvent::ClickPhase(4), &data);
        assert_eq!(state.selected_phase, Some(4));
        assert!(state.overlay.is_none());
    }

    #[test]
    fn test_switching_methodology_clears_selection() {
        let data = ReferenceData::builtin();
        let mut state = reduce(&ViewState::default(), &ViewEvent::RotateSelector, &data);
        state = reduce(&state, &ViewEvent::ClickPhase(1), &data);
        state = reduce(&state, &ViewEvent::RotateSelector, &data);
        assert_eq!(state.methodology, Some(MethodologyKind::Testing));
        assert!(state.selected_phase.is_none());

        state = reduce(&state, &ViewEvent::ClickPhase(1), &data);
        state = reduce(&state, &ViewEvent::ShowMethodology(None), &data);
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_overlay_placed_without_selection_is_ignored() {
        let data = ReferenceData::builtin();
        let state = reduce(
            &ViewState::default(),
            &ViewEvent::OverlayPlaced(OverlayPosition {
                top: 0.0,
                left: 0.0,
                side: Side::Before,
                anchor: 0.0,
            }),
            &data,
        );
        assert!(state.overlay.is_none());
    }

    #[test]
    fn test_browser_tabs() {
        let data = ReferenceData::builtin();
        let mut state = reduce(&ViewState::default(), &ViewEvent::SelectRole("huesped".into()), &data);
        assert!(state.browser.is_none());

        state = reduce(&state, &ViewEvent::OpenBrowser(BrowserTab::Roles), &data);
        state = reduce(&state, &ViewEvent::SelectRole("huesped".into()), &data);
        state = reduce(&state, &ViewEvent::SelectRequirement("RF-02".into()), &data);
        let browser = state.browser.clone().unwrap();
        assert_eq!(browser.role.as_deref(), Some("huesped"));
        assert_eq!(browser.requirement.as_deref(), Some("RF-02"));

        state = reduce(&state, &ViewEvent::SwitchTab(BrowserTab::NonFunctional), &data);
        let browser = state.browser.clone().unwrap();
        assert_eq!(browser.tab, BrowserTab::NonFunctional);
        assert!(browser.requirement.is_none());

        state = reduce(&state, &ViewEvent::SelectRequirement("RF-404".into()), &data);
        assert!(state.browser.as_ref().unwrap().requirement.is_none());

        state = reduce(&state, &ViewEvent::CloseBrowser, &data);
        assert!(state.browser.is_none());
    }

    #[test]
    fn test_controller_places_overlay_after_layout() {
        let (mut controller, listeners) = controller();
        let layout = FakeLayout::with_phases(MethodologyKind::Development, 7);

        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(0));
        assert!(controller.state().overlay.is_none());
        assert_eq!(listeners.active(), 1);

        assert!(controller.settle(&layout));
        let overlay = controller.state().overlay.unwrap();
        assert_eq!(overlay.top, 45.0);
        assert_eq!(overlay.left, 670.0);
        assert_eq!(overlay.side, Side::After);

        // Nothing left to settle
        assert!(!controller.settle(&layout));
    }

    #[test]
    fn test_controller_repositions_on_scroll() {
        let (mut controller, _listeners) = controller();
        let mut layout = FakeLayout::with_phases(MethodologyKind::Development, 7);

        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(1));
        controller.settle(&layout);
        let before = controller.state().overlay.unwrap();

        // Page scroll moves trigger and container together
        layout.scroll_by(30.0);
        controller.on_viewport_event(ViewportEvent::Scroll, &layout);
        assert_eq!(controller.state().overlay.unwrap(), before);

        // Resizing the viewport so the overlay no longer fits on the right
        layout.viewport = Size::new(900.0, 800.0);
        assert!(controller.on_viewport_event(ViewportEvent::Resize, &layout));
        assert_eq!(controller.state().overlay.unwrap().side, Side::Before);
    }

    #[test]
    fn test_controller_boundary_pass() {
        let (mut controller, _listeners) = controller();
        let mut layout = FakeLayout::with_phases(MethodologyKind::Development, 7);
        layout.viewport = Size::new(1200.0, 600.0);

        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(6));
        controller.settle(&layout);
        // trigger top 520, container top 80 -> 440 + 25
        assert_eq!(controller.state().overlay.unwrap().top, 465.0);

        assert!(controller.correct(300.0, &layout));
        let overlay = controller.state().overlay.unwrap();
        assert_eq!(80.0 + overlay.top + 300.0, 584.0);
        assert_eq!(overlay.anchor, 465.0);

        // Same height again: nothing to do
        assert!(!controller.correct(300.0, &layout));
    }

    #[test]
    fn test_controller_skips_unmounted_trigger() {
        let (mut controller, _listeners) = controller();
        let layout = FakeLayout::with_phases(MethodologyKind::Development, 2);

        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(5));
        assert!(!controller.settle(&layout));
        assert!(controller.state().overlay.is_none());
        assert_eq!(controller.state().selected_phase, Some(5));
    }

    #[test]
    fn test_listener_released_when_selection_cleared() {
        let (mut controller, listeners) = controller();
        let layout = FakeLayout::with_phases(MethodologyKind::Development, 7);

        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(3));
        controller.settle(&layout);
        controller.dispatch(ViewEvent::ClickPhase(2));
        assert_eq!(listeners.active(), 1);

        controller.dispatch(ViewEvent::CloseOverlay);
        assert_eq!(listeners.active(), 0);
        assert!(!controller.is_subscribed());

        let count = controller.recomputations();
        assert!(!controller.on_viewport_event(ViewportEvent::Scroll, &layout));
        assert!(!controller.on_viewport_event(ViewportEvent::Resize, &layout));
        assert_eq!(controller.recomputations(), count);
    }

    #[test]
    fn test_listener_released_on_teardown() {
        let (mut controller, listeners) = controller();
        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(0));
        assert_eq!(listeners.active(), 1);

        drop(controller);
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn test_unmount() {
        let (mut controller, listeners) = controller();
        controller.dispatch(ViewEvent::RotateSelector);
        controller.dispatch(ViewEvent::ClickPhase(0));
        controller.unmount();
        assert_eq!(listeners.active(), 0);
        assert!(controller.state().selection().is_none());
    }

    #[test]
    fn test_forced_side() {
        let (mut controller, _listeners) = controller();
        let layout = FakeLayout::with_phases(MethodologyKind::Testing, 7);
        controller.force_side(Some(Side::Before));
        controller.dispatch(ViewEvent::ShowMethodology(Some(MethodologyKind::Testing)));
        controller.dispatch(ViewEvent::ClickPhase(0));
        controller.settle(&layout);
        let overlay = controller.state().overlay.unwrap();
        assert_eq!(overlay.side, Side::Before);
        // (300 - 50) - 380 - 20
        assert_eq!(overlay.left, -150.0);
    }
}
