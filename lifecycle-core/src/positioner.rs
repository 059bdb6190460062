//! Viewport-relative overlay placement
//!
//! Places a fixed-width panel next to a trigger element, inside the
//! coordinate frame of a containing element:
//!
//! ```text
//!  container.left
//!  |
//!  |   +---------trigger---------+ margin +----overlay----+
//!  |   |            *------------|------->| top = center  |
//!  |   +-------------------------+        |               |
//!  |                                      +---------------+
//! ```
//!
//! The side is chosen from the free space right of the trigger. Vertical
//! overflow is corrected in a second pass, once the rendered overlay height
//! is known.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};
use crate::models::MethodologyKind;

/// Horizontal side of the trigger the overlay is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left of the trigger
    Before,
    /// Right of the trigger
    After,
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "before" | "left" => Ok(Side::Before),
            "after" | "right" => Ok(Side::After),
            other => Err(format!("unknown side '{}' (expected before or after)", other)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

/// Container-relative placement of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayPosition {
    /// Vertical offset of the overlay's top edge from the container's top
    pub top: f32,
    /// Horizontal offset of the overlay's left edge from the container's left
    pub left: f32,
    pub side: Side,
    /// Vertical center of the trigger, container-relative
    pub anchor: f32,
}

impl OverlayPosition {
    /// Distance from the overlay's top edge to the trigger's center, where
    /// the pointer arrow is drawn
    pub fn arrow_offset(&self) -> f32 {
        self.anchor - self.top
    }
}

/// Placement constants, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub overlay_width: f32,
    /// Gap between trigger and overlay
    pub margin: f32,
    /// Smallest allowed distance between viewport top and overlay top
    pub min_top_margin: f32,
    /// Smallest allowed distance between overlay bottom and viewport bottom
    pub bottom_margin: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            overlay_width: 380.0,
            margin: 20.0,
            min_top_margin: 16.0,
            bottom_margin: 16.0,
        }
    }
}

/// Element whose on-screen rectangle the positioner needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementHandle {
    /// The card of phase `index` in the given methodology panel
    Phase {
        methodology: MethodologyKind,
        index: usize,
    },
    /// The element overlay offsets are relative to
    Container,
}

/// Measurement capability of the rendering surface.
///
/// `measure` returns `None` for elements that are not currently mounted.
pub trait LayoutProbe {
    fn measure(&self, element: ElementHandle) -> Option<Rect>;

    fn viewport_size(&self) -> Size;
}

#[derive(Debug, Clone, Default)]
pub struct OverlayPositioner {
    config: PlacementConfig,
}

impl OverlayPositioner {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn choose_side(&self, trigger: Rect, viewport: Size, forced: Option<Side>) -> Side {
        if let Some(side) = forced {
            return side;
        }
        let space = viewport.width - trigger.right();
        if space >= self.config.overlay_width + self.config.margin {
            Side::After
        } else {
            Side::Before
        }
    }

    /// First pass: side plus anchors, without knowledge of the overlay height
    pub fn place(
        &self,
        trigger: Rect,
        container: Rect,
        viewport: Size,
        forced: Option<Side>,
    ) -> OverlayPosition {
        let side = self.choose_side(trigger, viewport, forced);
        let top = (trigger.top - container.top) + trigger.height / 2.0;
        let left = match side {
            Side::After => (trigger.right() - container.left) + self.config.margin,
            Side::Before => {
                (trigger.left - container.left) - self.config.overlay_width - self.config.margin
            }
        };

        OverlayPosition {
            top,
            left,
            side,
            anchor: top,
        }
    }

    /// Second pass: keeps the measured overlay vertically inside the viewport.
    ///
    /// `container` must come from the same measurement as `position`.
    pub fn correct(
        &self,
        position: OverlayPosition,
        container: Rect,
        overlay_height: f32,
        viewport: Size,
    ) -> OverlayPosition {
        let min_top = self.config.min_top_margin;
        let max_bottom = viewport.height - self.config.bottom_margin;
        let absolute_top = container.top + position.top;

        let corrected_top = if absolute_top < min_top {
            min_top
        } else if absolute_top + overlay_height > max_bottom {
            (max_bottom - overlay_height).max(min_top)
        } else {
            absolute_top
        };

        OverlayPosition {
            top: corrected_top - container.top,
            ..position
        }
    }

    /// Measures trigger and container through `probe` and places the overlay.
    ///
    /// Returns `None` when either element is not mounted.
    pub fn locate<P: LayoutProbe + ?Sized>(
        &self,
        probe: &P,
        trigger: ElementHandle,
        forced: Option<Side>,
    ) -> Option<OverlayPosition> {
        let Some(trigger_rect) = probe.measure(trigger) else {
            log::debug!("Trigger {:?} not mounted, skipping placement", trigger);
            return None;
        };
        let container = probe.measure(ElementHandle::Container)?;
        Some(self.place(trigger_rect, container, probe.viewport_size(), forced))
    }

    /// Full recomputation: `locate` followed by the boundary pass for an
    /// overlay of known height
    pub fn locate_within_viewport<P: LayoutProbe + ?Sized>(
        &self,
        probe: &P,
        trigger: ElementHandle,
        forced: Option<Side>,
        overlay_height: f32,
    ) -> Option<OverlayPosition> {
        let position = self.locate(probe, trigger, forced)?;
        let container = probe.measure(ElementHandle::Container)?;
        Some(self.correct(position, container, overlay_height, probe.viewport_size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeLayout {
        rects: HashMap<ElementHandle, Rect>,
        viewport: Size,
    }

    impl LayoutProbe for FakeLayout {
        fn measure(&self, element: ElementHandle) -> Option<Rect> {
            self.rects.get(&element).copied()
        }

        fn viewport_size(&self) -> Size {
            self.viewport
        }
    }

    const FIRST_PHASE: ElementHandle = ElementHandle::Phase {
        methodology: MethodologyKind::Development,
        index: 0,
    };

    fn positioner() -> OverlayPositioner {
        OverlayPositioner::new(PlacementConfig::default())
    }

    #[test]
    fn test_side_after_when_space_allows() {
        // 1200 - 700 = 500 >= 380 + 20
        let trigger = Rect::from_edges(300.0, 100.0, 700.0, 150.0);
        let side = positioner().choose_side(trigger, Size::new(1200.0, 800.0), None);
        assert_eq!(side, Side::After);
    }

    #[test]
    fn test_side_before_when_space_is_short() {
        // 1200 - 850 = 350 < 400
        let trigger = Rect::from_edges(450.0, 100.0, 850.0, 150.0);
        let side = positioner().choose_side(trigger, Size::new(1200.0, 800.0), None);
        assert_eq!(side, Side::Before);

        // Exactly overlay_width + margin still fits
        let trigger = Rect::from_edges(400.0, 100.0, 800.0, 150.0);
        let side = positioner().choose_side(trigger, Size::new(1200.0, 800.0), None);
        assert_eq!(side, Side::After);
    }

    #[test]
    fn test_forced_side_wins() {
        let trigger = Rect::from_edges(300.0, 100.0, 700.0, 150.0);
        let side = positioner().choose_side(trigger, Size::new(1200.0, 800.0), Some(Side::Before));
        assert_eq!(side, Side::Before);
    }

    #[test]
    fn test_vertical_centering_and_after_offset() {
        let trigger = Rect::from_edges(300.0, 100.0, 700.0, 150.0);
        let container = Rect::new(50.0, 80.0, 1100.0, 2000.0);
        let pos = positioner().place(trigger, container, Size::new(1200.0, 800.0), None);

        assert_eq!(pos.top, 45.0);
        assert_eq!(pos.left, 670.0);
        assert_eq!(pos.side, Side::After);
        assert_eq!(pos.arrow_offset(), 0.0);
    }

    #[test]
    fn test_before_offset() {
        let trigger = Rect::from_edges(500.0, 100.0, 900.0, 150.0);
        let container = Rect::new(50.0, 80.0, 1100.0, 2000.0);
        let pos = positioner().place(trigger, container, Size::new(1200.0, 800.0), None);

        assert_eq!(pos.side, Side::Before);
        // (500 - 50) - 380 - 20
        assert_eq!(pos.left, 50.0);
    }

    #[test]
    fn test_correct_pushes_down_below_top_margin() {
        let container = Rect::new(0.0, -200.0, 1200.0, 3000.0);
        let pos = OverlayPosition {
            top: 190.0,
            left: 0.0,
            side: Side::After,
            anchor: 190.0,
        };
        // absolute top = -10
        let corrected = positioner().correct(pos, container, 300.0, Size::new(1200.0, 800.0));
        assert_eq!(container.top + corrected.top, 16.0);
        assert_eq!(corrected.arrow_offset(), 190.0 - 216.0);
    }

    #[test]
    fn test_correct_pulls_up_above_bottom_margin() {
        let container = Rect::new(0.0, 0.0, 1200.0, 3000.0);
        let pos = OverlayPosition {
            top: 700.0,
            left: 0.0,
            side: Side::After,
            anchor: 700.0,
        };
        let corrected = positioner().correct(pos, container, 300.0, Size::new(1200.0, 800.0));
        // bottom sits at 800 - 16
        assert_eq!(corrected.top + 300.0, 784.0);
    }

    #[test]
    fn test_correct_prefers_top_margin_for_tall_overlays() {
        let container = Rect::new(0.0, 0.0, 1200.0, 3000.0);
        let pos = OverlayPosition {
            top: 400.0,
            left: 0.0,
            side: Side::After,
            anchor: 400.0,
        };
        let corrected = positioner().correct(pos, container, 1000.0, Size::new(1200.0, 800.0));
        assert_eq!(corrected.top, 16.0);
    }

    #[test]
    fn test_correct_leaves_fitting_overlay_alone() {
        let container = Rect::new(0.0, 50.0, 1200.0, 3000.0);
        let pos = positioner().place(
            Rect::new(100.0, 200.0, 400.0, 60.0),
            container,
            Size::new(1200.0, 800.0),
            None,
        );
        let corrected = positioner().correct(pos, container, 200.0, Size::new(1200.0, 800.0));
        assert_eq!(corrected, pos);
    }

    #[test]
    fn test_locate_skips_unmounted_trigger() {
        let mut rects = HashMap::new();
        rects.insert(ElementHandle::Container, Rect::new(0.0, 0.0, 1200.0, 2000.0));
        let layout = FakeLayout {
            rects,
            viewport: Size::new(1200.0, 800.0),
        };
        assert!(positioner().locate(&layout, FIRST_PHASE, None).is_none());
    }

    #[test]
    fn test_locate_within_viewport() {
        let mut rects = HashMap::new();
        rects.insert(ElementHandle::Container, Rect::new(50.0, 80.0, 1100.0, 2000.0));
        rects.insert(FIRST_PHASE, Rect::from_edges(300.0, 700.0, 700.0, 760.0));
        let layout = FakeLayout {
            rects,
            viewport: Size::new(1200.0, 800.0),
        };

        let pos = positioner()
            .locate_within_viewport(&layout, FIRST_PHASE, None, 200.0)
            .unwrap();
        assert_eq!(pos.side, Side::After);
        assert_eq!(80.0 + pos.top + 200.0, 784.0);
        assert_eq!(pos.anchor, 650.0);
    }
}
