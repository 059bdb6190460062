use eframe::egui;
use std::collections::HashMap;

use lifecycle_core::{ElementHandle, LayoutProbe, Rect, Size};

/// Widget rectangles recorded while drawing the current frame
#[derive(Debug, Default)]
pub struct FrameLayout {
    rects: HashMap<ElementHandle, Rect>,
    viewport: Size,
}

impl FrameLayout {
    /// Forgets the previous frame; elements not drawn again count as unmounted
    pub fn begin_frame(&mut self, screen: egui::Rect) {
        self.rects.clear();
        self.viewport = Size::new(screen.width(), screen.height());
    }

    pub fn record(&mut self, element: ElementHandle, rect: egui::Rect) {
        self.rects.insert(element, to_rect(rect));
    }

    pub fn container_origin(&self) -> Option<egui::Pos2> {
        self.rects
            .get(&ElementHandle::Container)
            .map(|r| egui::pos2(r.left, r.top))
    }
}

impl LayoutProbe for FrameLayout {
    fn measure(&self, element: ElementHandle) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}

pub fn to_rect(rect: egui::Rect) -> Rect {
    Rect::from_edges(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}
