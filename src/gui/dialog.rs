//! egui-side state of the floating control dialog
//!
//! egui is immediate mode, so the dialog is just the geometry and flags the
//! controls asked for; `FlyThruApp` reads them back when it builds the window
//! each frame.

use eframe::egui;

use super::constants::{PANEL_WIDTH, SECTION_PADDING, SECTION_ROWS, TOOLBAR_HEIGHT};
use crate::controls::{DropIcon, PanelWindow};
use crate::geometry::{Point, Rect, Size};

pub struct EguiDialog {
    location: Point,
    /// Set by `set_location`, applied to the egui window on the next frame
    pending_location: Option<Point>,
    size: Size,
    section_visible: bool,
    drop_icon: DropIcon,
    visible: bool,
    section_height: i32,
}

/// Height of the expandable section as laid out with `style`
pub fn measure_section_height(style: &egui::Style) -> i32 {
    let spacing = &style.spacing;
    let row = spacing.interact_size.y + spacing.item_spacing.y;
    (SECTION_ROWS as f32 * row + 2.0 * SECTION_PADDING).ceil() as i32
}

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x.round() as i32, pos.y.round() as i32)
}

pub fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(
        to_point(rect.min),
        Size::new(rect.width().round() as i32, rect.height().round() as i32),
    )
}

impl EguiDialog {
    /// Dialog laid out fully expanded and not yet shown
    pub fn new(style: &egui::Style) -> Self {
        let section_height = measure_section_height(style);
        Self {
            location: Point::default(),
            pending_location: None,
            size: Size::new(PANEL_WIDTH, TOOLBAR_HEIGHT + section_height),
            section_visible: true,
            drop_icon: DropIcon::Undrop,
            visible: false,
            section_height,
        }
    }

    pub fn take_pending_location(&mut self) -> Option<Point> {
        self.pending_location.take()
    }

    /// Follow the window after the user drags it
    pub fn track_location(&mut self, location: Point) {
        self.location = location;
    }

    pub fn is_section_visible(&self) -> bool {
        self.section_visible
    }

    pub fn drop_icon(&self) -> DropIcon {
        self.drop_icon
    }

    pub fn egui_size(&self) -> egui::Vec2 {
        egui::vec2(self.size.width as f32, self.size.height as f32)
    }
}

impl PanelWindow for EguiDialog {
    fn location(&self) -> Point {
        self.location
    }

    fn set_location(&mut self, location: Point) {
        self.location = location;
        self.pending_location = Some(location);
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    fn expandable_section_height(&self) -> i32 {
        self.section_height
    }

    fn set_section_visible(&mut self, visible: bool) {
        self.section_visible = visible;
    }

    fn set_drop_icon(&mut self, icon: DropIcon) {
        self.drop_icon = icon;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
