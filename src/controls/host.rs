//! Collaborator seams between the control panel logic and its toolkit/renderer

use std::sync::Arc;

use crate::geometry::{Point, Size};
use crate::render_config::RenderConfig;

/// Affordance on the drop button: what pressing it will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIcon {
    /// Expand the control section
    Drop,
    /// Collapse the control section
    Undrop,
}

/// The floating dialog hosting the controls
pub trait PanelWindow {
    fn location(&self) -> Point;
    fn set_location(&mut self, location: Point);
    fn size(&self) -> Size;
    fn set_size(&mut self, size: Size);
    /// Laid-out pixel height of the expandable control section
    fn expandable_section_height(&self) -> i32;
    fn set_section_visible(&mut self, visible: bool);
    fn set_drop_icon(&mut self, icon: DropIcon);
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
}

/// The animation loop and its rendering surface
pub trait AnimationHost {
    fn config(&self) -> &Arc<RenderConfig>;
    fn start(&mut self);
    fn reset(&mut self);
    /// Top-left of the rendering surface on screen
    fn surface_location(&self) -> Point;
    /// True once the surface has finished its own native setup
    fn is_surface_ready(&self) -> bool;
    fn request_surface_focus(&mut self) {}
}
