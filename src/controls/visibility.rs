//! Panel visibility state machine
//!
//! The panel is hidden, shown collapsed (toolbar only) or shown expanded
//! (toolbar plus the secondary control section). Before it is shown the first
//! time it has to be anchored to the rendering surface and its expandable
//! section measured; that step moves through `Pending → Scheduled → Complete`
//! exactly once.

use tracing::{debug, info};

use super::host::{DropIcon, PanelWindow};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelVisibility {
    Hidden,
    ShownCollapsed,
    ShownExpanded,
}

/// One-time positioning progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstShow {
    /// Never requested
    Pending,
    /// Queued, waiting for the rendering surface
    Scheduled,
    /// Positioned and measured
    Complete { collapsed_height_delta: i32 },
}

#[derive(Debug)]
pub struct PanelVisibilityController {
    visibility: PanelVisibility,
    /// Sub-state to return to on the next show
    expanded: bool,
    first_show: FirstShow,
    /// Whether the panel should be shown when the animation (re)starts
    visible_state: bool,
}

impl Default for PanelVisibilityController {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelVisibilityController {
    pub fn new() -> Self {
        Self {
            visibility: PanelVisibility::Hidden,
            expanded: false,
            first_show: FirstShow::Pending,
            visible_state: true,
        }
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.first_show, FirstShow::Complete { .. })
    }

    pub fn collapsed_height_delta(&self) -> Option<i32> {
        match self.first_show {
            FirstShow::Complete { collapsed_height_delta } => Some(collapsed_height_delta),
            _ => None,
        }
    }

    pub fn visible_state(&self) -> bool {
        self.visible_state
    }

    pub fn set_visible_state(&mut self, visible: bool) {
        self.visible_state = visible;
    }

    /// Pending → Scheduled. False if the first show was already scheduled or done.
    pub fn schedule_first_show(&mut self) -> bool {
        if self.first_show != FirstShow::Pending {
            return false;
        }
        self.first_show = FirstShow::Scheduled;
        debug!("First show scheduled");
        true
    }

    /// Scheduled → Complete: anchor the window at `anchor`, measure the
    /// expandable section and shrink the window so it opens collapsed.
    /// Must only run once the rendering surface is ready.
    pub fn complete_first_show(&mut self, window: &mut dyn PanelWindow, anchor: Point) -> bool {
        if self.first_show != FirstShow::Scheduled {
            return false;
        }

        window.set_location(anchor);
        let delta = window.expandable_section_height();
        let collapsed = window.size().with_height_delta(-delta);
        window.set_size(collapsed);
        window.set_section_visible(false);
        window.set_drop_icon(DropIcon::Drop);

        self.expanded = false;
        self.first_show = FirstShow::Complete {
            collapsed_height_delta: delta,
        };
        info!(x = anchor.x, y = anchor.y, collapsed_height_delta = delta, "Positioned control panel");
        true
    }

    /// Make the window visible in its remembered sub-state
    pub fn show(&mut self, window: &mut dyn PanelWindow) {
        window.set_visible(true);
        self.visibility = if self.expanded {
            PanelVisibility::ShownExpanded
        } else {
            PanelVisibility::ShownCollapsed
        };
        debug!(visibility = ?self.visibility, "Panel shown");
    }

    /// Expand or collapse the control section. The window's top-left stays put
    /// and its height changes by exactly the measured section height.
    /// None while hidden or before the first show has completed.
    pub fn toggle_drop(&mut self, window: &mut dyn PanelWindow) -> Option<PanelVisibility> {
        let delta = self.collapsed_height_delta()?;

        let next = match self.visibility {
            PanelVisibility::Hidden => return None,
            PanelVisibility::ShownExpanded => {
                window.set_section_visible(false);
                let collapsed = window.size().with_height_delta(-delta);
                window.set_size(collapsed);
                window.set_drop_icon(DropIcon::Drop);
                PanelVisibility::ShownCollapsed
            }
            PanelVisibility::ShownCollapsed => {
                let expanded = window.size().with_height_delta(delta);
                window.set_size(expanded);
                window.set_section_visible(true);
                window.set_drop_icon(DropIcon::Undrop);
                PanelVisibility::ShownExpanded
            }
        };

        self.expanded = next == PanelVisibility::ShownExpanded;
        self.visibility = next;
        debug!(visibility = ?next, "Panel drop toggled");
        Some(next)
    }

    /// Hide the window, remembering whether it was visible at the time
    pub fn hide(&mut self, window: &mut dyn PanelWindow) {
        self.visible_state = window.is_visible();
        window.set_visible(false);
        self.visibility = PanelVisibility::Hidden;
        debug!(visible_state = self.visible_state, "Panel hidden");
    }

    /// The window was closed from its own title bar
    pub fn closed_by_user(&mut self) {
        self.visibility = PanelVisibility::Hidden;
    }
}
