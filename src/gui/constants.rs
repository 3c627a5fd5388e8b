//! GUI-specific constants for layout, scene colors and intervals

use egui;

/// Main window minimum size
pub const WINDOW_MIN_WIDTH: f32 = 480.0;
pub const WINDOW_MIN_HEIGHT: f32 = 360.0;

/// Control dialog layout
pub const PANEL_WIDTH: i32 = 320;
pub const TOOLBAR_HEIGHT: i32 = 44;
/// Rows in the tallest column of the expandable section (speed readout + six checkboxes)
pub const SECTION_ROWS: i32 = 7;
pub const SECTION_PADDING: f32 = 12.0;
pub const BRIGHTNESS_SLIDER_HEIGHT: f32 = 97.0;
pub const SPEED_SLIDER_WIDTH: f32 = 120.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Scene colors at full light
pub const SKY: egui::Color32 = egui::Color32::from_rgb(135, 185, 235);
pub const NIGHT: egui::Color32 = egui::Color32::from_rgb(30, 30, 40);
pub const TERRAIN: egui::Color32 = egui::Color32::from_rgb(96, 128, 64);
pub const ERODED: egui::Color32 = egui::Color32::from_rgb(140, 100, 60);
pub const ABUTMENT: egui::Color32 = egui::Color32::from_rgb(160, 160, 150);
pub const DECK: egui::Color32 = egui::Color32::from_rgb(110, 110, 120);
pub const COMPRESSION: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);
pub const TENSION: egui::Color32 = egui::Color32::from_rgb(40, 60, 200);
pub const TRUCK: egui::Color32 = egui::Color32::from_rgb(230, 180, 20);
pub const SHADOW: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 90);

/// Deck sag in points per unit of displacement exaggeration
pub const SAG_PER_EXAGGERATION: f32 = 0.6;
