pub mod controls_panel;
pub mod scene;
