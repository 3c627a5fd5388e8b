//! egui front end: the rendering surface window and the floating control dialog

mod app;
mod components;
mod constants;
mod dialog;
mod resources;

pub use app::run_gui;
pub use resources::PanelResources;
