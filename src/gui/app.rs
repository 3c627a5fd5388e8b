//! Fly-through window implemented with egui/eframe
//!
//! The central panel is the rendering surface; the animation controls float
//! above it in their own egui window.

use std::time::Duration;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::info;

use super::components::controls_panel::{self, PanelAction};
use super::components::scene;
use super::constants::*;
use super::dialog::{to_point, to_rect, EguiDialog};
use super::resources::PanelResources;
use crate::animation::FlyThruAnimation;
use crate::constants::animation::FRAME_INTERVAL_MS;
use crate::controls::{AnimationHost, FlyThruControls, PanelWindow};

struct FlyThruApp {
    animation: FlyThruAnimation,
    controls: FlyThruControls,
    dialog: EguiDialog,
    resources: PanelResources,
}

impl FlyThruApp {
    fn new(
        cc: &CreationContext<'_>,
        animation: FlyThruAnimation,
        controls: FlyThruControls,
        resources: PanelResources,
    ) -> Self {
        info!("Initializing fly-through window");
        let dialog = EguiDialog::new(&cc.egui_ctx.style());

        let mut app = Self {
            animation,
            controls,
            dialog,
            resources,
        };
        app.controls.start_animation(&mut app.animation, &mut app.dialog);
        app
    }

    fn handle(&mut self, action: PanelAction) {
        match action {
            PanelAction::Set(id, value) => {
                self.controls.set_control(id, value);
            }
            PanelAction::TogglePlayback => {
                self.controls.toggle_playback();
            }
            PanelAction::Reset => self.controls.reset(&mut self.animation),
            PanelAction::ToggleDrop => {
                self.controls.toggle_drop(&mut self.dialog);
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Animation", |ui| {
                    if ui.button("Show controls").clicked() {
                        self.controls.show_panel(&mut self.animation, &mut self.dialog);
                        ui.close();
                    }
                    if ui.button("Hide controls").clicked() {
                        self.controls.save_visibility_and_hide(&mut self.dialog);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Restart").clicked() {
                        self.controls.start_animation(&mut self.animation, &mut self.dialog);
                        ui.close();
                    }
                });
            });
        });
    }

    fn controls_window(&mut self, ctx: &egui::Context) {
        if !self.dialog.is_visible() {
            return;
        }

        let mut open = true;
        let mut window = egui::Window::new(self.resources.title.as_str())
            .id(egui::Id::new("flythru_controls"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .fixed_size(self.dialog.egui_size());
        if let Some(location) = self.dialog.take_pending_location() {
            window = window.current_pos(egui::pos2(location.x as f32, location.y as f32));
        }

        let section_visible = self.dialog.is_section_visible();
        let drop_icon = self.dialog.drop_icon();
        let controls = &self.controls;
        let resources = &self.resources;
        let shown = window.show(ctx, |ui| {
            controls_panel::ui(ui, controls, section_visible, drop_icon, resources)
        });

        let mut actions = Vec::new();
        if let Some(shown) = shown {
            self.dialog.track_location(to_point(shown.response.rect.min));
            actions = shown.inner.unwrap_or_default();
        }
        for action in actions {
            self.handle(action);
        }

        if !open {
            info!("Controls closed by user");
            self.controls.panel_closed(&mut self.dialog);
        }
    }
}

impl eframe::App for FlyThruApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);

        let snapshot = self.animation.config().snapshot();
        let travel = self.animation.travel();
        let take_focus = self.animation.take_focus_request();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let surface = scene::ui(ui, &snapshot, travel, take_focus);
                self.animation.set_surface(to_rect(surface));
            });

        // Deferred work runs after the surface has been laid out this pass
        self.controls.run_pending(&mut self.animation, &mut self.dialog);
        self.controls_window(ctx);

        ctx.request_repaint_after(Duration::from_millis(FRAME_INTERVAL_MS));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controls.save_visibility_and_hide(&mut self.dialog);
        self.animation.stop();
        info!("Fly-through exiting");
    }
}

pub fn run_gui(
    window_size: [f32; 2],
    animation: FlyThruAnimation,
    controls: FlyThruControls,
    resources: PanelResources,
) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Bridge Fly-Through"),
        ..Default::default()
    };

    eframe::run_native(
        "Bridge Fly-Through",
        options,
        Box::new(|cc| Ok(Box::new(FlyThruApp::new(cc, animation, controls, resources)))),
    )
    .map_err(|err| anyhow!("Failed to launch fly-through window: {err}"))
}
