//! Toolbar and drop-down section of the control dialog

use eframe::egui;

use crate::controls::binding::ControlKind;
use crate::controls::{ControlBindings, ControlId, ControlValue, DropIcon, FlyThruControls};
use crate::gui::constants::*;
use crate::gui::resources::PanelResources;

/// Something the user did in the dialog this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Set(ControlId, ControlValue),
    TogglePlayback,
    Reset,
    ToggleDrop,
}

const LEFT_COLUMN: [ControlId; 6] = [
    ControlId::Shadows,
    ControlId::Sky,
    ControlId::Terrain,
    ControlId::Erosion,
    ControlId::Abutments,
    ControlId::Truck,
];

const RIGHT_COLUMN: [ControlId; 2] = [ControlId::ForcesAsColors, ControlId::Exaggeration];

/// Renders the dialog contents and returns the actions taken
pub fn ui(
    ui: &mut egui::Ui,
    controls: &FlyThruControls,
    section_visible: bool,
    drop_icon: DropIcon,
    resources: &PanelResources,
) -> Vec<PanelAction> {
    let mut actions = Vec::new();
    let bindings = controls.bindings();

    ui.horizontal(|ui| {
        if ui
            .button(resources.reset_glyph.as_str())
            .on_hover_text(resources.reset_tooltip.as_str())
            .clicked()
        {
            actions.push(PanelAction::Reset);
        }

        let play = resources.playback_glyph(controls.playback().icon());
        if ui.button(play).on_hover_text(resources.play_tooltip.as_str()).clicked() {
            actions.push(PanelAction::TogglePlayback);
        }

        ui.add_space(ITEM_SPACING);
        ui.spacing_mut().slider_width = SPEED_SLIDER_WIDTH;
        slider(ui, bindings, ControlId::Speed, false, &mut actions)
            .on_hover_text(resources.speed_tooltip.as_str());
        ui.add_space(ITEM_SPACING);

        if ui.button(resources.drop_glyph(drop_icon)).clicked() {
            actions.push(PanelAction::ToggleDrop);
        }
    });

    if !section_visible {
        return actions;
    }

    ui.separator();
    ui.vertical_centered(|ui| {
        ui.label(bindings.speed_label());
    });

    ui.horizontal_top(|ui| {
        ui.vertical(|ui| {
            for id in LEFT_COLUMN {
                checkbox(ui, bindings, id, resources, &mut actions);
            }
        });

        ui.add_space(ITEM_SPACING);

        ui.vertical(|ui| {
            for id in RIGHT_COLUMN {
                checkbox(ui, bindings, id, resources, &mut actions);
            }

            ui.horizontal(|ui| {
                ui.spacing_mut().slider_width = BRIGHTNESS_SLIDER_HEIGHT;
                slider(ui, bindings, ControlId::Brightness, true, &mut actions);
                ui.vertical(|ui| {
                    ui.label(resources.bright_glyph.as_str());
                    ui.add_space(ITEM_SPACING);
                    ui.label(resources.light_label.as_str());
                    ui.add_space(ITEM_SPACING);
                    ui.label(resources.dim_glyph.as_str());
                });
            });
        });
    });

    actions
}

fn checkbox(
    ui: &mut egui::Ui,
    bindings: &ControlBindings,
    id: ControlId,
    resources: &PanelResources,
    actions: &mut Vec<PanelAction>,
) {
    let mut checked = bindings.checked(id);
    let response = ui.add_enabled(
        bindings.is_enabled(id),
        egui::Checkbox::new(&mut checked, resources.label(id)),
    );
    if response.changed() {
        actions.push(PanelAction::Set(id, ControlValue::Bool(checked)));
    }
}

fn slider(
    ui: &mut egui::Ui,
    bindings: &ControlBindings,
    id: ControlId,
    vertical: bool,
    actions: &mut Vec<PanelAction>,
) -> egui::Response {
    let Some(entry) = bindings.entry(id) else {
        return ui.label("");
    };
    let ControlKind::Slider(range) = entry.kind else {
        return ui.label("");
    };

    let mut value = bindings.slider(id);
    let mut widget = egui::Slider::new(&mut value, range.min..=range.max)
        .step_by(range.step as f64)
        .show_value(false);
    if vertical {
        widget = widget.vertical();
    }

    let response = ui.add_enabled(entry.enabled, widget);
    if response.changed() {
        actions.push(PanelAction::Set(id, ControlValue::Int(value)));
    }
    response
}
