//! Rendering surface: a side view of the bridge with the truck crossing it

use eframe::egui;

use crate::constants::animation::ROUTE_LENGTH_M;
use crate::gui::constants::*;
use crate::render_config::ConfigSnapshot;

/// Scale a full-light color by the light level (0.8 is full light)
fn lit(color: egui::Color32, level: f32) -> egui::Color32 {
    let factor = (level / 0.8).clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * factor).round() as u8;
    egui::Color32::from_rgb(scale(color.r()), scale(color.g()), scale(color.b()))
}

/// Paints the scene into all available space and returns the surface rect
pub fn ui(ui: &mut egui::Ui, snapshot: &ConfigSnapshot, travel: f32, take_focus: bool) -> egui::Rect {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
    if take_focus || response.clicked() {
        response.request_focus();
    }

    let painter = ui.painter_at(rect);
    let level = snapshot.light_brightness[0];

    let background = if snapshot.show_sky { SKY } else { NIGHT };
    painter.rect_filled(rect, 0.0, lit(background, level));

    let ground_top = rect.top() + rect.height() * 0.65;
    let deck_y = rect.top() + rect.height() * 0.55;
    let deck_left = rect.left() + rect.width() * 0.15;
    let deck_right = rect.right() - rect.width() * 0.15;

    if snapshot.show_terrain {
        let ground = egui::Rect::from_min_max(egui::pos2(rect.left(), ground_top), rect.right_bottom());
        painter.rect_filled(ground, 0.0, lit(TERRAIN, level));
    }

    if snapshot.show_erosion {
        for x in [deck_left, deck_right] {
            let scour = egui::Rect::from_center_size(egui::pos2(x, ground_top + 6.0), egui::vec2(48.0, 12.0));
            painter.rect_filled(scour, 4.0, lit(ERODED, level));
        }
    }

    if snapshot.show_abutments {
        for x in [deck_left, deck_right] {
            let abutment = egui::Rect::from_min_max(egui::pos2(x - 14.0, deck_y), egui::pos2(x + 14.0, ground_top + 10.0));
            painter.rect_filled(abutment, 0.0, lit(ABUTMENT, level));
        }
    }

    // Deck drawn as two halves sagging to midspan
    let sag = snapshot.displacement_exaggeration * SAG_PER_EXAGGERATION;
    let mid = egui::pos2((deck_left + deck_right) * 0.5, deck_y + sag);
    let (left_color, right_color) = if snapshot.show_forces_as_colors {
        (COMPRESSION, TENSION)
    } else {
        (DECK, DECK)
    };
    painter.line_segment([egui::pos2(deck_left, deck_y), mid], egui::Stroke::new(6.0, lit(left_color, level)));
    painter.line_segment([mid, egui::pos2(deck_right, deck_y)], egui::Stroke::new(6.0, lit(right_color, level)));

    if snapshot.show_truck {
        let fraction = (travel / ROUTE_LENGTH_M).clamp(0.0, 1.0);
        let x = deck_left + (deck_right - deck_left) * fraction;
        let t = 1.0 - (2.0 * fraction - 1.0).abs();
        let y = deck_y + sag * t - 3.0;
        let truck = egui::Rect::from_min_max(egui::pos2(x - 18.0, y - 16.0), egui::pos2(x + 18.0, y));

        if snapshot.show_shadows {
            let shadow = egui::Rect::from_center_size(egui::pos2(x + 6.0, ground_top + 4.0), egui::vec2(40.0, 6.0));
            painter.rect_filled(shadow, 3.0, SHADOW);
        }
        painter.rect_filled(truck, 2.0, lit(TRUCK, level));
    }

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_light_keeps_color() {
        assert_eq!(lit(TRUCK, 0.8), TRUCK);
    }

    #[test]
    fn test_dim_light_darkens() {
        let dim = lit(SKY, 0.2);
        assert!(dim.r() < SKY.r() && dim.g() < SKY.g() && dim.b() < SKY.b());
    }
}
