//! Strings and glyphs for the control dialog, built once at startup

use std::collections::HashMap;

use crate::controls::{ControlId, DropIcon, PlaybackIcon};

#[derive(Debug, Clone)]
pub struct PanelResources {
    pub title: String,
    pub play_glyph: String,
    pub pause_glyph: String,
    pub reset_glyph: String,
    pub drop_glyph: String,
    pub undrop_glyph: String,
    pub dim_glyph: String,
    pub bright_glyph: String,
    pub light_label: String,
    pub play_tooltip: String,
    pub reset_tooltip: String,
    pub speed_tooltip: String,
    labels: HashMap<ControlId, String>,
}

impl Default for PanelResources {
    fn default() -> Self {
        let labels = [
            (ControlId::Shadows, "Shadows"),
            (ControlId::Sky, "Sky"),
            (ControlId::Terrain, "Terrain"),
            (ControlId::Erosion, "Erosion"),
            (ControlId::Abutments, "Abutments"),
            (ControlId::Truck, "Truck"),
            (ControlId::ForcesAsColors, "Forces as colors"),
            (ControlId::Exaggeration, "Exaggeration"),
            (ControlId::Speed, "Speed"),
            (ControlId::Brightness, "Light"),
        ]
        .into_iter()
        .map(|(id, text)| (id, text.to_string()))
        .collect();

        Self {
            title: "Animation Controls".to_string(),
            play_glyph: "\u{25B6}".to_string(),
            pause_glyph: "\u{23F8}".to_string(),
            reset_glyph: "\u{23EE}".to_string(),
            drop_glyph: "\u{23F7}".to_string(),
            undrop_glyph: "\u{23F6}".to_string(),
            dim_glyph: "\u{263E}".to_string(),
            bright_glyph: "\u{2600}".to_string(),
            light_label: "Light".to_string(),
            play_tooltip: "Play or pause the animation".to_string(),
            reset_tooltip: "Return the truck to the start of the bridge".to_string(),
            speed_tooltip: "Truck speed".to_string(),
            labels,
        }
    }
}

impl PanelResources {
    pub fn label(&self, id: ControlId) -> &str {
        self.labels.get(&id).map(String::as_str).unwrap_or_else(|| id.key())
    }

    pub fn playback_glyph(&self, icon: PlaybackIcon) -> &str {
        match icon {
            PlaybackIcon::Play => &self.play_glyph,
            PlaybackIcon::Pause => &self.pause_glyph,
        }
    }

    pub fn drop_glyph(&self, icon: DropIcon) -> &str {
        match icon {
            DropIcon::Drop => &self.drop_glyph,
            DropIcon::Undrop => &self.undrop_glyph,
        }
    }
}
