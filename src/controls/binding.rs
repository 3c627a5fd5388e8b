//! Declarative control → configuration bindings
//!
//! Every panel control is registered once with the configuration slot it
//! drives. Any change to a control's value is written through to the shared
//! [`RenderConfig`] immediately, so the animation picks it up on its next frame.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::constants::{controls, render};
use crate::render_config::{RenderConfig, RenderFlag};

/// Stable identifier of a panel control (also its persistence key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Shadows,
    Sky,
    Terrain,
    Abutments,
    ForcesAsColors,
    Erosion,
    Exaggeration,
    Truck,
    Speed,
    Brightness,
}

impl ControlId {
    pub fn key(self) -> &'static str {
        match self {
            ControlId::Shadows => "shadows",
            ControlId::Sky => "sky",
            ControlId::Terrain => "terrain",
            ControlId::Abutments => "abutments",
            ControlId::ForcesAsColors => "colors",
            ControlId::Erosion => "erosion",
            ControlId::Exaggeration => "exaggeration",
            ControlId::Truck => "truck",
            ControlId::Speed => "speed",
            ControlId::Brightness => "brightness",
        }
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A control's value: checkboxes hold booleans, sliders integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Bool(bool),
    Int(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl SliderRange {
    /// Clamp into the range and snap to the nearest step above `min`
    pub fn clamp(&self, value: i32) -> i32 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 1 {
            return clamped;
        }
        let steps = (clamped - self.min + self.step / 2) / self.step;
        (self.min + steps * self.step).min(self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Checkbox,
    Slider(SliderRange),
}

/// Where in the render configuration a control's value lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSlot {
    Flag(RenderFlag),
    Exaggeration,
    TruckSpeed,
    Brightness,
}

impl ConfigSlot {
    fn write(self, config: &RenderConfig, value: ControlValue) {
        match (self, value) {
            (ConfigSlot::Flag(flag), ControlValue::Bool(on)) => config.set_flag(flag, on),
            (ConfigSlot::Exaggeration, ControlValue::Bool(on)) => {
                config.set_displacement_exaggeration(exaggeration_for(on))
            }
            (ConfigSlot::TruckSpeed, ControlValue::Int(speed)) => config.set_truck_speed(speed),
            (ConfigSlot::Brightness, ControlValue::Int(level)) => {
                config.set_light_brightness(brightness_for(level))
            }
            // Values are normalized against the control kind before they get here
            (slot, value) => debug!(?slot, ?value, "Ignoring value of mismatched kind"),
        }
    }
}

/// Exaggeration for the checkbox state: standard when checked, true scale otherwise
pub fn exaggeration_for(checked: bool) -> f32 {
    if checked {
        render::STANDARD_EXAGGERATION
    } else {
        render::NO_EXAGGERATION
    }
}

/// Light channel level for a 0..=100 brightness slider value
pub fn brightness_for(slider: i32) -> f32 {
    render::MIN_BRIGHTNESS + render::BRIGHTNESS_SPAN * (slider as f32 * 0.01)
}

pub fn speed_label(speed: i32) -> String {
    format!("{speed} {}", controls::SPEED_UNITS)
}

/// One registered control
#[derive(Debug, Clone)]
pub struct ControlEntry {
    pub id: ControlId,
    pub kind: ControlKind,
    pub slot: ConfigSlot,
    pub default: ControlValue,
    pub value: ControlValue,
    pub enabled: bool,
    /// Value held back while a capability override forces the control off
    pub suppressed: Option<ControlValue>,
}

impl ControlEntry {
    /// Value to persist: capability overrides are never written to storage
    pub fn persisted_value(&self) -> ControlValue {
        self.suppressed.unwrap_or(self.value)
    }

    /// Coerce `value` into this control's legal range, or None on a kind mismatch
    fn normalize(&self, value: ControlValue) -> Option<ControlValue> {
        match (self.kind, value) {
            (ControlKind::Checkbox, ControlValue::Bool(_)) => Some(value),
            (ControlKind::Slider(range), ControlValue::Int(v)) => {
                Some(ControlValue::Int(range.clamp(v)))
            }
            _ => None,
        }
    }
}

pub struct ControlBindings {
    entries: Vec<ControlEntry>,
    config: Arc<RenderConfig>,
    speed_label: String,
}

impl ControlBindings {
    /// Empty binding set over `config`
    pub fn new(config: Arc<RenderConfig>) -> Self {
        Self {
            entries: Vec::new(),
            config,
            speed_label: speed_label(controls::DEFAULT_SPEED),
        }
    }

    /// The fly-through panel's controls with their compiled-in defaults
    pub fn standard(config: Arc<RenderConfig>) -> Self {
        let speed = SliderRange {
            min: controls::SPEED_MIN,
            max: controls::SPEED_MAX,
            step: controls::SPEED_STEP,
        };
        let brightness = SliderRange {
            min: controls::BRIGHTNESS_MIN,
            max: controls::BRIGHTNESS_MAX,
            step: controls::BRIGHTNESS_STEP,
        };

        let mut bindings = Self::new(config);
        let checkbox = |on: bool| (ControlKind::Checkbox, ControlValue::Bool(on));
        for (id, (kind, default), slot) in [
            (ControlId::Shadows, checkbox(false), ConfigSlot::Flag(RenderFlag::Shadows)),
            (ControlId::Sky, checkbox(true), ConfigSlot::Flag(RenderFlag::Sky)),
            (ControlId::Terrain, checkbox(true), ConfigSlot::Flag(RenderFlag::Terrain)),
            (ControlId::Abutments, checkbox(true), ConfigSlot::Flag(RenderFlag::Abutments)),
            (ControlId::ForcesAsColors, checkbox(true), ConfigSlot::Flag(RenderFlag::ForcesAsColors)),
            (ControlId::Erosion, checkbox(false), ConfigSlot::Flag(RenderFlag::Erosion)),
            (ControlId::Exaggeration, checkbox(true), ConfigSlot::Exaggeration),
            (ControlId::Truck, checkbox(true), ConfigSlot::Flag(RenderFlag::Truck)),
            (
                ControlId::Speed,
                (ControlKind::Slider(speed), ControlValue::Int(controls::DEFAULT_SPEED)),
                ConfigSlot::TruckSpeed,
            ),
            (
                ControlId::Brightness,
                (ControlKind::Slider(brightness), ControlValue::Int(controls::DEFAULT_BRIGHTNESS)),
                ConfigSlot::Brightness,
            ),
        ] {
            bindings.bind(id, kind, default, slot);
        }
        bindings
    }

    /// Register `id` against `slot`; the default is written through immediately.
    /// Rebinding an id replaces its previous registration.
    pub fn bind(&mut self, id: ControlId, kind: ControlKind, default: ControlValue, slot: ConfigSlot) {
        let mut entry = ControlEntry {
            id,
            kind,
            slot,
            default,
            value: default,
            enabled: true,
            suppressed: None,
        };
        if let Some(value) = entry.normalize(default) {
            entry.default = value;
            entry.value = value;
        }

        let idx = match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.entries[idx] = entry;
                idx
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        self.write_through(idx);
    }

    /// User-driven change. Disabled controls ignore input.
    /// Returns true if the value changed.
    pub fn set(&mut self, id: ControlId, value: ControlValue) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if !self.entries[idx].enabled {
            debug!(control = %id, "Ignoring change to disabled control");
            return false;
        }
        self.assign(idx, value)
    }

    /// Apply a stored value, bypassing the enabled check
    pub fn load(&mut self, id: ControlId, value: ControlValue) -> bool {
        match self.index_of(id) {
            Some(idx) => self.assign(idx, value),
            None => false,
        }
    }

    fn assign(&mut self, idx: usize, value: ControlValue) -> bool {
        let entry = &self.entries[idx];
        let Some(value) = entry.normalize(value) else {
            debug!(control = %entry.id, ?value, "Value does not match control kind");
            return false;
        };
        let changed = entry.value != value;
        self.entries[idx].value = value;
        self.entries[idx].suppressed = None;
        self.write_through(idx);
        changed
    }

    fn write_through(&mut self, idx: usize) {
        let entry = &self.entries[idx];
        entry.slot.write(&self.config, entry.value);
        if let (ConfigSlot::TruckSpeed, ControlValue::Int(speed)) = (entry.slot, entry.value) {
            self.speed_label = speed_label(speed);
        }
    }

    /// Push every control's current value into the configuration
    pub fn sync_all(&mut self) {
        for idx in 0..self.entries.len() {
            self.write_through(idx);
        }
    }

    /// Force the shadow control off and disabled when the host can't render shadows
    pub fn enforce_capabilities(&mut self) {
        let supported = self.config.can_show_shadows();
        for idx in 0..self.entries.len() {
            if self.entries[idx].slot != ConfigSlot::Flag(RenderFlag::Shadows) {
                continue;
            }
            let entry = &mut self.entries[idx];
            entry.enabled = supported;
            if !supported {
                if entry.suppressed.is_none() {
                    entry.suppressed = Some(entry.value);
                }
                if entry.value != ControlValue::Bool(false) {
                    info!(control = %entry.id, "Shadows unsupported by host, disabling control");
                    entry.value = ControlValue::Bool(false);
                }
                self.write_through(idx);
            }
        }
    }

    fn index_of(&self, id: ControlId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn entry(&self, id: ControlId) -> Option<&ControlEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[ControlEntry] {
        &self.entries
    }

    pub fn value(&self, id: ControlId) -> Option<ControlValue> {
        self.entry(id).map(|e| e.value)
    }

    /// Checkbox state (false for unknown or non-checkbox ids)
    pub fn checked(&self, id: ControlId) -> bool {
        matches!(self.value(id), Some(ControlValue::Bool(true)))
    }

    /// Slider position (0 for unknown or non-slider ids)
    pub fn slider(&self, id: ControlId) -> i32 {
        match self.value(id) {
            Some(ControlValue::Int(v)) => v,
            _ => 0,
        }
    }

    pub fn is_enabled(&self, id: ControlId) -> bool {
        self.entry(id).is_some_and(|e| e.enabled)
    }

    pub fn speed_label(&self) -> &str {
        &self.speed_label
    }
}
