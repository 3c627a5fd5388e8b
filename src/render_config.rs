//! Shared render configuration
//!
//! Written by the control panel on the UI thread and read by the animation
//! ticker on its own thread. Every field is independently atomic; the three
//! light channels are always equal, so they are published as a single value
//! and a reader can never observe a half-updated brightness.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

use crate::constants::{controls, render};

/// Boolean scene features toggled from the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderFlag {
    Shadows,
    Terrain,
    Sky,
    ForcesAsColors,
    Abutments,
    Truck,
    Erosion,
}

/// f32 stored as raw bits in an AtomicU32
#[derive(Debug)]
pub(crate) struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub(crate) fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub(crate) fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

#[derive(Debug)]
pub struct RenderConfig {
    paused: AtomicBool,
    truck_speed: AtomicI32,
    show_shadows: AtomicBool,
    show_terrain: AtomicBool,
    show_sky: AtomicBool,
    show_forces_as_colors: AtomicBool,
    show_abutments: AtomicBool,
    show_truck: AtomicBool,
    show_erosion: AtomicBool,
    displacement_exaggeration: AtomicF32,
    light_brightness: AtomicF32,
    can_show_shadows: AtomicBool,
}

/// Plain copy of the configuration taken once per animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigSnapshot {
    pub paused: bool,
    pub truck_speed: i32,
    pub show_shadows: bool,
    pub show_terrain: bool,
    pub show_sky: bool,
    pub show_forces_as_colors: bool,
    pub show_abutments: bool,
    pub show_truck: bool,
    pub show_erosion: bool,
    pub displacement_exaggeration: f32,
    pub light_brightness: [f32; 3],
    pub can_show_shadows: bool,
}

impl RenderConfig {
    /// Configuration with the scene defaults; `can_show_shadows` comes from the host
    pub fn new(can_show_shadows: bool) -> Self {
        Self {
            paused: AtomicBool::new(false),
            truck_speed: AtomicI32::new(controls::DEFAULT_SPEED),
            show_shadows: AtomicBool::new(false),
            show_terrain: AtomicBool::new(true),
            show_sky: AtomicBool::new(true),
            show_forces_as_colors: AtomicBool::new(true),
            show_abutments: AtomicBool::new(true),
            show_truck: AtomicBool::new(true),
            show_erosion: AtomicBool::new(false),
            displacement_exaggeration: AtomicF32::new(render::STANDARD_EXAGGERATION),
            light_brightness: AtomicF32::new(render::MIN_BRIGHTNESS + render::BRIGHTNESS_SPAN * 0.5),
            can_show_shadows: AtomicBool::new(can_show_shadows),
        }
    }

    fn flag_cell(&self, flag: RenderFlag) -> &AtomicBool {
        match flag {
            RenderFlag::Shadows => &self.show_shadows,
            RenderFlag::Terrain => &self.show_terrain,
            RenderFlag::Sky => &self.show_sky,
            RenderFlag::ForcesAsColors => &self.show_forces_as_colors,
            RenderFlag::Abutments => &self.show_abutments,
            RenderFlag::Truck => &self.show_truck,
            RenderFlag::Erosion => &self.show_erosion,
        }
    }

    pub fn flag(&self, flag: RenderFlag) -> bool {
        self.flag_cell(flag).load(Ordering::Acquire)
    }

    pub fn set_flag(&self, flag: RenderFlag, on: bool) {
        self.flag_cell(flag).store(on, Ordering::Release);
    }

    pub fn paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    pub fn truck_speed(&self) -> i32 {
        self.truck_speed.load(Ordering::Acquire)
    }

    pub fn set_truck_speed(&self, speed: i32) {
        self.truck_speed.store(speed, Ordering::Release);
    }

    pub fn displacement_exaggeration(&self) -> f32 {
        self.displacement_exaggeration.load()
    }

    pub fn set_displacement_exaggeration(&self, exaggeration: f32) {
        self.displacement_exaggeration.store(exaggeration);
    }

    /// All three light channels (always equal)
    pub fn light_brightness(&self) -> [f32; 3] {
        let level = self.light_brightness.load();
        [level; 3]
    }

    /// Set every light channel to `level` in a single store
    pub fn set_light_brightness(&self, level: f32) {
        self.light_brightness.store(level);
    }

    pub fn can_show_shadows(&self) -> bool {
        self.can_show_shadows.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            paused: self.paused(),
            truck_speed: self.truck_speed(),
            show_shadows: self.flag(RenderFlag::Shadows),
            show_terrain: self.flag(RenderFlag::Terrain),
            show_sky: self.flag(RenderFlag::Sky),
            show_forces_as_colors: self.flag(RenderFlag::ForcesAsColors),
            show_abutments: self.flag(RenderFlag::Abutments),
            show_truck: self.flag(RenderFlag::Truck),
            show_erosion: self.flag(RenderFlag::Erosion),
            displacement_exaggeration: self.displacement_exaggeration(),
            light_brightness: self.light_brightness(),
            can_show_shadows: self.can_show_shadows(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_flags_are_independent() {
        let config = RenderConfig::default();
        config.set_flag(RenderFlag::Erosion, true);
        config.set_flag(RenderFlag::Sky, false);

        assert!(config.flag(RenderFlag::Erosion));
        assert!(!config.flag(RenderFlag::Sky));
        assert!(config.flag(RenderFlag::Terrain));
    }

    #[test]
    fn test_brightness_channels_equal() {
        let config = RenderConfig::default();
        config.set_light_brightness(0.74);
        assert_eq!(config.light_brightness(), [0.74, 0.74, 0.74]);
    }

    #[test]
    fn test_snapshot_reflects_writes() {
        let config = RenderConfig::new(false);
        config.set_paused(true);
        config.set_truck_speed(15);
        config.set_displacement_exaggeration(1.0);

        let snap = config.snapshot();
        assert!(snap.paused);
        assert_eq!(snap.truck_speed, 15);
        assert_eq!(snap.displacement_exaggeration, 1.0);
        assert!(!snap.can_show_shadows);
    }

    #[test]
    fn test_reader_never_sees_torn_brightness() {
        let config = Arc::new(RenderConfig::default());
        let writer = {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for i in 0..10_000 {
                    config.set_light_brightness(if i % 2 == 0 { 0.2 } else { 0.8 });
                }
            })
        };

        for _ in 0..10_000 {
            let [r, g, b] = config.snapshot().light_brightness;
            assert!(r == g && g == b);
        }
        writer.join().unwrap();
    }
}
