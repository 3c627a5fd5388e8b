//! Simulated fly-through animation loop
//!
//! A background ticker advances the truck along the bridge deck, reading the
//! shared render configuration once per frame. The GUI paints the scene from
//! the same configuration plus the truck's travelled distance.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::constants::animation::{FRAME_INTERVAL_MS, ROUTE_LENGTH_M};
use crate::controls::AnimationHost;
use crate::geometry::{Point, Rect};
use crate::render_config::{AtomicF32, RenderConfig};

pub struct FlyThruAnimation {
    config: Arc<RenderConfig>,
    /// Meters along the route
    travel: Arc<AtomicF32>,
    /// Raised by `reset`, consumed by the ticker before it moves the truck
    reset_requested: Arc<AtomicBool>,
    running: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
    surface: Option<Rect>,
    focus_requested: bool,
}

/// Distance after driving `dt` seconds at `speed_kmh`, wrapped to the route
pub fn advance(travel: f32, speed_kmh: i32, dt: f32) -> f32 {
    let meters_per_sec = speed_kmh as f32 * 1000.0 / 3600.0;
    (travel + meters_per_sec * dt).rem_euclid(ROUTE_LENGTH_M)
}

/// One animation frame: honor a pending reset, otherwise move the truck
/// unless paused
fn tick(config: &RenderConfig, travel: &AtomicF32, reset_requested: &AtomicBool, dt: f32) {
    if reset_requested.swap(false, Ordering::AcqRel) {
        travel.store(0.0);
        return;
    }

    let snapshot = config.snapshot();
    if snapshot.paused {
        return;
    }
    travel.store(advance(travel.load(), snapshot.truck_speed, dt));
}

impl FlyThruAnimation {
    pub fn new(config: Arc<RenderConfig>) -> Self {
        Self {
            config,
            travel: Arc::new(AtomicF32::new(0.0)),
            reset_requested: Arc::new(AtomicBool::new(false)),
            running: Arc::new(AtomicBool::new(false)),
            ticker: None,
            surface: None,
            focus_requested: false,
        }
    }

    /// Record where the rendering surface was laid out. The first call marks
    /// the surface ready.
    pub fn set_surface(&mut self, rect: Rect) {
        if self.surface.is_none() {
            info!(x = rect.left(), y = rect.top(), width = rect.size.width, height = rect.size.height, "Rendering surface ready");
        }
        self.surface = Some(rect);
    }

    pub fn travel(&self) -> f32 {
        self.travel.load()
    }

    /// Consume a pending focus request from the controls
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.ticker.take() {
            if handle.join().is_err() {
                error!("Animation ticker thread panicked");
            }
            debug!("Animation ticker stopped");
        }
    }
}

impl AnimationHost for FlyThruAnimation {
    fn config(&self) -> &Arc<RenderConfig> {
        &self.config
    }

    fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        self.running.store(true, Ordering::Release);
        let config = Arc::clone(&self.config);
        let travel = Arc::clone(&self.travel);
        let reset_requested = Arc::clone(&self.reset_requested);
        let running = Arc::clone(&self.running);
        let frame = Duration::from_millis(FRAME_INTERVAL_MS);

        self.ticker = Some(thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                tick(&config, &travel, &reset_requested, frame.as_secs_f32());
                thread::sleep(frame);
            }
        }));
        info!("Animation started");
    }

    /// The ticker may be midway through a frame, so the request flag makes
    /// sure its next pass lands on zero as well
    fn reset(&mut self) {
        self.reset_requested.store(true, Ordering::Release);
        self.travel.store(0.0);
    }

    fn surface_location(&self) -> Point {
        self.surface.map(|r| r.origin).unwrap_or_default()
    }

    fn is_surface_ready(&self) -> bool {
        self.surface.is_some()
    }

    fn request_surface_focus(&mut self) {
        self.focus_requested = true;
    }
}

impl Drop for FlyThruAnimation {
    fn drop(&mut self) {
        self.stop();
    }
}
