//! Fly-through animation control panel
//!
//! Ties the control bindings, playback toggle, visibility state machine and
//! state persistence together. Everything here runs on the UI thread; the
//! animation only ever sees the shared [`RenderConfig`].

pub mod binding;
pub mod deferred;
pub mod host;
pub mod persisted;
pub mod playback;
pub mod visibility;

pub use binding::{ControlBindings, ControlId, ControlValue};
pub use deferred::{UiTask, UiTaskQueue};
pub use host::{AnimationHost, DropIcon, PanelWindow};
pub use persisted::{ControlStateStore, JsonFileStore};
pub use playback::{PlaybackIcon, PlaybackState, PlaybackToggle};
pub use visibility::{PanelVisibility, PanelVisibilityController};

use std::sync::Arc;
use tracing::{debug, info};

use crate::render_config::RenderConfig;

pub struct FlyThruControls {
    bindings: ControlBindings,
    playback: PlaybackToggle,
    visibility: PanelVisibilityController,
    store: Box<dyn ControlStateStore>,
    tasks: UiTaskQueue,
    /// Set once a hide has saved the controls; the next show reloads them
    restore_on_show: bool,
    /// The queued first show should also start the animation
    start_after_first_show: bool,
}

impl FlyThruControls {
    pub fn new(config: Arc<RenderConfig>, store: Box<dyn ControlStateStore>) -> Self {
        Self {
            bindings: ControlBindings::standard(Arc::clone(&config)),
            playback: PlaybackToggle::new(config),
            visibility: PanelVisibilityController::new(),
            store,
            tasks: UiTaskQueue::new(),
            restore_on_show: false,
            start_after_first_show: false,
        }
    }

    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    pub fn playback(&self) -> &PlaybackToggle {
        &self.playback
    }

    pub fn visibility(&self) -> &PanelVisibilityController {
        &self.visibility
    }

    /// Whether the panel will be shown the next time the animation starts
    pub fn visible_state(&self) -> bool {
        self.visibility.visible_state()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// User changed a control
    pub fn set_control(&mut self, id: ControlId, value: ControlValue) -> bool {
        self.bindings.set(id, value)
    }

    pub fn toggle_playback(&mut self) -> PlaybackState {
        self.playback.toggle()
    }

    /// Forwarded to the animation; playback state is untouched
    pub fn reset(&mut self, animation: &mut dyn AnimationHost) {
        info!("Resetting animation");
        animation.reset();
    }

    pub fn toggle_drop(&mut self, window: &mut dyn PanelWindow) -> Option<PanelVisibility> {
        self.visibility.toggle_drop(window)
    }

    pub fn save_state(&self) {
        persisted::save(self.store.as_ref(), &self.bindings);
    }

    pub fn restore_state(&mut self) {
        persisted::restore(self.store.as_ref(), &mut self.bindings);
    }

    /// Start (or restart) the animation, showing the panel if it was visible
    /// last time. The first show is deferred to [`Self::run_pending`] so it
    /// happens after the rendering surface is set up; later shows are immediate.
    pub fn start_animation(&mut self, animation: &mut dyn AnimationHost, window: &mut dyn PanelWindow) {
        self.playback.start();

        if !self.visibility.visible_state() {
            info!("Starting animation with controls hidden");
            animation.start();
            animation.request_surface_focus();
            return;
        }

        if self.visibility.schedule_first_show() {
            info!("Deferring control panel setup until the rendering surface is ready");
            self.start_after_first_show = true;
            self.tasks.push(UiTask::FirstShow);
            return;
        }

        if !self.visibility.is_initialized() {
            // The queued first show will start the animation
            debug!("First show already pending");
            self.start_after_first_show = true;
            return;
        }

        self.restore_if_saved();
        self.visibility.show(window);
        animation.start();
        animation.request_surface_focus();
    }

    fn restore_if_saved(&mut self) {
        if std::mem::take(&mut self.restore_on_show) {
            self.restore_state();
        } else {
            debug!("Controls still live since last show, skipping restore");
        }
    }

    /// Run deferred UI work. Called once per UI pass by the host.
    /// Returns the number of tasks completed.
    pub fn run_pending(&mut self, animation: &mut dyn AnimationHost, window: &mut dyn PanelWindow) -> usize {
        if self.tasks.is_empty() {
            return 0;
        }

        let mut completed = 0;
        while let Some(task) = self.tasks.pop() {
            match task {
                UiTask::FirstShow => {
                    if !animation.is_surface_ready() {
                        self.tasks.defer(task);
                        break;
                    }
                    self.visibility.complete_first_show(window, animation.surface_location());
                    self.restore_state();
                    self.restore_on_show = false;
                    if self.visibility.visible_state() {
                        self.visibility.show(window);
                    }
                    if std::mem::take(&mut self.start_after_first_show) {
                        info!("Control panel ready, starting animation");
                        animation.start();
                        animation.request_surface_focus();
                    } else {
                        info!("Control panel ready");
                    }
                }
            }
            completed += 1;
        }
        completed
    }

    /// Save control state and hide the panel, remembering whether it was
    /// showing so the next start can bring it back.
    pub fn save_visibility_and_hide(&mut self, window: &mut dyn PanelWindow) {
        // Controls haven't been restored yet; saving now would clobber the stored state
        if self.visibility.is_initialized() {
            self.save_state();
            self.restore_on_show = true;
        } else {
            debug!("Skipping control state save before first show");
        }
        self.visibility.hide(window);
    }

    /// Explicit request to bring a hidden panel back
    pub fn show_panel(&mut self, animation: &mut dyn AnimationHost, window: &mut dyn PanelWindow) {
        self.visibility.set_visible_state(true);
        if !self.visibility.is_initialized() {
            if self.visibility.schedule_first_show() {
                self.tasks.push(UiTask::FirstShow);
            }
            return;
        }
        if self.visibility.visibility() == PanelVisibility::Hidden {
            self.restore_if_saved();
            self.visibility.show(window);
            animation.request_surface_focus();
        }
    }

    /// The dialog's own close button was used. Nothing is saved and the
    /// controls keep their live values for the next show.
    pub fn panel_closed(&mut self, window: &mut dyn PanelWindow) {
        window.set_visible(false);
        self.visibility.closed_by_user();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage;
    use crate::geometry::{Point, Size};
    use crate::render_config::RenderFlag;
    use super::persisted::tests::MemoryStore;
    use super::persisted::PersistedControlState;
    use std::cell::Cell;
    use std::rc::Rc;

    const SECTION_HEIGHT: i32 = 140;
    const FULL_SIZE: Size = Size { width: 320, height: 200 };

    struct MockWindow {
        location: Point,
        size: Size,
        section_visible: bool,
        drop_icon: DropIcon,
        visible: bool,
        measure_calls: Cell<u32>,
    }

    impl MockWindow {
        fn new() -> Self {
            Self {
                location: Point::new(0, 0),
                size: FULL_SIZE,
                section_visible: true,
                drop_icon: DropIcon::Undrop,
                visible: false,
                measure_calls: Cell::new(0),
            }
        }
    }

    impl PanelWindow for MockWindow {
        fn location(&self) -> Point {
            self.location
        }
        fn set_location(&mut self, location: Point) {
            self.location = location;
        }
        fn size(&self) -> Size {
            self.size
        }
        fn set_size(&mut self, size: Size) {
            self.size = size;
        }
        fn expandable_section_height(&self) -> i32 {
            self.measure_calls.set(self.measure_calls.get() + 1);
            SECTION_HEIGHT
        }
        fn set_section_visible(&mut self, visible: bool) {
            self.section_visible = visible;
        }
        fn set_drop_icon(&mut self, icon: DropIcon) {
            self.drop_icon = icon;
        }
        fn is_visible(&self) -> bool {
            self.visible
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    struct MockAnimation {
        config: Arc<RenderConfig>,
        ready: bool,
        surface: Point,
        starts: u32,
        resets: u32,
        focus_requests: u32,
    }

    impl MockAnimation {
        fn new(config: Arc<RenderConfig>) -> Self {
            Self {
                config,
                ready: false,
                surface: Point::new(40, 60),
                starts: 0,
                resets: 0,
                focus_requests: 0,
            }
        }
    }

    impl AnimationHost for MockAnimation {
        fn config(&self) -> &Arc<RenderConfig> {
            &self.config
        }
        fn start(&mut self) {
            self.starts += 1;
        }
        fn reset(&mut self) {
            self.resets += 1;
        }
        fn surface_location(&self) -> Point {
            self.surface
        }
        fn is_surface_ready(&self) -> bool {
            self.ready
        }
        fn request_surface_focus(&mut self) {
            self.focus_requests += 1;
        }
    }

    /// Store handle shared between the controls under test and the assertions
    #[derive(Clone, Default)]
    struct SharedStore(Rc<MemoryStore>);

    impl ControlStateStore for SharedStore {
        fn load(&self, key: &str) -> anyhow::Result<Option<PersistedControlState>> {
            self.0.load(key)
        }
        fn store(&self, key: &str, state: &PersistedControlState) -> anyhow::Result<()> {
            self.0.store(key, state)
        }
    }

    fn setup(can_show_shadows: bool) -> (FlyThruControls, MockAnimation, MockWindow, SharedStore) {
        let config = Arc::new(RenderConfig::new(can_show_shadows));
        let store = SharedStore::default();
        let controls = FlyThruControls::new(Arc::clone(&config), Box::new(store.clone()));
        (controls, MockAnimation::new(config), MockWindow::new(), store)
    }

    /// Start and complete the deferred first show
    fn shown(can_show_shadows: bool) -> (FlyThruControls, MockAnimation, MockWindow, SharedStore) {
        let (mut controls, mut animation, mut window, store) = setup(can_show_shadows);
        animation.ready = true;
        controls.start_animation(&mut animation, &mut window);
        controls.run_pending(&mut animation, &mut window);
        (controls, animation, window, store)
    }

    #[test]
    fn test_first_show_waits_for_surface() {
        let (mut controls, mut animation, mut window, _store) = setup(true);

        controls.start_animation(&mut animation, &mut window);
        assert_eq!(controls.pending_tasks(), 1);
        assert!(!window.visible);
        assert_eq!(animation.starts, 0);

        // Surface not ready: the task stays queued and nothing is positioned
        assert_eq!(controls.run_pending(&mut animation, &mut window), 0);
        assert_eq!(controls.pending_tasks(), 1);
        assert_eq!(window.measure_calls.get(), 0);
        assert!(!controls.visibility().is_initialized());

        animation.ready = true;
        assert_eq!(controls.run_pending(&mut animation, &mut window), 1);
        assert_eq!(controls.pending_tasks(), 0);
        assert!(window.visible);
        assert_eq!(animation.starts, 1);
        assert_eq!(animation.focus_requests, 1);
    }

    #[test]
    fn test_first_show_positions_and_collapses() {
        let (controls, _animation, window, _store) = shown(true);

        assert!(controls.visibility().is_initialized());
        assert_eq!(controls.visibility().collapsed_height_delta(), Some(SECTION_HEIGHT));
        assert_eq!(controls.visibility().visibility(), PanelVisibility::ShownCollapsed);
        assert_eq!(window.location, Point::new(40, 60));
        assert_eq!(window.size, FULL_SIZE.with_height_delta(-SECTION_HEIGHT));
        assert!(!window.section_visible);
        assert_eq!(window.drop_icon, DropIcon::Drop);
        assert_eq!(window.measure_calls.get(), 1);
    }

    #[test]
    fn test_second_show_skips_positioning() {
        let (mut controls, mut animation, mut window, _store) = shown(true);
        window.location = Point::new(500, 500);

        controls.save_visibility_and_hide(&mut window);
        assert!(!window.visible);
        assert_eq!(controls.visibility().visibility(), PanelVisibility::Hidden);

        controls.start_animation(&mut animation, &mut window);
        assert_eq!(controls.pending_tasks(), 0);
        assert!(window.visible);
        assert_eq!(animation.starts, 2);
        assert_eq!(window.measure_calls.get(), 1);
        assert_eq!(window.location, Point::new(500, 500));
        assert_eq!(controls.visibility().collapsed_height_delta(), Some(SECTION_HEIGHT));
    }

    #[test]
    fn test_repeated_start_before_ready_queues_once() {
        let (mut controls, mut animation, mut window, _store) = setup(true);
        controls.start_animation(&mut animation, &mut window);
        controls.start_animation(&mut animation, &mut window);
        assert_eq!(controls.pending_tasks(), 1);

        animation.ready = true;
        controls.run_pending(&mut animation, &mut window);
        assert_eq!(animation.starts, 1);
        assert_eq!(window.measure_calls.get(), 1);
    }

    #[test]
    fn test_toggle_drop_twice_is_identity() {
        let (mut controls, _animation, mut window, _store) = shown(true);
        let size = window.size;
        let location = window.location;

        assert_eq!(controls.toggle_drop(&mut window), Some(PanelVisibility::ShownExpanded));
        assert_eq!(window.size.height, size.height + SECTION_HEIGHT);
        assert_eq!(window.size.width, size.width);
        assert!(window.section_visible);
        assert_eq!(window.drop_icon, DropIcon::Undrop);
        assert_eq!(window.location, location);

        assert_eq!(controls.toggle_drop(&mut window), Some(PanelVisibility::ShownCollapsed));
        assert_eq!(window.size, size);
        assert!(!window.section_visible);
        assert_eq!(window.drop_icon, DropIcon::Drop);
        assert_eq!(window.location, location);
    }

    #[test]
    fn test_toggle_drop_ignored_before_first_show() {
        let (mut controls, _animation, mut window, _store) = setup(true);
        assert_eq!(controls.toggle_drop(&mut window), None);
        assert_eq!(window.size, FULL_SIZE);
    }

    #[test]
    fn test_expanded_state_survives_hide() {
        let (mut controls, mut animation, mut window, _store) = shown(true);
        controls.toggle_drop(&mut window);
        controls.save_visibility_and_hide(&mut window);

        controls.start_animation(&mut animation, &mut window);
        assert_eq!(controls.visibility().visibility(), PanelVisibility::ShownExpanded);
    }

    #[test]
    fn test_hide_saves_control_state() {
        let (mut controls, _animation, mut window, store) = shown(true);
        controls.set_control(ControlId::Speed, ControlValue::Int(25));
        controls.set_control(ControlId::Sky, ControlValue::Bool(false));

        controls.save_visibility_and_hide(&mut window);

        let records = store.0.records.borrow();
        let saved = records.get(storage::CONTROLS_STATE_KEY).unwrap();
        assert_eq!(saved.get("speed"), Some(ControlValue::Int(25)));
        assert_eq!(saved.get("sky"), Some(ControlValue::Bool(false)));
    }

    #[test]
    fn test_first_show_restores_saved_state() {
        let (mut controls, mut animation, mut window, store) = setup(true);
        let mut saved = PersistedControlState::new();
        saved.insert("erosion", ControlValue::Bool(true));
        saved.insert("brightness", ControlValue::Int(100));
        store
            .0
            .records
            .borrow_mut()
            .insert(storage::CONTROLS_STATE_KEY.to_string(), saved);

        animation.ready = true;
        controls.start_animation(&mut animation, &mut window);
        controls.run_pending(&mut animation, &mut window);

        assert!(controls.bindings().checked(ControlId::Erosion));
        assert!(animation.config.flag(RenderFlag::Erosion));
        assert!((animation.config.light_brightness()[0] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_hide_before_first_show_keeps_stored_state() {
        let (mut controls, mut animation, mut window, store) = setup(true);
        let mut saved = PersistedControlState::new();
        saved.insert("truck", ControlValue::Bool(false));
        store
            .0
            .records
            .borrow_mut()
            .insert(storage::CONTROLS_STATE_KEY.to_string(), saved.clone());

        controls.start_animation(&mut animation, &mut window);
        controls.save_visibility_and_hide(&mut window);

        assert_eq!(store.0.records.borrow().get(storage::CONTROLS_STATE_KEY), Some(&saved));
        assert!(!controls.visible_state());

        // The queued setup still runs once, but the panel stays hidden
        animation.ready = true;
        controls.run_pending(&mut animation, &mut window);
        assert!(controls.visibility().is_initialized());
        assert!(!window.visible);
        assert_eq!(animation.starts, 1);
    }

    #[test]
    fn test_user_closed_panel_stays_hidden_on_restart() {
        let (mut controls, mut animation, mut window, _store) = shown(true);

        controls.panel_closed(&mut window);
        controls.save_visibility_and_hide(&mut window);
        assert!(!controls.visible_state());

        controls.start_animation(&mut animation, &mut window);
        assert!(!window.visible);
        assert_eq!(animation.starts, 2);
        assert_eq!(controls.visibility().visibility(), PanelVisibility::Hidden);
    }

    #[test]
    fn test_show_panel_brings_back_closed_panel() {
        let (mut controls, mut animation, mut window, _store) = shown(true);
        controls.panel_closed(&mut window);

        controls.show_panel(&mut animation, &mut window);
        assert!(window.visible);
        assert!(controls.visible_state());
        assert_eq!(controls.visibility().visibility(), PanelVisibility::ShownCollapsed);
    }

    #[test]
    fn test_start_forces_playing() {
        let (mut controls, mut animation, mut window, _store) = shown(true);
        controls.toggle_playback();
        assert!(animation.config.paused());

        controls.save_visibility_and_hide(&mut window);
        controls.start_animation(&mut animation, &mut window);
        assert_eq!(controls.playback().state(), PlaybackState::Playing);
        assert!(!animation.config.paused());
    }

    #[test]
    fn test_reset_is_pass_through() {
        let (mut controls, mut animation, _window, _store) = shown(true);
        controls.toggle_playback();

        controls.reset(&mut animation);
        assert_eq!(animation.resets, 1);
        assert_eq!(controls.playback().state(), PlaybackState::Paused);
    }

    #[test]
    fn test_shadows_unsupported_after_show() {
        let (controls, animation, _window, _store) = shown(false);
        assert!(!controls.bindings().is_enabled(ControlId::Shadows));
        assert!(!controls.bindings().checked(ControlId::Shadows));
        assert!(!animation.config.flag(RenderFlag::Shadows));
    }

    #[test]
    fn test_controls_and_config_agree_after_show() {
        let (controls, animation, _window, _store) = shown(true);
        let snap = animation.config.snapshot();
        let b = controls.bindings();

        assert_eq!(snap.show_sky, b.checked(ControlId::Sky));
        assert_eq!(snap.show_terrain, b.checked(ControlId::Terrain));
        assert_eq!(snap.show_forces_as_colors, b.checked(ControlId::ForcesAsColors));
        assert_eq!(snap.show_abutments, b.checked(ControlId::Abutments));
        assert_eq!(snap.show_truck, b.checked(ControlId::Truck));
        assert_eq!(snap.show_erosion, b.checked(ControlId::Erosion));
        assert_eq!(snap.show_shadows, b.checked(ControlId::Shadows));
        assert_eq!(snap.truck_speed, b.slider(ControlId::Speed));
        assert_eq!(
            snap.light_brightness[0],
            super::binding::brightness_for(b.slider(ControlId::Brightness))
        );
    }

    #[test]
    fn test_closed_panel_keeps_live_changes_on_show() {
        let (mut controls, mut animation, mut window, _store) = shown(true);
        controls.save_visibility_and_hide(&mut window);
        controls.start_animation(&mut animation, &mut window);

        controls.set_control(ControlId::Speed, ControlValue::Int(10));
        controls.panel_closed(&mut window);
        controls.show_panel(&mut animation, &mut window);

        assert!(window.visible);
        assert_eq!(controls.bindings().slider(ControlId::Speed), 10);
        assert_eq!(animation.config.truck_speed(), 10);
    }

    #[test]
    fn test_show_after_hide_reloads_stored_state() {
        let (mut controls, mut animation, mut window, store) = shown(true);
        controls.save_visibility_and_hide(&mut window);

        // Stored record changed while the panel was hidden
        let mut saved = PersistedControlState::new();
        saved.insert("speed", ControlValue::Int(15));
        store
            .0
            .records
            .borrow_mut()
            .insert(storage::CONTROLS_STATE_KEY.to_string(), saved);

        controls.show_panel(&mut animation, &mut window);
        assert_eq!(controls.bindings().slider(ControlId::Speed), 15);
        assert_eq!(animation.config.truck_speed(), 15);
    }

    #[test]
    fn test_show_panel_before_start_does_not_start_animation() {
        let (mut controls, mut animation, mut window, _store) = setup(true);
        controls.show_panel(&mut animation, &mut window);
        assert_eq!(controls.pending_tasks(), 1);

        animation.ready = true;
        controls.run_pending(&mut animation, &mut window);
        assert!(window.visible);
        assert!(controls.visibility().is_initialized());
        assert_eq!(animation.starts, 0);
        assert_eq!(animation.focus_requests, 0);
    }

    #[test]
    fn test_start_while_show_pending_starts_once_ready() {
        let (mut controls, mut animation, mut window, _store) = setup(true);
        controls.show_panel(&mut animation, &mut window);
        controls.start_animation(&mut animation, &mut window);
        assert_eq!(controls.pending_tasks(), 1);
        assert_eq!(animation.starts, 0);

        animation.ready = true;
        controls.run_pending(&mut animation, &mut window);
        assert_eq!(animation.starts, 1);
        assert_eq!(animation.focus_requests, 1);
    }
}
