use std::sync::Arc;
use tracing::debug;

use crate::render_config::RenderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// Affordance shown on the play button: what pressing it will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackIcon {
    Play,
    Pause,
}

/// Play/pause toggle mirrored into the render configuration's pause flag
pub struct PlaybackToggle {
    state: PlaybackState,
    config: Arc<RenderConfig>,
}

impl PlaybackToggle {
    pub fn new(config: Arc<RenderConfig>) -> Self {
        let state = if config.paused() {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        };
        Self { state, config }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn icon(&self) -> PlaybackIcon {
        match self.state {
            PlaybackState::Playing => PlaybackIcon::Pause,
            PlaybackState::Paused => PlaybackIcon::Play,
        }
    }

    /// Flip between playing and paused
    pub fn toggle(&mut self) -> PlaybackState {
        let next = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
        };
        self.set(next);
        next
    }

    /// Force playing regardless of the current state
    pub fn start(&mut self) {
        self.set(PlaybackState::Playing);
    }

    // The pause flag is a single atomic store, so the animation sees either
    // the old state or the new one.
    fn set(&mut self, state: PlaybackState) {
        self.state = state;
        self.config.set_paused(state == PlaybackState::Paused);
        debug!(?state, "Playback state changed");
    }
}
