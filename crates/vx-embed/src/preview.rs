//! Rust model of the emitted player's state machine.
//!
//! Mirrors the script in `templates/player.html` event for event, using the
//! same curve function, so player behavior can be checked (and previewed from
//! the CLI) without a browser.

use serde::Serialize;
use vx_common::PlayerConfig;
use vx_math::RetentionCurve;

/// Playback state of the simulated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Muted autoplay behind the click-to-unmute overlay.
    Overlay,
    Playing,
    Paused,
    Ended,
}

/// Snapshot of everything the viewer can see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub state: PlaybackState,
    pub current_time: f64,
    pub progress_percent: f64,
    pub overlay_visible: bool,
    pub pause_icon_visible: bool,
    pub muted: bool,
    pub revealed: bool,
}

/// Event-driven simulation of one embedded player.
#[derive(Debug, Clone)]
pub struct PlayerSimulation {
    curve: RetentionCurve,
    reveal_after: Option<u32>,
    state: PlaybackState,
    muted: bool,
    current_time: f64,
    progress: f64,
    revealed: bool,
}

impl PlayerSimulation {
    /// Start a simulation in the overlay state, as a freshly loaded page.
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            curve: config.retention_curve(),
            reveal_after: config.content_delay(),
            state: PlaybackState::Overlay,
            muted: true,
            current_time: 0.0,
            progress: 0.0,
            revealed: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current progress bar width in percent.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn overlay_visible(&self) -> bool {
        self.state == PlaybackState::Overlay
    }

    pub fn pause_icon_visible(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// Whether delayed content has been revealed.
    pub fn revealed(&self) -> bool {
        self.revealed
    }

    /// First interaction: unmute, restart from zero, play.
    ///
    /// Returns `false` if the overlay was already dismissed.
    pub fn click_overlay(&mut self) -> bool {
        if self.state != PlaybackState::Overlay {
            return false;
        }
        self.muted = false;
        self.current_time = 0.0;
        self.state = PlaybackState::Playing;
        true
    }

    /// Click on the video surface: toggles play/pause after unlock.
    ///
    /// Clicking an ended video plays it again from the start.
    pub fn click_video(&mut self) {
        self.state = match self.state {
            PlaybackState::Overlay => PlaybackState::Overlay,
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Ended => {
                self.current_time = 0.0;
                PlaybackState::Playing
            }
        };
    }

    /// `timeupdate` event. No-op while the duration is unknown.
    ///
    /// Returns the progress percentage after the update.
    pub fn time_update(&mut self, current_time: f64, duration: f64) -> f64 {
        let Some(percent) = self.curve.display_percent_at(current_time, duration) else {
            return self.progress;
        };
        self.current_time = current_time;
        self.progress = percent;

        if let Some(delay) = self.reveal_after {
            if self.state != PlaybackState::Overlay && current_time >= f64::from(delay) {
                self.revealed = true;
            }
        }
        self.progress
    }

    /// `ended` event: progress forced to exactly 100%, pause icon hidden.
    pub fn ended(&mut self) {
        self.progress = 100.0;
        self.state = PlaybackState::Ended;
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            state: self.state,
            current_time: self.current_time,
            progress_percent: self.progress,
            overlay_visible: self.overlay_visible(),
            pause_icon_visible: self.pause_icon_visible(),
            muted: self.muted,
            revealed: self.revealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_overlay_gates_interaction() {
        let mut sim = PlayerSimulation::new(&PlayerConfig::default());
        assert!(sim.overlay_visible());
        assert!(sim.is_muted());

        sim.click_video();
        assert_eq!(sim.state(), PlaybackState::Overlay);

        assert!(sim.click_overlay());
        assert!(!sim.is_muted());
        assert_eq!(sim.state(), PlaybackState::Playing);
        assert!(!sim.click_overlay());
    }

    #[test]
    fn test_pause_toggle_shows_icon() {
        let mut sim = PlayerSimulation::new(&PlayerConfig::default());
        sim.click_overlay();
        sim.click_video();
        assert!(sim.pause_icon_visible());
        sim.click_video();
        assert!(!sim.pause_icon_visible());
        assert_eq!(sim.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_progress_follows_curve() {
        let mut sim = PlayerSimulation::new(&PlayerConfig::default());
        sim.click_overlay();
        assert!(approx_eq(sim.time_update(25.0, 100.0), 50.0));

        let linear = PlayerConfig::new().with_retention_curve_exponent(1.0);
        let mut sim = PlayerSimulation::new(&linear);
        assert!(approx_eq(sim.time_update(25.0, 100.0), 25.0));
    }

    #[test]
    fn test_unknown_duration_is_noop() {
        let mut sim = PlayerSimulation::new(&PlayerConfig::default());
        sim.time_update(10.0, 100.0);
        let before = sim.progress();
        assert_eq!(sim.time_update(50.0, f64::NAN), before);
        assert_eq!(sim.time_update(50.0, 0.0), before);
    }

    #[test]
    fn test_ended_forces_full_bar() {
        let mut sim = PlayerSimulation::new(&PlayerConfig::default());
        sim.click_overlay();
        sim.time_update(99.0, 100.0);
        sim.click_video();
        sim.ended();
        assert_eq!(sim.progress(), 100.0);
        assert!(!sim.pause_icon_visible());

        sim.click_video();
        assert_eq!(sim.state(), PlaybackState::Playing);
        assert_eq!(sim.view().current_time, 0.0);
    }

    #[test]
    fn test_reveal_after_unlock_only() {
        let config = PlayerConfig::new().with_content_delay(Some(30));
        let mut sim = PlayerSimulation::new(&config);

        sim.time_update(45.0, 100.0);
        assert!(!sim.revealed(), "muted autoplay must not reveal");

        sim.click_overlay();
        sim.time_update(29.0, 100.0);
        assert!(!sim.revealed());
        sim.time_update(30.0, 100.0);
        assert!(sim.revealed());
    }

    #[test]
    fn test_no_reveal_when_disabled() {
        let mut sim = PlayerSimulation::new(&PlayerConfig::default());
        sim.click_overlay();
        sim.time_update(1_000.0, 1_000.0);
        assert!(!sim.view().revealed);
    }
}
