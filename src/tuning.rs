//! Data-driven game balance
//!
//! Every number the simulation was tuned against lives here so a balance pass
//! can be done from a JSON file without touching code.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Rocket ===
    pub rocket_width: f32,
    pub rocket_height: f32,
    /// Added to velocity once per step (not scaled by dt)
    pub gravity: f32,
    /// Velocity assigned on flap
    pub flap_impulse: f32,
    /// Invulnerability granted after losing a life
    pub damage_invulnerability_secs: f32,
    /// Duration of each of the READY and GO banners
    pub phase_banner_secs: f32,

    // === Spikes ===
    /// Spike width as a fraction of screen width
    pub spike_width_ratio: f32,
    /// Vertical gap as a fraction of screen height
    pub spike_gap_ratio: f32,
    /// Distance kept between the gap and the screen edges
    pub spike_gap_margin: f32,
    pub spike_base_speed: f32,
    pub min_spike_delay: f32,
    pub max_spike_delay: f32,
    /// Floors applied after dividing the delays by difficulty
    pub min_spike_delay_floor: f32,
    pub max_spike_delay_floor: f32,

    // === Combo ===
    pub combo_timeout: f32,
    pub combo_expiring_threshold: f32,
    pub combo_threshold: u32,
    pub combo_bonus_multiplier: u32,
    pub max_combo: u32,

    // === Difficulty ===
    pub difficulty_rate: f32,
    pub max_difficulty: f32,

    // === Power-ups ===
    pub powerup_interval_secs: f32,
    pub powerup_size: f32,
    pub slow_time_multiplier: f32,
    pub double_points_multiplier: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            rocket_width: ROCKET_WIDTH,
            rocket_height: ROCKET_HEIGHT,
            gravity: -15.0,
            flap_impulse: 500.0,
            damage_invulnerability_secs: 2.0,
            phase_banner_secs: 1.0,

            spike_width_ratio: 0.08,
            spike_gap_ratio: 0.25,
            spike_gap_margin: 100.0,
            spike_base_speed: 200.0,
            min_spike_delay: 2.0,
            max_spike_delay: 4.5,
            min_spike_delay_floor: 1.0,
            max_spike_delay_floor: 1.5,

            combo_timeout: 5.0,
            combo_expiring_threshold: 1.5,
            combo_threshold: 3,
            combo_bonus_multiplier: 2,
            max_combo: 999,

            difficulty_rate: 0.01,
            max_difficulty: 3.0,

            powerup_interval_secs: 10.0,
            powerup_size: 40.0,
            slow_time_multiplier: 0.5,
            double_points_multiplier: 2,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning file; missing keys keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn spike_width(&self) -> f32 {
        self.screen_width * self.spike_width_ratio
    }

    pub fn spike_gap(&self) -> f32 {
        self.screen_height * self.spike_gap_ratio
    }

    /// Horizontal position of the rocket's left edge
    pub fn rocket_x(&self) -> f32 {
        self.screen_width / 4.0
    }

    /// Highest valid rocket y (bottom edge)
    pub fn rocket_ceiling(&self) -> f32 {
        (self.screen_height - self.rocket_height).max(0.0)
    }
}
