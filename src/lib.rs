//! Rocket Escape - A side-scrolling rocket arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spikes, scoring, power-ups, achievements)
//! - `persistence`: Profile storage port and its adapters
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use persistence::{LifetimeStats, Profile, ProfileStore};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate gravity was tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta a single step will integrate
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical screen dimensions (world units, y grows upward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Rocket sprite box
    pub const ROCKET_WIDTH: f32 = 64.0;
    pub const ROCKET_HEIGHT: f32 = 40.0;

    /// Upper bound on lives (Zen mode sits at the cap)
    pub const MAX_LIVES: u32 = 999;
    /// Number of spike texture variants
    pub const SPIKE_VARIANTS: u8 = 5;
}
