//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta, clamped
//! - Seeded RNG only
//! - Fixed system order within a step
//! - No rendering or platform dependencies

pub mod achievement;
pub mod geometry;
pub mod mode;
pub mod obstacle;
pub mod powerup;
pub mod progression;
pub mod rocket;
pub mod state;
pub mod tick;

pub use achievement::{Achievement, Trigger};
pub use geometry::{Rect, Triangle, point_in_triangle, rect_intersects_triangle};
pub use mode::{GameMode, GameModeConfig};
pub use obstacle::{Obstacle, ObstacleField};
pub use powerup::{ActiveEffect, PowerUp, PowerUpKind, PowerUpManager};
pub use progression::{Combo, Progression};
pub use rocket::Rocket;
pub use state::{GameEvent, GamePhase, GameState, RunSession, Snapshot};
pub use tick::{Simulation, TickInput, tick};
