//! Rocket vertical physics, lives and invulnerability

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::MAX_LIVES;
use crate::tuning::Tuning;

/// Outcome of a hit that got past invulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Collision ignored (invulnerable)
    Ignored,
    /// Lost a life, still flying
    Damaged { lives_left: u32 },
    /// Last life gone
    Destroyed,
}

/// The player's rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    /// Left edge (fixed for the whole run)
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub lives: u32,
    /// Seconds of collision immunity left
    pub invulnerability: f32,
}

impl Rocket {
    /// Rocket centred vertically at its launch column
    pub fn new(tuning: &Tuning, lives: u32) -> Self {
        Self {
            x: tuning.rocket_x(),
            y: tuning.screen_height / 2.0,
            width: tuning.rocket_width,
            height: tuning.rocket_height,
            velocity: 0.0,
            lives: lives.min(MAX_LIVES),
            invulnerability: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }

    /// Upward impulse; replaces the current velocity
    pub fn flap(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// One physics step. Gravity is a per-step delta, position is integrated with dt.
    pub fn integrate(&mut self, gravity: f32, ceiling: f32, dt: f32) {
        self.velocity += gravity;
        self.y += self.velocity * dt;

        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        } else if self.y > ceiling {
            self.y = ceiling;
            self.velocity = 0.0;
        }

        if self.invulnerability > 0.0 {
            self.invulnerability = (self.invulnerability - dt).max(0.0);
        }
    }

    /// Grant immunity for at least `secs` (never shortens an existing window)
    pub fn grant_invulnerability(&mut self, secs: f32) {
        self.invulnerability = self.invulnerability.max(secs);
    }

    /// Apply a spike hit
    pub fn take_hit(&mut self, invulnerability_secs: f32) -> HitOutcome {
        if self.is_invulnerable() {
            return HitOutcome::Ignored;
        }

        debug_assert!(self.lives > 0, "hit registered on a rocket with no lives");
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            HitOutcome::Destroyed
        } else {
            self.invulnerability = invulnerability_secs;
            HitOutcome::Damaged {
                lives_left: self.lives,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_gravity_is_per_step() {
        let tuning = Tuning::default();
        let mut rocket = Rocket::new(&tuning, 3);
        rocket.integrate(tuning.gravity, tuning.rocket_ceiling(), DT);
        assert_eq!(rocket.velocity, -15.0);
        // Same velocity delta regardless of dt
        rocket.integrate(tuning.gravity, tuning.rocket_ceiling(), DT * 2.0);
        assert_eq!(rocket.velocity, -30.0);
    }

    #[test]
    fn test_flap_assigns_velocity() {
        let tuning = Tuning::default();
        let mut rocket = Rocket::new(&tuning, 3);
        rocket.velocity = -300.0;
        rocket.flap(tuning.flap_impulse);
        assert_eq!(rocket.velocity, 500.0);
        rocket.flap(tuning.flap_impulse);
        assert_eq!(rocket.velocity, 500.0);
    }

    #[test]
    fn test_floor_and_ceiling_clamp_without_bounce() {
        let tuning = Tuning::default();
        let mut rocket = Rocket::new(&tuning, 3);
        rocket.y = 1.0;
        rocket.velocity = -600.0;
        rocket.integrate(tuning.gravity, tuning.rocket_ceiling(), DT);
        assert_eq!(rocket.y, 0.0);
        assert_eq!(rocket.velocity, 0.0);

        rocket.y = tuning.rocket_ceiling() - 1.0;
        rocket.flap(tuning.flap_impulse);
        rocket.integrate(tuning.gravity, tuning.rocket_ceiling(), DT);
        assert_eq!(rocket.y, tuning.rocket_ceiling());
        assert_eq!(rocket.velocity, 0.0);
    }

    #[test]
    fn test_hit_grants_invulnerability_then_ignores() {
        let mut rocket = Rocket::new(&Tuning::default(), 3);
        assert_eq!(rocket.take_hit(2.0), HitOutcome::Damaged { lives_left: 2 });
        assert!(rocket.is_invulnerable());
        assert_eq!(rocket.take_hit(2.0), HitOutcome::Ignored);
        assert_eq!(rocket.lives, 2);
    }

    #[test]
    fn test_last_life_destroys_without_invulnerability() {
        let mut rocket = Rocket::new(&Tuning::default(), 1);
        assert_eq!(rocket.take_hit(2.0), HitOutcome::Destroyed);
        assert_eq!(rocket.lives, 0);
        assert_eq!(rocket.invulnerability, 0.0);
    }

    #[test]
    fn test_invulnerability_decays() {
        let tuning = Tuning::default();
        let mut rocket = Rocket::new(&tuning, 3);
        rocket.grant_invulnerability(0.05);
        for _ in 0..4 {
            rocket.integrate(tuning.gravity, tuning.rocket_ceiling(), DT);
        }
        assert_eq!(rocket.invulnerability, 0.0);
    }

    #[test]
    fn test_lives_capped() {
        let rocket = Rocket::new(&Tuning::default(), 5000);
        assert_eq!(rocket.lives, MAX_LIVES);
    }
}
