//! Collectible power-ups and their timed effects

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    SlowTime,
    Magnet,
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::SlowTime,
        PowerUpKind::Magnet,
        PowerUpKind::DoublePoints,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::SlowTime => "Slow Time",
            PowerUpKind::Magnet => "Magnet",
            PowerUpKind::DoublePoints => "2x Points",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Invulnerability",
            PowerUpKind::SlowTime => "Slows obstacles",
            PowerUpKind::Magnet => "Attracts coins",
            PowerUpKind::DoublePoints => "Double score",
        }
    }

    /// Effect duration in seconds
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Shield => 5.0,
            PowerUpKind::SlowTime => 8.0,
            PowerUpKind::Magnet => 6.0,
            PowerUpKind::DoublePoints => 10.0,
        }
    }

    /// Tint for the HUD / pickup sprite (RGB, 0-1)
    pub fn color(&self) -> [f32; 3] {
        match self {
            PowerUpKind::Shield => [0.3, 0.5, 1.0],
            PowerUpKind::SlowTime => [1.0, 0.8, 0.3],
            PowerUpKind::Magnet => [1.0, 1.0, 0.3],
            PowerUpKind::DoublePoints => [1.0, 0.84, 0.0],
        }
    }
}

/// A pickup drifting across the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub elapsed_on_screen: f32,
}

/// A collected, running effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining: f32,
}

/// Modifiers the effects impose on the rest of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub speed_multiplier: f32,
    pub score_multiplier: u32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            score_multiplier: 1,
        }
    }
}

/// Spawns pickups and tracks active effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpManager {
    pub pickups: Vec<PowerUp>,
    pub active: Vec<ActiveEffect>,
    pub modifiers: Modifiers,
    pub spawn_timer: f32,
    next_id: u32,
}

impl Default for PowerUpManager {
    fn default() -> Self {
        Self {
            pickups: Vec::new(),
            active: Vec::new(),
            modifiers: Modifiers::default(),
            spawn_timer: 0.0,
            next_id: 1,
        }
    }
}

impl PowerUpManager {
    /// Fixed-interval spawner, independent of difficulty
    pub fn update_spawner(&mut self, tuning: &Tuning, dt: f32, rng: &mut impl Rng) -> bool {
        self.spawn_timer += dt;
        if self.spawn_timer >= tuning.powerup_interval_secs {
            self.spawn_timer = 0.0;
            let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
            let max_y = (tuning.screen_height - tuning.powerup_size).max(0.0);
            let y = if max_y > 0.0 { rng.random_range(0.0..=max_y) } else { 0.0 };
            self.spawn(kind, tuning.screen_width, y, tuning.powerup_size);
            return true;
        }
        false
    }

    pub fn spawn(&mut self, kind: PowerUpKind, x: f32, y: f32, size: f32) {
        let id = self.next_id;
        self.next_id += 1;
        self.pickups.push(PowerUp {
            id,
            kind,
            rect: Rect::new(x, y, size, size),
            elapsed_on_screen: 0.0,
        });
        log::debug!("Spawned {:?} power-up #{} at y={:.1}", kind, id, y);
    }

    /// Scroll pickups and return the kinds the rocket touched, in spawn order
    pub fn advance(&mut self, speed: f32, dt: f32, rocket: &Rect) -> Vec<PowerUpKind> {
        let mut collected = Vec::new();
        for pickup in &mut self.pickups {
            pickup.rect.x -= speed * dt;
            pickup.elapsed_on_screen += dt;
        }
        self.pickups.retain(|p| {
            if p.rect.overlaps(rocket) {
                collected.push(p.kind);
                false
            } else {
                p.rect.right() >= 0.0
            }
        });
        collected
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active.iter().any(|e| e.kind == kind)
    }

    pub fn remaining(&self, kind: PowerUpKind) -> Option<f32> {
        self.active.iter().find(|e| e.kind == kind).map(|e| e.remaining)
    }

    /// Start (or restart) an effect at full duration
    ///
    /// Shield invulnerability is granted by the caller since it lives on the rocket.
    pub fn activate(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        self.active.retain(|e| e.kind != kind);
        self.active.push(ActiveEffect {
            kind,
            remaining: kind.duration(),
        });
        self.apply(kind, tuning);
    }

    /// Count every effect down, reverting the ones that run out
    pub fn tick_effects(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for effect in &mut self.active {
            effect.remaining -= dt;
            if effect.remaining <= 0.0 {
                expired.push(effect.kind);
            }
        }
        self.active.retain(|e| e.remaining > 0.0);
        for &kind in &expired {
            self.revert(kind);
        }
        expired
    }

    fn apply(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        match kind {
            PowerUpKind::SlowTime => self.modifiers.speed_multiplier = tuning.slow_time_multiplier,
            PowerUpKind::DoublePoints => {
                self.modifiers.score_multiplier = tuning.double_points_multiplier
            }
            // Shield is applied to the rocket; Magnet has no gameplay effect yet
            PowerUpKind::Shield | PowerUpKind::Magnet => {}
        }
    }

    fn revert(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::SlowTime => self.modifiers.speed_multiplier = 1.0,
            PowerUpKind::DoublePoints => self.modifiers.score_multiplier = 1,
            PowerUpKind::Shield | PowerUpKind::Magnet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_collect_refreshes_instead_of_stacking() {
        let tuning = Tuning::default();
        let mut manager = PowerUpManager::default();
        manager.activate(PowerUpKind::SlowTime, &tuning);
        manager.tick_effects(3.0);
        assert_eq!(manager.remaining(PowerUpKind::SlowTime), Some(5.0));

        manager.activate(PowerUpKind::SlowTime, &tuning);
        assert_eq!(manager.active.len(), 1);
        assert_eq!(manager.remaining(PowerUpKind::SlowTime), Some(8.0));
    }

    #[test]
    fn test_effects_apply_and_revert() {
        let tuning = Tuning::default();
        let mut manager = PowerUpManager::default();
        manager.activate(PowerUpKind::SlowTime, &tuning);
        manager.activate(PowerUpKind::DoublePoints, &tuning);
        assert_eq!(manager.modifiers.speed_multiplier, 0.5);
        assert_eq!(manager.modifiers.score_multiplier, 2);

        let expired = manager.tick_effects(8.0);
        assert_eq!(expired, vec![PowerUpKind::SlowTime]);
        assert_eq!(manager.modifiers.speed_multiplier, 1.0);
        assert_eq!(manager.modifiers.score_multiplier, 2);

        manager.tick_effects(2.0);
        assert_eq!(manager.modifiers, Modifiers::default());
        assert!(manager.active.is_empty());
    }

    #[test]
    fn test_magnet_is_tracked_without_modifiers() {
        let tuning = Tuning::default();
        let mut manager = PowerUpManager::default();
        manager.activate(PowerUpKind::Magnet, &tuning);
        assert!(manager.is_active(PowerUpKind::Magnet));
        assert_eq!(manager.modifiers, Modifiers::default());
    }

    #[test]
    fn test_pickup_collected_on_overlap() {
        let mut manager = PowerUpManager::default();
        manager.spawn(PowerUpKind::Shield, 300.0, 200.0, 40.0);
        manager.spawn(PowerUpKind::Magnet, 700.0, 0.0, 40.0);
        let rocket = Rect::new(200.0, 200.0, 64.0, 40.0);

        let collected = manager.advance(200.0, 0.25, &rocket);
        assert_eq!(collected, vec![PowerUpKind::Shield]);
        assert_eq!(manager.pickups.len(), 1);
        assert!((manager.pickups[0].elapsed_on_screen - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_pickup_retired_offscreen() {
        let mut manager = PowerUpManager::default();
        manager.spawn(PowerUpKind::Shield, 10.0, 400.0, 40.0);
        let rocket = Rect::new(200.0, 0.0, 64.0, 40.0);
        assert!(manager.advance(200.0, 1.0, &rocket).is_empty());
        assert!(manager.pickups.is_empty());
    }

    #[test]
    fn test_fixed_interval_spawner() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut manager = PowerUpManager::default();
        assert!(!manager.update_spawner(&tuning, 9.0, &mut rng));
        assert!(manager.update_spawner(&tuning, 1.0, &mut rng));
        let pickup = &manager.pickups[0];
        assert_eq!(pickup.rect.x, tuning.screen_width);
        assert!(pickup.rect.y >= 0.0 && pickup.rect.top() <= tuning.screen_height);
    }
}
