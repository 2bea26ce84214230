//! Spike obstacles: paired spawning, scrolling, scoring trigger, retirement

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Triangle, rect_intersects_triangle};
use crate::consts::SPIKE_VARIANTS;
use crate::tuning::Tuning;

/// One spike (half of a top/bottom pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub is_top: bool,
    /// Cosmetic sprite index, shared by both halves of a pair
    pub texture_variant: u8,
    /// Bottom spikes only: set once the rocket has passed it
    pub scored: bool,
    /// Hitbox, kept in sync with `rect`
    pub triangle: Triangle,
}

impl Obstacle {
    pub fn new(id: u32, rect: Rect, is_top: bool, texture_variant: u8) -> Self {
        Self {
            id,
            rect,
            is_top,
            texture_variant,
            scored: false,
            triangle: Triangle::spike(&rect, is_top),
        }
    }

    /// Scroll left and rebuild the hitbox
    pub fn advance(&mut self, dx: f32) {
        self.rect.x -= dx;
        self.triangle = Triangle::spike(&self.rect, self.is_top);
    }

    pub fn center_x(&self) -> f32 {
        self.rect.x + self.rect.w / 2.0
    }

    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < 0.0
    }

    /// Edge-triggered pass check; true exactly once per bottom spike
    pub fn try_score(&mut self, rocket_center_x: f32) -> bool {
        if self.is_top || self.scored {
            return false;
        }
        if rocket_center_x > self.center_x() {
            self.scored = true;
            return true;
        }
        false
    }
}

/// Spawning cadence and the live spike list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    pub spike_timer: f32,
    pub next_spike_delay: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(tuning: &Tuning, difficulty: f32, rng: &mut impl Rng) -> Self {
        Self {
            obstacles: Vec::new(),
            spike_timer: 0.0,
            next_spike_delay: spike_delay(tuning, difficulty, rng),
            next_id: 1,
        }
    }

    /// Advance the spawn timer, spawning a pair when it elapses
    pub fn update_spawner(
        &mut self,
        tuning: &Tuning,
        difficulty: f32,
        dt: f32,
        rng: &mut impl Rng,
    ) -> bool {
        self.spike_timer += dt;
        if self.spike_timer > self.next_spike_delay {
            self.spawn_pair(tuning, rng);
            self.spike_timer = 0.0;
            self.next_spike_delay = spike_delay(tuning, difficulty, rng);
            return true;
        }
        false
    }

    /// Spawn a top/bottom pair just past the right edge around one random gap
    pub fn spawn_pair(&mut self, tuning: &Tuning, rng: &mut impl Rng) {
        let height = tuning.screen_height;
        let gap = tuning.spike_gap().clamp(0.0, height);
        let width = tuning.spike_width();

        let (lo, hi) = gap_start_range(tuning);
        let gap_start = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let variant = rng.random_range(0..SPIKE_VARIANTS);

        let top_y = gap_start + gap;
        let top = Rect::new(tuning.screen_width, top_y, width, (height - top_y).max(0.0));
        let bottom = Rect::new(tuning.screen_width, 0.0, width, gap_start);

        let top_id = self.alloc_id();
        let bottom_id = self.alloc_id();
        self.obstacles.push(Obstacle::new(top_id, top, true, variant));
        self.obstacles.push(Obstacle::new(bottom_id, bottom, false, variant));

        log::debug!("Spawned spike pair {}/{} gap_start={:.1}", top_id, bottom_id, gap_start);
    }

    /// Scroll every spike, returning how many bottom spikes the rocket just passed
    pub fn advance(&mut self, speed: f32, dt: f32, rocket_center_x: f32) -> u32 {
        let dx = speed * dt;
        let mut passed = 0;
        for obstacle in &mut self.obstacles {
            obstacle.advance(dx);
            if obstacle.try_score(rocket_center_x) {
                passed += 1;
            }
        }
        self.obstacles.retain(|o| !o.is_offscreen());
        passed
    }

    /// First spike whose hitbox the rocket box touches
    pub fn first_collision(&self, rocket: &Rect) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| rect_intersects_triangle(rocket, &o.triangle))
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Valid `[lo, hi]` for the bottom of the gap; never inverted
pub fn gap_start_range(tuning: &Tuning) -> (f32, f32) {
    let height = tuning.screen_height;
    let gap = tuning.spike_gap().clamp(0.0, height);
    let margin = tuning.spike_gap_margin.max(0.0);
    let hi = (height - gap - margin).max(0.0);
    let lo = margin.min(hi);
    (lo, hi)
}

/// Draw the next spawn delay; both bounds shrink with difficulty but have floors
pub fn spike_delay(tuning: &Tuning, difficulty: f32, rng: &mut impl Rng) -> f32 {
    let (min, max) = spike_delay_range(tuning, difficulty);
    if max > min { rng.random_range(min..=max) } else { min }
}

pub fn spike_delay_range(tuning: &Tuning, difficulty: f32) -> (f32, f32) {
    let d = difficulty.max(f32::EPSILON);
    let min = (tuning.min_spike_delay / d).max(tuning.min_spike_delay_floor);
    let max = (tuning.max_spike_delay / d).max(tuning.max_spike_delay_floor);
    (min, max.max(min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_pair_shares_gap_and_variant() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut field = ObstacleField::new(&tuning, 1.0, &mut rng);
        field.spawn_pair(&tuning, &mut rng);

        assert_eq!(field.obstacles.len(), 2);
        let top = &field.obstacles[0];
        let bottom = &field.obstacles[1];
        assert!(top.is_top && !bottom.is_top);
        assert_eq!(top.texture_variant, bottom.texture_variant);
        assert!(top.texture_variant < SPIKE_VARIANTS);
        assert_eq!(bottom.rect.y, 0.0);
        assert!((top.rect.y - bottom.rect.h - tuning.spike_gap()).abs() < 0.001);
        assert!((top.rect.top() - tuning.screen_height).abs() < 0.001);
        assert!(bottom.rect.h >= 100.0);
        assert!(bottom.rect.h <= tuning.screen_height - tuning.spike_gap() - 100.0);
    }

    #[test]
    fn test_spike_delay_scales_with_floors() {
        let tuning = Tuning::default();
        assert_eq!(spike_delay_range(&tuning, 1.0), (2.0, 4.5));
        let (min, max) = spike_delay_range(&tuning, 2.0);
        assert!((min - 1.0).abs() < 0.001);
        assert!((max - 2.25).abs() < 0.001);
        assert_eq!(spike_delay_range(&tuning, 10.0), (1.0, 1.5));
    }

    #[test]
    fn test_gap_range_never_inverted() {
        let tuning = Tuning {
            screen_height: 150.0,
            ..Tuning::default()
        };
        let (lo, hi) = gap_start_range(&tuning);
        assert!(lo <= hi);
        assert!(lo >= 0.0);

        let mut rng = rng();
        let mut field = ObstacleField::new(&tuning, 1.0, &mut rng);
        field.spawn_pair(&tuning, &mut rng);
        assert!(field.obstacles.iter().all(|o| o.rect.h >= 0.0));
    }

    #[test]
    fn test_spawns_after_delay() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut field = ObstacleField::new(&tuning, 1.0, &mut rng);
        field.next_spike_delay = 0.5;
        assert!(!field.update_spawner(&tuning, 1.0, 0.3, &mut rng));
        assert!(field.update_spawner(&tuning, 1.0, 0.3, &mut rng));
        assert_eq!(field.obstacles.len(), 2);
        assert_eq!(field.spike_timer, 0.0);
        assert!(field.next_spike_delay >= 2.0 && field.next_spike_delay <= 4.5);
    }

    #[test]
    fn test_bottom_spike_scores_once() {
        let mut bottom = Obstacle::new(1, Rect::new(100.0, 0.0, 50.0, 100.0), false, 0);
        assert!(!bottom.try_score(120.0));
        assert!(bottom.try_score(126.0));
        assert!(!bottom.try_score(200.0));
        assert!(bottom.scored);

        let mut top = Obstacle::new(2, Rect::new(100.0, 300.0, 50.0, 100.0), true, 0);
        assert!(!top.try_score(500.0));
        assert!(!top.scored);
    }

    #[test]
    fn test_advance_moves_hitbox_and_retires() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut field = ObstacleField::new(&tuning, 1.0, &mut rng);
        field.spawn_pair(&tuning, &mut rng);
        let before = field.obstacles[1].triangle.c.x;

        field.advance(200.0, 0.5, 0.0);
        assert!((before - field.obstacles[1].triangle.c.x - 100.0).abs() < 0.001);

        // Far enough that both spikes clear the left edge
        field.advance(200.0, 10.0, 0.0);
        assert!(field.obstacles.is_empty());
    }

    #[test]
    fn test_advance_counts_passes_once() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut field = ObstacleField::new(&tuning, 1.0, &mut rng);
        field.spawn_pair(&tuning, &mut rng);
        let rocket_cx = 232.0;

        let mut total = 0;
        for _ in 0..400 {
            total += field.advance(200.0, 1.0 / 60.0, rocket_cx);
        }
        assert_eq!(total, 1);
    }
}
