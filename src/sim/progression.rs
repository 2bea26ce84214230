//! Score, combo streaks and the difficulty curve

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Streak of spike passes inside the rolling timeout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    pub max_this_run: u32,
    /// Seconds until the streak drops
    pub timer: f32,
}

impl Combo {
    /// UI hint only
    pub fn is_expiring_soon(&self, threshold: f32) -> bool {
        self.timer > 0.0 && self.timer <= threshold
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.timer = 0.0;
    }

    fn check_invariant(&mut self) {
        debug_assert!(
            self.count == 0 || self.timer > 0.0,
            "combo {} alive with timer {}",
            self.count,
            self.timer
        );
        if self.count > 0 && self.timer <= 0.0 {
            self.reset();
        }
    }
}

/// Points awarded by one score event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAward {
    pub points: u32,
    pub bonus: u32,
    pub combo: u32,
}

/// Owns score, combo and difficulty for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub score: u32,
    pub combo: Combo,
    pub difficulty: f32,
    pub starting_difficulty: f32,
    /// Power-up multiplier (1, or 2 under double points)
    pub score_multiplier: u32,
    /// Game mode preset applied on top of everything else
    pub mode_score_multiplier: f32,
    /// Fractional points the mode multiplier has not paid out yet
    pub score_carry: f32,
}

impl Progression {
    pub fn new(tuning: &Tuning, starting_difficulty: f32, mode_score_multiplier: f32) -> Self {
        let starting_difficulty = starting_difficulty.clamp(1.0, tuning.max_difficulty.max(1.0));
        Self {
            score: 0,
            combo: Combo::default(),
            difficulty: starting_difficulty,
            starting_difficulty,
            score_multiplier: 1,
            mode_score_multiplier: mode_score_multiplier.max(0.0),
            score_carry: 0.0,
        }
    }

    /// A spike was passed: bump the combo first, then price the pass
    pub fn on_score(&mut self, tuning: &Tuning) -> ScoreAward {
        if self.combo.count < tuning.max_combo {
            self.combo.count += 1;
        }
        self.combo.max_this_run = self.combo.max_this_run.max(self.combo.count);
        self.combo.timer = tuning.combo_timeout;

        let bonus = combo_bonus(self.combo.count, tuning) * self.score_multiplier;
        let raw = self.score_multiplier + bonus;
        let points = if self.mode_score_multiplier == 1.0 {
            raw
        } else {
            // Whole points now, the fraction rides along to the next pass
            let scaled = raw as f32 * self.mode_score_multiplier + self.score_carry;
            let whole = scaled.floor();
            self.score_carry = scaled - whole;
            whole as u32
        };

        self.score = self.score.saturating_add(points);
        ScoreAward {
            points,
            bonus,
            combo: self.combo.count,
        }
    }

    /// Count the combo timer down; the streak drops when it runs out
    pub fn decay_combo(&mut self, dt: f32) {
        if self.combo.count > 0 {
            self.combo.timer -= dt;
            if self.combo.timer <= 0.0 {
                self.combo.reset();
            }
        }
        self.combo.check_invariant();
    }

    /// Damage wipes the streak immediately
    pub fn break_combo(&mut self) {
        self.combo.reset();
    }

    /// Recompute difficulty from score; never decreases and never exceeds the cap
    pub fn update_difficulty(&mut self, tuning: &Tuning) {
        let target = (self.starting_difficulty + self.score as f32 * tuning.difficulty_rate)
            .min(tuning.max_difficulty);
        debug_assert!(target.is_finite());
        self.difficulty = self.difficulty.max(target).min(tuning.max_difficulty.max(1.0));
    }

    /// Horizontal scroll speed for spikes and power-ups
    pub fn current_speed(&self, tuning: &Tuning, slow_multiplier: f32) -> f32 {
        tuning.spike_base_speed * self.difficulty * slow_multiplier
    }
}

/// Bonus for reaching `combo` (before the score multiplier)
pub fn combo_bonus(combo: u32, tuning: &Tuning) -> u32 {
    if combo >= tuning.combo_threshold {
        (combo - tuning.combo_threshold + 1) * tuning.combo_bonus_multiplier
    } else {
        0
    }
}
