//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; renderers only ever see a
//! [`Snapshot`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievement::{self, Achievement, Trigger};
use super::mode::{GameMode, GameModeConfig};
use super::obstacle::{Obstacle, ObstacleField};
use super::powerup::{ActiveEffect, PowerUp, PowerUpKind, PowerUpManager};
use super::progression::{Combo, Progression};
use super::rocket::Rocket;
use crate::persistence::LifetimeStats;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// "READY?" banner
    Ready,
    /// "GO!" banner
    Go,
    /// Active gameplay
    Flying,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Things that happened during a step, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted { mode: GameMode },
    Scored { points: u32, combo: u32 },
    DamageTaken { lives_left: u32 },
    GameOver {
        final_score: u32,
        mode: GameMode,
        max_combo: u32,
    },
    PowerUpCollected(PowerUpKind),
    AchievementUnlocked(Achievement),
}

/// Stats of one playthrough plus the lifetime counters it started from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSession {
    pub score: u32,
    pub damage_taken: bool,
    pub lives_lost: u32,
    pub max_combo: u32,
    pub difficulty: f32,
    pub powerups_collected: u32,
    /// Seconds spent flying
    pub elapsed: f32,

    // Lifetime, including this run
    pub games_played: u32,
    pub total_powerups_collected: u32,
    pub max_combo_ever: u32,
}

impl RunSession {
    pub fn new(stats: &LifetimeStats, difficulty: f32) -> Self {
        Self {
            difficulty,
            games_played: stats.games_played,
            total_powerups_collected: stats.total_powerups_collected,
            max_combo_ever: stats.max_combo_ever,
            ..Self::default()
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameModeConfig,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Phase to return to when unpausing
    pub resume_phase: GamePhase,
    /// Seconds spent in the current banner phase
    pub phase_timer: f32,
    /// Simulation tick counter (flying steps only)
    pub time_ticks: u64,
    pub rocket: Rocket,
    pub obstacles: ObstacleField,
    pub powerups: PowerUpManager,
    pub progression: Progression,
    pub session: RunSession,
    /// Achievements already unlocked, from the profile or earlier this session
    pub unlocked: Vec<Achievement>,
    /// Events raised outside a step, delivered by the next one
    pub(crate) pending_events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a run. `stats` and `unlocked` come from the persisted profile.
    pub fn new(
        config: GameModeConfig,
        tuning: Tuning,
        stats: &LifetimeStats,
        unlocked: Vec<Achievement>,
        seed: u64,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let progression =
            Progression::new(&tuning, config.starting_difficulty, config.score_multiplier);
        let obstacles = ObstacleField::new(&tuning, progression.difficulty, &mut rng);
        let session = RunSession::new(stats, progression.difficulty);

        let mut state = Self {
            seed,
            config,
            rocket: Rocket::new(&tuning, config.lives),
            tuning,
            phase: GamePhase::Ready,
            resume_phase: GamePhase::Ready,
            phase_timer: 0.0,
            time_ticks: 0,
            obstacles,
            powerups: PowerUpManager::default(),
            progression,
            session,
            unlocked,
            pending_events: Vec::new(),
            rng,
        };
        state.begin_run();
        state
    }

    /// Discard the current run and start a fresh one in `config`'s mode.
    /// Lifetime counters and unlocks carry over.
    pub fn reset(&mut self, config: GameModeConfig) {
        let stats = LifetimeStats {
            games_played: self.session.games_played,
            total_powerups_collected: self.session.total_powerups_collected,
            max_combo_ever: self.session.max_combo_ever,
        };
        let unlocked = std::mem::take(&mut self.unlocked);
        let seed = self.seed.wrapping_add(1);
        *self = Self::new(config, self.tuning.clone(), &stats, unlocked, seed);
    }

    fn begin_run(&mut self) {
        self.session.games_played = self.session.games_played.saturating_add(1);
        self.pending_events.push(GameEvent::RunStarted {
            mode: self.config.mode,
        });
        let mut unlocks = Vec::new();
        self.check_achievements(Trigger::RunStart, &mut unlocks);
        self.pending_events.append(&mut unlocks);
        log::info!(
            "Run started: {} (lives={}, difficulty={:.2}, seed={})",
            self.config.mode.display_name(),
            self.rocket.lives,
            self.progression.difficulty,
            self.seed
        );
    }

    /// Evaluate a trigger and queue any fresh unlocks
    pub(crate) fn check_achievements(&mut self, trigger: Trigger, events: &mut Vec<GameEvent>) {
        let fresh = achievement::evaluate(trigger, &self.session, &mut self.unlocked);
        for a in fresh {
            log::info!("Achievement unlocked: {} ({})", a.name(), a.id());
            events.push(GameEvent::AchievementUnlocked(a));
        }
    }

    /// Copy progression numbers into the session record
    pub(crate) fn sync_session(&mut self) {
        self.session.score = self.progression.score;
        self.session.max_combo = self.progression.combo.max_this_run;
        self.session.max_combo_ever = self.session.max_combo_ever.max(self.session.max_combo);
        self.session.difficulty = self.progression.difficulty;
    }

    /// Seconds left in a timed mode
    pub fn time_remaining(&self) -> Option<f32> {
        self.config
            .time_limit
            .map(|limit| (limit - self.session.elapsed).max(0.0))
    }

    /// Read-only view for the rendering layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            phase_timer: self.phase_timer,
            mode: self.config.mode,
            rocket: &self.rocket,
            obstacles: &self.obstacles.obstacles,
            pickups: &self.powerups.pickups,
            active_effects: &self.powerups.active,
            score: self.progression.score,
            combo: &self.progression.combo,
            combo_expiring: self
                .progression
                .combo
                .is_expiring_soon(self.tuning.combo_expiring_threshold),
            difficulty: self.progression.difficulty,
            score_multiplier: self.progression.score_multiplier,
            time_remaining: self.time_remaining(),
            session: &self.session,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub phase_timer: f32,
    pub mode: GameMode,
    pub rocket: &'a Rocket,
    pub obstacles: &'a [Obstacle],
    pub pickups: &'a [PowerUp],
    pub active_effects: &'a [ActiveEffect],
    pub score: u32,
    pub combo: &'a Combo,
    pub combo_expiring: bool,
    pub difficulty: f32,
    pub score_multiplier: u32,
    pub time_remaining: Option<f32>,
    pub session: &'a RunSession,
}
