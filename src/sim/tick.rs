//! Per-frame simulation step
//!
//! Core game loop that advances a run in a fixed order and reports what
//! happened as a list of [`GameEvent`]s.

use super::achievement::Trigger;
use super::mode::GameModeConfig;
use super::powerup::PowerUpKind;
use super::rocket::HitOutcome;
use super::state::{GameEvent, GamePhase, GameState, Snapshot};
use crate::consts::MAX_FRAME_DT;
use crate::persistence::Profile;
use crate::tuning::Tuning;

/// Input intents for a single step (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space)
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - AI flies the rocket
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = std::mem::take(&mut state.pending_events);

    // Frame hitches are clamped, not sub-stepped
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Ready | GamePhase::Go | GamePhase::Flying => {
                state.resume_phase = state.phase;
                state.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => state.phase = state.resume_phase,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return events,
        GamePhase::Ready | GamePhase::Go => {
            advance_banner(state, dt);
            return events;
        }
        GamePhase::Flying => {}
    }

    state.time_ticks += 1;
    state.session.elapsed += dt;

    // --- ROCKET ---
    let wants_flap = input.flap || (input.autopilot && autopilot_wants_flap(state, dt));
    if wants_flap {
        state.rocket.flap(state.tuning.flap_impulse);
    }
    let ceiling = state.tuning.rocket_ceiling();
    state.rocket.integrate(state.tuning.gravity, ceiling, dt);

    // --- TIMERS ---
    state.progression.decay_combo(dt);
    state.powerups.tick_effects(dt);
    state.progression.score_multiplier = state.powerups.modifiers.score_multiplier;

    let speed = state
        .progression
        .current_speed(&state.tuning, state.powerups.modifiers.speed_multiplier);

    // --- SPIKES ---
    let difficulty = state.progression.difficulty;
    state
        .obstacles
        .update_spawner(&state.tuning, difficulty, dt, &mut state.rng);
    let passed = state
        .obstacles
        .advance(speed, dt, state.rocket.center_x());
    for _ in 0..passed {
        score_pass(state, &mut events);
    }

    // --- DIFFICULTY ---
    // Score checks see the run as it stood before this step's collision
    state.progression.update_difficulty(&state.tuning);
    state.sync_session();
    if passed > 0 {
        state.check_achievements(Trigger::ScoreChange, &mut events);
    }

    // --- POWER-UPS ---
    state
        .powerups
        .update_spawner(&state.tuning, dt, &mut state.rng);
    let rocket_rect = state.rocket.rect();
    for kind in state.powerups.advance(speed, dt, &rocket_rect) {
        collect_powerup(state, kind, &mut events);
    }

    // --- COLLISION ---
    check_collision(state, &mut events);
    state.sync_session();

    // --- TIME LIMIT ---
    if state.phase == GamePhase::Flying
        && state.time_remaining().is_some_and(|left| left <= 0.0)
    {
        log::info!("Time limit reached");
        finish_run(state, &mut events);
    }

    events
}

/// READY -> GO -> FLYING banners
fn advance_banner(state: &mut GameState, dt: f32) {
    state.phase_timer += dt;
    if state.phase_timer > state.tuning.phase_banner_secs {
        state.phase_timer = 0.0;
        state.phase = match state.phase {
            GamePhase::Ready => GamePhase::Go,
            _ => GamePhase::Flying,
        };
    }
}

fn score_pass(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let award = state.progression.on_score(&state.tuning);
    state.sync_session();
    events.push(GameEvent::Scored {
        points: award.points,
        combo: award.combo,
    });
    state.check_achievements(Trigger::ComboIncrement, events);
}

fn collect_powerup(state: &mut GameState, kind: PowerUpKind, events: &mut Vec<GameEvent>) {
    log::debug!("Collected {} power-up", kind.name());
    state.powerups.activate(kind, &state.tuning);
    if kind == PowerUpKind::Shield {
        state.rocket.grant_invulnerability(kind.duration());
    }
    state.progression.score_multiplier = state.powerups.modifiers.score_multiplier;

    state.session.powerups_collected += 1;
    state.session.total_powerups_collected = state.session.total_powerups_collected.saturating_add(1);
    events.push(GameEvent::PowerUpCollected(kind));
    state.check_achievements(Trigger::PowerUpCollected, events);
}

/// At most one collision per step, and none while invulnerable
fn check_collision(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.rocket.is_invulnerable() {
        return;
    }
    let rocket_rect = state.rocket.rect();
    let Some(hit) = state.obstacles.first_collision(&rocket_rect) else {
        return;
    };
    log::debug!("Rocket hit spike #{}", hit.id);

    let outcome = state
        .rocket
        .take_hit(state.tuning.damage_invulnerability_secs);
    match outcome {
        HitOutcome::Ignored => {}
        HitOutcome::Damaged { lives_left } => {
            state.progression.break_combo();
            state.session.damage_taken = true;
            state.session.lives_lost += 1;
            events.push(GameEvent::DamageTaken { lives_left });
            state.check_achievements(Trigger::Collision, events);
        }
        HitOutcome::Destroyed => {
            state.progression.break_combo();
            state.session.damage_taken = true;
            state.session.lives_lost += 1;
            state.check_achievements(Trigger::Collision, events);
            finish_run(state, events);
        }
    }
}

fn finish_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state.sync_session();
    log::info!(
        "Game over: score={} max_combo={} elapsed={:.1}s",
        state.session.score,
        state.session.max_combo,
        state.session.elapsed
    );
    events.push(GameEvent::GameOver {
        final_score: state.session.score,
        mode: state.config.mode,
        max_combo: state.session.max_combo,
    });
}

/// How far ahead the autopilot plans a set-up flap
const AUTOPILOT_PLAN_SECS: f32 = 1.0;
/// Height error the autopilot tolerates before correcting
const AUTOPILOT_SLACK: f32 = 20.0;
/// Steps past the ideal moment a late final flap is still taken
const AUTOPILOT_LATE_STEPS: i64 = 6;

/// Vertical opening of the next spike pair
struct GapAhead {
    floor: f32,
    ceiling: f32,
    center_x: f32,
}

/// Spike pair the rocket has not cleared yet
fn next_gap(state: &GameState) -> Option<GapAhead> {
    let rocket_x = state.rocket.x;
    let spikes = &state.obstacles.obstacles;
    let lead = spikes
        .iter()
        .filter(|o| o.rect.right() > rocket_x)
        .min_by(|a, b| a.rect.x.total_cmp(&b.rect.x))?;

    let mut gap = GapAhead {
        floor: 0.0,
        ceiling: state.tuning.screen_height,
        center_x: lead.center_x(),
    };
    for o in spikes.iter().filter(|o| (o.rect.x - lead.rect.x).abs() < 0.5) {
        if o.is_top {
            gap.ceiling = gap.ceiling.min(o.rect.y);
        } else {
            gap.floor = gap.floor.max(o.rect.top());
        }
    }
    Some(gap)
}

/// Height gained `m` steps after a flap, for `m` in `0..=steps`
fn flap_arc(tuning: &Tuning, dt: f32, steps: usize) -> Vec<f32> {
    let mut arc = Vec::with_capacity(steps + 1);
    let (mut rise, mut velocity) = (0.0, tuning.flap_impulse);
    arc.push(rise);
    for _ in 0..steps {
        velocity += tuning.gravity;
        rise += velocity * dt;
        arc.push(rise);
    }
    arc
}

/// Rocket heights over the next `steps` steps without flapping
fn coast_heights(state: &GameState, dt: f32, steps: usize) -> Vec<f32> {
    let ceiling = state.tuning.rocket_ceiling();
    let mut rocket = state.rocket.clone();
    let mut heights = Vec::with_capacity(steps + 1);
    heights.push(rocket.y);
    for _ in 0..steps {
        rocket.integrate(state.tuning.gravity, ceiling, dt);
        heights.push(rocket.y);
    }
    heights
}

/// Demo AI. Times a final flap so its peak lands mid-gap while the rocket
/// is level with the spike tips, and uses one earlier flap to reach the
/// height that final flap must start from.
fn autopilot_wants_flap(state: &GameState, dt: f32) -> bool {
    let rocket = &state.rocket;
    let tuning = &state.tuning;
    if dt <= 0.0 || tuning.gravity >= 0.0 {
        return false;
    }

    let apex_steps = ((tuning.flap_impulse / -tuning.gravity).ceil() as usize).saturating_sub(1);
    let plan_steps = (AUTOPILOT_PLAN_SECS / dt).ceil() as usize;
    let arc = flap_arc(tuning, dt, plan_steps.max(apex_steps));
    let rise = arc[apex_steps];

    let Some(gap) = next_gap(state) else {
        // Open sky: bob around mid-screen
        let low = (tuning.screen_height - rocket.height - rise) / 2.0;
        return rocket.velocity <= 0.0 && rocket.y + rocket.velocity * 0.1 < low;
    };

    let speed = state
        .progression
        .current_speed(tuning, state.powerups.modifiers.speed_multiplier);
    if speed <= 0.0 {
        return false;
    }

    let steps_to_mid = ((gap.center_x - rocket.center_x()) / (speed * dt)).round() as i64;
    let final_in = steps_to_mid - apex_steps as i64;
    let peak_target = gap.floor + ((gap.ceiling - gap.floor - rocket.height) / 2.0).max(0.0);
    let flap_from = peak_target - rise;

    if final_in <= 0 {
        if final_in <= -AUTOPILOT_LATE_STEPS || rocket.y > flap_from + AUTOPILOT_SLACK {
            return false;
        }
        // Skip if the current climb already peaks on time
        let peak_in = (rocket.velocity.max(0.0) / -tuning.gravity).round() as i64;
        return (peak_in - steps_to_mid).abs() > 2;
    }

    let final_in = final_in as usize;
    if final_in > plan_steps {
        // Far off: bob just under the final flap height
        return rocket.velocity <= 0.0 && rocket.y + rocket.velocity * 0.1 < flap_from;
    }

    let coast = coast_heights(state, dt, final_in);
    if coast[final_in] >= flap_from - AUTOPILOT_SLACK {
        return false;
    }
    // Set-up flap: pick the step that arrives closest to the final flap height
    let miss = |k: usize| (coast[k] + arc[final_in - k] - flap_from).abs();
    (0..final_in).min_by(|&a, &b| miss(a).total_cmp(&miss(b))) == Some(0)
}

/// One run as seen by the host: step it once per frame, render its snapshot
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
}

impl Simulation {
    /// Start a run from the player's persisted profile
    pub fn new(config: GameModeConfig, tuning: Tuning, profile: &Profile, seed: u64) -> Self {
        Self {
            state: GameState::new(config, tuning, &profile.stats, profile.unlocked.clone(), seed),
        }
    }

    pub fn step(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn reset(&mut self, config: GameModeConfig) {
        self.state.reset(config);
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
