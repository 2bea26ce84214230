//! Achievement table and unlock predicates
//!
//! Predicates are pure; persistence of unlock flags belongs to the profile store.

use serde::{Deserialize, Serialize};

use super::state::RunSession;

/// Every unlockable milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    FirstFlight,
    #[serde(rename = "combo-10")]
    Combo10,
    #[serde(rename = "combo-25")]
    Combo25,
    #[serde(rename = "survivor-50")]
    Survivor50,
    #[serde(rename = "survivor-100")]
    Survivor100,
    #[serde(rename = "survivor-200")]
    Survivor200,
    NoDamage,
    SpeedDemon,
    PowerupCollector,
    HardcoreSurvivor,
}

/// State changes that can unlock something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    RunStart,
    ComboIncrement,
    ScoreChange,
    PowerUpCollected,
    Collision,
}

impl Trigger {
    /// Achievements worth checking after this trigger
    pub fn candidates(&self) -> &'static [Achievement] {
        use Achievement::*;
        match self {
            Trigger::RunStart => &[FirstFlight],
            Trigger::ComboIncrement => &[Combo10, Combo25],
            Trigger::ScoreChange => &[
                Survivor50,
                Survivor100,
                Survivor200,
                NoDamage,
                SpeedDemon,
                HardcoreSurvivor,
            ],
            Trigger::PowerUpCollected => &[PowerupCollector],
            Trigger::Collision => &[HardcoreSurvivor],
        }
    }
}

impl Achievement {
    pub const ALL: [Achievement; 10] = [
        Achievement::FirstFlight,
        Achievement::Combo10,
        Achievement::Combo25,
        Achievement::Survivor50,
        Achievement::Survivor100,
        Achievement::Survivor200,
        Achievement::NoDamage,
        Achievement::SpeedDemon,
        Achievement::PowerupCollector,
        Achievement::HardcoreSurvivor,
    ];

    /// Stable id used by the profile store
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstFlight => "first-flight",
            Achievement::Combo10 => "combo-10",
            Achievement::Combo25 => "combo-25",
            Achievement::Survivor50 => "survivor-50",
            Achievement::Survivor100 => "survivor-100",
            Achievement::Survivor200 => "survivor-200",
            Achievement::NoDamage => "no-damage",
            Achievement::SpeedDemon => "speed-demon",
            Achievement::PowerupCollector => "powerup-collector",
            Achievement::HardcoreSurvivor => "hardcore-survivor",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstFlight => "First Flight",
            Achievement::Combo10 => "Combo Master",
            Achievement::Combo25 => "Combo Legend",
            Achievement::Survivor50 => "Survivor",
            Achievement::Survivor100 => "Century",
            Achievement::Survivor200 => "Double Century",
            Achievement::NoDamage => "Perfect Flight",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::PowerupCollector => "Collector",
            Achievement::HardcoreSurvivor => "Hardcore Hero",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstFlight => "Play your first game",
            Achievement::Combo10 => "Reach 10x combo",
            Achievement::Combo25 => "Reach 25x combo",
            Achievement::Survivor50 => "Score 50 points",
            Achievement::Survivor100 => "Score 100 points",
            Achievement::Survivor200 => "Score 200 points",
            Achievement::NoDamage => "Score 30 without taking damage",
            Achievement::SpeedDemon => "Survive 2.0x difficulty",
            Achievement::PowerupCollector => "Collect 10 power-ups",
            Achievement::HardcoreSurvivor => "Score 50 in one life",
        }
    }

    /// Numeric threshold shown next to the description (0 when not count-based)
    pub fn requirement(&self) -> u32 {
        match self {
            Achievement::FirstFlight | Achievement::SpeedDemon => 0,
            Achievement::Combo10 | Achievement::PowerupCollector => 10,
            Achievement::Combo25 => 25,
            Achievement::Survivor50 | Achievement::HardcoreSurvivor => 50,
            Achievement::Survivor100 => 100,
            Achievement::Survivor200 => 200,
            Achievement::NoDamage => 30,
        }
    }

    /// Unlock condition over the current run and lifetime counters
    pub fn is_met(&self, s: &RunSession) -> bool {
        match self {
            Achievement::FirstFlight => s.games_played >= 1,
            Achievement::Combo10 => s.max_combo >= 10,
            Achievement::Combo25 => s.max_combo >= 25,
            Achievement::Survivor50 => s.score >= 50,
            Achievement::Survivor100 => s.score >= 100,
            Achievement::Survivor200 => s.score >= 200,
            Achievement::NoDamage => !s.damage_taken && s.score >= 30,
            Achievement::SpeedDemon => s.difficulty >= 2.0,
            Achievement::PowerupCollector => s.total_powerups_collected >= 10,
            Achievement::HardcoreSurvivor => s.lives_lost == 1 && s.score >= 50,
        }
    }
}

/// Check the trigger's candidates, skipping anything already unlocked.
/// Newly met achievements are added to `unlocked` and returned.
pub fn evaluate(
    trigger: Trigger,
    session: &RunSession,
    unlocked: &mut Vec<Achievement>,
) -> Vec<Achievement> {
    let mut fresh = Vec::new();
    for &achievement in trigger.candidates() {
        if unlocked.contains(&achievement) {
            continue;
        }
        if achievement.is_met(session) {
            unlocked.push(achievement);
            fresh.push(achievement);
        }
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_serde() {
        for a in Achievement::ALL {
            let json = serde_json::to_string(&a).unwrap();
            assert_eq!(json, format!("\"{}\"", a.id()));
            assert_eq!(Achievement::from_id(a.id()), Some(a));
        }
    }

    #[test]
    fn test_no_duplicate_unlocks() {
        let session = RunSession {
            score: 120,
            ..RunSession::default()
        };
        let mut unlocked = Vec::new();
        let first = evaluate(Trigger::ScoreChange, &session, &mut unlocked);
        assert_eq!(
            first,
            vec![
                Achievement::Survivor50,
                Achievement::Survivor100,
                Achievement::NoDamage
            ]
        );
        assert!(evaluate(Trigger::ScoreChange, &session, &mut unlocked).is_empty());
    }

    #[test]
    fn test_predicates() {
        let mut s = RunSession::default();
        assert!(!Achievement::FirstFlight.is_met(&s));
        s.games_played = 1;
        assert!(Achievement::FirstFlight.is_met(&s));

        s.score = 40;
        s.damage_taken = true;
        assert!(!Achievement::NoDamage.is_met(&s));

        s.difficulty = 2.0;
        assert!(Achievement::SpeedDemon.is_met(&s));

        s.total_powerups_collected = 9;
        assert!(!Achievement::PowerupCollector.is_met(&s));
        s.total_powerups_collected = 10;
        assert!(Achievement::PowerupCollector.is_met(&s));

        s.score = 55;
        s.lives_lost = 1;
        assert!(Achievement::HardcoreSurvivor.is_met(&s));
        s.lives_lost = 2;
        assert!(!Achievement::HardcoreSurvivor.is_met(&s));
    }

    #[test]
    fn test_trigger_scoping() {
        let s = RunSession {
            max_combo: 30,
            ..RunSession::default()
        };
        let mut unlocked = Vec::new();
        assert!(evaluate(Trigger::ScoreChange, &s, &mut unlocked).is_empty());
        assert_eq!(
            evaluate(Trigger::ComboIncrement, &s, &mut unlocked),
            vec![Achievement::Combo10, Achievement::Combo25]
        );
    }
}
