//! Player profile persistence
//!
//! Features:
//! - `ProfileStore` port; the simulation never touches storage directly
//! - Versioned JSON envelope
//! - Atomic tmp -> save rename on native
//! - Corruption detection (falls back to a fresh profile)

mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{Achievement, GameEvent};

/// Bump when the profile layout changes incompatibly
pub const PROFILE_VERSION: u32 = 1;

/// Counters that span every run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeStats {
    pub games_played: u32,
    pub total_powerups_collected: u32,
    pub max_combo_ever: u32,
}

/// Everything persisted about a player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub stats: LifetimeStats,
    /// Unlocked achievements, in unlock order
    pub unlocked: Vec<Achievement>,
    pub high_scores: HighScores,
    pub settings: Settings,
}

impl Profile {
    /// Fold one simulation event into the profile
    pub fn record(&mut self, event: &GameEvent, timestamp: f64) {
        match event {
            GameEvent::RunStarted { .. } => {
                self.stats.games_played = self.stats.games_played.saturating_add(1);
            }
            GameEvent::Scored { combo, .. } => {
                self.stats.max_combo_ever = self.stats.max_combo_ever.max(*combo);
            }
            GameEvent::PowerUpCollected(_) => {
                self.stats.total_powerups_collected =
                    self.stats.total_powerups_collected.saturating_add(1);
            }
            GameEvent::AchievementUnlocked(a) => {
                if !self.unlocked.contains(a) {
                    self.unlocked.push(*a);
                }
            }
            GameEvent::GameOver {
                final_score,
                mode,
                max_combo,
            } => {
                self.stats.max_combo_ever = self.stats.max_combo_ever.max(*max_combo);
                if let Some(rank) =
                    self.high_scores
                        .add_score(*final_score, *mode, *max_combo, timestamp)
                {
                    log::info!("New high score #{}: {}", rank, final_score);
                }
            }
            GameEvent::DamageTaken { .. } => {}
        }
    }

    pub fn record_all(&mut self, events: &[GameEvent], timestamp: f64) {
        for event in events {
            self.record(event, timestamp);
        }
    }

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Best score across all modes
    pub fn high_score(&self) -> u32 {
        self.high_scores.top_score().unwrap_or(0)
    }

    /// Wipe achievement progress (keeps settings and high scores)
    pub fn reset_achievements(&mut self) {
        self.unlocked.clear();
        self.stats = LifetimeStats::default();
    }
}

/// On-disk wrapper carrying the layout version
#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    profile: Profile,
}

/// Serialize a profile inside a versioned envelope
pub fn encode(profile: &Profile) -> String {
    let envelope = SaveEnvelope {
        version: PROFILE_VERSION,
        profile: profile.clone(),
    };
    // A plain data struct with string keys always serializes
    serde_json::to_string(&envelope).unwrap_or_default()
}

/// Parse a saved profile; `None` if corrupt or from an unknown version
pub fn decode(json: &str) -> Option<Profile> {
    match serde_json::from_str::<SaveEnvelope>(json) {
        Ok(envelope) if envelope.version == PROFILE_VERSION => Some(envelope.profile),
        Ok(envelope) => {
            log::warn!(
                "Discarding profile with version {} (expected {})",
                envelope.version,
                PROFILE_VERSION
            );
            None
        }
        Err(e) => {
            log::warn!("Corrupt profile: {}", e);
            None
        }
    }
}

/// Persistence port for the player profile
pub trait ProfileStore {
    /// Load the profile, or a fresh one if nothing usable is stored
    fn load(&self) -> Profile;
    /// Persist the profile (best effort)
    fn save(&mut self, profile: &Profile);
}

/// In-memory store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw saved data
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Profile {
        self.json.as_deref().and_then(decode).unwrap_or_default()
    }

    fn save(&mut self, profile: &Profile) {
        self.json = Some(encode(profile));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameMode, PowerUpKind};

    #[test]
    fn test_record_events() {
        let mut profile = Profile::default();
        let events = [
            GameEvent::RunStarted {
                mode: GameMode::Classic,
            },
            GameEvent::AchievementUnlocked(Achievement::FirstFlight),
            GameEvent::Scored { points: 1, combo: 1 },
            GameEvent::Scored { points: 3, combo: 3 },
            GameEvent::PowerUpCollected(PowerUpKind::Magnet),
            GameEvent::DamageTaken { lives_left: 2 },
            GameEvent::GameOver {
                final_score: 4,
                mode: GameMode::Classic,
                max_combo: 3,
            },
        ];
        profile.record_all(&events, 1000.0);

        assert_eq!(profile.stats.games_played, 1);
        assert_eq!(profile.stats.max_combo_ever, 3);
        assert_eq!(profile.stats.total_powerups_collected, 1);
        assert!(profile.is_unlocked(Achievement::FirstFlight));
        assert_eq!(profile.high_score(), 4);
    }

    #[test]
    fn test_unlock_recorded_once() {
        let mut profile = Profile::default();
        let event = GameEvent::AchievementUnlocked(Achievement::NoDamage);
        profile.record(&event, 0.0);
        profile.record(&event, 0.0);
        assert_eq!(profile.unlocked_count(), 1);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().stats, LifetimeStats::default());

        let mut profile = Profile::default();
        profile.stats.games_played = 7;
        profile.unlocked.push(Achievement::SpeedDemon);
        profile.settings.music_enabled = false;
        store.save(&profile);

        let loaded = store.load();
        assert_eq!(loaded.stats.games_played, 7);
        assert_eq!(loaded.unlocked, vec![Achievement::SpeedDemon]);
        assert!(!loaded.settings.music_enabled);
        assert!(store.raw().unwrap().contains("\"speed-demon\""));
    }

    #[test]
    fn test_corrupt_or_foreign_version_falls_back() {
        assert!(MemoryStore::with_raw("{{{").load().unlocked.is_empty());

        let future = r#"{"version":99,"profile":{"stats":{"games_played":5}}}"#;
        assert!(decode(future).is_none());
        assert_eq!(MemoryStore::with_raw(future).load().stats.games_played, 0);
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let json = r#"{"version":1,"profile":{"stats":{"games_played":2}}}"#;
        let profile = decode(json).unwrap();
        assert_eq!(profile.stats.games_played, 2);
        assert!(profile.settings.sound_enabled);
        assert!(profile.high_scores.is_empty());
    }

    #[test]
    fn test_reset_achievements_keeps_scores() {
        let mut profile = Profile::default();
        profile.record(
            &GameEvent::GameOver {
                final_score: 12,
                mode: GameMode::Zen,
                max_combo: 4,
            },
            0.0,
        );
        profile.unlocked.push(Achievement::FirstFlight);
        profile.reset_achievements();
        assert_eq!(profile.unlocked_count(), 0);
        assert_eq!(profile.stats.max_combo_ever, 0);
        assert_eq!(profile.high_score(), 12);
    }
}
