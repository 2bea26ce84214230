//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (leaderboard timestamps, run seeds)
//! - Logger installation
//! - Default profile storage

use crate::persistence::ProfileStore;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new run when the caller doesn't pick one
pub fn time_seed() -> u64 {
    now_ms() as u64
}

/// Install the logger for this target. Calling it twice is harmless.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the logger for this target. Calling it twice is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Profile storage appropriate for this target
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn ProfileStore> {
    Box::new(crate::persistence::LocalStorageStore)
}

/// Profile storage appropriate for this target: a JSON file when
/// `ROCKET_ESCAPE_PROFILE` names one, memory otherwise
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn ProfileStore> {
    match std::env::var_os("ROCKET_ESCAPE_PROFILE") {
        Some(path) => Box::new(crate::persistence::FileStore::new(path)),
        None => Box::new(crate::persistence::MemoryStore::new()),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_ms() > 1_577_836_800_000.0);
        assert!(time_seed() > 0);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        log::info!("logger installed");
    }
}
