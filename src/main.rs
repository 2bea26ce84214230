//! Rocket Escape entry point
//!
//! Native builds run a headless autopilot session against the simulation and
//! print the final state as JSON. The browser frontend drives `Simulation`
//! itself, so the wasm32 binary is empty.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};
    use rocket_escape::consts::SIM_DT;
    use rocket_escape::platform;
    use rocket_escape::sim::{GameEvent, GameMode, Simulation, TickInput};
    use rocket_escape::tuning::Tuning;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum ModeArg {
        Classic,
        Hardcore,
        Zen,
        TimeAttack,
    }

    impl From<ModeArg> for GameMode {
        fn from(mode: ModeArg) -> Self {
            match mode {
                ModeArg::Classic => GameMode::Classic,
                ModeArg::Hardcore => GameMode::Hardcore,
                ModeArg::Zen => GameMode::Zen,
                ModeArg::TimeAttack => GameMode::TimeAttack,
            }
        }
    }

    /// Fly one autopilot run and print where it ended
    #[derive(Debug, Parser)]
    #[command(name = "rocket-escape", version)]
    pub struct Options {
        /// Game mode to fly
        #[arg(value_enum, default_value_t = ModeArg::Classic)]
        pub mode: ModeArg,
        /// RNG seed (defaults to the clock)
        #[arg(long)]
        pub seed: Option<u64>,
        /// JSON file overriding balance constants
        #[arg(long, value_name = "FILE")]
        pub tuning: Option<PathBuf>,
        /// Cap on simulated flight time (Zen never ends on its own)
        #[arg(long, value_name = "SECS", default_value_t = 300.0)]
        pub max_seconds: f32,
    }

    pub fn run(opts: Options) -> Result<(), Box<dyn Error>> {
        let mode = GameMode::from(opts.mode);
        let seed = opts.seed.unwrap_or_else(platform::time_seed);
        let tuning = match &opts.tuning {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let mut store = platform::default_store();
        let mut profile = store.load();

        log::info!(
            "Mode selected: {} ({})",
            mode.display_name(),
            mode.description()
        );
        log::debug!("seed {}", seed);
        let mut sim = Simulation::new(mode.config(), tuning, &profile, seed);
        let input = TickInput {
            autopilot: true,
            ..TickInput::default()
        };

        let max_steps = (opts.max_seconds / SIM_DT).ceil() as u64;
        let mut steps = 0;
        while !sim.is_over() && steps < max_steps {
            for event in sim.step(SIM_DT, &input) {
                match &event {
                    GameEvent::AchievementUnlocked(a) => {
                        log::info!("Unlocked \"{}\": {}", a.name(), a.description())
                    }
                    GameEvent::DamageTaken { lives_left } => {
                        log::info!("Hit! {} lives left", lives_left)
                    }
                    _ => {}
                }
                profile.record(&event, platform::now_ms());
            }
            steps += 1;
        }
        if !sim.is_over() {
            log::info!("Stopped after {:.0}s of flight", opts.max_seconds);
        }

        store.save(&profile);
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
        println!(
            "best {}: {} | achievements {}/{}",
            mode.display_name(),
            profile.high_scores.best_for(mode).unwrap_or(0),
            profile.unlocked_count(),
            rocket_escape::sim::Achievement::ALL.len()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    rocket_escape::platform::init_logging();
    log::info!("Rocket Escape (headless) starting...");

    let opts = <headless::Options as clap::Parser>::parse();
    if let Err(e) = headless::run(opts) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use clap::Parser;
    use rocket_escape::sim::GameMode;

    use super::headless::{ModeArg, Options};

    #[test]
    fn test_defaults() {
        let opts = Options::try_parse_from(["rocket-escape"]).unwrap();
        assert_eq!(opts.mode, ModeArg::Classic);
        assert_eq!(opts.seed, None);
        assert!(opts.tuning.is_none());
        assert_eq!(opts.max_seconds, 300.0);
    }

    #[test]
    fn test_mode_and_flags() {
        let opts = Options::try_parse_from([
            "rocket-escape",
            "time-attack",
            "--seed",
            "42",
            "--tuning",
            "balance.json",
            "--max-seconds",
            "12.5",
        ])
        .unwrap();
        assert_eq!(GameMode::from(opts.mode), GameMode::TimeAttack);
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.tuning.unwrap().to_str(), Some("balance.json"));
        assert_eq!(opts.max_seconds, 12.5);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Options::try_parse_from(["rocket-escape", "arcade"]).is_err());
        assert!(Options::try_parse_from(["rocket-escape", "--seed", "soon"]).is_err());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser frontend owns the game loop
}
