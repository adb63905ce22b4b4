//! Claw Machine entry point
//!
//! Native builds run a headless attract-mode session and log what the machine
//! wins. The browser build is driven from JS through `WebClawGame`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use claw_machine::{ClawGame, QualityPreset};
    use claw_machine::persistence::{FileStore, KeyValueStore, MemoryStore};
    use claw_machine::sim::{Bounds, SimEvent, TickInput};

    /// Headless claw machine running in attract mode
    #[derive(Parser, Debug)]
    #[command(name = "claw-machine")]
    #[command(version, about = "Run the claw machine unattended and report what it wins", long_about = None)]
    pub struct Cli {
        /// Logging verbosity level
        #[arg(short, long, default_value = "info")]
        pub log_level: String,

        /// Frames to simulate (60 per second)
        #[arg(short, long, default_value_t = 3600)]
        pub frames: u64,

        /// RNG seed for the pit layout and particles
        #[arg(short, long, default_value_t = 0xC1A3)]
        pub seed: u64,

        /// Directory to persist the session and settings in (in-memory if omitted)
        #[arg(long)]
        pub store: Option<PathBuf>,

        /// Cabinet canvas width
        #[arg(long, default_value_t = 800.0)]
        pub width: f32,

        /// Cabinet canvas height
        #[arg(long, default_value_t = 600.0)]
        pub height: f32,

        /// Quality preset (low, medium, high); keeps the stored settings if omitted
        #[arg(short, long)]
        pub quality: Option<QualityPreset>,
    }

    fn run<S: KeyValueStore>(mut game: ClawGame<S>, frames: u64, quality: Option<QualityPreset>) {
        if let Some(preset) = quality {
            let mut settings = game.settings().clone();
            settings.apply_preset(preset);
            game.set_settings(settings);
            log::info!("Quality preset {}", preset.as_str());
        }

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let (mut drops, mut misses) = (0u32, 0u32);
        for _ in 0..frames {
            for event in game.advance(1.0, &input) {
                match event {
                    SimEvent::DropStarted => drops += 1,
                    SimEvent::Missed => misses += 1,
                    SimEvent::Collected { kind, points, .. } => {
                        log::info!("Won {} {} (+{points})", kind.emoji(), kind.label());
                    }
                    _ => {}
                }
            }
        }

        let session = game.session();
        log::info!(
            "{frames} frames: {drops} drops, {misses} misses, score {}",
            session.score
        );
        for (kind, count) in session.counts() {
            log::info!("  {} {} x{count}", kind.emoji(), kind.label());
        }
    }

    pub fn main() {
        let cli = Cli::parse();
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
            .init();

        log::info!("Claw Machine (native) starting, attract mode");
        let bounds = Bounds::for_canvas(cli.width, cli.height);
        match cli.store {
            Some(dir) => {
                log::info!("Persisting to {}", dir.display());
                let game = ClawGame::new(FileStore::new(dir), bounds, cli.seed);
                run(game, cli.frames, cli.quality)
            }
            None => {
                let game = ClawGame::new(MemoryStore::new(), bounds, cli.seed);
                run(game, cli.frames, cli.quality)
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_defaults() {
            let cli = Cli::try_parse_from(["claw-machine"]).unwrap();
            assert_eq!(cli.frames, 3600);
            assert_eq!(cli.seed, 0xC1A3);
            assert_eq!(cli.log_level, "info");
            assert!(cli.store.is_none());
            assert!(cli.quality.is_none());
        }

        #[test]
        fn test_cli_overrides() {
            let cli = Cli::try_parse_from([
                "claw-machine",
                "--frames",
                "120",
                "--seed",
                "7",
                "--store",
                "/tmp/claw",
                "--width",
                "320",
                "-q",
                "low",
            ])
            .unwrap();
            assert_eq!(cli.frames, 120);
            assert_eq!(cli.seed, 7);
            assert_eq!(cli.store, Some(PathBuf::from("/tmp/claw")));
            assert_eq!(cli.width, 320.0);
            assert_eq!(cli.quality, Some(QualityPreset::Low));
        }

        #[test]
        fn test_cli_rejects_bad_values() {
            assert!(Cli::try_parse_from(["claw-machine", "--frames", "lots"]).is_err());
            assert!(Cli::try_parse_from(["claw-machine", "--bogus"]).is_err());
            assert!(Cli::try_parse_from(["claw-machine", "--quality", "ultra"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::main();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
