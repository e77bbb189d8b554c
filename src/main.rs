//! Swim Rush headless runner
//!
//! Plays one race to the finish with no renderer and logs what happens.
//! Usage: `swim-rush [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use swim_rush::commentary::CommentaryDirector;
    use swim_rush::sim::RacePhase;
    use swim_rush::voice::{DEFAULT_TRIGGER_PHRASE, VoiceGate};
    use swim_rush::{Race, RaceInput, Settings};

    /// Fixed frame step (ms)
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Give up after ten minutes of race time
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_file(&path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(rand::random);

    let mut race = Race::with_seed(settings, seed);
    let mut commentary = CommentaryDirector::new();
    let voice = VoiceGate::default();
    let mut rng = Pcg32::seed_from_u64(seed ^ 0x5EED);

    race.start();
    for frame in 0..MAX_FRAMES {
        // Weave gently and drop a hazard every five seconds
        let t = frame as f32 * FRAME_MS / 1000.0;
        let input = RaceInput {
            steer: (t * 0.7).sin(),
            drop_hazard: frame % 300 == 299,
            voice_boost: false,
        };
        race.step(FRAME_MS, &input);

        if frame % 900 == 600 && voice.hear(&mut race, DEFAULT_TRIGGER_PHRASE) {
            log::info!("Voice boost!");
        }
        if let Some(line) = commentary.next_line(&mut race, &mut rng) {
            log::info!("Commentary: {}", line);
        }
        if race.phase() == RacePhase::Finished {
            break;
        }
    }

    if race.phase() != RacePhase::Finished {
        log::warn!("No finisher after {} frames", MAX_FRAMES);
        race.finish();
    }

    println!("Race over after {:.1}s (seed {})", race.now() / 1000.0, seed);
    for entry in &race.standings().entries {
        println!("{:>3} {:<10} {:>5.1}%", entry.badge(), entry.name, entry.progress);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is swim_rush::wasm::init, this is just to satisfy the compiler
}
