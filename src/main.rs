//! Requiem Runner entry point
//!
//! Native builds run a headless autopilot session and print a JSON summary.
//! Browser hosts link the library directly and drive `sim::tick` from their
//! own frame callback.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use requiem_runner::audio::AudioManager;
    use requiem_runner::frame_clock::FrameClock;
    use requiem_runner::render::{AssetKey, AssetReport};
    use requiem_runner::sim::{GameEvent, GameState, TickInput, tick};
    use requiem_runner::{Settings, Tuning};
    use serde::Serialize;

    /// Outcome of a headless session
    #[derive(Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        runs: u32,
        game_overs: u32,
        best_score: u64,
        final_score: u64,
        souls: u32,
        ultimates: u32,
        coils_cast: u32,
        phase: requiem_runner::sim::GamePhase,
    }

    env_logger::init();
    log::info!("Requiem Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let tuning = Tuning::load();
    let settings = Settings::load();

    // No image loader headless: everything renders as its fallback color
    let mut assets = AssetReport::new();
    for key in AssetKey::all() {
        assets.mark_failed(key);
    }
    assets.log_summary();

    let mut state = GameState::with_tuning(seed, tuning);
    state.set_particles_enabled(settings.particles);
    let mut audio = AudioManager::default();
    audio.apply_settings(&settings);

    let mut summary = RunSummary {
        seed,
        ticks: 0,
        runs: 0,
        game_overs: 0,
        best_score: 0,
        final_score: 0,
        souls: 0,
        ultimates: 0,
        coils_cast: 0,
        phase: state.phase,
    };

    let input = TickInput {
        actions: Vec::new(),
        idle_mode: true,
    };
    let mut clock = FrameClock::new();
    while summary.ticks < ticks {
        for _ in 0..clock.advance(requiem_runner::consts::SIM_DT) {
            tick(&mut state, &input);
            summary.ticks += 1;
            audio.handle_events(&state.events);
            for event in &state.events {
                match event {
                    GameEvent::Started | GameEvent::Restarted => summary.runs += 1,
                    GameEvent::Collision => summary.game_overs += 1,
                    GameEvent::UltimateActivated => summary.ultimates += 1,
                    GameEvent::CoilCast(_) => summary.coils_cast += 1,
                    _ => {}
                }
            }
            summary.best_score = summary.best_score.max(state.score);
        }
    }

    summary.final_score = state.score;
    summary.souls = state.resources.souls;
    summary.phase = state.phase;
    log::info!(
        "Session over after {} ticks: {} runs, best score {}",
        summary.ticks,
        summary.runs,
        summary.best_score
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}
