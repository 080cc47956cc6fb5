//! Neon Pong headless runner
//!
//! Plays one match against the computer with a scripted left player and
//! prints the final snapshot as JSON.
//!
//! Usage: neon-pong [settings.json|-] [easy|medium|hard] [seed]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_pong::consts::FRAME_MS;
    use neon_pong::sim::{Difficulty, GameMode, GamePhase, GameState, TickInput, tick};
    use neon_pong::{AudioCues, Settings};

    /// Ten minutes of play at 60 Hz
    const MAX_TICKS: u64 = 60 * 60 * 10;
    /// How far the scripted hand can move the pointer per frame
    const HAND_SPEED: f32 = 6.0;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next().as_deref() {
        None | Some("-") => Settings::default(),
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Settings::load(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                Settings::default()
            }
        },
    };
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let audio = AudioCues::new(settings.sound_enabled);
    let mut state = GameState::new(settings, seed);
    state.start(GameMode::Single, difficulty);

    let mut pointer_y = state.paddle1.center_y();
    while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
        // Chase the ball with a limited hand speed so the computer can win rallies
        let error = state.ball.pos.y - pointer_y;
        pointer_y += error.clamp(-HAND_SPEED, HAND_SPEED);

        let input = TickInput {
            pointer_y: Some(pointer_y),
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);

        for (effect, tone) in audio.cues(&state.events) {
            log::debug!("{:?} {:.0} Hz", effect, tone.frequency_hz);
        }
    }

    match state.winner {
        Some(winner) => log::info!(
            "{:?} won {}-{} after {} ticks",
            winner,
            state.score.player1,
            state.score.player2,
            state.time_ticks
        ),
        None => log::warn!("No winner after {} ticks", state.time_ticks),
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
