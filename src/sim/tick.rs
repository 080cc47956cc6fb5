//! Fixed timestep simulation tick
//!
//! Core game loop that advances one match by one frame.

use super::collision::resolve_collisions;
use super::state::{ControllerKind, EventSink, GameEvent, GamePhase, GameState, Player};
use crate::consts::WINNING_SCORE;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Where the left player wants the paddle center (pointer y in court space)
    pub pointer_y: Option<f32>,
    /// Right paddle keys, only read in two-player mode
    pub paddle2_up: bool,
    pub paddle2_down: bool,
}

/// Advance the match by one frame of `dt_ms` milliseconds
///
/// Does nothing outside `Playing`. Events raised during the tick are left in
/// `state.events` until the next tick runs.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    state.clock_ms += dt_ms;

    // Serve after the post-score delay
    state.fire_due_serves();

    state.ball.advance();

    // Left paddle follows the pointer
    if let Some(pointer_y) = input.pointer_y {
        let target = pointer_y - state.paddle1.height / 2.0;
        state.paddle1.move_to(target);
    }

    // Right paddle depends on who controls it
    match state.paddle2.controller {
        ControllerKind::Ai => {
            let delta = state.ai.decide(
                &state.ball,
                &state.paddle2,
                state.court.height,
                state.clock_ms,
                &mut state.rng,
            );
            state.paddle2.move_by(delta);
        }
        ControllerKind::Human => {
            let step = state.paddle2.speed;
            if input.paddle2_up {
                state.paddle2.move_by(-step);
            }
            if input.paddle2_down {
                state.paddle2.move_by(step);
            }
        }
    }

    resolve_collisions(
        &mut state.ball,
        &state.paddle1,
        &state.paddle2,
        state.court.height,
        &mut state.events,
    );

    if let Some(scorer) = check_scoring(state) {
        log::info!(
            "{:?} scored: {}-{}",
            scorer,
            state.score.player1,
            state.score.player2
        );
    }

    if let Some(winner) = state.score.winner(WINNING_SCORE) {
        state.phase = GamePhase::GameOver;
        state.winner = Some(winner);
        state.events.emit(GameEvent::MatchWon { winner });
        log::info!(
            "Game over: {:?} wins {}-{}",
            winner,
            state.score.player1,
            state.score.player2
        );
    }
}

/// Award a point if the ball left the court, then park it for the next serve
fn check_scoring(state: &mut GameState) -> Option<Player> {
    let scorer = if state.ball.pos.x < 0.0 {
        Player::Two
    } else if state.ball.pos.x > state.court.width {
        Player::One
    } else {
        return None;
    };

    state.score.award(scorer);
    state.ball.reset();
    state.schedule_serve();
    state.events.emit(GameEvent::Scored { scorer });
    Some(scorer)
}
