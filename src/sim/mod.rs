//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Clock supplied by the caller through `tick`
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod state;
pub mod tick;

pub use ai::{AiController, AiProfile, Difficulty, predict_impact_y};
pub use collision::{Rect, ball_paddle_overlap, resolve_collisions, resolve_paddle_collision};
pub use state::{
    Ball, ControllerKind, Court, EventSink, GameEvent, GameMode, GamePhase, GameState, Paddle,
    Player, ScheduledServe, Score, Side, Snapshot,
};
pub use tick::{TickInput, tick};
