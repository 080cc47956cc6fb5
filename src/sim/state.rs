//! Game state and core simulation types
//!
//! One `GameState` is one play session: it owns the ball, both paddles, the AI
//! and the RNG, and is driven forward by [`super::tick`].

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{AiController, Difficulty};
use super::collision::Rect;
use crate::Settings;
use crate::consts::*;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No match running; waiting for a start command
    Menu,
    /// Active gameplay
    Playing,
    /// Ticks suspended
    Paused,
    /// A player reached the winning score
    GameOver,
}

/// Who controls the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Player vs computer
    #[default]
    Single,
    /// Two humans sharing the host's input
    TwoPlayer,
}

/// How a paddle receives its movement each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    Human,
    Ai,
}

/// Court side a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Match participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    /// Left paddle
    One,
    /// Right paddle (computer in single mode)
    Two,
}

/// Something the host may want to react to (sound, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit { side: Side },
    WallHit,
    Scored { scorer: Player },
    MatchWon { winner: Player },
}

/// Receiver for events raised while resolving a tick
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Playing field extents (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub width: f32,
    pub height: f32,
}

impl Default for Court {
    fn default() -> Self {
        Self {
            width: COURT_WIDTH,
            height: COURT_HEIGHT,
        }
    }
}

impl Court {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Where `reset` puts the ball
    pub start: Vec2,
    /// Recent positions for rendering (oldest first)
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    /// Create a ball at rest at `start`
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            start,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Move one fixed step and record the new position in the trail
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Bounce off the top or bottom wall. Returns true on contact.
    pub fn resolve_wall_collision(&mut self, court_height: f32, sink: &mut impl EventSink) -> bool {
        let hit_top = self.pos.y - self.radius <= 0.0;
        let hit_bottom = self.pos.y + self.radius >= court_height;
        if !hit_top && !hit_bottom {
            return false;
        }

        self.vel.y = -self.vel.y;
        // Snap to the boundary so the ball can't stick inside the wall
        self.pos.y = if hit_top {
            self.radius
        } else {
            court_height - self.radius
        };
        sink.emit(GameEvent::WallHit);
        true
    }

    /// Back to the start position, at rest, with no trail
    pub fn reset(&mut self) {
        self.pos = self.start;
        self.vel = Vec2::ZERO;
        self.trail.clear();
    }

    /// Give the ball its serve velocity: random horizontal direction, small vertical drift
    pub fn serve(&mut self, speed: f32, rng: &mut impl Rng) {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let drift = (rng.random::<f32>() - 0.5) * SERVE_VY_SPREAD;
        self.vel = Vec2::new(direction * speed, drift);
    }

    /// Bounding square used for collision tests
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos - Vec2::splat(self.radius),
            Vec2::splat(self.radius * 2.0),
        )
    }
}

/// A paddle; `pos` is its top-left corner
#[derive(Debug, Clone)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub side: Side,
    pub controller: ControllerKind,
    court_height: f32,
}

impl Paddle {
    /// Create a vertically centered paddle on the given side of the court
    pub fn new(side: Side, controller: ControllerKind, height: f32, court: Court) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => court.width - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            pos: Vec2::new(x, court.height / 2.0 - height / 2.0),
            width: PADDLE_WIDTH,
            height,
            speed: PADDLE_SPEED,
            side,
            controller,
            court_height: court.height,
        }
    }

    /// Highest legal y for the top edge
    pub fn max_y(&self) -> f32 {
        (self.court_height - self.height).max(0.0)
    }

    /// Place the top edge at `target_y`, clamped to the court
    pub fn move_to(&mut self, target_y: f32) {
        if target_y.is_nan() {
            return;
        }
        self.pos.y = target_y.clamp(0.0, self.max_y());
    }

    pub fn move_by(&mut self, delta_y: f32) {
        self.move_to(self.pos.y + delta_y);
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(self.width, self.height))
    }
}

/// Points per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player1 += 1,
            Player::Two => self.player2 += 1,
        }
    }

    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Winner once either score reaches `winning_score` (player 1 checked first)
    pub fn winner(&self, winning_score: u32) -> Option<Player> {
        if self.player1 >= winning_score {
            Some(Player::One)
        } else if self.player2 >= winning_score {
            Some(Player::Two)
        } else {
            None
        }
    }
}

/// A serve waiting for the post-score delay to elapse
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledServe {
    pub due_ms: f64,
    /// Match generation that scheduled it; stale generations are ignored
    pub generation: u64,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Only meaningful against the computer
    pub difficulty: Option<Difficulty>,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub trail: Vec<Vec2>,
    pub paddle1: Rect,
    pub paddle2: Rect,
    pub score: Score,
    pub winner: Option<Player>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Settings applied at the next start/restart
    pub settings: Settings,
    pub court: Court,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub score: Score,
    pub winner: Option<Player>,
    pub ball: Ball,
    /// Left paddle, pointer driven
    pub paddle1: Paddle,
    /// Right paddle, AI or keyboard driven depending on mode
    pub paddle2: Paddle,
    pub ai: AiController,
    /// Simulation clock (advances only while ticks run)
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    generation: u64,
    pending_serves: Vec<ScheduledServe>,
}

impl GameState {
    /// Create a session sitting in the menu
    pub fn new(settings: Settings, seed: u64) -> Self {
        let court = Court::default();
        let mode = GameMode::default();
        let difficulty = Difficulty::default();
        let height = settings.paddle_size.height();
        Self {
            seed,
            settings,
            court,
            phase: GamePhase::Menu,
            mode,
            difficulty,
            score: Score::default(),
            winner: None,
            ball: Ball::new(court.center()),
            paddle1: Paddle::new(Side::Left, ControllerKind::Human, height, court),
            paddle2: Paddle::new(Side::Right, Self::right_controller(mode), height, court),
            ai: AiController::new(difficulty),
            clock_ms: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            pending_serves: Vec::new(),
        }
    }

    fn right_controller(mode: GameMode) -> ControllerKind {
        match mode {
            GameMode::Single => ControllerKind::Ai,
            GameMode::TwoPlayer => ControllerKind::Human,
        }
    }

    /// Current match generation (bumped by start, restart and quit)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Serves still waiting to fire
    pub fn pending_serves(&self) -> &[ScheduledServe] {
        &self.pending_serves
    }

    /// Replace settings; they are read at the next start/restart
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Begin a fresh match. Valid from any phase.
    pub fn start(&mut self, mode: GameMode, difficulty: Difficulty) {
        self.mode = mode;
        self.difficulty = difficulty;
        self.generation += 1;
        self.score = Score::default();
        self.winner = None;
        self.events.clear();

        let height = self.settings.paddle_size.height();
        self.ball = Ball::new(self.court.center());
        self.paddle1 = Paddle::new(Side::Left, ControllerKind::Human, height, self.court);
        self.paddle2 = Paddle::new(Side::Right, Self::right_controller(mode), height, self.court);
        self.ai = AiController::new(difficulty);

        let speed = self.settings.ball_speed.serve_speed();
        self.ball.serve(speed, &mut self.rng);
        self.phase = GamePhase::Playing;

        log::info!(
            "Match {} started: mode={:?} difficulty={:?} ball_speed={} paddle={}",
            self.generation,
            mode,
            difficulty,
            self.settings.ball_speed.as_str(),
            self.settings.paddle_size.as_str()
        );
    }

    /// Suspend ticks. Only valid while playing.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            log::debug!("Ignoring pause in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Paused;
        true
    }

    /// Continue a paused match
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            log::debug!("Ignoring resume in {:?}", self.phase);
            return false;
        }
        self.phase = GamePhase::Playing;
        true
    }

    /// Start over with the same mode and difficulty
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        self.start(self.mode, self.difficulty);
        true
    }

    /// Abandon the current match and return to the menu
    pub fn quit_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            log::debug!("Ignoring quit in {:?}", self.phase);
            return false;
        }
        self.generation += 1;
        self.phase = GamePhase::Menu;
        log::info!("Returned to menu at {}-{}", self.score.player1, self.score.player2);
        true
    }

    /// Queue the next serve after the post-score delay
    pub(crate) fn schedule_serve(&mut self) {
        self.pending_serves.push(ScheduledServe {
            due_ms: self.clock_ms + REARM_DELAY_MS,
            generation: self.generation,
        });
    }

    /// Fire serves whose delay has elapsed; serves from older matches are dropped
    pub(crate) fn fire_due_serves(&mut self) {
        let now = self.clock_ms;
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_serves)
            .into_iter()
            .partition(|serve| serve.due_ms <= now);
        self.pending_serves = waiting;

        for serve in due {
            if serve.generation != self.generation {
                log::debug!(
                    "Dropping stale serve from match {} (current {})",
                    serve.generation,
                    self.generation
                );
                continue;
            }
            let speed = self.settings.ball_speed.serve_speed();
            self.ball.serve(speed, &mut self.rng);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            mode: self.mode,
            difficulty: match self.mode {
                GameMode::Single => Some(self.difficulty),
                GameMode::TwoPlayer => None,
            },
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            trail: self.ball.trail.iter().copied().collect(),
            paddle1: self.paddle1.rect(),
            paddle2: self.paddle2.rect(),
            score: self.score,
            winner: self.winner,
        }
    }
}
