//! Collision detection and response
//!
//! Ball vs paddle is a discrete AABB overlap test run once per tick after the
//! ball has moved. A ball that sinks partway into a paddle during one step is
//! still caught, then pushed back out in front of the face it hit.

use glam::Vec2;
use serde::Serialize;

use super::state::{Ball, EventSink, GameEvent, Paddle, Side};
use crate::clamp_velocity;
use crate::consts::{MAX_VELOCITY, PADDLE_BOOST, SPIN_FACTOR};

/// Axis-aligned rectangle (`pos` is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x <= other.right()
            && self.right() >= other.pos.x
            && self.pos.y <= other.bottom()
            && self.bottom() >= other.pos.y
    }
}

/// Whether the ball's bounding square touches the paddle
pub fn ball_paddle_overlap(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bounds().overlaps(&paddle.rect())
}

/// Offset of the ball from the paddle center, used as spin
///
/// Normalized by half the paddle *width*, so off-center hits give values far
/// outside [-1, 1]; the velocity clamp keeps the result bounded.
pub fn collision_point(ball: &Ball, paddle: &Paddle) -> f32 {
    (ball.pos.y - paddle.center_y()) / (paddle.width / 2.0)
}

/// Bounce the ball off a paddle if they overlap. Returns true on a hit.
pub fn resolve_paddle_collision(ball: &mut Ball, paddle: &Paddle, sink: &mut impl EventSink) -> bool {
    if !ball_paddle_overlap(ball, paddle) {
        return false;
    }

    let spin = collision_point(ball, paddle);

    ball.vel.x = -ball.vel.x;
    ball.vel.y += spin * SPIN_FACTOR;
    ball.vel *= PADDLE_BOOST;
    ball.vel = clamp_velocity(ball.vel, MAX_VELOCITY);

    // Move the ball in front of the paddle face so it can't re-trigger
    ball.pos.x = match paddle.side {
        Side::Left => paddle.pos.x + paddle.width + ball.radius,
        Side::Right => paddle.pos.x - ball.radius,
    };

    sink.emit(GameEvent::PaddleHit { side: paddle.side });
    true
}

/// Full collision pass for one tick: left paddle, right paddle, then walls
pub fn resolve_collisions(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    court_height: f32,
    sink: &mut impl EventSink,
) {
    resolve_paddle_collision(ball, left, sink);
    resolve_paddle_collision(ball, right, sink);
    ball.resolve_wall_collision(court_height, sink);
}
