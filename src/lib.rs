//! Neon Pong - classic two-paddle arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, collisions, AI, match flow)
//! - `settings`: Player-facing configuration read at match start
//! - `audio`: Maps simulation events to sound cues for the host to play

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioCues, SoundEffect, Tone};
pub use settings::{BallSpeed, PaddleSize, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration in milliseconds (one tick per 60 Hz frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 800.0;
    pub const COURT_HEIGHT: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Per-axis velocity cap after a paddle hit
    pub const MAX_VELOCITY: f32 = 12.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.05;
    /// Vertical velocity added per unit of collision point
    pub const SPIN_FACTOR: f32 = 2.0;
    /// Spread of the vertical serve velocity
    pub const SERVE_VY_SPREAD: f32 = 4.0;
    /// Number of past positions kept for the ball trail
    pub const TRAIL_LENGTH: usize = 10;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the left wall to the left paddle's face
    pub const PADDLE_MARGIN: f32 = 30.0;

    /// Match rules
    pub const WINNING_SCORE: u32 = 11;
    /// Delay between a score and the next serve
    pub const REARM_DELAY_MS: f64 = 1000.0;

    /// AI inaccuracy spread in pixels at zero accuracy
    pub const AI_NOISE_SPREAD: f32 = 100.0;
}

/// Clamp each velocity component into [-max, max]
#[inline]
pub fn clamp_velocity(vel: Vec2, max: f32) -> Vec2 {
    vel.clamp(Vec2::splat(-max), Vec2::splat(max))
}

/// Fold a coordinate into [0, extent] as if it bounced off both ends
///
/// Equivalent to mirroring at 0 and `extent` until the value lands in range,
/// computed in closed form so huge projections stay cheap.
#[inline]
pub fn fold_into_range(value: f32, extent: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    if value.is_infinite() || extent <= 0.0 {
        return value.clamp(0.0, extent.max(0.0));
    }
    let period = 2.0 * extent;
    let wrapped = value.rem_euclid(period);
    if wrapped > extent {
        period - wrapped
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_velocity() {
        let v = clamp_velocity(Vec2::new(15.0, -20.0), 12.0);
        assert_eq!(v, Vec2::new(12.0, -12.0));

        let v = clamp_velocity(Vec2::new(3.0, -4.0), 12.0);
        assert_eq!(v, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_fold_into_range() {
        assert_eq!(fold_into_range(150.0, 400.0), 150.0);
        // One bounce off the top
        assert_eq!(fold_into_range(-50.0, 400.0), 50.0);
        // One bounce off the bottom
        assert_eq!(fold_into_range(450.0, 400.0), 350.0);
        // Bottom then top
        assert_eq!(fold_into_range(850.0, 400.0), 50.0);
        assert_eq!(fold_into_range(400.0, 400.0), 400.0);
    }

    #[test]
    fn test_fold_into_range_degenerate() {
        assert_eq!(fold_into_range(f32::INFINITY, 400.0), 400.0);
        assert_eq!(fold_into_range(10.0, 0.0), 0.0);
    }
}
