//! Computer opponent
//!
//! Predicts where the ball will cross the paddle's x (straight line, folded
//! off the walls), aims there with difficulty-scaled noise, and moves at most
//! one capped step per decision. Decisions are rate limited by a reaction time.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::consts::AI_NOISE_SPREAD;
use crate::fold_into_range;

/// AI strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> AiProfile {
        match self {
            Difficulty::Easy => AiProfile {
                reaction_time_ms: 200.0,
                accuracy: 0.6,
                speed_multiplier: 0.7,
            },
            Difficulty::Medium => AiProfile {
                reaction_time_ms: 100.0,
                accuracy: 0.8,
                speed_multiplier: 1.0,
            },
            Difficulty::Hard => AiProfile {
                reaction_time_ms: 50.0,
                accuracy: 0.95,
                speed_multiplier: 1.3,
            },
        }
    }
}

/// Tuning derived from a difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Minimum time between two decisions
    pub reaction_time_ms: f64,
    /// 1.0 aims exactly at the predicted impact
    pub accuracy: f32,
    /// Scales the paddle's per-decision step
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone)]
pub struct AiController {
    pub difficulty: Difficulty,
    pub profile: AiProfile,
    last_decision_ms: Option<f64>,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            profile: difficulty.profile(),
            last_decision_ms: None,
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
    }

    /// Time of the last decision that was allowed through the reaction gate
    pub fn last_decision_ms(&self) -> Option<f64> {
        self.last_decision_ms
    }

    /// Largest move one decision may produce for this paddle
    pub fn max_step(&self, paddle: &Paddle) -> f32 {
        paddle.speed * self.profile.speed_multiplier
    }

    /// Vertical delta to apply to `paddle` at time `now_ms` (0 while reacting)
    pub fn decide(
        &mut self,
        ball: &Ball,
        paddle: &Paddle,
        court_height: f32,
        now_ms: f64,
        rng: &mut impl Rng,
    ) -> f32 {
        if let Some(last) = self.last_decision_ms {
            if now_ms - last < self.profile.reaction_time_ms {
                return 0.0;
            }
        }
        self.last_decision_ms = Some(now_ms);

        let predicted_y = predict_impact_y(ball, paddle, court_height);
        let noise = (rng.random::<f32>() - 0.5) * (1.0 - self.profile.accuracy) * AI_NOISE_SPREAD;
        let target_y = predicted_y + noise;

        let difference = target_y - paddle.center_y();
        if !difference.is_finite() {
            return 0.0;
        }
        // sign(difference) * min(|difference|, cap)
        let cap = self.max_step(paddle);
        difference.clamp(-cap, cap)
    }
}

/// Where the ball's center will be when it reaches the paddle's x
///
/// Straight-line projection that ignores the other paddle; wall bounces are
/// folded in. Returns the ball's current y when it is not approaching.
pub fn predict_impact_y(ball: &Ball, paddle: &Paddle, court_height: f32) -> f32 {
    if ball.vel.x == 0.0 || !ball.vel.x.is_finite() {
        return ball.pos.y;
    }

    let time_to_reach = (paddle.pos.x - ball.pos.x) / ball.vel.x;
    if time_to_reach <= 0.0 || !time_to_reach.is_finite() {
        return ball.pos.y;
    }

    let projected = ball.pos.y + ball.vel.y * time_to_reach;
    fold_into_range(projected, court_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{ControllerKind, Court, Side};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ai_paddle() -> Paddle {
        Paddle::new(Side::Right, ControllerKind::Ai, 80.0, Court::default())
    }

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Ball {
        let mut ball = Ball::new(Court::default().center());
        ball.pos = Vec2::new(x, y);
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_difficulty_table() {
        let hard = Difficulty::Hard.profile();
        assert_eq!(hard.reaction_time_ms, 50.0);
        assert_eq!(hard.accuracy, 0.95);
        assert_eq!(hard.speed_multiplier, 1.3);

        let easy = Difficulty::Easy.profile();
        assert_eq!(easy.reaction_time_ms, 200.0);
        assert_eq!(easy.accuracy, 0.6);
        assert_eq!(easy.speed_multiplier, 0.7);

        assert_eq!(Difficulty::Medium.profile().reaction_time_ms, 100.0);
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
    }

    #[test]
    fn test_set_difficulty() {
        let mut ai = AiController::new(Difficulty::Easy);
        ai.set_difficulty(Difficulty::Hard);
        assert_eq!(ai.difficulty, Difficulty::Hard);
        assert_eq!(ai.profile, Difficulty::Hard.profile());
    }

    #[test]
    fn test_reaction_gate() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ai = AiController::new(Difficulty::Hard);
        let paddle = ai_paddle();
        // Heading for the bottom of the court, far from the paddle center
        let ball = ball_at(400.0, 380.0, Vec2::new(5.0, 0.0));

        let first = ai.decide(&ball, &paddle, COURT_HEIGHT, 1000.0, &mut rng);
        assert!((first - 8.0 * 1.3).abs() < 1e-4);

        let second = ai.decide(&ball, &paddle, COURT_HEIGHT, 1030.0, &mut rng);
        assert_eq!(second, 0.0);
        // A gated call leaves the timestamp alone
        assert_eq!(ai.last_decision_ms(), Some(1000.0));

        let third = ai.decide(&ball, &paddle, COURT_HEIGHT, 1050.0, &mut rng);
        assert!(third > 0.0);
        assert_eq!(ai.last_decision_ms(), Some(1050.0));
    }

    #[test]
    fn test_moves_up_toward_high_ball() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ai = AiController::new(Difficulty::Easy);
        let paddle = ai_paddle();
        let ball = ball_at(400.0, 20.0, Vec2::new(5.0, 0.0));

        let delta = ai.decide(&ball, &paddle, COURT_HEIGHT, 0.0, &mut rng);
        assert!((delta + 8.0 * 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_small_difference_does_not_overshoot() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ai = AiController::new(Difficulty::Hard);
        let paddle = ai_paddle();
        // Ball level with the paddle center; only noise (at most 2.5px) remains
        let ball = ball_at(400.0, paddle.center_y(), Vec2::new(5.0, 0.0));

        let delta = ai.decide(&ball, &paddle, COURT_HEIGHT, 0.0, &mut rng);
        assert!(delta.abs() <= 2.5 + 1e-4);
    }

    #[test]
    fn test_predict_straight() {
        let paddle = ai_paddle();
        // 360px to travel at 5px/tick = 72 ticks, +1px/tick
        let ball = ball_at(400.0, 100.0, Vec2::new(5.0, 1.0));
        assert!((predict_impact_y(&ball, &paddle, COURT_HEIGHT) - 172.0).abs() < 1e-3);
    }

    #[test]
    fn test_predict_with_bounce() {
        let paddle = ai_paddle();
        // Projects to 560, one bounce off the bottom -> 240
        let ball = ball_at(400.0, 200.0, Vec2::new(5.0, 5.0));
        assert!((predict_impact_y(&ball, &paddle, COURT_HEIGHT) - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_predict_moving_away_or_stopped() {
        let paddle = ai_paddle();
        let away = ball_at(400.0, 123.0, Vec2::new(-5.0, 3.0));
        assert_eq!(predict_impact_y(&away, &paddle, COURT_HEIGHT), 123.0);

        let stopped = ball_at(400.0, 200.0, Vec2::ZERO);
        assert_eq!(predict_impact_y(&stopped, &paddle, COURT_HEIGHT), 200.0);

        let past = ball_at(790.0, 50.0, Vec2::new(5.0, 3.0));
        assert_eq!(predict_impact_y(&past, &paddle, COURT_HEIGHT), 50.0);
    }

    proptest! {
        #[test]
        fn prop_prediction_in_court(
            x in 0.0f32..750.0,
            y in 0.0f32..400.0,
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
        ) {
            let paddle = ai_paddle();
            let ball = ball_at(x, y, Vec2::new(vx, vy));
            let predicted = predict_impact_y(&ball, &paddle, COURT_HEIGHT);
            prop_assert!((0.0..=COURT_HEIGHT).contains(&predicted));
        }

        #[test]
        fn prop_move_within_cap(
            seed in any::<u64>(),
            level in 0usize..3,
            y in 0.0f32..400.0,
            vx in -12.0f32..12.0,
            vy in -12.0f32..12.0,
        ) {
            let difficulty = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard][level];
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ai = AiController::new(difficulty);
            let paddle = ai_paddle();
            let ball = ball_at(400.0, y, Vec2::new(vx, vy));
            let delta = ai.decide(&ball, &paddle, COURT_HEIGHT, 0.0, &mut rng);
            prop_assert!(delta.abs() <= ai.max_step(&paddle) + 1e-4);
        }
    }
}
