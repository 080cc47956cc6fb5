//! Sound cues for simulation events
//!
//! The core never plays audio. It describes each blip as a short oscillator
//! tone and leaves synthesis to the host.

use serde::Serialize;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallHit,
    /// Someone scored
    Score,
}

impl SoundEffect {
    /// Effect for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::MatchWon { .. } => None,
        }
    }

    /// Oscillator settings for this effect at full volume
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::PaddleHit => Tone {
                frequency_hz: 200.0,
                gain: 0.1,
                decay_secs: 0.1,
                duration_secs: 0.3,
            },
            SoundEffect::WallHit => Tone {
                frequency_hz: 150.0,
                gain: 0.1,
                decay_secs: 0.1,
                duration_secs: 0.3,
            },
            SoundEffect::Score => Tone {
                frequency_hz: 400.0,
                gain: 0.2,
                decay_secs: 0.3,
                duration_secs: 0.3,
            },
        }
    }
}

/// A single oscillator blip: start at `gain`, ramp down over `decay_secs`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub gain: f32,
    pub decay_secs: f32,
    /// When the oscillator stops
    pub duration_secs: f32,
}

/// Turns per-tick events into tones, honoring mute and volume
#[derive(Debug, Clone)]
pub struct AudioCues {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioCues {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AudioCues {
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            master_volume: 1.0,
            muted: !sound_enabled,
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Tones to play for this tick's events (empty when muted)
    pub fn cues(&self, events: &[GameEvent]) -> Vec<(SoundEffect, Tone)> {
        if self.muted || self.master_volume <= 0.0 {
            return Vec::new();
        }

        events
            .iter()
            .filter_map(SoundEffect::for_event)
            .map(|effect| {
                let mut tone = effect.tone();
                tone.gain *= self.master_volume;
                (effect, tone)
            })
            .collect()
    }
}
