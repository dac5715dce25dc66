//! Sound cue service.
//!
//! Logic code produces `Cue`s; the engine owns one `AudioManager` per
//! session and turns cues into `AudioEvent`s with a randomized pitch.

use rand::Rng;

use bossrush_core::constants::DEFAULT_PITCH_SPREAD;
use bossrush_core::events::AudioEvent;
use bossrush_core::spec::SoundSpec;

/// A request to play a sound. A cue without a clip is silent.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub sound: Option<SoundSpec>,
    pub base_pitch: f32,
}

impl Cue {
    pub fn new(sound: &Option<SoundSpec>) -> Self {
        Self::pitched(sound, 1.0)
    }

    pub fn pitched(sound: &Option<SoundSpec>, base_pitch: f32) -> Self {
        Self {
            sound: sound.clone(),
            base_pitch,
        }
    }

    pub fn silent() -> Self {
        Self {
            sound: None,
            base_pitch: 1.0,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.sound.is_none()
    }
}

/// Turns cues into playable audio events.
#[derive(Debug, Clone)]
pub struct AudioManager {
    /// Range of the random offset added to every cue's base pitch.
    pitch_spread: (f32, f32),
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH_SPREAD)
    }
}

impl AudioManager {
    pub fn new(pitch_spread: (f32, f32)) -> Self {
        let (a, b) = pitch_spread;
        Self {
            pitch_spread: (a.min(b), a.max(b)),
        }
    }

    pub fn pitch_spread(&self) -> (f32, f32) {
        self.pitch_spread
    }

    /// Returns `None` for silent cues.
    pub fn play<R: Rng>(&self, cue: &Cue, rng: &mut R) -> Option<AudioEvent> {
        let sound = cue.sound.as_ref()?;
        let (lo, hi) = self.pitch_spread;
        let offset = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        Some(AudioEvent {
            clip: sound.clip.clone(),
            volume: sound.volume,
            pitch: cue.base_pitch + offset,
        })
    }
}
