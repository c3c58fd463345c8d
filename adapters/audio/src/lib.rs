#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Audio contract for Face Invaders adapters.
//!
//! The world only ever names sounds. This crate routes each sound onto one of
//! three mixer voices, so that sounds sharing a voice cut each other off the
//! way a small hardware mixer does, and forwards volume changes to every
//! voice.

use face_invaders_core::{AudioCue, Event, Sound};
use thiserror::Error;
use tracing::{debug, trace};

/// Number of mixer voices sounds are routed onto.
pub const VOICE_COUNT: usize = 3;

/// Mixer voice index in the range `0..VOICE_COUNT`.
pub type Voice = usize;

/// Voice that plays the given sound.
///
/// Voice 0 carries short gameplay effects, voice 1 the explosions, and
/// voice 2 the menu and session jingles.
#[must_use]
pub const fn voice_for(sound: Sound) -> Voice {
    match sound {
        Sound::Bullet | Sound::Click | Sound::ShipThrust => 0,
        Sound::ShipExplosion
        | Sound::ExplosionSmall
        | Sound::ExplosionMedium
        | Sound::ExplosionLarge => 1,
        Sound::Continue | Sound::GameOver | Sound::NewShip => 2,
    }
}

/// Playback backend with a fixed set of voices.
pub trait AudioMixer {
    /// Starts `sound` on `voice`, replacing whatever the voice was playing.
    fn play(&mut self, voice: Voice, sound: Sound, looping: bool);

    /// Silences `voice` immediately.
    fn stop(&mut self, voice: Voice);

    /// Lets the sound on `voice` finish its current iteration, then stops.
    fn end(&mut self, voice: Voice);

    /// Sets the output level of `voice` in the range 0.0..=1.0.
    fn set_level(&mut self, voice: Voice, level: f32);
}

/// Errors raised when addressing sounds by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    /// The name does not belong to the sound registry.
    #[error("unknown sound `{0}`")]
    UnknownSound(String),
}

/// Routes named sounds and world audio events onto a mixer.
#[derive(Debug)]
pub struct AudioService<M> {
    mixer: M,
    volume: u8,
}

impl<M: AudioMixer> AudioService<M> {
    /// Wraps `mixer` and applies the initial volume percentage to every voice.
    pub fn new(mixer: M, volume: u8) -> Self {
        let mut service = Self { mixer, volume: 0 };
        service.set_volume(volume);
        service
    }

    /// Plays the sound registered under `name`.
    pub fn play(&mut self, name: &str, looping: bool) -> Result<(), AudioError> {
        let sound = lookup(name)?;
        self.cue(AudioCue::Play { sound, looping });
        Ok(())
    }

    /// Stops the voice carrying the sound registered under `name`.
    pub fn stop(&mut self, name: &str) -> Result<(), AudioError> {
        let sound = lookup(name)?;
        self.cue(AudioCue::Stop { sound });
        Ok(())
    }

    /// Ends the voice carrying the sound registered under `name`.
    pub fn end(&mut self, name: &str) -> Result<(), AudioError> {
        let sound = lookup(name)?;
        self.cue(AudioCue::End { sound });
        Ok(())
    }

    /// Applies a volume percentage to every voice, clamped to 100.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.volume = percent;
        let level = f32::from(percent) / 100.0;
        for voice in 0..VOICE_COUNT {
            self.mixer.set_level(voice, level);
        }
        debug!(percent, "volume applied");
    }

    /// Forwards one cue to the mixer voice of its sound.
    pub fn cue(&mut self, cue: AudioCue) {
        trace!(?cue, "audio cue");
        match cue {
            AudioCue::Play { sound, looping } => self.mixer.play(voice_for(sound), sound, looping),
            AudioCue::Stop { sound } => self.mixer.stop(voice_for(sound)),
            AudioCue::End { sound } => self.mixer.end(voice_for(sound)),
        }
    }

    /// Reacts to the audio related events of one world step.
    pub fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::Audio(cue) => self.cue(*cue),
                Event::VolumeChanged { level } => self.set_volume(*level),
                _ => {}
            }
        }
    }

    /// Current volume percentage.
    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    /// Underlying mixer.
    #[must_use]
    pub const fn mixer(&self) -> &M {
        &self.mixer
    }
}

fn lookup(name: &str) -> Result<Sound, AudioError> {
    Sound::from_name(name).ok_or_else(|| AudioError::UnknownSound(name.to_owned()))
}

/// What a single voice of the [`TracingMixer`] is doing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VoiceState {
    /// Sound last started on the voice, cleared by [`AudioMixer::stop`].
    pub sound: Option<Sound>,
    /// Whether the sound repeats until ended.
    pub looping: bool,
    /// Output level in the range 0.0..=1.0.
    pub level: f32,
}

/// Silent mixer for headless builds that logs every voice operation.
#[derive(Clone, Debug, Default)]
pub struct TracingMixer {
    voices: [VoiceState; VOICE_COUNT],
}

impl TracingMixer {
    /// Creates a mixer with every voice idle and muted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `voice`, or `None` for an index outside the mixer.
    #[must_use]
    pub fn voice(&self, voice: Voice) -> Option<&VoiceState> {
        self.voices.get(voice)
    }
}

impl AudioMixer for TracingMixer {
    fn play(&mut self, voice: Voice, sound: Sound, looping: bool) {
        if let Some(state) = self.voices.get_mut(voice) {
            state.sound = Some(sound);
            state.looping = looping;
            debug!(voice, sound = sound.name(), looping, "voice play");
        }
    }

    fn stop(&mut self, voice: Voice) {
        if let Some(state) = self.voices.get_mut(voice) {
            state.sound = None;
            state.looping = false;
            debug!(voice, "voice stop");
        }
    }

    fn end(&mut self, voice: Voice) {
        if let Some(state) = self.voices.get_mut(voice) {
            // the current iteration still plays out
            state.looping = false;
            debug!(voice, "voice end");
        }
    }

    fn set_level(&mut self, voice: Voice, level: f32) {
        if let Some(state) = self.voices.get_mut(voice) {
            state.level = level.clamp(0.0, 1.0);
        }
    }
}
