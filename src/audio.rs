//! Audio cues
//!
//! Fire-and-forget: the simulation raises [`GameEvent`]s, the host maps them
//! to sound effects here. Backend failures are logged and swallowed so
//! audio can never affect a run.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::{CoilRange, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Shadow raze, one per range
    RazeClose,
    RazeMedium,
    RazeFar,
    /// Soul or rune picked up
    Collect,
    /// Run-ending obstacle contact
    Collision,
    /// Requiem cast
    Requiem,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoilCast(CoilRange::Close) => Some(SoundEffect::RazeClose),
            GameEvent::CoilCast(CoilRange::Medium) => Some(SoundEffect::RazeMedium),
            GameEvent::CoilCast(CoilRange::Far) => Some(SoundEffect::RazeFar),
            GameEvent::SoulCollected | GameEvent::RuneCollected(_) => Some(SoundEffect::Collect),
            GameEvent::Collision => Some(SoundEffect::Collision),
            GameEvent::UltimateActivated => Some(SoundEffect::Requiem),
            _ => None,
        }
    }

    /// Playback rate (razes are sped up for punch)
    pub fn playback_rate(&self) -> f32 {
        match self {
            SoundEffect::RazeClose | SoundEffect::RazeMedium | SoundEffect::RazeFar => 1.5,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend unavailable")]
    Unavailable,
    #[error("failed to play {effect:?}: {reason}")]
    Playback { effect: SoundEffect, reason: String },
}

/// A platform audio backend
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32, rate: f32) -> Result<(), AudioError>;
    fn pause_music(&mut self) -> Result<(), AudioError>;
    fn resume_music(&mut self, volume: f32) -> Result<(), AudioError>;
}

/// Backend that plays nothing (headless runs, missing audio device)
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, effect: SoundEffect, _volume: f32, _rate: f32) -> Result<(), AudioError> {
        log::trace!("(silent) {effect:?}");
        Ok(())
    }

    fn pause_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn resume_music(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    sfx_volume: f32,
    music_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentSink), &Settings::default())
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, settings: &Settings) -> Self {
        Self {
            sink,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    /// Re-read volumes after a settings change
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
    }

    /// Play a sound effect, swallowing failures
    pub fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play(effect, self.sfx_volume, effect.playback_rate()) {
            log::debug!("Could not play sound: {e}");
        }
    }

    /// React to one tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            let result = match event {
                GameEvent::Paused => self.sink.pause_music(),
                GameEvent::Started | GameEvent::Resumed | GameEvent::Restarted => {
                    self.sink.resume_music(self.music_volume)
                }
                other => {
                    if let Some(effect) = SoundEffect::for_event(other) {
                        self.play(effect);
                    }
                    Ok(())
                }
            };
            if let Err(e) = result {
                log::debug!("Could not control background music: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records plays and fails every other call
    #[derive(Default)]
    struct FlakySink {
        played: Rc<RefCell<Vec<SoundEffect>>>,
        calls: u32,
    }

    impl AudioSink for FlakySink {
        fn play(&mut self, effect: SoundEffect, _volume: f32, _rate: f32) -> Result<(), AudioError> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                return Err(AudioError::Playback {
                    effect,
                    reason: "device busy".into(),
                });
            }
            self.played.borrow_mut().push(effect);
            Ok(())
        }

        fn pause_music(&mut self) -> Result<(), AudioError> {
            Err(AudioError::Unavailable)
        }

        fn resume_music(&mut self, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::Unavailable)
        }
    }

    #[test]
    fn test_events_map_to_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::CoilCast(CoilRange::Far)),
            Some(SoundEffect::RazeFar)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::UltimateReady), None);
        assert_eq!(SoundEffect::RazeClose.playback_rate(), 1.5);
    }

    #[test]
    fn test_failures_are_swallowed() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = FlakySink {
            played: Rc::clone(&played),
            calls: 0,
        };
        let mut audio = AudioManager::new(Box::new(sink), &Settings::default());
        audio.handle_events(&[
            GameEvent::Started,
            GameEvent::SoulCollected,
            GameEvent::Collision,
            GameEvent::Paused,
            GameEvent::UltimateActivated,
        ]);
        assert_eq!(
            *played.borrow(),
            vec![SoundEffect::Collect, SoundEffect::Requiem]
        );
    }

    #[test]
    fn test_muted_manager_skips_the_backend() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = FlakySink {
            played: Rc::clone(&played),
            calls: 0,
        };
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::new(Box::new(sink), &settings);
        audio.play(SoundEffect::Collect);
        assert!(played.borrow().is_empty());
    }
}
