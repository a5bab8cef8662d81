use bk_core::playback::{PlaybackState, PlaybackStore};

use crate::error::AudioError;
use crate::player::MUSIC_VOLUME;

/// Seam between the toggle and the playback backend. The real
/// implementation drives the cpal stream thread; tests substitute fakes.
pub trait AudioSink {
    /// Start playback.
    ///
    /// # Errors
    /// Returns [`AudioError::PlaybackRefused`] when the platform declines
    /// to start playback.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stop playback. Infallible — stopping silence is always possible.
    fn pause(&mut self);

    /// Set the output volume fraction.
    fn set_volume(&mut self, volume: f32);

    /// Mute/unmute the output. Mirrors the inverse of the playing flag so
    /// the stream never audibly leaks state before the flag settles.
    fn set_muted(&mut self, muted: bool);
}

/// Sink used when no playback backend could be built (no device, decode
/// failure). Every `play()` refuses, which routes the startup-resume path
/// into its downgrade-and-persist branch.
pub struct RefusingSink {
    reason: String,
}

impl RefusingSink {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl AudioSink for RefusingSink {
    fn play(&mut self) -> Result<(), AudioError> {
        Err(AudioError::PlaybackRefused(self.reason.clone()))
    }

    fn pause(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn set_muted(&mut self, _muted: bool) {}
}

/// Bouton musique flottant : un booléen de lecture, miroité dans le store
/// persistant, pilotant un unique backend audio.
///
/// Volume épinglé à 15% à chaque démarrage de lecture.
pub struct MusicToggle<S: PlaybackStore> {
    playing: bool,
    store: S,
    sink: Box<dyn AudioSink>,
}

impl<S: PlaybackStore> MusicToggle<S> {
    /// New toggle, not yet resumed. Call [`initialize`](Self::initialize)
    /// once after construction.
    #[must_use]
    pub fn new(store: S, sink: Box<dyn AudioSink>) -> Self {
        Self {
            playing: false,
            store,
            sink,
        }
    }

    /// Resume the previous session: read the persisted record and, if it
    /// said playing, try to start playback at the fixed volume.
    ///
    /// A refusal here downgrades the flag to false AND persists the
    /// correction, so the UI never claims to be playing when it silently
    /// is not.
    pub fn initialize(&mut self) {
        if let Some(saved) = self.store.load() {
            self.playing = saved.playing;

            if saved.playing {
                self.sink.set_volume(MUSIC_VOLUME);
                if let Err(e) = self.sink.play() {
                    log::error!("Auto-play was prevented: {e}");
                    self.playing = false;
                    self.store.save(&PlaybackState { playing: false });
                }
            }
        }

        // Initial volume is pinned even when nothing resumes.
        self.sink.set_volume(MUSIC_VOLUME);
        self.sink.set_muted(!self.playing);
    }

    /// User-triggered play/pause. The new flag is persisted
    /// unconditionally; a refused start on this path is only logged, no
    /// rollback. Asymmetric with [`initialize`](Self::initialize) on
    /// purpose.
    pub fn toggle(&mut self) {
        if self.playing {
            self.sink.pause();
        } else {
            self.sink.set_volume(MUSIC_VOLUME);
            if let Err(e) = self.sink.play() {
                log::error!("Play was prevented: {e}");
            }
        }

        self.playing = !self.playing;
        self.sink.set_muted(!self.playing);
        self.store.save(&PlaybackState {
            playing: self.playing,
        });
    }

    /// Current in-memory flag.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory store sharing its record with the test body.
    #[derive(Clone, Default)]
    struct MemoryStore {
        record: Rc<RefCell<Option<PlaybackState>>>,
    }

    impl PlaybackStore for MemoryStore {
        fn load(&self) -> Option<PlaybackState> {
            *self.record.borrow()
        }

        fn save(&self, state: &PlaybackState) {
            *self.record.borrow_mut() = Some(*state);
        }
    }

    #[derive(Default)]
    struct SinkState {
        playing: bool,
        volume: f32,
        muted: bool,
        refuse_play: bool,
    }

    /// Fake sink sharing its state with the test body.
    #[derive(Clone, Default)]
    struct FakeSink {
        state: Rc<RefCell<SinkState>>,
    }

    impl AudioSink for FakeSink {
        fn play(&mut self) -> Result<(), AudioError> {
            let mut s = self.state.borrow_mut();
            if s.refuse_play {
                return Err(AudioError::PlaybackRefused("test refusal".to_string()));
            }
            s.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.state.borrow_mut().playing = false;
        }

        fn set_volume(&mut self, volume: f32) {
            self.state.borrow_mut().volume = volume;
        }

        fn set_muted(&mut self, muted: bool) {
            self.state.borrow_mut().muted = muted;
        }
    }

    fn toggle_with(
        saved: Option<PlaybackState>,
        refuse_play: bool,
    ) -> (MusicToggle<MemoryStore>, MemoryStore, FakeSink) {
        let store = MemoryStore {
            record: Rc::new(RefCell::new(saved)),
        };
        let sink = FakeSink::default();
        sink.state.borrow_mut().refuse_play = refuse_play;
        let toggle = MusicToggle::new(store.clone(), Box::new(sink.clone()));
        (toggle, store, sink)
    }

    #[test]
    fn double_toggle_returns_to_initial_state() {
        let (mut toggle, store, _sink) = toggle_with(None, false);
        toggle.initialize();
        assert!(!toggle.is_playing());

        toggle.toggle();
        assert!(toggle.is_playing());
        assert_eq!(store.load(), Some(PlaybackState { playing: true }));

        toggle.toggle();
        assert!(!toggle.is_playing());
        assert_eq!(store.load(), Some(PlaybackState { playing: false }));
    }

    #[test]
    fn resume_starts_playback_at_fixed_volume() {
        let (mut toggle, _store, sink) = toggle_with(Some(PlaybackState { playing: true }), false);
        toggle.initialize();
        assert!(toggle.is_playing());
        let s = sink.state.borrow();
        assert!(s.playing);
        assert!((s.volume - 0.15).abs() < f32::EPSILON);
        assert!(!s.muted);
    }

    #[test]
    fn refused_resume_downgrades_and_persists_false() {
        let (mut toggle, store, sink) = toggle_with(Some(PlaybackState { playing: true }), true);
        toggle.initialize();
        assert!(!toggle.is_playing());
        assert_eq!(store.load(), Some(PlaybackState { playing: false }));
        assert!(sink.state.borrow().muted);
    }

    #[test]
    fn refused_manual_toggle_still_flips_and_persists() {
        // The manual path has no rollback, so the flag may say playing
        // while the sink stayed silent.
        let (mut toggle, store, sink) = toggle_with(None, true);
        toggle.initialize();
        toggle.toggle();
        assert!(toggle.is_playing());
        assert_eq!(store.load(), Some(PlaybackState { playing: true }));
        assert!(!sink.state.borrow().playing);
    }

    #[test]
    fn muted_mirrors_inverse_of_playing() {
        let (mut toggle, _store, sink) = toggle_with(None, false);
        toggle.initialize();
        assert!(sink.state.borrow().muted);
        toggle.toggle();
        assert!(!sink.state.borrow().muted);
        toggle.toggle();
        assert!(sink.state.borrow().muted);
    }
}
