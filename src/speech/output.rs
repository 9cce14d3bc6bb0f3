//! Speech output controller: speaks finished replies aloud unless muted.

use super::voice::{select_voice, Voice};
use crate::Result;
use tracing::{debug, warn};

/// One request to the synthesis platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` means the platform default voice.
    pub voice: Option<Voice>,
    pub pitch: f32,
    pub rate: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, voice: Option<Voice>) -> Self {
        Self {
            text: text.into(),
            voice,
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

/// Narrow contract over the platform speech-synthesis engine.
///
/// The voice list may be empty until the platform populates it; the
/// owner is notified of that through a one-shot voices-changed signal.
pub trait SynthesisBackend: Send {
    fn voices(&self) -> Vec<Voice>;
    fn speak(&mut self, utterance: Utterance) -> Result<()>;
    fn cancel(&mut self);

    /// True when the platform voice list changed since the last call.
    /// Polled once per frame; backends without asynchronous voice
    /// loading keep the default.
    fn poll_voices_changed(&mut self) -> bool {
        false
    }
}

/// Backend for platforms without a synthesis engine. Replies stay text-only.
#[derive(Debug, Default)]
pub struct NullSynthesizer;

impl SynthesisBackend for NullSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, _utterance: Utterance) -> Result<()> {
        Ok(())
    }

    fn cancel(&mut self) {}
}

/// Wraps the synthesis backend with mute state, last-write-wins
/// cancellation, and the deferred startup greeting.
pub struct SpeechOutput {
    backend: Box<dyn SynthesisBackend>,
    preferred_voice: String,
    muted: bool,
    pending_greeting: Option<String>,
}

impl SpeechOutput {
    pub fn new(backend: Box<dyn SynthesisBackend>, preferred_voice: impl Into<String>) -> Self {
        Self {
            backend,
            preferred_voice: preferred_voice.into(),
            muted: false,
            pending_greeting: None,
        }
    }

    /// Speak `text`, canceling any previous utterance first. No-op while
    /// muted. The voice is selected per utterance because the platform
    /// list can change between calls.
    pub fn speak(&mut self, text: &str) {
        if self.muted || text.is_empty() {
            return;
        }

        self.backend.cancel();

        let voices = self.backend.voices();
        let voice = select_voice(&voices, &self.preferred_voice).cloned();
        debug!("speaking {} chars with voice {:?}", text.len(), voice);

        if let Err(e) = self.backend.speak(Utterance::new(text, voice)) {
            warn!("speech synthesis failed: {}", e);
        }
    }

    /// Speak the startup greeting once. If the platform has not loaded
    /// its voices yet, the greeting is held until [`on_voices_changed`]
    /// fires; it fires at most once either way.
    ///
    /// [`on_voices_changed`]: Self::on_voices_changed
    pub fn greet(&mut self, text: &str) {
        if self.backend.voices().is_empty() {
            self.pending_greeting = Some(text.to_string());
        } else {
            self.speak(text);
        }
    }

    /// One-shot voices-changed notification. Consumes the pending
    /// greeting so later list changes never repeat it.
    pub fn on_voices_changed(&mut self) {
        if let Some(text) = self.pending_greeting.take() {
            self.speak(&text);
        }
    }

    /// Per-frame poll: forwards the backend's voices-changed signal to
    /// [`on_voices_changed`].
    ///
    /// [`on_voices_changed`]: Self::on_voices_changed
    pub fn poll(&mut self) {
        if self.backend.poll_voices_changed() {
            self.on_voices_changed();
        }
    }

    /// Toggle the sticky mute flag. Muting cancels current speech.
    pub fn toggle_mute(&mut self) {
        if !self.muted {
            self.backend.cancel();
        }
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Cancel any in-progress utterance (user interruption).
    pub fn cancel(&mut self) {
        self.backend.cancel();
    }

    /// Cancel speech and drop pending work at application teardown.
    pub fn shutdown(&mut self) {
        self.backend.cancel();
        self.pending_greeting = None;
    }
}
