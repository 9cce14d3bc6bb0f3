//! Speech input controller: toggles voice dictation into the composer.

use crate::Result;
use tracing::{debug, warn};

/// Dictation state. There are no intermediate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenState {
    Idle,
    Listening,
}

/// Platform error code for a rejected microphone permission.
pub const ERROR_NOT_ALLOWED: &str = "not-allowed";

/// One terminal signal per recognition session.
#[derive(Debug, Clone)]
pub enum RecognitionEvent {
    /// A transcript was recognized
    Result(String),
    /// Recognition failed with a platform error code
    Error(String),
    /// The platform ended the session on its own
    End,
}

/// Narrow contract over the platform speech-recognition engine.
pub trait RecognitionBackend: Send {
    fn is_supported(&self) -> bool;
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
}

/// Backend for platforms without a recognition engine; every toggle is
/// rejected with the not-supported notice.
#[derive(Debug, Default)]
pub struct UnsupportedRecognizer;

impl RecognitionBackend for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}

/// Blocking user-visible notice raised by the input controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputNotice {
    NotSupported,
    PermissionDenied,
}

impl InputNotice {
    pub fn message(&self) -> &'static str {
        match self {
            InputNotice::NotSupported => "Voice input is not supported on this device.",
            InputNotice::PermissionDenied => {
                "Microphone access was denied. Please allow microphone access \
                 in your system settings to use voice input."
            }
        }
    }
}

/// What a recognition event produced for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationOutcome {
    /// Recognized text, to be appended to the pending draft
    Transcript(String),
    /// A blocking notice for the user
    Notice(InputNotice),
}

/// Drives one recognition session at a time over the backend.
pub struct SpeechInput {
    backend: Box<dyn RecognitionBackend>,
    state: ListenState,
}

impl SpeechInput {
    pub fn new(backend: Box<dyn RecognitionBackend>) -> Self {
        Self {
            backend,
            state: ListenState::Idle,
        }
    }

    pub fn state(&self) -> ListenState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == ListenState::Listening
    }

    /// Toggle dictation. Toggling while listening stops the session;
    /// toggling on an unsupported platform raises a blocking notice and
    /// leaves the state idle.
    pub fn toggle(&mut self) -> Option<InputNotice> {
        match self.state {
            ListenState::Listening => {
                self.backend.stop();
                self.state = ListenState::Idle;
                debug!("dictation stopped by user");
                None
            }
            ListenState::Idle => {
                if !self.backend.is_supported() {
                    return Some(InputNotice::NotSupported);
                }
                match self.backend.start() {
                    Ok(()) => {
                        self.state = ListenState::Listening;
                        debug!("dictation started");
                        None
                    }
                    Err(e) => {
                        warn!("failed to start recognition: {}", e);
                        None
                    }
                }
            }
        }
    }

    /// Apply one platform event. Every event returns the controller to
    /// idle; only results and permission errors produce an outcome.
    pub fn on_event(&mut self, event: RecognitionEvent) -> Option<DictationOutcome> {
        self.state = ListenState::Idle;

        match event {
            RecognitionEvent::Result(transcript) => {
                Some(DictationOutcome::Transcript(transcript))
            }
            RecognitionEvent::Error(code) => {
                warn!("recognition error: {}", code);
                if code == ERROR_NOT_ALLOWED {
                    Some(DictationOutcome::Notice(InputNotice::PermissionDenied))
                } else {
                    None
                }
            }
            RecognitionEvent::End => None,
        }
    }
}
