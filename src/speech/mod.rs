//! Speech layer: synthesis (spoken replies) and recognition (voice
//! dictation into the composer), both behind narrow backend traits.

pub mod input;
pub mod output;
pub mod voice;

pub use input::{
    DictationOutcome, InputNotice, ListenState, RecognitionBackend, RecognitionEvent,
    SpeechInput, UnsupportedRecognizer,
};
pub use output::{NullSynthesizer, SpeechOutput, SynthesisBackend, Utterance};
pub use voice::{select_voice, Voice};
