pub mod app;
pub mod chat;
pub mod composer;
pub mod config;
pub mod speech;
pub mod transcript;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AuraError {
    #[error("Chat request error: {0}")]
    RequestError(String),

    #[error("Chat stream error: {0}")]
    StreamError(String),

    #[error("Speech synthesis error: {0}")]
    SynthesisError(String),

    #[error("Speech recognition error: {0}")]
    RecognitionError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for AuraError {
    fn from(e: std::io::Error) -> Self {
        AuraError::IOError(e.to_string())
    }
}

impl AuraError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Transport errors are transient; the user can re-send
            AuraError::RequestError(_) => true,
            AuraError::StreamError(_) => true,
            AuraError::SynthesisError(_) => true,
            AuraError::RecognitionError(_) => true,
            AuraError::ImageError(_) => true,
            AuraError::IOError(_) => false,
            AuraError::ConfigError(_) => false,
            AuraError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            AuraError::RequestError(_) | AuraError::StreamError(_) => {
                "Connection to the model was interrupted. Please try again.".to_string()
            }
            AuraError::SynthesisError(_) => {
                "Text-to-speech failed. The response will be shown as text.".to_string()
            }
            AuraError::RecognitionError(_) => {
                "Voice input failed. Please try again.".to_string()
            }
            AuraError::ImageError(_) => "The selected image could not be read.".to_string(),
            AuraError::IOError(_) => "File system error occurred.".to_string(),
            AuraError::ConfigError(_) => "Configuration error. Please check settings.".to_string(),
            AuraError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AuraError>;
