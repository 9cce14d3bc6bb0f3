//! Composer: the pending-input state behind the input bar.

use crate::chat::ImagePayload;
use crate::{AuraError, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::path::Path;

/// A single attached image, held as a data URI so the preview and the
/// transmission payload come from the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    data_uri: String,
}

impl ImageAttachment {
    pub fn from_data_uri(data_uri: impl Into<String>) -> Self {
        Self {
            data_uri: data_uri.into(),
        }
    }

    /// Read and encode an image file selected by the user.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| AuraError::ImageError(format!("{}: {e}", path.display())))?;

        let mime = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        };

        let encoded = BASE64_STANDARD.encode(&bytes);
        Ok(Self {
            data_uri: format!("data:{mime};base64,{encoded}"),
        })
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn payload(&self) -> ImagePayload {
        ImagePayload::from_data_uri(&self.data_uri)
    }
}

/// Draft text plus at most one attached image.
#[derive(Debug, Default)]
pub struct Composer {
    pub draft: String,
    attachment: Option<ImageAttachment>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send is allowed when the trimmed draft is non-empty or an image
    /// is attached.
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty() || self.attachment.is_some()
    }

    /// Take the pending message, clearing the draft and the attachment
    /// unconditionally. A downstream failure does not restore them.
    pub fn take(&mut self) -> (String, Option<ImageAttachment>) {
        let text = std::mem::take(&mut self.draft);
        let attachment = self.attachment.take();
        (text, attachment)
    }

    /// Attach an image, replacing any previous attachment.
    pub fn attach(&mut self, attachment: ImageAttachment) {
        self.attachment = Some(attachment);
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    pub fn attachment(&self) -> Option<&ImageAttachment> {
        self.attachment.as_ref()
    }

    /// Append a recognized transcript to the draft, space-joined when
    /// the draft is non-empty.
    pub fn push_transcript(&mut self, transcript: &str) {
        if self.draft.is_empty() {
            self.draft = transcript.to_string();
        } else {
            self.draft.push(' ');
            self.draft.push_str(transcript);
        }
    }
}
