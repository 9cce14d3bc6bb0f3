//! HTTP client for the Gemini streaming REST API.

use super::session::ChatSession;
use super::sse::SseDecoder;
use super::wire::{ErrorWrapper, GenerateContentRequest, GenerateContentResponse, Part};
use crate::{AuraError, Result};
use futures::StreamExt;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Thin adapter over `streamGenerateContent?alt=sse`: send one user turn,
/// receive a finite, non-restartable sequence of text fragments.
pub struct GeminiClient {
    http: HttpClient,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:streamGenerateContent?alt=sse&key={}",
            BASE_URL, self.model, self.api_key
        )
    }

    /// Stream one reply. `on_fragment` is invoked for every text fragment
    /// in arrival order, each before the next chunk is awaited. Returns
    /// the full concatenated reply text.
    pub async fn stream_reply<F>(
        &self,
        session: &ChatSession,
        user_parts: Vec<Part>,
        mut on_fragment: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let request = GenerateContentRequest {
            contents: session.contents_with(user_parts),
            system_instruction: Some(session.system_instruction()),
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("accept", "text/event-stream")
            .json(&request)
            .send()
            .await
            .map_err(|e| AuraError::RequestError(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuraError::RequestError(describe_http_error(
                status.as_u16(),
                &body,
            )));
        }

        let mut byte_stream = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut full_text = String::new();

        while let Some(chunk) = byte_stream.next().await {
            let chunk =
                chunk.map_err(|e| AuraError::StreamError(format!("stream error: {e}")))?;

            for payload in decoder.push(&chunk) {
                if let Some(text) = decode_fragment(&payload) {
                    full_text.push_str(&text);
                    on_fragment(&text);
                }
            }
        }

        if let Some(payload) = decoder.finish() {
            if let Some(text) = decode_fragment(&payload) {
                full_text.push_str(&text);
                on_fragment(&text);
            }
        }

        debug!("stream complete: {} chars", full_text.len());
        Ok(full_text)
    }
}

fn decode_fragment(payload: &str) -> Option<String> {
    match serde_json::from_str::<GenerateContentResponse>(payload) {
        Ok(response) => response.text(),
        Err(e) => {
            warn!("skipping undecodable stream payload: {}", e);
            None
        }
    }
}

fn describe_http_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorWrapper>(body) {
        Ok(wrapper) => {
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(s) if !s.is_empty() => format!("HTTP {status} {s}: {message}"),
                _ => format!("HTTP {status}: {message}"),
            }
        }
        Err(_) => format!("HTTP {status}: {body}"),
    }
}
