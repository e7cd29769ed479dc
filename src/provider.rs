//! Machine-translation provider abstraction.
//!
//! The pipeline only ever sees [`Translator`]: one blocking, fallible call
//! per text span. The bundled implementation speaks the DeepLX wire format
//! (`POST {text, source_lang, target_lang}` answered by `{code, data}`), but
//! anything honoring the trait plugs in, which is how tests drive the batch
//! runner without a network. Calls are single-attempt; a failure leaves the
//! row blank and the next run retries it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A blocking translation capability.
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct DeepLxRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct DeepLxResponse {
    code: i64,
    #[serde(default)]
    data: Option<String>,
}

/// HTTP client for a DeepLX-compatible endpoint.
pub struct DeepLxTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
    source_lang: String,
    target_lang: String,
}

impl DeepLxTranslator {
    /// Build a client with a per-request timeout. Language codes are
    /// uppercased to match the wire format.
    pub fn new(
        endpoint: String,
        source_lang: &str,
        target_lang: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            source_lang: source_lang.to_uppercase(),
            target_lang: target_lang.to_uppercase(),
        })
    }
}

impl Translator for DeepLxTranslator {
    fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let request = DeepLxRequest {
            text,
            source_lang: &self.source_lang,
            target_lang: &self.target_lang,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?;
        let body: DeepLxResponse = response.json()?;

        if body.code != 200 {
            return Err(ProviderError::Rejected(body.code));
        }
        match body.data {
            Some(data) if !data.is_empty() => Ok(tidy_translation(&data)),
            _ => Err(ProviderError::EmptyResponse),
        }
    }
}

/// Clean up raw provider output before it is cached or written.
///
/// Straight double quotes become typographic quotes (alternating open and
/// close per phrase) so the delimiter-separated output never needs quote
/// escaping a game engine might trip on, and non-breaking spaces some
/// providers emit become regular spaces.
pub fn tidy_translation(raw: &str) -> String {
    let mut tidied = String::with_capacity(raw.len());
    let mut open = true;
    for ch in raw.chars() {
        match ch {
            '"' => {
                tidied.push(if open { '\u{201c}' } else { '\u{201d}' });
                open = !open;
            }
            '\u{a0}' => tidied.push(' '),
            _ => tidied.push(ch),
        }
    }
    tidied
}
