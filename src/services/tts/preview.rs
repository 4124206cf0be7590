use crate::core::state::PhonemeEvent;
use crate::services::tts::{Synthesis, SynthesisRequest, TtsClient};
use crate::utils::audio::silent_wav;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Symbol reported for pauses; it has no mouth shape.
pub const SILENCE_SYMBOL: &str = "_";

/// Upper bound for `phoneme_ms` and `pause_ms`.
pub const MAX_SEGMENT_MS: u64 = 10_000;

// --- Config ---

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreviewConfig {
    #[serde(default = "default_phoneme_ms")]
    pub phoneme_ms: u64,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            phoneme_ms: default_phoneme_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

fn default_phoneme_ms() -> u64 {
    80
}
fn default_pause_ms() -> u64 {
    120
}

// --- Preview Client ---

/// Offline stand-in for a speech engine: every letter becomes a fixed-length
/// phoneme and the audio is silence of matching length.
pub struct PreviewTtsClient {
    config: PreviewConfig,
}

impl PreviewTtsClient {
    pub fn new(config: PreviewConfig) -> Self {
        let config = PreviewConfig {
            phoneme_ms: config.phoneme_ms.min(MAX_SEGMENT_MS),
            pause_ms: config.pause_ms.min(MAX_SEGMENT_MS),
        };
        Self { config }
    }

    /// Speed multiplier for an engine rate in -10..=10; +10 is three times
    /// as fast, -10 three times as slow.
    fn speed(rate: i8) -> f64 {
        3f64.powf(rate as f64 / 10.0)
    }

    pub fn phonemes(&self, text: &str, rate: i8) -> Vec<PhonemeEvent> {
        let speed = Self::speed(rate);
        let scaled = |ms: u64| Duration::from_micros((ms as f64 * 1000.0 / speed).round() as u64);
        let phoneme = scaled(self.config.phoneme_ms);
        let pause = scaled(self.config.pause_ms);

        let mut events = Vec::new();
        let mut position = Duration::ZERO;
        for c in text.chars() {
            let (symbol, duration) = match c {
                c if c.is_ascii_alphabetic() => (c.to_ascii_lowercase().to_string(), phoneme),
                c if c.is_whitespace() => (SILENCE_SYMBOL.to_string(), pause),
                ',' | '.' | ';' | '!' | '?' => {
                    (SILENCE_SYMBOL.to_string(), pause.saturating_mul(2))
                }
                _ => continue,
            };
            events.push(PhonemeEvent::new(symbol, position, duration));
            position = position.saturating_add(duration);
        }
        events
    }
}

#[async_trait]
impl TtsClient for PreviewTtsClient {
    async fn synthesize(&self, request: &SynthesisRequest<'_>) -> Result<Synthesis> {
        let phonemes = self.phonemes(request.text, request.rate);
        let length = phonemes.last().map(|p| p.end()).unwrap_or(Duration::ZERO);
        let audio = silent_wav(request.format, length)?;
        Ok(Synthesis { audio, phonemes })
    }

    fn provider_name(&self) -> &str {
        "preview"
    }
}
