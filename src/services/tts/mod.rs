use crate::core::config::Config;
use crate::core::state::{PhonemeEvent, VoiceProfile};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;

// --- Constants ---

pub const VOICE_NAME_MARIA: &str = "Microsoft Maria Desktop";
pub const VOICE_NAME_DANIEL: &str = "Microsoft Daniel Desktop";

/// Extension of the synthesized audio files.
pub const AUDIO_EXTENSION: &str = "wav";

/// Maps a declared voice id to the engine voice name. Unknown ids use the
/// default voice.
pub fn resolve_voice_name(voice_id: &str) -> &'static str {
    match voice_id {
        "maria" => VOICE_NAME_MARIA,
        _ => VOICE_NAME_DANIEL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

impl AudioFormat {
    pub const PCM_16K_MONO_16BIT: AudioFormat = AudioFormat {
        sample_rate: 16000,
        bits_per_sample: 16,
        channels: 1,
    };

    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest<'a> {
    pub text: &'a str,
    pub voice_name: &'static str,
    pub rate: i8,
    pub format: AudioFormat,
}

impl<'a> SynthesisRequest<'a> {
    pub fn new(text: &'a str, voice: &VoiceProfile) -> Self {
        Self {
            text,
            voice_name: resolve_voice_name(&voice.voice_id),
            rate: voice.rate,
            format: AudioFormat::PCM_16K_MONO_16BIT,
        }
    }
}

/// Encoded audio plus the phonemes the engine reported while producing it,
/// in emission order.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    pub audio: Vec<u8>,
    pub phonemes: Vec<PhonemeEvent>,
}

#[async_trait]
pub trait TtsClient: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest<'_>) -> Result<Synthesis>;

    fn provider_name(&self) -> &str;
}

pub fn create_tts_client(config: &Config) -> Result<Box<dyn TtsClient>> {
    info!(
        "Initializing TTS Client for provider: {}",
        config.audio.provider
    );
    match config.audio.provider.as_str() {
        "preview" => {
            let preview_config = config.audio.preview.clone().unwrap_or_default();
            Ok(Box::new(preview::PreviewTtsClient::new(preview_config)))
        }
        _ => Err(anyhow!("Unknown TTS provider: {}", config.audio.provider)),
    }
}

pub mod preview;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AudioConfig;

    #[test]
    fn test_resolve_voice_name() {
        assert_eq!(resolve_voice_name("maria"), "Microsoft Maria Desktop");
        assert_eq!(resolve_voice_name("daniel"), "Microsoft Daniel Desktop");
        assert_eq!(resolve_voice_name("unknown"), "Microsoft Daniel Desktop");
        assert_eq!(resolve_voice_name(""), "Microsoft Daniel Desktop");
    }

    #[test]
    fn test_request_from_profile() {
        let voice = VoiceProfile::new("amy", "maria", -2);
        let request = SynthesisRequest::new("hello", &voice);
        assert_eq!(request.voice_name, VOICE_NAME_MARIA);
        assert_eq!(request.rate, -2);
        assert_eq!(request.format, AudioFormat::PCM_16K_MONO_16BIT);
    }

    #[test]
    fn test_pcm_format_sizes() {
        let format = AudioFormat::PCM_16K_MONO_16BIT;
        assert_eq!(format.block_align(), 2);
        assert_eq!(format.byte_rate(), 32000);
    }

    #[test]
    fn test_create_tts_client() {
        let config = Config::default();
        let client = create_tts_client(&config).unwrap();
        assert_eq!(client.provider_name(), "preview");

        let config = Config {
            audio: AudioConfig {
                provider: "sapi".to_string(),
                preview: None,
            },
            ..Default::default()
        };
        let err = create_tts_client(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown TTS provider"));
    }
}
