use std::path::PathBuf;
use std::time::Duration;

/// Character name of the profile every registry starts with.
pub const DEFAULT_CHARACTER: &str = "default";
/// Voice id of the built-in profile.
pub const DEFAULT_VOICE_ID: &str = "daniel";

pub const MIN_RATE: i8 = -10;
pub const MAX_RATE: i8 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceProfile {
    pub character: String,
    pub voice_id: String,
    pub rate: i8,
}

impl VoiceProfile {
    pub fn new(character: impl Into<String>, voice_id: impl Into<String>, rate: i8) -> Self {
        Self {
            character: character.into(),
            voice_id: voice_id.into(),
            rate,
        }
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTER, DEFAULT_VOICE_ID, 0)
    }
}

/// Ordered voice declarations. The first entry is always the default profile,
/// and lookups fall back to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceRegistry {
    voices: Vec<VoiceProfile>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self {
            voices: vec![VoiceProfile::default()],
        }
    }

    pub fn push(&mut self, voice: VoiceProfile) {
        self.voices.push(voice);
    }

    /// First profile declared for `character`, or the default profile.
    pub fn resolve(&self, character: &str) -> &VoiceProfile {
        self.voices
            .iter()
            .find(|v| v.character == character)
            .unwrap_or(&self.voices[0])
    }

    pub fn voices(&self) -> &[VoiceProfile] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl Default for VoiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A timed phoneme reported by the synthesizer, relative to the start of
/// the utterance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhonemeEvent {
    pub symbol: String,
    pub start: Duration,
    pub duration: Duration,
}

impl PhonemeEvent {
    pub fn new(symbol: impl Into<String>, start: Duration, duration: Duration) -> Self {
        Self {
            symbol: symbol.into(),
            start,
            duration,
        }
    }

    pub fn end(&self) -> Duration {
        self.start + self.duration
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
    pub voice: VoiceProfile,
    /// Set by the compiler once the audio has been written.
    pub audio_path: Option<PathBuf>,
    /// Phonemes reported while synthesizing this line.
    pub phonemes: Vec<PhonemeEvent>,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>, voice: VoiceProfile) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            voice,
            audio_path: None,
            phonemes: Vec::new(),
        }
    }
}
