use crate::core::error::CompileError;
use crate::core::io::Storage;
use crate::core::state::{Utterance, VoiceRegistry};
use crate::services::lipsync::{Timeline, SIDECAR_EXTENSION};
use crate::services::script::parse_script;
use crate::services::tts::{SynthesisRequest, TtsClient, AUDIO_EXTENSION};
use crate::utils::audio::scan_wav;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything produced by a successful run, in script order.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub voices: VoiceRegistry,
    pub utterances: Vec<Utterance>,
    pub sidecars: Vec<PathBuf>,
}

pub struct ScriptCompiler {
    tts: Box<dyn TtsClient>,
    storage: Arc<dyn Storage>,
}

/// `<dir>/speak_<index>_<speaker>.wav`
pub fn audio_path(output_dir: &Path, index: usize, speaker: &str) -> PathBuf {
    output_dir.join(format!("speak_{:03}_{}.{}", index, speaker, AUDIO_EXTENSION))
}

pub fn sidecar_path(audio_path: &Path) -> PathBuf {
    audio_path.with_extension(SIDECAR_EXTENSION)
}

impl ScriptCompiler {
    pub fn new(tts: Box<dyn TtsClient>, storage: Arc<dyn Storage>) -> Self {
        Self { tts, storage }
    }

    /// Parses `script` and renders every line into `output_dir`, one line at
    /// a time. Nothing is written when the script does not parse; any later
    /// failure stops the run and leaves earlier files in place.
    pub async fn compile(
        &self,
        script: &str,
        output_dir: &Path,
    ) -> Result<CompileReport, CompileError> {
        let parsed = parse_script(script)?;
        let total = parsed.utterances.len();
        info!(
            "Compiling {} lines with {} voices using {}",
            total,
            parsed.voices.len(),
            self.tts.provider_name()
        );

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut utterances = Vec::with_capacity(total);
        let mut sidecars = Vec::with_capacity(total);

        for (i, mut utterance) in parsed.utterances.into_iter().enumerate() {
            pb.set_message(utterance.speaker.clone());
            let sidecar = self.compile_utterance(i, &mut utterance, output_dir).await?;
            pb.inc(1);

            utterances.push(utterance);
            sidecars.push(sidecar);
        }

        pb.finish_with_message("done");
        info!("Compiled {} lines into {:?}", total, output_dir);

        Ok(CompileReport {
            voices: parsed.voices,
            utterances,
            sidecars,
        })
    }

    async fn compile_utterance(
        &self,
        index: usize,
        utterance: &mut Utterance,
        output_dir: &Path,
    ) -> Result<PathBuf, CompileError> {
        let wave_file = audio_path(output_dir, index, &utterance.speaker);
        if utterance.text.is_empty() {
            warn!("Line {} ({}) has no text", index, utterance.speaker);
        }

        let request = SynthesisRequest::new(&utterance.text, &utterance.voice);
        info!(
            "Synthesizing {:?} with {} (rate {})",
            wave_file, request.voice_name, request.rate
        );

        let synthesis = self
            .tts
            .synthesize(&request)
            .await
            .map_err(|e| CompileError::Synthesis {
                index,
                speaker: utterance.speaker.clone(),
                source: e.into(),
            })?;

        match scan_wav(&synthesis.audio) {
            Ok(info) => {
                let spoken = synthesis.phonemes.last().map(|p| p.end()).unwrap_or_default();
                if spoken > info.duration() {
                    warn!(
                        "Phonemes for {:?} run to {:?} but the audio is {:?}",
                        wave_file,
                        spoken,
                        info.duration()
                    );
                }
            }
            Err(e) => debug!("Audio for {:?} is not a WAVE file: {}", wave_file, e),
        }

        self.write(&wave_file, &synthesis.audio).await?;
        utterance.audio_path = Some(wave_file.clone());
        utterance.phonemes = synthesis.phonemes;

        let timeline = Timeline::build(&utterance.phonemes);
        debug!(
            "{} phonemes -> {} timeline frames",
            utterance.phonemes.len(),
            timeline.len()
        );

        let sidecar = sidecar_path(&wave_file);
        self.write(&sidecar, timeline.serialize().as_bytes()).await?;
        Ok(sidecar)
    }

    async fn write(&self, path: &Path, content: &[u8]) -> Result<(), CompileError> {
        self.storage
            .write(&path.to_string_lossy(), content)
            .await
            .map_err(|e| CompileError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            })
    }
}
