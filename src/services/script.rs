use crate::core::error::ParseError;
use crate::core::state::{Utterance, VoiceProfile, VoiceRegistry, MAX_RATE, MIN_RATE};
use log::debug;

/// Lines starting with this prefix declare a voice instead of a spoken line.
pub const VOICE_PREFIX: &str = "voice:";

/// Speaker names end up in output file names and may not contain these.
const PATH_SEPARATORS: [char; 2] = ['/', '\\'];

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScript {
    pub voices: VoiceRegistry,
    pub utterances: Vec<Utterance>,
}

/// Parses a whole script. The text is lower-cased and every non-blank line
/// is either a `voice:<character>,<voice>,<rate>` declaration or a
/// `<character>:<text>` line. The first malformed line fails the parse.
pub fn parse_script(script: &str) -> Result<ParsedScript, ParseError> {
    if script.trim().is_empty() {
        return Err(ParseError::EmptyScript);
    }

    let content = script.to_lowercase();
    let lines = script_lines(&content);

    let mut voices = VoiceRegistry::new();
    for (line_no, line) in lines.iter().filter(|(_, l)| is_voice_line(l)) {
        voices.push(parse_voice_line(*line_no, line)?);
    }

    let mut utterances = Vec::new();
    for (line_no, line) in lines.iter().filter(|(_, l)| !is_voice_line(l)) {
        utterances.push(parse_speak_line(*line_no, line, &voices)?);
    }

    debug!(
        "Parsed script: {} voices, {} utterances",
        voices.len(),
        utterances.len()
    );

    Ok(ParsedScript { voices, utterances })
}

/// Trimmed, non-blank lines paired with their 1-based line number.
fn script_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .split('\n')
        .enumerate()
        .flat_map(|(i, line)| line.split('\r').map(move |l| (i + 1, l.trim())))
        .filter(|(_, l)| !l.is_empty())
        .collect()
}

fn is_voice_line(line: &str) -> bool {
    line.starts_with(VOICE_PREFIX)
}

pub fn parse_voice_line(line_no: usize, line: &str) -> Result<VoiceProfile, ParseError> {
    let body = line.strip_prefix(VOICE_PREFIX).unwrap_or(line);
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();

    if parts.len() < 3 {
        return Err(ParseError::InvalidVoiceLine {
            line: line_no,
            content: line.to_string(),
        });
    }

    let rate = parts[2]
        .parse::<i8>()
        .ok()
        .filter(|r| (MIN_RATE..=MAX_RATE).contains(r))
        .ok_or_else(|| ParseError::InvalidVoiceRate {
            line: line_no,
            content: line.to_string(),
        })?;

    Ok(VoiceProfile::new(parts[0], parts[1], rate))
}

pub fn parse_speak_line(
    line_no: usize,
    line: &str,
    voices: &VoiceRegistry,
) -> Result<Utterance, ParseError> {
    let parts: Vec<&str> = line.split(':').collect();

    if parts.len() != 2 || parts[0].contains(PATH_SEPARATORS) {
        return Err(ParseError::InvalidSpeakLine {
            line: line_no,
            content: line.to_string(),
        });
    }

    let speaker = parts[0].trim();
    let voice = voices.resolve(speaker).clone();
    Ok(Utterance::new(speaker, parts[1].trim(), voice))
}
