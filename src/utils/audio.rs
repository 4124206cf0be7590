use crate::services::tts::AudioFormat;
use anyhow::{anyhow, Result};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::time::Duration;

/// Format and payload location of a PCM WAVE file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    pub format: AudioFormat,
    pub data_offset: u64,
    pub data_size: u32,
}

impl WavInfo {
    pub fn duration(&self) -> Duration {
        let frames = self.data_size as u64 / self.format.block_align().max(1) as u64;
        Duration::from_nanos(frames * 1_000_000_000 / self.format.sample_rate.max(1) as u64)
    }
}

/// Reads the `fmt ` and `data` chunk headers of an in-memory WAVE file.
pub fn scan_wav(bytes: &[u8]) -> Result<WavInfo> {
    let mut f = Cursor::new(bytes);

    // Check RIFF
    let mut id = [0u8; 4];
    f.read_exact(&mut id)?;
    if &id != b"RIFF" {
        return Err(anyhow!("Not a RIFF file"));
    }

    // Skip File Size
    f.seek(SeekFrom::Current(4))?;

    // Check WAVE
    f.read_exact(&mut id)?;
    if &id != b"WAVE" {
        return Err(anyhow!("Not a WAVE file"));
    }

    let mut format: Option<AudioFormat> = None;
    let mut data: Option<(u64, u32)> = None;

    loop {
        let mut chunk_id = [0u8; 4];
        let n = f.read(&mut chunk_id)?;
        if n == 0 {
            break;
        }
        if n < 4 {
            return Err(anyhow!("Unexpected EOF reading chunk ID"));
        }

        let mut size_buf = [0u8; 4];
        f.read_exact(&mut size_buf)?;
        let chunk_size = u32::from_le_bytes(size_buf);

        if &chunk_id == b"fmt " {
            let mut buf = vec![0u8; chunk_size as usize];
            f.read_exact(&mut buf)?;
            if buf.len() < 16 {
                return Err(anyhow!("fmt chunk too short"));
            }
            let audio_format = u16::from_le_bytes([buf[0], buf[1]]);
            if audio_format != 1 {
                return Err(anyhow!("Unsupported WAVE encoding {}", audio_format));
            }
            format = Some(AudioFormat {
                channels: u16::from_le_bytes([buf[2], buf[3]]),
                sample_rate: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
                bits_per_sample: u16::from_le_bytes([buf[14], buf[15]]),
            });
        } else if &chunk_id == b"data" {
            data = Some((f.stream_position()?, chunk_size));
            break;
        } else {
            f.seek(SeekFrom::Current(chunk_size as i64))?;
        }
    }

    let (data_offset, data_size) = data.ok_or_else(|| anyhow!("Missing data chunk"))?;
    Ok(WavInfo {
        format: format.ok_or_else(|| anyhow!("Missing fmt chunk"))?,
        data_offset,
        data_size,
    })
}

/// Wraps raw PCM samples in a canonical 44-byte WAVE header.
pub fn encode_wav(format: AudioFormat, pcm: &[u8]) -> Result<Vec<u8>> {
    let data_size = u32::try_from(pcm.len()).map_err(|_| anyhow!("PCM payload too large"))?;
    let mut out = Vec::with_capacity(44 + pcm.len());

    // RIFF [4] + Size [4] + WAVE [4]
    out.write_all(b"RIFF")?;
    out.write_all(&(36 + data_size).to_le_bytes())?;
    out.write_all(b"WAVE")?;

    out.write_all(b"fmt ")?;
    out.write_all(&16u32.to_le_bytes())?;
    out.write_all(&1u16.to_le_bytes())?;
    out.write_all(&format.channels.to_le_bytes())?;
    out.write_all(&format.sample_rate.to_le_bytes())?;
    out.write_all(&format.byte_rate().to_le_bytes())?;
    out.write_all(&format.block_align().to_le_bytes())?;
    out.write_all(&format.bits_per_sample.to_le_bytes())?;

    out.write_all(b"data")?;
    out.write_all(&data_size.to_le_bytes())?;
    out.write_all(pcm)?;

    Ok(out)
}

/// A WAVE file of `duration` silence.
pub fn silent_wav(format: AudioFormat, duration: Duration) -> Result<Vec<u8>> {
    let frames = (duration.as_secs_f64() * format.sample_rate as f64).round() as usize;
    let pcm = vec![0u8; frames * format.block_align() as usize];
    encode_wav(format, &pcm)
}
