use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::Rng;
use thiserror::Error;

use super::style::{Style, envelope};

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("sample rate must be non-zero")]
    ZeroSampleRate,
    #[error("wav encoding failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Render `seconds` of `style` as a 16-bit mono PCM WAV file held in memory.
pub fn render_wav(style: Style, seconds: u32, sample_rate: u32) -> Result<Vec<u8>, SynthError> {
    render_wav_with(style, seconds, sample_rate, &mut rand::rng())
}

/// Like [`render_wav`] with an explicit noise source.
pub fn render_wav_with<R: Rng + ?Sized>(
    style: Style,
    seconds: u32,
    sample_rate: u32,
    rng: &mut R,
) -> Result<Vec<u8>, SynthError> {
    if sample_rate == 0 {
        return Err(SynthError::ZeroSampleRate);
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let frames = u64::from(seconds) * u64::from(sample_rate);
    let total = f64::from(seconds);
    let mut cursor = Cursor::new(Vec::with_capacity(44 + frames as usize * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for i in 0..frames {
            let t = i as f64 / f64::from(sample_rate);
            let sample = style.sample(t, rng) * envelope(t, total);
            writer.write_sample(to_pcm16(sample))?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Clip to `[-1, 1]` and scale to the signed 16-bit range, truncating toward zero.
pub(super) fn to_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * f64::from(0x7fff)) as i16
}
