use std::io::Cursor;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::style::envelope;
use super::wav::to_pcm16;
use super::*;

#[test]
fn render_wav_writes_pcm16_mono_header_and_all_frames() {
    let bytes = render_wav(Style::Tone, 1, 1000).unwrap();

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(bytes.len(), 44 + 1000 * 2);

    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 1000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.len(), 1000);
}

#[test]
fn render_wav_rejects_zero_sample_rate() {
    assert!(matches!(
        render_wav(Style::Melody, 1, 0),
        Err(SynthError::ZeroSampleRate)
    ));
}

#[test]
fn envelope_fades_in_and_out() {
    assert_eq!(envelope(0.0, 2.0), 0.0);
    assert_eq!(envelope(1.0, 2.0), 1.0);
    assert!(envelope(0.05, 2.0) < 1.0);
    assert!(envelope(1.95, 2.0) < 1.0);
}

#[test]
fn every_style_starts_silent_and_stays_in_range() {
    let styles = [
        Style::Melody,
        Style::Upbeat,
        Style::Chill,
        Style::Electronic,
        Style::Piano,
        Style::Tone,
    ];
    for style in styles {
        let mut rng = StdRng::seed_from_u64(7);
        let bytes = render_wav_with(style, 1, 2000, &mut rng).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();

        assert_eq!(samples[0], 0, "{} should start silent", style.name());
        assert!(samples.iter().all(|s| *s != i16::MIN));
    }
}

#[test]
fn piano_decays_over_time() {
    let mut rng = StdRng::seed_from_u64(1);
    let early: f64 = (0..200)
        .map(|i| Style::Piano.sample(0.2 + i as f64 / 44100.0, &mut rng).abs())
        .sum();
    let late: f64 = (0..200)
        .map(|i| Style::Piano.sample(2.2 + i as f64 / 44100.0, &mut rng).abs())
        .sum();
    assert!(late < early);
}

#[test]
fn pcm_conversion_clips_and_truncates() {
    assert_eq!(to_pcm16(2.0), 0x7fff);
    assert_eq!(to_pcm16(-2.0), -0x7fff);
    assert_eq!(to_pcm16(0.0), 0);
    assert_eq!(to_pcm16(0.5), 16383);
}

#[test]
fn style_tags_resolve_with_tone_fallback() {
    assert_eq!(Style::from_name("piano"), Style::Piano);
    assert_eq!(Style::from_name(" Chill "), Style::Chill);
    assert_eq!(Style::from_name("polka"), Style::Tone);
    assert_eq!(Style::from_name(""), Style::Tone);
}
