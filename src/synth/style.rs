use std::f64::consts::PI;

use rand::Rng;

/// Musical pattern rendered by the synthesizer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    /// C5/E5/G5 triad with slow tremolo on each voice.
    Melody,
    /// Two-note pulse alternating every half second.
    Upbeat,
    /// Low ambient drones plus a touch of noise.
    Chill,
    /// Square wave with a wobbling pitch.
    Electronic,
    /// Harmonics of A4 under an exponential decay.
    Piano,
    /// Plain A4 sine.
    Tone,
}

impl Style {
    /// Style for a tag such as `"melody"`; unknown tags get the plain tone.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "melody" => Style::Melody,
            "upbeat" => Style::Upbeat,
            "chill" => Style::Chill,
            "electronic" => Style::Electronic,
            "piano" => Style::Piano,
            _ => Style::Tone,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Style::Melody => "melody",
            Style::Upbeat => "upbeat",
            Style::Chill => "chill",
            Style::Electronic => "electronic",
            Style::Piano => "piano",
            Style::Tone => "tone",
        }
    }

    /// Raw (pre-envelope, unclipped) amplitude at time `t` seconds.
    pub fn sample<R: Rng + ?Sized>(self, t: f64, rng: &mut R) -> f64 {
        match self {
            Style::Melody => {
                sine(523.25, t) * 0.3 * (t * 0.5).sin()
                    + sine(659.25, t) * 0.2 * (t * 0.7).sin()
                    + sine(783.99, t) * 0.1 * (t * 0.3).sin()
            }
            Style::Upbeat => {
                let beat = ((t * 2.0).floor() as u64 % 2) as f64;
                let gate = if (t * 8.0).sin() > 0.0 { 1.0 } else { 0.3 };
                sine(440.0 + beat * 110.0, t) * 0.4 * gate
            }
            Style::Chill => {
                sine(220.0, t) * 0.2 * (t * 0.2).sin()
                    + sine(330.0, t) * 0.15 * (t * 0.15).sin()
                    + (rng.random::<f64>() - 0.5) * 0.05
            }
            Style::Electronic => {
                let freq = 440.0 + (t * 2.0).sin() * 100.0;
                sign(sine(freq, t)) * 0.3 * (t * 4.0).sin()
            }
            Style::Piano => {
                let decay = (-t * 2.0).exp();
                sine(440.0, t) * 0.4 * decay
                    + sine(880.0, t) * 0.2 * decay
                    + sine(1320.0, t) * 0.1 * decay
            }
            Style::Tone => sine(440.0, t) * 0.3,
        }
    }
}

/// Attack/release ramp of 100 ms at both ends of a clip of `total` seconds.
pub(super) fn envelope(t: f64, total: f64) -> f64 {
    (t * 10.0).min(1.0) * ((total - t) * 10.0).min(1.0)
}

fn sine(freq: f64, t: f64) -> f64 {
    (2.0 * PI * freq * t).sin()
}

// `f64::signum` maps 0.0 to 1.0; a square wave must stay silent at zero.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
