//! Procedural audio synthesis used to populate the demo catalog.
//!
//! Each [`Style`] is a closed-form function of time; [`render_wav`] samples
//! it into a 16-bit mono PCM WAV blob that any host decoder can play.

mod style;
mod wav;

pub use style::Style;
pub use wav::{SynthError, render_wav, render_wav_with};

#[cfg(test)]
mod tests;
