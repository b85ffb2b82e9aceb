//! pcmwav - PCM WAV codec and transforms
//!
//! Decodes RIFF/WAVE files holding linear PCM into an in-memory buffer,
//! transforms it, and encodes it back to a byte-exact file image.
//!
//! # Architecture
//!
//! - `engine`: sample model, the `Wav` buffer, the binary codec and file I/O
//! - `dsp`: resampling, channel conversion, tempo scaling and concatenation
//! - `cli`: command-line front end used by the `pcmwav` binary

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use dsp::ResamplerConfig;
pub use engine::{BitDepth, ChannelGroup, Sample, Wav, WavInfo};
pub use error::{Result, WavError};
