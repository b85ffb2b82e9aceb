//! Audio Engine Module
//!
//! Core representation and container handling:
//! - Sample model (widths, samples, channel groups)
//! - Audio buffer with its header invariants
//! - RIFF/WAVE codec and file I/O

pub mod buffer;
pub mod codec;
pub mod io;
pub mod sample;

pub use buffer::{Wav, FORMAT_PCM};
pub use codec::{decode, decode_bytes, encode, encode_to};
pub use io::{calculate_checksum, WavInfo};
pub use sample::{BitDepth, ChannelGroup, Sample};
