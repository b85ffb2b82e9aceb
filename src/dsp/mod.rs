//! Signal Transforms
//!
//! Operations that rewrite a `Wav` in place. Each one builds its result as a
//! fresh buffer and only replaces the original once every step succeeds.
//! - Windowed-sinc resampling
//! - Mono/stereo conversion
//! - Tempo/pitch scaling
//! - Concatenation with layout reconciliation

mod channels;
mod concat;
pub mod resample;
mod tempo;

pub use resample::{
    resample_channel, resampled_len, ResamplerConfig, DEFAULT_CUTOFF_HZ, DEFAULT_WINDOW_WIDTH,
};
