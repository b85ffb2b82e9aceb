//! Windowed-sinc sample rate conversion
//!
//! Each output sample is a Hann-windowed, low-passed sinc interpolation of
//! the input around its fractional source position. Taps that fall outside
//! the input are dropped rather than zero-padded, so edges lose a little
//! energy instead of gaining invented samples.
//!
//! Filtered values are truncated toward zero before being narrowed back to
//! the buffer's bit depth. That truncation biases output toward zero by up
//! to one quantization step; it is kept for compatibility with existing
//! renders.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::buffer::derived_data_size;
use crate::engine::{ChannelGroup, Sample, Wav};
use crate::error::{Result, WavError};

/// Upper bound on output samples reserved up front
const MAX_RESERVED_SAMPLES: usize = 1 << 20;

/// Default low-pass cutoff in Hz
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;

/// Default number of input samples each output sample is built from
pub const DEFAULT_WINDOW_WIDTH: usize = 4;

// ============================================================================
// Configuration
// ============================================================================

/// Resampler tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResamplerConfig {
    /// Low-pass cutoff frequency in Hz
    pub cutoff_hz: f64,
    /// Kernel width in input samples
    pub window_width: usize,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        ResamplerConfig {
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            window_width: DEFAULT_WINDOW_WIDTH,
        }
    }
}

impl ResamplerConfig {
    pub fn new(cutoff_hz: f64, window_width: usize) -> Self {
        ResamplerConfig {
            cutoff_hz,
            window_width,
        }
    }

    /// Config with the cutoff at the Nyquist frequency of `sample_rate`.
    ///
    /// At this cutoff the kernel passes the full band with unity gain.
    pub fn nyquist(sample_rate: u32) -> Self {
        ResamplerConfig {
            cutoff_hz: sample_rate as f64 / 2.0,
            ..Default::default()
        }
    }

    pub fn with_cutoff(mut self, cutoff_hz: f64) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn with_window_width(mut self, window_width: usize) -> Self {
        self.window_width = window_width;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff_hz.is_finite() || self.cutoff_hz <= 0.0 {
            return Err(WavError::InvalidConfig {
                reason: format!("cutoff must be a positive frequency, got {}", self.cutoff_hz),
            });
        }
        if self.window_width == 0 {
            return Err(WavError::InvalidConfig {
                reason: "window width must be at least 1 sample".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ResamplerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WavError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

// ============================================================================
// Per-channel resampling
// ============================================================================

/// Resample one channel from `original_rate` to `target_rate`
///
/// Output position `n` reads the input at `x = n * original_rate / target_rate`
/// for every `x` inside the input, so the output has
/// `ceil(len * target_rate / original_rate)` samples.
///
/// # Errors
/// * `InvalidSampleRate` - either rate is zero
/// * `InvalidConfig` - the config fails validation
/// * `Overflow` - the output would hold more samples than a data chunk can
/// * `IntegerCastFailure` - a filtered value doesn't fit in an `i64`
pub fn resample_channel(
    samples: &[i64],
    original_rate: u32,
    target_rate: u32,
    config: &ResamplerConfig,
) -> Result<Vec<i64>> {
    check_rates(original_rate, target_rate)?;
    config.validate()?;

    let count = resampled_len(samples.len(), original_rate, target_rate)?;
    // Even 8-bit mono can't hold more than u32::MAX samples in one data chunk
    if count > u32::MAX as usize {
        return Err(WavError::overflow(format!(
            "resampling {} samples from {} Hz to {} Hz yields {} samples",
            samples.len(),
            original_rate,
            target_rate,
            count
        )));
    }

    let step = original_rate as f64 / target_rate as f64;
    let mut output = Vec::with_capacity(count.min(MAX_RESERVED_SAMPLES));
    for n in 0..count {
        let x = n as f64 * step;
        let filtered = interpolate(x, samples, original_rate, config);
        let value = filtered
            .to_i64()
            .ok_or(WavError::IntegerCastFailure { value: filtered })?;
        output.push(value);
    }

    Ok(output)
}

/// Number of samples [`resample_channel`] produces for `input_len` inputs:
/// the count of `n` with `n * original_rate / target_rate < input_len`.
///
/// # Errors
/// * `InvalidSampleRate` - either rate is zero
/// * `Overflow` - the count doesn't fit in a `usize`
pub fn resampled_len(input_len: usize, original_rate: u32, target_rate: u32) -> Result<usize> {
    check_rates(original_rate, target_rate)?;
    let scaled = input_len as u128 * target_rate as u128;
    let original = original_rate as u128;
    let count = (scaled + original - 1) / original;
    usize::try_from(count)
        .map_err(|_| WavError::overflow(format!("resampled length {} exceeds usize", count)))
}

/// Filtered value of `samples` at fractional position `x`
fn interpolate(x: f64, samples: &[i64], original_rate: u32, config: &ResamplerConfig) -> f64 {
    let rate = original_rate as f64;
    let width = config.window_width as f64;
    let gain = 2.0 * config.cutoff_hz / rate;

    let lower = -((config.window_width / 2) as i64);
    let upper = config.window_width as i64 + lower;
    let origin = x.floor() as i64;

    let mut acc = 0.0;
    for k in lower..upper {
        let index = origin + k;
        if index < 0 || index >= samples.len() as i64 {
            continue;
        }

        let distance = index as f64 - x;
        let window = 0.5 - 0.5 * (2.0 * PI * (0.5 + distance / width)).cos();
        let phase = 2.0 * PI * distance * config.cutoff_hz / rate;
        let sinc = if phase == 0.0 { 1.0 } else { phase.sin() / phase };

        acc += gain * window * sinc * samples[index as usize] as f64;
    }
    acc
}

fn check_rates(original_rate: u32, target_rate: u32) -> Result<()> {
    if original_rate == 0 {
        return Err(WavError::InvalidSampleRate { rate: original_rate });
    }
    if target_rate == 0 {
        return Err(WavError::InvalidSampleRate { rate: target_rate });
    }
    Ok(())
}

// ============================================================================
// Buffer-level resampling
// ============================================================================

impl Wav {
    /// Change the sample rate without changing duration or pitch, using the
    /// default resampler config
    pub fn resample(&mut self, new_sample_rate: u32) -> Result<()> {
        self.resample_with(new_sample_rate, &ResamplerConfig::default())
    }

    /// Change the sample rate using an explicit resampler config.
    ///
    /// On error the buffer is left unchanged.
    pub fn resample_with(&mut self, new_sample_rate: u32, config: &ResamplerConfig) -> Result<()> {
        let resampled = self.resampled(new_sample_rate, config)?;
        *self = resampled;
        Ok(())
    }

    pub(crate) fn resampled(&self, new_sample_rate: u32, config: &ResamplerConfig) -> Result<Wav> {
        check_rates(self.sample_rate(), new_sample_rate)?;
        config.validate()?;

        let channels = self.channels() as usize;
        let depth = self.bit_depth();

        // Refuse before allocating anything if the result can't be encoded
        let length = resampled_len(self.num_channel_groups(), self.sample_rate(), new_sample_rate)?;
        derived_data_size(depth, self.channels(), length)?;

        let mut columns = vec![Vec::with_capacity(self.num_channel_groups()); channels];
        for group in self.channel_groups() {
            for (column, sample) in columns.iter_mut().zip(group) {
                column.push(sample.to_i64());
            }
        }

        let resampled = columns
            .iter()
            .map(|column| resample_channel(column, self.sample_rate(), new_sample_rate, config))
            .collect::<Result<Vec<_>>>()?;

        let mut clamped = 0usize;
        let groups: Vec<ChannelGroup> = (0..length)
            .map(|i| {
                resampled
                    .iter()
                    .map(|column| {
                        let value = column[i];
                        if value < depth.min_value() || value > depth.max_value() {
                            clamped += 1;
                        }
                        Sample::from_i64_saturating(value, depth)
                    })
                    .collect()
            })
            .collect();

        if clamped > 0 {
            warn!(clamped, depth = depth.bits(), "resampled values clamped to bit depth range");
        }
        debug!(
            from_rate = self.sample_rate(),
            to_rate = new_sample_rate,
            from_groups = self.num_channel_groups(),
            to_groups = groups.len(),
            "resampled buffer"
        );

        self.rebuild(self.channels(), new_sample_rate, depth, groups)
    }
}

// ============================================================================
// Tests
// ============================================================================
