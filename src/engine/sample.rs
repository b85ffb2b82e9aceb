//! Sample Model
//!
//! A sample is one integer value at one of the four supported PCM widths.
//! 8-bit PCM is unsigned on the wire, every wider depth is signed two's
//! complement, so each width gets its own variant instead of a shared
//! numeric type.

use std::fmt;

use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WavError};

// ============================================================================
// Bit Depth
// ============================================================================

/// Supported sample widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit unsigned
    Bits8,
    /// 16-bit signed
    Bits16,
    /// 32-bit signed
    Bits32,
    /// 64-bit signed
    Bits64,
}

impl BitDepth {
    /// Number of bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Bits8 => 8,
            BitDepth::Bits16 => 16,
            BitDepth::Bits32 => 32,
            BitDepth::Bits64 => 64,
        }
    }

    /// Number of bytes per sample
    pub fn bytes(&self) -> u16 {
        self.bits() / 8
    }

    /// Create a BitDepth from a bits-per-sample header value
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(BitDepth::Bits8),
            16 => Some(BitDepth::Bits16),
            32 => Some(BitDepth::Bits32),
            64 => Some(BitDepth::Bits64),
            _ => None,
        }
    }

    /// Like `from_bits`, failing with `UnsupportedBitDepth`
    pub fn try_from_bits(bits: u16) -> Result<Self> {
        Self::from_bits(bits).ok_or(WavError::UnsupportedBitDepth { bits })
    }

    /// Smallest value a sample of this width can hold
    pub fn min_value(&self) -> i64 {
        match self {
            BitDepth::Bits8 => u8::MIN as i64,
            BitDepth::Bits16 => i16::MIN as i64,
            BitDepth::Bits32 => i32::MIN as i64,
            BitDepth::Bits64 => i64::MIN,
        }
    }

    /// Largest value a sample of this width can hold
    pub fn max_value(&self) -> i64 {
        match self {
            BitDepth::Bits8 => u8::MAX as i64,
            BitDepth::Bits16 => i16::MAX as i64,
            BitDepth::Bits32 => i32::MAX as i64,
            BitDepth::Bits64 => i64::MAX,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

// ============================================================================
// Sample
// ============================================================================

/// One sample value, tagged with its width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    U8(u8),
    I16(i16),
    I32(i32),
    I64(i64),
}

impl Sample {
    /// The width this sample is stored at
    pub fn bit_depth(&self) -> BitDepth {
        match self {
            Sample::U8(_) => BitDepth::Bits8,
            Sample::I16(_) => BitDepth::Bits16,
            Sample::I32(_) => BitDepth::Bits32,
            Sample::I64(_) => BitDepth::Bits64,
        }
    }

    /// Widen to the common integer domain used by the resampler.
    ///
    /// 8-bit samples keep their unsigned value (0..=255).
    pub fn to_i64(&self) -> i64 {
        match *self {
            Sample::U8(v) => v as i64,
            Sample::I16(v) => v as i64,
            Sample::I32(v) => v as i64,
            Sample::I64(v) => v,
        }
    }

    /// Narrow an integer into `depth`, saturating at the width's bounds
    pub fn from_i64_saturating(value: i64, depth: BitDepth) -> Self {
        let clamped = value.clamp(depth.min_value(), depth.max_value());
        match depth {
            BitDepth::Bits8 => Sample::U8(clamped as u8),
            BitDepth::Bits16 => Sample::I16(clamped as i16),
            BitDepth::Bits32 => Sample::I32(clamped as i32),
            BitDepth::Bits64 => Sample::I64(clamped),
        }
    }

    /// Lossless upcast to a width at least as wide as the current one.
    ///
    /// Returns `None` when `depth` is narrower than the sample.
    pub fn widen(&self, depth: BitDepth) -> Option<Self> {
        if depth < self.bit_depth() {
            return None;
        }
        Some(Self::from_i64_saturating(self.to_i64(), depth))
    }

    /// Rounding-down average of two samples of the same width, computed in
    /// that width. Equal inputs come back unchanged.
    pub fn average(first: Sample, second: Sample) -> Result<Sample> {
        match (first, second) {
            (Sample::U8(a), Sample::U8(b)) => Ok(Sample::U8(floor_average(a, b))),
            (Sample::I16(a), Sample::I16(b)) => Ok(Sample::I16(floor_average(a, b))),
            (Sample::I32(a), Sample::I32(b)) => Ok(Sample::I32(floor_average(a, b))),
            (Sample::I64(a), Sample::I64(b)) => Ok(Sample::I64(floor_average(a, b))),
            (a, b) => Err(WavError::SampleWidthMismatch {
                expected: a.bit_depth().bits(),
                found: b.bit_depth().bits(),
            }),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i64())
    }
}

/// floor((a + b) / 2) without leaving the type
#[inline]
fn floor_average<T: PrimInt>(a: T, b: T) -> T {
    (a >> 1) + (b >> 1) + (a & b & T::one())
}

// ============================================================================
// Channel Group
// ============================================================================

/// All channels' samples at a single instant, in channel order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ChannelGroup(Vec<Sample>);

impl ChannelGroup {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self(samples)
    }

    /// Build a group from raw integers, narrowing each into `depth`
    pub fn from_values(values: &[i64], depth: BitDepth) -> Self {
        values
            .iter()
            .map(|&v| Sample::from_i64_saturating(v, depth))
            .collect()
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.0
    }

    /// Number of channels in this group
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, channel: usize) -> Option<Sample> {
        self.0.get(channel).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.0.iter()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.0
    }
}

impl From<Vec<Sample>> for ChannelGroup {
    fn from(samples: Vec<Sample>) -> Self {
        Self(samples)
    }
}

impl FromIterator<Sample> for ChannelGroup {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ChannelGroup {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
