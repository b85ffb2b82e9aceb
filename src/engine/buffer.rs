//! Audio Buffer
//!
//! `Wav` is the in-memory form of one PCM WAV file: the fmt header fields
//! plus the interleaved sample sequence as channel groups.
//!
//! # Invariants
//! - every channel group holds exactly `channels` samples
//! - every sample is stored at the buffer's `bit_depth`
//! - `data_size == bit_depth.bytes() * channels * channel_groups`

use crate::engine::sample::{BitDepth, ChannelGroup, Sample};
use crate::error::{Result, WavError};

/// Format tag for linear PCM
pub const FORMAT_PCM: u16 = 1;

// ============================================================================
// Derived header fields
// ============================================================================

/// Bytes per second: `sample_rate * bits * channels / 8`
pub(crate) fn derived_byte_rate(sample_rate: u32, depth: BitDepth, channels: u16) -> Result<u32> {
    let rate = sample_rate as u64 * depth.bits() as u64 * channels as u64 / 8;
    u32::try_from(rate).map_err(|_| WavError::overflow(format!("byte rate {} exceeds u32", rate)))
}

/// Bytes per channel group
pub(crate) fn derived_block_align(depth: BitDepth, channels: u16) -> Result<u16> {
    depth
        .bytes()
        .checked_mul(channels)
        .ok_or_else(|| WavError::overflow(format!("block alignment for {} channels exceeds u16", channels)))
}

/// Payload size in bytes for `groups` channel groups
pub(crate) fn derived_data_size(depth: BitDepth, channels: u16, groups: usize) -> Result<u32> {
    let size = depth.bytes() as u64 * channels as u64 * groups as u64;
    u32::try_from(size).map_err(|_| WavError::overflow(format!("data size {} exceeds u32", size)))
}

// ============================================================================
// Wav
// ============================================================================

/// A PCM audio buffer
///
/// # Example
/// ```
/// use pcmwav::{BitDepth, ChannelGroup, Wav};
///
/// let groups = vec![
///     ChannelGroup::from_values(&[100], BitDepth::Bits16),
///     ChannelGroup::from_values(&[-50], BitDepth::Bits16),
/// ];
/// let wav = Wav::from_channel_groups(1, 44100, BitDepth::Bits16, groups).unwrap();
/// assert_eq!(wav.data_size(), 4);
/// assert_eq!(wav.byte_rate(), 88200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wav {
    /// Format tag (1 = PCM)
    format_tag: u16,
    /// Number of channels
    channels: u16,
    /// Samples per second per channel
    sample_rate: u32,
    /// Average bytes per second
    byte_rate: u32,
    /// Bytes per channel group
    block_align: u16,
    /// Width of every sample
    bit_depth: BitDepth,
    /// Payload size in bytes
    data_size: u32,
    /// Interleaved sample data, one group per instant
    groups: Vec<ChannelGroup>,
}

impl Wav {
    /// Create an empty PCM buffer
    pub fn new(channels: u16, sample_rate: u32, bit_depth: BitDepth) -> Result<Self> {
        Self::from_channel_groups(channels, sample_rate, bit_depth, Vec::new())
    }

    /// Create a PCM buffer from channel groups, checking every invariant
    pub fn from_channel_groups(
        channels: u16,
        sample_rate: u32,
        bit_depth: BitDepth,
        groups: Vec<ChannelGroup>,
    ) -> Result<Self> {
        Self::assemble(FORMAT_PCM, channels, sample_rate, bit_depth, groups)
    }

    /// Create a buffer from decoded header fields, keeping byte rate and
    /// block alignment exactly as they appeared in the file.
    pub(crate) fn from_decoded(
        format_tag: u16,
        channels: u16,
        sample_rate: u32,
        byte_rate: u32,
        block_align: u16,
        bit_depth: BitDepth,
        groups: Vec<ChannelGroup>,
    ) -> Result<Self> {
        let data_size = derived_data_size(bit_depth, channels, groups.len())?;
        Ok(Self {
            format_tag,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bit_depth,
            data_size,
            groups,
        })
    }

    /// Build a fresh buffer with this buffer's format tag and a new layout.
    ///
    /// Transforms compute their result through this and only replace `self`
    /// once it succeeds.
    pub(crate) fn rebuild(
        &self,
        channels: u16,
        sample_rate: u32,
        bit_depth: BitDepth,
        groups: Vec<ChannelGroup>,
    ) -> Result<Self> {
        Self::assemble(self.format_tag, channels, sample_rate, bit_depth, groups)
    }

    fn assemble(
        format_tag: u16,
        channels: u16,
        sample_rate: u32,
        bit_depth: BitDepth,
        groups: Vec<ChannelGroup>,
    ) -> Result<Self> {
        let wav = Self {
            format_tag,
            channels,
            sample_rate,
            byte_rate: derived_byte_rate(sample_rate, bit_depth, channels)?,
            block_align: derived_block_align(bit_depth, channels)?,
            bit_depth,
            data_size: derived_data_size(bit_depth, channels, groups.len())?,
            groups,
        };
        wav.validate()?;
        Ok(wav)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[inline]
    pub fn format_tag(&self) -> u16 {
        self.format_tag
    }

    #[inline]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    #[inline]
    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    #[inline]
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Bits per sample as written in the fmt chunk
    #[inline]
    pub fn bits_per_sample(&self) -> u16 {
        self.bit_depth.bits()
    }

    #[inline]
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    #[inline]
    pub fn channel_groups(&self) -> &[ChannelGroup] {
        &self.groups
    }

    /// Number of channel groups (samples per channel)
    #[inline]
    pub fn num_channel_groups(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[inline]
    pub fn is_mono(&self) -> bool {
        self.channels == 1
    }

    #[inline]
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Playback duration in seconds at the current sample rate
    pub fn duration_secs(&self) -> f64 {
        self.groups.len() as f64 / self.sample_rate as f64
    }

    /// Collect one channel's samples, or `None` if the channel doesn't exist
    pub fn channel_samples(&self, channel: usize) -> Option<Vec<Sample>> {
        if channel >= self.channels as usize {
            return None;
        }
        self.groups.iter().map(|group| group.get(channel)).collect()
    }

    // ------------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------------

    /// Append one channel group, keeping data size in step
    pub fn push_group(&mut self, group: ChannelGroup) -> Result<()> {
        self.check_group(&group)?;
        let data_size = derived_data_size(self.bit_depth, self.channels, self.groups.len() + 1)?;
        self.groups.push(group);
        self.data_size = data_size;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Check every buffer invariant
    ///
    /// # Errors
    /// * `ChannelCountMismatch` - no channels, or a group has the wrong number of samples
    /// * `InvalidSampleRate` - the sample rate is zero
    /// * `SampleWidthMismatch` - a sample is stored at the wrong width
    /// * `Overflow` - data size disagrees with the sample sequence
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(WavError::ChannelCountMismatch {
                expected: 1,
                found: 0,
            });
        }
        if self.sample_rate == 0 {
            return Err(WavError::InvalidSampleRate { rate: 0 });
        }

        for group in &self.groups {
            self.check_group(group)?;
        }

        let expected = derived_data_size(self.bit_depth, self.channels, self.groups.len())?;
        if expected != self.data_size {
            return Err(WavError::overflow(format!(
                "data size {} does not match {} channel groups ({} bytes)",
                self.data_size,
                self.groups.len(),
                expected
            )));
        }

        Ok(())
    }

    pub(crate) fn check_group(&self, group: &ChannelGroup) -> Result<()> {
        if group.len() != self.channels as usize {
            return Err(WavError::ChannelCountMismatch {
                expected: self.channels,
                found: group.len().min(u16::MAX as usize) as u16,
            });
        }
        for sample in group {
            if sample.bit_depth() != self.bit_depth {
                return Err(WavError::SampleWidthMismatch {
                    expected: self.bit_depth.bits(),
                    found: sample.bit_depth().bits(),
                });
            }
        }
        Ok(())
    }
}
