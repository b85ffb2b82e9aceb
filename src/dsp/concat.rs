//! Concatenation
//!
//! Splices one buffer onto the end of another after reconciling their
//! layouts. Reconciliation runs in a fixed order:
//! 1. channel count (a mono operand is duplicated up to stereo)
//! 2. sample rate (the base is resampled to the addition's rate)
//! 3. bit depth (both operands are widened to the wider depth)

use std::borrow::Cow;

use tracing::debug;

use crate::dsp::resample::ResamplerConfig;
use crate::engine::{BitDepth, ChannelGroup, Wav};
use crate::error::{Result, WavError};

impl Wav {
    /// Append `addition` to this buffer using the default resampler config.
    ///
    /// `addition` is never modified. On error this buffer is left unchanged.
    pub fn concat(&mut self, addition: &Wav) -> Result<()> {
        self.concat_with(addition, &ResamplerConfig::default())
    }

    /// Append `addition` to this buffer, resampling with `config` when the
    /// rates differ.
    ///
    /// # Errors
    /// * `ChannelCountMismatch` - the channel counts differ and are not 1 and 2
    /// * `Overflow` - a reconciled header field or the total size exceeds its width
    /// * any resampling error
    pub fn concat_with(&mut self, addition: &Wav, config: &ResamplerConfig) -> Result<()> {
        let joined = self.concatenated(addition, config)?;
        debug!(
            groups = joined.num_channel_groups(),
            channels = joined.channels(),
            sample_rate = joined.sample_rate(),
            bits = joined.bits_per_sample(),
            "concatenated buffers"
        );
        *self = joined;
        Ok(())
    }

    fn concatenated(&self, addition: &Wav, config: &ResamplerConfig) -> Result<Wav> {
        let (base, addition) = reconcile_channels(self, addition)?;

        let base = if base.sample_rate() != addition.sample_rate() {
            debug!(
                from_rate = base.sample_rate(),
                to_rate = addition.sample_rate(),
                "resampling base to match addition"
            );
            Cow::Owned(base.resampled(addition.sample_rate(), config)?)
        } else {
            base
        };

        let depth = base.bit_depth().max(addition.bit_depth());
        let mut groups = Vec::with_capacity(base.num_channel_groups() + addition.num_channel_groups());
        for group in base.channel_groups().iter().chain(addition.channel_groups()) {
            groups.push(widen_group(group, depth)?);
        }

        base.rebuild(base.channels(), addition.sample_rate(), depth, groups)
    }
}

/// Bring both operands to the same channel count without touching either
fn reconcile_channels<'a>(base: &'a Wav, addition: &'a Wav) -> Result<(Cow<'a, Wav>, Cow<'a, Wav>)> {
    match (base.channels(), addition.channels()) {
        (a, b) if a == b => Ok((Cow::Borrowed(base), Cow::Borrowed(addition))),
        (1, 2) => {
            debug!("duplicating mono base to stereo");
            Ok((Cow::Owned(base.to_stereo()?), Cow::Borrowed(addition)))
        }
        (2, 1) => {
            debug!("duplicating mono addition to stereo");
            Ok((Cow::Borrowed(base), Cow::Owned(addition.to_stereo()?)))
        }
        (expected, found) => Err(WavError::ChannelCountMismatch { expected, found }),
    }
}

fn widen_group(group: &ChannelGroup, depth: BitDepth) -> Result<ChannelGroup> {
    group
        .iter()
        .map(|sample| {
            sample.widen(depth).ok_or(WavError::SampleWidthMismatch {
                expected: depth.bits(),
                found: sample.bit_depth().bits(),
            })
        })
        .collect()
}
