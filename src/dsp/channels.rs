//! Mono/stereo conversion

use tracing::debug;

use crate::engine::{ChannelGroup, Sample, Wav};
use crate::error::{Result, WavError};

impl Wav {
    /// Fold a stereo buffer down to mono.
    ///
    /// Each group becomes the rounding-down average of its two samples,
    /// computed at the buffer's own width. A group whose channels are equal
    /// keeps its value exactly.
    ///
    /// This is `floor((first + second) / 2)`, not `first / 2 + second / 2`
    /// with truncating division. The two disagree on some unequal pairs:
    /// `(3, 5)` gives 4 rather than 3, and `(-3, -4)` gives -4 rather than -3.
    ///
    /// # Errors
    /// * `ChannelCountMismatch` - the buffer is not stereo
    pub fn convert_to_mono(&mut self) -> Result<()> {
        let mono = self.to_mono()?;
        *self = mono;
        Ok(())
    }

    /// Duplicate a mono buffer's channel into left and right.
    ///
    /// # Errors
    /// * `ChannelCountMismatch` - the buffer is not mono
    /// * `Overflow` - the doubled data size would not fit in 32 bits
    pub fn convert_to_stereo(&mut self) -> Result<()> {
        let stereo = self.to_stereo()?;
        *self = stereo;
        Ok(())
    }

    pub(crate) fn to_mono(&self) -> Result<Wav> {
        if self.channels() != 2 {
            return Err(WavError::ChannelCountMismatch {
                expected: 2,
                found: self.channels(),
            });
        }

        let groups = self
            .channel_groups()
            .iter()
            .map(|group| -> Result<ChannelGroup> {
                match group.samples() {
                    [first, second] => Ok(ChannelGroup::new(vec![Sample::average(*first, *second)?])),
                    other => Err(WavError::ChannelCountMismatch {
                        expected: 2,
                        found: other.len() as u16,
                    }),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(groups = groups.len(), "converted stereo to mono");
        self.rebuild(1, self.sample_rate(), self.bit_depth(), groups)
    }

    pub(crate) fn to_stereo(&self) -> Result<Wav> {
        if self.channels() != 1 {
            return Err(WavError::ChannelCountMismatch {
                expected: 1,
                found: self.channels(),
            });
        }
        if self.data_size() > u32::MAX / 2 {
            return Err(WavError::overflow(format!(
                "data size {} is too large to convert to stereo",
                self.data_size()
            )));
        }

        let groups = self
            .channel_groups()
            .iter()
            .map(|group| match group.samples() {
                [only] => Ok(ChannelGroup::new(vec![*only, *only])),
                other => Err(WavError::ChannelCountMismatch {
                    expected: 1,
                    found: other.len() as u16,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(groups = groups.len(), "converted mono to stereo");
        self.rebuild(2, self.sample_rate(), self.bit_depth(), groups)
    }
}
