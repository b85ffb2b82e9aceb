//! Tempo/pitch scaling
//!
//! Both operations reinterpret the existing samples at a new rate. Nothing is
//! resampled, so duration and pitch move together.

use tracing::debug;

use crate::engine::Wav;
use crate::error::{Result, WavError};

impl Wav {
    /// Play back `factor` times faster (and higher)
    ///
    /// # Errors
    /// * `InvalidFactor` - factor is not positive and finite
    /// * `Overflow` - the new rate exceeds `u32::MAX`
    /// * `InvalidSampleRate` - the new rate truncates to zero
    pub fn speed_up(&mut self, factor: f64) -> Result<()> {
        check_factor(factor)?;
        let rate = self.sample_rate() as f64 * factor;
        self.set_playback_rate(rate)
    }

    /// Play back `factor` times slower (and lower)
    ///
    /// # Errors
    /// * `InvalidFactor` - factor is not positive and finite
    /// * `Overflow` - the new rate exceeds `u32::MAX` (factors below 1)
    /// * `InvalidSampleRate` - the new rate truncates to zero
    pub fn slow_down(&mut self, factor: f64) -> Result<()> {
        check_factor(factor)?;
        let rate = self.sample_rate() as f64 / factor;
        self.set_playback_rate(rate)
    }

    fn set_playback_rate(&mut self, rate: f64) -> Result<()> {
        if rate > u32::MAX as f64 {
            return Err(WavError::overflow(format!(
                "sample rate {:.0} exceeds u32",
                rate
            )));
        }
        // Truncates toward zero
        let new_rate = rate as u32;
        if new_rate == 0 {
            return Err(WavError::InvalidSampleRate { rate: new_rate });
        }

        let groups = self.channel_groups().to_vec();
        let rescaled = self.rebuild(self.channels(), new_rate, self.bit_depth(), groups)?;
        debug!(from_rate = self.sample_rate(), to_rate = new_rate, "rescaled playback rate");
        *self = rescaled;
        Ok(())
    }
}

fn check_factor(factor: f64) -> Result<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(WavError::InvalidFactor { factor });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BitDepth, ChannelGroup};
    use test_case::test_case;

    fn test_wav(sample_rate: u32) -> Wav {
        let groups = (0..10)
            .map(|i| ChannelGroup::from_values(&[i, -i], BitDepth::Bits16))
            .collect();
        Wav::from_channel_groups(2, sample_rate, BitDepth::Bits16, groups).unwrap()
    }

    // One byte per second per hertz, so very high rates still fit the header
    fn narrow_wav(sample_rate: u32) -> Wav {
        let groups = (0..4)
            .map(|i| ChannelGroup::from_values(&[i], BitDepth::Bits8))
            .collect();
        Wav::from_channel_groups(1, sample_rate, BitDepth::Bits8, groups).unwrap()
    }

    #[test]
    fn test_speed_up_scales_rate() {
        let mut wav = test_wav(44100);
        wav.speed_up(2.0).unwrap();
        assert_eq!(wav.sample_rate(), 88200);
        assert_eq!(wav.byte_rate(), 88200 * 4);
        assert_eq!(wav.num_channel_groups(), 10);
        assert!((wav.duration_secs() - 10.0 / 88200.0).abs() < 1e-12);
    }

    #[test]
    fn test_slow_down_scales_rate() {
        let mut wav = test_wav(44100);
        wav.slow_down(2.0).unwrap();
        assert_eq!(wav.sample_rate(), 22050);
        assert_eq!(wav.byte_rate(), 22050 * 4);
    }

    #[test]
    fn test_speed_then_slow_restores_rate() {
        for factor in [1.5, 2.0, 3.0, 0.75] {
            let mut wav = test_wav(44100);
            wav.speed_up(factor).unwrap();
            wav.slow_down(factor).unwrap();
            assert!(
                (wav.sample_rate() as i64 - 44100).abs() <= 1,
                "factor {} gave {}",
                factor,
                wav.sample_rate()
            );
        }
    }

    #[test]
    fn test_truncates_fractional_rate() {
        let mut wav = test_wav(44100);
        wav.speed_up(1.00001).unwrap();
        assert_eq!(wav.sample_rate(), 44100);
    }

    #[test]
    fn test_speed_up_overflow() {
        let mut wav = narrow_wav(u32::MAX / 2 + 1);
        let before = wav.clone();
        assert!(matches!(wav.speed_up(2.0), Err(WavError::Overflow { .. })));
        assert_eq!(wav, before);
    }

    #[test]
    fn test_slow_down_guards() {
        let mut wav = narrow_wav(3_000_000_000);
        assert!(matches!(wav.slow_down(0.5), Err(WavError::Overflow { .. })));

        let mut wav = test_wav(8000);
        assert!(matches!(
            wav.slow_down(10_000.0),
            Err(WavError::InvalidSampleRate { rate: 0 })
        ));
        assert_eq!(wav.sample_rate(), 8000);
    }

    #[test]
    fn test_rate_fits_but_byte_rate_overflows() {
        let mut wav = test_wav(44100);
        assert!(matches!(wav.speed_up(50_000.0), Err(WavError::Overflow { .. })));
        assert_eq!(wav.sample_rate(), 44100);
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-1.0 ; "negative")]
    #[test_case(f64::NAN ; "nan")]
    #[test_case(f64::INFINITY ; "infinite")]
    fn test_invalid_factor(factor: f64) {
        let mut wav = test_wav(44100);
        assert!(matches!(wav.speed_up(factor), Err(WavError::InvalidFactor { .. })));
        assert!(matches!(wav.slow_down(factor), Err(WavError::InvalidFactor { .. })));
        assert_eq!(wav.sample_rate(), 44100);
    }
}
