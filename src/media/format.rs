// NOTE: Speech models hand back headerless 16-bit signed PCM. The sample rate is
// a fixed property of the model, so it comes from configuration rather than the
// payload itself.

use super::wav::WavError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl AudioFormat {
    pub const PCM16: u16 = 16;

    /// Mono 16-bit PCM at the given rate
    pub fn pcm16_mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: Self::PCM16,
        }
    }

    /// Bytes in one frame (one sample for every channel)
    pub fn block_align(&self) -> Result<u16, WavError> {
        self.validate()?;
        self.channels
            .checked_mul(self.bits_per_sample / 8)
            .ok_or_else(|| {
                WavError::InvalidParameter(format!(
                    "block align overflows: {} channels x {} bits",
                    self.channels, self.bits_per_sample
                ))
            })
    }

    /// Bytes of audio per second of playback
    pub fn byte_rate(&self) -> Result<u32, WavError> {
        let block_align = self.block_align()?;
        self.sample_rate
            .checked_mul(u32::from(block_align))
            .ok_or_else(|| {
                WavError::InvalidParameter(format!(
                    "byte rate overflows: {} Hz x {} bytes per frame",
                    self.sample_rate, block_align
                ))
            })
    }

    pub fn validate(&self) -> Result<(), WavError> {
        if self.sample_rate == 0 {
            return Err(WavError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }

        if self.channels == 0 {
            return Err(WavError::InvalidParameter(
                "channel count must be positive".to_string(),
            ));
        }

        if self.bits_per_sample == 0 || self.bits_per_sample % 8 != 0 {
            return Err(WavError::InvalidParameter(format!(
                "bits per sample must be a positive multiple of 8, got {}",
                self.bits_per_sample
            )));
        }

        Ok(())
    }

    /// Playback length of a payload, assuming it is frame aligned
    pub fn duration_secs(&self, payload_len: usize) -> f32 {
        match self.byte_rate() {
            Ok(rate) => payload_len as f32 / rate as f32,
            Err(_) => 0.0,
        }
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::pcm16_mono(24000)
    }
}
