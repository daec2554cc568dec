use super::format::AudioFormat;
use thiserror::Error;

/// Size of the canonical RIFF/WAVE header written by [`encode`]
pub const HEADER_LEN: usize = 44;

const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WavError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed input: {len} bytes is not a multiple of the {block_align}-byte frame")]
    MalformedInput { len: usize, block_align: u16 },

    #[error("payload too large for a WAV container: {0} bytes")]
    PayloadTooLarge(usize),
}

/// Wrap raw little-endian PCM in a WAV container
///
/// The payload is copied verbatim after a 44-byte header. Payloads that end in a
/// partial frame are rejected rather than truncated or padded.
pub fn encode(pcm: &[u8], format: AudioFormat) -> Result<Vec<u8>, WavError> {
    let block_align = format.block_align()?;
    let byte_rate = format.byte_rate()?;

    if pcm.len() % usize::from(block_align) != 0 {
        return Err(WavError::MalformedInput {
            len: pcm.len(),
            block_align,
        });
    }

    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|len| *len <= u32::MAX - 36)
        .ok_or(WavError::PayloadTooLarge(pcm.len()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());

    // RIFF chunk
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&format.channels.to_le_bytes());
    out.extend_from_slice(&format.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);

    debug_assert_eq!(out.len(), HEADER_LEN + pcm.len());
    Ok(out)
}

/// Mono 16-bit shorthand, the shape speech models return
pub fn encode_pcm16_mono(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, WavError> {
    encode(pcm, AudioFormat::pcm16_mono(sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_header_layout() {
        let pcm = [0x00, 0x01, 0x02, 0x03];
        let wav = encode_pcm16_mono(&pcm, 24000).unwrap();

        assert_eq!(wav.len(), 48);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 40);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 24000);
        assert_eq!(u32_at(&wav, 28), 48000);
        assert_eq!(u16_at(&wav, 32), 2);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 4);
        assert_eq!(&wav[44..], &pcm);
    }

    #[test]
    fn test_empty_payload() {
        let wav = encode_pcm16_mono(&[], 16000).unwrap();

        assert_eq!(wav.len(), HEADER_LEN);
        assert_eq!(u32_at(&wav, 4), 36);
        assert_eq!(u32_at(&wav, 40), 0);
        assert_eq!(u32_at(&wav, 24), 16000);
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let err = encode_pcm16_mono(&[0, 0], 0).unwrap_err();
        assert!(matches!(err, WavError::InvalidParameter(_)));
    }

    #[test]
    fn test_partial_frame_rejected() {
        assert_eq!(
            encode_pcm16_mono(&[1, 2, 3], 24000),
            Err(WavError::MalformedInput {
                len: 3,
                block_align: 2
            })
        );

        let stereo = AudioFormat {
            sample_rate: 48000,
            channels: 2,
            bits_per_sample: 16,
        };
        assert!(matches!(
            encode(&[0; 6], stereo),
            Err(WavError::MalformedInput { block_align: 4, .. })
        ));
        assert_eq!(encode(&[0; 8], stereo).unwrap().len(), 52);
    }

    #[test]
    fn test_payload_is_copied_verbatim() {
        let pcm: Vec<u8> = (0..=255u8).cycle().take(4800).collect();
        let wav = encode_pcm16_mono(&pcm, 24000).unwrap();

        assert_eq!(wav.len(), HEADER_LEN + pcm.len());
        assert_eq!(u32_at(&wav, 4) as usize, 36 + pcm.len());
        assert_eq!(u32_at(&wav, 40) as usize, pcm.len());
        assert_eq!(&wav[HEADER_LEN..], pcm.as_slice());
    }

    #[test]
    fn test_idempotent() {
        let pcm = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
        assert_eq!(
            encode_pcm16_mono(&pcm, 22050).unwrap(),
            encode_pcm16_mono(&pcm, 22050).unwrap()
        );
    }

    #[test]
    fn test_decodes_with_hound() {
        let samples: Vec<i16> = vec![0, 1000, -1000, i16::MAX, i16::MIN, 42];
        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let wav = encode_pcm16_mono(&pcm, 24000).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }
}
