use crate::media::{AudioFormat, ClipKind, ClipSink, encode_pcm16_mono};
use anyhow::{Context, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice};
use async_trait::async_trait;
use std::path::PathBuf;

/// Headerless PCM returned by a speech model
pub struct PcmClip {
    pub pcm: Vec<u8>,
    /// Rate the model is known to produce; not read from the payload
    pub sample_rate: u32,
}

/// Anything that turns text into raw 16-bit mono PCM
#[async_trait]
pub trait SpeechSource: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<PcmClip>;
}

/// Speech from an OpenAI-compatible `audio/speech` endpoint
pub struct OpenAiSpeech {
    client: Client<OpenAIConfig>,
    model: String,
    sample_rate: u32,
}

impl OpenAiSpeech {
    pub fn new(client: Client<OpenAIConfig>, model: String, sample_rate: u32) -> Self {
        Self {
            client,
            model,
            sample_rate,
        }
    }
}

#[async_trait]
impl SpeechSource for OpenAiSpeech {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<PcmClip> {
        tracing::info!("Requesting speech: {} chars, voice {}", text.len(), voice);

        let request = CreateSpeechRequestArgs::default()
            .input(text)
            .model(SpeechModel::Other(self.model.clone()))
            .voice(parse_voice(voice)?)
            .response_format(SpeechResponseFormat::Pcm)
            .build()
            .context("Failed to build speech request")?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .context("Speech API call failed")?;

        Ok(PcmClip {
            pcm: response.bytes.to_vec(),
            sample_rate: self.sample_rate,
        })
    }
}

pub fn parse_voice(name: &str) -> Result<Voice> {
    let voice = match name.to_ascii_lowercase().as_str() {
        "alloy" => Voice::Alloy,
        "echo" => Voice::Echo,
        "fable" => Voice::Fable,
        "onyx" => Voice::Onyx,
        "nova" => Voice::Nova,
        "shimmer" => Voice::Shimmer,
        other => return Err(anyhow::anyhow!("Unknown voice: {}", other)),
    };
    Ok(voice)
}

/// Synthesize `text`, wrap the PCM in a WAV container and publish it
pub async fn generate_speech(
    source: &dyn SpeechSource,
    sink: &dyn ClipSink,
    text: &str,
    voice: &str,
) -> Result<PathBuf> {
    let clip = source.synthesize(text, voice).await?;

    if clip.pcm.is_empty() {
        return Err(anyhow::anyhow!("No audio data returned"));
    }

    let wav = encode_pcm16_mono(&clip.pcm, clip.sample_rate)
        .context("Failed to encode speech as WAV")?;
    tracing::info!(
        "Encoded {:.1}s of speech ({} bytes)",
        AudioFormat::pcm16_mono(clip.sample_rate).duration_secs(clip.pcm.len()),
        wav.len()
    );

    sink.publish(ClipKind::Wav, wav).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::FileSink;
    use crate::media::wav::HEADER_LEN;

    struct FixedSpeech(Vec<u8>);

    #[async_trait]
    impl SpeechSource for FixedSpeech {
        async fn synthesize(&self, _text: &str, _voice: &str) -> Result<PcmClip> {
            Ok(PcmClip {
                pcm: self.0.clone(),
                sample_rate: 24000,
            })
        }
    }

    #[tokio::test]
    async fn test_pipeline_publishes_playable_wav() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().to_path_buf());
        let samples: Vec<i16> = (0..240).map(|i| (i * 100) as i16).collect();
        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        let path = generate_speech(&FixedSpeech(pcm.clone()), &sink, "hello", "nova")
            .await
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), HEADER_LEN + pcm.len());
        assert_eq!(&bytes[HEADER_LEN..], pcm.as_slice());

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24000);
        assert_eq!(reader.len() as usize, samples.len());
    }

    #[tokio::test]
    async fn test_pipeline_rejects_empty_audio() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().to_path_buf());

        let err = generate_speech(&FixedSpeech(Vec::new()), &sink, "hello", "nova")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No audio data returned");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_pipeline_rejects_partial_frame() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().to_path_buf());

        let result = generate_speech(&FixedSpeech(vec![1, 2, 3]), &sink, "hi", "nova").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_voice() {
        assert!(matches!(parse_voice("Nova").unwrap(), Voice::Nova));
        assert!(matches!(parse_voice("onyx").unwrap(), Voice::Onyx));
        assert!(parse_voice("kore").is_err());
    }
}
