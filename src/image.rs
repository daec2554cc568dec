use crate::media::{ClipKind, ClipSink};
use anyhow::{Context, Result};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize,
};
use base64::Engine as _;
use std::path::PathBuf;

/// One-shot image generation through an OpenAI-compatible `images` endpoint
pub struct ImageGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ImageGenerator {
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Generate a single image and publish the PNG
    pub async fn generate(
        &self,
        sink: &dyn ClipSink,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<PathBuf> {
        tracing::info!("Requesting image at {}: {} chars", aspect_ratio, prompt.len());

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(ImageModel::Other(self.model.clone()))
            .n(1)
            .response_format(ImageResponseFormat::B64Json)
            .size(image_size(aspect_ratio)?)
            .build()
            .context("Failed to build image request")?;

        let response = self
            .client
            .images()
            .create(request)
            .await
            .context("Image API call failed")?;

        let image = response
            .data
            .first()
            .ok_or_else(|| anyhow::anyhow!("No image data returned from API"))?;
        let png = decode_image(image)?;

        sink.publish(ClipKind::Png, png).await
    }
}

/// Closest supported output size for an aspect ratio
///
/// 4:3 and 3:4 have no exact size and fall back to the wide and tall formats.
pub fn image_size(aspect_ratio: &str) -> Result<ImageSize> {
    let size = match aspect_ratio {
        "1:1" => ImageSize::S1024x1024,
        "16:9" | "4:3" => ImageSize::S1792x1024,
        "9:16" | "3:4" => ImageSize::S1024x1792,
        other => return Err(anyhow::anyhow!("Unsupported aspect ratio: {}", other)),
    };
    Ok(size)
}

fn decode_image(image: &Image) -> Result<Vec<u8>> {
    match image {
        Image::B64Json { b64_json, .. } => base64::engine::general_purpose::STANDARD
            .decode(b64_json.as_bytes())
            .context("Image data is not valid base64"),
        Image::Url { .. } => Err(anyhow::anyhow!("No image data returned from API")),
    }
}
