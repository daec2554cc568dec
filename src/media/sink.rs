use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Kind of clip handed to a sink, used to pick the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Wav,
    Png,
}

impl ClipKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ClipKind::Wav => ".wav",
            ClipKind::Png => ".png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ClipKind::Wav => "audio/wav",
            ClipKind::Png => "image/png",
        }
    }
}

/// Consumer of finished media bytes
///
/// Implementations expose the bytes as something a player or viewer can open
/// and return where it ended up. The sink knows nothing about how the bytes
/// were produced.
#[async_trait]
pub trait ClipSink: Send + Sync {
    async fn publish(&self, kind: ClipKind, bytes: Vec<u8>) -> Result<PathBuf>;
}
