use super::sink::{ClipKind, ClipSink};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

/// Publishes clips as uniquely named files in an output directory
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl ClipSink for FileSink {
    async fn publish(&self, kind: ClipKind, bytes: Vec<u8>) -> Result<PathBuf> {
        let dir = self.dir.clone();

        // tempfile is blocking, keep it off the runtime threads
        let path = tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;

            let mut file = tempfile::Builder::new()
                .prefix("channelkit-")
                .suffix(kind.extension())
                .tempfile_in(&dir)
                .context("Failed to create output file")?;

            file.write_all(&bytes)
                .context("Failed to write clip bytes")?;
            file.flush().context("Failed to flush clip")?;

            let (_, path) = file.keep().context("Failed to persist output file")?;
            Ok::<PathBuf, anyhow::Error>(path)
        })
        .await
        .context("spawn_blocking failed")??;

        tracing::info!("Published {} clip to {:?}", kind.mime_type(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("media"));

        let path = sink
            .publish(ClipKind::Wav, vec![1, 2, 3, 4])
            .await
            .unwrap();

        assert!(path.starts_with(dir.path().join("media")));
        assert_eq!(path.extension().unwrap(), "wav");
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_publish_uses_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().to_path_buf());

        let first = sink.publish(ClipKind::Png, vec![0]).await.unwrap();
        let second = sink.publish(ClipKind::Png, vec![0]).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(second.extension().unwrap(), "png");
    }
}
