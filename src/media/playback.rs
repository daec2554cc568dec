use rodio::OutputStreamBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Play a published clip on the default output device
///
/// Failures are logged and swallowed; the clip is still on disk either way.
pub async fn play_clip(path: PathBuf) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = play_clip_blocking(&path) {
            tracing::warn!("Failed to play clip {}: {}", path.display(), e);
        }
    })
    .await
    .ok();
}

fn play_clip_blocking(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)?;

    let stream_handle = OutputStreamBuilder::open_default_stream()?;
    let sink = rodio::play(stream_handle.mixer(), BufReader::new(file))?;
    sink.sleep_until_end();

    Ok(())
}
