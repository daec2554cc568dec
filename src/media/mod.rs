pub mod file_sink;
pub mod format;
pub mod playback;
pub mod sink;
pub mod wav;

pub use file_sink::FileSink;
pub use format::AudioFormat;
pub use sink::{ClipKind, ClipSink};
pub use wav::encode_pcm16_mono;
