use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by the engine crate.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors produced by session commands.
#[derive(Debug)]
pub enum SessionError {
    InvalidDuration {
        path: PathBuf,
        seconds: f64,
    },
    TrackHasNoAudio {
        path: PathBuf,
    },
    Media(media_ffmpeg::MediaFfmpegError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDuration { path, seconds } => {
                write!(
                    f,
                    "track duration is invalid ({seconds}s): {}",
                    path.display()
                )
            }
            Self::TrackHasNoAudio { path } => {
                write!(f, "track has no audio to extract: {}", path.display())
            }
            Self::Media(err) => write!(f, "media backend error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Media(err) => Some(err),
            _ => None,
        }
    }
}

impl From<media_ffmpeg::MediaFfmpegError> for SessionError {
    fn from(value: media_ffmpeg::MediaFfmpegError) -> Self {
        Self::Media(value)
    }
}
