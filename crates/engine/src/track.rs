use std::path::PathBuf;

use crate::backend::ProbedTrack;

/// The in-memory track currently being edited within the session.
///
/// Muting never touches the file on disk: it clears `audio_enabled`, and
/// export jobs derive their audio handling from [`WorkingTrack::include_audio`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingTrack {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub has_audio_stream: bool,
    pub audio_enabled: bool,
}

impl WorkingTrack {
    pub fn from_probe(probed: ProbedTrack) -> Self {
        Self {
            path: probed.path,
            duration_seconds: probed.duration_seconds,
            has_audio_stream: probed.has_audio,
            audio_enabled: probed.has_audio,
        }
    }

    /// Whether exports of this track should carry audio.
    pub fn include_audio(&self) -> bool {
        self.has_audio_stream && self.audio_enabled
    }

    pub fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            path: self.path.clone(),
            duration_seconds: self.duration_seconds,
            has_audio_stream: self.has_audio_stream,
            audio_enabled: self.audio_enabled,
        }
    }
}

/// Immutable track view consumed by the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSnapshot {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub has_audio_stream: bool,
    pub audio_enabled: bool,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::WorkingTrack;
    use crate::backend::ProbedTrack;

    #[test]
    fn from_probe_enables_audio_only_when_a_stream_exists() {
        let with_audio = WorkingTrack::from_probe(ProbedTrack {
            path: PathBuf::from("demo.mp4"),
            duration_seconds: 12.0,
            has_audio: true,
        });
        assert!(with_audio.include_audio());

        let silent = WorkingTrack::from_probe(ProbedTrack {
            path: PathBuf::from("silent.mp4"),
            duration_seconds: 12.0,
            has_audio: false,
        });
        assert!(!silent.include_audio());
        assert!(!silent.audio_enabled);
    }

    #[test]
    fn muted_track_excludes_audio_from_exports() {
        let mut track = WorkingTrack::from_probe(ProbedTrack {
            path: PathBuf::from("demo.mp4"),
            duration_seconds: 12.0,
            has_audio: true,
        });
        track.audio_enabled = false;

        assert!(!track.include_audio());
        assert!(track.has_audio_stream);
    }
}
