use std::path::{Path, PathBuf};

use crate::error::Result;

/// Result of probing one media file for import.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedTrack {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub has_audio: bool,
}

/// Subclip export job derived from the current range selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SubclipJob {
    pub input: PathBuf,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub include_audio: bool,
    pub output: PathBuf,
}

/// Concatenation job; `inputs` already includes the working track first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatJob {
    pub inputs: Vec<PathBuf>,
    pub include_audio: bool,
    pub output: PathBuf,
}

/// Audio substitution job; one-shot, leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAudioJob {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub output: PathBuf,
}

/// Audio extraction job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractAudioJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Media operations required by the session.
pub trait MediaBackend {
    /// Probes track metadata for loading.
    fn probe(&self, path: &Path) -> Result<ProbedTrack>;

    /// Writes a time-bounded excerpt of a track.
    fn write_subclip(&self, job: &SubclipJob) -> Result<()>;

    /// Concatenates tracks into one output file.
    fn concatenate(&self, job: &ConcatJob) -> Result<()>;

    /// Writes a track with its audio replaced by a separate audio file.
    fn replace_audio(&self, job: &ReplaceAudioJob) -> Result<()>;

    /// Writes a track's audio stream to a standalone audio file.
    fn extract_audio(&self, job: &ExtractAudioJob) -> Result<()>;
}

/// FFmpeg CLI-backed backend used by production wiring.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegMediaBackend;

impl MediaBackend for FfmpegMediaBackend {
    fn probe(&self, path: &Path) -> Result<ProbedTrack> {
        let info = media_ffmpeg::probe_track(path)?;
        Ok(ProbedTrack {
            path: info.path,
            duration_seconds: info.duration_seconds,
            has_audio: info.has_audio,
        })
    }

    fn write_subclip(&self, job: &SubclipJob) -> Result<()> {
        let request = media_ffmpeg::SubclipRequest {
            input: job.input.clone(),
            start_seconds: job.start_seconds,
            end_seconds: job.end_seconds,
            include_audio: job.include_audio,
            output_path: job.output.clone(),
        };
        media_ffmpeg::export_subclip(&request)?;
        Ok(())
    }

    fn concatenate(&self, job: &ConcatJob) -> Result<()> {
        let request = media_ffmpeg::ConcatRequest {
            inputs: job.inputs.clone(),
            include_audio: job.include_audio,
            output_path: job.output.clone(),
        };
        media_ffmpeg::concat_tracks(&request)?;
        Ok(())
    }

    fn replace_audio(&self, job: &ReplaceAudioJob) -> Result<()> {
        let request = media_ffmpeg::ReplaceAudioRequest {
            video: job.video.clone(),
            audio: job.audio.clone(),
            output_path: job.output.clone(),
        };
        media_ffmpeg::replace_audio(&request)?;
        Ok(())
    }

    fn extract_audio(&self, job: &ExtractAudioJob) -> Result<()> {
        let request = media_ffmpeg::ExtractAudioRequest {
            input: job.input.clone(),
            output_path: job.output.clone(),
        };
        media_ffmpeg::extract_audio(&request)?;
        Ok(())
    }
}
