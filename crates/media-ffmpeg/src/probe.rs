use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};

/// Stream kind discovered by probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

/// Track metadata read from `ffprobe`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackInfo {
    pub path: PathBuf,
    pub duration_seconds: f64,
    pub has_video: bool,
    pub has_audio: bool,
}

/// Probes a media file via `ffprobe`.
///
/// # Example
/// ```no_run
/// use media_ffmpeg::probe_track;
///
/// let info = probe_track("sample.mp4").expect("probe should succeed");
/// assert!(info.duration_seconds > 0.0);
/// ```
pub fn probe_track(path: impl AsRef<Path>) -> Result<TrackInfo> {
    let path = path.as_ref();

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "stream=codec_type",
            "-of",
            "compact=p=0:nk=0",
        ])
        .arg(path)
        .output()
        .map_err(|source| MediaFfmpegError::Io {
            context: "run ffprobe stream probe",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::CommandFailed {
            command: command_for_display("ffprobe stream probe", path),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    let mut kinds = Vec::new();
    for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
        kinds.push(parse_stream_line(line)?);
    }

    if kinds.is_empty() {
        return Err(MediaFfmpegError::Parse {
            context: "streams",
            value: "no streams found".to_string(),
        });
    }

    let duration_seconds = probe_duration_seconds(path)?
        .ok_or_else(|| MediaFfmpegError::MissingDuration(path.to_path_buf()))?;

    Ok(TrackInfo {
        path: path.to_path_buf(),
        duration_seconds,
        has_video: kinds.contains(&StreamKind::Video),
        has_audio: kinds.contains(&StreamKind::Audio),
    })
}

fn parse_stream_line(line: &str) -> Result<StreamKind> {
    let codec_type = line
        .split('|')
        .find_map(|field| field.trim().strip_prefix("codec_type="))
        .ok_or_else(|| MediaFfmpegError::Parse {
            context: "codec_type",
            value: line.to_string(),
        })?;

    Ok(match codec_type.trim_matches('"') {
        "video" => StreamKind::Video,
        "audio" => StreamKind::Audio,
        _ => StreamKind::Other,
    })
}

fn probe_duration_seconds(path: &Path) -> Result<Option<f64>> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=nokey=1:noprint_wrappers=1",
        ])
        .arg(path)
        .output()
        .map_err(|source| MediaFfmpegError::Io {
            context: "run ffprobe duration probe",
            source,
        })?;

    if !output.status.success() {
        return Err(MediaFfmpegError::CommandFailed {
            command: command_for_display("ffprobe duration probe", path),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8(output.stdout)?;
    let value = stdout.trim();
    if value.is_empty() || value == "N/A" {
        return Ok(None);
    }
    let duration = value.parse::<f64>().map_err(|_| MediaFfmpegError::Parse {
        context: "format duration seconds",
        value: value.to_string(),
    })?;
    Ok(Some(duration))
}

fn command_for_display(context: &str, path: &Path) -> String {
    format!("{context}: ffprobe {}", path.display())
}
