use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{MediaFfmpegError, Result};

/// Concatenated output is downscaled to this width, keeping aspect ratio.
pub const CONCAT_SCALE_WIDTH: u32 = 480;

const CONCAT_AUDIO_SAMPLE_RATE: u32 = 44_100;

/// Request payload for subclip export.
#[derive(Debug, Clone, PartialEq)]
pub struct SubclipRequest {
    pub input: PathBuf,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub include_audio: bool,
    pub output_path: PathBuf,
}

/// Request payload for concatenating tracks into one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatRequest {
    pub inputs: Vec<PathBuf>,
    pub include_audio: bool,
    pub output_path: PathBuf,
}

/// Request payload for substituting a track's audio stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAudioRequest {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub output_path: PathBuf,
}

/// Request payload for writing a track's audio stream to an audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractAudioRequest {
    pub input: PathBuf,
    pub output_path: PathBuf,
}

/// Writes the `[start, end)` excerpt of one input by decode -> trim -> re-encode.
pub fn export_subclip(request: &SubclipRequest) -> Result<()> {
    validate_subclip_request(request)?;
    run_ffmpeg(
        build_subclip_args(request),
        "ffmpeg subclip",
        &request.output_path,
    )
}

/// Concatenates the inputs in order into one re-encoded output file.
///
/// Every input is scaled to [`CONCAT_SCALE_WIDTH`] so mismatched resolutions
/// concatenate cleanly.
pub fn concat_tracks(request: &ConcatRequest) -> Result<()> {
    validate_concat_request(request)?;
    run_ffmpeg(
        build_concat_args(request),
        "ffmpeg concat",
        &request.output_path,
    )
}

/// Writes the video with its audio replaced by a separate audio file.
///
/// The output stops at the shorter of the two inputs.
pub fn replace_audio(request: &ReplaceAudioRequest) -> Result<()> {
    run_ffmpeg(
        build_replace_audio_args(request),
        "ffmpeg replace audio",
        &request.output_path,
    )
}

/// Writes the input's audio stream to a standalone MP3 file.
pub fn extract_audio(request: &ExtractAudioRequest) -> Result<()> {
    run_ffmpeg(
        build_extract_audio_args(request),
        "ffmpeg extract audio",
        &request.output_path,
    )
}

fn build_subclip_args(request: &SubclipRequest) -> Vec<OsString> {
    let mut args = base_args();
    args.push("-i".into());
    args.push(request.input.clone().into_os_string());
    args.push("-ss".into());
    args.push(format_seconds(request.start_seconds).into());
    args.push("-to".into());
    args.push(format_seconds(request.end_seconds).into());
    push_video_encode_args(&mut args);
    push_audio_encode_args(&mut args, request.include_audio);
    args.push(request.output_path.clone().into_os_string());
    args
}

fn build_concat_args(request: &ConcatRequest) -> Vec<OsString> {
    let mut args = base_args();
    for input in &request.inputs {
        args.push("-i".into());
        args.push(input.clone().into_os_string());
    }
    args.push("-filter_complex".into());
    args.push(build_concat_filter(request.inputs.len(), request.include_audio).into());
    args.push("-map".into());
    args.push("[vout]".into());
    push_video_encode_args(&mut args);
    if request.include_audio {
        args.push("-map".into());
        args.push("[aout]".into());
    }
    push_audio_encode_args(&mut args, request.include_audio);
    args.push(request.output_path.clone().into_os_string());
    args
}

fn build_replace_audio_args(request: &ReplaceAudioRequest) -> Vec<OsString> {
    let mut args = base_args();
    args.push("-i".into());
    args.push(request.video.clone().into_os_string());
    args.push("-i".into());
    args.push(request.audio.clone().into_os_string());
    args.push("-map".into());
    args.push("0:v:0".into());
    args.push("-map".into());
    args.push("1:a:0".into());
    push_video_encode_args(&mut args);
    push_audio_encode_args(&mut args, true);
    args.push("-shortest".into());
    args.push(request.output_path.clone().into_os_string());
    args
}

fn build_extract_audio_args(request: &ExtractAudioRequest) -> Vec<OsString> {
    let mut args = base_args();
    args.push("-i".into());
    args.push(request.input.clone().into_os_string());
    args.push("-vn".into());
    args.push("-c:a".into());
    args.push("libmp3lame".into());
    args.push(request.output_path.clone().into_os_string());
    args
}

fn build_concat_filter(input_count: usize, include_audio: bool) -> String {
    let mut chains = Vec::<String>::with_capacity(input_count * 2 + 1);
    for index in 0..input_count {
        chains.push(format!(
            "[{index}:v:0]scale={CONCAT_SCALE_WIDTH}:-2,setsar=1[v{index}]"
        ));
        if include_audio {
            chains.push(format!(
                "[{index}:a:0]aresample={CONCAT_AUDIO_SAMPLE_RATE}:async=1:first_pts=0,\
aformat=sample_rates={CONCAT_AUDIO_SAMPLE_RATE}:channel_layouts=stereo[a{index}]"
            ));
        }
    }

    let mut concat_inputs = String::new();
    for index in 0..input_count {
        if include_audio {
            concat_inputs.push_str(&format!("[v{index}][a{index}]"));
        } else {
            concat_inputs.push_str(&format!("[v{index}]"));
        }
    }
    let audio_outputs = if include_audio { 1 } else { 0 };
    let output_labels = if include_audio { "[vout][aout]" } else { "[vout]" };
    chains.push(format!(
        "{concat_inputs}concat=n={input_count}:v=1:a={audio_outputs}{output_labels}"
    ));

    chains.join(";")
}

fn base_args() -> Vec<OsString> {
    vec!["-hide_banner".into(), "-v".into(), "error".into(), "-y".into()]
}

fn push_video_encode_args(args: &mut Vec<OsString>) {
    args.push("-c:v".into());
    args.push("libx264".into());
    args.push("-pix_fmt".into());
    args.push("yuv420p".into());
}

fn push_audio_encode_args(args: &mut Vec<OsString>, include_audio: bool) {
    if include_audio {
        args.push("-c:a".into());
        args.push("aac".into());
    } else {
        args.push("-an".into());
    }
}

fn format_seconds(seconds: f64) -> String {
    format!("{seconds:.3}")
}

fn validate_subclip_request(request: &SubclipRequest) -> Result<()> {
    if !request.start_seconds.is_finite() || !request.end_seconds.is_finite() {
        return Err(MediaFfmpegError::InvalidJob {
            reason: "subclip range is not finite",
        });
    }
    if request.start_seconds < 0.0 {
        return Err(MediaFfmpegError::InvalidJob {
            reason: "subclip start is negative",
        });
    }
    if request.end_seconds <= request.start_seconds {
        return Err(MediaFfmpegError::InvalidJob {
            reason: "subclip range is not positive",
        });
    }
    Ok(())
}

fn validate_concat_request(request: &ConcatRequest) -> Result<()> {
    if request.inputs.is_empty() {
        return Err(MediaFfmpegError::InvalidJob {
            reason: "concat inputs are empty",
        });
    }
    Ok(())
}

fn run_ffmpeg(args: Vec<OsString>, context: &'static str, output_path: &Path) -> Result<()> {
    let output = Command::new("ffmpeg")
        .args(&args)
        .output()
        .map_err(|source| MediaFfmpegError::Io { context, source })?;
    if !output.status.success() {
        return Err(MediaFfmpegError::CommandFailed {
            command: format!("{context} {}", output_path.display()),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}
