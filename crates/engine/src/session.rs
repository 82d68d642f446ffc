use std::path::PathBuf;

use tracing::{debug, info};

use crate::backend::{
    ConcatJob, ExtractAudioJob, FfmpegMediaBackend, MediaBackend, ReplaceAudioJob, SubclipJob,
};
use crate::error::{Result, SessionError};
use crate::mute::{MuteCache, MuteDecision, MuteState};
use crate::range::RangeSelector;
use crate::track::{TrackSnapshot, WorkingTrack};

/// Commands accepted by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Loads a track, resetting the range selection and the mute cache.
    Load {
        path: PathBuf,
    },
    SetRangeStart {
        seconds: f64,
    },
    SetRangeEnd {
        seconds: f64,
    },
    /// Writes the selected `[start, end]` excerpt of the working track.
    ExtractSubclip {
        output: PathBuf,
    },
    /// Concatenates the working track followed by `inputs` into `output`.
    Concatenate {
        inputs: Vec<PathBuf>,
        output: PathBuf,
    },
    /// Applies one three-way mute decision to the working track.
    Mute {
        decision: MuteDecision,
    },
    /// Writes the working track with its audio substituted by `audio`.
    ReplaceAudio {
        audio: PathBuf,
        output: PathBuf,
    },
    /// Writes the working track's audio stream to `output`.
    ExtractAudio {
        output: PathBuf,
    },
}

/// Events emitted by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TrackLoaded(TrackSnapshot),
    RangeChanged {
        start: f64,
        end: f64,
        total_duration: f64,
    },
    MuteStateChanged {
        state: MuteState,
    },
    SubclipWritten {
        path: PathBuf,
    },
    ConcatenateFinished {
        path: PathBuf,
    },
    AudioReplaced {
        path: PathBuf,
    },
    AudioExtracted {
        path: PathBuf,
    },
    Error(SessionErrorEvent),
}

/// User-facing error payload emitted as an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    TrackHasNoAudio,
    OperationFailed,
}

impl From<&SessionError> for SessionErrorKind {
    fn from(value: &SessionError) -> Self {
        match value {
            SessionError::TrackHasNoAudio { .. } => Self::TrackHasNoAudio,
            _ => Self::OperationFailed,
        }
    }
}

/// User-facing error payload emitted as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionErrorEvent {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionErrorEvent {
    pub fn from_error(error: &SessionError) -> Self {
        Self {
            kind: SessionErrorKind::from(error),
            message: error.to_string(),
        }
    }
}

/// Editing session owning the working track, range selection, and mute cache.
///
/// Commands that need a track are silent no-ops while none is loaded: they
/// return an empty event list rather than an error.
#[derive(Debug)]
pub struct Session<M> {
    media: M,
    track: Option<WorkingTrack>,
    range: RangeSelector,
    mute: MuteCache,
}

impl<M> Session<M>
where
    M: MediaBackend,
{
    /// Creates a session with the provided media backend.
    ///
    /// # Example
    /// ```no_run
    /// use engine::{FfmpegMediaBackend, Session};
    ///
    /// let _session = Session::new(FfmpegMediaBackend);
    /// ```
    pub fn new(media: M) -> Self {
        Self {
            media,
            track: None,
            range: RangeSelector::default(),
            mute: MuteCache::new(),
        }
    }

    /// Applies one command and returns emitted events.
    pub fn handle_command(&mut self, command: Command) -> Result<Vec<Event>> {
        match command {
            Command::Load { path } => self.load(path),
            Command::SetRangeStart { seconds } => self.set_range_start(seconds),
            Command::SetRangeEnd { seconds } => self.set_range_end(seconds),
            Command::ExtractSubclip { output } => self.extract_subclip(output),
            Command::Concatenate { inputs, output } => self.concatenate(inputs, output),
            Command::Mute { decision } => self.mute(decision),
            Command::ReplaceAudio { audio, output } => self.replace_audio(audio, output),
            Command::ExtractAudio { output } => self.extract_audio(output),
        }
    }

    fn load(&mut self, path: PathBuf) -> Result<Vec<Event>> {
        let probed = self.media.probe(&path)?;
        if !probed.duration_seconds.is_finite() || probed.duration_seconds < 0.0 {
            return Err(SessionError::InvalidDuration {
                path: probed.path,
                seconds: probed.duration_seconds,
            });
        }

        let track = WorkingTrack::from_probe(probed);
        self.range = RangeSelector::reset(track.duration_seconds);
        self.mute.clear();

        info!(
            path = ?track.path,
            duration_seconds = track.duration_seconds,
            has_audio = track.has_audio_stream,
            "track loaded"
        );

        let snapshot = track.snapshot();
        self.track = Some(track);

        Ok(vec![Event::TrackLoaded(snapshot), self.range_event()])
    }

    fn set_range_start(&mut self, seconds: f64) -> Result<Vec<Event>> {
        if self.track.is_none() {
            return Ok(Vec::new());
        }
        self.range.set_start(seconds);
        debug!(seconds, interval = ?self.range.interval(), "range start set");
        Ok(vec![self.range_event()])
    }

    fn set_range_end(&mut self, seconds: f64) -> Result<Vec<Event>> {
        if self.track.is_none() {
            return Ok(Vec::new());
        }
        self.range.set_end(seconds);
        debug!(seconds, interval = ?self.range.interval(), "range end set");
        Ok(vec![self.range_event()])
    }

    fn extract_subclip(&mut self, output: PathBuf) -> Result<Vec<Event>> {
        let Some(track) = self.track.as_ref() else {
            return Ok(Vec::new());
        };

        let (start_seconds, end_seconds) = self.range.interval();
        let job = SubclipJob {
            input: track.path.clone(),
            start_seconds,
            end_seconds,
            include_audio: track.include_audio(),
            output: output.clone(),
        };
        self.media.write_subclip(&job)?;

        info!(
            start_seconds,
            end_seconds,
            output = ?output,
            "subclip written"
        );
        Ok(vec![Event::SubclipWritten { path: output }])
    }

    fn concatenate(&mut self, inputs: Vec<PathBuf>, output: PathBuf) -> Result<Vec<Event>> {
        let Some(track) = self.track.as_ref() else {
            return Ok(Vec::new());
        };

        let mut all_inputs = Vec::with_capacity(inputs.len() + 1);
        all_inputs.push(track.path.clone());
        all_inputs.extend(inputs);

        let job = ConcatJob {
            inputs: all_inputs,
            include_audio: track.include_audio(),
            output: output.clone(),
        };
        self.media.concatenate(&job)?;

        info!(input_count = job.inputs.len(), output = ?output, "concatenation finished");
        Ok(vec![Event::ConcatenateFinished { path: output }])
    }

    fn mute(&mut self, decision: MuteDecision) -> Result<Vec<Event>> {
        let Some(track) = self.track.as_mut() else {
            return Ok(Vec::new());
        };

        match self.mute.apply(decision, track) {
            Some(state) => {
                info!(?decision, ?state, "mute decision applied");
                Ok(vec![Event::MuteStateChanged { state }])
            }
            None => Ok(Vec::new()),
        }
    }

    fn replace_audio(&mut self, audio: PathBuf, output: PathBuf) -> Result<Vec<Event>> {
        let Some(track) = self.track.as_ref() else {
            return Ok(Vec::new());
        };

        let job = ReplaceAudioJob {
            video: track.path.clone(),
            audio,
            output: output.clone(),
        };
        self.media.replace_audio(&job)?;

        info!(output = ?output, "audio replaced");
        Ok(vec![Event::AudioReplaced { path: output }])
    }

    fn extract_audio(&mut self, output: PathBuf) -> Result<Vec<Event>> {
        let Some(track) = self.track.as_ref() else {
            return Ok(Vec::new());
        };
        if !track.include_audio() {
            return Err(SessionError::TrackHasNoAudio {
                path: track.path.clone(),
            });
        }

        let job = ExtractAudioJob {
            input: track.path.clone(),
            output: output.clone(),
        };
        self.media.extract_audio(&job)?;

        info!(output = ?output, "audio extracted");
        Ok(vec![Event::AudioExtracted { path: output }])
    }

    fn range_event(&self) -> Event {
        let (start, end) = self.range.interval();
        Event::RangeChanged {
            start,
            end,
            total_duration: self.range.total_duration(),
        }
    }
}

impl Session<FfmpegMediaBackend> {
    /// Creates a session wired to the FFmpeg backend.
    pub fn with_ffmpeg() -> Self {
        Self::new(FfmpegMediaBackend)
    }
}
