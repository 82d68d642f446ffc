//! UI-agnostic editing session for the Subclip Studio app.

pub mod backend;
pub mod error;
pub mod mute;
pub mod range;
pub mod session;
pub mod track;

pub use backend::{
    ConcatJob, ExtractAudioJob, FfmpegMediaBackend, MediaBackend, ProbedTrack, ReplaceAudioJob,
    SubclipJob,
};
pub use error::{Result, SessionError};
pub use mute::{MuteCache, MuteDecision, MuteState};
pub use range::RangeSelector;
pub use session::{Command, Event, Session, SessionErrorEvent, SessionErrorKind};
pub use track::{TrackSnapshot, WorkingTrack};
