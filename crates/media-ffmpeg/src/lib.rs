mod error;
mod export;
mod probe;

pub use error::{MediaFfmpegError, Result};
pub use export::{
    CONCAT_SCALE_WIDTH, ConcatRequest, ExtractAudioRequest, ReplaceAudioRequest, SubclipRequest,
    concat_tracks, export_subclip, extract_audio, replace_audio,
};
pub use probe::{StreamKind, TrackInfo, probe_track};
