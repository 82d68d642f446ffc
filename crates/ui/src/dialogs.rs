use std::path::PathBuf;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "avi", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "m4a", "flac", "ogg"];

/// Opens a single-video picker.
pub async fn pick_video() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select Original Video")
        .add_filter("Video Files", VIDEO_EXTENSIONS)
        .pick_file()
        .await
        .map(|file| file.path().to_path_buf())
}

/// Opens a multi-video picker for the clips to concatenate.
pub async fn pick_videos() -> Option<Vec<PathBuf>> {
    rfd::AsyncFileDialog::new()
        .set_title("Select Video Clips")
        .add_filter("Video Files", VIDEO_EXTENSIONS)
        .pick_files()
        .await
        .map(|files| {
            files
                .into_iter()
                .map(|file| file.path().to_path_buf())
                .collect()
        })
}

/// Opens an audio-file picker.
pub async fn pick_audio() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select Audio File")
        .add_filter("Audio Files", AUDIO_EXTENSIONS)
        .pick_file()
        .await
        .map(|file| file.path().to_path_buf())
}

/// Opens a save dialog for a video output file.
pub async fn save_video(title: &str) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title(title)
        .add_filter("Video Files", &["mp4"])
        .save_file()
        .await
        .map(|file| file.path().to_path_buf())
}

/// Opens a save dialog for an audio output file.
pub async fn save_audio() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Save Audio")
        .add_filter("Audio Files", &["mp3"])
        .save_file()
        .await
        .map(|file| file.path().to_path_buf())
}

/// Shows a modal error alert with the raw failure description.
pub async fn show_error(message: String) {
    let _ = rfd::AsyncMessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .show()
        .await;
}
