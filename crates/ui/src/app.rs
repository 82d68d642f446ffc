use std::path::PathBuf;
use std::sync::mpsc::TrySendError;

use engine::{Command, Event, MuteDecision, MuteState, TrackSnapshot};
use iced::widget::{button, column, row, slider, text};
use iced::{Element, Subscription, Task, Theme};

use crate::bridge::{BridgeEvent, SessionCommandSender, session_subscription};
use crate::dialogs;

/// UI messages handled by the iced app update loop.
#[derive(Debug, Clone)]
pub enum Message {
    OpenPressed,
    OpenPicked(Option<PathBuf>),
    StartChanged(f64),
    EndChanged(f64),
    ExtractSubclipPressed,
    SubclipSavePicked(Option<PathBuf>),
    MixClipsPressed,
    MixClipsPicked(Option<Vec<PathBuf>>),
    MixClipsSavePicked {
        inputs: Vec<PathBuf>,
        output: Option<PathBuf>,
    },
    MutePressed,
    MuteDecided(MuteDecision),
    MixAudioPressed,
    MixAudioPicked(Option<PathBuf>),
    MixAudioSavePicked {
        audio: PathBuf,
        output: Option<PathBuf>,
    },
    ExtractAudioPressed,
    AudioSavePicked(Option<PathBuf>),
    DarkModeToggled,
    AlertClosed,
    Bridge(BridgeEvent),
}

/// Root UI state for the single editor window.
pub struct AppState {
    session_tx: Option<SessionCommandSender>,
    track: Option<TrackSnapshot>,
    range_start: f64,
    range_end: f64,
    total_duration: f64,
    mute_prompt_open: bool,
    dark_mode: bool,
    status: String,
}

impl AppState {
    /// Boots the app and initializes the session bridge.
    pub fn boot() -> (Self, Task<Message>) {
        (
            Self {
                session_tx: None,
                track: None,
                range_start: 0.0,
                range_end: 0.0,
                total_duration: 0.0,
                mute_prompt_open: false,
                dark_mode: false,
                status: String::from("starting session bridge"),
            },
            Task::none(),
        )
    }

    /// Handles one UI message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenPressed => {
                return Task::perform(dialogs::pick_video(), Message::OpenPicked);
            }
            Message::OpenPicked(Some(path)) => {
                if self.send_command(Command::Load { path: path.clone() }) {
                    self.status = format!("loading {}", path.display());
                }
            }
            Message::OpenPicked(None) => {}
            Message::StartChanged(seconds) => {
                self.range_start = seconds;
                self.send_command(Command::SetRangeStart { seconds });
            }
            Message::EndChanged(seconds) => {
                self.range_end = seconds;
                self.send_command(Command::SetRangeEnd { seconds });
            }
            Message::ExtractSubclipPressed => {
                if self.track.is_some() {
                    return Task::perform(
                        dialogs::save_video("Save Subclip"),
                        Message::SubclipSavePicked,
                    );
                }
            }
            Message::SubclipSavePicked(Some(output)) => {
                if self.send_command(Command::ExtractSubclip {
                    output: output.clone(),
                }) {
                    self.status = format!("extracting subclip to {}", output.display());
                }
            }
            Message::SubclipSavePicked(None) => {}
            Message::MixClipsPressed => {
                if self.track.is_some() {
                    return Task::perform(dialogs::pick_videos(), Message::MixClipsPicked);
                }
            }
            Message::MixClipsPicked(Some(inputs)) if !inputs.is_empty() => {
                return Task::perform(
                    async move {
                        let output = dialogs::save_video("Save Final Clip").await;
                        (inputs, output)
                    },
                    |(inputs, output)| Message::MixClipsSavePicked { inputs, output },
                );
            }
            Message::MixClipsPicked(_) => {}
            Message::MixClipsSavePicked {
                inputs,
                output: Some(output),
            } => {
                if self.send_command(Command::Concatenate {
                    inputs,
                    output: output.clone(),
                }) {
                    self.status = format!("mixing clips into {}", output.display());
                }
            }
            Message::MixClipsSavePicked { output: None, .. } => {}
            Message::MutePressed => {
                if self.track.is_some() {
                    self.mute_prompt_open = true;
                }
            }
            Message::MuteDecided(decision) => {
                self.mute_prompt_open = false;
                self.send_command(Command::Mute { decision });
            }
            Message::MixAudioPressed => {
                if self.track.is_some() {
                    return Task::perform(dialogs::pick_audio(), Message::MixAudioPicked);
                }
            }
            Message::MixAudioPicked(Some(audio)) => {
                return Task::perform(
                    async move {
                        let output = dialogs::save_video("Save Mixed Clip").await;
                        (audio, output)
                    },
                    |(audio, output)| Message::MixAudioSavePicked { audio, output },
                );
            }
            Message::MixAudioPicked(None) => {}
            Message::MixAudioSavePicked {
                audio,
                output: Some(output),
            } => {
                if self.send_command(Command::ReplaceAudio {
                    audio,
                    output: output.clone(),
                }) {
                    self.status = format!("mixing audio into {}", output.display());
                }
            }
            Message::MixAudioSavePicked { output: None, .. } => {}
            Message::ExtractAudioPressed => {
                if self.track.is_some() {
                    return Task::perform(dialogs::save_audio(), Message::AudioSavePicked);
                }
            }
            Message::AudioSavePicked(Some(output)) => {
                if self.send_command(Command::ExtractAudio {
                    output: output.clone(),
                }) {
                    self.status = format!("extracting audio to {}", output.display());
                }
            }
            Message::AudioSavePicked(None) => {}
            Message::DarkModeToggled => {
                self.dark_mode = !self.dark_mode;
            }
            Message::AlertClosed => {}
            Message::Bridge(BridgeEvent::Ready(sender)) => {
                self.session_tx = Some(sender);
                self.status = String::from("session ready");
            }
            Message::Bridge(BridgeEvent::Event(event)) => {
                return self.apply_session_event(event);
            }
            Message::Bridge(BridgeEvent::Disconnected) => {
                self.status = String::from("session event channel closed");
                self.session_tx = None;
            }
        }

        Task::none()
    }

    fn send_command(&mut self, command: Command) -> bool {
        if let Some(sender) = &self.session_tx {
            match sender.try_send(command) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    self.status = String::from("session command queue is full");
                    false
                }
                Err(TrySendError::Disconnected(_)) => {
                    self.status = String::from("session command channel closed");
                    self.session_tx = None;
                    false
                }
            }
        } else {
            self.status = String::from("session is not ready");
            false
        }
    }

    fn apply_session_event(&mut self, event: Event) -> Task<Message> {
        match event {
            Event::TrackLoaded(snapshot) => {
                self.status = format!("loaded {}", snapshot.path.display());
                self.track = Some(snapshot);
                self.mute_prompt_open = false;
            }
            Event::RangeChanged {
                start,
                end,
                total_duration,
            } => {
                self.range_start = start;
                self.range_end = end;
                self.total_duration = total_duration;
            }
            Event::MuteStateChanged { state } => {
                if let Some(track) = self.track.as_mut() {
                    track.audio_enabled = state == MuteState::Live;
                }
                self.status = match state {
                    MuteState::Live => String::from("audio restored"),
                    MuteState::MutedCommitted => String::from("audio removed permanently"),
                    MuteState::MutedWithBackup => String::from("audio muted (backup kept)"),
                };
            }
            Event::SubclipWritten { path } => {
                self.status = format!("subclip saved: {}", path.display());
            }
            Event::ConcatenateFinished { path } => {
                self.status = format!("final clip saved: {}", path.display());
            }
            Event::AudioReplaced { path } => {
                self.status = format!("mixed clip saved: {}", path.display());
            }
            Event::AudioExtracted { path } => {
                self.status = format!("audio saved: {}", path.display());
            }
            Event::Error(error) => {
                self.status = format!("error: {}", error.message);
                return Task::perform(dialogs::show_error(error.message), |_| {
                    Message::AlertClosed
                });
            }
        }

        Task::none()
    }

    /// Renders the UI tree.
    pub fn view(&self) -> Element<'_, Message> {
        let actions = row![
            button("Extract Subclip").on_press(Message::ExtractSubclipPressed),
            button("Mix Clips").on_press(Message::MixClipsPressed),
            button("Mute Video").on_press(Message::MutePressed),
            button("Mix MP3 with MP4").on_press(Message::MixAudioPressed),
            button("Extract Audio").on_press(Message::ExtractAudioPressed),
        ]
        .spacing(12);

        let mut content = column![
            button("Upload Original").on_press(Message::OpenPressed),
            text(format!("Start Time (in seconds): {:.0}", self.range_start)),
            slider(
                0.0..=self.range_end,
                self.range_start,
                Message::StartChanged
            )
            .step(1.0),
            text(format!("End Time (in seconds): {:.0}", self.range_end)),
            slider(
                self.range_start..=self.total_duration,
                self.range_end,
                Message::EndChanged
            )
            .step(1.0),
            actions,
        ]
        .spacing(12)
        .padding(16);

        if self.mute_prompt_open {
            content = content.push(
                row![
                    text("Do you want to save the muted clip or keep it temporarily?"),
                    button("Save").on_press(Message::MuteDecided(MuteDecision::Commit)),
                    button("Keep temporarily")
                        .on_press(Message::MuteDecided(MuteDecision::KeepBackup)),
                    button("Cancel").on_press(Message::MuteDecided(MuteDecision::Cancel)),
                ]
                .spacing(12),
            );
        }

        content = content
            .push(button("Dark Mode").on_press(Message::DarkModeToggled))
            .push(text(format!("Status: {}", self.status)));

        content.into()
    }

    /// Picks the window theme for the dark-mode toggle.
    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Subscribes to bridge events emitted by the session worker thread.
    pub fn subscription(&self) -> Subscription<Message> {
        session_subscription().map(Message::Bridge)
    }

    #[cfg(test)]
    fn from_sender_for_test(session_tx: SessionCommandSender) -> Self {
        Self {
            session_tx: Some(session_tx),
            track: None,
            range_start: 0.0,
            range_end: 0.0,
            total_duration: 0.0,
            mute_prompt_open: false,
            dark_mode: false,
            status: String::from("idle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::mpsc;

    use engine::{Command, Event, MuteDecision};

    use crate::bridge::BridgeEvent;

    use super::{AppState, Message};

    #[test]
    fn picked_video_dispatches_load_command() {
        let (command_tx, command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);

        let _ = app.update(Message::OpenPicked(Some(PathBuf::from("demo.mp4"))));

        let command = command_rx.recv().expect("load command");
        assert_eq!(
            command,
            Command::Load {
                path: PathBuf::from("demo.mp4")
            }
        );
    }

    #[test]
    fn start_slider_dispatches_set_range_start() {
        let (command_tx, command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);

        let _ = app.update(Message::StartChanged(30.0));

        let command = command_rx.recv().expect("set range start command");
        assert_eq!(command, Command::SetRangeStart { seconds: 30.0 });
        assert_eq!(app.range_start, 30.0);
    }

    #[test]
    fn mute_decision_dispatches_mute_command_and_closes_prompt() {
        let (command_tx, command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);
        app.mute_prompt_open = true;

        let _ = app.update(Message::MuteDecided(MuteDecision::KeepBackup));

        assert!(!app.mute_prompt_open);
        let command = command_rx.recv().expect("mute command");
        assert_eq!(
            command,
            Command::Mute {
                decision: MuteDecision::KeepBackup
            }
        );
    }

    #[test]
    fn subclip_save_dispatches_extract_with_chosen_path() {
        let (command_tx, command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);

        let _ = app.update(Message::SubclipSavePicked(Some(PathBuf::from("out.mp4"))));

        let command = command_rx.recv().expect("extract subclip command");
        assert_eq!(
            command,
            Command::ExtractSubclip {
                output: PathBuf::from("out.mp4")
            }
        );
    }

    #[test]
    fn mix_clips_save_dispatches_concatenate() {
        let (command_tx, command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);

        let _ = app.update(Message::MixClipsSavePicked {
            inputs: vec![PathBuf::from("b.mp4")],
            output: Some(PathBuf::from("final.mp4")),
        });

        let command = command_rx.recv().expect("concatenate command");
        assert_eq!(
            command,
            Command::Concatenate {
                inputs: vec![PathBuf::from("b.mp4")],
                output: PathBuf::from("final.mp4"),
            }
        );
    }

    #[test]
    fn range_changed_event_updates_slider_bounds() {
        let (command_tx, _command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);

        let _ = app.update(Message::Bridge(BridgeEvent::Event(Event::RangeChanged {
            start: 10.0,
            end: 80.0,
            total_duration: 100.0,
        })));

        assert_eq!(app.range_start, 10.0);
        assert_eq!(app.range_end, 80.0);
        assert_eq!(app.total_duration, 100.0);
    }

    #[test]
    fn dark_mode_toggle_flips_theme() {
        let (command_tx, _command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);
        assert!(!app.dark_mode);

        let _ = app.update(Message::DarkModeToggled);
        assert!(app.dark_mode);

        let _ = app.update(Message::DarkModeToggled);
        assert!(!app.dark_mode);
    }

    #[test]
    fn cancelled_dialogs_dispatch_nothing() {
        let (command_tx, command_rx) = mpsc::sync_channel(8);
        let mut app = AppState::from_sender_for_test(command_tx);

        let _ = app.update(Message::OpenPicked(None));
        let _ = app.update(Message::SubclipSavePicked(None));
        let _ = app.update(Message::MixClipsPicked(None));
        let _ = app.update(Message::AudioSavePicked(None));

        assert!(matches!(
            command_rx.try_recv(),
            Err(mpsc::TryRecvError::Empty)
        ));
    }
}
