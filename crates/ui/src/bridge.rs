use std::sync::mpsc;
use std::thread;

use engine::{Command, Event, MediaBackend, Session, SessionErrorEvent};
use iced::futures::{SinkExt, StreamExt, channel::mpsc as futures_mpsc, executor};
use iced::{Subscription, stream};

const COMMAND_CHANNEL_CAPACITY: usize = 32;
const EVENT_CHANNEL_CAPACITY: usize = 8;
const SUBSCRIPTION_CHANNEL_CAPACITY: usize = 32;

/// Sender used by the UI thread to dispatch commands to the session thread.
pub type SessionCommandSender = mpsc::SyncSender<Command>;

/// Receiver used by the UI thread to read events emitted by the session thread.
pub type SessionEventReceiver = mpsc::Receiver<Event>;

/// Messages emitted by the session bridge subscription.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    Ready(SessionCommandSender),
    Event(Event),
    Disconnected,
}

/// Builds a subscription that starts the session bridge and forwards events.
pub fn session_subscription() -> Subscription<BridgeEvent> {
    Subscription::run(bridge_worker_stream)
}

fn bridge_worker_stream() -> impl iced::futures::Stream<Item = BridgeEvent> {
    bridge_worker_stream_with(spawn_ffmpeg_bridge)
}

fn bridge_worker_stream_with(
    spawn_bridge: fn() -> (SessionCommandSender, SessionEventReceiver),
) -> impl iced::futures::Stream<Item = BridgeEvent> {
    stream::channel(
        SUBSCRIPTION_CHANNEL_CAPACITY,
        move |mut output| async move {
            let (session_tx, session_rx) = spawn_bridge();
            let _ = output.send(BridgeEvent::Ready(session_tx)).await;

            let (forward_tx, mut forward_rx) =
                futures_mpsc::channel::<BridgeEvent>(SUBSCRIPTION_CHANNEL_CAPACITY);

            thread::spawn(move || {
                let mut forward_tx = forward_tx;
                while let Ok(event) = session_rx.recv() {
                    if executor::block_on(forward_tx.send(BridgeEvent::Event(event))).is_err() {
                        return;
                    }
                }
                let _ = executor::block_on(forward_tx.send(BridgeEvent::Disconnected));
            });

            while let Some(event) = forward_rx.next().await {
                if output.send(event).await.is_err() {
                    break;
                }
            }
        },
    )
}

/// Spawns the production bridge that wires an FFmpeg-backed session.
pub fn spawn_ffmpeg_bridge() -> (SessionCommandSender, SessionEventReceiver) {
    spawn_session_bridge(Session::with_ffmpeg())
}

/// Spawns a bridge around any session backend.
pub fn spawn_session_bridge<M>(
    mut session: Session<M>,
) -> (SessionCommandSender, SessionEventReceiver)
where
    M: MediaBackend + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::sync_channel::<Command>(COMMAND_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::sync_channel::<Event>(EVENT_CHANNEL_CAPACITY);

    thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            match session.handle_command(command) {
                Ok(events) => {
                    for event in events {
                        if event_tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(error) => {
                    if event_tx
                        .send(Event::Error(SessionErrorEvent::from_error(&error)))
                        .is_err()
                    {
                        return;
                    }
                }
            }
        }
    });

    (command_tx, event_rx)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use iced::futures::{StreamExt, executor, pin_mut};

    use engine::backend::{
        ConcatJob, ExtractAudioJob, ProbedTrack, ReplaceAudioJob, SubclipJob,
    };
    use engine::{Command, MediaBackend, Session, SessionErrorKind};

    use super::{
        BridgeEvent, Event, bridge_worker_stream_with, spawn_session_bridge,
    };

    #[test]
    fn bridge_forwards_session_events_for_load_command() {
        let (command_tx, event_rx) = spawn_session_bridge(Session::new(MockBackend));

        command_tx
            .send(Command::Load {
                path: PathBuf::from("demo.mp4"),
            })
            .expect("send load command");

        let first = event_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("first event");
        let second = event_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("second event");

        assert!(matches!(first, Event::TrackLoaded(_)));
        assert_eq!(
            second,
            Event::RangeChanged {
                start: 0.0,
                end: 42.0,
                total_duration: 42.0,
            }
        );
    }

    #[test]
    fn bridge_emits_error_event_when_command_fails() {
        let (command_tx, event_rx) = spawn_session_bridge(Session::new(MockBackend));

        command_tx
            .send(Command::Load {
                path: PathBuf::from("demo.mp4"),
            })
            .expect("send load command");
        let _ = event_rx.recv_timeout(Duration::from_secs(1));
        let _ = event_rx.recv_timeout(Duration::from_secs(1));

        // MockBackend probes tracks without audio, so extraction must fail.
        command_tx
            .send(Command::ExtractAudio {
                output: PathBuf::from("out.mp3"),
            })
            .expect("send extract audio command");

        let event = event_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("error event");

        let Event::Error(error) = event else {
            panic!("expected Event::Error");
        };
        assert_eq!(error.kind, SessionErrorKind::TrackHasNoAudio);
        assert!(error.message.contains("no audio"));
    }

    #[test]
    fn bridge_worker_stream_emits_ready_forwards_events_and_disconnected() {
        let (bridge_tx, bridge_rx) = mpsc::channel::<BridgeEvent>();

        thread::spawn(move || {
            let stream = bridge_worker_stream_with(spawn_mock_bridge);
            executor::block_on(async move {
                pin_mut!(stream);
                for _ in 0..4 {
                    let Some(event) = stream.next().await else {
                        break;
                    };
                    if bridge_tx.send(event).is_err() {
                        break;
                    }
                }
            });
        });

        let ready = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("ready event");
        let BridgeEvent::Ready(command_tx) = ready else {
            panic!("expected BridgeEvent::Ready");
        };

        command_tx
            .send(Command::Load {
                path: PathBuf::from("demo.mp4"),
            })
            .expect("send load command");

        let first = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("first forwarded event");
        assert!(matches!(first, BridgeEvent::Event(Event::TrackLoaded(_))));

        let second = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("second forwarded event");
        assert!(matches!(
            second,
            BridgeEvent::Event(Event::RangeChanged { .. })
        ));

        drop(command_tx);

        let disconnected = bridge_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("disconnected event");
        assert!(matches!(disconnected, BridgeEvent::Disconnected));
    }

    fn spawn_mock_bridge() -> (super::SessionCommandSender, super::SessionEventReceiver) {
        spawn_session_bridge(Session::new(MockBackend))
    }

    #[derive(Debug, Clone, Copy)]
    struct MockBackend;

    impl MediaBackend for MockBackend {
        fn probe(&self, path: &Path) -> engine::Result<ProbedTrack> {
            Ok(ProbedTrack {
                path: path.to_path_buf(),
                duration_seconds: 42.0,
                has_audio: false,
            })
        }

        fn write_subclip(&self, _job: &SubclipJob) -> engine::Result<()> {
            Ok(())
        }

        fn concatenate(&self, _job: &ConcatJob) -> engine::Result<()> {
            Ok(())
        }

        fn replace_audio(&self, _job: &ReplaceAudioJob) -> engine::Result<()> {
            Ok(())
        }

        fn extract_audio(&self, _job: &ExtractAudioJob) -> engine::Result<()> {
            Ok(())
        }
    }
}
