mod app;
mod bridge;
mod dialogs;

use app::AppState;

fn main() -> iced::Result {
    init_tracing();

    iced::application("Subclip Studio", AppState::update, AppState::view)
        .subscription(AppState::subscription)
        .theme(AppState::theme)
        .run_with(AppState::boot)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}
