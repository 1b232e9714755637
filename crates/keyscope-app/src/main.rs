//! Keyscope - audio analysis client
//!
//! Drop an audio file on the window (or type its path) to upload it to the
//! analysis service and visualize the result.

use keyscope_app::ui::app::WINDOW_SIZE;
use keyscope_app::ui::KeyscopeApp;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting Keyscope");

    iced::application(KeyscopeApp::new, KeyscopeApp::update, KeyscopeApp::view)
        .title(KeyscopeApp::title)
        .subscription(KeyscopeApp::subscription)
        .theme(KeyscopeApp::theme)
        .window_size(WINDOW_SIZE)
        .run()
}
