mod app;
mod config;
mod console;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
pub use logging::LogDestination;
