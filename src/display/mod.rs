mod headless;
mod terminal;
mod widget;

pub use self::headless::App as Headless;
pub use self::terminal::{restore_best_effort, App as TerminalApp, TerminalGuard};
pub use self::widget::TimerWidget;

/// Milliseconds between two redraws.
pub const TICKRATE: u64 = 100;

/// Smallest terminal the timer face is drawn in.
pub const MIN_WIDTH: u16 = 4;
pub const MIN_HEIGHT: u16 = 4;

/// Rows taken by the face, borders included.
pub const FACE_HEIGHT: u16 = 5;

pub const PAUSED_MESSAGE: &str =
    "Timer display paused. Resume with the \"fg\" command. Note: Your timer is still running.";

pub fn fits(width: u16, height: u16) -> bool {
    width >= MIN_WIDTH && height >= MIN_HEIGHT
}
