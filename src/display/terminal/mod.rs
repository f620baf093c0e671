mod events;
mod guard;
#[allow(clippy::module_inception)]
mod terminal;

pub use self::guard::{restore_best_effort, TerminalGuard};
pub use self::terminal::App;
