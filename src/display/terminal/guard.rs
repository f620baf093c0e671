use std::io::{self, stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nix::sys::termios::{self, LocalFlags, SetArg};

use crate::signals;

/// Owns the terminal mode for as long as it is alive.
///
/// The terminal is put back into its normal mode when the guard is dropped,
/// and can be handed back and reacquired around a suspend.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        let mut guard = Self { active: false };
        guard.enter()?;
        Ok(guard)
    }
}

/// A terminal that can be handed back to the shell and taken again, as
/// around a suspend.
pub trait TerminalMode {
    fn leave(&mut self) -> io::Result<()>;
    fn enter(&mut self) -> io::Result<()>;
}

impl TerminalMode for TerminalGuard {
    fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        if let Err(err) = signals::remember_cooked_mode() {
            tracing::warn!("a crash will leave the terminal in raw mode: {}", err);
        }
        enable_raw_mode()?;
        self.active = true;
        if let Err(err) = keep_signal_keys() {
            tracing::warn!("Ctrl-C and Ctrl-Z will not raise signals: {}", err);
        }
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        tracing::debug!("terminal acquired");
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(stdout(), LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
        tracing::debug!("terminal released");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            tracing::warn!("failed to restore terminal: {}", err);
        }
    }
}

/// Puts the terminal back into normal mode without a guard at hand, for use
/// from the panic hook.
pub fn restore_best_effort() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

// Raw mode also turns off ISIG; with it back on, Ctrl-C and Ctrl-Z still
// reach the process as signals.
fn keep_signal_keys() -> io::Result<()> {
    let stdin = io::stdin();
    let mut attrs = termios::tcgetattr(&stdin)?;
    attrs.local_flags.insert(LocalFlags::ISIG);
    termios::tcsetattr(&stdin, SetArg::TCSANOW, &attrs)?;
    Ok(())
}
