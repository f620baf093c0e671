//! Signal capture for the render loops.
//!
//! Handlers only record the signal number; the loops pick it up once per
//! tick and do the terminal work outside of signal context. Faults are the
//! exception: their handler puts the terminal back itself and lets the
//! default action run.

use std::{
    io,
    os::raw::c_int,
    sync::{
        atomic::{AtomicI32, Ordering},
        OnceLock,
    },
};

use nix::{
    libc,
    sys::{
        signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal},
        termios,
    },
};

const HANDLED: [Signal; 4] = [
    Signal::SIGTSTP,
    Signal::SIGINT,
    Signal::SIGTERM,
    Signal::SIGHUP,
];

const FAULTS: [Signal; 3] = [Signal::SIGSEGV, Signal::SIGBUS, Signal::SIGABRT];

/// Leave the alternate screen, show the cursor.
const RESTORE_SEQUENCE: &[u8] = b"\x1b[?1049l\x1b[?25h";

static PENDING: AtomicI32 = AtomicI32::new(0);

/// Terminal attributes from before raw mode, for the fault handler.
static COOKED: OnceLock<libc::termios> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Hand the terminal back and stop until continued.
    Suspend,
    /// Restore the terminal and exit.
    Terminate(Signal),
}

extern "C" fn record(signal: c_int) {
    PENDING.store(signal, Ordering::SeqCst);
}

fn recording_action() -> SigAction {
    SigAction::new(
        SigHandler::Handler(record),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    )
}

extern "C" fn restore_and_die(signal: c_int) {
    // SAFETY: tcsetattr, write and raise are async-signal-safe, and `COOKED`
    // is only read here once it has been set.
    unsafe {
        if let Some(cooked) = COOKED.get() {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, cooked);
        }
        libc::write(
            libc::STDOUT_FILENO,
            RESTORE_SEQUENCE.as_ptr().cast(),
            RESTORE_SEQUENCE.len(),
        );
        // SA_RESETHAND already put the default action back.
        libc::raise(signal);
    }
}

fn fault_action() -> SigAction {
    SigAction::new(
        SigHandler::Handler(restore_and_die),
        SaFlags::SA_RESETHAND | SaFlags::SA_NODEFER,
        SigSet::empty(),
    )
}

pub fn install() -> io::Result<()> {
    let action = recording_action();
    for signal in HANDLED {
        // SAFETY: `record` only touches an atomic, which is async-signal-safe.
        unsafe { signal::sigaction(signal, &action) }.map_err(io::Error::from)?;
    }
    let action = fault_action();
    for signal in FAULTS {
        // SAFETY: `restore_and_die` only makes async-signal-safe calls.
        unsafe { signal::sigaction(signal, &action) }.map_err(io::Error::from)?;
    }
    tracing::debug!("signal handlers installed");
    Ok(())
}

/// Keeps the current terminal attributes so a crash can restore them.
/// Only the first call has any effect.
pub fn remember_cooked_mode() -> io::Result<()> {
    if COOKED.get().is_none() {
        let attrs = termios::tcgetattr(io::stdin())?;
        let _ = COOKED.set(attrs.into());
    }
    Ok(())
}

/// Takes the most recent unhandled signal, if any.
pub fn take() -> Option<Request> {
    take_from(&PENDING)
}

fn take_from(pending: &AtomicI32) -> Option<Request> {
    let raw = pending.swap(0, Ordering::SeqCst);
    if raw == 0 {
        return None;
    }
    let signal = Signal::try_from(raw).ok()?;
    tracing::info!("received {}", signal);
    Some(to_request(signal))
}

fn to_request(signal: Signal) -> Request {
    match signal {
        Signal::SIGTSTP => Request::Suspend,
        other => Request::Terminate(other),
    }
}

/// Stops the process with the default SIGTSTP action, returning once it has
/// been continued.
pub fn suspend_self() -> io::Result<()> {
    // SAFETY: resetting to the default disposition installs no handler code.
    unsafe { signal::signal(Signal::SIGTSTP, SigHandler::SigDfl) }.map_err(io::Error::from)?;
    signal::raise(Signal::SIGTSTP).map_err(io::Error::from)?;

    tracing::info!("resumed after suspend");
    let action = recording_action();
    // SAFETY: see `install`.
    unsafe { signal::sigaction(Signal::SIGTSTP, &action) }.map_err(io::Error::from)?;
    Ok(())
}
