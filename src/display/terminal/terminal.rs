use std::io::{self, Stdout};

use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use super::{
    events::{is_acknowledgment, Event, EventSource, Events},
    guard::TerminalMode,
};
use crate::{
    config::Palette,
    display::{TimerWidget, PAUSED_MESSAGE, TICKRATE},
    error::{Error, Result},
    signals::{self, Request},
    time_format::format_time,
    timer::{Countdown, Phase},
};

/// Full-screen timer display.
///
/// Holds everything a frame needs: the terminal, the colors and the text
/// that stays fixed for the whole run.
pub struct App<B: Backend> {
    terminal: Terminal<B>,
    palette: Palette,
    name: String,
    end_time: String,
}

impl<B: Backend> App<B> {
    pub fn new(terminal: Terminal<B>, palette: Palette, countdown: &Countdown) -> Self {
        Self {
            terminal,
            palette,
            name: countdown.spec().name().to_string(),
            end_time: countdown.spec().end_time(),
        }
    }

    pub fn draw_running(&mut self, elapsed: f64, fraction: f64) -> io::Result<()> {
        let elapsed = format_time(elapsed);
        let widget =
            TimerWidget::running(&self.name, &elapsed, &self.end_time, fraction, &self.palette);
        self.terminal.draw(|f| {
            let area = f.size();
            f.render_widget(widget, area);
        })?;
        Ok(())
    }

    pub fn draw_finished(&mut self) -> io::Result<()> {
        let widget = TimerWidget::finished(&self.name, &self.end_time, &self.palette);
        self.terminal.draw(|f| {
            let area = f.size();
            f.render_widget(widget, area);
        })?;
        Ok(())
    }

    /// Draws the running timer until it expires, then the finished face
    /// until the user acknowledges it.
    pub fn run_with<E, M>(
        &mut self,
        events: &mut E,
        mode: &mut M,
        countdown: &Countdown,
    ) -> Result<()>
    where
        E: EventSource,
        M: TerminalMode,
    {
        self.terminal.clear()?;

        loop {
            self.handle_signals(mode)?;
            match events.next()? {
                Event::Tick => match countdown.phase() {
                    Phase::Running { elapsed, fraction } => self.draw_running(elapsed, fraction)?,
                    Phase::Done => break,
                },
                Event::Input(_) => {}
            }
        }

        tracing::info!("timer {:?} finished, waiting for acknowledgment", self.name);
        loop {
            self.handle_signals(mode)?;
            match events.next()? {
                Event::Tick => self.draw_finished()?,
                Event::Input(key) if is_acknowledgment(&key) => return Ok(()),
                Event::Input(_) => {}
            }
        }
    }

    fn handle_signals<M: TerminalMode>(&mut self, mode: &mut M) -> Result<()> {
        match signals::take() {
            None => Ok(()),
            Some(Request::Terminate(signal)) => Err(Error::Interrupted(signal)),
            Some(Request::Suspend) => {
                mode.leave()?;
                println!("{}", PAUSED_MESSAGE);
                signals::suspend_self()?;
                mode.enter()?;
                self.terminal.clear()?;
                Ok(())
            }
        }
    }
}

impl App<CrosstermBackend<Stdout>> {
    pub fn with_stdout(palette: Palette, countdown: &Countdown) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self::new(terminal, palette, countdown))
    }

    pub fn run<M: TerminalMode>(&mut self, mode: &mut M, countdown: &Countdown) -> Result<()> {
        self.run_with(&mut Events::new(TICKRATE), mode, countdown)
    }
}
