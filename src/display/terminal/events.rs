use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    io,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy)]
pub struct EventConfig {
    pub tick_rate: Duration,
}

impl Default for EventConfig {
    fn default() -> EventConfig {
        EventConfig {
            tick_rate: Duration::from_millis(100),
        }
    }
}

pub enum Event<I> {
    Input(I),
    Tick,
}

/// Tick and key source, polled from the render loop's own thread.
///
/// The first tick is due immediately; after that one fires every
/// `tick_rate`, with key presses delivered as they arrive in between.
pub struct Events {
    tick_rate: Duration,
    next_tick: Instant,
}

impl Events {
    pub fn new(tick_rate: u64) -> Events {
        Events::with_config(EventConfig {
            tick_rate: Duration::from_millis(tick_rate),
        })
    }

    pub fn with_config(config: EventConfig) -> Events {
        Events {
            tick_rate: config.tick_rate,
            next_tick: Instant::now(),
        }
    }
}

/// Where the render loop gets its ticks and key presses from.
pub trait EventSource {
    fn next(&mut self) -> io::Result<Event<KeyEvent>>;
}

impl EventSource for Events {
    fn next(&mut self) -> io::Result<Event<KeyEvent>> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                self.next_tick = now + self.tick_rate;
                return Ok(Event::Tick);
            }

            match event::poll(self.next_tick - now) {
                Ok(true) => {
                    if let event::Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Release {
                            return Ok(Event::Input(key));
                        }
                    }
                }
                Ok(false) => {}
                // A signal arrived; let the caller look at it.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => return Ok(Event::Tick),
                Err(err) => return Err(err),
            }
        }
    }
}

/// Enter, or a bare line feed (Ctrl-J).
pub fn is_acknowledgment(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => true,
        KeyCode::Char('\n') => true,
        KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
