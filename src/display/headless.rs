use std::{thread, time::Duration};

use crate::{
    display::{PAUSED_MESSAGE, TICKRATE},
    error::{Error, Result},
    signals::{self, Request},
    timer::{Countdown, Phase},
};

/// Runs a countdown without drawing anything, for terminals too small to
/// hold the timer face.
pub struct App<'a> {
    countdown: &'a Countdown,
    tick_rate: Duration,
}

impl<'a> App<'a> {
    pub fn new(countdown: &'a Countdown) -> Self {
        Self {
            countdown,
            tick_rate: Duration::from_millis(TICKRATE),
        }
    }

    pub fn run(&self) -> Result<()> {
        loop {
            match signals::take() {
                Some(Request::Terminate(signal)) => return Err(Error::Interrupted(signal)),
                Some(Request::Suspend) => {
                    println!("{}", PAUSED_MESSAGE);
                    signals::suspend_self()?;
                }
                None => {}
            }

            if self.countdown.phase() == Phase::Done {
                return Ok(());
            }
            thread::sleep(self.tick_rate);
        }
    }
}
