//! Built-in sender
//! If you want to drive the LCD some other way, you will need to implement [`SendCommand`] trait

use core::fmt;

use embedded_hal::delay::DelayNs;
use thiserror::Error;

use crate::command::{Command, CommandSet};

mod parallel_sender;

pub use parallel_sender::ParallelSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
pub trait SendCommand<Delayer: DelayNs> {
    /// Error raised when a transfer could not be put on the bus
    type Error: std::error::Error + Send + Sync + 'static;

    /// Put a [`Command`] on the bus
    fn send(&mut self, command: Command) -> Result<(), Self::Error>;

    /// Wait specific duration, and send command
    fn delay_and_send(
        &mut self,
        command: Command,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        delayer.delay_us(delay_us);
        self.send(command)
    }

    /// Send command, then wait until the controller is done executing it
    ///
    /// Note:
    /// RW is not wired, so the busy flag can't be polled,
    /// the datasheet execution time is waited out instead
    fn send_and_wait(
        &mut self,
        command: CommandSet,
        delayer: &mut Delayer,
    ) -> Result<(), Self::Error> {
        self.send(command.into())?;
        delayer.delay_us(command.execution_time_us());
        Ok(())
    }
}

/// A control or data line of the parallel bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    RegisterSelect,
    Enable,
    Data(u8),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::RegisterSelect => f.write_str("RS"),
            Signal::Enable => f.write_str("E"),
            Signal::Data(bit) => write!(f, "D{bit}"),
        }
    }
}

/// A pin of the parallel bus refused a level change
#[derive(Debug, Error)]
#[error("failed to drive LCD {signal} line: {detail}")]
pub struct SenderError {
    signal: Signal,
    detail: String,
}

impl SenderError {
    pub(crate) fn new(signal: Signal, detail: impl fmt::Debug) -> Self {
        Self {
            signal,
            detail: format!("{detail:?}"),
        }
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }
}
