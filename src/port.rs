//! Capabilities the renderer needs from the hardware
//!
//! The board adapters implement these over GPIO, tests implement them in memory.

use crate::{command::State, line::FixedRow};

/// A character display addressed row by row
pub trait Display {
    type Error: std::error::Error + Send + Sync + 'static;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Blank every row
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Overwrite one row, leaving every other row as it is
    fn write_row(&mut self, row: usize, line: &FixedRow) -> Result<(), Self::Error>;
}

/// An ordered bank of on/off outputs
pub trait LedBank {
    type Error: std::error::Error + Send + Sync + 'static;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last known state of every LED, `len()` entries
    fn read_state(&self) -> Vec<State>;

    fn write(&mut self, index: usize, state: State) -> Result<(), Self::Error>;
}

/// The two push buttons of the shield
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    First,
    Second,
}

impl Button {
    pub const ALL: [Button; 2] = [Button::First, Button::Second];

    pub fn index(self) -> usize {
        match self {
            Button::First => 0,
            Button::Second => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

pub trait ButtonInput {
    type Error: std::error::Error + Send + Sync + 'static;

    fn read(&mut self, button: Button) -> Result<ButtonState, Self::Error>;
}
