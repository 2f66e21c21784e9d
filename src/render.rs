//! Applies a [`Request`] to the display and the LED bank

use log::{debug, info};
use thiserror::Error;

use crate::{
    error::{HardwareFault, Port},
    line::FixedRow,
    port::{Display, LedBank},
    request::Request,
};

/// What [`Renderer::apply`] actually did
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    pub cleared: bool,
    pub rows_written: Vec<usize>,
    pub leds_written: Vec<usize>,
}

/// A validated request that still doesn't fit the ports it's applied to
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("row {row} is outside the {rows} row display")]
    Row { row: usize, rows: usize },
    #[error("{len} LED values for a bank of {leds}")]
    Leds { len: usize, leds: usize },
}

pub struct Renderer<'a, D, L>
where
    D: Display,
    L: LedBank,
{
    display: &'a mut D,
    leds: &'a mut L,
}

impl<'a, D, L> Renderer<'a, D, L>
where
    D: Display,
    L: LedBank,
{
    pub fn new(display: &'a mut D, leds: &'a mut L) -> Self {
        Self { display, leds }
    }

    /// Refuse a request the ports can't take, before any of them is touched
    fn check_fit(&self, request: &Request) -> Result<(), HardwareFault> {
        let rows = self.display.rows();
        if let Some((row, _)) = request.row_writes().find(|&(row, _)| row >= rows) {
            return Err(HardwareFault::unfit(Port::Display, Mismatch::Row { row, rows }));
        }

        if let Some(spec) = request.leds() {
            if spec.len() > self.leds.len() {
                return Err(HardwareFault::unfit(
                    Port::LedBank,
                    Mismatch::Leds {
                        len: spec.len(),
                        leds: self.leds.len(),
                    },
                ));
            }
        }
        Ok(())
    }

    /// Clear first (if asked), then write rows, then switch LEDs
    ///
    /// The first port error aborts the whole run.
    pub fn apply(&mut self, request: Request) -> Result<Applied, HardwareFault> {
        self.check_fit(&request)?;

        let mut applied = Applied::default();

        if request.clear() {
            self.display
                .reset()
                .map_err(|err| HardwareFault::write(Port::Display, err))?;
            applied.cleared = true;
        }

        let width = self.display.columns();
        for (row, text) in request.row_writes() {
            let line = FixedRow::render(text, width);
            self.display
                .write_row(row, &line)
                .map_err(|err| HardwareFault::write(Port::Display, err))?;
            applied.rows_written.push(row);
        }

        if let Some(spec) = request.leds() {
            let previous = self.leds.read_state();
            let next = spec.apply(&previous);

            for (index, (&before, &after)) in previous.iter().zip(&next).enumerate() {
                if before == after {
                    continue;
                }
                debug!("LED {index}: {before:?} -> {after:?}");
                self.leds
                    .write(index, after)
                    .map_err(|err| HardwareFault::write(Port::LedBank, err))?;
                applied.leds_written.push(index);
            }
        }

        info!(
            "applied request: cleared={}, rows={:?}, leds={:?}",
            applied.cleared, applied.rows_written, applied.leds_written
        );
        Ok(applied)
    }
}
