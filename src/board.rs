//! The shield on a Linux GPIO character device
//!
//! LCD pins go through [`ParallelSender`], LEDs and buttons are plain
//! [`CdevPin`]s driven through the `embedded-hal` digital traits.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use linux_embedded_hal::{
    gpio_cdev::{self, Chip, LineRequestFlags},
    CdevPin, Delay,
};
use log::{debug, info};
use thiserror::Error;

use crate::{
    command::State,
    config::BoardConfig,
    error::{HardwareFault, Port},
    lcd::{Config, Lcd},
    port::{Button, ButtonInput, ButtonState, LedBank},
    sender::ParallelSender,
};

pub type ShieldDisplay = Lcd<ParallelSender<CdevPin>, Delay>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("cannot open GPIO chip {path}")]
    Chip {
        path: String,
        #[source]
        source: gpio_cdev::errors::Error,
    },
    #[error("cannot request GPIO line {offset}")]
    Line {
        offset: u32,
        #[source]
        source: gpio_cdev::errors::Error,
    },
    #[error("GPIO line {offset}: {detail}")]
    Pin { offset: u32, detail: String },
    #[error("no line at index {index}, only {len} configured")]
    NoSuchLine { index: usize, len: usize },
}

/// Offset and pin of the `index`th configured line
fn line_at<P>(pins: &mut [(u32, P)], index: usize) -> Result<(u32, &mut P), BoardError> {
    let len = pins.len();
    pins.get_mut(index)
        .map(|(offset, pin)| (*offset, pin))
        .ok_or(BoardError::NoSuchLine { index, len })
}

/// Everything on the shield, ready to use
pub struct Shield {
    pub display: ShieldDisplay,
    pub leds: ShieldLeds,
    pub buttons: ShieldButtons,
}

impl Shield {
    /// Open the chip and bring up the display, the LEDs and the buttons, in that order
    pub fn open(config: &BoardConfig) -> Result<Self, HardwareFault> {
        let path = config.get_gpiochip().display().to_string();
        let mut chip = Chip::new(config.get_gpiochip()).map_err(|source| {
            HardwareFault::init(Port::Display, BoardError::Chip { path, source })
        })?;
        info!("opened {}", config.get_gpiochip().display());

        let display = open_display(&mut chip, config)?;
        let leds = ShieldLeds::open(&mut chip, config)
            .map_err(|err| HardwareFault::init(Port::LedBank, err))?;
        let buttons = ShieldButtons::open(&mut chip, config)
            .map_err(|err| HardwareFault::init(Port::Buttons, err))?;

        Ok(Self {
            display,
            leds,
            buttons,
        })
    }
}

fn request_pin(
    chip: &mut Chip,
    offset: u32,
    flags: LineRequestFlags,
    default: u8,
    consumer: &str,
) -> Result<CdevPin, BoardError> {
    let handle = chip
        .get_line(offset)
        .and_then(|line| line.request(flags, default, consumer))
        .map_err(|source| BoardError::Line { offset, source })?;
    CdevPin::new(handle).map_err(|err| BoardError::Pin {
        offset,
        detail: format!("{err:?}"),
    })
}

fn open_display(chip: &mut Chip, config: &BoardConfig) -> Result<ShieldDisplay, HardwareFault> {
    let lines = config.get_lcd_lines();
    let consumer = config.get_consumer();
    let mut output = |offset| {
        request_pin(chip, offset, LineRequestFlags::OUTPUT, 0, consumer)
            .map_err(|err| HardwareFault::init(Port::Display, err))
    };

    let rs = output(lines.rs)?;
    let en = output(lines.en)?;
    let [d4, d5, d6, d7] = lines.data;
    let sender =
        ParallelSender::new_4pin(rs, en, output(d4)?, output(d5)?, output(d6)?, output(d7)?);

    Lcd::new(sender, Delay {}, Config::default())
        .map_err(|err| HardwareFault::init(Port::Display, err))
}

/// One output line per LED
///
/// Each line is first requested as-is to find out what a previous run
/// left on it, then re-requested as an output starting at that level.
pub struct ShieldLeds {
    pins: Vec<(u32, CdevPin)>,
    states: Vec<State>,
}

impl ShieldLeds {
    fn open(chip: &mut Chip, config: &BoardConfig) -> Result<Self, BoardError> {
        let consumer = config.get_consumer();
        let mut pins = Vec::with_capacity(config.get_led_lines().len());
        let mut states = Vec::with_capacity(config.get_led_lines().len());

        for &offset in config.get_led_lines() {
            let level = {
                let line = chip
                    .get_line(offset)
                    .map_err(|source| BoardError::Line { offset, source })?;
                let probe = line
                    .request(LineRequestFlags::empty(), 0, consumer)
                    .map_err(|source| BoardError::Line { offset, source })?;
                probe
                    .get_value()
                    .map_err(|source| BoardError::Line { offset, source })?
            };

            let state = State::from(level != 0);
            debug!("LED line {offset} found {state:?}");
            let pin = request_pin(chip, offset, LineRequestFlags::OUTPUT, level, consumer)?;
            pins.push((offset, pin));
            states.push(state);
        }

        Ok(Self { pins, states })
    }
}

impl LedBank for ShieldLeds {
    type Error = BoardError;

    fn len(&self) -> usize {
        self.pins.len()
    }

    fn read_state(&self) -> Vec<State> {
        self.states.clone()
    }

    fn write(&mut self, index: usize, state: State) -> Result<(), Self::Error> {
        let (offset, pin) = line_at(&mut self.pins, index)?;
        pin.set_state(PinState::from(state.is_on()))
            .map_err(|err| BoardError::Pin {
                offset,
                detail: format!("{err:?}"),
            })?;
        self.states[index] = state;
        Ok(())
    }
}

/// Button inputs, pulled up on the shield so a press reads low
pub struct ShieldButtons {
    pins: Vec<(u32, CdevPin)>,
}

impl ShieldButtons {
    fn open(chip: &mut Chip, config: &BoardConfig) -> Result<Self, BoardError> {
        let pins = config
            .get_button_lines()
            .iter()
            .map(|&offset| {
                request_pin(chip, offset, LineRequestFlags::INPUT, 0, config.get_consumer())
                    .map(|pin| (offset, pin))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pins })
    }
}

impl ButtonInput for ShieldButtons {
    type Error = BoardError;

    fn read(&mut self, button: Button) -> Result<ButtonState, Self::Error> {
        let (offset, pin) = line_at(&mut self.pins, button.index())?;
        let low = pin.is_low().map_err(|err| BoardError::Pin {
            offset,
            detail: format!("{err:?}"),
        })?;
        Ok(match low {
            true => ButtonState::Pressed,
            false => ButtonState::Released,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_line_is_found_by_index() {
        let mut pins = vec![(5, 'a'), (6, 'b')];
        let (offset, pin) = line_at(&mut pins, 1).unwrap();
        assert_eq!((offset, *pin), (6, 'b'));
    }

    #[test]
    fn index_past_the_configured_lines_is_an_error() {
        let mut pins = vec![(5, 'a'), (6, 'b')];
        let err = line_at(&mut pins, 7).unwrap_err();
        assert!(matches!(err, BoardError::NoSuchLine { index: 7, len: 2 }));
        assert_eq!(err.to_string(), "no line at index 7, only 2 configured");
    }
}
