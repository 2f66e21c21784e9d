use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::{
    command::{Bits, Command, RegisterSelection},
    sender::{SendCommand, SenderError, Signal},
    utils::{BitOps, BitState},
};

/// Write-only 4 pin sender: RS, E and D4~D7, with RW tied to ground
pub struct ParallelSender<Pin>
where
    Pin: OutputPin,
{
    rs_pin: Pin,
    en_pin: Pin,
    db_pins: [Pin; 4],
}

impl<Pin> ParallelSender<Pin>
where
    Pin: OutputPin,
{
    pub fn new_4pin(rs: Pin, en: Pin, db4: Pin, db5: Pin, db6: Pin, db7: Pin) -> Self {
        Self {
            rs_pin: rs,
            en_pin: en,
            db_pins: [db4, db5, db6, db7],
        }
    }

    /// Give the pins back, in the order [`ParallelSender::new_4pin`] takes them
    pub fn release(self) -> (Pin, Pin, [Pin; 4]) {
        (self.rs_pin, self.en_pin, self.db_pins)
    }

    fn drive(pin: &mut Pin, level: BitState, signal: Signal) -> Result<(), SenderError> {
        let result = match level {
            BitState::Set => pin.set_high(),
            BitState::Clear => pin.set_low(),
        };
        result.map_err(|err| SenderError::new(signal, err))
    }

    fn push_bits(&mut self, raw_bits: u8) -> Result<(), SenderError> {
        debug_assert!(raw_bits < 2u8.pow(4), "data is greater than 4 bits");

        self.db_pins
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, pin)| {
                let index = index as u8;
                Self::drive(pin, raw_bits.check_bit(index), Signal::Data(index + 4))
            })
    }

    // the controller latches D4~D7 on the falling edge of E,
    // every line change here is a syscall on Linux, well above the 450 ns pulse width
    fn pulse_enable(&mut self) -> Result<(), SenderError> {
        Self::drive(&mut self.en_pin, BitState::Set, Signal::Enable)?;
        Self::drive(&mut self.en_pin, BitState::Clear, Signal::Enable)
    }

    fn push_nibble(&mut self, raw_bits: u8) -> Result<(), SenderError> {
        self.push_bits(raw_bits)?;
        self.pulse_enable()
    }
}

impl<Pin, Delayer> SendCommand<Delayer> for ParallelSender<Pin>
where
    Pin: OutputPin,
    Delayer: DelayNs,
{
    type Error = SenderError;

    fn send(&mut self, command: Command) -> Result<(), Self::Error> {
        Self::drive(&mut self.en_pin, BitState::Clear, Signal::Enable)?;

        let rs_level = match command.get_register_selection() {
            RegisterSelection::Command => BitState::Clear,
            RegisterSelection::Data => BitState::Set,
        };
        Self::drive(&mut self.rs_pin, rs_level, Signal::RegisterSelect)?;

        match command.get_data() {
            Bits::Bit4(raw_bits) => self.push_nibble(raw_bits),
            Bits::Bit8(raw_bits) => {
                let (high, low) = raw_bits.nibbles();
                self.push_nibble(high)?;
                self.push_nibble(low)
            }
        }
    }
}
