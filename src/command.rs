//! HD44780 instruction set, and its encoding into what goes on the bus
//!
//! Only the write path is modelled: the shield ties RW to ground,
//! so the busy flag and RAM can never be read back.

use crate::utils::BitOps;

/// Instructions this crate sends to the LCD controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSet {
    ClearDisplay,
    ReturnHome,
    EntryModeSet(MoveDirection, ShiftType),
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    // the two half commands below are not instructions from the datasheet,
    // they are the upper nibbles used to force the controller into 4 bit mode
    // from whatever mode it was left in
    ResetNibble,
    HalfFunctionSet,
    /// Function set, always with a 4 bit data length
    FunctionSet(LineMode, Font),
    SetDDRAM(u8),
    WriteDataToRAM(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MoveDirection {
    RightToLeft,
    #[default]
    LeftToRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShiftType {
    #[default]
    CursorOnly,
    CursorAndDisplay,
}

/// On/off level, shared by controller flags and the LED outputs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum State {
    #[default]
    Off,
    On,
}

impl State {
    pub fn is_on(self) -> bool {
        self == State::On
    }
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        match on {
            true => State::On,
            false => State::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Font5x8,
    Font5x11,
}

/// Which controller register a transfer targets (the RS line)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterSelection {
    Command,
    Data,
}

/// Payload of a transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bits {
    /// A single nibble, right aligned, sent in one enable pulse
    Bit4(u8),
    /// A full byte, sent as high nibble then low nibble
    Bit8(u8),
}

/// An encoded instruction, ready for a [`SendCommand`](crate::sender::SendCommand)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    pub fn get_data(&self) -> Bits {
        self.data
    }
}

impl CommandSet {
    /// How long the controller needs before it accepts the next transfer
    pub fn execution_time_us(&self) -> u32 {
        match self {
            CommandSet::ClearDisplay | CommandSet::ReturnHome => 2_000,
            _ => 50,
        }
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        let instruction =
            |raw_bits: u8| Command::new(RegisterSelection::Command, Bits::Bit8(raw_bits));

        match command {
            CommandSet::ClearDisplay => instruction(0b0000_0001),

            CommandSet::ReturnHome => instruction(0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                instruction(raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                [display, cursor, cursor_blink]
                    .into_iter()
                    .zip([2, 1, 0])
                    .for_each(|(state, pos)| match state {
                        State::Off => {
                            raw_bits.clear_bit(pos);
                        }
                        State::On => {
                            raw_bits.set_bit(pos);
                        }
                    });

                instruction(raw_bits)
            }

            CommandSet::ResetNibble => Command::new(RegisterSelection::Command, Bits::Bit4(0b0011)),

            CommandSet::HalfFunctionSet => {
                Command::new(RegisterSelection::Command, Bits::Bit4(0b0010))
            }

            CommandSet::FunctionSet(line, font) => {
                // DL bit (4) stays clear, the bus is 4 bit wide
                let mut raw_bits: u8 = 0b0010_0000;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x11 => raw_bits.set_bit(2),
                };

                instruction(raw_bits)
            }

            CommandSet::SetDDRAM(addr) => {
                debug_assert!(addr < 2u8.pow(7), "DDRAM address out of range");
                instruction(0b1000_0000 | (addr & 0b0111_1111))
            }

            CommandSet::WriteDataToRAM(data) => {
                Command::new(RegisterSelection::Data, Bits::Bit8(data))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(command: CommandSet) -> (RegisterSelection, Bits) {
        let command = Command::from(command);
        (command.get_register_selection(), command.get_data())
    }

    #[test]
    fn function_set_for_two_line_4bit_bus() {
        assert_eq!(
            encoded(CommandSet::FunctionSet(LineMode::TwoLine, Font::Font5x8)),
            (RegisterSelection::Command, Bits::Bit8(0x28))
        );
        assert_eq!(
            encoded(CommandSet::FunctionSet(LineMode::OneLine, Font::Font5x11)),
            (RegisterSelection::Command, Bits::Bit8(0x24))
        );
    }

    #[test]
    fn display_on_cursor_off() {
        let command = CommandSet::DisplayOnOff {
            display: State::On,
            cursor: State::Off,
            cursor_blink: State::Off,
        };
        assert_eq!(
            encoded(command),
            (RegisterSelection::Command, Bits::Bit8(0x0C))
        );
    }

    #[test]
    fn entry_mode_left_to_right() {
        assert_eq!(
            encoded(CommandSet::EntryModeSet(
                MoveDirection::LeftToRight,
                ShiftType::CursorOnly
            )),
            (RegisterSelection::Command, Bits::Bit8(0x06))
        );
    }

    #[test]
    fn ddram_address_of_second_row() {
        assert_eq!(
            encoded(CommandSet::SetDDRAM(0x40)),
            (RegisterSelection::Command, Bits::Bit8(0xC0))
        );
    }

    #[test]
    fn data_write_selects_data_register() {
        assert_eq!(
            encoded(CommandSet::WriteDataToRAM(b'A')),
            (RegisterSelection::Data, Bits::Bit8(0x41))
        );
    }

    #[test]
    fn half_commands_are_single_nibbles() {
        assert_eq!(
            encoded(CommandSet::ResetNibble),
            (RegisterSelection::Command, Bits::Bit4(0x3))
        );
        assert_eq!(
            encoded(CommandSet::HalfFunctionSet),
            (RegisterSelection::Command, Bits::Bit4(0x2))
        );
    }

    #[test]
    fn clear_and_home_need_the_long_wait() {
        assert_eq!(CommandSet::ClearDisplay.execution_time_us(), 2_000);
        assert_eq!(CommandSet::ReturnHome.execution_time_us(), 2_000);
        assert_eq!(CommandSet::WriteDataToRAM(0).execution_time_us(), 50);
    }
}
