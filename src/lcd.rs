//! Driver for the HD44780 compatible controller of the character LCD

use embedded_hal::delay::DelayNs;
use log::debug;
use thiserror::Error;

use crate::{command::CommandSet, line::FixedRow, port, sender::SendCommand};

mod init;

pub use init::Config;

// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Full rectangle, used for every character the controller ROM can't show
const UNSUPPORTED_CHAR: u8 = 0xFF;

pub struct Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: Sender,
    delayer: Delayer,
    rows: usize,
    columns: usize,
}

/// Reasons a [`Lcd`] refuses or fails a row write
#[derive(Debug, Error)]
pub enum LcdError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Bus(#[from] E),
    #[error("row {row} is outside the {rows} row display")]
    RowOutOfRange { row: usize, rows: usize },
    #[error("a {width} character row doesn't match the {columns} column display")]
    WidthMismatch { width: usize, columns: usize },
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Give back the sender and the delayer
    pub fn release(self) -> (Sender, Delayer) {
        (self.sender, self.delayer)
    }

    pub fn clean_display(&mut self) -> Result<(), Sender::Error> {
        self.sender
            .send_and_wait(CommandSet::ClearDisplay, &mut self.delayer)
    }

    pub fn return_home(&mut self) -> Result<(), Sender::Error> {
        self.sender
            .send_and_wait(CommandSet::ReturnHome, &mut self.delayer)
    }

    /// Move cursor to (column, row)
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) -> Result<(), Sender::Error> {
        // DDRAM addresses are 7 bits wide, columns past a row wrap around
        let row_start = ROW_OFFSETS[pos.1 as usize % ROW_OFFSETS.len()];
        let raw_pos = row_start.wrapping_add(pos.0) & 0x7F;

        self.sender
            .send_and_wait(CommandSet::SetDDRAM(raw_pos), &mut self.delayer)
    }

    pub fn write_u8_to_cur(&mut self, byte: u8) -> Result<(), Sender::Error> {
        self.sender
            .send_and_wait(CommandSet::WriteDataToRAM(byte), &mut self.delayer)
    }

    /// write [char] to current position
    /// Only ASCII 0x20 (white space) to ASCII 0x7D (`}`) are shown as is
    pub fn write_char_to_cur(&mut self, char: char) -> Result<(), Sender::Error> {
        self.write_u8_to_cur(char_to_rom(char))
    }

    /// write string to specific position
    pub fn write_str_to_pos(&mut self, str: &str, pos: (u8, u8)) -> Result<(), Sender::Error> {
        self.set_cursor_pos(pos)?;
        str.chars().try_for_each(|char| self.write_char_to_cur(char))
    }
}

/// Map a character onto the A00 character ROM
pub fn char_to_rom(char: char) -> u8 {
    match char.is_ascii() {
        true if (0x20 <= char as u8) && (char as u8 <= 0x7D) => char as u8,
        _ => UNSUPPORTED_CHAR,
    }
}

impl<Sender, Delayer> port::Display for Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    type Error = LcdError<Sender::Error>;

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        debug!("clear LCD");
        self.clean_display()?;
        self.return_home()?;
        Ok(())
    }

    fn write_row(&mut self, row: usize, line: &FixedRow) -> Result<(), Self::Error> {
        if row >= self.rows {
            return Err(LcdError::RowOutOfRange {
                row,
                rows: self.rows,
            });
        }
        if line.width() != self.columns {
            return Err(LcdError::WidthMismatch {
                width: line.width(),
                columns: self.columns,
            });
        }

        debug!("LCD row {row} <- {:?}", line.as_str());
        self.write_str_to_pos(line.as_str(), (0, row as u8))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Bits, Command, RegisterSelection};
    use crate::port::Display;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use std::convert::Infallible;

    /// Keeps every transfer, instead of toggling pins
    #[derive(Default)]
    struct Recorder {
        sent: Vec<Command>,
    }

    impl SendCommand<NoopDelay> for Recorder {
        type Error = Infallible;

        fn send(&mut self, command: Command) -> Result<(), Self::Error> {
            self.sent.push(command);
            Ok(())
        }
    }

    fn bytes(sent: &[Command]) -> Vec<(RegisterSelection, Bits)> {
        sent.iter()
            .map(|command| (command.get_register_selection(), command.get_data()))
            .collect()
    }

    fn lcd() -> Lcd<Recorder, NoopDelay> {
        Lcd::new(Recorder::default(), NoopDelay::new(), Config::default()).unwrap()
    }

    #[test]
    fn init_enters_4bit_mode_without_clearing() {
        let (recorder, _) = lcd().release();
        use Bits::*;
        use RegisterSelection::Command as Cmd;

        assert_eq!(
            bytes(&recorder.sent),
            vec![
                (Cmd, Bit4(0x3)),
                (Cmd, Bit4(0x3)),
                (Cmd, Bit4(0x3)),
                (Cmd, Bit4(0x2)),
                (Cmd, Bit8(0x28)),
                (Cmd, Bit8(0x0C)),
                (Cmd, Bit8(0x06)),
            ]
        );
    }

    #[test]
    fn row_write_addresses_the_row_then_sends_every_column() {
        let mut lcd = lcd();
        lcd.write_row(1, &FixedRow::render("Hi", 16)).unwrap();

        let (recorder, _) = lcd.release();
        let written = bytes(&recorder.sent[7..]);

        assert_eq!(written.len(), 1 + 16);
        assert_eq!(written[0], (RegisterSelection::Command, Bits::Bit8(0xC0)));
        assert_eq!(written[1], (RegisterSelection::Data, Bits::Bit8(b'H')));
        assert_eq!(written[2], (RegisterSelection::Data, Bits::Bit8(b'i')));
        assert!(written[3..]
            .iter()
            .all(|&sent| sent == (RegisterSelection::Data, Bits::Bit8(b' '))));
    }

    #[test]
    fn reset_clears_and_returns_home() {
        let mut lcd = lcd();
        lcd.reset().unwrap();

        let (recorder, _) = lcd.release();
        assert_eq!(
            bytes(&recorder.sent[7..]),
            vec![
                (RegisterSelection::Command, Bits::Bit8(0x01)),
                (RegisterSelection::Command, Bits::Bit8(0x02)),
            ]
        );
    }

    #[test]
    fn rows_outside_the_display_are_refused() {
        let mut lcd = lcd();
        let err = lcd.write_row(2, &FixedRow::render("x", 16)).unwrap_err();
        assert!(matches!(err, LcdError::RowOutOfRange { row: 2, rows: 2 }));

        let err = lcd.write_row(0, &FixedRow::render("x", 20)).unwrap_err();
        assert!(matches!(
            err,
            LcdError::WidthMismatch {
                width: 20,
                columns: 16
            }
        ));
    }

    #[test]
    fn far_columns_wrap_inside_ddram() {
        let mut lcd = lcd();
        lcd.set_cursor_pos((0, 1)).unwrap();
        lcd.set_cursor_pos((200, 1)).unwrap();
        lcd.set_cursor_pos((255, 3)).unwrap();

        let (recorder, _) = lcd.release();
        assert_eq!(
            bytes(&recorder.sent[7..]),
            vec![
                (RegisterSelection::Command, Bits::Bit8(0x80 | 0x40)),
                // 0x40 + 200 = 0x108, wrapped to 0x08
                (RegisterSelection::Command, Bits::Bit8(0x80 | 0x08)),
                // 0x54 + 255 = 0x153, wrapped to 0x53
                (RegisterSelection::Command, Bits::Bit8(0x80 | 0x53)),
            ]
        );
    }

    #[test]
    fn characters_outside_the_rom_become_blocks() {
        assert_eq!(char_to_rom('A'), b'A');
        assert_eq!(char_to_rom('}'), b'}');
        assert_eq!(char_to_rom('~'), 0xFF);
        assert_eq!(char_to_rom('\0'), 0xFF);
        assert_eq!(char_to_rom('é'), 0xFF);
    }
}
