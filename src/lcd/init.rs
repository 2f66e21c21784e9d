use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, ShiftType, State},
    config::{LCD_COLUMNS, LCD_ROWS},
    lcd::Lcd,
    sender::SendCommand,
};

/// [`Config`] is the init config of a [`Lcd`]
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rows: usize,
    columns: usize,
    font: Font,
    cursor: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: LCD_ROWS,
            columns: LCD_COLUMNS,
            font: Font::default(),
            cursor: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::default(),
            shift_type: ShiftType::default(),
        }
    }
}

impl Config {
    pub fn get_rows(&self) -> usize {
        self.rows
    }

    /// At most 4 rows are addressable
    pub fn set_rows(mut self, rows: usize) -> Self {
        self.rows = rows.clamp(1, 4);
        self
    }

    pub fn get_columns(&self) -> usize {
        self.columns
    }

    pub fn set_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn get_line_mode(&self) -> LineMode {
        match self.rows {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        }
    }

    pub fn get_font(&self) -> Font {
        self.font
    }

    /// 5x11 font only exists in one line mode, it's ignored otherwise
    pub fn set_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn get_cursor_state(&self) -> State {
        self.cursor
    }

    pub fn set_cursor_state(mut self, cursor: State) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub fn set_cursor_blink(mut self, blink: State) -> Self {
        self.cursor_blink = blink;
        self
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub fn set_direction(mut self, dir: MoveDirection) -> Self {
        self.direction = dir;
        self
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub fn set_shift_type(mut self, shift: ShiftType) -> Self {
        self.shift_type = shift;
        self
    }

    fn effective_font(&self) -> Font {
        match self.get_line_mode() {
            LineMode::OneLine => self.font,
            LineMode::TwoLine => Font::Font5x8,
        }
    }
}

impl<Sender, Delayer> Lcd<Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init LCD hardware
    ///
    /// The init sequence never clears the display RAM,
    /// rows nobody writes to keep what a previous run left there
    pub fn new(
        mut sender: Sender,
        mut delayer: Delayer,
        config: Config,
    ) -> Result<Self, Sender::Error> {
        debug!("init LCD controller, {config:?}");

        // the controller may be in 8 bit mode, or halfway through a 4 bit transfer,
        // three 0x3 nibbles put it into a known 8 bit state from any of those
        sender.delay_and_send(CommandSet::ResetNibble.into(), &mut delayer, 40_000)?;
        sender.delay_and_send(CommandSet::ResetNibble.into(), &mut delayer, 4_100)?;
        sender.delay_and_send(CommandSet::ResetNibble.into(), &mut delayer, 100)?;
        sender.delay_and_send(CommandSet::HalfFunctionSet.into(), &mut delayer, 100)?;
        delayer.delay_us(100);

        // from here on every transfer is a full byte in two nibbles
        sender.send_and_wait(
            CommandSet::FunctionSet(config.get_line_mode(), config.effective_font()),
            &mut delayer,
        )?;

        sender.send_and_wait(
            CommandSet::DisplayOnOff {
                display: State::On,
                cursor: config.get_cursor_state(),
                cursor_blink: config.get_cursor_blink(),
            },
            &mut delayer,
        )?;

        sender.send_and_wait(
            CommandSet::EntryModeSet(config.get_direction(), config.get_shift_type()),
            &mut delayer,
        )?;

        Ok(Lcd {
            sender,
            delayer,
            rows: config.get_rows(),
            columns: config.get_columns(),
        })
    }
}
