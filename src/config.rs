//! Display geometry, and how the shield is wired to the GPIO header

use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Rows of the character LCD
pub const LCD_ROWS: usize = 2;
/// Characters per row
pub const LCD_COLUMNS: usize = 16;
/// Discrete LEDs on the shield
pub const LED_COUNT: usize = 7;
/// Push buttons on the shield
pub const BUTTON_COUNT: usize = 2;

pub const ENV_GPIOCHIP: &str = "LCD_SHIELD_GPIOCHIP";
pub const ENV_LCD_LINES: &str = "LCD_SHIELD_LCD_LINES";
pub const ENV_LED_LINES: &str = "LCD_SHIELD_LED_LINES";
pub const ENV_BUTTON_LINES: &str = "LCD_SHIELD_BUTTON_LINES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: '{value}' is not a GPIO line offset")]
    BadLine { var: &'static str, value: String },
    #[error("{var}: expected {expected} line offsets, got {found}")]
    WrongCount {
        var: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Line offsets of the LCD bus (RW is tied to ground on the shield)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdLines {
    pub rs: u32,
    pub en: u32,
    pub data: [u32; 4],
}

/// Where everything is on the GPIO character device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    gpiochip: PathBuf,
    consumer: String,
    lcd: LcdLines,
    leds: [u32; LED_COUNT],
    buttons: [u32; BUTTON_COUNT],
}

impl Default for BoardConfig {
    /// The shield on a 40 pin Raspberry Pi header, in BCM numbering
    fn default() -> Self {
        Self {
            gpiochip: PathBuf::from("/dev/gpiochip0"),
            consumer: String::from("lcd-shield"),
            lcd: LcdLines {
                rs: 4,
                en: 17,
                data: [27, 22, 18, 23],
            },
            leds: [5, 6, 13, 19, 7, 12, 16],
            buttons: [24, 25],
        }
    }
}

impl BoardConfig {
    /// Defaults, with whatever `LCD_SHIELD_*` variables are set on top
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides looked up by variable name
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(ENV_GPIOCHIP) {
            self.gpiochip = PathBuf::from(path);
        }
        if let Some(value) = lookup(ENV_LCD_LINES) {
            let [rs, en, d4, d5, d6, d7] = parse_lines::<6>(ENV_LCD_LINES, &value)?;
            self.lcd = LcdLines {
                rs,
                en,
                data: [d4, d5, d6, d7],
            };
        }
        if let Some(value) = lookup(ENV_LED_LINES) {
            self.leds = parse_lines(ENV_LED_LINES, &value)?;
        }
        if let Some(value) = lookup(ENV_BUTTON_LINES) {
            self.buttons = parse_lines(ENV_BUTTON_LINES, &value)?;
        }
        Ok(self)
    }

    pub fn get_gpiochip(&self) -> &Path {
        &self.gpiochip
    }

    pub fn get_consumer(&self) -> &str {
        &self.consumer
    }

    pub fn get_lcd_lines(&self) -> LcdLines {
        self.lcd
    }

    pub fn get_led_lines(&self) -> &[u32; LED_COUNT] {
        &self.leds
    }

    pub fn get_button_lines(&self) -> &[u32; BUTTON_COUNT] {
        &self.buttons
    }
}

/// Parse exactly `N` comma separated line offsets
fn parse_lines<const N: usize>(var: &'static str, value: &str) -> Result<[u32; N], ConfigError> {
    let lines = value
        .split(',')
        .map(str::trim)
        .map(|item| {
            item.parse::<u32>().map_err(|_| ConfigError::BadLine {
                var,
                value: item.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let found = lines.len();
    lines.try_into().map_err(|_| ConfigError::WrongCount {
        var,
        expected: N,
        found,
    })
}
