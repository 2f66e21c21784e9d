//! Command line front end
//!
//! Tokens are handled in the order they are given, the same way the
//! request builder expects them, so `A B --row=0` and `--row=0 A B` fail
//! on the same rule.

use std::num::IntErrorKind;

use thiserror::Error;

use crate::{
    error::RequestError,
    request::{Request, RequestBuilder},
};

pub const PROGRAM: &str = "lcd";

pub const USAGE: &str = "Usage: lcd [OPTION...] [STR1 [STR2]]";

pub const HELP: &str = "\
Usage: lcd [OPTION...] [STR1 [STR2]]
write message to LCD over GPIO

  -c, --clear                Clear the LCD
  -l, --leds=FLAGS           Set the LEDs (0=off, 1=on, -=unchanged)
  -r, --row=NR               LCD row to set
  -?, --help                 Give this help list
  -V, --version              Print program version

Mandatory or optional arguments to long options are also mandatory or optional
for any corresponding short options.

Environment:
  RUST_LOG                   Log filter (default: warn)
  LCD_SHIELD_GPIOCHIP        GPIO character device (default: /dev/gpiochip0)
  LCD_SHIELD_LCD_LINES       LCD lines RS,E,D4,D5,D6,D7
  LCD_SHIELD_LED_LINES       LED lines, one per LED
  LCD_SHIELD_BUTTON_LINES    Button lines, one per button";

/// What the command line asks the program to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Apply(Request),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unrecognized option '{0}'")]
    UnknownOption(String),
    #[error("option '{0}' requires an argument")]
    MissingValue(String),
    #[error("option '{0}' doesn't allow an argument")]
    UnexpectedValue(String),
    #[error("invalid row index '{0}'")]
    InvalidRow(String),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Opt {
    Clear,
    Leds,
    Row,
    Help,
    Version,
}

impl Opt {
    fn from_long(name: &str) -> Option<Self> {
        match name {
            "clear" => Some(Opt::Clear),
            "leds" => Some(Opt::Leds),
            "row" => Some(Opt::Row),
            "help" => Some(Opt::Help),
            "version" => Some(Opt::Version),
            _ => None,
        }
    }

    fn from_short(name: char) -> Option<Self> {
        match name {
            'c' => Some(Opt::Clear),
            'l' => Some(Opt::Leds),
            'r' => Some(Opt::Row),
            '?' => Some(Opt::Help),
            'V' => Some(Opt::Version),
            _ => None,
        }
    }

    fn long(self) -> &'static str {
        match self {
            Opt::Clear => "--clear",
            Opt::Leds => "--leds",
            Opt::Row => "--row",
            Opt::Help => "--help",
            Opt::Version => "--version",
        }
    }

    fn takes_value(self) -> bool {
        matches!(self, Opt::Leds | Opt::Row)
    }
}

/// Apply one option to the builder, `Some` when parsing should stop there
fn apply_opt(
    builder: &mut RequestBuilder,
    opt: Opt,
    value: Option<String>,
) -> Result<Option<Invocation>, ArgsError> {
    match (opt, value) {
        (Opt::Help, _) => return Ok(Some(Invocation::Help)),
        (Opt::Version, _) => return Ok(Some(Invocation::Version)),
        (Opt::Clear, _) => {
            builder.set_clear();
        }
        (Opt::Leds, Some(spec)) => {
            builder.set_leds(&spec)?;
        }
        (Opt::Row, Some(row)) => {
            let index = match row.trim().parse::<usize>() {
                Ok(index) => index,
                // every digit is fine, the number is just past any display
                Err(err) if *err.kind() == IntErrorKind::PosOverflow => usize::MAX,
                Err(_) => return Err(ArgsError::InvalidRow(row.clone())),
            };
            builder.set_row(index)?;
        }
        (Opt::Leds | Opt::Row, None) => {
            return Err(ArgsError::MissingValue(opt.long().into()));
        }
    }
    Ok(None)
}

/// Parse the arguments (without the program name) for a display of
/// `rows` rows and a bank of `led_count` LEDs
pub fn parse<I, S>(args: I, rows: usize, led_count: usize) -> Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut builder = RequestBuilder::new(rows, led_count);
    let mut args = args.into_iter().map(Into::into);
    let mut only_positionals = false;

    while let Some(arg) = args.next() {
        if only_positionals || arg == "-" || !arg.starts_with('-') {
            builder.add_line(arg)?;
            continue;
        }

        if arg == "--" {
            only_positionals = true;
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value.to_owned())),
                None => (long, None),
            };
            let opt = Opt::from_long(name)
                .ok_or_else(|| ArgsError::UnknownOption(arg.clone()))?;

            let value = match (opt.takes_value(), inline) {
                (true, Some(value)) => Some(value),
                (true, None) => Some(
                    args.next()
                        .ok_or_else(|| ArgsError::MissingValue(format!("--{name}")))?,
                ),
                (false, Some(_)) => {
                    return Err(ArgsError::UnexpectedValue(format!("--{name}")));
                }
                (false, None) => None,
            };

            if let Some(done) = apply_opt(&mut builder, opt, value)? {
                return Ok(done);
            }
            continue;
        }

        // a cluster of short options, like `-c` or `-cl1-0`
        let cluster: Vec<char> = arg.chars().skip(1).collect();
        let mut position = 0;
        while position < cluster.len() {
            let name = cluster[position];
            let opt = Opt::from_short(name)
                .ok_or_else(|| ArgsError::UnknownOption(format!("-{name}")))?;
            position += 1;

            let value = if opt.takes_value() {
                let rest: String = cluster[position..].iter().collect();
                position = cluster.len();
                match rest.is_empty() {
                    false => Some(rest),
                    true => Some(
                        args.next()
                            .ok_or_else(|| ArgsError::MissingValue(format!("-{name}")))?,
                    ),
                }
            } else {
                None
            };

            if let Some(done) = apply_opt(&mut builder, opt, value)? {
                return Ok(done);
            }
        }
    }

    Ok(Invocation::Apply(builder.build()?))
}

pub fn version() -> String {
    format!("{PROGRAM} v{}", env!("CARGO_PKG_VERSION"))
}
