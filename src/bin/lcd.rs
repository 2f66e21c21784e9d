use std::{env, process::ExitCode};

use anyhow::Context;
use log::LevelFilter;

use lcd_shield::{
    cli::{self, Invocation},
    config::{BoardConfig, LCD_ROWS, LED_COUNT},
    request::Request,
};

/// `EX_USAGE` from sysexits.h
const EX_USAGE: u8 = 64;

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let request = match cli::parse(env::args().skip(1), LCD_ROWS, LED_COUNT) {
        Ok(Invocation::Help) => {
            println!("{}", cli::HELP);
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("{}", cli::version());
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Apply(request)) => request,
        Err(err) => {
            eprintln!("{}: {err}", cli::PROGRAM);
            eprintln!("{}", cli::USAGE);
            eprintln!("Try '{} --help' for more information.", cli::PROGRAM);
            return ExitCode::from(EX_USAGE);
        }
    };

    match run(request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err:#}", cli::PROGRAM);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "linux")]
fn run(request: Request) -> anyhow::Result<()> {
    use lcd_shield::{
        board::Shield,
        port::{Button, ButtonInput},
        render::Renderer,
    };
    use log::{debug, warn};

    let config = BoardConfig::from_env().context("invalid board configuration")?;
    debug!("{config:?}");

    let mut shield = Shield::open(&config)?;

    for button in Button::ALL {
        match shield.buttons.read(button) {
            Ok(state) => debug!("button {button:?}: {state:?}"),
            Err(err) => warn!("button {button:?} unreadable: {err}"),
        }
    }

    Renderer::new(&mut shield.display, &mut shield.leds).apply(request)?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(request: Request) -> anyhow::Result<()> {
    BoardConfig::from_env().context("invalid board configuration")?;
    log::debug!("{request:?}");
    anyhow::bail!("GPIO character devices are only available on Linux")
}
