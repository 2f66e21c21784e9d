/*!
# LCD shield

Text and LED control for a 16x2 character LCD shield with 7 LEDs and 2 buttons,
wired straight to GPIO.

Basic Usage:

1. Describe what should change with a [`request::RequestBuilder`] (or let [`cli::parse`] do it)
<br/>
<br/>
2. Get hold of something implementing [`port::Display`] and [`port::LedBank`] <br/>
    On Linux, [`board::Shield::open`] brings up the real hardware:
    * the LCD through [`lcd::Lcd`] and the 4 bit [`sender::ParallelSender`]
    * the LEDs and buttons as plain GPIO lines
<br/>
<br/>
3. Hand both to a [`render::Renderer`] and [`render::Renderer::apply`] the request
*/

#[cfg(target_os = "linux")]
pub mod board;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod lcd;
pub mod led;
pub mod line;
pub mod port;
pub mod render;
pub mod request;
pub mod sender;
pub mod utils;
