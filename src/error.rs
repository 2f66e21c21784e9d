//! Errors shared by the request model and the renderer

use core::fmt;

use thiserror::Error;

/// A request that can't be applied as given
///
/// Every one of these is raised before any hardware is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Too many lines (max {max})")]
    TooManyLines { max: usize },
    #[error("Multiple texts for row {row}")]
    ConflictingRowSpecification { row: usize },
    #[error("Row index {row} out of bounds (max {max})")]
    RowOutOfRange { row: usize, max: usize },
    #[error("Too many LED values: {spec} = {len} (max {max})")]
    LedSpecTooLong { spec: String, len: usize, max: usize },
    #[error("Nothing to do. Please provide text and/or commands.")]
    NothingToDo,
    #[error("Please provide a text for row {row}.")]
    MissingRowText { row: usize },
}

/// The hardware capability a fault came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    Display,
    LedBank,
    Buttons,
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Display => f.write_str("Display"),
            Port::LedBank => f.write_str("LedBank"),
            Port::Buttons => f.write_str("Buttons"),
        }
    }
}

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A device that failed to come up, a request it can't take,
/// or a write that didn't complete
///
/// Always fatal, nothing is retried.
#[derive(Debug, Error)]
pub enum HardwareFault {
    #[error("{port} failed to initialize")]
    Init {
        port: Port,
        #[source]
        source: Cause,
    },
    /// Found before anything was sent to the port
    #[error("{port} can't take this request")]
    Unfit {
        port: Port,
        #[source]
        source: Cause,
    },
    #[error("{port} write failed")]
    Write {
        port: Port,
        #[source]
        source: Cause,
    },
}

impl HardwareFault {
    pub fn init(port: Port, source: impl Into<Cause>) -> Self {
        HardwareFault::Init {
            port,
            source: source.into(),
        }
    }

    pub fn unfit(port: Port, source: impl Into<Cause>) -> Self {
        HardwareFault::Unfit {
            port,
            source: source.into(),
        }
    }

    pub fn write(port: Port, source: impl Into<Cause>) -> Self {
        HardwareFault::Write {
            port,
            source: source.into(),
        }
    }

    pub fn port(&self) -> Port {
        match self {
            HardwareFault::Init { port, .. }
            | HardwareFault::Unfit { port, .. }
            | HardwareFault::Write { port, .. } => *port,
        }
    }
}
