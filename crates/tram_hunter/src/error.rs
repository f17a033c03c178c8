use std::{io, result};

use model::{destination::Destination, stop::Stop};
use thiserror::Error;
use utility::id::Id;

#[derive(Debug, Error)]
pub enum Error {
    /// An operation that needs at least one stop was given none.
    #[error("no stops to work with")]
    NoStops,

    #[error("stop not found: {0}")]
    StopNotFound(Id<Stop>),

    #[error("destination not found: {0}")]
    DestinationNotFound(Id<Destination>),

    #[error("destination {destination} references unknown stop {stop}")]
    UnknownStopInDestination {
        destination: Id<Destination>,
        stop: Id<Stop>,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = result::Result<T, Error>;
