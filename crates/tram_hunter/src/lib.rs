pub mod catalog;
pub mod curation;
pub mod error;
pub mod framing;
pub mod listing;

pub use error::{Error, Result};
