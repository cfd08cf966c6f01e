//! GRAPHULA Generation Log
//!
//! Records every generated fixture as one JSON value per line, and reads
//! such a record back as a strictly ordered replay source.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod reader;
pub mod writer;

pub use encoding::{LineEncoder, decode_line, encode_line};
pub use reader::ReplayLog;
pub use writer::WriteLog;
