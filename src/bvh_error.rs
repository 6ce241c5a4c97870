use crate::bvh_import::ParseError;
use std::{error, fmt};

/// Unified error type
///
/// Failures while reading the text itself are reported through the more
/// specific `ParseError`, which has a `From` conversion into this type.
/// File access failures from the load path wrap `std::io::Error`.
#[derive(Debug)]
pub enum BvhError {
    StdIoError(std::io::Error),
    ParseError(ParseError),
}

impl error::Error for BvhError {}

impl fmt::Display for BvhError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::StdIoError(e) => write!(f, "std::io::Error: {}", e.kind()),
            Self::ParseError(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl From<std::io::Error> for BvhError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl From<ParseError> for BvhError {
    fn from(e: ParseError) -> Self {
        Self::ParseError(e)
    }
}
