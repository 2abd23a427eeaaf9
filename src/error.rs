//! Error kinds raised while extracting header rows.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("File does not exist or is a directory: {path:?}")]
    NotFound { path: PathBuf },
    #[error("Read empty columns from file {path:?}")]
    EmptyHeader { path: PathBuf },
    #[error("Malformed header in {path:?} at line {line}, byte {byte}: {kind}")]
    Parse {
        path: PathBuf,
        line: u64,
        byte: u64,
        kind: QuotingError,
    },
    #[error("Failed to decode column {column} of {path:?} with encoding {encoding}")]
    Decode {
        path: PathBuf,
        column: usize,
        encoding: &'static str,
    },
    #[error("Parsing delimited text in {path:?}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Quoting violations detected in the header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuotingError {
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    #[error("bare quote in non-quoted field")]
    BareQuote,
    #[error("extraneous character after closing quote")]
    ExtraneousAfterQuote,
}
