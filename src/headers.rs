//! Header row extraction.
//!
//! Only the first record of a delimited file is parsed. The csv reader is
//! lenient about stray quotes, so the raw bytes of that record are captured
//! while it is read and checked against strict quoting rules before the
//! fields are decoded.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use csv::ByteRecord;
use encoding_rs::Encoding;
use log::debug;

use crate::{
    error::{HeaderError, QuotingError},
    io_utils,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads the column names from the first record of `path`.
///
/// The path is checked before opening; the file handle is released before
/// this returns.
pub fn read_headers(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Vec<String>, HeaderError> {
    if !path.is_file() {
        return Err(HeaderError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| HeaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut capture = CapturingReader::new(BufReader::new(file));

    let mut record = ByteRecord::new();
    {
        let mut reader = io_utils::open_csv_reader(&mut capture, delimiter);
        let found = reader
            .read_byte_record(&mut record)
            .map_err(|source| HeaderError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        if !found || record.is_empty() {
            return Err(HeaderError::EmptyHeader {
                path: path.to_path_buf(),
            });
        }
    }

    // The capture holds at least the whole first record; validation stops at
    // its terminator.
    let raw = capture.captured.as_slice();
    validate_quoting(raw, delimiter).map_err(|(offset, kind)| HeaderError::Parse {
        path: path.to_path_buf(),
        line: line_of(raw, offset),
        byte: offset as u64,
        kind,
    })?;

    let headers = record
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            // A byte order mark only belongs to the file, never to a later column.
            let field = match idx {
                0 => field.strip_prefix(UTF8_BOM).unwrap_or(field),
                _ => field,
            };
            io_utils::decode_bytes(field, encoding)
                .map(normalize_line_breaks)
                .ok_or_else(|| HeaderError::Decode {
                    path: path.to_path_buf(),
                    column: idx + 1,
                    encoding: encoding.name(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Read {} column(s) from {:?}: {:?}", headers.len(), path, headers);
    Ok(headers)
}

/// Quoted fields may span lines; `\r\n` inside them is read as `\n`.
fn normalize_line_breaks(name: String) -> String {
    if name.contains("\r\n") {
        name.replace("\r\n", "\n")
    } else {
        name
    }
}

fn line_of(bytes: &[u8], offset: usize) -> u64 {
    let end = offset.min(bytes.len());
    bytes[..end].iter().filter(|&&b| b == b'\n').count() as u64 + 1
}

/// Tees every byte read from `inner` so the first record can be inspected
/// after the csv reader has consumed it.
struct CapturingReader<R> {
    inner: R,
    captured: Vec<u8>,
}

impl<R: Read> CapturingReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            captured: Vec::new(),
        }
    }
}

impl<R: Read> Read for CapturingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        self.captured.extend_from_slice(&buf[..read]);
        Ok(read)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    RecordStart,
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Checks the first record in `bytes` against RFC 4180 quoting. Blank lines
/// before the record are skipped, as the csv reader does. On failure returns
/// the byte offset of the offending character.
pub(crate) fn validate_quoting(bytes: &[u8], delimiter: u8) -> Result<(), (usize, QuotingError)> {
    use QuoteState::*;

    let start = if bytes.starts_with(UTF8_BOM) {
        UTF8_BOM.len()
    } else {
        0
    };
    let mut state = RecordStart;
    let mut opened_at = 0;
    for (idx, &byte) in bytes.iter().enumerate().skip(start) {
        state = match (state, byte) {
            (RecordStart, b'\r' | b'\n') => RecordStart,
            (RecordStart | FieldStart, b'"') => {
                opened_at = idx;
                Quoted
            }
            (RecordStart | FieldStart | Unquoted | QuoteInQuoted, b) if b == delimiter => {
                FieldStart
            }
            (FieldStart | Unquoted | QuoteInQuoted, b'\r' | b'\n') => return Ok(()),
            (Unquoted, b'"') => return Err((idx, QuotingError::BareQuote)),
            (RecordStart | FieldStart | Unquoted, _) => Unquoted,
            (Quoted, b'"') => QuoteInQuoted,
            (Quoted, _) => Quoted,
            (QuoteInQuoted, b'"') => Quoted,
            (QuoteInQuoted, _) => return Err((idx, QuotingError::ExtraneousAfterQuote)),
        };
    }
    if state == Quoted {
        return Err((opened_at, QuotingError::UnterminatedQuote));
    }
    Ok(())
}
