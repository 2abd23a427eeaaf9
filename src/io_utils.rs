//! I/O utilities for header reading and report output.
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//! - **Reader construction**: `open_csv_reader` for headerless first-record
//!   reads.
//! - **Report sink**: `open_report_writer` routes to stdout or a truncated
//!   results file.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

use crate::config::OutputTarget;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Builds a reader that treats the first record as data so the caller sees
/// it through `read_byte_record`.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    builder.from_reader(reader)
}

/// Decodes one field with exactly `encoding`. Byte order marks are kept as
/// content; malformed input yields `None`.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Opens the report destination. A results file is created or truncated.
pub fn open_report_writer(target: &OutputTarget) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match target {
        OutputTarget::File(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
        )),
        OutputTarget::Stdout => Box::new(BufWriter::new(std::io::stdout())),
    };
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn tsv_extension_selects_tab_delimiter() {
        assert_eq!(
            resolve_input_delimiter(Path::new("data/orders.TSV"), None),
            DEFAULT_TSV_DELIMITER
        );
        assert_eq!(
            resolve_input_delimiter(Path::new("orders.csv"), None),
            DEFAULT_CSV_DELIMITER
        );
        assert_eq!(resolve_input_delimiter(Path::new("orders.tsv"), Some(b';')), b';');
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = resolve_encoding(Some("not-a-charset")).unwrap_err();
        assert!(err.to_string().contains("Unknown encoding"));
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
        assert_eq!(
            resolve_encoding(Some(" windows-1252 ")).unwrap().name(),
            "windows-1252"
        );
    }

    #[test]
    fn decode_keeps_bom_and_ignores_utf16_sniffing() {
        let decoded = decode_bytes(b"\xEF\xBB\xBFid", UTF_8).expect("decoded");
        assert_eq!(decoded, "\u{feff}id");
        let decoded = decode_bytes(b"\xFF\xFEid", encoding_rs::WINDOWS_1252).expect("decoded");
        assert_eq!(decoded, "\u{ff}\u{fe}id");
        assert!(decode_bytes(b"id\xFF", UTF_8).is_none());
    }

    #[test]
    fn report_writer_fails_for_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let target = OutputTarget::File(PathBuf::from(dir.path()).join("missing").join("out.txt"));
        let err = open_report_writer(&target).err().expect("creation fails");
        assert!(err.to_string().contains("Creating output file"));
    }
}
