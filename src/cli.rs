use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

pub const DEFAULT_OUTPUT_FILE: &str = "colcompare-results.txt";

#[derive(Debug, Parser)]
#[command(
    name = "colcompare",
    version = concat!("v", env!("CARGO_PKG_VERSION"), " | ", env!("CARGO_PKG_REPOSITORY")),
    about = "Compare and validate CSV column headers against a template",
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// Template file whose first row holds the expected column names
    #[arg(short = 't', long = "template-file")]
    pub template_file: PathBuf,
    /// Target CSV file to be inspected
    #[arg(short = 'i', long = "input-file")]
    pub input_file: PathBuf,
    /// Print results to a file instead of standard output (overwrites it)
    #[arg(short = 'o', long = "output-to-file")]
    pub output_to_file: bool,
    /// Results file used with --output-to-file
    #[arg(long = "output-path", requires = "output_to_file")]
    pub output_path: Option<PathBuf>,
    /// Show target columns that are not part of the template
    #[arg(short = 'u', long = "show-unmatched-cols")]
    pub show_unmatched_cols: bool,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of both input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Exit with status 3 when the target is missing template columns
    #[arg(long = "fail-on-invalid")]
    pub fail_on_invalid: bool,
    /// Display version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: (),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            if first == '"' {
                return Err("Delimiter cannot be the quote character".to_string());
            }
            Ok(first as u8)
        }
    }
}
