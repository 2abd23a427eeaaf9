//! Run configuration resolved once from the parsed command line.

use std::path::PathBuf;

use anyhow::Result;
use encoding_rs::Encoding;

use crate::{
    cli::{Cli, DEFAULT_OUTPUT_FILE, ReportFormat},
    io_utils,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Created if absent, truncated if present.
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub template: PathBuf,
    pub target: PathBuf,
    pub output: OutputTarget,
    pub show_unmatched: bool,
    /// Explicit delimiter; `None` resolves per file from its extension.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
    pub format: ReportFormat,
    pub fail_on_invalid: bool,
}

impl CompareConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let output = if cli.output_to_file {
            OutputTarget::File(
                cli.output_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            )
        } else {
            OutputTarget::Stdout
        };
        Ok(Self {
            template: cli.template_file.clone(),
            target: cli.input_file.clone(),
            output,
            show_unmatched: cli.show_unmatched_cols,
            delimiter: cli.delimiter,
            encoding: io_utils::resolve_encoding(cli.input_encoding.as_deref())?,
            format: cli.format,
            fail_on_invalid: cli.fail_on_invalid,
        })
    }

    pub fn template_delimiter(&self) -> u8 {
        io_utils::resolve_input_delimiter(&self.template, self.delimiter)
    }

    pub fn target_delimiter(&self) -> u8 {
        io_utils::resolve_input_delimiter(&self.target, self.delimiter)
    }
}
