pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod headers;
pub mod io_utils;
pub mod report;

use std::{env, io::Write, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::{
    cli::Cli,
    compare::Comparison,
    config::{CompareConfig, OutputTarget},
};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Exit status used with `--fail-on-invalid` when template columns are missing.
pub const INVALID_EXIT_CODE: i32 = 3;

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("colcompare", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reported,
    ReportedInvalid,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Reported => 0,
            Outcome::ReportedInvalid => INVALID_EXIT_CODE,
        }
    }
}

pub fn run() -> Result<Outcome> {
    init_logging();
    let cli = Cli::parse();
    let config = CompareConfig::from_cli(&cli)?;
    let comparison = execute(&config)?;
    if config.fail_on_invalid && !comparison.is_valid() {
        return Ok(Outcome::ReportedInvalid);
    }
    Ok(Outcome::Reported)
}

/// Reads both headers, compares them and writes the report.
///
/// The output destination is only opened once both reads and the rendering
/// have succeeded, so a failed run leaves no report behind.
pub fn execute(config: &CompareConfig) -> Result<Comparison> {
    let template_delimiter = config.template_delimiter();
    let target_delimiter = config.target_delimiter();
    debug!(
        "Template delimiter '{}', target delimiter '{}', encoding {}",
        printable_delimiter(template_delimiter),
        printable_delimiter(target_delimiter),
        config.encoding.name()
    );

    let template = headers::read_headers(&config.template, template_delimiter, config.encoding)
        .with_context(|| format!("Error reading template file {:?}", config.template))?;
    let target = headers::read_headers(&config.target, target_delimiter, config.encoding)
        .with_context(|| format!("Error reading target file {:?}", config.target))?;
    info!(
        "Comparing {} template column(s) from {:?} with {} target column(s) from {:?}",
        template.len(),
        config.template,
        target.len(),
        config.target
    );

    let comparison = compare::compare(&template, &target, config.show_unmatched);
    let rendered = report::render(&comparison, config.format)?;

    let mut writer = io_utils::open_report_writer(&config.output)?;
    writer
        .write_all(rendered.as_bytes())
        .context("Writing comparison report")?;
    writer.flush().context("Flushing comparison report")?;
    drop(writer);

    if let OutputTarget::File(path) = &config.output {
        info!("Report written to {path:?}");
    }
    info!(
        "Status {}: {} matched, {} missing, {} unmatched",
        comparison.status,
        comparison.counts.matched,
        comparison.counts.missing,
        comparison.counts.unmatched
    );
    Ok(comparison)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
