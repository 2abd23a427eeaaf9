use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::{cli::ReportFormat, compare::Comparison};

const SECTION_RULE: &str = "---------------------";
const STATISTICS_RULE: &str = "------------------------";
const EMPTY_SECTION: &str = "N/A";
const LABEL_WIDTH: usize = 20;

pub fn render(comparison: &Comparison, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(comparison)),
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(comparison)
                .context("Serializing comparison report")?;
            json.push('\n');
            Ok(json)
        }
    }
}

pub fn render_text(comparison: &Comparison) -> String {
    let mut output = String::new();
    push_section(&mut output, "Matching Columns", &comparison.matched);
    push_section(&mut output, "Missing Columns", &comparison.missing);
    if comparison.unmatched_computed {
        push_section(&mut output, "Unmatched Columns", &comparison.unmatched);
    }

    let counts = &comparison.counts;
    let _ = write!(output, "\nStatistics\n{STATISTICS_RULE}\n");
    push_stat(&mut output, "Template Columns", counts.template);
    push_stat(&mut output, "Target Columns", counts.target);
    push_stat(&mut output, "Missing Columns", counts.missing);
    push_stat(&mut output, "Matching Columns", counts.matched);
    push_stat(&mut output, "Unmatched Columns", counts.unmatched);
    push_stat(&mut output, "Status", comparison.status);
    output
}

fn push_section(output: &mut String, title: &str, columns: &[String]) {
    let _ = write!(output, "\n{title}\n{SECTION_RULE}\n");
    if columns.is_empty() {
        output.push_str(EMPTY_SECTION);
    } else {
        output.push_str(&columns.join("\n"));
    }
    output.push('\n');
}

fn push_stat(output: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(output, "{label:<LABEL_WIDTH$}{value}");
}
