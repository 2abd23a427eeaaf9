//! Column comparison between a template header and a target header.
//!
//! Names are compared with ASCII case folding only. Duplicate names are
//! scanned independently, so a template listing `A` twice matches both
//! occurrences against a single `A` in the target.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Valid,
    Invalid,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Valid => f.write_str("Valid"),
            Status::Invalid => f.write_str("Invalid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnCounts {
    pub template: usize,
    pub target: usize,
    pub matched: usize,
    pub missing: usize,
    pub unmatched: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Template columns present in the target, in template order.
    pub matched: Vec<String>,
    /// Template columns absent from the target, in template order.
    pub missing: Vec<String>,
    /// Target columns absent from the template, in target order. Always empty
    /// unless `unmatched_computed` is set.
    pub unmatched: Vec<String>,
    pub unmatched_computed: bool,
    pub counts: ColumnCounts,
    pub status: Status,
}

impl Comparison {
    pub fn is_valid(&self) -> bool {
        self.status == Status::Valid
    }
}

pub fn compare(template: &[String], target: &[String], show_unmatched: bool) -> Comparison {
    let (matched, missing): (Vec<String>, Vec<String>) = template
        .iter()
        .cloned()
        .partition(|column| contains_column(target, column));

    let unmatched = if show_unmatched {
        target
            .iter()
            .filter(|column| !contains_column(template, column))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    let counts = ColumnCounts {
        template: template.len(),
        target: target.len(),
        matched: matched.len(),
        missing: missing.len(),
        unmatched: unmatched.len(),
    };
    let status = if counts.template == counts.matched {
        Status::Valid
    } else {
        Status::Invalid
    };

    Comparison {
        matched,
        missing,
        unmatched,
        unmatched_computed: show_unmatched,
        counts,
        status,
    }
}

pub fn contains_column(columns: &[String], needle: &str) -> bool {
    columns
        .iter()
        .any(|column| column.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn matching_ignores_ascii_case() {
        let result = compare(&names(&["Name", "Age"]), &names(&["name", "AGE"]), false);
        assert_eq!(result.matched, names(&["Name", "Age"]));
        assert!(result.missing.is_empty());
        assert_eq!(result.status, Status::Valid);
    }

    #[test]
    fn missing_columns_invalidate() {
        let result = compare(
            &names(&["Name", "Age", "Email"]),
            &names(&["name", "age"]),
            false,
        );
        assert_eq!(result.matched, names(&["Name", "Age"]));
        assert_eq!(result.missing, names(&["Email"]));
        assert_eq!(result.status, Status::Invalid);
        assert_eq!(
            result.counts,
            ColumnCounts {
                template: 3,
                target: 2,
                matched: 2,
                missing: 1,
                unmatched: 0,
            }
        );
    }

    #[test]
    fn unmatched_only_computed_on_request() {
        let template = names(&["Name"]);
        let target = names(&["Name", "Extra"]);

        let off = compare(&template, &target, false);
        assert!(off.unmatched.is_empty());
        assert!(!off.unmatched_computed);

        let on = compare(&template, &target, true);
        assert_eq!(on.unmatched, names(&["Extra"]));
        assert_eq!(on.counts.unmatched, 1);
        assert_eq!(on.status, Status::Valid);
    }

    #[test]
    fn duplicate_template_names_are_matched_independently() {
        let result = compare(&names(&["A", "A"]), &names(&["A"]), true);
        assert_eq!(result.matched, names(&["A", "A"]));
        assert!(result.missing.is_empty());
        assert_eq!(result.counts.matched, 2);
        assert!(result.is_valid());
    }

    #[test]
    fn whitespace_and_non_ascii_case_are_significant() {
        let result = compare(&names(&["name", "Straße"]), &names(&[" name", "STRASSE"]), true);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, names(&["name", "Straße"]));
        assert_eq!(result.unmatched, names(&[" name", "STRASSE"]));
    }

    #[test]
    fn empty_template_is_valid() {
        let result = compare(&[], &names(&["a"]), true);
        assert!(result.is_valid());
        assert_eq!(result.unmatched, names(&["a"]));
    }

    #[test]
    fn status_displays_as_text() {
        assert_eq!(Status::Valid.to_string(), "Valid");
        assert_eq!(Status::Invalid.to_string(), "Invalid");
    }
}
