// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::ops::Range;

use aimcal_recur::{ParseIssue, RecurError};
use ariadne::{Color, Label, Report, ReportKind, Source};

/// Build one report per issue of a parse failure. Other errors have no
/// source to point into and give no reports.
pub fn parse_reports(err: &RecurError) -> Vec<Report<'static, Range<usize>>> {
    let RecurError::Parse {
        what,
        input,
        issues,
    } = err
    else {
        return Vec::new();
    };

    issues
        .iter()
        .map(|issue| report(what, input.len(), issue))
        .collect()
}

/// Print the reports of a parse failure to stderr. Returns whether anything
/// was printed.
pub fn eprint_parse_error(err: &RecurError) -> bool {
    let RecurError::Parse { input, .. } = err else {
        return false;
    };

    let reports = parse_reports(err);
    for report in &reports {
        if let Err(e) = report.eprint(Source::from(input.as_str())) {
            tracing::warn!(err = %e, "failed to print report");
        }
    }
    !reports.is_empty()
}

/// Pass `result` through, printing the reports of a parse failure first.
pub fn or_report<T>(result: Result<T, RecurError>) -> Result<T, Box<dyn Error>> {
    result.map_err(|err| {
        eprint_parse_error(&err);
        err.into()
    })
}

fn report(what: &str, len: usize, issue: &ParseIssue) -> Report<'static, Range<usize>> {
    // an error at the end of input has an empty span past the last byte
    let span = issue.span.start.min(len)..issue.span.end.min(len);
    Report::build(ReportKind::Error, span.clone())
        .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
        .with_message(format!("Invalid {what}"))
        .with_label(
            Label::new(span)
                .with_message(issue.message.clone())
                .with_color(Color::Red),
        )
        .finish()
}
