//! Per-file outcome reporting

use std::io::Write;

use tracing::error;

use crate::files::FileOutcome;

/// Print each successful destination to `out` and log each failure
///
/// Returns the number of failed files.
pub fn report_outcomes<W: Write>(outcomes: &[FileOutcome], out: &mut W) -> std::io::Result<usize> {
    let mut failures = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(dest) => writeln!(out, "{}", dest.display())?,
            Err(e) => {
                failures += 1;
                error!("{}: {}", outcome.source.display(), e);
            }
        }
    }

    Ok(failures)
}
