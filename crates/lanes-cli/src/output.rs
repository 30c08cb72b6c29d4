//! Run summary rendering and error classification.
//!
//! A successful run ends with one summary: human text by default, a single
//! JSON object with `--json`. Failures are mapped to an [`ErrorCode`] so the
//! binary can log a stable code and print a remediation hint.

use lanes_core::config::ConfigError;
use lanes_core::dataset::DatasetError;
use lanes_core::error::ErrorCode;
use std::io::{self, Write};

use crate::run::{RunError, RunSummary};

/// Shared width for summary separators.
pub const RULE_WIDTH: usize = 60;

/// Write a horizontal separator.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    rule(w)
}

/// Render a left-aligned key/value line.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable sections.
    Text,
    /// One machine-readable JSON object.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Write the run summary in the requested mode.
pub fn render_summary(mode: OutputMode, summary: &RunSummary, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *w, summary).map_err(io::Error::other)?;
        return writeln!(w);
    }

    section(w, "Survey")?;
    kv(w, "dataset", summary.paths.data.display().to_string())?;
    kv(w, "students", summary.students.to_string())?;
    kv(w, "dropped lines", summary.dropped_lines.to_string())?;
    writeln!(w)?;

    section(w, "Graphs")?;
    kv(
        w,
        "bipartite",
        format!(
            "{} vertices, {} edges",
            summary.bipartite.node_count, summary.bipartite.edge_count
        ),
    )?;
    kv(
        w,
        "similarity",
        format!(
            "{} vertices, {} edges, {} components",
            summary.similarity.node_count,
            summary.similarity.edge_count,
            summary.similarity.component_count
        ),
    )?;
    kv(
        w,
        "co-occurrence",
        format!(
            "{} vertices, {} edges, {} components",
            summary.cooccurrence.node_count,
            summary.cooccurrence.edge_count,
            summary.cooccurrence.component_count
        ),
    )?;
    writeln!(w)?;

    section(w, "Written")?;
    for path in summary.reports.iter().chain(&summary.plots) {
        writeln!(w, "{}", path.display())?;
    }
    if summary.plots.is_empty() {
        writeln!(w, "(plots skipped)")?;
    }
    Ok(())
}

/// Classify a failed run by walking its error chain.
pub fn error_code(err: &anyhow::Error) -> ErrorCode {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<DatasetError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<RunError>() {
            return e.code();
        }
    }
    ErrorCode::InternalUnexpected
}
