//! Survey parsing.
//!
//! # Format
//!
//! One token per line. A line equal to a lane header (`MID`, `Top`, `Jg`,
//! `Sup`, `ADC`) opens that lane's group; every other non-blank line is a
//! student name appended to the open group.
//!
//! ```text
//! MID
//! Ana
//! Bruno
//! Top
//! Ana
//! ```
//!
//! Lines are trimmed before matching. Names that appear before the first
//! header have no group to land in and are dropped; the count is kept in
//! [`Dataset::dropped_lines`] so the caller can log it. A header that shows
//! up a second time restarts its group, discarding the names collected under
//! the earlier occurrence.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::error::ErrorCode;
use crate::lane::Lane;

/// Failure to load the survey file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The survey file does not exist.
    #[error("survey dataset not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The survey file exists but could not be read as UTF-8 text.
    #[error("failed to read survey dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DatasetError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::DatasetNotFound,
            Self::Io { .. } => ErrorCode::DatasetUnreadable,
        }
    }
}

/// The parsed survey: student names grouped by lane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    groups: BTreeMap<Lane, Vec<String>>,
    dropped_lines: usize,
}

impl Dataset {
    /// Parse survey text. Never fails: malformed input yields fewer groups.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut groups: BTreeMap<Lane, Vec<String>> = BTreeMap::new();
        let mut current: Option<Lane> = None;
        let mut dropped_lines = 0usize;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(lane) = Lane::from_header(line) {
                if groups.insert(lane, Vec::new()).is_some() {
                    debug!(%lane, "lane header repeated, restarting its group");
                }
                current = Some(lane);
            } else if let Some(lane) = current {
                groups.entry(lane).or_default().push(line.to_string());
            } else {
                dropped_lines += 1;
            }
        }

        Self {
            groups,
            dropped_lines,
        }
    }

    /// Read and parse the survey at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NotFound`] if the file is missing and
    /// [`DatasetError::Io`] for any other read failure.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                DatasetError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                DatasetError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let dataset = Self::parse(&text);
        if dataset.dropped_lines > 0 {
            warn!(
                dropped = dataset.dropped_lines,
                "lines before the first lane header were ignored"
            );
        }
        Ok(dataset)
    }

    /// Names per lane, only for lanes whose header appeared.
    #[must_use]
    pub const fn groups(&self) -> &BTreeMap<Lane, Vec<String>> {
        &self.groups
    }

    /// Names listed under `lane`, empty if the header never appeared.
    #[must_use]
    pub fn names(&self, lane: Lane) -> &[String] {
        self.groups.get(&lane).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every distinct student name, sorted.
    #[must_use]
    pub fn students(&self) -> Vec<String> {
        self.groups
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of non-blank lines seen before the first header.
    #[must_use]
    pub const fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_names_under_headers() {
        let ds = Dataset::parse("MID\nAna\nBruno\nTop\nAna\n");
        assert_eq!(ds.names(Lane::Mid), ["Ana", "Bruno"]);
        assert_eq!(ds.names(Lane::Top), ["Ana"]);
        assert!(ds.names(Lane::Adc).is_empty());
        assert_eq!(ds.groups().len(), 2);
    }

    #[test]
    fn blank_lines_and_padding_are_ignored() {
        let ds = Dataset::parse("\n  Sup  \n\n\t Carla \n   \n");
        assert_eq!(ds.names(Lane::Support), ["Carla"]);
        assert_eq!(ds.dropped_lines(), 0);
    }

    #[test]
    fn lines_before_first_header_are_dropped() {
        let ds = Dataset::parse("Survey results\nvote now\nJg\nDavi\n");
        assert_eq!(ds.dropped_lines(), 2);
        assert_eq!(ds.students(), ["Davi"]);
    }

    #[test]
    fn input_without_headers_is_empty() {
        let ds = Dataset::parse("Ana\nBruno\n");
        assert!(ds.groups().is_empty());
        assert!(ds.students().is_empty());
        assert_eq!(ds.dropped_lines(), 2);
    }

    #[test]
    fn repeated_header_restarts_group() {
        let ds = Dataset::parse("Top\nAna\nMID\nBruno\nTop\nCarla\n");
        assert_eq!(ds.names(Lane::Top), ["Carla"]);
        assert_eq!(ds.names(Lane::Mid), ["Bruno"]);
    }

    #[test]
    fn header_without_names_is_an_empty_group() {
        let ds = Dataset::parse("ADC\nMID\nAna\n");
        assert!(ds.groups().contains_key(&Lane::Adc));
        assert!(ds.names(Lane::Adc).is_empty());
    }

    #[test]
    fn duplicate_names_are_kept_in_group() {
        let ds = Dataset::parse("Top\nAna\nAna\n");
        assert_eq!(ds.names(Lane::Top), ["Ana", "Ana"]);
        assert_eq!(ds.students(), ["Ana"]);
    }

    #[test]
    fn students_are_sorted_union() {
        let ds = Dataset::parse("MID\nzoe\nBruno\nTop\nAna\nBruno\n");
        assert_eq!(ds.students(), ["Ana", "Bruno", "zoe"]);
    }

    #[test]
    fn crlf_line_endings_parse() {
        let ds = Dataset::parse("MID\r\nAna\r\nSup\r\nBruno\r\n");
        assert_eq!(ds.names(Lane::Mid), ["Ana"]);
        assert_eq!(ds.names(Lane::Support), ["Bruno"]);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Dataset::load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
        assert_eq!(err.code(), ErrorCode::DatasetNotFound);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("DataSet.txt");
        std::fs::write(&path, "intro\nJg\nAna\n").expect("write dataset");
        let ds = Dataset::load(&path).expect("load");
        assert_eq!(ds.names(Lane::Jungle), ["Ana"]);
        assert_eq!(ds.dropped_lines(), 1);
    }
}
