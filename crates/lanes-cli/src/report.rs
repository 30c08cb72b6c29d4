//! Flat-text reports: the three survey tables and two metrics tables.

use lanes_core::table::TextTable;
use lanes_core::{CooccurrenceTable, IncidenceTable, SimilarityTable};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::run::RunError;

pub const INCIDENCE_REPORT: &str = "incidence_matrix.txt";
pub const SIMILARITY_REPORT: &str = "student_similarity_jaccard.txt";
pub const COOCCURRENCE_REPORT: &str = "lane_cooccurrence.txt";
pub const SIMILARITY_METRICS_REPORT: &str = "student_similarity_metrics.txt";
pub const COOCCURRENCE_METRICS_REPORT: &str = "lane_cooccurrence_metrics.txt";

/// Students × lanes, 0/1 cells.
pub fn incidence_table(incidence: &IncidenceTable) -> TextTable {
    incidence
        .lanes()
        .iter()
        .fold(TextTable::new(incidence.students().to_vec()), |t, &lane| {
            let values = incidence.column(lane).into_iter().map(i64::from).collect();
            t.int_column(lane.header(), values)
        })
}

/// Students × students Jaccard similarity.
pub fn similarity_table(similarity: &SimilarityTable) -> TextTable {
    let students = similarity.students();
    (0..similarity.len()).fold(TextTable::new(students.to_vec()), |t, j| {
        let values = (0..similarity.len()).map(|i| similarity.get(i, j)).collect();
        t.float_column(students[j].clone(), values)
    })
}

/// Lanes × lanes co-occurrence counts.
pub fn cooccurrence_table(cooccurrence: &CooccurrenceTable) -> TextTable {
    let lanes = cooccurrence.lanes();
    let index = lanes.iter().map(|l| l.header().to_string()).collect();
    lanes.iter().fold(TextTable::new(index), |t, &col| {
        let values = lanes
            .iter()
            .map(|&row| i64::from(cooccurrence.get(row, col)))
            .collect();
        t.int_column(col.header(), values)
    })
}

/// Render `table` into `dir/name`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`RunError::ReportWrite`] naming the directory or file that could
/// not be written.
pub fn write_report(dir: &Path, name: &str, table: &TextTable) -> Result<PathBuf, RunError> {
    fs::create_dir_all(dir).map_err(|source| RunError::ReportWrite {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(name);
    fs::write(&path, table.render()).map_err(|source| RunError::ReportWrite {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanes_core::Dataset;

    fn incidence(text: &str) -> IncidenceTable {
        IncidenceTable::from_dataset(&Dataset::parse(text))
    }

    #[test]
    fn incidence_report_layout() {
        let inc = incidence("MID\nAna\nBruno\nTop\nAna\n");
        assert_eq!(
            incidence_table(&inc).render(),
            "       MID  Top  Jg  Sup  ADC\n\
             Ana      1    1   0    0    0\n\
             Bruno    1    0   0    0    0\n"
        );
    }

    #[test]
    fn similarity_report_rounds_to_three_places() {
        let inc = incidence("MID\nAna\nBruno\nTop\nAna\nJg\nAna\n");
        let sim = SimilarityTable::from_incidence(&inc);
        assert_eq!(
            similarity_table(&sim).render(),
            "         Ana  Bruno\n\
             Ana    1.000  0.333\n\
             Bruno  0.333  1.000\n"
        );
    }

    #[test]
    fn cooccurrence_report_layout() {
        let inc = incidence("MID\nAna\nTop\nAna\nBruno\n");
        let co = CooccurrenceTable::from_incidence(&inc);
        assert_eq!(
            cooccurrence_table(&co).render(),
            "     MID  Top  Jg  Sup  ADC\n\
             MID    1    1   0    0    0\n\
             Top    1    2   0    0    0\n\
             Jg     0    0   0    0    0\n\
             Sup    0    0   0    0    0\n\
             ADC    0    0   0    0    0\n"
        );
    }

    #[test]
    fn empty_survey_reports_placeholder() {
        let inc = incidence("");
        let sim = SimilarityTable::from_incidence(&inc);
        assert_eq!(
            similarity_table(&sim).render(),
            "Empty DataFrame\nColumns: []\nIndex: []\n"
        );
        assert_eq!(
            incidence_table(&inc).render(),
            "Empty DataFrame\nColumns: [MID, Top, Jg, Sup, ADC]\nIndex: []\n"
        );
    }

    #[test]
    fn write_report_creates_directory() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let dir = tmp.path().join("nested/output");
        let inc = incidence("MID\nAna\n");

        let path = write_report(&dir, INCIDENCE_REPORT, &incidence_table(&inc)).expect("write");

        assert_eq!(path, dir.join(INCIDENCE_REPORT));
        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(written, incidence_table(&inc).render());
    }
}
