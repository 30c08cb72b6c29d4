//! Relational tables derived from the survey.
//!
//! ```text
//! Dataset
//!    ↓  IncidenceTable::from_dataset()
//! IncidenceTable (student × lane, 0/1)
//!    ├─ SimilarityTable::from_incidence()    (student × student, Jaccard)
//!    └─ CooccurrenceTable::from_incidence()  (lane × lane, shared picks)
//! ```
//!
//! Both pairwise tables fill the upper triangle (diagonal included) and
//! mirror it, so they are symmetric by construction.

use std::collections::HashMap;

use tracing::instrument;

use crate::dataset::Dataset;
use crate::lane::Lane;

/// One student's lane picks, indexed by [`Lane::index`].
pub type LaneRow = [bool; Lane::COUNT];

// ---------------------------------------------------------------------------
// Incidence
// ---------------------------------------------------------------------------

/// Student × lane membership table.
///
/// Rows follow the sorted student list; columns follow [`Lane::ALL`]. A row
/// may be all zeros only when constructed directly with [`IncidenceTable::new`];
/// every student coming from a [`Dataset`] picked at least one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceTable {
    students: Vec<String>,
    rows: Vec<LaneRow>,
}

impl IncidenceTable {
    /// Build a table from explicit rows. `students` and `rows` must be the
    /// same length.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[must_use]
    pub fn new(students: Vec<String>, rows: Vec<LaneRow>) -> Self {
        assert_eq!(
            students.len(),
            rows.len(),
            "incidence table needs one row per student"
        );
        Self { students, rows }
    }

    /// Mark every (student, lane) pair listed in the dataset.
    #[must_use]
    #[instrument(skip(dataset))]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let students = dataset.students();
        let position: HashMap<&str, usize> = students
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut rows = vec![[false; Lane::COUNT]; students.len()];
        for (lane, names) in dataset.groups() {
            for name in names {
                if let Some(&i) = position.get(name.as_str()) {
                    rows[i][lane.index()] = true;
                }
            }
        }

        Self { students, rows }
    }

    /// Sorted student names (row labels).
    #[must_use]
    pub fn students(&self) -> &[String] {
        &self.students
    }

    /// Lanes in column order.
    #[must_use]
    pub const fn lanes(&self) -> &'static [Lane] {
        &Lane::ALL
    }

    /// Number of students (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the table has no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Whether student `i` picked `lane`.
    #[must_use]
    pub fn get(&self, i: usize, lane: Lane) -> bool {
        self.rows[i][lane.index()]
    }

    /// Lane picks of student `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &LaneRow {
        &self.rows[i]
    }

    /// Column of `lane` as one flag per student.
    #[must_use]
    pub fn column(&self, lane: Lane) -> Vec<bool> {
        self.rows.iter().map(|row| row[lane.index()]).collect()
    }

    /// Lanes picked by student `i`, in canonical order.
    #[must_use]
    pub fn lanes_of(&self, i: usize) -> Vec<Lane> {
        Lane::ALL
            .into_iter()
            .filter(|lane| self.rows[i][lane.index()])
            .collect()
    }

    /// Total number of 1-cells.
    #[must_use]
    pub fn ones(&self) -> usize {
        self.rows.iter().flatten().filter(|&&cell| cell).count()
    }
}

// ---------------------------------------------------------------------------
// Jaccard similarity
// ---------------------------------------------------------------------------

/// Jaccard index of two boolean vectors: |A∩B| / |A∪B|.
///
/// Returns 0.0 when both vectors are all false. Extra trailing entries of
/// the longer slice are ignored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn jaccard(a: &[bool], b: &[bool]) -> f64 {
    let (inter, union) = a
        .iter()
        .zip(b)
        .fold((0usize, 0usize), |(inter, union), (&x, &y)| {
            (inter + usize::from(x && y), union + usize::from(x || y))
        });

    if union == 0 {
        0.0
    } else {
        inter as f64 / union as f64
    }
}

/// Symmetric student × student Jaccard similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityTable {
    students: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl SimilarityTable {
    #[must_use]
    #[instrument(skip(incidence), fields(students = incidence.len()))]
    pub fn from_incidence(incidence: &IncidenceTable) -> Self {
        let n = incidence.len();
        let mut values = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i..n {
                let v = jaccard(incidence.row(i), incidence.row(j));
                values[i][j] = v;
                values[j][i] = v;
            }
        }

        Self {
            students: incidence.students().to_vec(),
            values,
        }
    }

    /// Row and column labels.
    #[must_use]
    pub fn students(&self) -> &[String] {
        &self.students
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Similarity between students `i` and `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Full row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }
}

// ---------------------------------------------------------------------------
// Co-occurrence
// ---------------------------------------------------------------------------

/// Symmetric lane × lane count of students who picked both lanes.
///
/// The diagonal holds the number of students who picked each lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CooccurrenceTable {
    counts: [[u32; Lane::COUNT]; Lane::COUNT],
}

impl CooccurrenceTable {
    #[must_use]
    #[instrument(skip(incidence), fields(students = incidence.len()))]
    pub fn from_incidence(incidence: &IncidenceTable) -> Self {
        let mut counts = [[0u32; Lane::COUNT]; Lane::COUNT];

        for i in 0..Lane::COUNT {
            for j in i..Lane::COUNT {
                let shared = (0..incidence.len())
                    .filter(|&s| incidence.row(s)[i] && incidence.row(s)[j])
                    .count();
                let shared = u32::try_from(shared).unwrap_or(u32::MAX);
                counts[i][j] = shared;
                counts[j][i] = shared;
            }
        }

        Self { counts }
    }

    /// Lanes in row/column order.
    #[must_use]
    pub const fn lanes(&self) -> &'static [Lane] {
        &Lane::ALL
    }

    /// Number of students who picked both `a` and `b`.
    #[must_use]
    pub const fn get(&self, a: Lane, b: Lane) -> u32 {
        self.counts[a.index()][b.index()]
    }

    /// Counts indexed by [`Lane::index`].
    #[must_use]
    pub const fn counts(&self) -> &[[u32; Lane::COUNT]; Lane::COUNT] {
        &self.counts
    }
}
