//! The analysis pipeline: load, tabulate, build graphs, measure, write.

use lanes_core::config::{LanesConfig, ResolvedPaths};
use lanes_core::error::ErrorCode;
use lanes_core::{CooccurrenceTable, Dataset, IncidenceTable, SimilarityTable};
use lanes_graph::{BipartiteGraph, GraphStats, WeightedGraph, compute_metrics};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::plot;
use crate::report::{self, write_report};

/// Output-stage failures.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render plot {}: {message}", path.display())]
    PlotRender { path: PathBuf, message: String },
}

impl RunError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ReportWrite { .. } => ErrorCode::ReportWriteFailed,
            Self::PlotRender { .. } => ErrorCode::PlotRenderFailed,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub paths: ResolvedPaths,
    pub students: usize,
    pub dropped_lines: usize,
    pub bipartite: GraphStats,
    pub similarity: GraphStats,
    pub cooccurrence: GraphStats,
    pub reports: Vec<PathBuf>,
    pub plots: Vec<PathBuf>,
}

/// Run the whole analysis with paths anchored at `root`.
///
/// # Errors
///
/// Fails on the first missing input, unwritable report or failed plot.
#[instrument(skip(config))]
pub fn run(config: &LanesConfig, root: &Path) -> anyhow::Result<RunSummary> {
    let paths = config.resolve_paths(root);

    let dataset = Dataset::load(&paths.data)?;
    info!(
        path = %paths.data.display(),
        lanes = dataset.groups().len(),
        "dataset loaded"
    );

    let incidence = IncidenceTable::from_dataset(&dataset);
    let similarity = SimilarityTable::from_incidence(&incidence);
    let cooccurrence = CooccurrenceTable::from_incidence(&incidence);
    info!(students = incidence.len(), "tables built");

    let bipartite = BipartiteGraph::from_incidence(&incidence);
    let similarity_graph = WeightedGraph::from_similarity(&similarity);
    let cooccurrence_graph = WeightedGraph::from_cooccurrence(&cooccurrence);
    info!(
        bipartite_edges = bipartite.edge_count(),
        similarity_edges = similarity_graph.edge_count(),
        cooccurrence_edges = cooccurrence_graph.edge_count(),
        "graphs built"
    );

    let similarity_metrics = compute_metrics(&similarity_graph);
    let cooccurrence_metrics = compute_metrics(&cooccurrence_graph);

    let reports = [
        (report::INCIDENCE_REPORT, report::incidence_table(&incidence)),
        (report::SIMILARITY_REPORT, report::similarity_table(&similarity)),
        (report::COOCCURRENCE_REPORT, report::cooccurrence_table(&cooccurrence)),
        (
            report::SIMILARITY_METRICS_REPORT,
            similarity_metrics.to_text_table(),
        ),
        (
            report::COOCCURRENCE_METRICS_REPORT,
            cooccurrence_metrics.to_text_table(),
        ),
    ]
    .iter()
    .map(|(name, table)| write_report(&paths.output, name, table))
    .collect::<Result<Vec<_>, _>>()?;

    let plots = if config.render.plots {
        plot::render_all(
            &paths.plots,
            &bipartite,
            &similarity_graph,
            &cooccurrence_graph,
        )?
    } else {
        info!("plot rendering disabled");
        Vec::new()
    };

    Ok(RunSummary {
        students: incidence.len(),
        dropped_lines: dataset.dropped_lines(),
        bipartite: GraphStats::from_graph(&bipartite.graph),
        similarity: GraphStats::from_graph(&similarity_graph.graph),
        cooccurrence: GraphStats::from_graph(&cooccurrence_graph.graph),
        reports,
        plots,
        paths,
    })
}
