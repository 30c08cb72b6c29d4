//! PNG rendering of the three survey graphs.
//!
//! | file                  | layout     | size     |
//! |-----------------------|------------|----------|
//! | `BipGraph.png`        | two rows   | 1000×600 |
//! | `StudentSimGraph.png` | stress     | 800×800  |
//! | `LaneCoocGraph.png`   | circle     | 600×600  |
//!
//! Layouts are deterministic; rendering is presentational only and never
//! feeds back into the reports.

pub mod draw;
pub mod layout;

use lanes_graph::{BipartiteGraph, WeightedGraph};
use petgraph::visit::EdgeRef;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::run::RunError;
use draw::{DrawResult, Shape};

pub const BIPARTITE_PLOT: &str = "BipGraph.png";
pub const SIMILARITY_PLOT: &str = "StudentSimGraph.png";
pub const COOCCURRENCE_PLOT: &str = "LaneCoocGraph.png";

const MARGIN: u32 = 50;

const STUDENT_COLOR: RGBColor = RGBColor(0xAD, 0xD8, 0xE6);
const LANE_COLOR: RGBColor = RGBColor(0xFA, 0x80, 0x72);
const BIPARTITE_EDGE_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);
const EDGE_COLOR: RGBColor = RGBColor(0x44, 0x44, 0x44);

/// Render all three plots into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`RunError::PlotRender`] naming the first file that failed.
pub fn render_all(
    dir: &Path,
    bipartite: &BipartiteGraph,
    similarity: &WeightedGraph,
    cooccurrence: &WeightedGraph,
) -> Result<Vec<PathBuf>, RunError> {
    fs::create_dir_all(dir).map_err(|e| RunError::PlotRender {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(vec![
        render(dir.join(BIPARTITE_PLOT), |p| draw_bipartite(p, bipartite))?,
        render(dir.join(SIMILARITY_PLOT), |p| draw_similarity(p, similarity))?,
        render(dir.join(COOCCURRENCE_PLOT), |p| {
            draw_cooccurrence(p, cooccurrence)
        })?,
    ])
}

fn render(path: PathBuf, draw: impl FnOnce(&Path) -> DrawResult) -> Result<PathBuf, RunError> {
    draw(&path).map_err(|e| RunError::PlotRender {
        path: path.clone(),
        message: e.to_string(),
    })?;
    info!(path = %path.display(), "plot written");
    Ok(path)
}

fn draw_bipartite(path: &Path, bip: &BipartiteGraph) -> DrawResult {
    let size = (1000, 600);
    let canvas = BitMapBackend::new(path, size).into_drawing_area();
    canvas.fill(&WHITE)?;

    let pixels = layout::fit(&layout::bipartite(bip), size, MARGIN);

    for e in bip.graph.edge_references() {
        let (a, b) = (pixels[e.source().index()], pixels[e.target().index()]);
        draw::edge(&canvas, a, b, 1, BIPARTITE_EDGE_COLOR, 0.0)?;
    }
    for node in bip.graph.node_indices() {
        let vertex = &bip.graph[node];
        let (shape, fill) = if vertex.is_student() {
            (Shape::Circle, STUDENT_COLOR)
        } else {
            (Shape::Square, LANE_COLOR)
        };
        draw::vertex(&canvas, pixels[node.index()], shape, 30, fill)?;
    }
    for node in bip.graph.node_indices() {
        draw::label(&canvas, pixels[node.index()], &bip.graph[node].name, 12)?;
    }

    canvas.present()?;
    Ok(())
}

fn draw_similarity(path: &Path, g: &WeightedGraph) -> DrawResult {
    let size = (800, 800);
    let canvas = BitMapBackend::new(path, size).into_drawing_area();
    canvas.fill(&WHITE)?;

    let pixels = layout::fit(&layout::stress(&g.adjacency()), size, MARGIN);

    for e in g.graph.edge_references() {
        let (a, b) = (pixels[e.source().index()], pixels[e.target().index()]);
        draw::edge(&canvas, a, b, stroke(3.0 * e.weight()), EDGE_COLOR, 0.1)?;
    }
    for node in g.graph.node_indices() {
        draw::vertex(&canvas, pixels[node.index()], Shape::Circle, 35, STUDENT_COLOR)?;
    }
    for node in g.graph.node_indices() {
        draw::label(&canvas, pixels[node.index()], &g.graph[node], 12)?;
    }

    canvas.present()?;
    Ok(())
}

fn draw_cooccurrence(path: &Path, g: &WeightedGraph) -> DrawResult {
    let size = (600, 600);
    let canvas = BitMapBackend::new(path, size).into_drawing_area();
    canvas.fill(&WHITE)?;

    let pixels = layout::fit(&layout::circle(g.node_count()), size, MARGIN);

    for e in g.graph.edge_references() {
        let (a, b) = (pixels[e.source().index()], pixels[e.target().index()]);
        draw::edge(&canvas, a, b, stroke(*e.weight()), EDGE_COLOR, 0.0)?;
    }
    for e in g.graph.edge_references() {
        let (a, b) = (pixels[e.source().index()], pixels[e.target().index()]);
        draw::edge_label(&canvas, a, b, &format!("{:.0}", e.weight()), 10)?;
    }
    for node in g.graph.node_indices() {
        draw::vertex(&canvas, pixels[node.index()], Shape::Circle, 45, LANE_COLOR)?;
    }
    for node in g.graph.node_indices() {
        draw::label(&canvas, pixels[node.index()], &g.graph[node], 14)?;
    }

    canvas.present()?;
    Ok(())
}

/// Pixel stroke for a weight-derived width, never thinner than one pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stroke(width: f64) -> u32 {
    width.round().max(1.0) as u32
}
