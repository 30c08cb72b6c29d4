//! Closeness centrality over `1 / weight` distances.
//!
//! For a vertex that reaches `R` other vertices at a total distance `D`,
//! closeness is `R / D`: the inverse of the mean distance to what it can
//! reach. Unreachable vertices are left out rather than counted as
//! infinitely far, so small components are not penalized. A vertex that
//! reaches nothing has no defined closeness and scores `NaN`.

use tracing::instrument;

use crate::graph::WeightedGraph;
use crate::metrics::paths::shortest_paths;

#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(g: &WeightedGraph) -> Vec<f64> {
    let adjacency = g.adjacency();

    (0..adjacency.len())
        .map(|s| {
            let sp = shortest_paths(&adjacency, s);
            let reached = sp.order.len() - 1;
            if reached == 0 {
                return f64::NAN;
            }
            let total: f64 = sp.order[1..].iter().filter_map(|&v| sp.dist[v]).sum();
            reached as f64 / total
        })
        .collect()
}
