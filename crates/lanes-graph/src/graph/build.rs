//! Graph construction from the survey tables.
//!
//! ## Vertex Order
//!
//! Vertices are inserted in table order (sorted students, then lanes in
//! [`Lane::ALL`] order), so `NodeIndex::index()` equals the row index of the
//! source table. Metrics and layouts rely on this.
//!
//! ## Edge Order
//!
//! Edges are inserted row-major over the upper triangle (`i < j`), which
//! makes every traversal, and therefore every float summation, happen in the
//! same order on every run.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use lanes_core::{CooccurrenceTable, IncidenceTable, Lane, SimilarityTable};
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// Vertices
// ---------------------------------------------------------------------------

/// Which side of the survey a vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Student,
    Lane,
}

/// A labelled vertex of the bipartite graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub name: String,
    pub kind: VertexKind,
}

impl Vertex {
    /// Bipartite type flag: `true` for students, `false` for lanes.
    #[must_use]
    pub fn is_student(&self) -> bool {
        self.kind == VertexKind::Student
    }
}

// ---------------------------------------------------------------------------
// BipartiteGraph
// ---------------------------------------------------------------------------

/// Student–lane membership graph: one edge per incidence 1-cell.
#[derive(Debug, Clone)]
pub struct BipartiteGraph {
    /// Students first, then lanes.
    pub graph: UnGraph<Vertex, ()>,
    /// Node of each student, in incidence row order.
    pub students: Vec<NodeIndex>,
    /// Node of each lane, in [`Lane::ALL`] order.
    pub lanes: Vec<NodeIndex>,
}

impl BipartiteGraph {
    #[must_use]
    #[instrument(skip(incidence), fields(students = incidence.len()))]
    pub fn from_incidence(incidence: &IncidenceTable) -> Self {
        let mut graph = UnGraph::<Vertex, ()>::with_capacity(
            incidence.len() + Lane::COUNT,
            incidence.ones(),
        );

        let students: Vec<NodeIndex> = incidence
            .students()
            .iter()
            .map(|name| {
                graph.add_node(Vertex {
                    name: name.clone(),
                    kind: VertexKind::Student,
                })
            })
            .collect();

        let lanes: Vec<NodeIndex> = Lane::ALL
            .iter()
            .map(|lane| {
                graph.add_node(Vertex {
                    name: lane.header().to_string(),
                    kind: VertexKind::Lane,
                })
            })
            .collect();

        for (i, &student) in students.iter().enumerate() {
            for lane in Lane::ALL {
                if incidence.get(i, lane) {
                    graph.add_edge(student, lanes[lane.index()], ());
                }
            }
        }

        debug!(edges = graph.edge_count(), "built bipartite graph");

        Self {
            graph,
            students,
            lanes,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

// ---------------------------------------------------------------------------
// WeightedGraph
// ---------------------------------------------------------------------------

/// Undirected graph with named vertices and positive edge weights.
///
/// Used for both the student similarity graph and the lane co-occurrence
/// graph.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    /// Nodes = names, edges = weights.
    pub graph: UnGraph<String, f64>,
    /// Mapping from vertex name to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl WeightedGraph {
    /// Build from explicit vertices and `(a, b, weight)` edges given by
    /// vertex position. Pairs with `weight <= 0` are skipped.
    ///
    /// # Panics
    ///
    /// Panics if an edge refers to a position outside `names`.
    #[must_use]
    pub fn from_edges<S: AsRef<str>>(names: &[S], edges: &[(usize, usize, f64)]) -> Self {
        let mut graph = UnGraph::<String, f64>::with_capacity(names.len(), edges.len());
        let mut node_map = HashMap::with_capacity(names.len());

        let nodes: Vec<NodeIndex> = names
            .iter()
            .map(|name| {
                let name = name.as_ref().to_string();
                let idx = graph.add_node(name.clone());
                node_map.insert(name, idx);
                idx
            })
            .collect();

        for &(a, b, weight) in edges {
            if weight > 0.0 {
                graph.add_edge(nodes[a], nodes[b], weight);
            }
        }

        Self { graph, node_map }
    }

    /// Student similarity graph: an edge for every pair with similarity > 0.
    #[must_use]
    #[instrument(skip(sim), fields(students = sim.len()))]
    pub fn from_similarity(sim: &SimilarityTable) -> Self {
        let n = sim.len();
        let edges: Vec<(usize, usize, f64)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| (i, j, sim.get(i, j)))
            .filter(|&(_, _, w)| w > 0.0)
            .collect();

        let g = Self::from_edges(sim.students(), &edges);
        debug!(edges = g.edge_count(), "built similarity graph");
        g
    }

    /// Lane co-occurrence graph: an edge for every lane pair with a shared
    /// pick, weighted by the count.
    #[must_use]
    #[instrument(skip(co))]
    pub fn from_cooccurrence(co: &CooccurrenceTable) -> Self {
        let names: Vec<&str> = Lane::ALL.iter().map(|l| l.header()).collect();
        let counts = co.counts();
        let edges: Vec<(usize, usize, f64)> = (0..Lane::COUNT)
            .flat_map(|i| ((i + 1)..Lane::COUNT).map(move |j| (i, j)))
            .filter(|&(i, j)| counts[i][j] > 0)
            .map(|(i, j)| (i, j, f64::from(counts[i][j])))
            .collect();

        let g = Self::from_edges(&names, &edges);
        debug!(edges = g.edge_count(), "built co-occurrence graph");
        g
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Vertex names in node-index order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// Look up the `NodeIndex` for a vertex name.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    /// Weight of the edge between two named vertices, if any.
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (self.node_index(a)?, self.node_index(b)?);
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Weighted adjacency lists indexed by node position.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adj = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.raw_edges() {
            let (a, b) = (edge.source().index(), edge.target().index());
            adj[a].push((b, edge.weight));
            adj[b].push((a, edge.weight));
        }
        adj
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lanes_core::Dataset;

    fn tables(text: &str) -> (IncidenceTable, SimilarityTable, CooccurrenceTable) {
        let incidence = IncidenceTable::from_dataset(&Dataset::parse(text));
        let sim = SimilarityTable::from_incidence(&incidence);
        let co = CooccurrenceTable::from_incidence(&incidence);
        (incidence, sim, co)
    }

    const SURVEY: &str = "MID\nAna\nBruno\nTop\nAna\nCarla\nJg\nCarla\nSup\nDavi\nADC\nDavi\nEli\n";

    #[test]
    fn bipartite_edges_match_incidence_ones() {
        let (incidence, _, _) = tables(SURVEY);
        let bip = BipartiteGraph::from_incidence(&incidence);
        assert_eq!(bip.edge_count(), incidence.ones());
        assert_eq!(bip.node_count(), incidence.len() + Lane::COUNT);
    }

    #[test]
    fn bipartite_vertex_types() {
        let (incidence, _, _) = tables(SURVEY);
        let bip = BipartiteGraph::from_incidence(&incidence);
        for &s in &bip.students {
            assert!(bip.graph[s].is_student());
        }
        for (&l, lane) in bip.lanes.iter().zip(Lane::ALL) {
            assert!(!bip.graph[l].is_student());
            assert_eq!(bip.graph[l].name, lane.header());
        }
        // Students precede lanes.
        assert_eq!(bip.students[0].index(), 0);
        assert_eq!(bip.lanes[0].index(), incidence.len());
    }

    #[test]
    fn bipartite_edges_are_student_to_lane() {
        let (incidence, _, _) = tables(SURVEY);
        let bip = BipartiteGraph::from_incidence(&incidence);
        for edge in bip.graph.raw_edges() {
            let a = &bip.graph[edge.source()];
            let b = &bip.graph[edge.target()];
            assert_ne!(a.kind, b.kind);
        }
    }

    #[test]
    fn similarity_graph_keeps_positive_pairs() {
        let (_, sim, _) = tables(SURVEY);
        let g = WeightedGraph::from_similarity(&sim);
        assert_eq!(g.node_count(), 5);
        // Ana–Bruno (MID), Ana–Carla (Top), Davi–Eli (ADC).
        assert_eq!(g.edge_count(), 3);
        assert!((g.weight("Ana", "Bruno").expect("edge") - 0.5).abs() < 1e-12);
        assert!((g.weight("Carla", "Ana").expect("edge") - 1.0 / 3.0).abs() < 1e-12);
        assert!((g.weight("Davi", "Eli").expect("edge") - 0.5).abs() < 1e-12);
        assert!(g.weight("Bruno", "Eli").is_none());
    }

    #[test]
    fn cooccurrence_graph_skips_disjoint_lanes() {
        let (_, _, co) = tables(SURVEY);
        let g = WeightedGraph::from_cooccurrence(&co);
        assert_eq!(g.names(), ["MID", "Top", "Jg", "Sup", "ADC"]);
        assert_eq!(g.weight("MID", "Top"), Some(1.0));
        assert_eq!(g.weight("Sup", "ADC"), Some(1.0));
        assert!(g.weight("MID", "ADC").is_none());
        assert!(g.weight("Jg", "Sup").is_none());
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn no_self_loops() {
        let (_, sim, co) = tables(SURVEY);
        for g in [
            WeightedGraph::from_similarity(&sim),
            WeightedGraph::from_cooccurrence(&co),
        ] {
            for edge in g.graph.raw_edges() {
                assert_ne!(edge.source(), edge.target());
            }
        }
    }

    #[test]
    fn empty_survey_builds_empty_graphs() {
        let (incidence, sim, co) = tables("");
        assert_eq!(BipartiteGraph::from_incidence(&incidence).edge_count(), 0);
        assert_eq!(WeightedGraph::from_similarity(&sim).node_count(), 0);
        let lanes = WeightedGraph::from_cooccurrence(&co);
        assert_eq!(lanes.node_count(), Lane::COUNT);
        assert_eq!(lanes.edge_count(), 0);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = WeightedGraph::from_edges(&["a", "b", "c"], &[(0, 1, 2.0), (1, 2, 0.5)]);
        let adj = g.adjacency();
        assert_eq!(adj[0], [(1, 2.0)]);
        assert_eq!(adj[1], [(0, 2.0), (2, 0.5)]);
        assert_eq!(adj[2], [(1, 0.5)]);
    }
}
