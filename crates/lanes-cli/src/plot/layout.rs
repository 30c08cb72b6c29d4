//! Deterministic vertex layouts.
//!
//! Every layout returns abstract coordinates, one per vertex in node-index
//! order. [`fit`] maps them onto an image with a margin.

use lanes_graph::BipartiteGraph;
use std::collections::VecDeque;
use std::f64::consts::TAU;

pub type Point = (f64, f64);

/// Iteration cap for [`stress`].
const STRESS_MAX_ITER: usize = 500;

/// Stop [`stress`] once no vertex moves further than this.
const STRESS_TOLERANCE: f64 = 1e-4;

/// Two rows: lanes on top (`y = 0`), students below (`y = 1`).
///
/// Lanes keep their canonical order. Students are ordered by the mean
/// position of the lanes they chose (barycenter heuristic), which keeps edge
/// crossings low; students without a lane go last. Both rows span `[0, 1]`.
#[allow(clippy::cast_precision_loss)]
pub fn bipartite(bip: &BipartiteGraph) -> Vec<Point> {
    let mut points = vec![(0.0, 0.0); bip.node_count()];

    for (i, &node) in bip.lanes.iter().enumerate() {
        points[node.index()] = (spread(i, bip.lanes.len()), 0.0);
    }

    let barycenters: Vec<f64> = bip
        .students
        .iter()
        .map(|&s| {
            let xs: Vec<f64> = bip.graph.neighbors(s).map(|l| points[l.index()].0).collect();
            if xs.is_empty() {
                f64::INFINITY
            } else {
                xs.iter().sum::<f64>() / xs.len() as f64
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..bip.students.len()).collect();
    order.sort_by(|&a, &b| barycenters[a].total_cmp(&barycenters[b]).then(a.cmp(&b)));

    for (rank, &i) in order.iter().enumerate() {
        points[bip.students[i].index()] = (spread(rank, bip.students.len()), 1.0);
    }

    points
}

/// Vertex `i` of `n` at angle `2πi / n` on the unit circle.
#[allow(clippy::cast_precision_loss)]
pub fn circle(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// Kamada–Kawai style layout by stress majorization.
///
/// Target distances are hop counts; pairs in different components are held
/// one hop further apart than the graph diameter. Each pair is weighted by
/// `d⁻²` and vertices are relaxed one at a time from a circular start.
#[allow(clippy::cast_precision_loss)]
pub fn stress(adjacency: &[Vec<(usize, f64)>]) -> Vec<Point> {
    let n = adjacency.len();
    if n < 2 {
        return vec![(0.0, 0.0); n];
    }

    let dist: Vec<Vec<Option<usize>>> = (0..n).map(|s| hop_distances(adjacency, s)).collect();
    let diameter = dist.iter().flatten().flatten().copied().max().unwrap_or(0);
    let far = diameter + 1;

    let target: Vec<Vec<f64>> = dist
        .iter()
        .map(|row| row.iter().map(|d| d.unwrap_or(far) as f64).collect())
        .collect();

    let radius = far as f64 / 2.0;
    let mut points: Vec<Point> = circle(n)
        .into_iter()
        .map(|(x, y)| (x * radius, y * radius))
        .collect();

    for _ in 0..STRESS_MAX_ITER {
        let mut moved: f64 = 0.0;

        for i in 0..n {
            let (xi, yi) = points[i];
            let (mut sx, mut sy, mut sw) = (0.0, 0.0, 0.0);

            for j in (0..n).filter(|&j| j != i) {
                let d = target[i][j];
                let w = d.powi(-2);
                let (xj, yj) = points[j];
                let (dx, dy) = (xi - xj, yi - yj);
                let len = dx.hypot(dy);

                sx += w * xj;
                sy += w * yj;
                if len > 0.0 {
                    sx += w * d * dx / len;
                    sy += w * d * dy / len;
                }
                sw += w;
            }

            let next = (sx / sw, sy / sw);
            moved = moved.max((next.0 - xi).hypot(next.1 - yi));
            points[i] = next;
        }

        if moved < STRESS_TOLERANCE {
            break;
        }
    }

    points
}

/// Map abstract coordinates into a `width × height` image, keeping `margin`
/// pixels free on every side. A degenerate axis is centred.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn fit(points: &[Point], (width, height): (u32, u32), margin: u32) -> Vec<(i32, i32)> {
    let axis = |values: Vec<f64>, extent: u32| -> Vec<i32> {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = f64::from(extent.saturating_sub(2 * margin));
        values
            .iter()
            .map(|&v| {
                let t = if hi - lo > f64::EPSILON {
                    (v - lo) / (hi - lo)
                } else {
                    0.5
                };
                (f64::from(margin) + t * span).round() as i32
            })
            .collect()
    };

    let xs = axis(points.iter().map(|p| p.0).collect(), width);
    let ys = axis(points.iter().map(|p| p.1).collect(), height);
    xs.into_iter().zip(ys).collect()
}

#[allow(clippy::cast_precision_loss)]
fn spread(i: usize, count: usize) -> f64 {
    if count < 2 {
        0.5
    } else {
        i as f64 / (count - 1) as f64
    }
}

fn hop_distances(adjacency: &[Vec<(usize, f64)>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adjacency.len()];
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);

    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for &(u, _) in &adjacency[v] {
            if dist[u].is_none() {
                dist[u] = Some(next);
                queue.push_back(u);
            }
        }
    }

    dist
}
