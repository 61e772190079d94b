//! Generic best-first label-setting shortest-path engine (Dijkstra, or A*
//! given an admissible heuristic), shared by the lifted-graph search and
//! the voxel-graph heuristic precomputation.
//!
//! Ties are broken FIFO: among frontier entries with equal priority, the
//! one pushed earlier settles first. This matters for reproducibility,
//! since two runs over the same inputs must pick the same path among
//! equal-cost alternatives, so every push carries a strictly increasing
//! sequence number that breaks ties in insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node's outgoing edges, visited via callback rather than collected
/// into a `Vec` so the lifted graph (millions of nodes, K^2 fan-out) never
/// materializes an adjacency list.
pub trait Successors {
    fn successors(&self, node: usize, cost_so_far: f64, visit: &mut dyn FnMut(usize, f64));
}

#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    pub store_visited: bool,
    pub store_parents: bool,
    pub compute_all_distances: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            store_visited: false,
            store_parents: false,
            compute_all_distances: false,
        }
    }
}

pub struct SearchResult {
    /// Cost of the cheapest source-to-sink path, or `f64::INFINITY` if no
    /// sink was reached.
    pub cost: f64,
    /// The settled sink, if any.
    pub sink: Option<usize>,
    /// Settling order, indexed by node id; `-1` for nodes never settled.
    /// Present only when `store_visited` was requested.
    pub visit_time: Option<Vec<i64>>,
    /// Predecessor in the shortest-path tree, indexed by node id. Present
    /// only when `store_parents` was requested.
    pub parents: Option<Vec<Option<usize>>>,
    /// Settled distance, indexed by node id; `f64::INFINITY` for
    /// unreached nodes. Present only when `compute_all_distances` was
    /// requested.
    pub distances: Option<Vec<f64>>,
    /// Number of nodes settled (popped off the frontier and finalized).
    pub settled_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    priority: f64,
    seq: u64,
    node: usize,
    cost: f64,
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; lower priority, then earlier seq, wins.
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Runs a best-first search from `sources` (each with its own starting
/// cost) toward `sinks`. `heuristic`, if given, must be admissible: it is
/// added to priority only, never to the settled cost.
pub fn shortest_path<S: Successors>(
    num_nodes: usize,
    sources: &[(usize, f64)],
    is_sink: &dyn Fn(usize) -> bool,
    successors: &S,
    heuristic: Option<&[f64]>,
    options: &SearchOptions,
) -> SearchResult {
    let mut dist = vec![f64::INFINITY; num_nodes];
    let mut settled = vec![false; num_nodes];
    let mut parents: Option<Vec<Option<usize>>> = options.store_parents.then(|| vec![None; num_nodes]);
    let mut visit_time: Option<Vec<i64>> = options.store_visited.then(|| vec![-1i64; num_nodes]);

    let mut heap: BinaryHeap<Entry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    let h = |n: usize| heuristic.map_or(0.0, |h| h[n]);

    for &(src, start_cost) in sources {
        heap.push(Entry {
            priority: start_cost + h(src),
            seq,
            node: src,
            cost: start_cost,
        });
        seq += 1;
    }

    let mut settle_order: i64 = 0;
    let mut best_sink: Option<usize> = None;
    let mut best_cost = f64::INFINITY;

    while let Some(Entry { node, cost, .. }) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        dist[node] = cost;
        if let Some(vt) = visit_time.as_mut() {
            vt[node] = settle_order;
        }
        settle_order += 1;

        if is_sink(node) && best_sink.is_none() {
            best_sink = Some(node);
            best_cost = cost;
            if !options.compute_all_distances {
                break;
            }
        }

        let mut visit = |neighbor: usize, edge_cost: f64| {
            if settled[neighbor] {
                return;
            }
            let candidate = cost + edge_cost;
            if candidate < dist[neighbor] {
                if let Some(p) = parents.as_mut() {
                    p[neighbor] = Some(node);
                }
                heap.push(Entry {
                    priority: candidate + h(neighbor),
                    seq,
                    node: neighbor,
                    cost: candidate,
                });
                seq += 1;
            }
        };
        successors.successors(node, cost, &mut visit);
    }

    SearchResult {
        cost: best_cost,
        sink: best_sink,
        visit_time,
        parents,
        distances: options.compute_all_distances.then_some(dist),
        settled_count: settle_order as usize,
    }
}
