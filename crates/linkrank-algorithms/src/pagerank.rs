//! Iterative PageRank solver
//!
//! Repeatedly applies
//!
//! ```text
//! new[p] = (1 - d) / N + d * Σ_{q ∈ parents(p)} old[q] / outlinks(q)
//! ```
//!
//! until no page moves by more than `epsilon`. Dangling pages count as
//! linking to every page, themselves included, with `outlinks(q) = N`.

use crate::error::{check_damping, check_epsilon, check_positive, RankError, RankResult};
use crate::graph::{LinkGraph, PageId};
use crate::rank::RankVector;
use rayon::prelude::*;
use tracing::{info, trace, warn};

/// Tolerance on the total of a warm-start vector
const INITIAL_SUM_TOLERANCE: f64 = 1e-6;

/// PageRank configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Largest per-page change accepted as converged
    pub epsilon: f64,
    /// Iteration cap; exceeding it fails with `ConvergenceTimeout`
    pub max_iterations: usize,
    /// Compute each iteration's per-page updates on the rayon pool
    pub parallel: bool,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            epsilon: 0.001,
            max_iterations: 1_000,
            parallel: false,
        }
    }
}

impl PageRankConfig {
    pub fn validate<P>(&self) -> RankResult<(), P> {
        check_damping::<P>(self.damping_factor)?;
        check_epsilon::<P>(self.epsilon)?;
        check_positive("max_iterations", self.max_iterations)
    }
}

/// Reverse-link index, built once per run.
///
/// The parents of a page are the pages linking to it plus every dangling
/// page. Dangling parents are shared by all pages, so they are stored once
/// and their contribution is summed once per iteration.
#[derive(Debug, Clone)]
pub struct ParentIndex {
    linked: Vec<Vec<usize>>,
    dangling: Vec<usize>,
    /// Outgoing link count of each page, `N` for dangling pages
    outlinks: Vec<f64>,
}

impl ParentIndex {
    pub fn build<P: PageId>(graph: &LinkGraph<P>) -> Self {
        let n = graph.page_count();
        let dangling: Vec<usize> = (0..n).filter(|&q| graph.is_dangling_index(q)).collect();
        let linked = (0..n).map(|p| graph.predecessors(p).to_vec()).collect();
        let outlinks = (0..n)
            .map(|q| {
                if graph.is_dangling_index(q) {
                    n as f64
                } else {
                    graph.out_degree(q) as f64
                }
            })
            .collect();

        Self {
            linked,
            dangling,
            outlinks,
        }
    }

    /// All parents of page index `p`: linking pages first, then dangling pages
    pub fn parents(&self, p: usize) -> impl Iterator<Item = usize> + '_ {
        self.linked[p].iter().chain(&self.dangling).copied()
    }

    pub fn outlinks(&self, q: usize) -> f64 {
        self.outlinks[q]
    }
}

/// Fixed-point PageRank solver
#[derive(Debug, Clone, Default)]
pub struct IterativeSolver {
    config: PageRankConfig,
}

impl IterativeSolver {
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PageRankConfig {
        &self.config
    }

    /// Solve starting from the uniform vector `1/N`
    pub fn solve<P: PageId>(&self, graph: &LinkGraph<P>) -> RankResult<RankVector<P>, P> {
        self.check_inputs(graph)?;
        let n = graph.page_count();
        self.run(graph, vec![1.0 / n as f64; n])
    }

    /// Solve starting from `initial`, e.g. a previously converged vector.
    ///
    /// Pages absent from `initial` start at 0. The vector must only name pages
    /// of the graph, be non-negative and sum to one.
    pub fn solve_from<P: PageId>(
        &self,
        graph: &LinkGraph<P>,
        initial: &RankVector<P>,
    ) -> RankResult<RankVector<P>, P> {
        self.check_inputs(graph)?;

        let mut scores = vec![0.0; graph.page_count()];
        for (page, rank) in initial.iter() {
            if rank.is_nan() || rank < 0.0 {
                return Err(RankError::invalid("initial", rank, "ranks must be non-negative"));
            }
            scores[graph.index_of(page)?] = rank;
        }

        let total: f64 = scores.iter().sum();
        if (total - 1.0).abs() > INITIAL_SUM_TOLERANCE {
            return Err(RankError::invalid("initial", total, "ranks must sum to 1"));
        }

        self.run(graph, scores)
    }

    fn check_inputs<P>(&self, graph: &LinkGraph<P>) -> RankResult<(), P>
    where
        P: PageId,
    {
        self.config.validate::<P>()?;
        if graph.is_empty() {
            return Err(RankError::EmptyGraph);
        }
        Ok(())
    }

    fn run<P: PageId>(
        &self,
        graph: &LinkGraph<P>,
        mut scores: Vec<f64>,
    ) -> RankResult<RankVector<P>, P> {
        let index = ParentIndex::build(graph);
        let mut delta = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let next_scores = self.step(&index, &scores);

            delta = scores
                .iter()
                .zip(&next_scores)
                .map(|(old, new)| (new - old).abs())
                .fold(0.0, f64::max);
            scores = next_scores;

            trace!(iteration, delta, "PageRank iteration");

            if delta <= self.config.epsilon {
                info!(
                    "PageRank converged after {} iterations over {} pages (max delta {:e})",
                    iteration,
                    graph.page_count(),
                    delta
                );
                return Ok(to_rank_vector(graph, scores));
            }
        }

        warn!(
            "PageRank stopped at the {} iteration cap with max delta {:e}",
            self.config.max_iterations, delta
        );
        Err(RankError::ConvergenceTimeout {
            iterations: self.config.max_iterations,
            delta,
            best: to_rank_vector(graph, scores),
        })
    }

    /// One application of the update rule, reading only the `old` snapshot
    fn step(&self, index: &ParentIndex, old: &[f64]) -> Vec<f64> {
        let n = old.len();
        let d = self.config.damping_factor;
        let base = (1.0 - d) / n as f64;

        let dangling_share: f64 = index
            .dangling
            .iter()
            .map(|&q| old[q] / index.outlinks[q])
            .sum();

        let update = |p: usize| {
            let linked: f64 = index.linked[p]
                .iter()
                .map(|&q| old[q] / index.outlinks[q])
                .sum();
            base + d * (linked + dangling_share)
        };

        if self.config.parallel {
            (0..n).into_par_iter().map(update).collect()
        } else {
            (0..n).map(update).collect()
        }
    }
}

/// Compute PageRank by iterating to a fixed point.
///
/// Uses the default iteration cap; see [`IterativeSolver`] for warm starts
/// and parallel updates.
pub fn iterate_ranks<P: PageId>(
    graph: &LinkGraph<P>,
    damping_factor: f64,
    epsilon: f64,
) -> RankResult<RankVector<P>, P> {
    IterativeSolver::new(PageRankConfig {
        damping_factor,
        epsilon,
        ..PageRankConfig::default()
    })
    .solve(graph)
}

fn to_rank_vector<P: PageId>(graph: &LinkGraph<P>, scores: Vec<f64>) -> RankVector<P> {
    graph.pages().iter().cloned().zip(scores).collect()
}
