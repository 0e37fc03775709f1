//! Damped random-surfer transition model
//!
//! From a page with links the surfer follows one of them with probability
//! `d` and jumps to a uniformly random page with probability `1 - d`. From a
//! dangling page it jumps anywhere with probability `1/N`.

use crate::error::{check_damping, RankError, RankResult};
use crate::graph::{LinkGraph, PageId};
use crate::rank::Distribution;

/// Transition probabilities of one graph under one damping factor.
///
/// Works on dense page indices and never allocates per query, so the sampler
/// can evaluate it once per step.
#[derive(Debug, Clone)]
pub struct TransitionModel<'g, P> {
    graph: &'g LinkGraph<P>,
    damping_factor: f64,
    /// Random-jump share of every page, `(1 - d) / N`
    jump: f64,
    /// Share of every page when leaving a dangling page, `1 / N`
    uniform: f64,
}

impl<'g, P: PageId> TransitionModel<'g, P> {
    pub fn new(graph: &'g LinkGraph<P>, damping_factor: f64) -> RankResult<Self, P> {
        check_damping::<P>(damping_factor)?;
        if graph.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let n = graph.page_count() as f64;
        Ok(Self {
            graph,
            damping_factor,
            jump: (1.0 - damping_factor) / n,
            uniform: 1.0 / n,
        })
    }

    pub fn graph(&self) -> &'g LinkGraph<P> {
        self.graph
    }

    pub fn damping_factor(&self) -> f64 {
        self.damping_factor
    }

    /// Probability of moving from page index `from` to page index `to`
    pub fn probability(&self, from: usize, to: usize) -> f64 {
        if self.graph.is_dangling_index(from) {
            return self.uniform;
        }
        let successors = self.graph.successors(from);
        if successors.binary_search(&to).is_ok() {
            self.jump + self.damping_factor / successors.len() as f64
        } else {
            self.jump
        }
    }

    /// Select the next page index for a uniform draw `x` in `[0, 1)`.
    ///
    /// Walks the cumulative distribution in the fixed page ordering and
    /// returns the first page whose interval contains `x`. If rounding leaves
    /// `x` beyond the final cumulative value, the last page is selected.
    pub fn select(&self, from: usize, x: f64) -> usize {
        let n = self.graph.page_count();
        let successors = self.graph.successors(from);

        let (base, follow) = if self.graph.is_dangling_index(from) {
            (self.uniform, 0.0)
        } else {
            (self.jump, self.damping_factor / successors.len() as f64)
        };

        let mut links = successors.iter().peekable();
        let mut cumulative = 0.0;
        for to in 0..n {
            let mut p = base;
            if links.next_if_eq(&&to).is_some() {
                p += follow;
            }
            cumulative += p;
            if x < cumulative {
                return to;
            }
        }

        n - 1
    }

    /// Full distribution out of page index `from`
    pub fn distribution_at(&self, from: usize) -> Distribution<P> {
        let probabilities = self
            .graph
            .pages()
            .iter()
            .enumerate()
            .map(|(to, page)| (page.clone(), self.probability(from, to)))
            .collect();
        Distribution::new(probabilities)
    }
}

/// One-step distribution of a random surfer currently on `page`.
///
/// Fails with `InvalidParameter` unless `0 < damping_factor < 1`, with
/// `EmptyGraph` on a graph without pages, and with `UnknownPage` when `page`
/// is not in the graph.
pub fn distribution<P: PageId>(
    graph: &LinkGraph<P>,
    page: &P,
    damping_factor: f64,
) -> RankResult<Distribution<P>, P> {
    let model = TransitionModel::new(graph, damping_factor)?;
    let from = graph.index_of(page)?;
    Ok(model.distribution_at(from))
}
