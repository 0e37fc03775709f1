//! Ranking runner and comparison report
//!
//! Runs the sampling estimator, the iterative solver, or both over one graph
//! and lines their results up per page.

use crate::config::RankerConfig;
use linkrank_algorithms::{
    sample_ranks_with_config, IterativeSolver, LinkGraph, PageId, RankResult, RankVector,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Which algorithms to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Both,
    Sample,
    Iterate,
}

impl Method {
    pub fn samples(self) -> bool {
        matches!(self, Method::Both | Method::Sample)
    }

    pub fn iterates(self) -> bool {
        matches!(self, Method::Both | Method::Iterate)
    }
}

/// Ranks of one page under each algorithm that ran
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow<P> {
    pub page: P,
    pub sampled: Option<f64>,
    pub iterated: Option<f64>,
}

/// Results of a ranking run
#[derive(Debug, Clone, Serialize)]
pub struct RankReport<P> {
    /// Pages visited by the sampling estimator, if it ran
    pub samples: Option<usize>,
    pub sampled: Option<RankVector<P>>,
    pub iterated: Option<RankVector<P>>,
}

impl<P: PageId> RankReport<P> {
    /// One row per page, ordered by page identifier
    pub fn rows(&self) -> Vec<ReportRow<P>> {
        let Some(reference) = self.sampled.as_ref().or(self.iterated.as_ref()) else {
            return Vec::new();
        };

        reference
            .sorted_by_page()
            .into_iter()
            .map(|(page, _)| ReportRow {
                sampled: self.sampled.as_ref().and_then(|r| r.get(&page)),
                iterated: self.iterated.as_ref().and_then(|r| r.get(&page)),
                page,
            })
            .collect()
    }

    /// Largest per-page disagreement between the two methods, when both ran
    pub fn max_divergence(&self) -> Option<f64> {
        match (&self.sampled, &self.iterated) {
            (Some(sampled), Some(iterated)) => Some(sampled.max_abs_diff(iterated)),
            _ => None,
        }
    }
}

/// Runs the configured algorithms over a graph
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    pub fn run<P>(&self, graph: &LinkGraph<P>, method: Method) -> RankResult<RankReport<P>, P>
    where
        P: PageId + Sync,
    {
        if method.samples() {
            self.config.sampling().validate::<P>()?;
        }
        if method.iterates() {
            self.config.pagerank().validate::<P>()?;
        }

        let sampled = if method.samples() {
            let started = Instant::now();
            let ranks = sample_ranks_with_config(graph, &self.config.sampling())?;
            info!(
                "Sampled {} pages over {} chains in {:?}",
                self.config.samples,
                self.config.chains,
                started.elapsed()
            );
            Some(ranks)
        } else {
            None
        };

        let iterated = if method.iterates() {
            let started = Instant::now();
            let ranks = IterativeSolver::new(self.config.pagerank()).solve(graph)?;
            info!("Iterated to a fixed point in {:?}", started.elapsed());
            Some(ranks)
        } else {
            None
        };

        Ok(RankReport {
            samples: sampled.as_ref().map(|_| self.config.samples),
            sampled,
            iterated,
        })
    }
}
