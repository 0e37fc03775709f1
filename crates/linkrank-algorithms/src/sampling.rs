//! Random-surfer sampling estimator
//!
//! Simulates a Markov chain over the pages using the [`TransitionModel`] and
//! estimates each page's rank as the fraction of steps spent on it.

use crate::error::{check_damping, check_positive, RankResult};
use crate::graph::{LinkGraph, PageId};
use crate::rank::RankVector;
use crate::transition::TransitionModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

/// Sampling configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Total number of pages visited, across all chains
    pub samples: usize,
    /// Seed for reproducible runs; drawn from entropy when unset
    pub seed: Option<u64>,
    /// Number of independent chains; their visit counts are summed
    pub chains: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            samples: 10_000,
            seed: None,
            chains: 1,
        }
    }
}

impl SamplingConfig {
    pub fn validate<P>(&self) -> RankResult<(), P> {
        check_damping::<P>(self.damping_factor)?;
        check_positive::<P>("sample_count", self.samples)?;
        check_positive("chains", self.chains)
    }
}

/// Estimate ranks by walking a single chain of `sample_count` pages.
///
/// The first page is uniform over all pages, every later one is drawn from
/// the transition distribution of the current page. Every page of the graph
/// is present in the result; pages never visited get an explicit `0.0`.
pub fn sample_ranks<P, R>(
    graph: &LinkGraph<P>,
    damping_factor: f64,
    sample_count: usize,
    rng: &mut R,
) -> RankResult<RankVector<P>, P>
where
    P: PageId,
    R: Rng + ?Sized,
{
    check_positive::<P>("sample_count", sample_count)?;
    let model = TransitionModel::new(graph, damping_factor)?;

    let visits = run_chain(&model, sample_count, rng);
    debug!("Sampled {} pages from a single chain", sample_count);

    Ok(ranks_from_visits(graph, &visits, sample_count))
}

/// Estimate ranks with the settings of a [`SamplingConfig`].
///
/// `samples` is split as evenly as possible over `chains` chains which run on
/// the rayon pool. Chain `i` is seeded with `seed + i`, so one chain with a
/// seed reproduces [`sample_ranks`] driven by `StdRng::seed_from_u64(seed)`.
pub fn sample_ranks_with_config<P>(
    graph: &LinkGraph<P>,
    config: &SamplingConfig,
) -> RankResult<RankVector<P>, P>
where
    P: PageId + Sync,
{
    config.validate::<P>()?;
    let model = TransitionModel::new(graph, config.damping_factor)?;

    let n = graph.page_count();
    // Every chain walks at least one page
    let chains = config.chains.min(config.samples);
    let per_chain = config.samples / chains;
    let remainder = config.samples % chains;

    let visits = (0..chains)
        .into_par_iter()
        .map(|chain| (chain, per_chain + usize::from(chain < remainder)))
        .map(|(chain, length)| {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(chain as u64)),
                None => StdRng::from_entropy(),
            };
            run_chain(&model, length, &mut rng)
        })
        .reduce(
            || vec![0u64; n],
            |mut merged, chain_visits| {
                for (total, count) in merged.iter_mut().zip(chain_visits) {
                    *total += count;
                }
                merged
            },
        );

    debug!("Sampled {} pages from {} chains", config.samples, chains);

    Ok(ranks_from_visits(graph, &visits, config.samples))
}

/// Walk one chain of `length` pages and count visits per page index
fn run_chain<P, R>(model: &TransitionModel<'_, P>, length: usize, rng: &mut R) -> Vec<u64>
where
    P: PageId,
    R: Rng + ?Sized,
{
    let n = model.graph().page_count();
    let mut visits = vec![0u64; n];

    let mut current = rng.gen_range(0..n);
    visits[current] += 1;

    for _ in 1..length {
        let x: f64 = rng.gen();
        current = model.select(current, x);
        visits[current] += 1;
    }

    visits
}

fn ranks_from_visits<P: PageId>(
    graph: &LinkGraph<P>,
    visits: &[u64],
    sample_count: usize,
) -> RankVector<P> {
    let total = sample_count as f64;
    graph
        .pages()
        .iter()
        .zip(visits)
        .map(|(page, &count)| (page.clone(), count as f64 / total))
        .collect()
}
