//! Link-graph ranking algorithms
//!
//! Two independent estimates of PageRank over the same immutable
//! [`LinkGraph`]: a random-surfer simulation ([`sample_ranks`]) and a
//! fixed-point iteration ([`iterate_ranks`]). Both return a [`RankVector`]
//! summing to one, so a caller can run both and compare them.

pub mod error;
pub mod graph;
pub mod pagerank;
pub mod rank;
pub mod sampling;
pub mod transition;

pub use error::{RankError, RankResult};
pub use graph::{LinkGraph, PageId};
pub use pagerank::{iterate_ranks, IterativeSolver, PageRankConfig, ParentIndex};
pub use rank::{Distribution, RankVector, SUM_TOLERANCE};
pub use sampling::{sample_ranks, sample_ranks_with_config, SamplingConfig};
pub use transition::{distribution, TransitionModel};
