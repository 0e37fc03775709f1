//! Linkrank
//!
//! Estimates the relative importance of pages in a corpus of HTML files
//! linking to each other, in two independent ways that should agree:
//!
//! - a random-surfer simulation that counts how often each page is visited;
//! - a fixed-point iteration of the PageRank recurrence.
//!
//! The algorithms live in `linkrank-algorithms` and work on any page
//! identifier; this crate adds corpus loading, configuration and a runner
//! that compares both results.
//!
//! ## Example Usage
//!
//! ```rust
//! use linkrank::{LinkGraph, Method, Ranker, RankerConfig};
//!
//! let graph = LinkGraph::from_adjacency(vec![
//!     ("1.html", vec!["2.html"]),
//!     ("2.html", vec!["1.html", "3.html"]),
//!     ("3.html", vec![]),
//! ])
//! .unwrap();
//!
//! let ranker = Ranker::new(RankerConfig { seed: Some(7), ..RankerConfig::default() });
//! let report = ranker.run(&graph, Method::Both).unwrap();
//!
//! assert!(report.max_divergence().unwrap() < 0.1);
//! for row in report.rows() {
//!     println!("{}: {:?} {:?}", row.page, row.sampled, row.iterated);
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod corpus;
pub mod report;

pub use config::{ConfigError, ConfigResult, RankerConfig};
pub use corpus::{crawl, CorpusError, CorpusResult, LinkExtractor};
pub use report::{Method, RankReport, Ranker, ReportRow};

// Re-export the algorithms for convenience
pub use linkrank_algorithms::{
    distribution, iterate_ranks, sample_ranks, sample_ranks_with_config, Distribution,
    IterativeSolver, LinkGraph, PageId, PageRankConfig, RankError, RankResult, RankVector,
    SamplingConfig, TransitionModel,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
