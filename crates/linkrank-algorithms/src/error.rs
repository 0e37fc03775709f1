//! Errors raised by the ranking algorithms
//!
//! Every failure here is caller-visible: the algorithms are pure computations
//! and never retry.

use crate::rank::RankVector;
use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while building a graph or ranking its pages
#[derive(Error, Debug, Clone)]
pub enum RankError<P> {
    #[error("Page {0:?} is not part of the graph")]
    UnknownPage(P),

    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("PageRank did not converge within {iterations} iterations (last max delta {delta:e})")]
    ConvergenceTimeout {
        iterations: usize,
        delta: f64,
        /// Rank vector produced by the final iteration
        best: RankVector<P>,
    },

    #[error("Graph has no pages")]
    EmptyGraph,
}

pub type RankResult<T, P> = Result<T, RankError<P>>;

impl<P> RankError<P> {
    pub(crate) fn invalid(name: &'static str, value: impl Display, reason: &'static str) -> Self {
        RankError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub(crate) fn check_damping<P>(damping_factor: f64) -> RankResult<(), P> {
    if damping_factor > 0.0 && damping_factor < 1.0 {
        Ok(())
    } else {
        Err(RankError::invalid(
            "damping_factor",
            damping_factor,
            "must lie strictly between 0 and 1",
        ))
    }
}

pub(crate) fn check_epsilon<P>(epsilon: f64) -> RankResult<(), P> {
    if epsilon.is_finite() && epsilon > 0.0 {
        Ok(())
    } else {
        Err(RankError::invalid("epsilon", epsilon, "must be a positive finite number"))
    }
}

pub(crate) fn check_positive<P>(name: &'static str, value: usize) -> RankResult<(), P> {
    if value > 0 {
        Ok(())
    } else {
        Err(RankError::invalid(name, value, "must be at least 1"))
    }
}
