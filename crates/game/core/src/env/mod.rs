//! Environment services consumed by the battle rules.
//!
//! The rules themselves are pure; the only external input they need beyond
//! the roster is a deterministic source of randomness for group-target
//! sampling, exposed through [`RngOracle`].
mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};
