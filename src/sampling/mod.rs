//! Stream sampling algorithms
//!
//! This module provides weighted reservoir sampling: a bounded random sample
//! of a stream where heavier items are more likely to be kept, plus
//! order-statistic queries over what was kept.
//!
//! # Example
//!
//! ```
//! use weighted_reservoir::sampling::WeightedReservoirSampler;
//!
//! let mut sampler = WeightedReservoirSampler::<u64>::new(10);
//!
//! // Stream a million latencies, keep a sample of 10
//! for i in 0..1_000_000u64 {
//!     sampler.insert(i % 500);
//! }
//!
//! let sample = sampler.samples();
//! assert_eq!(sample.len(), 10);
//!
//! let p90 = *sampler.quantile(0.9).unwrap();
//! assert!(p90 < 500);
//! ```

mod heap;
mod order;
mod reservoir;

pub use order::{NaturalOrder, TotalOrder, ValueOrder};
pub use reservoir::{Mode, Sample, WeightedReservoirSampler, DEFAULT_SEED};
