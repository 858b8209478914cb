//! # Weighted Reservoir
//!
//! Weighted random sampling over unbounded streams, for Rust.
//!
//! A [`WeightedReservoirSampler`] keeps a fixed-size sample of a stream of
//! `(value, weight)` pairs without ever buffering the stream. Each item's
//! chance of being kept is proportional to its weight (Efraimidis & Spirakis
//! A-ExpJ keys over a bounded min-heap), and the retained sample answers
//! quantile queries under a caller-chosen value ordering.
//!
//! ## Quick Start
//!
//! ```rust
//! use weighted_reservoir::prelude::*;
//!
//! let mut sampler = WeightedReservoirSampler::new(1000);
//! for i in 0..10_000 {
//!     sampler.insert(i % 10);
//! }
//!
//! assert_eq!(sampler.len(), 1000);
//! assert_eq!(*sampler.quantile(0.05).unwrap(), 0);
//! assert_eq!(*sampler.quantile(0.95).unwrap(), 9);
//! ```
//!
//! ## Distributed Computing
//!
//! The sampler implements the [`Sketch`](traits::Sketch) trait, so samples
//! taken on separate partitions of a stream can be merged. Give each worker
//! its own seed: samplers sharing a seed draw identical keys, and merging them
//! pairs items by stream position instead of sampling.
//!
//! ```rust
//! use weighted_reservoir::sampling::WeightedReservoirSampler;
//! use weighted_reservoir::traits::Sketch;
//!
//! let mut worker1 = WeightedReservoirSampler::with_seed(100, 1);
//! let mut worker2 = WeightedReservoirSampler::with_seed(100, 2);
//!
//! worker1.weighted_insert("user_a", 2.0).unwrap();
//! worker2.weighted_insert("user_b", 0.5).unwrap();
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.len(), 2);
//! ```
//!
//! ## Thread Safety
//!
//! Samplers hold no locks. Quantile queries reorder the reservoir and take
//! `&mut self`; wrap a shared sampler in `Mutex` when several threads feed or
//! query it.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod math;

// Core traits always available
pub mod traits;

pub mod sampling;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::sampling::{NaturalOrder, TotalOrder, ValueOrder, WeightedReservoirSampler};
}

pub use sampling::WeightedReservoirSampler;
pub use traits::{MergeError, SamplerError};
