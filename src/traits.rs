//! Core traits for streaming samplers
//!
//! Samplers implement the base [`Sketch`] trait, with [`SamplingSketch`] for
//! access to the retained sample.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during sketch merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Sketches have incompatible configurations
    IncompatibleConfig {
        expected: String,
        found: String,
    },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleConfig { expected, found } => {
                write!(f, "incompatible config: expected {}, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {}

/// Error from a sampler insertion or query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplerError {
    /// Weight is NaN or infinite
    NonFiniteWeight(f64),
    /// Weight is zero or negative
    NonPositiveWeight(f64),
    /// Quantile fraction is NaN
    InvalidFraction(f64),
    /// Quantile requested from a reservoir holding no samples
    EmptyReservoir,
}

impl core::fmt::Display for SamplerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SamplerError::NonFiniteWeight(w) => write!(f, "weight must be finite, got {}", w),
            SamplerError::NonPositiveWeight(w) => write!(f, "weight must be > 0, got {}", w),
            SamplerError::InvalidFraction(q) => {
                write!(f, "quantile fraction must be a number, got {}", q)
            }
            SamplerError::EmptyReservoir => write!(f, "quantile of an empty reservoir"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SamplerError {}

/// Core trait for all streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Sampling sketches
pub trait SamplingSketch: Sketch {
    /// Retained entry type
    type Sample;

    /// Get current sample
    fn samples(&self) -> &[Self::Sample];

    /// Sample size limit
    fn capacity(&self) -> usize;

    /// Current sample size
    fn sample_size(&self) -> usize {
        self.samples().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_error_display() {
        assert_eq!(
            SamplerError::NonPositiveWeight(0.0).to_string(),
            "weight must be > 0, got 0"
        );
        assert_eq!(
            SamplerError::NonFiniteWeight(f64::INFINITY).to_string(),
            "weight must be finite, got inf"
        );
        assert_eq!(
            SamplerError::EmptyReservoir.to_string(),
            "quantile of an empty reservoir"
        );
    }

    #[test]
    fn test_merge_error_display() {
        let err = MergeError::IncompatibleConfig {
            expected: "capacity=10".to_string(),
            found: "capacity=20".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "incompatible config: expected capacity=10, found capacity=20"
        );
    }
}
