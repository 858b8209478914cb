//! Weighted reservoir sampling for streams
//!
//! Maintains a fixed-size sample from a stream of unknown length where each
//! item's inclusion probability grows with its weight. Items are never
//! buffered beyond the reservoir capacity.
//!
//! # Algorithm
//!
//! A-ExpJ key selection (Efraimidis & Spirakis, 2006):
//! 1. For each item with weight `w`, draw `u` uniformly from (0, 1)
//! 2. Compute the key `u^(1/w)`
//! 3. Keep the `k` items with the largest keys
//!
//! The retained keys live in a min-heap so the smallest key is always the
//! next eviction candidate. An incoming key that does not beat it is dropped
//! without touching the heap, which is the common case on long streams.
//!
//! # Query modes
//!
//! The same storage is reused for order-statistic queries: the first
//! [`quantile`](WeightedReservoirSampler::quantile) after an insertion sorts
//! the samples by value, and the next insertion rebuilds the heap in place.
//! Repeated queries between insertions reuse the sorted order.

use crate::math;
use crate::traits::{MergeError, SamplerError, SamplingSketch, Sketch};
use log::{debug, trace};
use rand::distributions::Open01;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::heap;
use super::order::{NaturalOrder, ValueOrder};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Helper macro for format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

/// Seed used by [`WeightedReservoirSampler::new`]
pub const DEFAULT_SEED: u64 = 0x12345678;

// Upper bound on the up-front allocation; larger reservoirs grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// One retained stream item
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<T> {
    value: T,
    weight: f64,
    key: f64,
}

impl<T> Sample<T> {
    /// The sampled value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Weight supplied at insertion
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Consume the sample and return its value
    pub fn into_value(self) -> T {
        self.value
    }

    #[inline]
    fn key_before(a: &Self, b: &Self) -> bool {
        a.key.total_cmp(&b.key).is_lt()
    }
}

/// Current arrangement of the reservoir storage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// No ordering established yet (fresh or cleared)
    Unordered,
    /// Min-heap by key, smallest key first
    Heap,
    /// Stable-sorted by value
    Sorted,
}

/// Weighted reservoir sampler using A-ExpJ keys
///
/// Keeps at most `capacity` samples. An item of weight `w` is retained with
/// probability proportional to `w` relative to the rest of the stream; with
/// unit weights this is plain uniform reservoir sampling.
///
/// Quantile queries take `&mut self` because they lazily reorder the
/// reservoir. Share a sampler across threads behind a `Mutex`.
///
/// Cloning copies the generator state, so a clone draws the same keys as
/// its source from that point on.
///
/// # Example
///
/// ```
/// use weighted_reservoir::sampling::WeightedReservoirSampler;
///
/// let mut sampler = WeightedReservoirSampler::new(100);
///
/// for i in 0..10_000u32 {
///     // Even values are three times as likely to be kept
///     let weight = if i % 2 == 0 { 3.0 } else { 1.0 };
///     sampler.weighted_insert(i, weight).unwrap();
/// }
///
/// assert_eq!(sampler.len(), 100);
/// let median = *sampler.quantile(0.5).unwrap();
/// assert!(median < 10_000);
/// ```
#[derive(Clone, Debug)]
pub struct WeightedReservoirSampler<T, O = NaturalOrder, R = SmallRng> {
    /// Maximum sample size
    capacity: usize,
    /// Retained samples, arranged according to `mode`
    samples: Vec<Sample<T>>,
    /// Current arrangement of `samples`
    mode: Mode,
    /// Value ordering for quantile queries
    order: O,
    /// Uniform source for key generation
    rng: R,
    /// Number of accepted insertions, retained or not
    count: u64,
}

impl<T> WeightedReservoirSampler<T> {
    /// Create a sampler with the given capacity and the default seed
    ///
    /// Values are ordered by `Ord` for quantile queries. Every sampler built
    /// this way draws the same key sequence; use [`with_seed`](Self::with_seed)
    /// with distinct seeds for samplers that will be merged.
    pub fn new(capacity: usize) -> Self {
        Self::with_seed(capacity, DEFAULT_SEED)
    }

    /// Create a sampler with the given capacity and seed
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of items to sample
    /// * `seed` - Seed for random number generator (for reproducibility)
    pub fn with_seed(capacity: usize, seed: u64) -> Self {
        Self::with_rng(capacity, NaturalOrder, SmallRng::seed_from_u64(seed))
    }
}

impl<T, O> WeightedReservoirSampler<T, O> {
    /// Create a sampler that orders values with `order`
    ///
    /// ```
    /// use weighted_reservoir::sampling::{TotalOrder, WeightedReservoirSampler};
    ///
    /// let mut sampler = WeightedReservoirSampler::with_order(10, TotalOrder);
    /// sampler.insert(2.5f64);
    /// assert_eq!(*sampler.quantile(0.5).unwrap(), 2.5);
    /// ```
    pub fn with_order(capacity: usize, order: O) -> Self {
        Self::with_order_and_seed(capacity, order, DEFAULT_SEED)
    }

    /// Create a sampler with a custom ordering and seed
    pub fn with_order_and_seed(capacity: usize, order: O, seed: u64) -> Self {
        Self::with_rng(capacity, order, SmallRng::seed_from_u64(seed))
    }
}

impl<T, O, R> WeightedReservoirSampler<T, O, R> {
    /// Create a sampler drawing keys from a caller-supplied generator
    pub fn with_rng(capacity: usize, order: O, rng: R) -> Self {
        Self {
            capacity,
            samples: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            mode: Mode::Unordered,
            order,
            rng,
            count: 0,
        }
    }

    /// Get the current sample in storage order
    ///
    /// The order depends on [`mode`](Self::mode): key-heap order after
    /// insertions, value order after a quantile query.
    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    /// Iterate over the retained values in storage order
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.samples.iter().map(Sample::value)
    }

    /// Consume the sampler and return the retained samples
    pub fn into_samples(self) -> Vec<Sample<T>> {
        self.samples
    }

    /// Current arrangement of the storage
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the reservoir capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current sample size
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if reservoir is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if reservoir is full
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Get the number of items offered to the sampler
    pub fn items_seen(&self) -> u64 {
        self.count
    }

    /// Sum of the weights of the retained samples
    pub fn total_weight(&self) -> f64 {
        self.samples.iter().map(|s| s.weight).sum()
    }

    /// Smallest retained key, the bar a new item has to clear once full
    pub fn min_key(&self) -> Option<f64> {
        match self.mode {
            Mode::Heap => self.samples.first().map(|s| s.key),
            _ => self
                .samples
                .iter()
                .map(|s| s.key)
                .min_by(|a, b| a.total_cmp(b)),
        }
    }

    fn ensure_heap(&mut self) {
        if self.mode != Mode::Heap {
            trace!("rebuilding key heap over {} samples", self.samples.len());
            heap::heapify(&mut self.samples, &Sample::key_before);
            self.mode = Mode::Heap;
        }
    }

    /// Offer a keyed sample to the heap, evicting the smallest key on overflow.
    fn offer(&mut self, sample: Sample<T>) {
        debug_assert_eq!(self.mode, Mode::Heap);

        if self.samples.len() < self.capacity {
            heap::push(&mut self.samples, sample, &Sample::key_before);
        } else if let Some(min) = self.samples.first() {
            if sample.key <= min.key {
                return;
            }
            heap::replace_top(&mut self.samples, sample, &Sample::key_before);
        }

        debug_assert!(heap::is_heap(&self.samples, &Sample::key_before));
    }
}

impl<T, O, R: Rng> WeightedReservoirSampler<T, O, R> {
    /// Add a value with unit weight
    pub fn insert(&mut self, value: T) {
        self.offer_weighted(value, 1.0);
    }

    /// Add a value with the given weight
    ///
    /// The weight is the relative probability of the value being sampled.
    ///
    /// # Errors
    ///
    /// Returns an error if `weight` is not finite or not positive. The value
    /// is discarded and not counted as seen.
    pub fn weighted_insert(&mut self, value: T, weight: f64) -> Result<(), SamplerError> {
        if !weight.is_finite() {
            return Err(SamplerError::NonFiniteWeight(weight));
        }
        if weight <= 0.0 {
            return Err(SamplerError::NonPositiveWeight(weight));
        }
        self.offer_weighted(value, weight);
        Ok(())
    }

    fn offer_weighted(&mut self, value: T, weight: f64) {
        self.count += 1;

        if self.capacity == 0 {
            return;
        }

        self.ensure_heap();

        let u: f64 = self.rng.sample(Open01);
        let key = math::powf(u, 1.0 / weight);
        self.offer(Sample { value, weight, key });
    }
}

impl<T, O: ValueOrder<T>, R> WeightedReservoirSampler<T, O, R> {
    /// Get the value at the given fraction of the value-sorted sample
    ///
    /// Uses the position rule: index `floor(fraction * len)`, clamped to the
    /// sample. Every retained item counts once regardless of its weight, since
    /// retention already reflects the weights. Fractions outside `[0, 1]`
    /// saturate at the extremes.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::EmptyReservoir`] if nothing is retained and
    /// [`SamplerError::InvalidFraction`] if `fraction` is NaN.
    pub fn quantile(&mut self, fraction: f64) -> Result<&T, SamplerError> {
        let index = self.quantile_index(fraction)?;
        Ok(&self.samples[index].value)
    }

    /// Get several quantiles with a single sort
    pub fn quantiles(&mut self, fractions: &[f64]) -> Result<Vec<&T>, SamplerError> {
        let indices = fractions
            .iter()
            .map(|&fraction| self.quantile_index(fraction))
            .collect::<Result<Vec<_>, _>>()?;
        let samples = &self.samples;
        Ok(indices.into_iter().map(|i| &samples[i].value).collect())
    }

    /// Get the median (50th percentile)
    pub fn median(&mut self) -> Result<&T, SamplerError> {
        self.quantile(0.5)
    }

    /// Get the smallest retained value
    pub fn min(&mut self) -> Result<&T, SamplerError> {
        self.quantile(0.0)
    }

    /// Get the largest retained value
    pub fn max(&mut self) -> Result<&T, SamplerError> {
        self.quantile(1.0)
    }

    fn quantile_index(&mut self, fraction: f64) -> Result<usize, SamplerError> {
        if fraction.is_nan() {
            return Err(SamplerError::InvalidFraction(fraction));
        }
        if self.samples.is_empty() {
            return Err(SamplerError::EmptyReservoir);
        }

        self.ensure_sorted();

        let len = self.samples.len();
        let position = math::floor(fraction.clamp(0.0, 1.0) * len as f64) as usize;
        Ok(position.min(len - 1))
    }

    fn ensure_sorted(&mut self) {
        if self.mode != Mode::Sorted {
            trace!("sorting {} samples by value", self.samples.len());
            let order = &self.order;
            self.samples.sort_by(|a, b| order.compare(&a.value, &b.value));
            self.mode = Mode::Sorted;
        }
    }
}

impl<T, O, R> Sketch for WeightedReservoirSampler<T, O, R>
where
    T: Clone + core::fmt::Debug,
    O: Clone + core::fmt::Debug,
    R: Rng + Clone + core::fmt::Debug,
{
    type Item = T;

    fn update(&mut self, item: &Self::Item) {
        self.insert(item.clone());
    }

    /// Merge another sampler's reservoir into this one
    ///
    /// Keeping the `capacity` largest keys of both reservoirs yields a sample
    /// of the combined stream only when the two generators are independent.
    /// Samplers built with `new`, or cloned from one template, share a key
    /// sequence: the merge then pairs items by stream position instead of
    /// sampling. Seed each partition's sampler differently.
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.capacity != other.capacity {
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("capacity={}", self.capacity),
                found: fmt!("capacity={}", other.capacity),
            });
        }

        debug!(
            "merging {} samples into reservoir holding {}",
            other.samples.len(),
            self.samples.len()
        );

        self.count += other.count;
        if other.samples.is_empty() {
            return Ok(());
        }

        self.ensure_heap();
        for sample in &other.samples {
            self.offer(sample.clone());
        }
        Ok(())
    }

    fn clear(&mut self) {
        debug!("clearing reservoir of {} samples", self.samples.len());
        self.samples.clear();
        self.mode = Mode::Unordered;
        self.count = 0;
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.samples.capacity() * core::mem::size_of::<Sample<T>>()
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<T, O, R> SamplingSketch for WeightedReservoirSampler<T, O, R>
where
    T: Clone + core::fmt::Debug,
    O: Clone + core::fmt::Debug,
    R: Rng + Clone + core::fmt::Debug,
{
    type Sample = Sample<T>;

    fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Sample<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.weight)?;
        tuple.end()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, O, R> serde::Serialize for WeightedReservoirSampler<T, O, R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("WeightedReservoirSampler", 4)?;
        state.serialize_field("capacity", &self.capacity)?;
        state.serialize_field("samples", &self.samples)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("total_weight", &self.total_weight())?;
        state.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
