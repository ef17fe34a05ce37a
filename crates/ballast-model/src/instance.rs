// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Problem Instance
//!
//! A validated subset-selection instance: a list of strictly positive item
//! weights, a target capacity, and the permitted overshoot above it
//! (`allow_higher`). The admissible bound `capacity + allow_higher` is the
//! hard ceiling no returned subset may exceed.
//!
//! Validation happens once, at build time, so solvers can assume a
//! well-formed instance and report malformed input before any work is
//! performed:
//!
//! - every weight is non-zero (weights are unsigned, so "positive" reduces
//!   to "non-zero"),
//! - `capacity + allow_higher` does not overflow the engine's `u64` sum
//!   domain,
//! - the item count leaves room for the provenance sentinels.
//!
//! ## Usage
//!
//! ```rust
//! use ballast_model::instance::InstanceBuilder;
//!
//! let instance = InstanceBuilder::new(10u64)
//!     .with_allow_higher(2)
//!     .with_weights(&[3, 5, 7])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(instance.num_items(), 3);
//! assert_eq!(instance.admissible_bound(), 12);
//! ```

use crate::index::ItemIndex;
use ballast_core::num::widening_sum;
use num_traits::{PrimInt, Unsigned};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Maximum number of items an instance may hold.
///
/// Reachability provenance stores item positions as `u32` with two sentinel
/// values reserved, so the item count must stay below `u32::MAX - 1`.
pub const MAX_ITEMS: usize = (u32::MAX - 1) as usize;

/// A trait alias for numeric types usable as item weights.
///
/// Weights must be unsigned primitive integers losslessly convertible to
/// `u64`, which is the width the engine accumulates scaled sums in. This
/// admits `u8`, `u16`, `u32`, and `u64`.
///
/// # Note
///
/// `u128` and `usize` are intentionally excluded: `u128` exceeds the
/// engine's sum domain, and `usize` has no portable lossless `u64`
/// conversion.
pub trait WeightNumeric:
    PrimInt + Unsigned + Into<u64> + Debug + Display + Hash + Send + Sync
{
}

impl<T> WeightNumeric for T where
    T: PrimInt + Unsigned + Into<u64> + Debug + Display + Hash + Send + Sync
{
}

/// The error type for instance validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    /// An item weight is zero. Zero-weight items would reach every sum for
    /// free and make provenance chains ambiguous.
    ZeroWeight {
        /// The index of the offending item.
        index: ItemIndex,
    },
    /// `capacity + allow_higher` does not fit in the engine's `u64` sum
    /// domain.
    AdmissibleBoundOverflow {
        /// The requested capacity.
        capacity: u64,
        /// The requested overshoot allowance.
        allow_higher: u64,
    },
    /// The item count exceeds [`MAX_ITEMS`].
    TooManyItems {
        /// The number of items provided.
        count: usize,
    },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroWeight { index } => {
                write!(f, "Item {} has zero weight; weights must be positive", index.get())
            }
            Self::AdmissibleBoundOverflow {
                capacity,
                allow_higher,
            } => write!(
                f,
                "Admissible bound overflows u64: capacity = {}, allow_higher = {}",
                capacity, allow_higher
            ),
            Self::TooManyItems { count } => {
                write!(f, "Instance has {} items, more than the supported {}", count, MAX_ITEMS)
            }
        }
    }
}

impl std::error::Error for InstanceError {}

/// A validated subset-selection instance.
///
/// Owns its weight list for the lifetime of any solve call; solvers never
/// mutate it, so one instance may be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<T> {
    weights: Vec<T>,
    capacity: T,
    allow_higher: T,
    /// `capacity + allow_higher`, checked at build time.
    admissible_bound: u64,
    /// Total weight of all items, widened so it cannot overflow.
    total_weight: u128,
}

impl<T> Instance<T>
where
    T: WeightNumeric,
{
    /// Returns the number of items.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    /// Returns all item weights in input order.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Returns the weight of a specific item.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is out of bounds.
    #[inline]
    pub fn weight(&self, item_index: ItemIndex) -> T {
        let index = item_index.get();
        debug_assert!(
            index < self.weights.len(),
            "called `Instance::weight` with item index out of bounds: the len is {} but the index is {}",
            self.weights.len(),
            index
        );

        self.weights[index]
    }

    /// Returns the target capacity.
    #[inline]
    pub fn capacity(&self) -> T {
        self.capacity
    }

    /// Returns the permitted overshoot above the capacity.
    #[inline]
    pub fn allow_higher(&self) -> T {
        self.allow_higher
    }

    /// Returns the admissible bound `capacity + allow_higher` in the
    /// engine's `u64` sum domain.
    #[inline]
    pub fn admissible_bound(&self) -> u64 {
        self.admissible_bound
    }

    /// Returns the total weight of all items.
    #[inline]
    pub fn total_weight(&self) -> u128 {
        self.total_weight
    }
}

/// Builder for [`Instance`].
///
/// Collects weights and parameters, then validates everything in one
/// `build` call.
#[derive(Debug, Clone)]
pub struct InstanceBuilder<T> {
    weights: Vec<T>,
    capacity: T,
    allow_higher: T,
}

impl<T> InstanceBuilder<T>
where
    T: WeightNumeric,
{
    /// Creates a new builder for the given capacity with no overshoot
    /// allowance and no items.
    #[inline]
    pub fn new(capacity: T) -> Self {
        Self {
            weights: Vec::new(),
            capacity,
            allow_higher: T::zero(),
        }
    }

    /// Sets the permitted overshoot above the capacity.
    #[inline]
    pub fn with_allow_higher(mut self, allow_higher: T) -> Self {
        self.allow_higher = allow_higher;
        self
    }

    /// Appends a single item weight.
    #[inline]
    pub fn add_weight(mut self, weight: T) -> Self {
        self.weights.push(weight);
        self
    }

    /// Appends all weights from the given slice, preserving order.
    #[inline]
    pub fn with_weights(mut self, weights: &[T]) -> Self {
        self.weights.extend_from_slice(weights);
        self
    }

    /// Validates the collected data and builds the instance.
    ///
    /// # Errors
    ///
    /// Returns an [`InstanceError`] if any weight is zero, the admissible
    /// bound overflows `u64`, or the item count exceeds [`MAX_ITEMS`].
    pub fn build(self) -> Result<Instance<T>, InstanceError> {
        if self.weights.len() > MAX_ITEMS {
            return Err(InstanceError::TooManyItems {
                count: self.weights.len(),
            });
        }

        if let Some(position) = self.weights.iter().position(|w| w.is_zero()) {
            return Err(InstanceError::ZeroWeight {
                index: ItemIndex::new(position),
            });
        }

        let capacity_u64: u64 = self.capacity.into();
        let allow_higher_u64: u64 = self.allow_higher.into();
        let admissible_bound = capacity_u64.checked_add(allow_higher_u64).ok_or(
            InstanceError::AdmissibleBoundOverflow {
                capacity: capacity_u64,
                allow_higher: allow_higher_u64,
            },
        )?;

        let total_weight = widening_sum(&self.weights);

        Ok(Instance {
            weights: self.weights,
            capacity: self.capacity,
            allow_higher: self.allow_higher,
            admissible_bound,
            total_weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_valid_instance() {
        let instance = InstanceBuilder::new(10u64)
            .with_allow_higher(3)
            .with_weights(&[1, 2, 3])
            .build()
            .unwrap();

        assert_eq!(instance.num_items(), 3);
        assert_eq!(instance.capacity(), 10);
        assert_eq!(instance.allow_higher(), 3);
        assert_eq!(instance.admissible_bound(), 13);
        assert_eq!(instance.total_weight(), 6);
        assert_eq!(instance.weight(ItemIndex::new(1)), 2);
    }

    #[test]
    fn test_build_empty_instance_is_valid() {
        let instance = InstanceBuilder::new(5u32).build().unwrap();
        assert_eq!(instance.num_items(), 0);
        assert_eq!(instance.total_weight(), 0);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let err = InstanceBuilder::new(10u64)
            .with_weights(&[1, 0, 3])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            InstanceError::ZeroWeight {
                index: ItemIndex::new(1)
            }
        );
    }

    #[test]
    fn test_admissible_bound_overflow_rejected() {
        let err = InstanceBuilder::new(u64::MAX)
            .with_allow_higher(1)
            .with_weights(&[1])
            .build()
            .unwrap_err();

        assert!(matches!(err, InstanceError::AdmissibleBoundOverflow { .. }));
    }

    #[test]
    fn test_add_weight_preserves_order() {
        let instance = InstanceBuilder::new(100u64)
            .add_weight(7)
            .add_weight(5)
            .with_weights(&[9])
            .build()
            .unwrap();

        assert_eq!(instance.weights(), &[7, 5, 9]);
    }

    #[test]
    fn test_error_display_names_offending_item() {
        let err = InstanceError::ZeroWeight {
            index: ItemIndex::new(4),
        };
        assert!(err.to_string().contains("Item 4"));
    }
}
