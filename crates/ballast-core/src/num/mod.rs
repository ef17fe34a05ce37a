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

//! # Overflow-Safe Numeric Helpers
//!
//! Summing weight slices is the one place in the selection pipeline where
//! arithmetic can silently wrap: the total of millions of `u64` weights does
//! not necessarily fit in a `u64`. Accumulation therefore happens in a
//! 128-bit accumulator, making overflow impossible by construction instead
//! of a runtime error class.

use num_traits::{PrimInt, Unsigned};

/// Sums a slice of unsigned weights into a `u128` accumulator.
///
/// The accumulator width guarantees the sum cannot overflow: even
/// `usize::MAX` weights of `u64::MAX` stay below `2^128`.
///
/// # Examples
///
/// ```rust
/// use ballast_core::num::widening_sum;
///
/// let weights: [u64; 3] = [u64::MAX, u64::MAX, 2];
/// assert_eq!(widening_sum(&weights), 2 * (u64::MAX as u128) + 2);
/// ```
#[inline]
pub fn widening_sum<T>(weights: &[T]) -> u128
where
    T: PrimInt + Unsigned + Into<u64>,
{
    weights.iter().map(|&w| u128::from(w.into())).sum()
}
