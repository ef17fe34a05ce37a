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

//! # Ballast Core
//!
//! Foundational utilities and numeric primitives for the Ballast
//! subset-selection ecosystem. This crate consolidates the reusable
//! building blocks shared by the model and solver crates.
//!
//! ## Modules
//!
//! - `num`: Overflow-safe numeric helpers, most notably widening summation
//!   of weight slices into a 128-bit accumulator.
//! - `utils`: Phantom-tagged, strongly typed indices (`TypedIndex<T>`) that
//!   keep indices of different arenas from being mixed up at compile time.
//!
//! ## Purpose
//!
//! Selection engines juggle several index spaces and sums that can exceed
//! the width of the weight type. These primitives make the corresponding
//! bug classes unrepresentable while compiling down to plain integers.

pub mod num;
pub mod utils;
