// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cyclically indexed option sequences.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::easing::TimingFunction;
use crate::error::CameraError;

/// Returns `items[index % items.len()]`, or `None` when `items` is empty.
#[must_use]
pub fn cyclic_get<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get(index % items.len())
}

/// A sequence of option values reused in wraparound fashion.
///
/// A single value behaves like a one-element sequence, so the same value is
/// used for every step. Longer sequences repeat once exhausted: `[a, b]` over
/// five steps yields `a, b, a, b, a`.
#[derive(Clone, Debug)]
pub struct Cycle<T> {
    items: SmallVec<[T; 4]>,
}

impl<T> Cycle<T> {
    /// Builds a cycle from the given values.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// A cycle that always yields `value`.
    pub fn once(value: T) -> Self {
        let mut items = SmallVec::new();
        items.push(value);
        Self { items }
    }

    /// Number of distinct entries before the cycle repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cycle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The underlying entries.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the entry used for step `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        cyclic_get(&self.items, index)
    }
}

impl<T: Copy> Cycle<T> {
    /// Returns the entry for step `index`, failing if the cycle is empty.
    ///
    /// `option` names the option in the returned error.
    pub fn resolve(&self, index: usize, option: &'static str) -> Result<T, CameraError> {
        self.get(index)
            .copied()
            .ok_or(CameraError::EmptySequence { option })
    }
}

impl<T> From<Vec<T>> for Cycle<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T, const N: usize> From<[T; N]> for Cycle<T> {
    fn from(items: [T; N]) -> Self {
        Self::new(items)
    }
}

impl<T: Clone> From<&[T]> for Cycle<T> {
    fn from(items: &[T]) -> Self {
        Self::new(items.iter().cloned())
    }
}

macro_rules! impl_from_single {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Cycle<$ty> {
                fn from(value: $ty) -> Self {
                    Self::once(value)
                }
            }
        )*
    };
}

impl_from_single!(f64, bool, TimingFunction);
