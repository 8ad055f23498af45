//! Price tables for the rod-cutting problem.
//!
//! - `PriceTable`: one positive price per cut length `1..=n`, strictly increasing.
//! - `generator`: adversarial tables (jumps + density valleys) with seed replay.
//!
//! Indexing convention used across the crate: slot `i` holds the price of a
//! piece of length `i + 1`.

use std::fmt;

pub mod generator;

pub use generator::{
    generate_with, GeneratorError, GeneratorParams, PriceTableGenerator, SeedReplay, TableSample,
    MAX_SIZE,
};

/// Validation failures for hand-built tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    Empty,
    /// Price for `length` is zero.
    NonPositive { length: usize },
    /// Price for `length` does not exceed the price for `length - 1`.
    NotIncreasing { length: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "price table is empty"),
            Self::NonPositive { length } => write!(f, "price for length {length} must be > 0"),
            Self::NotIncreasing { length } => write!(
                f,
                "price for length {length} must exceed the price for length {}",
                length - 1
            ),
        }
    }
}

impl std::error::Error for TableError {}

/// Immutable price table for lengths `1..=len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceTable {
    prices: Vec<u32>,
}

impl PriceTable {
    /// Build a table from raw prices, checking positivity and strict increase.
    pub fn new(prices: Vec<u32>) -> Result<Self, TableError> {
        if prices.is_empty() {
            return Err(TableError::Empty);
        }
        if prices[0] == 0 {
            return Err(TableError::NonPositive { length: 1 });
        }
        if let Some(i) = prices.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TableError::NotIncreasing { length: i + 2 });
        }
        Ok(Self { prices })
    }

    /// Generator-side constructor; the caller upholds the invariants.
    pub(crate) fn from_raw(prices: Vec<u32>) -> Self {
        debug_assert!(!prices.is_empty() && prices[0] > 0);
        debug_assert!(prices.windows(2).all(|w| w[1] > w[0]));
        Self { prices }
    }

    /// Longest rod this table prices.
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.prices
    }

    /// Price of a single piece of `length` (1-based), if priced.
    pub fn price(&self, length: usize) -> Option<u32> {
        length.checked_sub(1).and_then(|i| self.prices.get(i).copied())
    }

    /// Value per unit length of a single piece of `length`.
    pub fn density(&self, length: usize) -> Option<f64> {
        self.price(length).map(|p| f64::from(p) / length as f64)
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.prices
    }
}

impl AsRef<[u32]> for PriceTable {
    fn as_ref(&self) -> &[u32] {
        &self.prices
    }
}
