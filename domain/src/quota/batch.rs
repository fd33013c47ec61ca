//! Batch size value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Number of questions requested from one generation call (Value Object)
///
/// Always at least 1: an empty batch is a caller bug, not a quota outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    /// Batch size used when nothing is configured
    pub const DEFAULT: usize = 6;

    /// Create a batch size
    ///
    /// # Panics
    /// Panics if `size` is zero
    pub fn new(size: usize) -> Self {
        match NonZeroUsize::new(size) {
            Some(n) => Self(n),
            None => panic!("Batch size must be at least 1"),
        }
    }

    /// Try to create a batch size, returning None for zero
    pub fn try_new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl TryFrom<usize> for BatchSize {
    type Error = crate::core::error::DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(crate::core::error::DomainError::InvalidBatchSize)
    }
}

impl From<BatchSize> for usize {
    fn from(value: BatchSize) -> Self {
        value.get()
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
