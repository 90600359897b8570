//! Strongly typed car identifier.
//!
//! `CarId` is `Copy + Ord + Hash` so it can be used as a map key and as the
//! final tie-break in car selection without ceremony.  The inner integer is
//! `pub` to allow direct indexing into per-car `Vec`s, but callers should
//! prefer [`CarId::index`] for clarity.

use std::fmt;

/// Index of a car in the fleet.  Ids are dense and 0-based.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarId(pub u32);

impl CarId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car {}", self.0)
    }
}

impl From<CarId> for usize {
    #[inline(always)]
    fn from(id: CarId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for CarId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<CarId, Self::Error> {
        u32::try_from(n).map(CarId)
    }
}
