//! Implicants: product terms over the six input variables
//!
//! An [`Implicant`] is a cube in the 6-dimensional boolean space. For each
//! bit position `i`, a set `mask` bit means variable `'A' + i` has been
//! eliminated (don't care); otherwise the variable is fixed to bit `i` of
//! `value`.

use crate::expression::MAX_VARS;
use std::hash::{Hash, Hasher};

/// Mask with every variable eliminated
pub const FULL_MASK: u8 = (1 << MAX_VARS) - 1;

/// A product term (cube) covering one or more truth table rows
///
/// Equality and hashing only consider `(value, mask)`; the `merged` flag is
/// bookkeeping for a single Quine-McCluskey pass.
#[derive(Debug, Clone, Copy)]
pub struct Implicant {
    pub(crate) value: u8,
    pub(crate) mask: u8,
    pub(crate) merged: bool,
}

impl Implicant {
    /// An implicant covering exactly one row
    pub fn from_term(term: u8) -> Self {
        Implicant::new(term, 0)
    }

    /// An implicant with the given fixed values and eliminated variables
    ///
    /// Value bits under the mask are cleared so that equal cubes compare equal.
    pub fn new(value: u8, mask: u8) -> Self {
        let mask = mask & FULL_MASK;
        Implicant {
            value: value & FULL_MASK & !mask,
            mask,
            merged: false,
        }
    }

    /// Fixed variable values (bits under the mask are zero)
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Eliminated variables
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Whether this implicant was combined during the last pass
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Whether every variable is eliminated, i.e. the cube is the whole space
    pub fn is_blanket(&self) -> bool {
        self.mask == FULL_MASK
    }

    /// Combine two implicants that differ in exactly one fixed variable
    ///
    /// Returns `None` unless both eliminate the same variables and their
    /// values are at Hamming distance one.
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.mask != other.mask {
            return None;
        }
        let diff = self.value ^ other.value;
        if !diff.is_power_of_two() {
            return None;
        }
        Some(Implicant::new(self.value & !diff, self.mask | diff))
    }

    /// Whether the cube contains the given row
    pub fn covers(&self, row: u8) -> bool {
        (row & FULL_MASK & !self.mask) == self.value
    }

    /// Fixed variables as `(name, polarity)` pairs, in alphabetical order
    pub fn literals(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        (0..MAX_VARS as u8)
            .filter(move |bit| (self.mask >> bit) & 1 == 0)
            .map(move |bit| ((b'A' + bit) as char, (self.value >> bit) & 1 == 1))
    }
}

impl PartialEq for Implicant {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.mask == other.mask
    }
}

impl Eq for Implicant {}

impl Hash for Implicant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.mask.hash(state);
    }
}
