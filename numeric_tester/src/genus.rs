//! Genus-bucketed exact summation (Kobbelt).
//!
//! The genus of a value is `2 * biased_exponent + lowest mantissa bit`. Two
//! values of the same genus always add without rounding: they share the
//! exponent and their mantissas have the same parity, so the sum fits after
//! one exponent step. Two values of complementary genus (`genus ^ 1`) and
//! opposite sign also add exactly, since their difference cannot need more
//! bits than the operands. The table keeps at most one value per genus and
//! merges on collision until every resident is alone in its slot.

use std::collections::BTreeMap;

use crate::eft::two_prod;
use crate::float::WorkingFloat;

#[inline]
pub fn genus<F: WorkingFloat>(value: F) -> i32 {
    (value.biased_exponent() as i32) * 2 + (value.mantissa_bits() & 1) as i32
}

#[inline]
fn sign<F: WorkingFloat>(value: F) -> i8 {
    (F::zero() < value) as i8 - (value < F::zero()) as i8
}

#[derive(Debug)]
pub struct GenusTable<F: WorkingFloat> {
    slots: BTreeMap<i32, F>,
    pending: Vec<F>,
    merges: usize,
}

impl<F: WorkingFloat> Default for GenusTable<F> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
            pending: Vec::new(),
            merges: 0,
        }
    }
}

impl<F: WorkingFloat> GenusTable<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value`, merging it with residents for as long as an exact
    /// merge is possible.
    ///
    /// Each merge removes one resident and replaces the value being inserted
    /// by the merged sum, so the loop ends after at most `len()` merges.
    pub fn insert(&mut self, value: F) {
        debug_assert!(value.is_finite());
        debug_assert!(self.pending.is_empty());

        self.pending.push(value);
        while let Some(value) = self.pending.pop() {
            let genus = genus(value);

            if let Some(resident) = self.slots.remove(&genus) {
                self.merges += 1;
                self.pending.push(value + resident);
                continue;
            }

            let complement = genus ^ 1;
            match self.slots.get(&complement).copied() {
                Some(resident) if sign(resident) != sign(value) => {
                    self.slots.remove(&complement);
                    self.merges += 1;
                    self.pending.push(value + resident);
                }
                _ => {
                    self.slots.insert(genus, value);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of pairwise merges performed since construction.
    pub fn merges(&self) -> usize {
        self.merges
    }

    pub fn get(&self, genus: i32) -> Option<F> {
        self.slots.get(&genus).copied()
    }

    /// Residents in ascending genus order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, F)> + '_ {
        self.slots.iter().map(|(&genus, &value)| (genus, value))
    }

    /// Sums the residents in ascending genus order. The order is fixed so
    /// that results are bit-reproducible.
    pub fn sum(&self) -> F {
        self.sum_into()
    }

    /// Same as [`GenusTable::sum`] with the accumulator in a wider type.
    pub fn sum_into<R>(&self) -> R
    where
        R: WorkingFloat + From<F>,
    {
        self.slots
            .values()
            .fold(R::zero(), |accumulator, &value| accumulator + <R as From<F>>::from(value))
    }
}

/// Dot product through the genus table: both halves of every exact product
/// are inserted in `F`, then the table is drained into `R`.
pub fn kobbelt_dot_product<F, R>(v1: &[F], v2: &[F]) -> R
where
    F: WorkingFloat,
    R: WorkingFloat + From<F>,
{
    debug_assert_eq!(v1.len(), v2.len());

    let mut table = GenusTable::new();
    for (&a, &b) in v1.iter().zip(v2) {
        let (product, residual) = two_prod(a, b);
        table.insert(product);
        table.insert(residual);
    }
    table.sum_into()
}
