use bitvec::prelude::*;
use std::fmt::{self, Debug, Formatter};

#[derive(Clone, Default)]
pub struct BitSet {
    cardinality: usize,
    bit_vec: BitVec,
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = (0..self.bit_vec.len())
            .filter(|i| self.bit_vec[*i])
            .map(|i| i.to_string())
            .collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bits: [{}] }}",
            self.cardinality,
            values.join(", "),
        )
    }
}

impl BitSet {
    #[inline]
    pub fn new(size: usize) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size],
        }
    }

    #[inline]
    pub fn empty(&self) -> bool {
        self.cardinality == 0
    }

    /// Sets the bit and reports whether it was already set.
    #[inline]
    pub fn set_bit(&mut self, idx: usize) -> bool {
        if !*self.bit_vec.get(idx).unwrap() {
            self.bit_vec.set(idx, true);
            self.cardinality += 1;
            false
        } else {
            true
        }
    }

    #[inline]
    pub fn at(&self, idx: usize) -> bool {
        self.bit_vec[idx]
    }

    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bit_vec.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::datastructures::BitSet;

    #[test]
    fn set_and_count() {
        let mut bs = BitSet::new(64);
        assert!(bs.empty());

        assert!(!bs.set_bit(3));
        assert!(!bs.set_bit(63));
        assert!(bs.set_bit(3));

        assert_eq!(bs.cardinality(), 2);
        assert_eq!(bs.len(), 64);
        assert!(bs.at(3));
        assert!(bs.at(63));
        assert!(!bs.at(0));
    }
}
