use crate::common::MAX_CODE_BITS;

/// A bounded stack of bits, used to accumulate the code of a symbol while walking
/// down the tree.
///
/// Bits are stored least significant bit first within each byte, in the order they
/// were pushed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitSequence {
    bits: [u8; MAX_CODE_BITS / 8],
    len: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BitSequenceError {
    #[error("Bit sequence is full, it can hold at most {capacity} bits")]
    Full { capacity: usize },
    #[error("Can't pop a bit from an empty bit sequence")]
    Empty,
    #[error("Bit index {index} is out of range for a sequence of {len} bits")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl BitSequence {
    pub const CAPACITY: usize = MAX_CODE_BITS;

    pub fn new() -> Self {
        BitSequence {
            bits: [0; MAX_CODE_BITS / 8],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == Self::CAPACITY
    }

    pub fn push(&mut self, bit: bool) -> Result<(), BitSequenceError> {
        if self.is_full() {
            return Err(BitSequenceError::Full {
                capacity: Self::CAPACITY,
            });
        }
        self.len += 1;
        self.write(self.len - 1, bit);
        Ok(())
    }

    /// Removes the most recently pushed bit and returns it.
    pub fn pop(&mut self) -> Result<bool, BitSequenceError> {
        if self.is_empty() {
            return Err(BitSequenceError::Empty);
        }
        self.len -= 1;
        Ok(self.read(self.len))
    }

    pub fn get(&self, index: usize) -> Result<bool, BitSequenceError> {
        self.check_index(index)?;
        Ok(self.read(index))
    }

    /// Sets the bit at `index` to 1
    pub fn set(&mut self, index: usize) -> Result<(), BitSequenceError> {
        self.check_index(index)?;
        self.write(index, true);
        Ok(())
    }

    /// Sets the bit at `index` to 0
    pub fn clear(&mut self, index: usize) -> Result<(), BitSequenceError> {
        self.check_index(index)?;
        self.write(index, false);
        Ok(())
    }

    /// Iterate over the bits in code order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |idx| self.read(idx))
    }

    fn check_index(&self, index: usize) -> Result<(), BitSequenceError> {
        if index >= self.len {
            return Err(BitSequenceError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn read(&self, index: usize) -> bool {
        (self.bits[index / 8] >> (index % 8)) & 1 == 1
    }

    fn write(&mut self, index: usize, bit: bool) {
        if bit {
            self.bits[index / 8] |= 1 << (index % 8);
        } else {
            self.bits[index / 8] &= !(1 << (index % 8));
        }
    }
}

impl Default for BitSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for BitSequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BitSequence(")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        f.write_str(")")
    }
}
