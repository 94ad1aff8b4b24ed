use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Debug, Display, Formatter, Write};
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Range, Sub, SubAssign,
};

use log::trace;

use crate::BitVectorError;

/// Number of bits packed into one storage word.
pub const BITS_PER_WORD: usize = u64::BITS as usize;

#[inline]
pub(crate) const fn word_index(bit_idx: usize) -> usize {
    bit_idx / BITS_PER_WORD
}

#[inline]
pub(crate) const fn bit_mask(bit_idx: usize) -> u64 {
    1 << (bit_idx % BITS_PER_WORD)
}

/// Ones from `start % 64` up to the most significant bit of the word.
pub(crate) const fn low_bound_mask(start: usize) -> u64 {
    !0u64 << (start % BITS_PER_WORD)
}

/// Ones below `end % 64`, or all ones if `end` is word aligned.
///
/// `end` is exclusive, so the aligned case belongs to the previous word,
/// which it covers completely.
pub(crate) const fn high_bound_mask(end: usize) -> u64 {
    !0u64 >> (end.wrapping_neg() % BITS_PER_WORD)
}

/// Ones from bit 0 up to and including `bit_idx % 64`.
const fn up_to_mask(bit_idx: usize) -> u64 {
    !0u64 >> (BITS_PER_WORD - 1 - bit_idx % BITS_PER_WORD)
}

pub(crate) fn assert_invariants(words: &[u64], words_in_use: usize) {
    assert!(
        words_in_use <= words.len(),
        "words in use ({words_in_use}) exceed allocated words ({})",
        words.len()
    );
    assert!(
        words_in_use == 0 || words[words_in_use - 1] != 0,
        "highest word in use must not be zero"
    );
    assert!(
        words_in_use == words.len() || words[words_in_use] == 0,
        "word above the words in use must be zero"
    );
}

fn check_range(range: &Range<usize>) -> Result<(), BitVectorError> {
    if range.start > range.end {
        return Err(BitVectorError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

/// A growable vector of bits packed into 64-bit words.
///
/// Every index starts out unset. Setting or flipping an index past the
/// current storage grows the vector; reads past it simply return `false`.
///
/// Internally stores bits in a `Vec<u64>`, least significant word first.
/// Only the lowest words up to the highest set bit are in use; any words
/// above them are spare capacity and always zero.
#[derive(Clone)]
pub struct BitVector {
    words: Vec<u64>,
    words_in_use: usize,
}

impl BitVector {
    /// Creates an empty bit vector without allocating.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv = BitVector::new();
    /// assert!(bv.is_empty());
    /// assert_eq!(bv.size(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            words: Vec::new(),
            words_in_use: 0,
        }
    }

    /// Creates an empty bit vector with storage for at least `min_bits` bits.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// assert_eq!(BitVector::with_capacity(0).size(), 0);
    /// assert_eq!(BitVector::with_capacity(1).size(), 64);
    /// assert_eq!(BitVector::with_capacity(65).size(), 128);
    /// ```
    pub fn with_capacity(min_bits: usize) -> Self {
        Self {
            words: alloc::vec![0; min_bits.div_ceil(BITS_PER_WORD)],
            words_in_use: 0,
        }
    }

    /// Takes ownership of `words` as the backing storage, without trimming.
    ///
    /// # Errors
    /// Returns [`BitVectorError::TrailingZeroWord`] if the last word is zero.
    /// [`copy_of_words`] accepts such sequences and trims them.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::{BitVector, BitVectorError};
    ///
    /// let bv = BitVector::from_words(vec![0b101, 1]).unwrap();
    /// assert_eq!(bv.to_set_notation(), "{0, 2, 64}");
    ///
    /// assert_eq!(
    ///     BitVector::from_words(vec![1, 0]),
    ///     Err(BitVectorError::TrailingZeroWord { position: 1 })
    /// );
    /// ```
    ///
    /// [`copy_of_words`]: BitVector::copy_of_words
    pub fn from_words(words: Vec<u64>) -> Result<Self, BitVectorError> {
        if words.last() == Some(&0) {
            return Err(BitVectorError::TrailingZeroWord {
                position: words.len() - 1,
            });
        }
        let bv = Self {
            words_in_use: words.len(),
            words,
        };
        bv.check_invariants();
        Ok(bv)
    }

    /// Copies `words` into a new bit vector, dropping trailing zero words.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv = BitVector::copy_of_words(&[0, 1 << 3, 0, 0]);
    /// assert_eq!(bv.len(), 68);
    /// assert_eq!(bv.size(), 128);
    /// ```
    pub fn copy_of_words(words: &[u64]) -> Self {
        let words_in_use = words
            .iter()
            .rposition(|word| *word != 0)
            .map_or(0, |idx| idx + 1);
        let bv = Self {
            words: words[..words_in_use].to_vec(),
            words_in_use,
        };
        bv.check_invariants();
        bv
    }

    /// Constructs a bit vector from a boolean slice, where `true` means set.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_bools(&[true, false, true, false]);
    /// assert_eq!(bv.cardinality(), 2);
    /// assert_eq!(bv.len(), 3);
    /// ```
    pub fn from_bools(bits: &[bool]) -> Self {
        let mut bv = Self::with_capacity(bits.len());
        for (idx, bit) in bits.iter().enumerate() {
            if *bit {
                bv.set(idx);
            }
        }
        bv
    }

    fn in_use(&self) -> &[u64] {
        &self.words[..self.words_in_use]
    }

    #[inline]
    fn check_invariants(&self) {
        if cfg!(any(debug_assertions, feature = "invariant-checks")) {
            assert_invariants(&self.words, self.words_in_use);
        }
    }

    fn recalculate_words_in_use(&mut self) {
        self.words_in_use = self
            .in_use()
            .iter()
            .rposition(|word| *word != 0)
            .map_or(0, |idx| idx + 1);
    }

    fn ensure_capacity(&mut self, words_required: usize) {
        if self.words.len() < words_required {
            let request = words_required.max(2 * self.words.len());
            trace!(
                "growing bit vector storage from {} to {request} words",
                self.words.len()
            );
            self.words.resize(request, 0);
        }
    }

    /// Makes the word at `word_idx` part of the words in use.
    ///
    /// The caller must leave that word nonzero or recalculate the words in
    /// use afterwards.
    fn expand_to(&mut self, word_idx: usize) {
        let words_required = word_idx + 1;
        if self.words_in_use < words_required {
            self.ensure_capacity(words_required);
            self.words_in_use = words_required;
        }
    }

    /// Sets the bit at the given index, growing the storage if needed.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set(130);
    /// assert!(bv.get(130));
    /// assert!(bv.size() >= 131);
    /// ```
    #[inline]
    pub fn set(&mut self, idx: usize) {
        let word_idx = word_index(idx);
        self.expand_to(word_idx);
        self.words[word_idx] |= bit_mask(idx);
        self.check_invariants();
    }

    /// Sets the bit at the given index to `value`.
    #[inline]
    pub fn set_value(&mut self, idx: usize, value: bool) {
        if value {
            self.set(idx);
        } else {
            self.clear(idx);
        }
    }

    /// Unsets the bit at the given index. Indices past the set bits are left
    /// alone and nothing is allocated.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set(3);
    /// bv.set(70);
    /// bv.clear(70);
    /// assert_eq!(bv.len(), 4);
    /// bv.clear(5000);
    /// assert_eq!(bv.size(), 128);
    /// ```
    #[inline]
    pub fn clear(&mut self, idx: usize) {
        let word_idx = word_index(idx);
        if word_idx >= self.words_in_use {
            return;
        }
        self.words[word_idx] &= !bit_mask(idx);
        self.recalculate_words_in_use();
        self.check_invariants();
    }

    /// Unsets every bit while keeping the allocated storage.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv: BitVector = [1, 100, 1000].into_iter().collect();
    /// let size = bv.size();
    /// bv.clear_all();
    /// assert!(bv.is_empty());
    /// assert_eq!(bv.size(), size);
    /// ```
    pub fn clear_all(&mut self) {
        self.words[..self.words_in_use].fill(0);
        self.words_in_use = 0;
        self.check_invariants();
    }

    /// Toggles the bit at the given index, growing the storage if needed.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.flip(4);
    /// assert!(bv.get(4));
    /// bv.flip(4);
    /// assert!(!bv.get(4));
    /// assert!(bv.is_empty());
    /// ```
    #[inline]
    pub fn flip(&mut self, idx: usize) {
        let word_idx = word_index(idx);
        self.expand_to(word_idx);
        self.words[word_idx] ^= bit_mask(idx);
        self.recalculate_words_in_use();
        self.check_invariants();
    }

    /// Returns `true` if the bit at the given index is set.
    ///
    /// Never grows the storage; every index past the set bits reads as
    /// `false`.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.check_invariants();
        let word_idx = word_index(idx);
        word_idx < self.words_in_use && self.words[word_idx] & bit_mask(idx) != 0
    }

    /// Sets all bits in the given range, growing the storage if needed.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(2..6).unwrap();
    /// assert!(bv.get(2));
    /// assert!(bv.get(5));
    /// assert!(!bv.get(6));
    /// ```
    pub fn set_range(&mut self, range: Range<usize>) -> Result<(), BitVectorError> {
        check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        let start_word = word_index(range.start);
        let end_word = word_index(range.end - 1);
        self.expand_to(end_word);

        let first_mask = low_bound_mask(range.start);
        let last_mask = high_bound_mask(range.end);

        // all within one word
        if start_word == end_word {
            self.words[start_word] |= first_mask & last_mask;
        } else {
            self.words[start_word] |= first_mask;
            self.words[start_word + 1..end_word].fill(!0);
            self.words[end_word] |= last_mask;
        }

        self.check_invariants();
        Ok(())
    }

    /// Unsets all bits in the given range. Never grows the storage.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(0..8).unwrap();
    /// bv.clear_range(2..6).unwrap();
    /// assert_eq!(bv.to_set_notation(), "{0, 1, 6, 7}");
    /// ```
    pub fn clear_range(&mut self, range: Range<usize>) -> Result<(), BitVectorError> {
        check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        let start_word = word_index(range.start);
        if start_word >= self.words_in_use {
            return Ok(());
        }

        let mut end = range.end;
        let mut end_word = word_index(end - 1);
        if end_word >= self.words_in_use {
            end = self.len();
            end_word = self.words_in_use - 1;
        }

        let first_mask = low_bound_mask(range.start);
        let last_mask = high_bound_mask(end);

        if start_word == end_word {
            self.words[start_word] &= !(first_mask & last_mask);
        } else {
            self.words[start_word] &= !first_mask;
            self.words[start_word + 1..end_word].fill(0);
            self.words[end_word] &= !last_mask;
        }

        self.recalculate_words_in_use();
        self.check_invariants();
        Ok(())
    }

    /// Toggles all bits in the given range, growing the storage if needed.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::from_bools(&[true, true, false, false]);
    /// bv.flip_range(1..3).unwrap();
    /// assert_eq!(bv.to_set_notation(), "{0, 2}");
    /// ```
    pub fn flip_range(&mut self, range: Range<usize>) -> Result<(), BitVectorError> {
        check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        let start_word = word_index(range.start);
        let end_word = word_index(range.end - 1);
        self.expand_to(end_word);

        let first_mask = low_bound_mask(range.start);
        let last_mask = high_bound_mask(range.end);

        if start_word == end_word {
            self.words[start_word] ^= first_mask & last_mask;
        } else {
            self.words[start_word] ^= first_mask;
            for word in &mut self.words[start_word + 1..end_word] {
                *word = !*word;
            }
            self.words[end_word] ^= last_mask;
        }

        self.recalculate_words_in_use();
        self.check_invariants();
        Ok(())
    }

    /// Sets all bits in the given range to `value`.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    pub fn set_value_range(
        &mut self,
        range: Range<usize>,
        value: bool,
    ) -> Result<(), BitVectorError> {
        if value {
            self.set_range(range)
        } else {
            self.clear_range(range)
        }
    }

    /// Returns a new bit vector holding the bits of `range`, shifted down so
    /// that `range.start` becomes index 0.
    ///
    /// A range reaching past [`len`](BitVector::len) is cut off there.
    ///
    /// # Errors
    /// Returns [`BitVectorError::InvalidRange`] if `range.start > range.end`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv: BitVector = [1, 62, 63, 64, 130].into_iter().collect();
    /// let slice = bv.slice(62..1000).unwrap();
    /// assert_eq!(slice.to_set_notation(), "{0, 1, 2, 68}");
    /// assert!(bv.slice(131..200).unwrap().is_empty());
    /// ```
    pub fn slice(&self, range: Range<usize>) -> Result<BitVector, BitVectorError> {
        check_range(&range)?;
        self.check_invariants();

        let len = self.len();
        if len <= range.start || range.is_empty() {
            return Ok(Self::new());
        }

        let from = range.start;
        let to = range.end.min(len);
        let offset = from % BITS_PER_WORD;
        let target_words = word_index(to - from - 1) + 1;
        let mut result = Self::with_capacity(to - from);
        let mut source = word_index(from);

        // every target word except the last spans two source words
        for target in &mut result.words[..target_words - 1] {
            *target = if offset == 0 {
                self.words[source]
            } else {
                self.words[source] >> offset | self.words[source + 1] << (BITS_PER_WORD - offset)
            };
            source += 1;
        }

        let last_mask = high_bound_mask(to);
        result.words[target_words - 1] = if (to - 1) % BITS_PER_WORD < offset {
            self.words[source] >> offset
                | (self.words[source + 1] & last_mask) << (BITS_PER_WORD - offset)
        } else {
            (self.words[source] & last_mask) >> offset
        };

        result.words_in_use = target_words;
        result.recalculate_words_in_use();
        result.check_invariants();
        Ok(result)
    }

    /// Returns the index of the first set bit at or after `from`, or `None`
    /// if there is none.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv: BitVector = [5, 10, 70].into_iter().collect();
    /// assert_eq!(bv.next_set_bit(0), Some(5));
    /// assert_eq!(bv.next_set_bit(11), Some(70));
    /// assert_eq!(bv.next_set_bit(71), None);
    /// ```
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        self.check_invariants();

        let mut word_idx = word_index(from);
        if word_idx >= self.words_in_use {
            return None;
        }

        // first partial word
        let mut word = self.words[word_idx] & low_bound_mask(from);
        loop {
            if word != 0 {
                return Some(word_idx * BITS_PER_WORD + word.trailing_zeros() as usize);
            }
            word_idx += 1;
            if word_idx == self.words_in_use {
                return None;
            }
            word = self.words[word_idx];
        }
    }

    /// Returns the index of the first unset bit at or after `from`.
    ///
    /// Every bit past the set bits is unset, so this always finds one.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(0..64).unwrap();
    /// assert_eq!(bv.next_clear_bit(0), 64);
    /// assert_eq!(bv.next_clear_bit(500), 500);
    /// ```
    pub fn next_clear_bit(&self, from: usize) -> usize {
        self.check_invariants();

        let mut word_idx = word_index(from);
        if word_idx >= self.words_in_use {
            return from;
        }

        let mut word = !self.words[word_idx] & low_bound_mask(from);
        loop {
            if word != 0 {
                return word_idx * BITS_PER_WORD + word.trailing_zeros() as usize;
            }
            word_idx += 1;
            if word_idx == self.words_in_use {
                return self.words_in_use * BITS_PER_WORD;
            }
            word = !self.words[word_idx];
        }
    }

    /// Returns the index of the last set bit at or before `from`, or `None`
    /// if there is none.
    ///
    /// To walk all set bits downwards, continue from the previous hit minus
    /// one and stop once that subtraction underflows.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv: BitVector = [0, 5, 70].into_iter().collect();
    /// let mut found = Vec::new();
    /// let mut from = Some(usize::MAX);
    /// while let Some(idx) = from.and_then(|from| bv.previous_set_bit(from)) {
    ///     found.push(idx);
    ///     from = idx.checked_sub(1);
    /// }
    /// assert_eq!(found, [70, 5, 0]);
    /// ```
    pub fn previous_set_bit(&self, from: usize) -> Option<usize> {
        self.check_invariants();

        let mut word_idx = word_index(from);
        if word_idx >= self.words_in_use {
            return self.len().checked_sub(1);
        }

        let mut word = self.words[word_idx] & up_to_mask(from);
        loop {
            if word != 0 {
                return Some(
                    (word_idx + 1) * BITS_PER_WORD - 1 - word.leading_zeros() as usize,
                );
            }
            if word_idx == 0 {
                return None;
            }
            word_idx -= 1;
            word = self.words[word_idx];
        }
    }

    /// Returns the index of the last unset bit at or before `from`, or
    /// `None` if every bit in `0..=from` is set.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(0..10).unwrap();
    /// assert_eq!(bv.previous_clear_bit(9), None);
    /// assert_eq!(bv.previous_clear_bit(10), Some(10));
    /// bv.clear(4);
    /// assert_eq!(bv.previous_clear_bit(9), Some(4));
    /// ```
    pub fn previous_clear_bit(&self, from: usize) -> Option<usize> {
        self.check_invariants();

        let mut word_idx = word_index(from);
        if word_idx >= self.words_in_use {
            return Some(from);
        }

        let mut word = !self.words[word_idx] & up_to_mask(from);
        loop {
            if word != 0 {
                return Some(
                    (word_idx + 1) * BITS_PER_WORD - 1 - word.leading_zeros() as usize,
                );
            }
            if word_idx == 0 {
                return None;
            }
            word_idx -= 1;
            word = !self.words[word_idx];
        }
    }

    /// Returns the logical length: one past the highest set bit, or 0 if no
    /// bit is set.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::with_capacity(1024);
    /// assert_eq!(bv.len(), 0);
    /// bv.set(3);
    /// bv.set(65);
    /// assert_eq!(bv.len(), 66);
    /// ```
    pub fn len(&self) -> usize {
        match self.in_use().last() {
            Some(last) => {
                BITS_PER_WORD * (self.words_in_use - 1)
                    + (BITS_PER_WORD - last.leading_zeros() as usize)
            }
            None => 0,
        }
    }

    /// Returns the number of bits the current storage can hold without
    /// growing.
    pub fn size(&self) -> usize {
        self.words.len() * BITS_PER_WORD
    }

    /// Returns `true` if no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words_in_use == 0
    }

    /// Returns the number of set bits.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::new();
    /// bv.set_range(0..64).unwrap();
    /// bv.set(100);
    /// assert_eq!(bv.cardinality(), 65);
    /// ```
    pub fn cardinality(&self) -> usize {
        self.in_use().iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if `self` and `other` share at least one set bit.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let a: BitVector = [1, 200].into_iter().collect();
    /// let b: BitVector = [2, 200].into_iter().collect();
    /// let c: BitVector = [3].into_iter().collect();
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &BitVector) -> bool {
        self.in_use()
            .iter()
            .zip(other.in_use())
            .any(|(word, other_word)| word & other_word != 0)
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let a: BitVector = [1, 2, 3, 200].into_iter().collect();
    /// let b: BitVector = [2, 200].into_iter().collect();
    /// assert!(a.contains_all(&b));
    /// assert!(!b.contains_all(&a));
    /// assert!(a.contains_all(&BitVector::new()));
    /// ```
    pub fn contains_all(&self, other: &BitVector) -> bool {
        // other's highest word in use is nonzero, self's counterpart would be zero
        if other.words_in_use > self.words_in_use {
            return false;
        }
        self.words
            .iter()
            .zip(other.in_use())
            .all(|(word, other_word)| word & other_word == *other_word)
    }

    /// Keeps only the bits that are also set in `other`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut a: BitVector = [1, 2, 300].into_iter().collect();
    /// let b: BitVector = [2, 3].into_iter().collect();
    /// a.and(&b);
    /// assert_eq!(a.to_set_notation(), "{2}");
    /// ```
    pub fn and(&mut self, other: &BitVector) {
        while self.words_in_use > other.words_in_use {
            self.words_in_use -= 1;
            self.words[self.words_in_use] = 0;
        }

        for (word, other_word) in self.words[..self.words_in_use].iter_mut().zip(&other.words) {
            *word &= other_word;
        }

        self.recalculate_words_in_use();
        self.check_invariants();
    }

    /// Sets every bit that is set in `other`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut a: BitVector = [1, 2].into_iter().collect();
    /// let b: BitVector = [2, 300].into_iter().collect();
    /// a.or(&b);
    /// assert_eq!(a.to_set_notation(), "{1, 2, 300}");
    /// ```
    pub fn or(&mut self, other: &BitVector) {
        let words_in_common = self.words_in_use.min(other.words_in_use);

        if self.words_in_use < other.words_in_use {
            self.ensure_capacity(other.words_in_use);
            self.words_in_use = other.words_in_use;
        }

        for (word, other_word) in self.words[..words_in_common].iter_mut().zip(&other.words) {
            *word |= other_word;
        }

        // the words only `other` has are copied over as they are
        self.words[words_in_common..other.words_in_use]
            .copy_from_slice(&other.words[words_in_common..other.words_in_use]);

        self.check_invariants();
    }

    /// Toggles every bit that is set in `other`.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut a: BitVector = [1, 2, 3].into_iter().collect();
    /// let b: BitVector = [2, 3, 4].into_iter().collect();
    /// a.xor(&b);
    /// assert_eq!(a.to_set_notation(), "{1, 4}");
    /// ```
    pub fn xor(&mut self, other: &BitVector) {
        let words_in_common = self.words_in_use.min(other.words_in_use);

        if self.words_in_use < other.words_in_use {
            self.ensure_capacity(other.words_in_use);
            self.words_in_use = other.words_in_use;
        }

        for (word, other_word) in self.words[..words_in_common].iter_mut().zip(&other.words) {
            *word ^= other_word;
        }

        self.words[words_in_common..other.words_in_use]
            .copy_from_slice(&other.words[words_in_common..other.words_in_use]);

        self.recalculate_words_in_use();
        self.check_invariants();
    }

    /// Unsets every bit that is set in `other`. Never grows the storage.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut a: BitVector = [1, 2, 3].into_iter().collect();
    /// let b: BitVector = [2, 3, 4].into_iter().collect();
    /// a.and_not(&b);
    /// assert_eq!(a.to_set_notation(), "{1}");
    /// ```
    pub fn and_not(&mut self, other: &BitVector) {
        let words_in_common = self.words_in_use.min(other.words_in_use);
        for (word, other_word) in self.words[..words_in_common].iter_mut().zip(&other.words) {
            *word &= !other_word;
        }

        self.recalculate_words_in_use();
        self.check_invariants();
    }

    /// Returns a hash of the set bits, independent of spare capacity.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut a = BitVector::with_capacity(4096);
    /// a.set(7);
    /// let b: BitVector = [7].into_iter().collect();
    /// assert_eq!(a.hash_value(), b.hash_value());
    /// ```
    pub fn hash_value(&self) -> u64 {
        let mut h: u64 = 1234;
        for (idx, word) in self.in_use().iter().enumerate().rev() {
            h ^= word.wrapping_mul(idx as u64 + 1);
        }
        (h >> 32) ^ h
    }

    /// Returns the indices of all set bits in ascending order, formatted as
    /// `{i, j, k}`.
    ///
    /// Meant for diagnostics; this is the same text as the [`Display`] impl.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv: BitVector = [64, 0, 3].into_iter().collect();
    /// assert_eq!(bv.to_set_notation(), "{0, 3, 64}");
    /// assert_eq!(BitVector::new().to_set_notation(), "{}");
    /// ```
    pub fn to_set_notation(&self) -> String {
        self.to_string()
    }

    /// Returns a copy of the backing words, including spare capacity words.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::with_capacity(128);
    /// bv.set(1);
    /// assert_eq!(bv.to_word_array(), [0b10, 0]);
    /// assert_eq!(BitVector::copy_of_words(&bv.to_word_array()), bv);
    /// ```
    pub fn to_word_array(&self) -> Vec<u64> {
        self.words.clone()
    }

    /// Releases spare capacity, shrinking the storage to the words in use.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let mut bv = BitVector::with_capacity(1000);
    /// bv.set(70);
    /// bv.trim_to_size();
    /// assert_eq!(bv.size(), 128);
    /// ```
    pub fn trim_to_size(&mut self) {
        if self.words_in_use != self.words.len() {
            trace!(
                "trimming bit vector storage from {} to {} words",
                self.words.len(),
                self.words_in_use
            );
            self.words.truncate(self.words_in_use);
            self.words.shrink_to_fit();
        }
        self.check_invariants();
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// Iterating through the entire iterator runs in O(max(k, w)) where k is
    /// the number of set bits and w is the number of words in use.
    ///
    /// # Examples
    /// ```
    /// use packed_bitvec::BitVector;
    ///
    /// let bv = BitVector::from_bools(&[true, false, true, false, true]);
    /// assert_eq!(bv.iter_ones().collect::<Vec<_>>(), [0, 2, 4]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<'_> {
        let words = self.in_use();
        IterOnes {
            words,
            word_idx: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Default for BitVector {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.check_invariants();
        other.check_invariants();
        self.in_use() == other.in_use()
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.in_use().hash(state);
    }
}

impl Display for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (n, idx) in self.iter_ones().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{idx}")?;
        }
        f.write_char('}')
    }
}

impl Debug for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BitVector {self} ({} of {} words in use)",
            self.words_in_use,
            self.words.len()
        )
    }
}

impl<'bitvector> IntoIterator for &'bitvector BitVector {
    type Item = usize;
    type IntoIter = IterOnes<'bitvector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ones()
    }
}

/// Constructs a bit vector with every yielded index set.
impl FromIterator<usize> for BitVector {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut bv = Self::new();
        bv.extend(iter);
        bv
    }
}

impl Extend<usize> for BitVector {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        for idx in iter {
            self.set(idx);
        }
    }
}

impl BitAndAssign<&BitVector> for BitVector {
    fn bitand_assign(&mut self, rhs: &BitVector) {
        self.and(rhs);
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, rhs: &BitVector) {
        self.or(rhs);
    }
}

impl BitXorAssign<&BitVector> for BitVector {
    fn bitxor_assign(&mut self, rhs: &BitVector) {
        self.xor(rhs);
    }
}

impl SubAssign<&BitVector> for BitVector {
    fn sub_assign(&mut self, rhs: &BitVector) {
        self.and_not(rhs);
    }
}

impl BitAnd<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitand(self, rhs: &BitVector) -> Self::Output {
        let mut result = self.clone();
        result.and(rhs);
        result
    }
}

impl BitOr<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitor(self, rhs: &BitVector) -> Self::Output {
        let mut result = self.clone();
        result.or(rhs);
        result
    }
}

impl BitXor<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitxor(self, rhs: &BitVector) -> Self::Output {
        let mut result = self.clone();
        result.xor(rhs);
        result
    }
}

impl Sub<&BitVector> for &BitVector {
    type Output = BitVector;

    fn sub(self, rhs: &BitVector) -> Self::Output {
        let mut result = self.clone();
        result.and_not(rhs);
        result
    }
}

/// Iterator over the indices of set bits in the bit vector.
///
/// Yields the positions of all bits that are set, in ascending order.
///
/// Returned by [`BitVector::iter_ones()`].
#[derive(Clone)]
pub struct IterOnes<'bitvector> {
    words: &'bitvector [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word_idx < self.words.len() {
            if self.current != 0 {
                let tz = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1; // unset LSB
                return Some(self.word_idx * BITS_PER_WORD + tz);
            }

            self.word_idx += 1;
            self.current = self.words.get(self.word_idx).copied().unwrap_or(0);
        }
        None
    }
}

impl FusedIterator for IterOnes<'_> {}
