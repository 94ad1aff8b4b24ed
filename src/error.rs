use thiserror::Error;

/// Errors returned by fallible [`BitVector`](crate::BitVector) operations.
///
/// All of them describe caller misuse; retrying with the same arguments fails
/// the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitVectorError {
    /// A half-open range whose start lies past its end.
    #[error("range start {start} is greater than range end {end}")]
    InvalidRange {
        /// First index of the rejected range.
        start: usize,
        /// One past the last index of the rejected range.
        end: usize,
    },
    /// A word sequence handed over as-is ends in an all-zero word.
    ///
    /// Use [`BitVector::copy_of_words`](crate::BitVector::copy_of_words) to
    /// trim such sequences instead.
    #[error("word sequence ends in a zero word at position {position}")]
    TrailingZeroWord {
        /// Index of the trailing zero word.
        position: usize,
    },
}
