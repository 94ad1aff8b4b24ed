//! A growable, word-packed bit vector written in pure Rust.
//! `no_std` with `alloc`, no `unsafe`.
//!
//! [`BitVector`] is the main struct in this library. Its [features](#features)
//! are listed below.
//!
//! # Examples
//! ```
//! use packed_bitvec::BitVector;
//!
//! let mut bv = BitVector::new();
//! assert_eq!(bv.cardinality(), 0);
//! bv.set(3);
//! bv.set(65);
//! assert!(bv.get(3));
//! assert!(!bv.get(64));
//! assert_eq!(bv.len(), 66);
//! assert_eq!(bv.to_set_notation(), "{3, 65}");
//! ```
//!
//! # Use Cases
//!
//! - Flag and mask registers whose width is not known up front
//! - Dense integer sets with fast union, intersection and difference
//! - Scanning for the next free or next used slot in an allocation map
//! - Not meant for sparse sets with huge indices: storage is dense up to the
//!   highest set bit
//!
//! # Features
//!
//! - `#![no_std]` compatible (needs `alloc`)
//! - Grows on demand when bits past the current storage are set or flipped
//! - Single-bit ops: `set`, `clear`, `flip`, `get`, `set_value`
//! - Range ops on whole words: `set_range`, `clear_range`, `flip_range`,
//!   `set_value_range`, `slice`
//! - Set algebra: `and`, `or`, `xor`, `and_not`, also as `&`, `|`, `^`, `-`
//!   and `&=`, `|=`, `^=`, `-=`
//! - Scans: `next_set_bit`, `next_clear_bit`, `previous_set_bit`,
//!   `previous_clear_bit`, `iter_ones()`
//! - Queries: `len`, `size`, `cardinality`, `intersects`, `contains_all`
//! - Explicit storage trimming with `trim_to_size`
//!
//! # Cargo features
//!
//! - `invariant-checks`: keep the internal consistency assertions in release
//!   builds. They are always on in debug builds.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod bitvector;
mod error;

pub use bitvector::{BITS_PER_WORD, BitVector, IterOnes};
pub use error::BitVectorError;
