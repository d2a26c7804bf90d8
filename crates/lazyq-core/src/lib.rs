#![forbid(unsafe_code)]
//! lazyq-core: shared kernel for the lazyq operator library.
//!
//! This crate contains the sequence primitive, the equality/ordering
//! resolution chain, and the small ambient pieces (errors, config, tracing
//! hooks) every operator relies on. There are **no operators** here; those
//! live in `lazyq-operators` as extension traits over [`Seq`].
//!
//! Crates that use this:
//! - lazyq-operators: builds every element/aggregate/set/ordering operator on `Seq`.
//! - lazyq: facade re-exporting both crates.

pub mod compare;
pub mod config;
pub mod error;
pub mod from;
pub mod pair;
pub mod prelude;
pub mod seq;
pub mod trace;

pub use compare::{Comparable, Comparison, Equality, Equatable, Resolution};
pub use error::{ConfigError, Result, SeqError};
pub use pair::{KeyValuePair, ValuePair};
pub use seq::{Cursor, Flow, Seq, Sequence, CONTINUE, STOP};
