#![forbid(unsafe_code)]
//! lazyq: lazy, composable query operators over restartable sequences.
//!
//! ```
//! use lazyq::prelude::*;
//!
//! let evens = range(1, 10).filter(|n| n % 2 == 0).map(|n| n * 10);
//! assert_eq!(evens.to_vec(), vec![20, 40, 60, 80, 100]);
//! assert_eq!(evens.sum(), 300);
//! ```
//!
//! Nothing runs until a sequence is pulled. Every traversal starts from the
//! beginning of the source, and a consumer that stops early stops every
//! operator upstream of it.

pub use lazyq_core::{
    config, natural_ordering, structural_equality, Comparable, Comparison, ConfigError, Cursor,
    Equality, Equatable, Flow, KeyValuePair, Result, Seq, SeqError, Sequence, ValuePair, CONTINUE,
    STOP,
};
pub use lazyq_operators::{AggregateOps, ElementOps, OrderingOps, Real, SetOps, Summable};

pub mod prelude {
    pub use lazyq_operators::prelude::*;
}
