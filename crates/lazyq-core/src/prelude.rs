//! Convenient re-exports for downstream crates.

pub use crate::compare::{Comparable, Comparison, Equality, Equatable};
pub use crate::config::SeqConfig;
pub use crate::error::{Result, SeqError};
pub use crate::from::{
    empty, from_chars, from_iter_fn, from_map, from_slice, from_vec, once, range, repeat,
};
pub use crate::pair::{KeyValuePair, ValuePair};
pub use crate::seq::{Cursor, Flow, Seq, Sequence, CONTINUE, STOP};
