//! Everything needed to build and chain sequences.

pub use lazyq_core::prelude::*;

pub use crate::aggregate::AggregateOps;
pub use crate::element::ElementOps;
pub use crate::numeric::{Real, Summable};
pub use crate::ordering::OrderingOps;
pub use crate::set::SetOps;
