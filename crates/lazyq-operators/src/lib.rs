#![forbid(unsafe_code)]
//! lazyq-operators: the operator families over [`lazyq_core::Seq`].
//!
//! Each family is an extension trait with a blanket implementation for every
//! [`lazyq_core::Sequence`], so importing the trait (or the prelude) is all
//! that is needed to chain operators:
//!
//! - [`ElementOps`]: lazy one-to-one and filtering transforms.
//! - [`AggregateOps`]: folds and element selection.
//! - [`SetOps`]: distinct, set algebra, grouping, joins, zip.
//! - [`OrderingOps`]: min/max and stable sorting.

pub mod aggregate;
pub mod element;
mod join;
pub mod numeric;
pub mod ordering;
pub mod prelude;
pub mod set;

pub use aggregate::AggregateOps;
pub use element::ElementOps;
pub use numeric::{Real, Summable};
pub use ordering::OrderingOps;
pub use set::SetOps;
