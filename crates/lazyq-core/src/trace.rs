//! Operator events.
//!
//! Events go to whatever `tracing` subscriber the application installs.
//! Without the `tracing` feature every hook compiles to nothing.

use crate::error::SeqError;

/// Record that `op` drained a source into a buffer of `len` elements.
#[cfg(feature = "tracing")]
pub fn materialized(op: &'static str, len: usize) {
    if crate::config::current().trace_materialize {
        tracing::trace!(op, len, "materialized source");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn materialized(_op: &'static str, _len: usize) { /* no-op */
}

/// Record a strict operator failure.
#[cfg(feature = "tracing")]
pub fn failed(op: &'static str, err: &SeqError) {
    tracing::debug!(op, error = %err, "operator failed");
}

#[cfg(not(feature = "tracing"))]
pub fn failed(_op: &'static str, _err: &SeqError) { /* no-op */
}

/// Record and return a failure.
pub fn fail<T>(op: &'static str, err: SeqError) -> crate::error::Result<T> {
    failed(op, &err);
    Err(err)
}
