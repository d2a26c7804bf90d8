//! The sequence primitive.
//!
//! A [`Seq`] is a restartable, lazy producer. Its one primitive operation is
//! [`Seq::open`], which starts a fresh traversal and hands back a [`Cursor`]:
//! an explicit pull state machine. The push face, [`Seq::traverse`], drives a
//! cursor into a consumer that answers [`CONTINUE`] or [`STOP`] after every
//! element.
//!
//! Invariants:
//! - Opening a sequence does no work; the first element is produced on the
//!   first pull.
//! - Once a consumer answers `STOP`, `traverse` returns immediately and the
//!   cursor is dropped. No further element is produced, so no side effect of
//!   an upstream operator can run after the stop.
//! - Dropping a cursor releases everything it holds (buffers, inner cursors).

use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::config;
use crate::trace;

/// Consumer continuation signal.
pub type Flow = ControlFlow<()>;

pub const CONTINUE: Flow = ControlFlow::Continue(());
pub const STOP: Flow = ControlFlow::Break(());

/// A single traversal of a sequence.
pub struct Cursor<'a, T> {
    inner: Box<dyn Iterator<Item = T> + 'a>,
}

impl<'a, T: 'a> Cursor<'a, T> {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = T> + 'a,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl<T> Iterator for Cursor<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}

/// Builds the inner iterator on the first pull instead of at `open()`.
struct Deferred<F, I> {
    init: Option<F>,
    iter: Option<I>,
}

impl<F, C, I> Iterator for Deferred<F, I>
where
    F: FnOnce() -> C,
    C: IntoIterator<IntoIter = I>,
    I: Iterator<Item = C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(init) = self.init.take() {
            self.iter = Some(init().into_iter());
        }
        self.iter.as_mut()?.next()
    }
}

type Factory<'a, T> = dyn Fn() -> Cursor<'a, T> + 'a;

/// Lazy, restartable sequence of `T`.
///
/// Cloning is cheap (shared producer); each clone traverses independently.
pub struct Seq<'a, T> {
    factory: Rc<Factory<'a, T>>,
}

impl<'a, T: 'a> Seq<'a, T> {
    /// Build a sequence from a restartable iterator factory. The factory runs
    /// once per traversal.
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: Iterator<Item = T> + 'a,
    {
        Self {
            factory: Rc::new(move || Cursor::new(factory())),
        }
    }

    /// Like [`Seq::from_fn`], but the factory itself only runs on the first
    /// pull of each traversal. Used by operators that drain their source
    /// into a buffer before emitting anything.
    pub fn from_deferred<F, C>(factory: F) -> Self
    where
        F: Fn() -> C + 'a,
        C: IntoIterator<Item = T> + 'a,
        C::IntoIter: 'a,
    {
        let factory = Rc::new(factory);
        Self::from_fn(move || {
            let factory = Rc::clone(&factory);
            Deferred {
                init: Some(move || factory()),
                iter: None,
            }
        })
    }

    /// Start a fresh traversal.
    pub fn open(&self) -> Cursor<'a, T> {
        (self.factory)()
    }

    /// A cursor that opens this sequence only when first pulled. Used for
    /// right-hand operands that may never be reached.
    pub fn open_on_demand(&self) -> Cursor<'a, T> {
        Cursor::new(std::iter::once(self.clone()).flatten())
    }

    /// Push every element into `consumer` until exhaustion or `STOP`.
    ///
    /// Returns `STOP` if the consumer stopped early, `CONTINUE` otherwise.
    pub fn traverse<F>(&self, consumer: F) -> Flow
    where
        F: FnMut(T) -> Flow,
    {
        self.open().try_for_each(consumer)
    }

    /// Drain one traversal into a buffer owned by the caller.
    pub fn materialize(&self, op: &'static str) -> Vec<T> {
        let mut buffer = buffer();
        buffer.extend(self.open());
        trace::materialized(op, buffer.len());
        buffer
    }
}

/// Empty buffer sized by the configured capacity hint.
pub fn buffer<T>() -> Vec<T> {
    Vec::with_capacity(config::current().buffer_capacity_hint)
}

impl<T> Clone for Seq<'_, T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Seq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq").finish_non_exhaustive()
    }
}

impl<'a, T: 'a> IntoIterator for Seq<'a, T> {
    type Item = T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Cursor<'a, T> {
        self.open()
    }
}

impl<'a, T: 'a> IntoIterator for &Seq<'a, T> {
    type Item = T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Cursor<'a, T> {
        self.open()
    }
}

/// Anything that can be viewed as a [`Seq`]. Operator traits are implemented
/// for every `Sequence`.
pub trait Sequence<'a> {
    type Item: 'a;

    fn as_seq(&self) -> &Seq<'a, Self::Item>;
}

impl<'a, T: 'a> Sequence<'a> for Seq<'a, T> {
    type Item = T;

    fn as_seq(&self) -> &Seq<'a, T> {
        self
    }
}
