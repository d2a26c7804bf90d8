//! Element operators: single-pass, one-to-one or filtering transforms.
//!
//! Every operator here is strictly lazy. Building one pulls nothing; each
//! traversal of the result pulls the source only as far as the consumer asks.

use std::any::type_name;
use std::collections::VecDeque;
use std::rc::Rc;

use lazyq_core::config;
use lazyq_core::from::{empty, from_vec};
use lazyq_core::seq::{Seq, Sequence};
use lazyq_core::{trace, Result, SeqError};

pub trait ElementOps<'a>: Sequence<'a> {
    /// Project every element.
    fn map<U, F>(&self, selector: F) -> Seq<'a, U>
    where
        U: 'a,
        F: Fn(Self::Item) -> U + 'a,
    {
        let source = self.as_seq().clone();
        let selector = Rc::new(selector);
        Seq::from_fn(move || {
            let selector = Rc::clone(&selector);
            source.open().map(move |item| selector(item))
        })
    }

    /// Project every element to a collection and flatten the results.
    fn flat_map<U, I, F>(&self, selector: F) -> Seq<'a, U>
    where
        U: 'a,
        I: IntoIterator<Item = U> + 'a,
        I::IntoIter: 'a,
        F: Fn(Self::Item) -> I + 'a,
    {
        let source = self.as_seq().clone();
        let selector = Rc::new(selector);
        Seq::from_fn(move || {
            let selector = Rc::clone(&selector);
            source.open().flat_map(move |item| selector(item))
        })
    }

    fn filter<P>(&self, predicate: P) -> Seq<'a, Self::Item>
    where
        P: Fn(&Self::Item) -> bool + 'a,
    {
        let source = self.as_seq().clone();
        let predicate = Rc::new(predicate);
        Seq::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            source.open().filter(move |item| predicate(item))
        })
    }

    /// Infallible conversion of every element.
    fn cast<U>(&self) -> Seq<'a, U>
    where
        U: 'a,
        Self::Item: Into<U>,
    {
        self.map(Into::into)
    }

    /// Fallible conversion; a value that cannot be converted surfaces as
    /// `SeqError::InvalidCast` at the position it is consumed.
    fn try_cast<U>(&self) -> Seq<'a, Result<U>>
    where
        U: TryFrom<Self::Item> + 'a,
    {
        self.map(|item| {
            U::try_from(item).map_err(|_| {
                let err = SeqError::InvalidCast {
                    from: type_name::<Self::Item>(),
                    to: type_name::<U>(),
                };
                trace::failed("try_cast", &err);
                err
            })
        })
    }

    /// Drop the first `count` elements; a non-positive count drops nothing.
    fn skip(&self, count: isize) -> Seq<'a, Self::Item> {
        let source = self.as_seq().clone();
        if count <= 0 {
            return source;
        }
        let count = count as usize;
        Seq::from_fn(move || source.open().skip(count))
    }

    /// At most the first `count` elements; the source is not pulled past them.
    fn take(&self, count: isize) -> Seq<'a, Self::Item> {
        if count <= 0 {
            return empty();
        }
        let count = count as usize;
        let source = self.as_seq().clone();
        Seq::from_fn(move || source.open().take(count))
    }

    /// Discard elements until the first one matching `predicate`, then forward
    /// it and everything after it. The predicate is not consulted again.
    fn skip_while<P>(&self, predicate: P) -> Seq<'a, Self::Item>
    where
        P: Fn(&Self::Item) -> bool + 'a,
    {
        let source = self.as_seq().clone();
        let predicate = Rc::new(predicate);
        Seq::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            source.open().skip_while(move |item| !predicate(item))
        })
    }

    /// Forward elements until the first one matching `predicate` (exclusive),
    /// then stop pulling the source.
    fn take_while<P>(&self, predicate: P) -> Seq<'a, Self::Item>
    where
        P: Fn(&Self::Item) -> bool + 'a,
    {
        let source = self.as_seq().clone();
        let predicate = Rc::new(predicate);
        Seq::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            source.open().take_while(move |item| !predicate(item))
        })
    }

    /// All but the last `count` elements. Holds a window of `count` elements,
    /// so the source is traversed exactly once.
    fn skip_last(&self, count: isize) -> Seq<'a, Self::Item> {
        let source = self.as_seq().clone();
        if count <= 0 {
            return source;
        }
        let count = count as usize;
        Seq::from_fn(move || SkipLast {
            inner: source.open(),
            window: VecDeque::with_capacity(count.min(config::current().buffer_capacity_hint)),
            count,
        })
    }

    /// The last `count` elements. The whole source is drained into a ring
    /// buffer before the first element is emitted.
    fn take_last(&self, count: isize) -> Seq<'a, Self::Item> {
        if count <= 0 {
            return empty();
        }
        let count = count as usize;
        let source = self.as_seq().clone();
        Seq::from_deferred(move || {
            let (window, drained) = trailing_window(source.open(), count);
            trace::materialized("take_last", drained);
            window
        })
    }

    /// `elements` after the source.
    fn append<I>(&self, elements: I) -> Seq<'a, Self::Item>
    where
        I: IntoIterator<Item = Self::Item>,
        Self::Item: Clone,
    {
        self.concat(&from_vec(elements.into_iter().collect()))
    }

    /// `elements` before the source.
    fn prepend<I>(&self, elements: I) -> Seq<'a, Self::Item>
    where
        I: IntoIterator<Item = Self::Item>,
        Self::Item: Clone,
    {
        from_vec(elements.into_iter().collect()).concat(self.as_seq())
    }

    /// The source followed by `other`; `other` is not opened until the
    /// source is exhausted.
    fn concat(&self, other: &Seq<'a, Self::Item>) -> Seq<'a, Self::Item> {
        let source = self.as_seq().clone();
        let other = other.clone();
        Seq::from_fn(move || source.open().chain(other.open_on_demand()))
    }

    /// Consecutive chunks of `size` elements; the last may be shorter.
    fn chunk(&self, size: isize) -> Result<Seq<'a, Vec<Self::Item>>> {
        if size < 1 {
            return trace::fail("chunk", SeqError::SizeBelowOne);
        }
        let size = size as usize;
        let source = self.as_seq().clone();
        Ok(Seq::from_fn(move || {
            let mut cursor = source.open();
            std::iter::from_fn(move || {
                let chunk: Vec<_> = cursor.by_ref().take(size).collect();
                (!chunk.is_empty()).then_some(chunk)
            })
        }))
    }
}

impl<'a, S: Sequence<'a> + ?Sized> ElementOps<'a> for S {}

/// The last `count` items of `items`, and how many items were drained.
fn trailing_window<I: Iterator>(items: I, count: usize) -> (VecDeque<I::Item>, usize) {
    let mut window = VecDeque::with_capacity(count.min(config::current().buffer_capacity_hint));
    let mut drained = 0;
    for item in items {
        if window.len() == count {
            window.pop_front();
        }
        window.push_back(item);
        drained += 1;
    }
    (window, drained)
}

struct SkipLast<I: Iterator> {
    inner: I,
    window: VecDeque<I::Item>,
    count: usize,
}

impl<I: Iterator> Iterator for SkipLast<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            let item = self.inner.next()?;
            self.window.push_back(item);
            if self.window.len() > self.count {
                return self.window.pop_front();
            }
        }
    }
}
