//! Aggregate operators: consume the source (fully or up to a decision point)
//! and return a scalar.
//!
//! The First/Last/Single families come in three flavors. The strict flavor
//! distinguishes "the source had no elements" from "no element / more than
//! one element matched"; `_or_default` and `_or_fallback` turn those failures
//! into a normal return.

use std::hash::Hash;

use indexmap::IndexMap;
use num_traits::AsPrimitive;

use lazyq_core::seq::{Seq, Sequence, CONTINUE, STOP};
use lazyq_core::{trace, Result, SeqError};

use crate::numeric::{Real, Summable};

type Predicate<'p, T> = Option<&'p dyn Fn(&T) -> bool>;

pub trait AggregateOps<'a>: Sequence<'a> {
    /// Fold every element into `seed`. Returns `seed` for an empty source.
    fn aggregate<A, F>(&self, seed: A, accumulator: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        self.as_seq().open().fold(seed, accumulator)
    }

    /// [`AggregateOps::aggregate`] followed by a final transform.
    fn aggregate_select<A, R, F, S>(&self, seed: A, accumulator: F, result_selector: S) -> R
    where
        F: FnMut(A, Self::Item) -> A,
        S: FnOnce(A) -> R,
    {
        result_selector(self.aggregate(seed, accumulator))
    }

    /// True if every element matches; stops at the first that does not.
    fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.as_seq()
            .traverse(|item| if predicate(&item) { CONTINUE } else { STOP })
            .is_continue()
    }

    /// True if the source has at least one element. Pulls at most one.
    fn any(&self) -> bool {
        self.as_seq().open().next().is_some()
    }

    /// True if some element matches; stops at the first that does.
    fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.as_seq()
            .traverse(|item| if predicate(&item) { STOP } else { CONTINUE })
            .is_break()
    }

    fn count(&self) -> usize {
        self.as_seq().open().count()
    }

    fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.as_seq().open().filter(|item| predicate(item)).count()
    }

    /// Sum of all elements; the zero value for an empty source.
    fn sum(&self) -> Self::Item
    where
        Self::Item: Summable,
    {
        self.as_seq().open().fold(Summable::zero(), Summable::plus)
    }

    /// Arithmetic mean. Fails with `EmptySource` instead of dividing by zero.
    fn average(&self) -> Result<f64>
    where
        Self::Item: Real,
    {
        let (total, count) = self
            .as_seq()
            .open()
            .fold((0.0_f64, 0_usize), |(total, count), item| {
                (total + item.as_(), count + 1)
            });
        if count == 0 {
            return trace::fail("average", SeqError::EmptySource);
        }
        Ok(total / count as f64)
    }

    fn element_at(&self, index: isize) -> Result<Self::Item> {
        strict("element_at", element_at(self.as_seq(), index))
    }

    fn element_at_or_default(&self, index: isize) -> Self::Item
    where
        Self::Item: Default,
    {
        element_at(self.as_seq(), index).unwrap_or_default()
    }

    fn element_at_or_fallback(&self, index: isize, fallback: Self::Item) -> Self::Item {
        element_at(self.as_seq(), index).unwrap_or(fallback)
    }

    fn first(&self) -> Result<Self::Item> {
        strict("first", find_first(self.as_seq(), None))
    }

    fn first_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        strict("first", find_first(self.as_seq(), Some(&predicate)))
    }

    fn first_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        find_first(self.as_seq(), None).unwrap_or_default()
    }

    fn first_or_default_where<P>(&self, predicate: P) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
        Self::Item: Default,
    {
        find_first(self.as_seq(), Some(&predicate)).unwrap_or_default()
    }

    fn first_or_fallback(&self, fallback: Self::Item) -> Self::Item {
        find_first(self.as_seq(), None).unwrap_or(fallback)
    }

    fn first_or_fallback_where<P>(&self, fallback: Self::Item, predicate: P) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        find_first(self.as_seq(), Some(&predicate)).unwrap_or(fallback)
    }

    fn last(&self) -> Result<Self::Item> {
        strict("last", find_last(self.as_seq(), None))
    }

    fn last_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        strict("last", find_last(self.as_seq(), Some(&predicate)))
    }

    fn last_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        find_last(self.as_seq(), None).unwrap_or_default()
    }

    fn last_or_default_where<P>(&self, predicate: P) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
        Self::Item: Default,
    {
        find_last(self.as_seq(), Some(&predicate)).unwrap_or_default()
    }

    fn last_or_fallback(&self, fallback: Self::Item) -> Self::Item {
        find_last(self.as_seq(), None).unwrap_or(fallback)
    }

    fn last_or_fallback_where<P>(&self, fallback: Self::Item, predicate: P) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        find_last(self.as_seq(), Some(&predicate)).unwrap_or(fallback)
    }

    /// The only element. Fails with `EmptySource` or `MoreThanOneElement`.
    fn single(&self) -> Result<Self::Item> {
        strict("single", find_single(self.as_seq(), None))
    }

    /// The only matching element. Fails with `EmptySource`, `NoMatch` or
    /// `MoreThanOneMatch`; stops at the second match.
    fn single_where<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        strict("single", find_single(self.as_seq(), Some(&predicate)))
    }

    /// The only element, or the default when there is none or more than one.
    fn single_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        find_single(self.as_seq(), None).unwrap_or_default()
    }

    fn single_or_default_where<P>(&self, predicate: P) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
        Self::Item: Default,
    {
        find_single(self.as_seq(), Some(&predicate)).unwrap_or_default()
    }

    fn single_or_fallback(&self, fallback: Self::Item) -> Self::Item {
        find_single(self.as_seq(), None).unwrap_or(fallback)
    }

    fn single_or_fallback_where<P>(&self, fallback: Self::Item, predicate: P) -> Self::Item
    where
        P: Fn(&Self::Item) -> bool,
    {
        find_single(self.as_seq(), Some(&predicate)).unwrap_or(fallback)
    }

    /// Drain into a vector (ToSlice).
    fn to_vec(&self) -> Vec<Self::Item> {
        self.as_seq().open().collect()
    }

    /// Build a map; a repeated key keeps its first position and its last value.
    fn to_map<K, V, FK, FV>(&self, key_selector: FK, value_selector: FV) -> IndexMap<K, V>
    where
        K: Hash + Eq,
        FK: Fn(&Self::Item) -> K,
        FV: Fn(Self::Item) -> V,
    {
        let mut map = IndexMap::new();
        for item in self.as_seq().open() {
            map.insert(key_selector(&item), value_selector(item));
        }
        map
    }
}

impl<'a, S: Sequence<'a> + ?Sized> AggregateOps<'a> for S {}

fn strict<T>(op: &'static str, result: Result<T>) -> Result<T> {
    result.inspect_err(|err| trace::failed(op, err))
}

fn matches<T>(predicate: Predicate<'_, T>, item: &T) -> bool {
    predicate.map_or(true, |predicate| predicate(item))
}

fn element_at<'a, T: 'a>(source: &Seq<'a, T>, index: isize) -> Result<T> {
    if index < 0 {
        return Err(SeqError::IndexOutOfRange);
    }
    let mut cursor = source.open();
    let Some(first) = cursor.next() else {
        return Err(SeqError::EmptySource);
    };
    if index == 0 {
        return Ok(first);
    }
    cursor
        .nth(index as usize - 1)
        .ok_or(SeqError::IndexOutOfRange)
}

fn find_first<'a, T: 'a>(source: &Seq<'a, T>, predicate: Predicate<'_, T>) -> Result<T> {
    let mut any = false;
    let mut found = None;
    let _ = source.traverse(|item| {
        any = true;
        if matches(predicate, &item) {
            found = Some(item);
            STOP
        } else {
            CONTINUE
        }
    });
    match found {
        Some(item) => Ok(item),
        None if !any => Err(SeqError::EmptySource),
        None => Err(SeqError::NoMatch),
    }
}

fn find_last<'a, T: 'a>(source: &Seq<'a, T>, predicate: Predicate<'_, T>) -> Result<T> {
    let mut any = false;
    let mut found = None;
    for item in source.open() {
        any = true;
        if matches(predicate, &item) {
            found = Some(item);
        }
    }
    match found {
        Some(item) => Ok(item),
        None if !any => Err(SeqError::EmptySource),
        None => Err(SeqError::NoMatch),
    }
}

fn find_single<'a, T: 'a>(source: &Seq<'a, T>, predicate: Predicate<'_, T>) -> Result<T> {
    let mut any = false;
    let mut found = None;
    let mut duplicate = false;
    let _ = source.traverse(|item| {
        any = true;
        if !matches(predicate, &item) {
            return CONTINUE;
        }
        if found.is_some() {
            duplicate = true;
            return STOP;
        }
        found = Some(item);
        CONTINUE
    });
    if duplicate {
        return Err(match predicate {
            Some(_) => SeqError::MoreThanOneMatch,
            None => SeqError::MoreThanOneElement,
        });
    }
    match found {
        Some(item) => Ok(item),
        None if !any => Err(SeqError::EmptySource),
        None => Err(SeqError::NoMatch),
    }
}
