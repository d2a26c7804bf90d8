//! Ordering operators.
//!
//! The sorting operators drain their source into a buffer and run a stable
//! sort, so elements that compare equal keep their input order in both
//! directions. `min`/`max`/`min_max` are single-pass and keep the first
//! element on ties.

use std::cmp::Ordering;

use lazyq_core::compare::{Comparable, Comparison};
use lazyq_core::pair::ValuePair;
use lazyq_core::seq::{Seq, Sequence};
use lazyq_core::{trace, Result, SeqError};

pub trait OrderingOps<'a>: Sequence<'a> {
    fn min(&self) -> Result<Self::Item>
    where
        Self::Item: Comparable,
    {
        extreme("min", self.as_seq(), &Comparison::resolve(), Ordering::Less)
    }

    fn min_with<F>(&self, comparer: F) -> Result<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        extreme("min", self.as_seq(), &Comparison::explicit(comparer), Ordering::Less)
    }

    fn max(&self) -> Result<Self::Item>
    where
        Self::Item: Comparable,
    {
        extreme("max", self.as_seq(), &Comparison::resolve(), Ordering::Greater)
    }

    fn max_with<F>(&self, comparer: F) -> Result<Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
    {
        extreme("max", self.as_seq(), &Comparison::explicit(comparer), Ordering::Greater)
    }

    /// Smallest and largest element in one pass.
    fn min_max(&self) -> Result<(Self::Item, Self::Item)>
    where
        Self::Item: Comparable + Clone,
    {
        min_max_by(self.as_seq(), &Comparison::resolve())
    }

    fn min_max_with<F>(&self, comparer: F) -> Result<(Self::Item, Self::Item)>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
        Self::Item: Clone,
    {
        min_max_by(self.as_seq(), &Comparison::explicit(comparer))
    }

    fn order(&self) -> Seq<'a, Self::Item>
    where
        Self::Item: Comparable,
    {
        sorted("order", self.as_seq().clone(), Comparison::resolve())
    }

    fn order_with<F>(&self, comparer: F) -> Seq<'a, Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + 'a,
    {
        sorted("order", self.as_seq().clone(), Comparison::explicit(comparer))
    }

    fn order_descending(&self) -> Seq<'a, Self::Item>
    where
        Self::Item: Comparable,
    {
        sorted(
            "order_descending",
            self.as_seq().clone(),
            Comparison::resolve().reversed(),
        )
    }

    fn order_descending_with<F>(&self, comparer: F) -> Seq<'a, Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering + 'a,
    {
        sorted(
            "order_descending",
            self.as_seq().clone(),
            Comparison::explicit(comparer).reversed(),
        )
    }

    /// Sort by a projected key. The key is computed once per element.
    fn order_by<K, F>(&self, key_selector: F) -> Seq<'a, Self::Item>
    where
        K: Comparable + 'a,
        F: Fn(&Self::Item) -> K + 'a,
    {
        sorted_by_key(
            "order_by",
            self.as_seq().clone(),
            key_selector,
            Comparison::resolve(),
        )
    }

    fn order_by_with<K, F, C>(&self, key_selector: F, comparer: C) -> Seq<'a, Self::Item>
    where
        K: 'a,
        F: Fn(&Self::Item) -> K + 'a,
        C: Fn(&K, &K) -> Ordering + 'a,
    {
        sorted_by_key(
            "order_by",
            self.as_seq().clone(),
            key_selector,
            Comparison::explicit(comparer),
        )
    }

    fn order_by_descending<K, F>(&self, key_selector: F) -> Seq<'a, Self::Item>
    where
        K: Comparable + 'a,
        F: Fn(&Self::Item) -> K + 'a,
    {
        sorted_by_key(
            "order_by_descending",
            self.as_seq().clone(),
            key_selector,
            Comparison::resolve().reversed(),
        )
    }

    fn order_by_descending_with<K, F, C>(&self, key_selector: F, comparer: C) -> Seq<'a, Self::Item>
    where
        K: 'a,
        F: Fn(&Self::Item) -> K + 'a,
        C: Fn(&K, &K) -> Ordering + 'a,
    {
        sorted_by_key(
            "order_by_descending",
            self.as_seq().clone(),
            key_selector,
            Comparison::explicit(comparer).reversed(),
        )
    }

    /// The source back to front.
    fn reverse(&self) -> Seq<'a, Self::Item> {
        let source = self.as_seq().clone();
        Seq::from_deferred(move || source.materialize("reverse").into_iter().rev())
    }
}

impl<'a, S: Sequence<'a> + ?Sized> OrderingOps<'a> for S {}

fn extreme<'a, T: 'a>(
    op: &'static str,
    source: &Seq<'a, T>,
    comparison: &Comparison<'_, T>,
    wanted: Ordering,
) -> Result<T> {
    source
        .open()
        .reduce(|best, item| {
            if comparison.compare(&item, &best) == wanted {
                item
            } else {
                best
            }
        })
        .ok_or(SeqError::EmptySource)
        .inspect_err(|err| trace::failed(op, err))
}

fn min_max_by<'a, T: Clone + 'a>(source: &Seq<'a, T>, comparison: &Comparison<'_, T>) -> Result<(T, T)> {
    let mut cursor = source.open();
    let Some(first) = cursor.next() else {
        return trace::fail("min_max", SeqError::EmptySource);
    };
    let mut low = first.clone();
    let mut high = first;
    for item in cursor {
        if comparison.compare(&item, &low) == Ordering::Less {
            low = item;
        } else if comparison.compare(&item, &high) == Ordering::Greater {
            high = item;
        }
    }
    Ok((low, high))
}

fn sorted<'a, T: 'a>(op: &'static str, source: Seq<'a, T>, comparison: Comparison<'a, T>) -> Seq<'a, T> {
    Seq::from_deferred(move || {
        let mut buffer = source.materialize(op);
        buffer.sort_by(|left, right| comparison.compare(left, right));
        buffer
    })
}

fn sorted_by_key<'a, T, K, F>(
    op: &'static str,
    source: Seq<'a, T>,
    key_selector: F,
    comparison: Comparison<'a, K>,
) -> Seq<'a, T>
where
    T: 'a,
    K: 'a,
    F: Fn(&T) -> K + 'a,
{
    Seq::from_deferred(move || {
        let mut keyed: Vec<ValuePair<K, T>> = source
            .open()
            .map(|item| ValuePair::new(key_selector(&item), item))
            .collect();
        trace::materialized(op, keyed.len());
        keyed.sort_by(|left, right| comparison.compare(&left.first, &right.first));
        keyed.into_iter().map(|pair| pair.second)
    })
}
