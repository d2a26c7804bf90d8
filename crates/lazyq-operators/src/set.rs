//! Set and relational operators.
//!
//! Equality is resolved once per call into an [`Equality`] strategy and held
//! for the whole traversal. Operators that compare two whole sides
//! (except/intersect/union) drain each side exactly once per traversal, so a
//! single-use producer on either side is safe.

use std::hash::Hash;

use indexmap::IndexMap;

use lazyq_core::compare::{Equality, Equatable};
use lazyq_core::from::from_vec;
use lazyq_core::pair::{KeyValuePair, ValuePair};
use lazyq_core::seq::{buffer, Seq, Sequence, CONTINUE, STOP};
use lazyq_core::trace;

use crate::join;

pub trait SetOps<'a>: Sequence<'a> {
    /// True if some element equals `value`; stops at the first match.
    fn contains(&self, value: &Self::Item) -> bool
    where
        Self::Item: Equatable,
    {
        contains_by(self.as_seq(), value, &Equality::resolve())
    }

    fn contains_with<F>(&self, value: &Self::Item, comparer: F) -> bool
    where
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        contains_by(self.as_seq(), value, &Equality::explicit(comparer))
    }

    /// True if the source contains at least one of `values`. The source is
    /// traversed once, up to the first hit.
    fn contains_any<V>(&self, values: V) -> bool
    where
        V: IntoIterator<Item = Self::Item>,
        Self::Item: Equatable,
    {
        contains_any_by(self.as_seq(), values, &Equality::resolve())
    }

    fn contains_any_with<V, F>(&self, values: V, comparer: F) -> bool
    where
        V: IntoIterator<Item = Self::Item>,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        contains_any_by(self.as_seq(), values, &Equality::explicit(comparer))
    }

    /// True if the source contains every one of `values` (vacuously true for
    /// none). The source is traversed once, until every value has been seen.
    fn contains_all<V>(&self, values: V) -> bool
    where
        V: IntoIterator<Item = Self::Item>,
        Self::Item: Equatable,
    {
        contains_all_by(self.as_seq(), values, &Equality::resolve())
    }

    fn contains_all_with<V, F>(&self, values: V, comparer: F) -> bool
    where
        V: IntoIterator<Item = Self::Item>,
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        contains_all_by(self.as_seq(), values, &Equality::explicit(comparer))
    }

    /// First occurrence of every element, in source order.
    ///
    /// Each traversal keeps its own list of already-emitted elements and
    /// tests every candidate against it, so the cost is quadratic in the
    /// number of distinct elements.
    fn distinct(&self) -> Seq<'a, Self::Item>
    where
        Self::Item: Equatable + Clone,
    {
        distinct_by(self.as_seq().clone(), Equality::resolve())
    }

    fn distinct_with<F>(&self, comparer: F) -> Seq<'a, Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool + 'a,
        Self::Item: Clone,
    {
        distinct_by(self.as_seq().clone(), Equality::explicit(comparer))
    }

    /// Set difference: distinct elements of the source that do not appear in
    /// `other`.
    fn except(&self, other: &Seq<'a, Self::Item>) -> Seq<'a, Self::Item>
    where
        Self::Item: Equatable,
    {
        except_by(self.as_seq().clone(), other.clone(), Equality::resolve())
    }

    fn except_with<F>(&self, other: &Seq<'a, Self::Item>, comparer: F) -> Seq<'a, Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool + 'a,
    {
        except_by(self.as_seq().clone(), other.clone(), Equality::explicit(comparer))
    }

    /// Set intersection: distinct elements of the source that also appear in
    /// `other`, in source order.
    fn intersect(&self, other: &Seq<'a, Self::Item>) -> Seq<'a, Self::Item>
    where
        Self::Item: Equatable,
    {
        intersect_by(self.as_seq().clone(), other.clone(), Equality::resolve())
    }

    fn intersect_with<F>(&self, other: &Seq<'a, Self::Item>, comparer: F) -> Seq<'a, Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool + 'a,
    {
        intersect_by(self.as_seq().clone(), other.clone(), Equality::explicit(comparer))
    }

    /// Set union: distinct elements of the source, then the distinct elements
    /// of `other` not already emitted.
    fn union(&self, other: &Seq<'a, Self::Item>) -> Seq<'a, Self::Item>
    where
        Self::Item: Equatable,
    {
        union_by(self.as_seq().clone(), other.clone(), Equality::resolve())
    }

    fn union_with<F>(&self, other: &Seq<'a, Self::Item>, comparer: F) -> Seq<'a, Self::Item>
    where
        F: Fn(&Self::Item, &Self::Item) -> bool + 'a,
    {
        union_by(self.as_seq().clone(), other.clone(), Equality::explicit(comparer))
    }

    /// Pairwise equality of two sequences. The source is pushed, `other` is
    /// pulled in step; both stop at the first mismatch.
    fn sequence_equal(&self, other: &Seq<'a, Self::Item>) -> bool
    where
        Self::Item: Equatable,
    {
        sequence_equal_by(self.as_seq(), other, &Equality::resolve())
    }

    fn sequence_equal_with<F>(&self, other: &Seq<'a, Self::Item>, comparer: F) -> bool
    where
        F: Fn(&Self::Item, &Self::Item) -> bool,
    {
        sequence_equal_by(self.as_seq(), other, &Equality::explicit(comparer))
    }

    /// Pair elements positionally; ends with the shorter side. `other` is not
    /// opened until the first pair is requested.
    fn zip<U: 'a>(&self, other: &Seq<'a, U>) -> Seq<'a, ValuePair<Self::Item, U>> {
        let source = self.as_seq().clone();
        let other = other.clone();
        Seq::from_fn(move || {
            source
                .open()
                .zip(other.open_on_demand())
                .map(|(first, second)| ValuePair::new(first, second))
        })
    }

    /// Bucket elements by key. Groups are emitted in order of each key's first
    /// occurrence; each group keeps source order.
    fn group_by<K, F>(&self, key_selector: F) -> Seq<'a, KeyValuePair<K, Seq<'a, Self::Item>>>
    where
        K: Hash + Eq + 'a,
        F: Fn(&Self::Item) -> K + 'a,
        Self::Item: Clone,
    {
        let source = self.as_seq().clone();
        Seq::from_deferred(move || {
            let mut groups: IndexMap<K, Vec<Self::Item>> = IndexMap::new();
            for item in source.open() {
                groups.entry(key_selector(&item)).or_default().push(item);
            }
            trace::materialized("group_by", groups.len());
            groups
                .into_iter()
                .map(|(key, members)| KeyValuePair::new(key, from_vec(members)))
        })
    }

    /// Inner join on keys compared with the key type's own equality. Emits
    /// `result_selector(outer, inner)` for every matching pair, outer order
    /// first, inner order second.
    fn join<I, K, FO, FI, FR, R>(
        &self,
        inner: &Seq<'a, I>,
        outer_key: FO,
        inner_key: FI,
        result_selector: FR,
    ) -> Seq<'a, R>
    where
        I: 'a,
        K: Equatable + 'a,
        R: 'a,
        FO: Fn(&Self::Item) -> K + 'a,
        FI: Fn(&I) -> K + 'a,
        FR: Fn(&Self::Item, &I) -> R + 'a,
    {
        join::nested_loop(
            self.as_seq().clone(),
            inner.clone(),
            outer_key,
            inner_key,
            result_selector,
            Equality::resolve(),
        )
    }

    fn join_with<I, K, FO, FI, FR, R, C>(
        &self,
        inner: &Seq<'a, I>,
        outer_key: FO,
        inner_key: FI,
        result_selector: FR,
        comparer: C,
    ) -> Seq<'a, R>
    where
        I: 'a,
        K: 'a,
        R: 'a,
        FO: Fn(&Self::Item) -> K + 'a,
        FI: Fn(&I) -> K + 'a,
        FR: Fn(&Self::Item, &I) -> R + 'a,
        C: Fn(&K, &K) -> bool + 'a,
    {
        join::nested_loop(
            self.as_seq().clone(),
            inner.clone(),
            outer_key,
            inner_key,
            result_selector,
            Equality::explicit(comparer),
        )
    }

    /// [`SetOps::join`] for hashable keys: large inner sides are indexed by
    /// key instead of scanned per outer element. Output order is the same.
    fn join_hashed<I, K, FO, FI, FR, R>(
        &self,
        inner: &Seq<'a, I>,
        outer_key: FO,
        inner_key: FI,
        result_selector: FR,
    ) -> Seq<'a, R>
    where
        I: 'a,
        K: Hash + Eq + 'a,
        R: 'a,
        FO: Fn(&Self::Item) -> K + 'a,
        FI: Fn(&I) -> K + 'a,
        FR: Fn(&Self::Item, &I) -> R + 'a,
    {
        join::hashed(
            self.as_seq().clone(),
            inner.clone(),
            outer_key,
            inner_key,
            result_selector,
        )
    }
}

impl<'a, S: Sequence<'a> + ?Sized> SetOps<'a> for S {}

fn contains_by<'a, T: 'a>(source: &Seq<'a, T>, value: &T, equality: &Equality<'_, T>) -> bool {
    source
        .traverse(|item| {
            if equality.equal(&item, value) {
                STOP
            } else {
                CONTINUE
            }
        })
        .is_break()
}

fn contains_any_by<'a, T: 'a, V>(source: &Seq<'a, T>, values: V, equality: &Equality<'_, T>) -> bool
where
    V: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    if values.is_empty() {
        return false;
    }
    source
        .traverse(|item| {
            if values.iter().any(|value| equality.equal(&item, value)) {
                STOP
            } else {
                CONTINUE
            }
        })
        .is_break()
}

fn contains_all_by<'a, T: 'a, V>(source: &Seq<'a, T>, values: V, equality: &Equality<'_, T>) -> bool
where
    V: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    let mut found = vec![false; values.len()];
    let mut missing = values.len();
    if missing == 0 {
        return true;
    }
    let _ = source.traverse(|item| {
        for (idx, value) in values.iter().enumerate() {
            if !found[idx] && equality.equal(&item, value) {
                found[idx] = true;
                missing -= 1;
            }
        }
        if missing == 0 {
            STOP
        } else {
            CONTINUE
        }
    });
    missing == 0
}

/// Drain `items` keeping only the first occurrence of each element.
fn distinct_into<T>(items: impl IntoIterator<Item = T>, equality: &Equality<'_, T>) -> Vec<T> {
    let mut seen = buffer();
    for item in items {
        if !equality.any_equal(&seen, &item) {
            seen.push(item);
        }
    }
    seen
}

fn distinct_by<'a, T: Clone + 'a>(source: Seq<'a, T>, equality: Equality<'a, T>) -> Seq<'a, T> {
    Seq::from_fn(move || {
        let equality = equality.clone();
        let mut seen = buffer();
        source.open().filter(move |item| {
            if equality.any_equal(&seen, item) {
                false
            } else {
                seen.push(item.clone());
                true
            }
        })
    })
}

/// Distinct elements of both sides, each side drained once.
fn both_sides<'a, T: 'a>(
    op: &'static str,
    source: &Seq<'a, T>,
    other: &Seq<'a, T>,
    equality: &Equality<'a, T>,
) -> (Vec<T>, Vec<T>) {
    let left = distinct_into(source.open(), equality);
    let right = distinct_into(other.open(), equality);
    trace::materialized(op, left.len() + right.len());
    (left, right)
}

fn except_by<'a, T: 'a>(source: Seq<'a, T>, other: Seq<'a, T>, equality: Equality<'a, T>) -> Seq<'a, T> {
    Seq::from_deferred(move || {
        let (left, right) = both_sides("except", &source, &other, &equality);
        let equality = equality.clone();
        left.into_iter()
            .filter(move |item| !equality.any_equal(&right, item))
    })
}

fn intersect_by<'a, T: 'a>(source: Seq<'a, T>, other: Seq<'a, T>, equality: Equality<'a, T>) -> Seq<'a, T> {
    Seq::from_deferred(move || {
        let (left, right) = both_sides("intersect", &source, &other, &equality);
        let equality = equality.clone();
        left.into_iter()
            .filter(move |item| equality.any_equal(&right, item))
    })
}

fn union_by<'a, T: 'a>(source: Seq<'a, T>, other: Seq<'a, T>, equality: Equality<'a, T>) -> Seq<'a, T> {
    Seq::from_deferred(move || {
        let (mut left, right) = both_sides("union", &source, &other, &equality);
        let extra: Vec<T> = right
            .into_iter()
            .filter(|item| !equality.any_equal(&left, item))
            .collect();
        left.extend(extra);
        left
    })
}

fn sequence_equal_by<'a, T: 'a>(source: &Seq<'a, T>, other: &Seq<'a, T>, equality: &Equality<'_, T>) -> bool {
    let mut right = other.open();
    let flow = source.traverse(|item| match right.next() {
        Some(candidate) if equality.equal(&item, &candidate) => CONTINUE,
        _ => STOP,
    });
    flow.is_continue() && right.next().is_none()
}
