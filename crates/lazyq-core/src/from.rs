//! Container adapters and generators.
//!
//! Each adapter enumerates its elements once per traversal, in a defined
//! order: input order for slices, vectors and strings; the map's own
//! iteration order for associative containers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::pair::KeyValuePair;
use crate::seq::{Cursor, Seq};

pub fn from_slice<'a, T: Clone + 'a>(source: &'a [T]) -> Seq<'a, T> {
    Seq::from_fn(move || source.iter().cloned())
}

/// Owned variant of [`from_slice`]; the elements are shared between traversals.
pub fn from_vec<'a, T: Clone + 'a>(source: Vec<T>) -> Seq<'a, T> {
    let shared: Rc<[T]> = source.into();
    Seq::from_fn(move || {
        let shared = Rc::clone(&shared);
        (0..shared.len()).map(move |idx| shared[idx].clone())
    })
}

pub fn from_map<'a, K, V, S>(source: &'a HashMap<K, V, S>) -> Seq<'a, KeyValuePair<K, V>>
where
    K: Clone + 'a,
    V: Clone + 'a,
{
    Seq::from_fn(move || {
        source
            .iter()
            .map(|(key, value)| KeyValuePair::new(key.clone(), value.clone()))
    })
}

/// The characters of `source`, in order.
pub fn from_chars(source: &str) -> Seq<'_, char> {
    Seq::from_fn(move || source.chars())
}

/// Adapt any restartable iterator factory.
pub fn from_iter_fn<'a, F, I>(factory: F) -> Seq<'a, I::Item>
where
    F: Fn() -> I + 'a,
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
{
    Seq::from_fn(move || factory().into_iter())
}

/// Single-use producer: the first traversal drains `source`, every later
/// traversal is empty.
pub fn once<'a, I>(source: I) -> Seq<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    I::Item: 'a,
{
    let slot = RefCell::new(Some(source.into_iter()));
    let factory = move || match slot.borrow_mut().take() {
        Some(iter) => Cursor::new(iter),
        None => Cursor::empty(),
    };
    Seq::from_fn(factory)
}

pub fn empty<'a, T: 'a>() -> Seq<'a, T> {
    Seq::from_fn(std::iter::empty)
}

/// `element`, `count` times. A non-positive count yields nothing.
pub fn repeat<'a, T: Clone + 'a>(element: T, count: isize) -> Seq<'a, T> {
    let count = usize::try_from(count).unwrap_or(0);
    Seq::from_fn(move || std::iter::repeat(element.clone()).take(count))
}

/// `count` sequential integers starting at `start`.
pub fn range<'a>(start: i64, count: i64) -> Seq<'a, i64> {
    let count = count.max(0);
    Seq::from_fn(move || (0..count).map(move |offset| start.wrapping_add(offset)))
}
