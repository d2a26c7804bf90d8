//! Inner-join cursor.
//!
//! The inner side is drained once per traversal, on the first outer element,
//! into an [`InnerLookup`]. Each outer element then walks the lookup for its
//! matches one result at a time, so a consumer that stops mid-group never
//! triggers a further `result_selector` call.

use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::compare::Equality;
use lazyq_core::config;
use lazyq_core::seq::{buffer, Cursor, Seq};
use lazyq_core::trace;

/// Matches for one outer key, addressed by position so a cursor can resume.
trait InnerLookup<K, I> {
    /// The first match at or after `from`, with its position.
    fn next_match(&self, key: &K, from: usize) -> Option<(usize, &I)>;
}

/// Nested-loop lookup: every probe scans the rows with the resolved equality.
struct ScanLookup<'c, K, I> {
    rows: Vec<(K, I)>,
    equality: Equality<'c, K>,
}

impl<'c, K: 'c, I> InnerLookup<K, I> for ScanLookup<'c, K, I> {
    fn next_match(&self, key: &K, from: usize) -> Option<(usize, &I)> {
        self.rows
            .get(from..)?
            .iter()
            .position(|(inner_key, _)| self.equality.equal(key, inner_key))
            .map(|offset| (from + offset, &self.rows[from + offset].1))
    }
}

/// Hash index over the inner side; each bucket keeps inner order.
struct HashLookup<K, I> {
    buckets: HashMap<K, Vec<I>>,
}

impl<K: Hash + Eq, I> HashLookup<K, I> {
    fn new(rows: Vec<(K, I)>) -> Self {
        let mut buckets: HashMap<K, Vec<I>> = HashMap::with_capacity(rows.len());
        for (key, item) in rows {
            buckets.entry(key).or_default().push(item);
        }
        Self { buckets }
    }
}

impl<K: Hash + Eq, I> InnerLookup<K, I> for HashLookup<K, I> {
    fn next_match(&self, key: &K, from: usize) -> Option<(usize, &I)> {
        self.buckets.get(key)?.get(from).map(|item| (from, item))
    }
}

type Lookup<'a, K, I> = Box<dyn InnerLookup<K, I> + 'a>;
type BuildLookup<'a, K, I> = dyn Fn() -> Lookup<'a, K, I> + 'a;

struct JoinCursor<'a, O, I, K, R> {
    outer: Cursor<'a, O>,
    build: Rc<BuildLookup<'a, K, I>>,
    lookup: Option<Lookup<'a, K, I>>,
    outer_key: Rc<dyn Fn(&O) -> K + 'a>,
    result_selector: Rc<dyn Fn(&O, &I) -> R + 'a>,
    current: Option<(O, K)>,
    position: usize,
}

impl<O, I, K, R> Iterator for JoinCursor<'_, O, I, K, R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        loop {
            if let (Some((item, key)), Some(lookup)) = (&self.current, &self.lookup) {
                if let Some((position, inner)) = lookup.next_match(key, self.position) {
                    self.position = position + 1;
                    return Some((self.result_selector)(item, inner));
                }
            }
            let item = self.outer.next()?;
            if self.lookup.is_none() {
                self.lookup = Some((self.build)());
            }
            let key = (self.outer_key)(&item);
            self.current = Some((item, key));
            self.position = 0;
        }
    }
}

fn keyed_rows<'a, I: 'a, K>(op: &'static str, inner: &Seq<'a, I>, inner_key: &dyn Fn(&I) -> K) -> Vec<(K, I)> {
    let mut rows = buffer();
    rows.extend(inner.open().map(|item| (inner_key(&item), item)));
    trace::materialized(op, rows.len());
    rows
}

fn join_seq<'a, O, I, K, R>(
    outer: Seq<'a, O>,
    build: Rc<BuildLookup<'a, K, I>>,
    outer_key: Rc<dyn Fn(&O) -> K + 'a>,
    result_selector: Rc<dyn Fn(&O, &I) -> R + 'a>,
) -> Seq<'a, R>
where
    O: 'a,
    I: 'a,
    K: 'a,
    R: 'a,
{
    Seq::from_fn(move || JoinCursor {
        outer: outer.open(),
        build: Rc::clone(&build),
        lookup: None,
        outer_key: Rc::clone(&outer_key),
        result_selector: Rc::clone(&result_selector),
        current: None,
        position: 0,
    })
}

/// Join by scanning the inner rows with `equality` for every outer element.
pub(crate) fn nested_loop<'a, O, I, K, R, FO, FI, FR>(
    outer: Seq<'a, O>,
    inner: Seq<'a, I>,
    outer_key: FO,
    inner_key: FI,
    result_selector: FR,
    equality: Equality<'a, K>,
) -> Seq<'a, R>
where
    O: 'a,
    I: 'a,
    K: 'a,
    R: 'a,
    FO: Fn(&O) -> K + 'a,
    FI: Fn(&I) -> K + 'a,
    FR: Fn(&O, &I) -> R + 'a,
{
    let build: Rc<BuildLookup<'a, K, I>> = Rc::new(move || {
        Box::new(ScanLookup {
            rows: keyed_rows("join", &inner, &inner_key),
            equality: equality.clone(),
        }) as Lookup<'a, K, I>
    });
    join_seq(outer, build, Rc::new(outer_key), Rc::new(result_selector))
}

/// Join through a hash index when the inner side has at least
/// `hash_join_min_inner` rows; smaller inner sides are scanned with `==`.
pub(crate) fn hashed<'a, O, I, K, R, FO, FI, FR>(
    outer: Seq<'a, O>,
    inner: Seq<'a, I>,
    outer_key: FO,
    inner_key: FI,
    result_selector: FR,
) -> Seq<'a, R>
where
    O: 'a,
    I: 'a,
    K: Hash + Eq + 'a,
    R: 'a,
    FO: Fn(&O) -> K + 'a,
    FI: Fn(&I) -> K + 'a,
    FR: Fn(&O, &I) -> R + 'a,
{
    let build: Rc<BuildLookup<'a, K, I>> = Rc::new(move || {
        let rows = keyed_rows("join_hashed", &inner, &inner_key);
        if rows.len() >= config::current().hash_join_min_inner {
            Box::new(HashLookup::new(rows)) as Lookup<'a, K, I>
        } else {
            Box::new(ScanLookup {
                rows,
                equality: Equality::explicit(|left: &K, right: &K| left == right),
            }) as Lookup<'a, K, I>
        }
    });
    join_seq(outer, build, Rc::new(outer_key), Rc::new(result_selector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_lookup_resumes_after_position() {
        let lookup = ScanLookup {
            rows: vec![(1, 'a'), (2, 'b'), (1, 'c')],
            equality: Equality::explicit(|a: &i32, b: &i32| a == b),
        };
        assert_eq!(lookup.next_match(&1, 0), Some((0, &'a')));
        assert_eq!(lookup.next_match(&1, 1), Some((2, &'c')));
        assert_eq!(lookup.next_match(&1, 3), None);
        assert_eq!(lookup.next_match(&1, 9), None);
    }

    #[test]
    fn test_hash_lookup_keeps_inner_order() {
        let lookup = HashLookup::new(vec![(1, 'a'), (2, 'b'), (1, 'c')]);
        assert_eq!(lookup.next_match(&1, 0), Some((0, &'a')));
        assert_eq!(lookup.next_match(&1, 1), Some((1, &'c')));
        assert_eq!(lookup.next_match(&1, 2), None);
        assert_eq!(lookup.next_match(&3, 0), None);
    }
}
