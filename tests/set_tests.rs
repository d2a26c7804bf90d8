//! Set and relational operator tests.

use std::cell::Cell;

use lazyq::prelude::*;
use lazyq::structural_equality;
use pretty_assertions::assert_eq;

/// Equal when the names match ignoring ASCII case.
#[derive(Debug, Clone)]
struct Tag(&'static str);

impl Equatable for Tag {
    fn equals(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

structural_equality!(Point);

fn names(tags: Vec<Tag>) -> Vec<&'static str> {
    tags.into_iter().map(|tag| tag.0).collect()
}

#[test]
fn test_except_is_set_difference() {
    let source = from_slice(&[1, 2, 3, 1, 2, 3]);
    let other = from_slice(&[1, 2, 1, 1]);
    assert_eq!(source.except(&other).to_vec(), vec![3]);
    assert_eq!(source.except(&empty()).to_vec(), vec![1, 2, 3]);
    assert_eq!(empty::<i32>().except(&other).to_vec(), Vec::<i32>::new());
}

#[test]
fn test_intersect() {
    let source = from_slice(&[1, 2, 3, 1, 2, 3]);
    let other = from_slice(&[1, 2, 1, 1]);
    assert_eq!(source.intersect(&other).to_vec(), vec![1, 2]);
    assert_eq!(other.intersect(&source).to_vec(), vec![1, 2]);
}

#[test]
fn test_union() {
    let source = from_slice(&[1, 2, 2, 3]);
    let other = from_slice(&[3, 4, 1, 5, 4]);
    assert_eq!(source.union(&other).to_vec(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_set_ops_drain_single_use_sides_once() {
    let left = once(vec![1, 2, 3, 1, 2, 3]);
    let right = once(vec![1, 2, 1, 1]);
    assert_eq!(left.except(&right).to_vec(), vec![3]);

    let left = once(vec![1, 2, 3]);
    let right = once(vec![2, 3, 4]);
    assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn test_explicit_comparer_wins() {
    let source = from_slice(&[11, 21, 12, 3]);
    let by_last_digit = |a: &i32, b: &i32| a % 10 == b % 10;
    assert_eq!(source.distinct_with(by_last_digit).to_vec(), vec![11, 12, 3]);
    assert_eq!(source.distinct().to_vec(), vec![11, 21, 12, 3]);
    assert!(source.contains_with(&31, by_last_digit));
    assert!(!source.contains(&31));
    assert_eq!(
        source.except_with(&from_slice(&[1]), by_last_digit).to_vec(),
        vec![12, 3]
    );
    assert_eq!(
        source.intersect_with(&from_slice(&[2]), by_last_digit).to_vec(),
        vec![12]
    );
    assert_eq!(
        source.union_with(&from_slice(&[31, 4]), by_last_digit).to_vec(),
        vec![11, 12, 3, 4]
    );
}

#[test]
fn test_capability_equality() {
    let tags = from_vec(vec![Tag("rust"), Tag("Go"), Tag("RUST"), Tag("go"), Tag("zig")]);
    assert_eq!(names(tags.distinct().to_vec()), vec!["rust", "Go", "zig"]);
    assert!(tags.contains(&Tag("ZIG")));
    assert!(tags.sequence_equal(&from_vec(vec![
        Tag("Rust"),
        Tag("go"),
        Tag("rust"),
        Tag("GO"),
        Tag("Zig"),
    ])));
}

#[test]
fn test_structural_equality() {
    let points = from_vec(vec![
        Point { x: 1, y: 2 },
        Point { x: 1, y: 2 },
        Point { x: 2, y: 1 },
    ]);
    assert_eq!(points.distinct().count(), 2);

    let nested = from_vec(vec![vec![1, 2], vec![1, 2], vec![]]);
    assert_eq!(nested.distinct().to_vec(), vec![vec![1, 2], vec![]]);
    assert!(nested.contains(&vec![]));
}

#[test]
fn test_contains_any_and_all() {
    let source = from_slice(&[1, 2, 3, 4]);
    assert!(source.contains_any([9, 3]));
    assert!(!source.contains_any([9, 8]));
    assert!(!source.contains_any(Vec::<i32>::new()));
    assert!(source.contains_all([4, 1]));
    assert!(!source.contains_all([4, 5]));
    assert!(source.contains_all(Vec::<i32>::new()));
    assert!(source.contains_any_with([13], |a, b| a % 10 == b % 10));
    assert!(source.contains_all_with([11, 12], |a, b| a % 10 == b % 10));
}

#[test]
fn test_contains_stops_at_first_match() {
    let pulled = Cell::new(0);
    let counter = &pulled;
    let source = Seq::from_fn(move || (1..=10).inspect(move |_| counter.set(counter.get() + 1)));
    assert!(source.contains(&3));
    assert_eq!(pulled.get(), 3);

    pulled.set(0);
    assert!(source.contains_all([2, 4]));
    assert_eq!(pulled.get(), 4);
}

#[test]
fn test_distinct_is_lazy() {
    let pulled = Cell::new(0);
    let counter = &pulled;
    let source = Seq::from_fn(move || [1, 1, 2, 3, 3].into_iter().inspect(move |_| counter.set(counter.get() + 1)));
    assert_eq!(source.distinct().take(2).to_vec(), vec![1, 2]);
    assert_eq!(pulled.get(), 3);
}

#[test]
fn test_sequence_equal() {
    let source = from_slice(&[1, 2, 3]);
    assert!(source.sequence_equal(&source));
    assert!(source.sequence_equal(&range(1, 3).map(|n| n as i32)));
    assert!(!source.sequence_equal(&from_slice(&[1, 2])));
    assert!(!source.sequence_equal(&from_slice(&[1, 2, 3, 4])));
    assert!(!source.sequence_equal(&from_slice(&[1, 5, 3])));
    assert!(empty::<i32>().sequence_equal(&empty()));
    assert!(source.sequence_equal_with(&from_slice(&[11, 12, 13]), |a, b| a % 10 == b % 10));
}

#[test]
fn test_zip_truncates_to_shorter() {
    let numbers = from_slice(&[1, 2, 3]);
    let letters = from_chars("ab");
    let pairs: Vec<(i32, char)> = numbers.zip(&letters).map(ValuePair::into_tuple).to_vec();
    assert_eq!(pairs, vec![(1, 'a'), (2, 'b')]);
    assert_eq!(letters.zip(&numbers).count(), 2);
    assert_eq!(empty::<i32>().zip(&letters).count(), 0);
}

#[test]
fn test_zip_opens_right_side_only_when_paired() {
    let pulled = Cell::new(0);
    let counter = &pulled;
    let right = Seq::from_fn(move || (1..=10).inspect(move |_| counter.set(counter.get() + 1)));

    assert_eq!(empty::<i32>().zip(&right).count(), 0);
    assert_eq!(pulled.get(), 0);

    assert_eq!(from_slice(&[7]).zip(&right).count(), 1);
    assert_eq!(pulled.get(), 1);
}

#[test]
fn test_group_by_keeps_first_occurrence_order() {
    let words = from_slice(&["bob", "alice", "bill", "anna", "carl"]);
    let groups: Vec<(char, Vec<&str>)> = words
        .group_by(|w| w.chars().next().unwrap_or_default())
        .map(|group| (group.key, group.value.to_vec()))
        .to_vec();
    assert_eq!(
        groups,
        vec![
            ('b', vec!["bob", "bill"]),
            ('a', vec!["alice", "anna"]),
            ('c', vec!["carl"]),
        ]
    );
}

#[derive(Debug, Clone)]
struct Person {
    id: u32,
    name: &'static str,
}

#[derive(Debug, Clone)]
struct Pet {
    owner: u32,
    name: &'static str,
}

fn people<'a>() -> Seq<'a, Person> {
    from_vec(vec![
        Person { id: 1, name: "ada" },
        Person { id: 2, name: "brian" },
        Person { id: 3, name: "cleo" },
    ])
}

fn pets<'a>() -> Seq<'a, Pet> {
    from_vec(vec![
        Pet { owner: 3, name: "rex" },
        Pet { owner: 1, name: "tom" },
        Pet { owner: 3, name: "kit" },
        Pet { owner: 9, name: "stray" },
    ])
}

fn expected_pairs() -> Vec<(&'static str, &'static str)> {
    vec![("ada", "tom"), ("cleo", "rex"), ("cleo", "kit")]
}

#[test]
fn test_join_nested_loop() {
    let pairs = people()
        .join(&pets(), |p| p.id, |pet| pet.owner, |p, pet| (p.name, pet.name))
        .to_vec();
    assert_eq!(pairs, expected_pairs());
}

#[test]
fn test_join_with_comparer() {
    let pairs = people()
        .join_with(
            &pets(),
            |p| p.id,
            |pet| pet.owner,
            |p, pet| (p.name, pet.name),
            |outer, inner| outer % 3 == inner % 3,
        )
        .to_vec();
    assert_eq!(
        pairs,
        vec![
            ("ada", "tom"),
            ("cleo", "rex"),
            ("cleo", "kit"),
            ("cleo", "stray"),
        ]
    );
}

#[test]
fn test_join_hashed_matches_nested_loop() {
    let small = people()
        .join_hashed(&pets(), |p| p.id, |pet| pet.owner, |p, pet| (p.name, pet.name))
        .to_vec();
    assert_eq!(small, expected_pairs());

    // Enough inner rows to cross the default indexing threshold.
    let many_pets = range(0, 200).map(|n| Pet {
        owner: (n % 5) as u32,
        name: "many",
    });
    let hashed = people()
        .join_hashed(&many_pets, |p| p.id, |pet| pet.owner, |p, _| p.id)
        .to_vec();
    let scanned = people()
        .join(&many_pets, |p| p.id, |pet| pet.owner, |p, _| p.id)
        .to_vec();
    assert_eq!(hashed.len(), 120);
    assert_eq!(hashed, scanned);
}

#[test]
fn test_join_stops_without_extra_results() {
    let calls = Cell::new(0);
    let first = people()
        .join(&pets(), |p| p.id, |pet| pet.owner, |p, _| {
            calls.set(calls.get() + 1);
            p.id
        })
        .first();
    assert_eq!(first, Ok(1));
    assert_eq!(calls.get(), 1);
}
