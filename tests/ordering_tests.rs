//! Ordering operator tests: min/max, stable sorts and reverse.

use std::cmp::Ordering;

use lazyq::prelude::*;
use pretty_assertions::assert_eq;

/// Ordered by rank only; the label rides along.
#[derive(Debug, Clone, PartialEq)]
struct Ranked {
    rank: u8,
    label: &'static str,
}

impl Comparable for Ranked {
    fn compare(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

fn ranked(items: &[(u8, &'static str)]) -> Vec<Ranked> {
    items
        .iter()
        .map(|&(rank, label)| Ranked { rank, label })
        .collect()
}

fn labels(items: Vec<Ranked>) -> Vec<&'static str> {
    items.into_iter().map(|item| item.label).collect()
}

#[test]
fn test_min_max() {
    let source = from_slice(&[4, -2, 9, 0]);
    assert_eq!(source.min(), Ok(-2));
    assert_eq!(source.max(), Ok(9));
    assert_eq!(source.min_max(), Ok((-2, 9)));
    assert_eq!(source.max_with(|a: &i32, b: &i32| b.cmp(a)), Ok(-2));
    assert_eq!(source.min_max_with(|a: &i32, b: &i32| a.abs().cmp(&b.abs())), Ok((0, 9)));

    assert_eq!(empty::<i32>().min(), Err(SeqError::EmptySource));
    assert_eq!(empty::<i32>().max(), Err(SeqError::EmptySource));
    assert_eq!(empty::<i32>().min_max(), Err(SeqError::EmptySource));
}

#[test]
fn test_min_max_text_and_floats() {
    let words = from_vec(vec!["pear".to_string(), "apple".to_string(), "zucchini".to_string()]);
    assert_eq!(words.min(), Ok("apple".to_string()));
    assert_eq!(words.max(), Ok("zucchini".to_string()));

    let floats = from_slice(&[2.5f64, f64::NAN, -1.0]);
    assert_eq!(floats.min(), Ok(-1.0));
    assert!(floats.max().unwrap().is_nan());
}

#[test]
fn test_min_max_keep_first_on_ties() {
    let items = from_vec(ranked(&[(2, "a"), (1, "b"), (2, "c"), (1, "d")]));
    assert_eq!(items.min().unwrap().label, "b");
    assert_eq!(items.max().unwrap().label, "a");
    let (low, high) = items.min_max().unwrap();
    assert_eq!((low.label, high.label), ("b", "a"));
}

#[test]
fn test_order_and_descending() {
    let source = from_slice(&[3, 1, 2, 5, 4]);
    assert_eq!(source.order().to_vec(), vec![1, 2, 3, 4, 5]);
    assert_eq!(source.order_descending().to_vec(), vec![5, 4, 3, 2, 1]);
    assert_eq!(
        source.order_with(|a: &i32, b: &i32| (a % 2).cmp(&(b % 2))).to_vec(),
        vec![2, 4, 3, 1, 5]
    );
    assert_eq!(
        source.order_descending_with(|a: &i32, b: &i32| (a % 2).cmp(&(b % 2))).to_vec(),
        vec![3, 1, 5, 2, 4]
    );
}

#[test]
fn test_order_uses_capability_and_is_stable() {
    let items = from_vec(ranked(&[(2, "a"), (1, "b"), (2, "c"), (1, "d"), (0, "e")]));
    assert_eq!(labels(items.order().to_vec()), vec!["e", "b", "d", "a", "c"]);
    assert_eq!(
        labels(items.order_descending().to_vec()),
        vec!["a", "c", "b", "d", "e"]
    );
}

#[test]
fn test_order_by_projects_key_once() {
    let calls = std::cell::Cell::new(0);
    let words = from_slice(&["ccc", "a", "bb", "dd", "e"]);
    let sorted = words
        .order_by(|w| {
            calls.set(calls.get() + 1);
            w.len()
        })
        .to_vec();
    assert_eq!(sorted, vec!["a", "e", "bb", "dd", "ccc"]);
    assert_eq!(calls.get(), 5);

    let sorted = words.order_by_descending(|w| w.len()).to_vec();
    assert_eq!(sorted, vec!["ccc", "bb", "dd", "a", "e"]);
}

#[test]
fn test_order_by_with_comparer() {
    let words = from_slice(&["b", "C", "a", "D"]);
    let by_text = |a: &String, b: &String| a.cmp(b);
    assert_eq!(
        words.order_by_with(|w| w.to_lowercase(), by_text).to_vec(),
        vec!["a", "b", "C", "D"]
    );
    assert_eq!(
        words
            .order_by_descending_with(|w| w.to_lowercase(), by_text)
            .to_vec(),
        vec!["D", "C", "b", "a"]
    );
}

#[test]
fn test_order_is_lazy_and_restartable() {
    let source = from_slice(&[2, 1]).order();
    assert_eq!(source.to_vec(), vec![1, 2]);
    assert_eq!(source.to_vec(), vec![1, 2]);
    assert_eq!(once(vec![3, 1, 2]).order().to_vec(), vec![1, 2, 3]);
}

#[test]
fn test_reverse() {
    assert_eq!(from_slice(&[1, 2, 3]).reverse().to_vec(), vec![3, 2, 1]);
    assert_eq!(empty::<i32>().reverse().count(), 0);
}
