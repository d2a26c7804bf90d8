//! Equality and ordering resolution.
//!
//! Every operator that needs "are these equal" or "which comes first" resolves
//! the question once per call, in this precedence:
//!
//! 1. an explicit comparer passed to the `*_with` form of the operator;
//! 2. the element type's own [`Equatable`] / [`Comparable`] implementation;
//! 3. the structural fallback those traits carry for the built-in kinds
//!    (deep `PartialEq` for scalars and containers, natural ordering for the
//!    closed set of integer, float and text kinds).
//!
//! An element type with neither a comparer nor an implementation is rejected
//! at compile time, so the precondition failure of a runtime type switch never
//! reaches execution.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Self-describing equality capability.
pub trait Equatable {
    /// Called on the already-seen (left-hand) element with the candidate.
    fn equals(&self, other: &Self) -> bool;
}

/// Self-describing three-way ordering capability.
pub trait Comparable {
    fn compare(&self, other: &Self) -> Ordering;
}

/// Implement [`Equatable`] through `PartialEq` (deep structural equality).
///
/// ```
/// #[derive(PartialEq)]
/// struct Point { x: i32, y: i32 }
/// lazyq_core::structural_equality!(Point);
/// ```
#[macro_export]
macro_rules! structural_equality {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::compare::Equatable for $t {
                #[inline]
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

/// Implement [`Comparable`] through `Ord`.
#[macro_export]
macro_rules! natural_ordering {
    ($($t:ty),* $(,)?) => {
        $(
            impl $crate::compare::Comparable for $t {
                #[inline]
                fn compare(&self, other: &Self) -> ::std::cmp::Ordering {
                    ::std::cmp::Ord::cmp(self, other)
                }
            }
        )*
    };
}

structural_equality!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, str, (),
);

natural_ordering!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, str);

macro_rules! float_ordering {
    ($($t:ty),*) => {
        $(
            impl Comparable for $t {
                /// NaN sorts after every number and equal to itself.
                fn compare(&self, other: &Self) -> Ordering {
                    match (self.is_nan(), other.is_nan()) {
                        (true, true) => Ordering::Equal,
                        (true, false) => Ordering::Greater,
                        (false, true) => Ordering::Less,
                        (false, false) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
                    }
                }
            }
        )*
    };
}

float_ordering!(f32, f64);

impl<T: Equatable> Equatable for [T] {
    fn equals(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.equals(b))
    }
}

impl<T: Equatable, const N: usize> Equatable for [T; N] {
    fn equals(&self, other: &Self) -> bool {
        self[..].equals(&other[..])
    }
}

impl<T: Equatable> Equatable for Vec<T> {
    fn equals(&self, other: &Self) -> bool {
        self.as_slice().equals(other.as_slice())
    }
}

impl<T: Equatable> Equatable for Option<T> {
    fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.equals(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Equatable + ?Sized> Equatable for &T {
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }
}

impl<T: Equatable + ?Sized> Equatable for Box<T> {
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }
}

impl<T: Equatable + ?Sized> Equatable for Rc<T> {
    fn equals(&self, other: &Self) -> bool {
        (**self).equals(&**other)
    }
}

impl<T: Comparable + ?Sized> Comparable for &T {
    fn compare(&self, other: &Self) -> Ordering {
        (**self).compare(&**other)
    }
}

macro_rules! tuple_equality {
    ($(($($name:ident $idx:tt),+))*) => {
        $(
            impl<$($name: Equatable),+> Equatable for ($($name,)+) {
                fn equals(&self, other: &Self) -> bool {
                    $(self.$idx.equals(&other.$idx))&&+
                }
            }
        )*
    };
}

tuple_equality! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
}

/// Which tier of the resolution chain a strategy was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A caller-supplied comparer.
    Explicit,
    /// The element type's own capability (or its structural fallback).
    Element,
}

/// Equality strategy, resolved once per operator invocation.
pub struct Equality<'c, T> {
    test: Rc<dyn Fn(&T, &T) -> bool + 'c>,
    resolution: Resolution,
}

impl<'c, T: 'c> Equality<'c, T> {
    pub fn explicit<F>(comparer: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'c,
    {
        Self {
            test: Rc::new(comparer),
            resolution: Resolution::Explicit,
        }
    }

    pub fn resolve() -> Self
    where
        T: Equatable,
    {
        Self {
            test: Rc::new(|left: &T, right: &T| left.equals(right)),
            resolution: Resolution::Element,
        }
    }

    /// An explicit comparer, if present, always wins.
    pub fn or_resolve<F>(comparer: Option<F>) -> Self
    where
        T: Equatable,
        F: Fn(&T, &T) -> bool + 'c,
    {
        match comparer {
            Some(comparer) => Self::explicit(comparer),
            None => Self::resolve(),
        }
    }

    #[inline]
    pub fn equal(&self, left: &T, right: &T) -> bool {
        (self.test)(left, right)
    }

    /// True if any element of `seen` equals `candidate`; `seen` is the left side.
    pub fn any_equal(&self, seen: &[T], candidate: &T) -> bool {
        seen.iter().any(|item| self.equal(item, candidate))
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl<T> Clone for Equality<'_, T> {
    fn clone(&self) -> Self {
        Self {
            test: Rc::clone(&self.test),
            resolution: self.resolution,
        }
    }
}

impl<T> fmt::Debug for Equality<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equality")
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

/// Three-way ordering strategy, resolved once per operator invocation.
pub struct Comparison<'c, T> {
    compare: Rc<dyn Fn(&T, &T) -> Ordering + 'c>,
    resolution: Resolution,
    descending: bool,
}

impl<'c, T: 'c> Comparison<'c, T> {
    pub fn explicit<F>(comparer: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'c,
    {
        Self {
            compare: Rc::new(comparer),
            resolution: Resolution::Explicit,
            descending: false,
        }
    }

    pub fn resolve() -> Self
    where
        T: Comparable,
    {
        Self {
            compare: Rc::new(|left: &T, right: &T| left.compare(right)),
            resolution: Resolution::Element,
            descending: false,
        }
    }

    /// An explicit comparer, if present, always wins.
    pub fn or_resolve<F>(comparer: Option<F>) -> Self
    where
        T: Comparable,
        F: Fn(&T, &T) -> Ordering + 'c,
    {
        match comparer {
            Some(comparer) => Self::explicit(comparer),
            None => Self::resolve(),
        }
    }

    /// The same strategy with its direction flipped.
    pub fn reversed(mut self) -> Self {
        self.descending = !self.descending;
        self
    }

    #[inline]
    pub fn compare(&self, left: &T, right: &T) -> Ordering {
        let ord = (self.compare)(left, right);
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl<T> Clone for Comparison<'_, T> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
            resolution: self.resolution,
            descending: self.descending,
        }
    }
}

impl<T> fmt::Debug for Comparison<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparison")
            .field("resolution", &self.resolution)
            .field("descending", &self.descending)
            .finish_non_exhaustive()
    }
}
