//! Numeric/text bounds for `sum` and `average`.
//!
//! The set of summable kinds is closed: every integer width (wrapping on
//! overflow), both float widths, and `String` (concatenation).

use num_traits::{AsPrimitive, WrappingAdd, Zero};

pub trait Summable: Sized {
    fn zero() -> Self;
    fn plus(self, other: Self) -> Self;
}

macro_rules! integer_sum {
    ($($t:ty),*) => {
        $(
            impl Summable for $t {
                fn zero() -> Self {
                    Zero::zero()
                }

                fn plus(self, other: Self) -> Self {
                    WrappingAdd::wrapping_add(&self, &other)
                }
            }
        )*
    };
}

integer_sum!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Summable for f32 {
    fn zero() -> Self {
        0.0
    }

    fn plus(self, other: Self) -> Self {
        self + other
    }
}

impl Summable for f64 {
    fn zero() -> Self {
        0.0
    }

    fn plus(self, other: Self) -> Self {
        self + other
    }
}

impl Summable for String {
    fn zero() -> Self {
        String::new()
    }

    fn plus(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

/// Real-valued kinds accepted by `average`.
pub trait Real: AsPrimitive<f64> {}

impl<T: AsPrimitive<f64>> Real for T {}
