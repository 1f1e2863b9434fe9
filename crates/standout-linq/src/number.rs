//! Numeric values for `sum` and `average`.
//!
//! [`Number`] keeps integers and floats apart until they are folded into
//! an `f64` accumulator. [`Numeric`] is the capability an element type
//! needs for the selector-less `sum()` / `average()` forms.

/// A numeric projection, kept in its native width until it is summed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for accumulation.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Types whose values can be summed without a selector.
///
/// Returning `None` marks a value as not numeric; `sum()` and
/// `average()` report it as [`QueryError::NotNumeric`](crate::QueryError::NotNumeric).
///
/// # Example
///
/// ```
/// use standout_linq::{Numeric, Number};
///
/// struct Celsius(f32);
///
/// impl Numeric for Celsius {
///     fn to_number(&self) -> Option<Number> {
///         Some(Number::from(self.0))
///     }
/// }
/// ```
pub trait Numeric {
    /// Returns the numeric value, or `None` if there is none.
    fn to_number(&self) -> Option<Number>;
}

macro_rules! numeric_primitive {
    ($($t:ty),+) => {
        $(
            impl Numeric for $t {
                fn to_number(&self) -> Option<Number> {
                    Some(Number::from(*self))
                }
            }
        )+
    };
}

numeric_primitive!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Numeric for Number {
    fn to_number(&self) -> Option<Number> {
        Some(*self)
    }
}

impl<N: Numeric> Numeric for Option<N> {
    fn to_number(&self) -> Option<Number> {
        self.as_ref().and_then(Numeric::to_number)
    }
}

impl<N: Numeric + ?Sized> Numeric for &N {
    fn to_number(&self) -> Option<Number> {
        (**self).to_number()
    }
}
