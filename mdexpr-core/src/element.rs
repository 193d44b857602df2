use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

#[cfg(feature = "bfloat")]
use half::bf16;
#[cfg(feature = "half")]
use half::f16;

/// Types that can live inside an array or flow out of an expression.
///
/// `MIN`/`MAX` are the true least and greatest values and seed the
/// `max`/`min` reductions.
pub trait Element:
    Copy + Clone + Debug + PartialEq + PartialOrd + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;
}

/// Elements with the four arithmetic operations, as required by the
/// arithmetic operator sugar and by matmul's multiply-accumulate.
pub trait Numeric:
    Element
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
}

impl<T> Numeric for T where
    T: Element
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
{
}

macro_rules! element {
    ($t:ty, $zero:expr, $one:expr) => {
        impl Element for $t {
            const ZERO: Self = $zero;
            const ONE: Self = $one;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
        }
    };
}

element!(u8, 0, 1);
element!(u32, 0, 1);
element!(i32, 0, 1);
element!(i64, 0, 1);
element!(f32, 0.0, 1.0);
element!(f64, 0.0, 1.0);
#[cfg(feature = "half")]
element!(f16, f16::ZERO, f16::ONE);
#[cfg(feature = "bfloat")]
element!(bf16, bf16::ZERO, bf16::ONE);

impl Element for bool {
    const ZERO: Self = false;
    const ONE: Self = true;
    const MIN: Self = false;
    const MAX: Self = true;
}
