/// Approximate comparisons for the float types of the calculations.
///
/// Strain values come out of long chains of float math, so equality is only
/// meaningful up to one epsilon.
pub trait FloatExt: Copy {
    /// Whether `self` and `other` differ by less than the type's epsilon.
    fn eq(self, other: Self) -> bool;

    /// Whether `self` and `other` differ by at least the type's epsilon.
    fn not_eq(self, other: Self) -> bool;
}

macro_rules! impl_float_ext {
    ( $( $ty:ty ),* ) => {
        $(
            impl FloatExt for $ty {
                fn eq(self, other: Self) -> bool {
                    (self - other).abs() < <$ty>::EPSILON
                }

                fn not_eq(self, other: Self) -> bool {
                    !self.eq(other)
                }
            }
        )*
    };
}

impl_float_ext!(f32, f64);
