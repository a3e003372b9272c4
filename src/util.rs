//! Misc stuff.

use std::ops::Range;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Signed;


pub(crate) trait RangeExt {

    /// Returns whether this value exists within the given range of values.
    fn is_within(&self, range: Range<Self>) -> bool where Self: Sized;
}

// Define RangeExt on *anything* that can be compared, though it’s only
// really ever used for numeric ranges...

impl<T> RangeExt for T where T: PartialOrd<T> {
    fn is_within(&self, range: Range<Self>) -> bool {
        *self >= range.start && *self < range.end
    }
}


/// Split a number of periods into a number of whole cycles, and the
/// number of periods left over that don’t fit into a cycle.
///
/// This is essentially a division operation with the result and the
/// remainder, with the difference that a negative value gets ‘wrapped
/// around’ to be a positive value, owing to the way the modulo operator
/// works for negative values.
pub(crate) fn split_cycles<N: Integer>(number_of_periods: N, cycle_length: N) -> (N, N) {
    number_of_periods.div_mod_floor(&cycle_length)
}

/// An exact rational holding the given whole number.
pub(crate) fn whole(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// An exact rational holding `numer / denom`. The denominator must not
/// be zero.
pub(crate) fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Removes whole days from a fraction until it lands in [0, 1).
pub(crate) fn wrap_day(value: BigRational) -> BigRational {
    let days = value.floor();
    value - days
}

/// Removes whole days from a difference until it lands in (-1/2, 1/2],
/// the shortest signed distance between two times of day.
pub(crate) fn fold_half_day(value: BigRational) -> BigRational {
    let half = ratio(1, 2);
    let days = (&value - &half).ceil();
    value - days
}

/// Truncates towards zero.
pub(crate) fn trunc(value: &BigRational) -> BigRational {
    if value.is_negative() { value.ceil() } else { value.floor() }
}

/// Renders a fraction that is known to be non-negative with a fixed
/// number of digits after the decimal point, truncating the rest.
pub(crate) fn scaled_digits(value: &BigRational, scale: i64) -> BigInt {
    let scaled = value * whole(scale);
    scaled.floor().to_integer()
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cycles() {
        assert_eq!(split_cycles(10, 7), (1, 3));
        assert_eq!(split_cycles(-1, 7), (-1, 6));
        assert_eq!(split_cycles(-7, 7), (-1, 0));
        assert_eq!(split_cycles(i128::from(i64::min_value()) - 1, 7), (-1_317_624_576_693_539_402, 5));
    }

    #[test]
    fn wrapping() {
        assert_eq!(wrap_day(ratio(3, 2)), ratio(1, 2));
        assert_eq!(wrap_day(ratio(-1, 4)), ratio(3, 4));
        assert_eq!(wrap_day(whole(-5)), whole(0));
    }

    #[test]
    fn folding() {
        assert_eq!(fold_half_day(ratio(3, 4)), ratio(-1, 4));
        assert_eq!(fold_half_day(ratio(1, 2)), ratio(1, 2));
        assert_eq!(fold_half_day(ratio(-1, 2)), ratio(1, 2));
        assert_eq!(fold_half_day(ratio(-7, 3)), ratio(-1, 3));
    }

    #[test]
    fn truncation() {
        assert_eq!(trunc(&ratio(-7, 2)), whole(-3));
        assert_eq!(trunc(&ratio(7, 2)), whole(3));
    }
}
