//! Ways of telling the time of day, which turn a fraction of a day into
//! hours and minutes, beats, and so on.

pub mod internet;
pub mod western;

use std::any::Any;

use num_rational::BigRational;


/// The **time representation** trait is implemented by every type that
/// can stand in for a time of day.
///
/// The canonical form of a time of day is a *pair*: the fraction of the
/// day that has elapsed, in [0, 1), and an optional offset from UTC, also
/// as a fraction of a day, in (-1, 1). A representation must be able to
/// produce this pair, and to be rebuilt from any valid one.
pub trait TimeRepresentation: Any + Send + Sync {

    /// The day fraction and UTC offset of this time.
    fn to_time_pair(&self) -> (BigRational, Option<BigRational>);

    /// Builds the time at the given day fraction and UTC offset. The day
    /// fraction is always in [0, 1) and the offset in (-1, 1), as `Time`
    /// only hands over pairs that have been checked; anything else is a
    /// bug in the caller.
    fn from_time_pair(day_frac: BigRational, utcoffset: Option<BigRational>) -> Self where Self: Sized;
}
