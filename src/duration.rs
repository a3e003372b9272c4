//! Lengths of time, measured in days.

use std::fmt;
use std::ops::{Add, Sub, Neg, Mul};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use error::Error;
use fraction::{verify_fractional, Limits, Numeric};
use util::{trunc, whole};


/// A **time delta** is the signed difference between two dates or two
/// times, as an exact number of days. It can be any size, and needn’t be
/// a whole number of days.
///
/// ### Examples
///
/// ```
/// use ratadie::TimeDelta;
///
/// let delta = TimeDelta::new("1.5").unwrap();
/// assert_eq!(delta.int_part(), TimeDelta::from_days(1));
/// assert_eq!(delta.frac_part(), TimeDelta::new((1, 2)).unwrap());
/// assert_eq!(delta.to_string(), "3/2 days");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimeDelta {
    days: BigRational,
}

impl TimeDelta {

    /// Creates a new delta of the given number of days, which may be
    /// fractional but must be exact.
    pub fn new<N: Into<Numeric>>(days: N) -> Result<Self, Error> {
        let days = verify_fractional(days, &Limits::new())?;
        Ok(Self { days })
    }

    /// Creates a new delta of a whole number of days.
    pub fn from_days(days: i64) -> Self {
        Self { days: whole(days) }
    }

    /// Creates a new delta from a fraction that is already exact.
    pub fn from_ratio(days: BigRational) -> Self {
        Self { days }
    }

    /// Create a new zero-length delta.
    pub fn zero() -> Self {
        Self { days: BigRational::zero() }
    }

    /// The number of days in this delta.
    pub fn days(&self) -> &BigRational {
        &self.days
    }

    /// Returns whether this delta is a whole number of days.
    pub fn is_integer(&self) -> bool {
        self.days.is_integer()
    }

    /// The whole days of this delta, truncated towards zero.
    pub fn int_part(&self) -> Self {
        Self { days: trunc(&self.days) }
    }

    /// What’s left of this delta once the whole days are taken away. It
    /// has the same sign as the delta.
    pub fn frac_part(&self) -> Self {
        Self { days: &self.days - trunc(&self.days) }
    }

    /// The length of this delta, without its sign.
    pub fn abs(&self) -> Self {
        Self { days: self.days.abs() }
    }

    /// Multiplies this delta by the given scalar. Unlike the constructors,
    /// this accepts floating-point numbers, at the exact value of their
    /// binary representation.
    pub fn mul_scalar<N: Into<Numeric>>(&self, scalar: N) -> Result<Self, Error> {
        let scalar = scalar.into().to_scalar()?;
        Ok(Self { days: &self.days * scalar })
    }

    /// Divides this delta by the given scalar, which can be a float just
    /// as with `mul_scalar`.
    pub fn div_scalar<N: Into<Numeric>>(&self, scalar: N) -> Result<Self, Error> {
        let scalar = scalar.into().to_scalar()?;
        if scalar.is_zero() {
            return Err(Error::Division(format!("cannot divide {} by zero", self)));
        }

        Ok(Self { days: &self.days / scalar })
    }

    /// The number of times the other delta fits into this one, rounded
    /// down.
    pub fn floor_div(&self, other: &Self) -> Result<BigInt, Error> {
        Ok(self.ratio(other)?.floor().to_integer())
    }

    /// What’s left after taking away as many of the other delta as fit,
    /// which has the same sign as the other delta.
    pub fn modulo(&self, other: &Self) -> Result<Self, Error> {
        let quotient = self.floor_div(other)?;
        let days = &self.days - &other.days * BigRational::from_integer(quotient);
        Ok(Self { days })
    }

    /// How many times larger this delta is than the other, exactly.
    pub fn ratio(&self, other: &Self) -> Result<BigRational, Error> {
        if other.days.is_zero() {
            return Err(Error::Division(format!("cannot divide {} by a zero delta", self)));
        }

        Ok(&self.days / &other.days)
    }
}

impl<'a> Add<&'a TimeDelta> for &'a TimeDelta {
    type Output = TimeDelta;

    fn add(self, rhs: &'a TimeDelta) -> TimeDelta {
        TimeDelta { days: &self.days + &rhs.days }
    }
}

impl Add<TimeDelta> for TimeDelta {
    type Output = TimeDelta;

    fn add(self, rhs: TimeDelta) -> TimeDelta {
        &self + &rhs
    }
}

impl<'a> Sub<&'a TimeDelta> for &'a TimeDelta {
    type Output = TimeDelta;

    fn sub(self, rhs: &'a TimeDelta) -> TimeDelta {
        TimeDelta { days: &self.days - &rhs.days }
    }
}

impl Sub<TimeDelta> for TimeDelta {
    type Output = TimeDelta;

    fn sub(self, rhs: TimeDelta) -> TimeDelta {
        &self - &rhs
    }
}

impl Neg for TimeDelta {
    type Output = TimeDelta;

    fn neg(self) -> TimeDelta {
        TimeDelta { days: -self.days }
    }
}

impl<'a> Neg for &'a TimeDelta {
    type Output = TimeDelta;

    fn neg(self) -> TimeDelta {
        TimeDelta { days: -&self.days }
    }
}

impl Mul<i64> for TimeDelta {
    type Output = TimeDelta;

    fn mul(self, amount: i64) -> TimeDelta {
        TimeDelta { days: self.days * whole(amount) }
    }
}

impl fmt::Display for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} days", self.days)
    }
}
