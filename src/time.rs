//! Times of day, as a fraction of a day.

use std::any::{type_name, Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::sync::Arc;

use num_rational::BigRational;

use duration::TimeDelta;
use error::Error;
use fraction::{verify_fractional, Limits, Numeric};
use registry::{self, View, ViewCache};
use system;
use util::{fold_half_day, ratio, whole, wrap_day};


/// A **time** is a moment within a day, stored as the exact fraction of
/// the day that has elapsed, in [0, 1).
///
/// A time can be *naive*, with no idea of where in the world it is, or
/// *aware*, carrying its offset from UTC as a fraction of a day strictly
/// between -1 and 1. Aware times compare by the moment they stand for in
/// UTC, so 18:00 at UTC+06:00 equals noon at UTC. Naive and aware times
/// are never equal, can’t be ordered against each other, and can’t be
/// subtracted from each other.
///
/// Like `Date`, a time doesn’t know about clocks; it gets its views
/// through the time representations installed by the `registry` module.
///
/// ### Examples
///
/// ```
/// use ratadie::{Time, TimeDelta};
/// use ratadie::clock::western::WesternTime;
///
/// let time = Time::new("0.75").unwrap();
/// assert_eq!(time.representation::<WesternTime>().unwrap().to_string(), "18:00:00");
///
/// let later = &time + &TimeDelta::new((1, 2)).unwrap();
/// assert_eq!(later, Time::new((1, 4)).unwrap());
/// ```
pub struct Time {
    day_frac: BigRational,
    utcoffset: Option<BigRational>,
    views: ViewCache,
}

impl Time {

    /// Creates a new naive time from the fraction of the day that has
    /// elapsed.
    pub fn new<N: Into<Numeric>>(day_frac: N) -> Result<Self, Error> {
        let day_frac = verify_day_frac(day_frac)?;
        Ok(Time::build(day_frac, None))
    }

    /// Creates a new aware time from the fraction of the day that has
    /// elapsed, and its offset from UTC as a fraction of a day.
    pub fn with_utcoffset<N, O>(day_frac: N, utcoffset: O) -> Result<Self, Error>
    where N: Into<Numeric>, O: Into<Numeric> {
        let day_frac = verify_day_frac(day_frac)?;
        let utcoffset = verify_utcoffset(utcoffset)?;
        Ok(Time::build(day_frac, Some(utcoffset)))
    }

    fn build(day_frac: BigRational, utcoffset: Option<BigRational>) -> Self {
        Time { day_frac, utcoffset, views: ViewCache::new() }
    }

    /// Creates a new time from a value of a registered time
    /// representation. The value is kept as the time’s view in that
    /// representation.
    ///
    /// This fails with an `Attribute` error if the value’s type hasn’t
    /// been registered, and a `Range` error if the representation
    /// produces a day fraction or offset out of bounds.
    pub fn from_representation<T: Any + Send + Sync>(value: T) -> Result<Self, Error> {
        let entry = registry::time_by_type(TypeId::of::<T>())
            .ok_or_else(|| unregistered::<T>())?;

        let view: View = Arc::new(value);
        let (day_frac, utcoffset) = (entry.to_canonical)(&*view)
            .ok_or_else(|| unregistered::<T>())?;

        let day_frac = verify_day_frac(day_frac)?;
        let utcoffset = match utcoffset {
            Some(offset) => Some(verify_utcoffset(offset)?),
            None         => None,
        };

        Ok(Time { day_frac, utcoffset, views: ViewCache::seeded(view) })
    }

    /// Returns the time the system clock says it is now, as a naive
    /// time in the local time zone.
    pub fn now() -> Self {
        let now = system::sys_time();
        Time::build(seconds_to_day_frac(now.seconds + now.offset, now.nanoseconds), None)
    }

    /// Returns the time the system clock says it is now, in the local
    /// time zone, aware of its offset.
    pub fn localnow() -> Self {
        let now = system::sys_time();
        let utcoffset = ratio(now.offset, 86_400);
        Time::build(seconds_to_day_frac(now.seconds + now.offset, now.nanoseconds), Some(utcoffset))
    }

    /// Returns the time the system clock says it is now, in UTC.
    pub fn utcnow() -> Self {
        let now = system::sys_time();
        Time::build(seconds_to_day_frac(now.seconds, now.nanoseconds), Some(whole(0)))
    }

    /// The fraction of the day that has elapsed, in [0, 1).
    pub fn day_frac(&self) -> &BigRational {
        &self.day_frac
    }

    /// The offset from UTC as a fraction of a day, or nothing for a naive
    /// time.
    pub fn utcoffset(&self) -> Option<&BigRational> {
        self.utcoffset.as_ref()
    }

    /// Returns whether this time has no offset from UTC.
    pub fn is_naive(&self) -> bool {
        self.utcoffset.is_none()
    }

    /// This time in the given representation, computed on first use and
    /// then kept for the lifetime of this value.
    pub fn representation<T: Any + Send + Sync>(&self) -> Result<Arc<T>, Error> {
        let entry = registry::time_by_type(TypeId::of::<T>())
            .ok_or_else(|| unregistered::<T>())?;

        self.views.derive(&entry, &self.pair())
            .downcast::<T>()
            .map_err(|_| unregistered::<T>())
    }

    /// This time in the representation registered under the given name,
    /// with its type erased.
    pub fn view(&self, name: &str) -> Result<View, Error> {
        let entry = registry::time_by_name(name)
            .ok_or_else(|| Error::Attribute(format!("Time has no representation named {:?}", name)))?;

        Ok(self.views.derive(&entry, &self.pair()))
    }

    /// The same moment at another offset from UTC. Fails with a `Value`
    /// error for a naive time, which isn’t any particular moment.
    pub fn relocate<O: Into<Numeric>>(&self, utcoffset: O) -> Result<Self, Error> {
        let current = match self.utcoffset {
            Some(ref offset) => offset,
            None => return Err(Error::Value(format!("cannot relocate {}, as it is naive", self))),
        };

        let utcoffset = verify_utcoffset(utcoffset)?;
        let day_frac = wrap_day(&self.day_frac - current + &utcoffset);
        Ok(Time::build(day_frac, Some(utcoffset)))
    }

    /// Compares two times, failing with a `Type` error if one is naive
    /// and the other aware.
    pub fn try_cmp(&self, other: &Time) -> Result<Ordering, Error> {
        self.partial_cmp(other)
            .ok_or_else(|| Error::Type(format!("cannot compare {} with {}, as only one is naive", self, other)))
    }

    /// The shortest signed distance from the other time to this one, in
    /// (-1/2, 1/2] of a day. Fails with a `Value` error if one time is
    /// naive and the other aware.
    pub fn checked_sub_time(&self, other: &Time) -> Result<TimeDelta, Error> {
        if self.is_naive() != other.is_naive() {
            return Err(Error::Value(format!("cannot subtract {} from {}: cannot mix naive and aware times", other, self)));
        }

        Ok(TimeDelta::from_ratio(fold_half_day(self.utc_key() - other.utc_key())))
    }

    fn pair(&self) -> registry::TimePair {
        (self.day_frac.clone(), self.utcoffset.clone())
    }

    /// The value this time compares by: its day fraction in UTC, or as
    /// it is for a naive time.
    fn utc_key(&self) -> BigRational {
        match self.utcoffset {
            Some(ref offset) => wrap_day(&self.day_frac - offset),
            None             => self.day_frac.clone(),
        }
    }

    fn shifted(&self, days: &BigRational) -> Time {
        Time::build(wrap_day(&self.day_frac + days), self.utcoffset.clone())
    }
}

fn verify_day_frac<N: Into<Numeric>>(day_frac: N) -> Result<BigRational, Error> {
    verify_fractional(day_frac, &Limits::new().min(0).max_excl(1))
}

fn verify_utcoffset<N: Into<Numeric>>(utcoffset: N) -> Result<BigRational, Error> {
    verify_fractional(utcoffset, &Limits::new().min_excl(-1).max_excl(1))
}

fn seconds_to_day_frac(seconds: i64, nanoseconds: u32) -> BigRational {
    let into_day = seconds.rem_euclid(86_400) * 1_000_000_000 + nanoseconds as i64;
    ratio(into_day, 86_400 * 1_000_000_000)
}

fn unregistered<T>() -> Error {
    Error::Attribute(format!("{} is not a registered representation of Time", type_name::<T>()))
}

impl<'a> Add<&'a TimeDelta> for &'a Time {
    type Output = Time;

    fn add(self, rhs: &'a TimeDelta) -> Time {
        self.shifted(rhs.days())
    }
}

impl Add<TimeDelta> for Time {
    type Output = Time;

    fn add(self, rhs: TimeDelta) -> Time {
        &self + &rhs
    }
}

impl<'a> Sub<&'a TimeDelta> for &'a Time {
    type Output = Time;

    fn sub(self, rhs: &'a TimeDelta) -> Time {
        self.shifted(&-rhs.days())
    }
}

impl Sub<TimeDelta> for Time {
    type Output = Time;

    fn sub(self, rhs: TimeDelta) -> Time {
        &self - &rhs
    }
}

impl<'a> Sub<&'a Time> for &'a Time {
    type Output = Result<TimeDelta, Error>;

    fn sub(self, rhs: &'a Time) -> Result<TimeDelta, Error> {
        self.checked_sub_time(rhs)
    }
}

impl Sub<Time> for Time {
    type Output = Result<TimeDelta, Error>;

    fn sub(self, rhs: Time) -> Result<TimeDelta, Error> {
        self.checked_sub_time(&rhs)
    }
}

impl Clone for Time {
    fn clone(&self) -> Self {
        Time {
            day_frac:  self.day_frac.clone(),
            utcoffset: self.utcoffset.clone(),
            views:     self.views.clone(),
        }
    }
}

impl PartialEq for Time {
    fn eq(&self, other: &Time) -> bool {
        self.is_naive() == other.is_naive() && self.utc_key() == other.utc_key()
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Time) -> Option<Ordering> {
        if self.is_naive() == other.is_naive() {
            Some(self.utc_key().cmp(&other.utc_key()))
        }
        else {
            None
        }
    }
}

impl Hash for Time {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_naive().hash(state);
        self.utc_key().hash(state);
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} of a day", self.day_frac)?;

        if let Some(ref offset) = self.utcoffset {
            write!(f, ", {} of a day from UTC", offset)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.utcoffset {
            Some(ref offset) => write!(f, "Time({}, utcoffset={})", self.day_frac, offset),
            None             => write!(f, "Time({})", self.day_frac),
        }
    }
}
