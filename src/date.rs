//! Dates, as a count of days.

use std::any::{type_name, Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use error::Error;
use duration::TimeDelta;
use registry::{self, View, ViewCache};
use system;


/// A **date** is a single day, stored as its *rata die*: the number of
/// days since the start of the proleptic Gregorian calendar, where the
/// 1st of January of the year 1 is day 1.
///
/// A date doesn’t know about calendars. It gets its Gregorian, ISO, or
/// any other view through the calendars installed by the `registry`
/// module, computing each one the first time it is asked for.
///
/// ### Examples
///
/// ```
/// use ratadie::{Date, TimeDelta};
/// use ratadie::cal::gregorian::GregorianCalendar;
///
/// let date = Date::from_calendar(GregorianCalendar::new(1970, 1, 1).unwrap()).unwrap();
/// assert_eq!(date.day_count(), 719_163);
///
/// let later = (&date + &TimeDelta::from_days(59)).unwrap();
/// assert_eq!(later.calendar::<GregorianCalendar>().unwrap().to_string(), "1970-03-01");
/// ```
pub struct Date {
    day_count: i64,
    views: ViewCache,
}

impl Date {

    /// Creates a new date from its day count.
    pub fn new(day_count: i64) -> Self {
        Date { day_count, views: ViewCache::new() }
    }

    /// Creates a new date from a value of a registered calendar. The
    /// value is kept as the date’s view in that calendar.
    ///
    /// This fails with an `Attribute` error if the value’s type hasn’t
    /// been registered as a calendar.
    pub fn from_calendar<C: Any + Send + Sync>(value: C) -> Result<Self, Error> {
        let entry = registry::calendar_by_type(TypeId::of::<C>())
            .ok_or_else(|| unregistered::<C>())?;

        let view: View = Arc::new(value);
        let day_count = (entry.to_canonical)(&*view)
            .ok_or_else(|| unregistered::<C>())?;

        Ok(Date { day_count, views: ViewCache::seeded(view) })
    }

    /// Returns the date the system clock says it is today, in the local
    /// time zone.
    pub fn today() -> Self {
        let now = system::sys_time();
        let local = now.seconds + now.offset;
        Date::new(system::UNIX_EPOCH_RATA_DIE + local.div_euclid(86_400))
    }

    /// The number of days since the epoch.
    pub fn day_count(&self) -> i64 {
        self.day_count
    }

    /// This date in the given calendar, computed on first use and then
    /// kept for the lifetime of this value.
    pub fn calendar<C: Any + Send + Sync>(&self) -> Result<Arc<C>, Error> {
        let entry = registry::calendar_by_type(TypeId::of::<C>())
            .ok_or_else(|| unregistered::<C>())?;

        self.views.derive(&entry, &self.day_count)
            .downcast::<C>()
            .map_err(|_| unregistered::<C>())
    }

    /// This date in the calendar registered under the given name, with
    /// its type erased. Fails with an `Attribute` error for a name that
    /// isn’t registered.
    pub fn view(&self, name: &str) -> Result<View, Error> {
        let entry = registry::calendar_by_name(name)
            .ok_or_else(|| Error::Attribute(format!("Date has no calendar named {:?}", name)))?;

        Ok(self.views.derive(&entry, &self.day_count))
    }

    /// Adds a whole number of days to this date. Fails with a `Value`
    /// error for a delta with part of a day, and a `Range` error if the
    /// day count would overflow.
    pub fn checked_add(&self, delta: &TimeDelta) -> Result<Self, Error> {
        if !delta.is_integer() {
            return Err(Error::Value(format!("cannot add {} to a date, as it isn’t a whole number of days", delta)));
        }

        delta.days().to_integer().to_i64()
            .and_then(|days| self.day_count.checked_add(days))
            .map(Date::new)
            .ok_or_else(|| Error::Range(format!("{} plus {} is out of range", self, delta)))
    }

    /// Subtracts a whole number of days from this date.
    pub fn checked_sub(&self, delta: &TimeDelta) -> Result<Self, Error> {
        self.checked_add(&-delta)
    }
}

fn unregistered<C>() -> Error {
    Error::Attribute(format!("{} is not a registered calendar of Date", type_name::<C>()))
}

impl<'a> Add<&'a TimeDelta> for &'a Date {
    type Output = Result<Date, Error>;

    fn add(self, rhs: &'a TimeDelta) -> Result<Date, Error> {
        self.checked_add(rhs)
    }
}

impl Add<TimeDelta> for Date {
    type Output = Result<Date, Error>;

    fn add(self, rhs: TimeDelta) -> Result<Date, Error> {
        self.checked_add(&rhs)
    }
}

impl<'a> Sub<&'a TimeDelta> for &'a Date {
    type Output = Result<Date, Error>;

    fn sub(self, rhs: &'a TimeDelta) -> Result<Date, Error> {
        self.checked_sub(rhs)
    }
}

impl Sub<TimeDelta> for Date {
    type Output = Result<Date, Error>;

    fn sub(self, rhs: TimeDelta) -> Result<Date, Error> {
        self.checked_sub(&rhs)
    }
}

impl<'a> Sub<&'a Date> for &'a Date {
    type Output = TimeDelta;

    fn sub(self, rhs: &'a Date) -> TimeDelta {
        let days = BigInt::from(self.day_count) - BigInt::from(rhs.day_count);
        TimeDelta::from_ratio(BigRational::from_integer(days))
    }
}

impl Sub<Date> for Date {
    type Output = TimeDelta;

    fn sub(self, rhs: Date) -> TimeDelta {
        &self - &rhs
    }
}

impl Clone for Date {
    fn clone(&self) -> Self {
        Date { day_count: self.day_count, views: self.views.clone() }
    }
}

impl PartialEq for Date {
    fn eq(&self, other: &Date) -> bool {
        self.day_count == other.day_count
    }
}

impl Eq for Date {}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Date) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Date) -> Ordering {
        self.day_count.cmp(&other.day_count)
    }
}

impl Hash for Date {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day_count.hash(state);
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "R.D. {}", self.day_count)
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Date({})", self.day_count)
    }
}
