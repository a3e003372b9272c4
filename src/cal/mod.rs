//! Calendars, which turn a day count into years, months, weeks, and days.

pub mod gregorian;
pub mod iso;

use std::any::Any;


/// The **calendar** trait is implemented by every type that can stand in
/// for a date: it must be able to say which day it is, as a day count,
/// and to be rebuilt from any day count.
///
/// Day 1 is the 1st of January of the year 1 in the proleptic Gregorian
/// calendar. Days before it are zero or negative.
///
/// A calendar value is self-contained: its own fields decide its day
/// count, and it keeps no link back to the `Date` it came from.
pub trait Calendar: Any + Send + Sync {

    /// The day count of this date.
    fn to_rata_die(&self) -> i64;

    /// Builds the date that falls on the given day count.
    fn from_rata_die(day_count: i64) -> Self where Self: Sized;
}
