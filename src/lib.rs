#![crate_name = "ratadie"]
#![crate_type = "rlib"]
#![crate_type = "dylib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! Exact dates and times, built on a count of days.
//!
//! A `Date` is a single number, its *rata die*, counting days from the
//! 1st of January of the year 1. A `Time` is an exact fraction of a day,
//! with an optional offset from UTC. Neither knows anything about years,
//! months, or hours: those come from *representations* such as the
//! Gregorian calendar or the 24-hour clock, which are installed in a
//! registry and derived from the day count on demand.
//!
//! # Examples
//!
//! ```
//! use ratadie::{Date, Time, TimeDelta};
//! use ratadie::cal::gregorian::GregorianCalendar;
//! use ratadie::cal::iso::IsoCalendar;
//! use ratadie::clock::internet::InternetTime;
//!
//! let date = Date::from_calendar(GregorianCalendar::new(2010, 1, 3).unwrap()).unwrap();
//! assert_eq!(date.calendar::<IsoCalendar>().unwrap().to_string(), "2009-W53-7");
//! assert_eq!((&date - &Date::new(733_770)), TimeDelta::from_days(5));
//!
//! let time = Time::with_utcoffset((1, 2), 0).unwrap();
//! assert_eq!(time.representation::<InternetTime>().unwrap().to_string(), "@541");
//! ```

extern crate libc;
extern crate locale;
extern crate num_bigint;
extern crate num_integer;
extern crate num_rational;
extern crate num_traits;
extern crate pad;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate tracing;

#[cfg(feature = "parse")]
extern crate iso8601;

#[cfg(windows)]
extern crate winapi;

pub mod cal;
pub mod clock;
mod date;
mod duration;
mod error;
pub mod format;
pub mod fraction;
#[cfg(feature = "parse")]
pub mod parse;
pub mod registry;
mod system;
mod time;
mod util;

pub use cal::Calendar;
pub use cal::gregorian::GregorianCalendar;
pub use cal::iso::IsoCalendar;
pub use clock::TimeRepresentation;
pub use clock::internet::InternetTime;
pub use clock::western::WesternTime;
pub use date::Date;
pub use duration::TimeDelta;
pub use error::{Error, ErrorKind};
pub use registry::{register_new_calendar, register_new_time, register_calendar_hooks, register_time_hooks};
pub use registry::{calendar_names, time_names, CalendarHooks, TimeHooks};
pub use time::Time;
