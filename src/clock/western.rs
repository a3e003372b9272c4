//! The 24-hour clock: hours, minutes, and seconds, with an optional
//! offset from UTC.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use clock::TimeRepresentation;
use error::Error;
use format::{self, Directives};
use fraction::{verify_fractional, Limits, Numeric};
use util::{ratio, scaled_digits, whole, RangeExt};


/// A time of day on the **24-hour clock**.
///
/// The hour and minute are whole numbers; the second is an exact
/// fraction in [0, 60). The optional time zone is an offset from UTC in
/// *hours*, strictly between -24 and 24, which may itself be fractional.
///
/// ### Examples
///
/// ```
/// use ratadie::clock::western::WesternTime;
///
/// let time = WesternTime::with_timezone(21, 0, 0, 10).unwrap();
/// assert_eq!(time.to_string(), "21:00:00+10:00");
///
/// let time = WesternTime::new(6, 30, "12.5").unwrap();
/// assert_eq!(time.cformat("%I:%M:%S.%f %p"), "06:30:12.500000 AM");
///
/// assert!(WesternTime::new(24, 0, 0).is_err());
/// ```
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct WesternTime {
    hour:     u8,
    minute:   u8,
    second:   BigRational,
    timezone: Option<BigRational>,
}

impl WesternTime {

    /// Creates a new naive time from the given hour, minute, and second.
    pub fn new<S: Into<Numeric>>(hour: i64, minute: i64, second: S) -> Result<Self, Error> {
        Self::build(hour, minute, second.into(), None)
    }

    /// Creates a new time from the given hour, minute, and second, at
    /// the given offset from UTC in hours.
    pub fn with_timezone<S, Z>(hour: i64, minute: i64, second: S, timezone: Z) -> Result<Self, Error>
    where S: Into<Numeric>, Z: Into<Numeric> {
        Self::build(hour, minute, second.into(), Some(timezone.into()))
    }

    fn build(hour: i64, minute: i64, second: Numeric, timezone: Option<Numeric>) -> Result<Self, Error> {
        if !hour.is_within(0 .. 24) {
            return Err(Error::Range(format!("hour {} must be between 0 and 23", hour)));
        }

        if !minute.is_within(0 .. 60) {
            return Err(Error::Range(format!("minute {} must be between 0 and 59", minute)));
        }

        let second = verify_fractional(second, &Limits::new().min(0).max_excl(60))?;
        let timezone = match timezone {
            Some(tz) => Some(verify_fractional(tz, &Limits::new().min_excl(-24).max_excl(24))?),
            None     => None,
        };

        Ok(Self { hour: hour as u8, minute: minute as u8, second, timezone })
    }

    /// Creates a new naive time from the fraction of the day that has
    /// elapsed, which must be in [0, 1).
    pub fn from_day_frac<N: Into<Numeric>>(day_frac: N) -> Result<Self, Error> {
        let day_frac = verify_fractional(day_frac, &Limits::new().min(0).max_excl(1))?;
        Ok(Self::from_time_pair(day_frac, None))
    }

    /// The fraction of the day that has elapsed at this time.
    pub fn to_day_frac(&self) -> BigRational {
        ratio(self.hour as i64, 24)
            + ratio(self.minute as i64, 1440)
            + &self.second / whole(86400)
    }

    /// The hour, from 0 to 23.
    pub fn hour(&self) -> u8 { self.hour }

    /// The minute, from 0 to 59.
    pub fn minute(&self) -> u8 { self.minute }

    /// The second, in [0, 60).
    pub fn second(&self) -> &BigRational { &self.second }

    /// The offset from UTC in hours, if this time has one.
    pub fn timezone(&self) -> Option<&BigRational> { self.timezone.as_ref() }

    /// Returns a new time with the given fields changed. The result is
    /// checked just like a freshly-built time. The time zone can be left
    /// alone (`None`), removed (`Some(None)`), or changed.
    pub fn replace(&self, hour: Option<i64>, minute: Option<i64>, second: Option<Numeric>, timezone: Option<Option<Numeric>>) -> Result<Self, Error> {
        let timezone = match timezone {
            Some(changed) => changed,
            None          => self.timezone.clone().map(Numeric::Fraction),
        };

        Self::build(hour.unwrap_or(self.hour as i64),
                    minute.unwrap_or(self.minute as i64),
                    second.unwrap_or_else(|| Numeric::Fraction(self.second.clone())),
                    timezone)
    }

    /// Formats this time according to the given template. See the
    /// `format` module for the rules; the directives are:
    ///
    /// | Directive | Meaning |
    /// |-----------|---------|
    /// | `%H` | hour on the 24-hour clock, `00` to `23` |
    /// | `%I` | hour on the 12-hour clock, `01` to `12` |
    /// | `%p` | `AM` or `PM` |
    /// | `%M` | minute, `00` to `59` |
    /// | `%S` | whole seconds, `00` to `59` |
    /// | `%f` | microseconds, `000000` to `999999` |
    /// | `%z` | offset from UTC as `±HH:MM`, with `:SS` and `.ffffff` only when needed; empty for a naive time |
    pub fn cformat(&self, template: &str) -> String {
        format::cformat(template, self)
    }

    fn whole_seconds(&self) -> BigInt {
        self.second.floor().to_integer()
    }

    fn microseconds(&self) -> BigInt {
        scaled_digits(&self.second.fract(), 1_000_000)
    }
}

/// Renders an offset in hours as `±HH:MM`, adding seconds and then
/// microseconds only when they aren’t zero.
fn format_offset(timezone: &BigRational) -> String {
    let sign = if timezone.is_negative() { '-' } else { '+' };
    let hours = timezone.abs();

    let whole_hours = hours.floor();
    let minutes = (&hours - &whole_hours) * whole(60);
    let whole_minutes = minutes.floor();
    let seconds = (&minutes - &whole_minutes) * whole(60);
    let whole_seconds = seconds.floor();
    let micros = scaled_digits(&(&seconds - &whole_seconds), 1_000_000);

    let mut text = format!("{}{}:{}", sign,
                           format::zero_padded(whole_hours.to_integer(), 2),
                           format::zero_padded(whole_minutes.to_integer(), 2));

    if !whole_seconds.is_zero() || !micros.is_zero() {
        text.push(':');
        text.push_str(&format::zero_padded(whole_seconds.to_integer(), 2));
    }

    if !micros.is_zero() {
        text.push('.');
        text.push_str(&format::zero_padded(micros, 6));
    }

    text
}

impl TimeRepresentation for WesternTime {
    fn to_time_pair(&self) -> (BigRational, Option<BigRational>) {
        let utcoffset = self.timezone.as_ref().map(|tz| tz / whole(24));
        (self.to_day_frac(), utcoffset)
    }

    fn from_time_pair(day_frac: BigRational, utcoffset: Option<BigRational>) -> Self {
        debug_assert!(!day_frac.is_negative() && day_frac < whole(1), "day fraction {} is outside [0, 1)", day_frac);

        // Peel off each field with exact subtraction, so a time right at
        // the start of a minute never comes out as 59.999... seconds.
        let hour = (&day_frac * whole(24)).floor();
        let rest = &day_frac - &hour / whole(24);
        let minute = (&rest * whole(1440)).floor();
        let second = (rest - &minute / whole(1440)) * whole(86400);

        Self {
            hour:     hour.to_integer().to_u8().unwrap_or(0),
            minute:   minute.to_integer().to_u8().unwrap_or(0),
            second,
            timezone: utcoffset.map(|offset| offset * whole(24)),
        }
    }
}

impl Directives for WesternTime {
    fn directive(&self, code: char) -> Option<String> {
        let text = match code {
            'H' => format::zero_padded(self.hour, 2),
            'I' => format::zero_padded(if self.hour % 12 == 0 { 12 } else { self.hour % 12 }, 2),
            'p' => (if self.hour < 12 { "AM" } else { "PM" }).to_owned(),
            'M' => format::zero_padded(self.minute, 2),
            'S' => format::zero_padded(self.whole_seconds(), 2),
            'f' => format::zero_padded(self.microseconds(), 6),
            'z' => self.timezone.as_ref().map(format_offset).unwrap_or_default(),
            _   => return None,
        };

        Some(text)
    }
}

impl fmt::Display for WesternTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}:{}", self.hour, self.minute, format::zero_padded(self.whole_seconds(), 2))?;

        if let Some(ref timezone) = self.timezone {
            write!(f, "{}", format_offset(timezone))?;
        }

        Ok(())
    }
}

impl fmt::Debug for WesternTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WesternTime({})", self)
    }
}


#[cfg(test)]
mod test {
    use super::{WesternTime, format_offset};
    use clock::TimeRepresentation;
    use error::ErrorKind;
    use util::{ratio, whole};

    mod construction {
        use super::*;

        #[test]
        fn bounds() {
            assert!(WesternTime::new(0, 0, 0).is_ok());
            assert!(WesternTime::new(23, 59, "59.999999").is_ok());
            assert_eq!(WesternTime::new(24, 0, 0).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(WesternTime::new(-1, 0, 0).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(WesternTime::new(0, 60, 0).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(WesternTime::new(0, 0, 60).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(WesternTime::new(0, 0, -1).unwrap_err().kind(), ErrorKind::Range);
        }

        #[test]
        fn seconds_must_be_exact() {
            assert_eq!(WesternTime::new(0, 0, 1.5).unwrap_err().kind(), ErrorKind::Type);
            assert_eq!(WesternTime::new(0, 0, "soon").unwrap_err().kind(), ErrorKind::Type);
        }

        #[test]
        fn timezones() {
            assert!(WesternTime::with_timezone(0, 0, 0, "-23.5").is_ok());
            assert_eq!(WesternTime::with_timezone(0, 0, 0, 24).unwrap_err().kind(), ErrorKind::Range);
            assert_eq!(WesternTime::with_timezone(0, 0, 0, -24).unwrap_err().kind(), ErrorKind::Range);
        }

        #[test]
        fn replace_nothing() {
            let time = WesternTime::with_timezone(13, 14, "15.5", 2).unwrap();
            assert_eq!(time.replace(None, None, None, None), Ok(time.clone()));
        }

        #[test]
        fn replace_timezone() {
            let time = WesternTime::with_timezone(13, 14, 15, 2).unwrap();
            let naive = time.replace(None, None, None, Some(None)).unwrap();
            assert_eq!(naive.timezone(), None);
            assert_eq!(time.replace(Some(24), None, None, None).unwrap_err().kind(), ErrorKind::Range);
        }
    }

    mod conversion {
        use super::*;

        #[test]
        fn noon() {
            let time = WesternTime::from_day_frac((1, 2)).unwrap();
            assert_eq!((time.hour(), time.minute(), time.second().clone()), (12, 0, whole(0)));
        }

        #[test]
        fn start_of_a_minute() {
            let time = WesternTime::from_day_frac((61, 1440)).unwrap();
            assert_eq!((time.hour(), time.minute(), time.second().clone()), (1, 1, whole(0)));
        }

        #[test]
        fn thirds() {
            let time = WesternTime::from_day_frac((1, 3)).unwrap();
            assert_eq!((time.hour(), time.minute(), time.second().clone()), (8, 0, whole(0)));
            assert_eq!(time.to_day_frac(), ratio(1, 3));
        }

        #[test]
        fn fractional_seconds() {
            let time = WesternTime::from_day_frac((1, 86400 * 3)).unwrap();
            assert_eq!(time.second().clone(), ratio(1, 3));
        }

        #[test]
        fn pairs() {
            let time = WesternTime::with_timezone(18, 0, 0, -6).unwrap();
            assert_eq!(time.to_time_pair(), (ratio(3, 4), Some(ratio(-1, 4))));
            assert_eq!(WesternTime::from_time_pair(ratio(3, 4), Some(ratio(-1, 4))), time);
        }

        #[test]
        #[cfg(debug_assertions)]
        #[should_panic(expected = "outside [0, 1)")]
        fn pair_past_the_end_of_the_day() {
            let _ = WesternTime::from_time_pair(whole(1), None);
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn offsets() {
            assert_eq!(format_offset(&whole(5)), "+05:00");
            assert_eq!(format_offset(&ratio(-11, 2)), "-05:30");
            assert_eq!(format_offset(&ratio(1, 240)), "+00:00:15");
            assert_eq!(format_offset(&ratio(1, 7200)), "+00:00:00.500000");
        }

        #[test]
        fn twelve_hours() {
            assert_eq!(WesternTime::new(0, 5, 0).unwrap().cformat("%I %p"), "12 AM");
            assert_eq!(WesternTime::new(12, 5, 0).unwrap().cformat("%I %p"), "12 PM");
            assert_eq!(WesternTime::new(23, 5, 0).unwrap().cformat("%I %p"), "11 PM");
        }

        #[test]
        fn naive_has_no_zone() {
            assert_eq!(WesternTime::new(1, 2, 3).unwrap().cformat("[%z]"), "[]");
        }

        #[test]
        fn display() {
            assert_eq!(WesternTime::new(9, 8, "7.9").unwrap().to_string(), "09:08:07");
            assert_eq!(WesternTime::with_timezone(9, 8, 7, "-3.75").unwrap().to_string(), "09:08:07-03:45");
        }
    }
}
