//! The proleptic Gregorian calendar: years, months, and days.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};

use cal::Calendar;
use error::Error;
use format::{self, Directives};
use util::{split_cycles, RangeExt};


/// Number of days guaranteed to be in four years.
const DAYS_IN_4Y:   i128 = 365 *   4 +  1;

/// Number of days guaranteed to be in a hundred years.
const DAYS_IN_100Y: i128 = 365 * 100 + 24;

/// Number of days guaranteed to be in four hundred years.
const DAYS_IN_400Y: i128 = 365 * 400 + 97;

/// The number of days that have elapsed in a year *before* each month
/// begins, first for common years, then for leap years.
const DAYS_BEFORE_MONTH: [[i64; 12]; 2] = [
    [ 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334 ],
    [ 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335 ],
];


/// A date in the **Gregorian calendar**, extended backwards to before
/// its introduction.
///
/// There is a year 0, which is a leap year, and years before it are
/// negative. The values are checked when the date is built, so every
/// instance is a real day whose day count fits in an `i64`.
///
/// ### Examples
///
/// ```
/// use ratadie::cal::Calendar;
/// use ratadie::cal::gregorian::GregorianCalendar;
///
/// let date = GregorianCalendar::new(1, 1, 1).unwrap();
/// assert_eq!(date.to_rata_die(), 1);
///
/// let date = GregorianCalendar::from_rata_die(0);
/// assert_eq!((date.year(), date.month(), date.day()), (0, 12, 31));
///
/// assert!(GregorianCalendar::new(2021, 2, 29).is_err());
/// ```
#[derive(Clone)]
pub struct GregorianCalendar {
    year:  i64,
    month: u8,
    day:   u8,
    rata_die: i64,
}

impl GregorianCalendar {

    /// Creates a new date from the given year, month, and day fields.
    ///
    /// The month must be between 1 and 12, and the day must exist in
    /// that month of that year. Years so far away that their day count
    /// doesn’t fit in an `i64` are out of range too.
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, Error> {
        let days_in_month = Self::days_in_month(year, month)?;

        if !day.is_within(1 .. days_in_month + 1) {
            return Err(Error::Range(format!("day {} must be between 1 and {} in {}-{:02}", day, days_in_month, year, month)));
        }

        Self::counted(year, month as u8, day as u8)
    }

    /// Creates a new date from the given year and day-of-year values.
    ///
    /// ### Examples
    ///
    /// ```
    /// use ratadie::cal::gregorian::GregorianCalendar;
    ///
    /// let date = GregorianCalendar::year_day(2015, 0x100).unwrap();
    /// assert_eq!((date.month(), date.day()), (9, 13));
    /// ```
    pub fn year_day(year: i64, day_of_year: i64) -> Result<Self, Error> {
        let days_in_year = Self::days_in_year(year);

        if !day_of_year.is_within(1 .. days_in_year + 1) {
            return Err(Error::Range(format!("day of year {} must be between 1 and {} in {}", day_of_year, days_in_year, year)));
        }

        let table = &DAYS_BEFORE_MONTH[Self::is_leap_year(year) as usize];

        // The number of months that have started before this day is
        // exactly the month it falls in.
        let month = table.partition_point(|&before| before < day_of_year);
        let day = day_of_year - table[month - 1];

        Self::counted(year, month as u8, day as u8)
    }

    /// Builds a date from fields that are already known to be valid,
    /// working out its day count.
    fn counted(year: i64, month: u8, day: u8) -> Result<Self, Error> {
        let rata_die = i64::try_from(Self::wide_rata_die(year, month, day))
            .map_err(|_| Error::Range(format!("{}-{:02}-{:02} is too far from the epoch to have a day count", format::signed_year(year), month, day)))?;

        Ok(Self { year, month, day, rata_die })
    }

    /// The day count of the given fields. Years near the ends of the
    /// `i64` range have day counts well outside it, so the sum is done in
    /// 128 bits.
    fn wide_rata_die(year: i64, month: u8, day: u8) -> i128 {
        let y = i128::from(year) - 1;
        let (y4, _)   = split_cycles(y, 4);
        let (y100, _) = split_cycles(y, 100);
        let (y400, _) = split_cycles(y, 400);
        let month = i128::from(month);

        // Days in the years before this one, then days in the months
        // before this one, as if February had 30 days...
        let days = 365 * y + y4 - y100 + y400
                 + (367 * month - 362) / 12;

        // ...then take back what February doesn't have.
        let correction = if month <= 2              {  0 }
                    else if Self::is_leap_year(year) { -1 }
                    else                             { -2 };

        days + correction + i128::from(day)
    }

    /// Returns whether the given year is a leap year.
    ///
    /// A year is a leap year if it’s a multiple of 4, unless it’s also a
    /// multiple of 100, unless it’s *also* a multiple of 400. This holds
    /// for negative years too, so the years 0 and -400 are leap years.
    ///
    /// ```
    /// use ratadie::cal::gregorian::GregorianCalendar;
    ///
    /// assert_eq!(GregorianCalendar::is_leap_year(2000), true);
    /// assert_eq!(GregorianCalendar::is_leap_year(1900), false);
    /// assert_eq!(GregorianCalendar::is_leap_year(-4), true);
    /// ```
    pub fn is_leap_year(year: i64) -> bool {
        let (_, year_in_cycle) = split_cycles(year, 400);
        year_in_cycle == 0 || (year_in_cycle % 100 != 0 && year_in_cycle % 4 == 0)
    }

    /// Returns the number of days in the given year: 365, or 366 in a
    /// leap year.
    pub fn days_in_year(year: i64) -> i64 {
        if Self::is_leap_year(year) { 366 } else { 365 }
    }

    /// Returns the number of days in the given month of the given year.
    pub fn days_in_month(year: i64, month: i64) -> Result<i64, Error> {
        if !month.is_within(1 .. 13) {
            return Err(Error::Range(format!("month {} must be between 1 and 12", month)));
        }

        let days = match month {
            2         => if Self::is_leap_year(year) { 29 } else { 28 },
            4 | 6 | 9 | 11  => 30,
            _         => 31,
        };

        Ok(days)
    }

    /// The year, in absolute terms.
    pub fn year(&self) -> i64 { self.year }

    /// The month of the year, from 1 to 12.
    pub fn month(&self) -> u8 { self.month }

    /// The day of the month, from 1 to 31.
    pub fn day(&self) -> u8 { self.day }

    /// The day of the week, where Monday is 1 and Sunday is 7.
    pub fn weekday(&self) -> u8 {
        let from_monday = (self.rata_die.rem_euclid(7) + 6) % 7;
        from_monday as u8 + 1
    }

    /// The day of the year, from 1 to 366.
    pub fn day_of_year(&self) -> i64 {
        DAYS_BEFORE_MONTH[Self::is_leap_year(self.year) as usize][self.month as usize - 1] + self.day as i64
    }

    /// Returns a new date with the given fields changed. The result is
    /// checked just like a freshly-built date, so moving the 30th of
    /// January into February fails.
    pub fn replace(&self, year: Option<i64>, month: Option<i64>, day: Option<i64>) -> Result<Self, Error> {
        Self::new(year.unwrap_or(self.year),
                  month.unwrap_or(self.month as i64),
                  day.unwrap_or(self.day as i64))
    }

    /// Formats this date according to the given template. See the
    /// `format` module for the rules; the directives are:
    ///
    /// | Directive | Meaning |
    /// |-----------|---------|
    /// | `%a`, `%A` | abbreviated and full weekday name |
    /// | `%b`, `%B` | abbreviated and full month name |
    /// | `%d` | day of the month, `01` to `31` |
    /// | `%j` | day of the year, `001` to `366` |
    /// | `%m` | month, `01` to `12` |
    /// | `%U` | week of the year, with weeks starting on Sunday, `00` to `53` |
    /// | `%w` | weekday number, Sunday being `0` |
    /// | `%W` | week of the year, with weeks starting on Monday, `00` to `53` |
    /// | `%y` | year without the century, `00` to `99` |
    /// | `%Y` | year, at least four digits, with a `-` if negative |
    pub fn cformat(&self, template: &str) -> String {
        format::cformat(template, self)
    }

    /// The week of the year, where week 1 starts on the first day
    /// numbered `first_weekday` (1 for Monday, 7 for Sunday). Days before
    /// it are in week 0.
    fn week_of_year(&self, first_weekday: u8) -> i64 {
        let days_into_year = self.day_of_year() - 1;
        let days_into_week = (self.weekday() as i64 + 7 - first_weekday as i64) % 7;
        (days_into_year + 7 - days_into_week) / 7
    }
}

impl Calendar for GregorianCalendar {
    fn to_rata_die(&self) -> i64 {
        self.rata_die
    }

    fn from_rata_die(day_count: i64) -> Self {

        // The Gregorian calendar works in 400-year cycles, which repeat
        // themselves ever after. Find the number of 400-year, 100-year,
        // 4-year, and single-year cycles, each time keeping the days left.
        let (n400, days) = split_cycles(i128::from(day_count) - 1, DAYS_IN_400Y);
        let (n100, days) = split_cycles(days, DAYS_IN_100Y);
        let (n4,   days) = split_cycles(days, DAYS_IN_4Y);
        let (n1,   days) = split_cycles(days, 365);

        // A year has at least 365 days, so the year of any `i64` day
        // count fits in an `i64` as well.
        let year = (400 * n400 + 100 * n100 + 4 * n4 + n1) as i64;
        let days = days as i64;

        // The last day of a leap cycle overflows into a fifth 100-year or
        // single-year chunk: it’s the 31st of December of the year before.
        if n100 == 4 || n1 == 4 {
            return Self { year, month: 12, day: 31, rata_die: day_count };
        }

        let year = year + 1;
        let table = &DAYS_BEFORE_MONTH[Self::is_leap_year(year) as usize];
        let day_of_year = days + 1;
        let month = table.partition_point(|&before| before < day_of_year);

        Self {
            year,
            month: month as u8,
            day: (day_of_year - table[month - 1]) as u8,
            rata_die: day_count,
        }
    }
}

impl Directives for GregorianCalendar {
    fn directive(&self, code: char) -> Option<String> {
        let text = match code {
            'a' => format::weekday_name(self.weekday(), false),
            'A' => format::weekday_name(self.weekday(), true),
            'b' => format::month_name(self.month, false),
            'B' => format::month_name(self.month, true),
            'd' => format::zero_padded(self.day, 2),
            'j' => format::zero_padded(self.day_of_year(), 3),
            'm' => format::zero_padded(self.month, 2),
            'U' => format::zero_padded(self.week_of_year(7), 2),
            'w' => (self.weekday() % 7).to_string(),
            'W' => format::zero_padded(self.week_of_year(1), 2),
            'y' => format::short_year(self.year),
            'Y' => format::signed_year(self.year),
            _   => return None,
        };

        Some(text)
    }
}

impl fmt::Display for GregorianCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", format::signed_year(self.year), self.month, self.day)
    }
}

impl fmt::Debug for GregorianCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GregorianCalendar({})", self)
    }
}

impl PartialEq for GregorianCalendar {
    fn eq(&self, other: &Self) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }
}

impl Eq for GregorianCalendar {}

impl PartialOrd for GregorianCalendar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GregorianCalendar {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl Hash for GregorianCalendar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.year, self.month, self.day).hash(state);
    }
}


#[cfg(test)]
mod test {
    pub(crate) use super::GregorianCalendar;
    pub(crate) use cal::Calendar;

    #[test]
    fn some_leap_years() {
        for year in [2004, 2008, 2012, 2016].iter() {
            assert!(GregorianCalendar::new(*year, 2, 29).is_ok());
            assert!(GregorianCalendar::new(*year + 1, 2, 29).is_err());
        }
        assert!(GregorianCalendar::new(1600, 2, 29).is_ok());
        assert!(GregorianCalendar::new(1601, 2, 29).is_err());
        assert!(GregorianCalendar::new(1602, 2, 29).is_err());
    }

    #[test]
    fn new() {
        for year in 1..3000 {
            assert!(GregorianCalendar::new(year,  1, 32).is_err()); assert!(GregorianCalendar::new(year,  2, 30).is_err()); assert!(GregorianCalendar::new(year,  3, 32).is_err());
            assert!(GregorianCalendar::new(year,  4, 31).is_err()); assert!(GregorianCalendar::new(year,  5, 32).is_err()); assert!(GregorianCalendar::new(year,  6, 31).is_err());
            assert!(GregorianCalendar::new(year,  7, 32).is_err()); assert!(GregorianCalendar::new(year,  8, 32).is_err()); assert!(GregorianCalendar::new(year,  9, 31).is_err());
            assert!(GregorianCalendar::new(year, 10, 32).is_err()); assert!(GregorianCalendar::new(year, 11, 31).is_err()); assert!(GregorianCalendar::new(year, 12, 32).is_err());
        }
    }

    #[test]
    fn months_and_days_out_of_range() {
        assert!(GregorianCalendar::new(2000, 0, 1).is_err());
        assert!(GregorianCalendar::new(2000, 13, 1).is_err());
        assert!(GregorianCalendar::new(2000, 1, 0).is_err());
        assert!(GregorianCalendar::new(2000, 1, -1).is_err());
    }

    #[test]
    fn to_from_rata_die() {
        for day_count in -1_000_000 .. 1_000_000 {
            if day_count % 97 != 0 { continue }
            let date = GregorianCalendar::from_rata_die(day_count);
            let rebuilt = GregorianCalendar::new(date.year(), date.month() as i64, date.day() as i64).unwrap();
            assert_eq!(rebuilt.to_rata_die(), day_count);
        }
    }

    #[test]
    fn every_day_of_a_cycle() {
        let mut previous = GregorianCalendar::from_rata_die(0);
        for day_count in 1 .. 146_098 {
            let date = GregorianCalendar::from_rata_die(day_count);
            assert!(date > previous);
            assert_eq!(date.day_of_year(), GregorianCalendar::year_day(date.year(), date.day_of_year()).unwrap().day_of_year());
            previous = date;
        }
    }

    #[test]
    fn year_days() {
        assert_eq!(GregorianCalendar::year_day(2016, 60).unwrap(), GregorianCalendar::new(2016, 2, 29).unwrap());
        assert_eq!(GregorianCalendar::year_day(2015, 60).unwrap(), GregorianCalendar::new(2015, 3, 1).unwrap());
        assert_eq!(GregorianCalendar::year_day(2015, 365).unwrap(), GregorianCalendar::new(2015, 12, 31).unwrap());
        assert!(GregorianCalendar::year_day(2015, 366).is_err());
        assert!(GregorianCalendar::year_day(2016, 366).is_ok());
        assert!(GregorianCalendar::year_day(2016, 0).is_err());
    }

    mod limits {
        use super::*;
        use error::ErrorKind;

        #[test]
        fn first_day_count() {
            let date = GregorianCalendar::from_rata_die(i64::min_value());
            assert_eq!((date.year(), date.month(), date.day()), (-25_252_734_927_766_554, 6, 6));
            assert_eq!(date.weekday(), 6);

            let rebuilt = GregorianCalendar::new(date.year(), 6, 6).unwrap();
            assert_eq!(rebuilt.to_rata_die(), i64::min_value());
        }

        #[test]
        fn last_day_count() {
            let date = GregorianCalendar::from_rata_die(i64::max_value());
            assert_eq!((date.year(), date.month(), date.day()), (25_252_734_927_766_555, 7, 27));
            assert_eq!(date.weekday(), 7);

            let rebuilt = GregorianCalendar::new(date.year(), 7, 27).unwrap();
            assert_eq!(rebuilt.to_rata_die(), i64::max_value());
        }

        #[test]
        fn years_without_a_day_count() {
            let kind = |year, month, day| GregorianCalendar::new(year, month, day).unwrap_err().kind();
            assert_eq!(kind(25_252_734_927_766_555, 7, 28), ErrorKind::Range);
            assert_eq!(kind(-25_252_734_927_766_554, 6, 5), ErrorKind::Range);
            assert_eq!(kind(i64::max_value() / 100, 1, 1), ErrorKind::Range);
            assert_eq!(kind(i64::max_value(), 12, 31), ErrorKind::Range);
            assert_eq!(kind(i64::min_value(), 1, 1), ErrorKind::Range);
            assert_eq!(GregorianCalendar::year_day(i64::min_value(), 1).unwrap_err().kind(), ErrorKind::Range);
        }
    }

    mod debug {
        use super::*;

        #[test]
        fn recently() {
            let date = GregorianCalendar::new(1600, 2, 28).unwrap();
            assert_eq!(format!("{:?}", date), "GregorianCalendar(1600-02-28)");
        }

        #[test]
        fn just_then() {
            let date = GregorianCalendar::new(-753, 12, 1).unwrap();
            assert_eq!(format!("{:?}", date), "GregorianCalendar(-0753-12-01)");
        }

        #[test]
        fn far_far_future() {
            let date = GregorianCalendar::new(10601, 1, 31).unwrap();
            assert_eq!(format!("{:?}", date), "GregorianCalendar(10601-01-31)");
        }
    }
}
