//! Parsing ISO 8601 dates and times into calendar and clock values.

use std::error::Error as ErrorTrait;
use std::fmt;
use std::str::FromStr;

use iso8601;

use cal::Calendar;
use cal::gregorian::GregorianCalendar;
use cal::iso::IsoCalendar;
use clock::western::WesternTime;
use error::Error as ValueError;
use util::ratio;


impl FromStr for GregorianCalendar {
    type Err = Error;

    /// Parses a calendar date (`2015-06-26`), a week date (`2015-W26-5`),
    /// or an ordinal date (`2015-177`).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match iso8601::date(input) {
            Ok(fields)  => fields_to_gregorian(fields).map_err(Error::Date),
            Err(e)      => Err(Error::Parse(e)),
        }
    }
}

impl FromStr for IsoCalendar {
    type Err = Error;

    /// Parses the same forms as `GregorianCalendar`, giving the date in
    /// the ISO week calendar.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let fields = match iso8601::date(input) {
            Ok(fields)  => fields,
            Err(e)      => return Err(Error::Parse(e)),
        };

        if let iso8601::Date::Week { year, ww, d } = fields {
            IsoCalendar::new(year as i64, ww as i64, d as i64).map_err(Error::Date)
        }
        else {
            let date = fields_to_gregorian(fields).map_err(Error::Date)?;
            Ok(IsoCalendar::from_rata_die(date.to_rata_die()))
        }
    }
}

impl FromStr for WesternTime {
    type Err = Error;

    /// Parses a time such as `12:34:56.789`, with an optional `Z` or
    /// `±HH:MM` offset from UTC. Without one, the time is naive.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match iso8601::time(input) {
            Ok(fields)  => fields_to_time(fields, has_offset(input)).map_err(Error::Date),
            Err(e)      => Err(Error::Parse(e)),
        }
    }
}


fn fields_to_gregorian(fields: iso8601::Date) -> Result<GregorianCalendar, ValueError> {
    match fields {
        iso8601::Date::YMD { year, month, day } => {
            GregorianCalendar::new(year as i64, month as i64, day as i64)
        }
        iso8601::Date::Week { year, ww, d } => {
            let date = IsoCalendar::new(year as i64, ww as i64, d as i64)?;
            Ok(GregorianCalendar::from_rata_die(date.to_rata_die()))
        }
        iso8601::Date::Ordinal { year, ddd } => {
            GregorianCalendar::year_day(year as i64, ddd as i64)
        }
    }
}

fn fields_to_time(fields: iso8601::Time, aware: bool) -> Result<WesternTime, ValueError> {
    let second = ratio(fields.second as i64 * 1000 + fields.millisecond as i64, 1000);

    if aware {
        let timezone = ratio(fields.tz_offset_hours as i64 * 60 + fields.tz_offset_minutes as i64, 60);
        WesternTime::with_timezone(fields.hour as i64, fields.minute as i64, second, timezone)
    }
    else {
        WesternTime::new(fields.hour as i64, fields.minute as i64, second)
    }
}

/// The parsed fields hold a zero offset either way, so whether the time
/// had one at all has to come from the text.
fn has_offset(input: &str) -> bool {
    input.contains(|c: char| c == 'Z' || c == 'z' || c == '+' || c == '-')
}


/// Something went wrong while parsing a date or a time.
#[derive(PartialEq, Debug, Clone)]
pub enum Error {

    /// The text was well-formed, but the values in it don’t make a valid
    /// date or time.
    Date(ValueError),

    /// The text isn’t in a form this library understands.
    Parse(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Date(ref error)    => write!(f, "parsing resulted in an invalid value: {}", error),
            Error::Parse(ref string)  => write!(f, "parse error: {}", string),
        }
    }
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Error::Date(ref error)  => Some(error),
            Error::Parse(_)         => None,
        }
    }
}
