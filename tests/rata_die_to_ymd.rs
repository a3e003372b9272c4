extern crate ratadie;
use ratadie::{Calendar, GregorianCalendar};


fn ymd(day_count: i64) -> (i64, u8, u8) {
    let date = GregorianCalendar::from_rata_die(day_count);
    (date.year(), date.month(), date.day())
}

#[test]
fn around_zero() {
    assert_eq!(ymd(1), (1, 1, 1));
    assert_eq!(ymd(0), (0, 12, 31));
    assert_eq!(ymd(-1), (0, 12, 30));
    assert_eq!(ymd(-365), (0, 1, 1));
    assert_eq!(ymd(-366), (-1, 12, 31));
}

#[test]
fn a_hundred_thousand_days() {
    assert_eq!(ymd(100_000), (274, 10, 16));
    assert_eq!(ymd(-100_000), (-273, 3, 18));
}

#[test]
fn cycle_boundaries() {
    assert_eq!(ymd(146_097), (400, 12, 31));
    assert_eq!(ymd(146_098), (401, 1, 1));
    assert_eq!(ymd(-146_096), (-399, 1, 1));
    assert_eq!(ymd(-146_097), (-400, 12, 31));
    assert_eq!(ymd(-146_098), (-400, 12, 30));
}

#[test]
fn end_of_leap_years() {
    assert_eq!(ymd(1461), (4, 12, 31));
    assert_eq!(ymd(730_485), (2000, 12, 31));
}

#[test]
fn weekdays() {
    // The 1st of January, 1 was a Monday.
    assert_eq!(GregorianCalendar::from_rata_die(1).weekday(), 1);
    assert_eq!(GregorianCalendar::from_rata_die(0).weekday(), 7);
    assert_eq!(GregorianCalendar::new(2021, 1, 1).unwrap().weekday(), 5);
}

#[test]
fn round_trip() {
    for day_count in (-1_000_000 .. 1_000_000).step_by(997) {
        let date = GregorianCalendar::from_rata_die(day_count);
        let rebuilt = GregorianCalendar::new(date.year(), date.month() as i64, date.day() as i64).unwrap();
        assert_eq!(rebuilt, date);
        assert_eq!(rebuilt.to_rata_die(), day_count);
    }
}
