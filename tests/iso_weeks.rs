extern crate ratadie;
use ratadie::{Calendar, ErrorKind, GregorianCalendar, IsoCalendar};


fn iso(year: i64, month: i64, day: i64) -> IsoCalendar {
    let date = GregorianCalendar::new(year, month, day).unwrap();
    IsoCalendar::from_rata_die(date.to_rata_die())
}

fn ywd(date: &IsoCalendar) -> (i64, u8, u8) {
    (date.year(), date.week(), date.day())
}

#[test]
fn long_and_short_years() {
    assert_eq!(IsoCalendar::weeks_in_year(4), 53);
    assert_eq!(IsoCalendar::weeks_in_year(1), 52);
    assert_eq!(IsoCalendar::weeks_in_year(2020), 53);
    assert_eq!(IsoCalendar::weeks_in_year(2021), 52);
}

#[test]
fn week_54_of_a_short_year() {
    assert_eq!(IsoCalendar::new(1, 53, 1).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(IsoCalendar::new(4, 54, 1).unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn new_year_in_week_53() {
    assert_eq!(ywd(&iso(2005, 1, 2)), (2004, 53, 7));
    assert_eq!(ywd(&iso(2010, 1, 3)), (2009, 53, 7));
    assert_eq!(ywd(&iso(2021, 1, 3)), (2020, 53, 7));
}

#[test]
fn new_year_in_week_1() {
    assert_eq!(ywd(&iso(2008, 12, 29)), (2009, 1, 1));
    assert_eq!(ywd(&iso(2024, 12, 31)), (2025, 1, 2));
    assert_eq!(ywd(&iso(2021, 1, 4)), (2021, 1, 1));
}

#[test]
fn around_zero() {
    assert_eq!(ywd(&IsoCalendar::from_rata_die(0)), (0, 52, 7));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-1)), (0, 52, 6));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-365)), (-1, 52, 6));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-366)), (-1, 52, 5));
}

#[test]
fn far_away() {
    assert_eq!(ywd(&IsoCalendar::from_rata_die(100_000)), (274, 42, 5));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-100_000)), (-273, 12, 2));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(146_097)), (400, 52, 7));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(146_098)), (401, 1, 1));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-146_097)), (-400, 52, 7));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-146_096)), (-399, 1, 1));
    assert_eq!(ywd(&IsoCalendar::from_rata_die(-146_098)), (-400, 52, 6));
}

#[test]
fn to_rata_die() {
    assert_eq!(IsoCalendar::new(2009, 53, 7).unwrap().to_rata_die(), 733_775);
    assert_eq!(IsoCalendar::new(2021, 1, 1).unwrap().to_rata_die(), 737_794);
    assert_eq!(IsoCalendar::new(1, 1, 1).unwrap().to_rata_die(), 1);
}

#[test]
fn day_of_year() {
    assert_eq!(IsoCalendar::new(2020, 53, 7).unwrap().day_of_year(), 371);
    assert_eq!(IsoCalendar::new(2021, 1, 1).unwrap().day_of_year(), 1);
}

#[test]
fn replace() {
    let date = IsoCalendar::new(2020, 53, 4).unwrap();
    assert_eq!(date.replace(None, None, None).unwrap(), date);
    assert_eq!(date.replace(Some(2021), None, None).unwrap_err().kind(), ErrorKind::Range);
    assert_eq!(date.replace(None, None, Some(7)).unwrap(), IsoCalendar::new(2020, 53, 7).unwrap());
}
