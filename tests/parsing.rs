#![cfg(feature = "parse")]

extern crate ratadie;
use ratadie::{GregorianCalendar, IsoCalendar, WesternTime};
use ratadie::parse::Error;


#[test]
fn dates() {
    let strings = [
        ("2015-06-26",   Some((2015, 6, 26))),
        ("20150626",     Some((2015, 6, 26))),
        ("2015-W26-5",   Some((2015, 6, 26))),
        ("2001-W05-6",   Some((2001, 2, 3))),
        ("2015-13-01",   None),
        ("yesterday",    None),
    ];

    for &(input, expected) in strings.iter() {
        let parsed = input.parse::<GregorianCalendar>().ok().map(|d| (d.year(), d.month(), d.day()));
        assert_eq!(parsed, expected, "parsing {:?}", input);
    }
}

#[test]
fn week_dates() {
    let date: IsoCalendar = "2020-W53-4".parse().unwrap();
    assert_eq!(date, IsoCalendar::new(2020, 53, 4).unwrap());

    // 2021 only has 52 weeks.
    assert!("2021-W53-4".parse::<IsoCalendar>().is_err());

    match "2021-02-29".parse::<IsoCalendar>() {
        Err(Error::Date(_)) => {},
        other => panic!("expected an invalid date, got {:?}", other),
    }
}

#[test]
fn times() {
    let time: WesternTime = "04:05:06.123".parse().unwrap();
    assert_eq!(time, WesternTime::new(4, 5, "6.123").unwrap());

    let time: WesternTime = "22:57:09-07:00".parse().unwrap();
    assert_eq!(time, WesternTime::with_timezone(22, 57, 9, -7).unwrap());
}
