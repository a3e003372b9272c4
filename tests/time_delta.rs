extern crate ratadie;
use ratadie::{ErrorKind, TimeDelta};


#[test]
fn addition() {
    assert_eq!(TimeDelta::from_days(10), TimeDelta::from_days(3) + TimeDelta::from_days(7));
}

#[test]
fn subtraction() {
    assert_eq!(TimeDelta::from_days(-20), TimeDelta::from_days(30) - TimeDelta::from_days(50));
}

#[test]
fn multiplication() {
    assert_eq!(TimeDelta::from_days(16), TimeDelta::from_days(8) * 2);
}

#[test]
fn parts_of_a_day() {
    let delta = TimeDelta::new("-2.25").unwrap();
    assert_eq!(delta.int_part(), TimeDelta::from_days(-2));
    assert_eq!(delta.frac_part(), TimeDelta::new("-0.25").unwrap());
    assert!(!delta.is_integer());
    assert!(delta.int_part().is_integer());
}

#[test]
fn floor_division_and_modulo() {
    let week = TimeDelta::from_days(7);
    let delta = TimeDelta::from_days(-10);
    assert_eq!(delta.floor_div(&week).unwrap().to_string(), "-2");
    assert_eq!(delta.modulo(&week).unwrap(), TimeDelta::from_days(4));
}

#[test]
fn true_division() {
    let ratio = TimeDelta::from_days(3).ratio(&TimeDelta::new("1.5").unwrap()).unwrap();
    assert_eq!(ratio.to_string(), "2");
}

#[test]
fn zero_divisors() {
    assert_eq!(TimeDelta::from_days(1).ratio(&TimeDelta::zero()).unwrap_err().kind(), ErrorKind::Division);
    assert_eq!(TimeDelta::from_days(1).div_scalar(0).unwrap_err().kind(), ErrorKind::Division);
    assert_eq!(TimeDelta::new((1, 0)).unwrap_err().kind(), ErrorKind::Division);
}

#[test]
fn float_scalars() {
    assert_eq!(TimeDelta::from_days(2).mul_scalar(0.5).unwrap(), TimeDelta::from_days(1));
    assert_eq!(TimeDelta::new(0.5).unwrap_err().kind(), ErrorKind::Type);
}
