//! System-dependent functions, or anything that this library is unable to
//! do without help from the OS.

#[cfg(unix)] use libc;

/// The day count of the 1st of January, 1970.
pub(crate) const UNIX_EPOCH_RATA_DIE: i64 = 719_163;

/// The time according to the system clock, as the number of seconds
/// elapsed since the Unix epoch, the nanosecond of the second, and the
/// local offset from UTC in seconds.
#[derive(Debug, Copy, Clone)]
pub(crate) struct SystemTime {
    pub(crate) seconds: i64,
    pub(crate) nanoseconds: u32,
    pub(crate) offset: i64,
}


#[cfg(unix)]
pub(crate) fn sys_time() -> SystemTime {
    use std::mem;

    let mut ts = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    let offset = unsafe {
        let _ = libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts);

        let mut tm: libc::tm = mem::zeroed();
        if libc::localtime_r(&ts.tv_sec, &mut tm).is_null() { 0 } else { tm.tm_gmtoff as i64 }
    };

    SystemTime { seconds: ts.tv_sec as i64, nanoseconds: ts.tv_nsec as u32, offset }
}


#[cfg(windows)] use winapi::shared::minwindef::FILETIME;
#[cfg(windows)] const HECTONANOSECS_IN_SEC: i64 = 10_000_000;
#[cfg(windows)] const HECTONANOSEC_TO_UNIX_EPOCH: i64 = 11_644_473_600 * HECTONANOSECS_IN_SEC;

/// What `GetTimeZoneInformation` returns when daylight saving time is in
/// effect.
#[cfg(windows)] const TIME_ZONE_ID_DAYLIGHT: u32 = 2;

#[cfg(windows)]
pub(crate) fn sys_time() -> SystemTime {
    use std::mem;
    use winapi::um::sysinfoapi::GetSystemTimeAsFileTime;
    use winapi::um::timezoneapi::GetTimeZoneInformation;

    let (ft, tz, zone_id) = unsafe {
        let mut ft = mem::zeroed();
        GetSystemTimeAsFileTime(&mut ft);

        let mut tz = mem::zeroed();
        let zone_id = GetTimeZoneInformation(&mut tz);
        (ft, tz, zone_id)
    };

    // The bias is the number of minutes to add to local time to get UTC.
    let bias = if zone_id == TIME_ZONE_ID_DAYLIGHT { tz.Bias + tz.DaylightBias }
                                              else { tz.Bias + tz.StandardBias };

    let t = file_time_as_u64(&ft) as i64 - HECTONANOSEC_TO_UNIX_EPOCH;
    SystemTime {
        seconds:     t.div_euclid(HECTONANOSECS_IN_SEC),
        nanoseconds: (t.rem_euclid(HECTONANOSECS_IN_SEC) * 100) as u32,
        offset:      -(bias as i64) * 60,
    }
}

#[cfg(windows)]
fn file_time_as_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64)
}


/// Without a way to ask for the local time zone, the local time is
/// taken to be UTC.
#[cfg(not(any(unix, windows)))]
pub(crate) fn sys_time() -> SystemTime {
    use std::time::{SystemTime as StdTime, UNIX_EPOCH};

    let (seconds, nanoseconds) = match StdTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => (elapsed.as_secs() as i64, elapsed.subsec_nanos()),
        Err(e)      => {
            let before = e.duration();
            match before.subsec_nanos() {
                0     => (-(before.as_secs() as i64), 0),
                nanos => (-(before.as_secs() as i64) - 1, 1_000_000_000 - nanos),
            }
        }
    };

    SystemTime { seconds, nanoseconds, offset: 0 }
}


#[cfg(test)]
mod test {
    use super::sys_time;

    #[test]
    fn sanity_check() {
        let now = sys_time();
        assert!(now.seconds > 0);
        assert!(now.nanoseconds < 1_000_000_000);
        assert!(now.offset.abs() < 86_400);
    }
}
