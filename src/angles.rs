//! Timestamp to hand rotation.
//!
//! Angles are degrees measured clockwise from 12 o'clock.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use chrono_tz::{OffsetName, Tz};

use crate::error::FaceError;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub const ZERO: HandAngles = HandAngles {
        hour: 0.0,
        minute: 0.0,
        second: 0.0,
    };

    pub fn to_radians(self) -> HandAngles {
        HandAngles {
            hour: self.hour.to_radians(),
            minute: self.minute.to_radians(),
            second: self.second.to_radians(),
        }
    }

    pub fn normalize_degrees(self) -> HandAngles {
        HandAngles {
            hour: normalize(self.hour),
            minute: normalize(self.minute),
            second: normalize(self.second),
        }
    }
}

fn normalize(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to the modulus itself for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wall-clock fields of an instant in some calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeParts {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
}

impl TimeParts {
    pub fn of<Z: TimeZone>(time: &DateTime<Z>) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            nanosecond: time.nanosecond(),
        }
    }

    /// Fraction of the current second, kept below 1 during a leap second.
    fn subsecond(self) -> f64 {
        (self.nanosecond.min(999_999_999) as f64) / NANOS_PER_SECOND
    }
}

pub fn hand_angles_from_parts(parts: TimeParts) -> HandAngles {
    let seconds = parts.second as f64 + parts.subsecond();
    let minutes = parts.minute as f64 + seconds / 60.0;
    let hours = (parts.hour % 12) as f64 + minutes / 60.0;

    HandAngles {
        hour: hours / 12.0 * 360.0,
        minute: minutes / 60.0 * 360.0,
        second: seconds / 60.0 * 360.0,
    }
    .normalize_degrees()
}

/// Hand angles for an instant already expressed in the wanted calendar.
pub fn hand_angles<Z: TimeZone>(time: &DateTime<Z>) -> HandAngles {
    hand_angles_from_parts(TimeParts::of(time))
}

fn decompose<Z: TimeZone>(
    unix_seconds: i64,
    subsec_nanos: u32,
    timezone: &Z,
) -> Result<TimeParts, FaceError> {
    let utc = DateTime::<Utc>::from_timestamp(unix_seconds, subsec_nanos).ok_or(
        FaceError::TimeDecomposition {
            seconds: unix_seconds,
        },
    )?;
    Ok(TimeParts::of(&utc.with_timezone(timezone)))
}

/// Hand angles for a raw unix timestamp viewed in `timezone`.
///
/// Timestamps outside the calendar range yield [`HandAngles::ZERO`].
pub fn compute_angles<Z: TimeZone>(unix_seconds: i64, subsec_nanos: u32, timezone: &Z) -> HandAngles {
    match decompose(unix_seconds, subsec_nanos, timezone) {
        Ok(parts) => hand_angles_from_parts(parts),
        Err(err) => {
            log::warn!("{err}, drawing hands at zero");
            HandAngles::ZERO
        }
    }
}

/// Short name of the zone at `instant`, e.g. "CET" or "PDT".
pub fn timezone_abbreviation(timezone: &Tz, instant: &DateTime<Utc>) -> Option<String> {
    timezone
        .offset_from_utc_datetime(&instant.naive_utc())
        .abbreviation()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::Rng;

    const EPSILON: f64 = 1e-9;

    fn at(hour: u32, minute: u32, second: u32, milli: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, hour, minute, second)
            .single()
            .expect("valid test time")
            + Duration::milliseconds(milli as i64)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn midnight_and_noon_are_zero() {
        for hour in [0, 12] {
            let angles = hand_angles(&at(hour, 0, 0, 0));
            assert_eq!(angles, HandAngles::ZERO);
        }
    }

    #[test]
    fn hand_angles_known_time() {
        let angles = hand_angles(&at(3, 15, 0, 0));
        assert_close(angles.hour, 97.5);
        assert_close(angles.minute, 90.0);
        assert_close(angles.second, 0.0);
    }

    #[test]
    fn half_minute_and_half_hour() {
        assert_close(hand_angles(&at(0, 0, 30, 0)).second, 180.0);

        let angles = hand_angles(&at(0, 30, 0, 0));
        assert_close(angles.minute, 180.0);
        assert_close(angles.hour, 15.0);

        assert_close(hand_angles(&at(6, 0, 0, 0)).hour, 180.0);
    }

    #[test]
    fn second_hand_wraps_and_minute_advances_by_six_degrees() {
        let before = hand_angles(&at(0, 0, 59, 999));
        assert!((before.second - 359.99).abs() < 0.01);

        let start = hand_angles(&at(0, 0, 0, 0));
        let after = hand_angles(&at(0, 1, 0, 0));
        assert_close(after.second, 0.0);
        assert_close(after.minute - start.minute, 6.0);
        assert!(after.minute > before.minute);
    }

    #[test]
    fn minute_and_hour_creep_with_sub_units() {
        let a = hand_angles(&at(4, 10, 0, 0));
        let b = hand_angles(&at(4, 10, 30, 0));
        assert_close(b.minute - a.minute, 3.0);
        assert_close(b.hour - a.hour, 0.25);
    }

    #[test]
    fn angles_stay_in_range() {
        let mut rng = rand::rng();
        for _ in 0..2_000 {
            let seconds = rng.random_range(-2_000_000_000i64..4_000_000_000);
            let nanos = rng.random_range(0..1_000_000_000u32);
            let angles = compute_angles(seconds, nanos, &Utc);
            for angle in [angles.hour, angles.minute, angles.second] {
                assert!((0.0..360.0).contains(&angle), "{angle} out of range");
            }
        }
    }

    #[test]
    fn monotonic_within_a_minute() {
        let mut rng = rand::rng();
        let minute_start = at(9, 41, 0, 0);
        for _ in 0..500 {
            let a = rng.random_range(0..60_000i64);
            let b = rng.random_range(a..60_000i64);
            let first = hand_angles(&(minute_start + Duration::milliseconds(a)));
            let second = hand_angles(&(minute_start + Duration::milliseconds(b)));
            assert!(second.second >= first.second);
            assert!(second.minute >= first.minute);
            assert!(second.hour >= first.hour);
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let time = at(17, 23, 45, 678);
        assert_eq!(hand_angles(&time), hand_angles(&time));
        assert_eq!(
            compute_angles(1_735_701_300, 5, &chrono_tz::Europe::Paris),
            compute_angles(1_735_701_300, 5, &chrono_tz::Europe::Paris)
        );
    }

    #[test]
    fn timezone_shifts_the_calendar() {
        // 2025-01-01 03:15:00 UTC is 08:45 in Kolkata (+05:30).
        let angles = compute_angles(1_735_701_300, 0, &chrono_tz::Asia::Kolkata);
        assert_close(angles.minute, 270.0);
        assert_close(angles.hour, 262.5);
    }

    #[test]
    fn leap_second_stays_below_full_turn() {
        let parts = TimeParts {
            hour: 23,
            minute: 59,
            second: 59,
            nanosecond: 1_500_000_000,
        };
        let angles = hand_angles_from_parts(parts);
        assert!(angles.second < 360.0);
        assert!(angles.hour < 360.0);
    }

    #[test]
    fn undecomposable_timestamp_yields_zero() {
        assert_eq!(compute_angles(i64::MAX, 0, &Utc), HandAngles::ZERO);
        assert!(matches!(
            decompose(i64::MIN, 0, &Utc),
            Err(FaceError::TimeDecomposition { .. })
        ));
    }

    #[test]
    fn radians_view() {
        let angles = hand_angles(&at(6, 0, 0, 0)).to_radians();
        assert_close(angles.hour, std::f64::consts::PI);
    }

    #[test]
    fn abbreviation_follows_daylight_saving() {
        let winter = at(12, 0, 0, 0);
        let summer = Utc
            .with_ymd_and_hms(2025, 7, 1, 12, 0, 0)
            .single()
            .expect("valid test time");
        let paris = chrono_tz::Europe::Paris;
        assert_eq!(timezone_abbreviation(&paris, &winter).as_deref(), Some("CET"));
        assert_eq!(timezone_abbreviation(&paris, &summer).as_deref(), Some("CEST"));
    }
}
