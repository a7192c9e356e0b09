//! Time Model - a single reference instant shared by every zone
//!
//! Each zone's wall-clock time is derived from the reference instant by adding
//! a fixed offset. Nothing per-zone is ever stored, so all readouts stay
//! consistent with one another.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// Wall-clock reading for one zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayedTime {
    /// Hour in 24-hour format (0-23), wrapped across midnight
    pub hour24: u32,
    /// Hour in 12-hour format (1-12)
    pub hour12: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// AM/PM indicator
    pub meridiem: Meridiem,
}

impl DisplayedTime {
    /// Format the time as "hh:mm AM"
    pub fn format_time(&self) -> String {
        format!("{:02}:{:02} {}", self.hour12, self.minute, self.meridiem)
    }

    /// Format a calendar date as "MM/dd/yyyy"
    ///
    /// The zone's own day rollover is not tracked, so callers pass the
    /// selected date.
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%m/%d/%Y").to_string()
    }
}

/// Convert a fractional hour offset into whole minutes
///
/// Saturates at the `i64` bounds; NaN maps to zero.
pub fn offset_to_minutes(offset_hours: f64) -> i64 {
    (offset_hours * MINUTES_PER_HOUR as f64).round() as i64
}

/// Offset in whole minutes, reduced into `0..MINUTES_PER_DAY`
///
/// Only the time of day is ever derived from an offset, so whole days can be
/// dropped before any integer or chrono arithmetic. Non-finite offsets count
/// as zero.
pub fn offset_minutes_of_day(offset_hours: f64) -> i64 {
    let minutes = (offset_hours * MINUTES_PER_HOUR as f64).round();
    if !minutes.is_finite() {
        return 0;
    }
    minutes.rem_euclid(MINUTES_PER_DAY as f64) as i64
}

/// Compute the displayed time for a zone at the given reference instant
pub fn displayed_time(reference: DateTime<Utc>, offset_hours: f64) -> DisplayedTime {
    let local = reference + Duration::minutes(offset_minutes_of_day(offset_hours));

    let hour24 = local.hour();
    let hour12 = match hour24 {
        0 => 12,
        1..=12 => hour24,
        _ => hour24 - 12,
    };
    let meridiem = if hour24 < 12 { Meridiem::AM } else { Meridiem::PM };

    DisplayedTime {
        hour24,
        hour12,
        minute: local.minute(),
        meridiem,
    }
}

/// Round a minute count up to the next whole hour
fn ceil_to_hour(minutes: i64) -> i64 {
    (minutes + MINUTES_PER_HOUR - 1).div_euclid(MINUTES_PER_HOUR) * MINUTES_PER_HOUR
}

/// Reference instant plus the calendar date it lives on
///
/// `reference_instant` always falls on `selected_date` (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeModel {
    reference_instant: DateTime<Utc>,
    selected_date: NaiveDate,
}

impl TimeModel {
    /// Build a model around a reference instant, selecting its date
    pub fn new(reference_instant: DateTime<Utc>) -> Self {
        Self {
            reference_instant,
            selected_date: reference_instant.date_naive(),
        }
    }

    /// Build a model around the current wall-clock time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn reference_instant(&self) -> DateTime<Utc> {
        self.reference_instant
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Displayed time for a zone with the given offset
    pub fn displayed_time(&self, offset_hours: f64) -> DisplayedTime {
        displayed_time(self.reference_instant, offset_hours)
    }

    /// Move the reference so the zone at `offset_hours` reads `new_hour`
    ///
    /// Minutes are reset to zero. When the offset has a fractional hour the
    /// UTC target is rounded up to the next whole hour, so the zone reads
    /// `new_hour:mm` with `mm` equal to the offset's minute part. The result
    /// wraps onto the selected date. Hours above 23 leave the model unchanged.
    pub fn set_hour_for_zone(&self, offset_hours: f64, new_hour: u32) -> Self {
        if new_hour > 23 {
            debug!("Ignoring out-of-range hour {}", new_hour);
            return *self;
        }

        let target =
            i64::from(new_hour) * MINUTES_PER_HOUR - offset_minutes_of_day(offset_hours);
        let minute_of_day = ceil_to_hour(target).rem_euclid(MINUTES_PER_DAY);
        let midnight = self.selected_date.and_time(NaiveTime::MIN).and_utc();

        Self {
            reference_instant: midnight + Duration::minutes(minute_of_day),
            selected_date: self.selected_date,
        }
    }

    /// Rebase the reference onto a new date, keeping its time of day
    pub fn set_selected_date(&self, date: NaiveDate) -> Self {
        let time_of_day = self.reference_instant.time();
        Self {
            reference_instant: date.and_time(time_of_day).and_utc(),
            selected_date: date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const OFFSETS: [f64; 9] = [0.0, 5.5, -5.0, -8.0, 5.75, -3.5, 9.5, 14.0, -12.0];

    fn reference(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_displayed_time_scenario() {
        let model = TimeModel::new(reference(12, 0));

        let ist = model.displayed_time(5.5);
        assert_eq!(ist.hour24, 17);
        assert_eq!(ist.format_time(), "05:30 PM");

        let est = model.displayed_time(-5.0);
        assert_eq!(est.hour24, 7);
        assert_eq!(est.format_time(), "07:00 AM");

        let utc = model.displayed_time(0.0);
        assert_eq!(utc.format_time(), "12:00 PM");
    }

    #[test]
    fn test_displayed_hour_matches_formula() {
        for h in 0..24 {
            for m in [0, 15, 29, 30, 59] {
                let t = reference(h, m);
                for o in OFFSETS {
                    let minutes = (h as i64) * 60 + m as i64 + offset_to_minutes(o);
                    let expected = minutes.rem_euclid(1440) / 60;
                    assert_eq!(
                        displayed_time(t, o).hour24 as i64,
                        expected,
                        "h={} m={} o={}",
                        h,
                        m,
                        o
                    );
                }
            }
        }
    }

    #[test]
    fn test_hour_wraps_across_midnight() {
        let early = reference(2, 0);
        assert_eq!(displayed_time(early, -8.0).hour24, 18);

        let late = reference(22, 0);
        let ist = displayed_time(late, 5.5);
        assert_eq!(ist.hour24, 3);
        assert_eq!(ist.minute, 30);
    }

    #[test]
    fn test_midnight_and_noon_formatting() {
        let midnight = displayed_time(reference(0, 5), 0.0);
        assert_eq!(midnight.hour12, 12);
        assert_eq!(midnight.meridiem, Meridiem::AM);

        let noon = displayed_time(reference(12, 0), 0.0);
        assert_eq!(noon.hour12, 12);
        assert_eq!(noon.meridiem, Meridiem::PM);
    }

    #[test]
    fn test_set_hour_is_left_inverse() {
        let model = TimeModel::new(reference(12, 41));
        for o in OFFSETS {
            for h in 0..24 {
                let updated = model.set_hour_for_zone(o, h);
                assert_eq!(updated.displayed_time(o).hour24, h, "o={} h={}", o, h);
                assert_eq!(updated.reference_instant().minute(), 0);
                assert_eq!(updated.reference_instant().date_naive(), model.selected_date());
            }
        }
    }

    #[test]
    fn test_set_hour_fractional_offset_rounds_up() {
        let model = TimeModel::new(reference(12, 0));
        let updated = model.set_hour_for_zone(5.5, 0);

        assert_eq!(updated.reference_instant(), reference(19, 0));
        assert_eq!(updated.displayed_time(5.5).format_time(), "12:30 AM");
    }

    #[test]
    fn test_set_hour_whole_offset() {
        let model = TimeModel::new(reference(12, 30));
        let updated = model.set_hour_for_zone(-5.0, 9);
        assert_eq!(updated.reference_instant(), reference(14, 0));
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        let model = TimeModel::new(reference(12, 0));
        for o in [1.0e13, -1.0e300, f64::MAX, f64::NAN, f64::INFINITY] {
            for h in 0..24 {
                let updated = model.set_hour_for_zone(o, h);
                assert_eq!(updated.displayed_time(o).hour24, h, "o={} h={}", o, h);
                assert_eq!(updated.reference_instant().date_naive(), model.selected_date());
            }
        }
    }

    #[test]
    fn test_offsets_wrap_by_whole_days() {
        let t = reference(12, 0);
        assert_eq!(displayed_time(t, 26.0), displayed_time(t, 2.0));
        assert_eq!(displayed_time(t, -29.5), displayed_time(t, -5.5));
        assert_eq!(offset_minutes_of_day(-5.0), 1140);
        assert_eq!(offset_minutes_of_day(f64::NAN), 0);
    }

    #[test]
    fn test_set_hour_out_of_range_is_noop() {
        let model = TimeModel::new(reference(12, 30));
        assert_eq!(model.set_hour_for_zone(0.0, 24), model);
    }

    #[test]
    fn test_set_selected_date_keeps_time_of_day() {
        let model = TimeModel::new(Utc.with_ymd_and_hms(2024, 1, 1, 15, 42, 7).unwrap());
        let date = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let updated = model.set_selected_date(date);

        assert_eq!(updated.selected_date(), date);
        assert_eq!(
            updated.reference_instant(),
            Utc.with_ymd_and_hms(2025, 6, 30, 15, 42, 7).unwrap()
        );
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(DisplayedTime::format_date(date), "03/09/2024");
    }
}
