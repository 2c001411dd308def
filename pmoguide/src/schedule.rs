//! Current/next program resolution
//!
//! Maps a wall-clock instant onto a channel's recurring daily grid: find
//! the slot covering the instant, the slot after it (wrapping past the end
//! of the list), and anchor both to concrete calendar dates so a program
//! running over midnight ends on the following day.
//!
//! All comparisons are done on zero-padded `"HH:MM:SS"` strings, which sort
//! lexicographically in chronological order within one day. The single
//! exception is an end time of `"00:00:00"`, which is end-of-day rather
//! than start-of-day.

use crate::error::{Error, Result};
use crate::models::{Program, ProgramWindow, ResolvedProgram};
use chrono::{Days, NaiveDateTime, NaiveTime};

/// Wall-clock time-of-day format
const TIME_FORMAT: &str = "%H:%M:%S";
/// Resolved local date-time format (ISO-8601, no offset)
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
/// Midnight, doubling as start-of-day and end-of-day marker
pub(crate) const MIDNIGHT: &str = "00:00:00";

/// Format the time-of-day of `now` as a zero-padded `"HH:MM:SS"` string
pub fn time_of_day(now: NaiveDateTime) -> String {
    now.time().format(TIME_FORMAT).to_string()
}

/// Resolve the currently airing program and the one following it
///
/// `programs` must satisfy the catalog invariants: non-empty, ordered,
/// contiguous and covering a full day from `"00:00:00"` to `"00:00:00"`.
/// Under those invariants exactly one slot matches any instant. A failed
/// scan means the grid has a gap and is reported as [`Error::ScheduleGap`]
/// instead of falling back to some default slot.
pub fn resolve_current_and_next(
    now: NaiveDateTime,
    programs: &[Program],
) -> Result<ProgramWindow> {
    let time = time_of_day(now);
    let index = programs
        .iter()
        .position(|p| covers(p, &time))
        .ok_or_else(|| Error::ScheduleGap(time.clone()))?;

    let current = &programs[index];
    // Wrap to the head of the grid after the last slot of the day.
    let next = if index + 1 < programs.len() {
        &programs[index + 1]
    } else {
        &programs[0]
    };

    Ok(ProgramWindow {
        current: resolve_program(now, current, &current.start_time)?,
        next: resolve_program(now, next, &current.start_time)?,
    })
}

/// Does `program` cover the time-of-day `time`?
///
/// Matches `start <= time < end`, where an end of `"00:00:00"` counts as
/// end-of-day and therefore covers everything from its own start onward.
fn covers(program: &Program, time: &str) -> bool {
    program.start_time.as_str() <= time
        && (program.end_time == MIDNIGHT || time < program.end_time.as_str())
}

/// Anchor one program's slot times to calendar dates
fn resolve_program(
    now: NaiveDateTime,
    program: &Program,
    current_start: &str,
) -> Result<ResolvedProgram> {
    Ok(ResolvedProgram {
        name: program.name.clone(),
        start_time: resolve_timestamp(now, &program.start_time, current_start)?,
        end_time: resolve_timestamp(now, &program.end_time, current_start)?,
    })
}

/// Turn an `"HH:MM:SS"` value into a full local date-time string
///
/// The date is today when the value is at or after the current program's
/// unresolved start time, tomorrow otherwise. This places an end time of
/// `"00:00:00"` on the next day for a program that started earlier today,
/// and a next program starting at `"00:00:00"` on the next day as well.
fn resolve_timestamp(now: NaiveDateTime, time: &str, current_start: &str) -> Result<String> {
    let parsed = NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map_err(|_| Error::InvalidTime(time.to_string()))?;
    let date = if time >= current_start {
        now.date()
    } else {
        now.date() + Days::new(1)
    };
    Ok(date.and_time(parsed).format(DATE_TIME_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture() -> Vec<Program> {
        vec![
            Program::new("Night", "00:00:00", "06:00:00"),
            Program::new("Morning", "06:00:00", "12:00:00"),
            Program::new("Day", "12:00:00", "18:00:00"),
            Program::new("Evening", "18:00:00", "00:00:00"),
        ]
    }

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    #[test]
    fn test_time_of_day_is_zero_padded() {
        assert_eq!(time_of_day(at(5, 3, 7)), "05:03:07");
        assert_eq!(time_of_day(at(23, 59, 59)), "23:59:59");
    }

    #[test]
    fn test_early_morning_resolves_to_today() {
        let window = resolve_current_and_next(at(5, 30, 0), &fixture()).unwrap();

        assert_eq!(window.current.name, "Night");
        assert_eq!(window.current.start_time, "2025-03-14T00:00:00");
        assert_eq!(window.current.end_time, "2025-03-14T06:00:00");

        assert_eq!(window.next.name, "Morning");
        assert_eq!(window.next.start_time, "2025-03-14T06:00:00");
        assert_eq!(window.next.end_time, "2025-03-14T12:00:00");
    }

    #[test]
    fn test_late_evening_wraps_to_tomorrow() {
        let window = resolve_current_and_next(at(23, 30, 0), &fixture()).unwrap();

        assert_eq!(window.current.name, "Evening");
        assert_eq!(window.current.start_time, "2025-03-14T18:00:00");
        assert_eq!(window.current.end_time, "2025-03-15T00:00:00");

        assert_eq!(window.next.name, "Night");
        assert_eq!(window.next.start_time, "2025-03-15T00:00:00");
        assert_eq!(window.next.end_time, "2025-03-15T06:00:00");
    }

    #[test]
    fn test_midnight_belongs_to_first_slot() {
        let window = resolve_current_and_next(at(0, 0, 0), &fixture()).unwrap();
        assert_eq!(window.current.name, "Night");
        assert_eq!(window.next.name, "Morning");
    }

    #[test]
    fn test_slot_start_is_inclusive() {
        let window = resolve_current_and_next(at(6, 0, 0), &fixture()).unwrap();
        assert_eq!(window.current.name, "Morning");
        assert_eq!(window.next.name, "Day");
    }

    #[test]
    fn test_last_second_of_day_still_matches() {
        let window = resolve_current_and_next(at(23, 59, 59), &fixture()).unwrap();
        assert_eq!(window.current.name, "Evening");
        assert_eq!(window.next.name, "Night");
    }

    #[test]
    fn test_gap_fails_explicitly() {
        // Hole between 06:00 and 12:00.
        let gapped = vec![
            Program::new("Night", "00:00:00", "06:00:00"),
            Program::new("Day", "12:00:00", "18:00:00"),
            Program::new("Evening", "18:00:00", "00:00:00"),
        ];
        let err = resolve_current_and_next(at(8, 0, 0), &gapped).unwrap_err();
        assert!(matches!(err, Error::ScheduleGap(ref t) if t == "08:00:00"));
    }

    #[test]
    fn test_names_are_stable_across_the_day() {
        let programs = fixture();
        let names: Vec<String> = programs.iter().map(|p| p.name.clone()).collect();

        for hour in 0..24 {
            let window = resolve_current_and_next(at(hour, 15, 0), &programs).unwrap();
            assert!(names.contains(&window.current.name));
            assert!(names.contains(&window.next.name));
            // Next always follows current in ring order.
            let current_index = names.iter().position(|n| *n == window.current.name).unwrap();
            let next_index = names.iter().position(|n| *n == window.next.name).unwrap();
            assert_eq!((current_index + 1) % names.len(), next_index);
        }
    }

    #[test]
    fn test_malformed_time_is_reported() {
        let broken = vec![Program::new("Oops", "00:00:00", "not-a-time")];
        let err = resolve_current_and_next(at(10, 0, 0), &broken).unwrap_err();
        assert!(matches!(err, Error::InvalidTime(_)));
    }
}
