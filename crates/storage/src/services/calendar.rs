//! Day-of-week preserving calendar adjustment and month grids.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::CalendarEvent;

pub const DEFAULT_EVENT_COLOR: &str = "#3B82F6";

/// Maximum number of weeks a month grid can span.
const MAX_GRID_WEEKS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedEvent {
    #[serde(flatten)]
    pub event: CalendarEvent,
    pub adjusted_start: NaiveDate,
    pub adjusted_end: NaiveDate,
}

impl AdjustedEvent {
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.adjusted_start && date <= self.adjusted_end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub is_current_month: bool,
    pub event_ids: Vec<Uuid>,
}

pub type CalendarWeek = Vec<DayCell>;

/// Day of week with 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// Shifts a recurring event into `target_year`, keeping its weekday.
///
/// The same month/day is looked up in the target year (Feb 29 falls on
/// Mar 1 in common years), moved to the nearest date within three days that
/// lands on `start_day_of_week`, and the end keeps the reference duration.
/// Dates that cannot be represented keep the reference range.
pub fn adjust_event_to_year(event: &CalendarEvent, target_year: i32) -> AdjustedEvent {
    let reference = AdjustedEvent {
        event: event.clone(),
        adjusted_start: event.reference_start,
        adjusted_end: event.reference_end,
    };

    if !event.is_recurring || event.reference_start.year() == target_year {
        return reference;
    }

    let duration_days = (event.reference_end - event.reference_start).num_days();
    let start = event.reference_start;

    let Some(candidate) = NaiveDate::from_ymd_opt(target_year, start.month(), start.day())
        .or_else(|| NaiveDate::from_ymd_opt(target_year, 3, 1))
    else {
        return reference;
    };

    let Some(adjusted_start) = closest_day_of_week(candidate, event.start_day_of_week) else {
        return reference;
    };
    let Some(adjusted_end) = adjusted_start.checked_add_signed(Duration::days(duration_days)) else {
        return reference;
    };

    AdjustedEvent {
        event: event.clone(),
        adjusted_start,
        adjusted_end,
    }
}

/// Closest date to `base` (at most three days away) falling on `target_dow`.
///
/// `None` when that date falls outside the representable range.
pub fn closest_day_of_week(base: NaiveDate, target_dow: i16) -> Option<NaiveDate> {
    let mut diff = i64::from(target_dow.rem_euclid(7)) - i64::from(day_of_week(base));

    if diff > 3 {
        diff -= 7;
    }
    if diff < -3 {
        diff += 7;
    }

    base.checked_add_signed(Duration::days(diff))
}

/// Monday-first weeks covering `month` (1..=12) of `year`.
///
/// Returns `None` for an invalid year/month. Each cell lists the ids of the
/// events whose adjusted range covers that day.
pub fn calendar_grid(year: i32, month: u32, events: &[AdjustedEvent]) -> Option<Vec<CalendarWeek>> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = last_day_of_month(first_day)?;

    let offset = first_day.weekday().num_days_from_monday();
    let mut current = first_day.checked_sub_signed(Duration::days(i64::from(offset)))?;

    let mut weeks = Vec::with_capacity(MAX_GRID_WEEKS);

    for _ in 0..MAX_GRID_WEEKS {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            week.push(DayCell {
                date: current,
                day: current.day(),
                is_current_month: current.month() == month,
                event_ids: events
                    .iter()
                    .filter(|ev| ev.covers(current))
                    .map(|ev| ev.event.id)
                    .collect(),
            });
            current = current.succ_opt()?;
        }
        weeks.push(week);

        if current > last_day {
            break;
        }
    }

    Some(weeks)
}

fn last_day_of_month(first_day: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if first_day.month() == 12 {
        (first_day.year() + 1, 1)
    } else {
        (first_day.year(), first_day.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}

/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY` or an RFC 3339 timestamp.
pub fn parse_reference_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            input
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(start: NaiveDate, end: NaiveDate, recurring: bool) -> CalendarEvent {
        CalendarEvent {
            id: Uuid::new_v4(),
            name: "Copa Andina".to_string(),
            sport_id: Uuid::new_v4(),
            sport_name: None,
            city_id: Uuid::new_v4(),
            city_name: None,
            country_code: None,
            color: DEFAULT_EVENT_COLOR.to_string(),
            reference_start: start,
            reference_end: end,
            start_day_of_week: day_of_week(start),
            end_day_of_week: day_of_week(end),
            is_recurring: recurring,
            created_by: Uuid::new_v4(),
            created_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_day_of_week_starts_on_sunday() {
        assert_eq!(day_of_week(date(2025, 1, 12)), 0);
        assert_eq!(day_of_week(date(2025, 1, 16)), 4);
        assert_eq!(day_of_week(date(2025, 1, 18)), 6);
    }

    #[test]
    fn test_non_recurring_event_keeps_reference_dates() {
        let ev = event(date(2025, 1, 16), date(2025, 1, 19), false);
        let adjusted = adjust_event_to_year(&ev, 2027);
        assert_eq!(adjusted.adjusted_start, date(2025, 1, 16));
        assert_eq!(adjusted.adjusted_end, date(2025, 1, 19));
    }

    #[test]
    fn test_same_year_keeps_reference_dates() {
        let ev = event(date(2025, 3, 6), date(2025, 3, 8), true);
        let adjusted = adjust_event_to_year(&ev, 2025);
        assert_eq!(adjusted.adjusted_start, ev.reference_start);
        assert_eq!(adjusted.adjusted_end, ev.reference_end);
    }

    #[test]
    fn test_recurring_event_moves_to_same_weekday() {
        // Thursday Jan 16 2025 to Sunday Jan 19 2025.
        let ev = event(date(2025, 1, 16), date(2025, 1, 19), true);
        let adjusted = adjust_event_to_year(&ev, 2026);

        // Jan 16 2026 is a Friday; the closest Thursday is Jan 15.
        assert_eq!(adjusted.adjusted_start, date(2026, 1, 15));
        assert_eq!(adjusted.adjusted_end, date(2026, 1, 18));
        assert_eq!(day_of_week(adjusted.adjusted_start), ev.start_day_of_week);
        assert_eq!(day_of_week(adjusted.adjusted_end), ev.end_day_of_week);
    }

    #[test]
    fn test_adjustment_stays_within_three_days() {
        let ev = event(date(2024, 6, 1), date(2024, 6, 2), true);
        for year in 2020..2035 {
            let adjusted = adjust_event_to_year(&ev, year);
            let anchor = date(year, 6, 1);
            let distance = (adjusted.adjusted_start - anchor).num_days().abs();
            assert!(distance <= 3, "year {year} drifted {distance} days");
            assert_eq!(day_of_week(adjusted.adjusted_start), ev.start_day_of_week);
            assert_eq!(
                (adjusted.adjusted_end - adjusted.adjusted_start).num_days(),
                1
            );
        }
    }

    #[test]
    fn test_leap_day_rolls_into_march() {
        // Thursday Feb 29 2024.
        let ev = event(date(2024, 2, 29), date(2024, 2, 29), true);
        let adjusted = adjust_event_to_year(&ev, 2025);
        // Mar 1 2025 is a Saturday; the closest Thursday is Feb 27.
        assert_eq!(adjusted.adjusted_start, date(2025, 2, 27));
        assert_eq!(adjusted.adjusted_end, date(2025, 2, 27));
    }

    #[test]
    fn test_closest_day_of_week_wraps_both_ways() {
        // Wednesday Jan 1 2025.
        let base = date(2025, 1, 1);
        assert_eq!(closest_day_of_week(base, 3), Some(base));
        assert_eq!(closest_day_of_week(base, 6), Some(date(2025, 1, 4)));
        assert_eq!(closest_day_of_week(base, 0), Some(date(2024, 12, 29)));
        assert_eq!(closest_day_of_week(base, 1), Some(date(2024, 12, 30)));
    }

    #[test]
    fn test_closest_day_of_week_at_date_bounds() {
        let max = NaiveDate::MAX;
        let min = NaiveDate::MIN;
        let after_max = (day_of_week(max) + 1).rem_euclid(7);
        let before_min = (day_of_week(min) - 1).rem_euclid(7);

        assert_eq!(closest_day_of_week(max, day_of_week(max)), Some(max));
        assert_eq!(closest_day_of_week(max, after_max), None);
        assert_eq!(closest_day_of_week(min, before_min), None);
    }

    #[test]
    fn test_adjustment_near_max_date_never_panics() {
        let max_year = NaiveDate::MAX.year();
        for dow in 0..7 {
            let mut ev = event(date(2024, 12, 31), date(2024, 12, 31), true);
            ev.start_day_of_week = dow;

            let adjusted = adjust_event_to_year(&ev, max_year);
            if adjusted.adjusted_start == ev.reference_start {
                assert_eq!(adjusted.adjusted_end, ev.reference_end);
            } else {
                assert_eq!(adjusted.adjusted_start.year(), max_year);
                assert_eq!(day_of_week(adjusted.adjusted_start), dow);
            }
        }
    }

    #[test]
    fn test_grid_at_the_end_of_the_calendar() {
        let max = NaiveDate::MAX;
        assert!(calendar_grid(max.year(), max.month(), &[]).is_none());
        assert!(calendar_grid(max.year() + 1, 1, &[]).is_none());

        let grid = calendar_grid(9999, 12, &[]).unwrap();
        assert_eq!(grid.last().unwrap().last().unwrap().date.year(), 10000);
    }

    #[test]
    fn test_grid_for_month_starting_on_monday() {
        // February 2021 starts on a Monday and has exactly four weeks.
        let grid = calendar_grid(2021, 2, &[]).unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0][0].date, date(2021, 2, 1));
        assert!(grid.iter().flatten().all(|cell| cell.is_current_month));
    }

    #[test]
    fn test_grid_pads_with_adjacent_months() {
        // March 2025 starts on a Saturday and ends on a Monday.
        let grid = calendar_grid(2025, 3, &[]).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0][0].date, date(2025, 2, 24));
        assert!(!grid[0][0].is_current_month);
        assert_eq!(grid[0][5].day, 1);
        assert!(grid[0][5].is_current_month);
        assert!(grid.iter().all(|week| week.len() == 7));
        assert_eq!(grid[5][0].date, date(2025, 3, 31));
    }

    #[test]
    fn test_grid_places_events_on_covered_days() {
        let ev = event(date(2025, 1, 16), date(2025, 1, 18), false);
        let adjusted = adjust_event_to_year(&ev, 2025);
        let grid = calendar_grid(2025, 1, &[adjusted]).unwrap();

        let covered: Vec<u32> = grid
            .iter()
            .flatten()
            .filter(|cell| cell.event_ids.contains(&ev.id))
            .map(|cell| cell.day)
            .collect();
        assert_eq!(covered, vec![16, 17, 18]);
    }

    #[test]
    fn test_grid_rejects_invalid_month() {
        assert!(calendar_grid(2025, 0, &[]).is_none());
        assert!(calendar_grid(2025, 13, &[]).is_none());
    }

    #[test]
    fn test_parse_reference_date_formats() {
        assert_eq!(parse_reference_date("2025-01-16"), Some(date(2025, 1, 16)));
        assert_eq!(parse_reference_date("16/01/2025"), Some(date(2025, 1, 16)));
        assert_eq!(
            parse_reference_date("2025-01-16T10:00:00Z"),
            Some(date(2025, 1, 16))
        );
        assert_eq!(parse_reference_date(""), None);
        assert_eq!(parse_reference_date("mañana"), None);
    }
}
