//! Date-window filtering of retrieved locations.

use chrono::{NaiveDateTime, TimeDelta};

use crate::location::Location;

/// Keeps the locations whose next appointment falls within
/// `[now, now + days]` (both ends inclusive), sorted ascending by that time.
///
/// Locations with an unknown appointment time are dropped. The sort is
/// stable, so locations with identical times keep their input order.
#[must_use]
pub fn filter_in_range(
    locations: Vec<Location>,
    days: u32,
    now: NaiveDateTime,
) -> Vec<Location> {
    let end = now
        .checked_add_signed(TimeDelta::days(i64::from(days)))
        .unwrap_or(NaiveDateTime::MAX);

    let mut in_range: Vec<Location> = locations
        .into_iter()
        .filter(|location| {
            location
                .next_appointment_date
                .is_some_and(|date| date >= now && date <= end)
        })
        .collect();

    in_range.sort_by_key(|location| location.next_appointment_date);
    in_range
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn location(name: &str, date: Option<NaiveDateTime>) -> Location {
        Location {
            name: name.to_string(),
            street: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "NJ".to_string(),
            zip_code: "07081".to_string(),
            phone: "555-1234".to_string(),
            appointments: Some(1),
            next_appointment_date: date,
        }
    }

    fn names(locations: &[Location]) -> Vec<&str> {
        locations.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn keeps_only_locations_within_window_sorted() {
        let now = now();
        let input = vec![
            location("C", Some(now + TimeDelta::days(5))),
            location("B", Some(now + TimeDelta::days(3))),
            location("A", Some(now + TimeDelta::days(1))),
        ];
        let filtered = filter_in_range(input, 3, now);
        assert_eq!(names(&filtered), vec!["A", "B"]);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let now = now();
        let input = vec![
            location("end", Some(now + TimeDelta::days(2))),
            location("start", Some(now)),
            location("past", Some(now - TimeDelta::seconds(1))),
            location("after", Some(now + TimeDelta::days(2) + TimeDelta::seconds(1))),
        ];
        let filtered = filter_in_range(input, 2, now);
        assert_eq!(names(&filtered), vec!["start", "end"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter_in_range(Vec::new(), 3, now()).is_empty());
    }

    #[test]
    fn nothing_in_range_yields_empty_output() {
        let now = now();
        let input = vec![
            location("A", Some(now + TimeDelta::days(4))),
            location("B", Some(now + TimeDelta::days(7))),
            location("C", Some(now + TimeDelta::days(5))),
        ];
        assert!(filter_in_range(input, 3, now).is_empty());
    }

    #[test]
    fn unknown_dates_are_dropped() {
        let now = now();
        let input = vec![location("A", None), location("B", Some(now))];
        assert_eq!(names(&filter_in_range(input, 1, now)), vec!["B"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let now = now();
        let same = Some(now + TimeDelta::hours(6));
        let input = vec![
            location("first", same),
            location("early", Some(now + TimeDelta::hours(1))),
            location("second", same),
        ];
        assert_eq!(
            names(&filter_in_range(input, 1, now)),
            vec!["early", "first", "second"]
        );
    }

    #[test]
    fn filtering_its_own_output_is_a_no_op() {
        let now = now();
        let input = vec![
            location("C", Some(now + TimeDelta::hours(30))),
            location("A", Some(now + TimeDelta::hours(2))),
            location("X", Some(now + TimeDelta::days(9))),
            location("B", Some(now + TimeDelta::hours(2))),
        ];
        let once = filter_in_range(input, 2, now);
        let twice = filter_in_range(once.clone(), 2, now);
        assert_eq!(once, twice);
        assert!(once.iter().all(|l| {
            let date = l.next_appointment_date.unwrap();
            date >= now && date <= now + TimeDelta::days(2)
        }));
    }
}
