//! Canonical appointment location record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display value for a location whose next appointment time is not known.
pub const UNKNOWN_DATE: &str = "Unknown";

/// A service location with at least one open appointment slot.
///
/// Informational fields are always populated (defaulted when the source is
/// blank). `next_appointment_date` is `None` only for the "Unknown" sentinel,
/// which the scraper never produces in practice: records whose date fails to
/// parse are discarded instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub appointments: Option<u32>,
    /// Local wall-clock time as published by the booking page.
    pub next_appointment_date: Option<NaiveDateTime>,
}

impl Location {
    /// Next appointment formatted as `03/15/2024 09:00 AM`, or `"Unknown"`.
    #[must_use]
    pub fn next_appointment_display(&self) -> String {
        self.next_appointment_date.map_or_else(
            || UNKNOWN_DATE.to_string(),
            |date| date.format("%m/%d/%Y %I:%M %p").to_string(),
        )
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Location Name: {}", self.name)?;
        writeln!(
            f,
            "Address: {}, {}, {}, {}",
            self.street, self.city, self.state, self.zip_code
        )?;
        writeln!(f, "Phone Number: {}", self.phone)?;
        match self.appointments {
            Some(count) => writeln!(f, "Appointments: {count}")?,
            None => writeln!(f, "Appointments: {UNKNOWN_DATE}")?,
        }
        write!(f, "Next Appointment Date: {}", self.next_appointment_display())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample(date: Option<NaiveDateTime>) -> Location {
        Location {
            name: "Bayonne".to_string(),
            street: "1010 Hudson Street".to_string(),
            city: "Bayonne".to_string(),
            state: "NJ".to_string(),
            zip_code: "07002".to_string(),
            phone: "201-555-0100".to_string(),
            appointments: Some(4),
            next_appointment_date: date,
        }
    }

    #[test]
    fn display_includes_every_field() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let text = sample(Some(date)).to_string();
        assert_eq!(
            text,
            "Location Name: Bayonne\n\
             Address: 1010 Hudson Street, Bayonne, NJ, 07002\n\
             Phone Number: 201-555-0100\n\
             Appointments: 4\n\
             Next Appointment Date: 03/15/2024 02:30 PM"
        );
    }

    #[test]
    fn missing_date_displays_unknown() {
        let location = sample(None);
        assert_eq!(location.next_appointment_display(), "Unknown");
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let value = serde_json::to_value(sample(None)).unwrap();
        assert_eq!(value["zip_code"], "07002");
        assert!(value["next_appointment_date"].is_null());
    }
}
