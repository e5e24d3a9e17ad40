//! Validation and normalization of joined records into [`Location`]s.

use chrono::NaiveDateTime;
use serde_json::Value;
use slotwatch_core::Location;

use crate::dataset::{field_text, LocationInfo, TimeInfo};

/// `FirstOpenSlot` value for a location with nothing bookable.
pub const NO_APPOINTMENTS: &str = "No Appointments Available";

const NEXT_AVAILABLE_MARKER: &str = "Next Available: ";
const SLOT_DATE_FORMAT: &str = "%m/%d/%Y %I:%M %p";
const NOT_AVAILABLE: &str = "N/A";

/// Builds a [`Location`] from a joined pair.
///
/// Informational fields are defaulted when blank or invalid. The appointment
/// count and the next-available time must both parse; if either fails the
/// candidate is discarded and `None` is returned.
#[must_use]
pub fn create_location(info: &LocationInfo, time: &TimeInfo) -> Option<Location> {
    if info.is_empty() || time.is_empty() {
        return None;
    }

    let Some(slot) = time.first_open_slot.as_deref() else {
        tracing::warn!(
            location_id = ?time.location_id,
            "timeData record has no FirstOpenSlot"
        );
        return None;
    };

    let Some(appointments) = parse_appointment_count(slot) else {
        tracing::warn!(slot, "could not parse appointment count; skipping location");
        return None;
    };

    let Some(next_appointment_date) = parse_next_available(slot) else {
        tracing::warn!(slot, "could not parse next available date; skipping location");
        return None;
    };

    Some(Location {
        name: valid_field(info.name.as_ref(), "Unknown Location"),
        street: valid_field(info.street.as_ref(), "Unknown Street"),
        city: valid_field(info.city.as_ref(), "Unknown City"),
        state: valid_field(info.state.as_ref(), "Unknown State"),
        zip_code: valid_zip(info.zip.as_ref()),
        phone: valid_phone(info.phone.as_ref()),
        appointments: Some(appointments),
        next_appointment_date: Some(next_appointment_date),
    })
}

/// Text before the first whitespace in `slot`, parsed as a slot count.
///
/// Leading whitespace yields an empty token and therefore `None`.
#[must_use]
pub fn parse_appointment_count(slot: &str) -> Option<u32> {
    slot.split(char::is_whitespace).next()?.parse::<u32>().ok()
}

/// Timestamp following `"Next Available: "` in `slot`, on a 12-hour clock.
#[must_use]
pub fn parse_next_available(slot: &str) -> Option<NaiveDateTime> {
    let (_, rest) = slot.split_once(NEXT_AVAILABLE_MARKER)?;
    NaiveDateTime::parse_from_str(rest.trim(), SLOT_DATE_FORMAT).ok()
}

fn valid_field(value: Option<&Value>, default: &str) -> String {
    let text = field_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Kept verbatim only when every character is an ASCII digit.
fn valid_zip(value: Option<&Value>) -> String {
    let text = field_text(value);
    if is_all_digits(&text) {
        text
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Kept (trimmed) when only digits remain after removing spaces and hyphens.
fn valid_phone(value: Option<&Value>) -> String {
    let text = field_text(value);
    let digits: String = text.chars().filter(|c| *c != ' ' && *c != '-').collect();
    if is_all_digits(&digits) {
        text.trim().to_string()
    } else {
        NOT_AVAILABLE.to_string()
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[path = "factory_test.rs"]
mod tests;
