//! Parsing and joining of the `locationData` and `timeData` arrays.
//!
//! Field values are kept as raw [`serde_json::Value`]s so that a numeric
//! `Zip` or a missing `Street1` never fails the whole batch; validation and
//! defaulting happen later in [`crate::factory`].

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ScraperError;

/// A location record from the `locationData` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationInfo {
    #[serde(rename = "Name", default)]
    pub name: Option<Value>,
    #[serde(rename = "Street1", default)]
    pub street: Option<Value>,
    #[serde(rename = "City", default)]
    pub city: Option<Value>,
    #[serde(rename = "State", default)]
    pub state: Option<Value>,
    #[serde(rename = "Zip", default)]
    pub zip: Option<Value>,
    #[serde(rename = "PhoneNumber", default)]
    pub phone: Option<Value>,
    /// Nested appointment types; the first entry carries the join key.
    #[serde(rename = "LocAppointments", default)]
    pub loc_appointments: Option<Value>,
}

impl LocationInfo {
    /// `LocAppointments[0].LocationId`, if present and a usable id.
    #[must_use]
    pub fn join_key(&self) -> Option<i64> {
        self.loc_appointments
            .as_ref()?
            .as_array()?
            .first()?
            .get("LocationId")
            .and_then(location_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
            && self.phone.is_none()
            && self.loc_appointments.is_none()
    }
}

/// A slot summary from the `timeData` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeInfo {
    #[serde(rename = "LocationId", default)]
    pub location_id: Option<Value>,
    /// Either `"No Appointments Available"` or
    /// `"<N> Appointments Available Next Available: 03/15/2024 09:00 AM"`.
    #[serde(rename = "FirstOpenSlot", default)]
    pub first_open_slot: Option<String>,
}

impl TimeInfo {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location_id.is_none() && self.first_open_slot.is_none()
    }
}

/// `timeData` records keyed by `LocationId`.
pub type TimeMap = HashMap<i64, TimeInfo>;

#[derive(Debug, Clone)]
pub struct JoinedDatasets {
    pub locations: Vec<LocationInfo>,
    pub times: TimeMap,
}

/// Parses both extracted arrays and indexes the time records by `LocationId`.
///
/// Returns `Ok(None)` when any time record lacks a usable `LocationId`: one
/// bad record invalidates the whole batch.
///
/// # Errors
///
/// - [`ScraperError::MissingInput`] if either input is absent or blank.
/// - [`ScraperError::MalformedData`] if either input is not a JSON array of
///   objects.
pub fn parse(
    locations: Option<&str>,
    times: Option<&str>,
) -> Result<Option<JoinedDatasets>, ScraperError> {
    let locations = non_blank(locations).ok_or(ScraperError::MissingInput {
        dataset: "locationData",
    })?;
    let times = non_blank(times).ok_or(ScraperError::MissingInput {
        dataset: "timeData",
    })?;

    let locations: Vec<LocationInfo> =
        serde_json::from_str(locations).map_err(|source| ScraperError::MalformedData {
            context: "locationData".to_string(),
            source,
        })?;
    let records: Vec<TimeInfo> =
        serde_json::from_str(times).map_err(|source| ScraperError::MalformedData {
            context: "timeData".to_string(),
            source,
        })?;

    let mut time_map = TimeMap::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let Some(id) = record.location_id.as_ref().and_then(location_id) else {
            tracing::warn!(
                index,
                location_id = ?record.location_id,
                "timeData record has no usable LocationId; discarding batch"
            );
            return Ok(None);
        };
        time_map.insert(id, record);
    }

    Ok(Some(JoinedDatasets {
        locations,
        times: time_map,
    }))
}

/// Looks up the time record for `info` by its nested `LocationId`.
///
/// A missing nested id or an id with no time record is logged and yields
/// `None`; it is never an error.
#[must_use]
pub fn get_matching_time<'a>(info: &LocationInfo, times: &'a TimeMap) -> Option<&'a TimeInfo> {
    let Some(id) = info.join_key() else {
        tracing::warn!(
            name = %field_text(info.name.as_ref()),
            "location has no LocAppointments[0].LocationId"
        );
        return None;
    };

    let matched = times.get(&id);
    if matched.is_none() {
        tracing::warn!(
            location_id = id,
            name = %field_text(info.name.as_ref()),
            "no timeData entry for location"
        );
    }
    matched
}

/// Interprets a JSON id as a non-zero integer.
///
/// Numeric strings are accepted; zero, null, booleans and anything else
/// count as absent.
fn location_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

/// String form of a scalar JSON field. Null, missing and structured values
/// read as empty.
pub(crate) fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn non_blank(input: Option<&str>) -> Option<&str> {
    input.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
