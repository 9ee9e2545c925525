//! Location selection types and the geography/location wire contracts.

use crate::error::SyncError;
use crate::messages;
use serde::{Deserialize, Deserializer, Serialize};

/// A state or city as listed by the geography API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

impl Region {
    /// Decode a state or city list. Anything other than a JSON array of
    /// `{id, name}` objects is rejected as malformed.
    pub fn list_from_json(body: &str) -> Result<Vec<Region>, SyncError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if !value.is_array() {
            return Err(SyncError::Malformed("expected a JSON array".to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Display name for `id` within `regions`.
    pub fn name_of<'a>(regions: &'a [Region], id: &str) -> Option<&'a str> {
        regions
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
    }
}

/// The state/city pair the user is building.
///
/// A city is only meaningful under the state it was chosen for, so
/// choosing a state always drops the city.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationSelection {
    state_id: Option<String>,
    city_id: Option<String>,
}

impl LocationSelection {
    pub fn state_id(&self) -> Option<&str> {
        self.state_id.as_deref()
    }

    pub fn city_id(&self) -> Option<&str> {
        self.city_id.as_deref()
    }

    pub fn choose_state(&mut self, state_id: &str) {
        self.state_id = non_empty(state_id);
        self.city_id = None;
    }

    pub fn choose_city(&mut self, city_id: &str) {
        self.city_id = non_empty(city_id);
    }

    pub fn is_complete(&self) -> bool {
        self.state_id.is_some() && self.city_id.is_some()
    }

    pub fn clear(&mut self) {
        self.state_id = None;
        self.city_id = None;
    }
}

fn non_empty(id: &str) -> Option<String> {
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Where the picker modal is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    Closed,
    LoadingStates,
    StatesReady,
    StatesUnavailable,
    LoadingCities,
    CitySelectable,
    CitiesUnavailable,
    CitySelected,
    Saving,
    Saved,
    SaveFailed,
}

/// What a state or city `<select>` currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dropdown {
    /// Disabled with a hint, e.g. "choose a state first"
    Placeholder(String),
    /// Disabled while the list is fetched
    Loading(String),
    Ready { prompt: String, options: Vec<Region> },
    /// Left enabled so the user can retry by reopening
    Failed(String),
}

impl Dropdown {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Dropdown::Ready { .. } | Dropdown::Failed(_))
    }

    pub fn options(&self) -> &[Region] {
        match self {
            Dropdown::Ready { options, .. } => options,
            _ => &[],
        }
    }

    /// Text of the leading empty-value option.
    pub fn caption(&self) -> &str {
        match self {
            Dropdown::Placeholder(text) | Dropdown::Loading(text) | Dropdown::Failed(text) => text,
            Dropdown::Ready { prompt, .. } => prompt,
        }
    }

    pub fn city_placeholder() -> Self {
        Dropdown::Placeholder(messages::CITIES_PLACEHOLDER.to_string())
    }
}

/// Body of `POST /order/save-location/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveLocationRequest {
    pub state_id: String,
    pub city_id: String,
    pub state_name: String,
    pub city_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationData {
    pub full_address: String,
}

/// Response of the save/get location endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<LocationData>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LocationEnvelope {
    pub fn from_json(body: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(body)?)
    }

    /// The resolved full address, or why there is none.
    pub fn into_address(self) -> Result<String, SyncError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data.full_address),
            (true, None) => Err(SyncError::Malformed("missing data.full_address".to_string())),
            (false, _) => Err(SyncError::Rejected(self.error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_list_accepts_numeric_ids() {
        let regions =
            Region::list_from_json(r#"[{"id":1,"name":"تهران"},{"id":"2","name":"البرز"}]"#)
                .unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, "1");
        assert_eq!(regions[1].id, "2");
        assert_eq!(Region::name_of(&regions, "2"), Some("البرز"));
        assert_eq!(Region::name_of(&regions, "3"), None);
    }

    #[test]
    fn test_region_list_rejects_non_array() {
        let err = Region::list_from_json(r#"{"error":"rate limited"}"#).unwrap_err();
        assert_eq!(err, SyncError::Malformed("expected a JSON array".to_string()));
        assert!(matches!(
            Region::list_from_json("not json"),
            Err(SyncError::Malformed(_))
        ));
    }

    #[test]
    fn test_choosing_state_clears_city() {
        let mut selection = LocationSelection::default();
        selection.choose_state("1");
        selection.choose_city("5");
        assert!(selection.is_complete());

        selection.choose_state("2");
        assert_eq!(selection.state_id(), Some("2"));
        assert_eq!(selection.city_id(), None);
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_empty_ids_unset() {
        let mut selection = LocationSelection::default();
        selection.choose_state("");
        assert_eq!(selection.state_id(), None);
        selection.choose_state("1");
        selection.choose_city("  ");
        assert_eq!(selection.city_id(), None);
    }

    #[test]
    fn test_location_envelope() {
        let ok = LocationEnvelope::from_json(r#"{"success":true,"data":{"full_address":"تهران، تهران"}}"#)
            .unwrap()
            .into_address()
            .unwrap();
        assert_eq!(ok, "تهران، تهران");

        let err = LocationEnvelope::from_json(r#"{"success":false,"error":"X"}"#)
            .unwrap()
            .into_address()
            .unwrap_err();
        assert_eq!(err, SyncError::Rejected(Some("X".to_string())));
    }

    #[test]
    fn test_dropdown_enablement() {
        assert!(!Dropdown::city_placeholder().is_enabled());
        assert!(!Dropdown::Loading("..".to_string()).is_enabled());
        assert!(Dropdown::Failed("x".to_string()).is_enabled());
        let ready = Dropdown::Ready {
            prompt: "p".to_string(),
            options: vec![],
        };
        assert!(ready.is_enabled());
        assert_eq!(ready.caption(), "p");
    }
}
