//! Reference data: locations, add-on activities, hotels and cab models.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::constants::{DEFAULT_ACTIVITY_CATEGORY, NEARBY_LIMIT};
use crate::island::Island;
use crate::location::{Location, Mood};
use crate::numbers::coerce_amount;

const DEFAULT_HOTEL_DATA: &str = include_str!("../data/hotels.json");
const DEFAULT_CAB_DATA: &str = include_str!("../data/cab_models.json");

/// An optional add-on activity with a flat per-booking price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub islands: Vec<Island>,
    /// Whole rupees, never negative.
    pub base_price: i64,
    pub category: String,
}

impl Activity {
    /// Normalize a raw activity record; records without an id get `activity-<index>`.
    #[must_use]
    pub fn normalize(raw: &Value, index: usize) -> Self {
        let id = text_id(raw.get("id")).unwrap_or_else(|| format!("activity-{index}"));
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| id.clone(), str::to_string);
        let islands = ["operatedIn", "islands"]
            .iter()
            .find_map(|key| raw.get(key).and_then(Value::as_array))
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .filter(|label| !label.trim().is_empty())
                    .map(Island::resolve)
                    .collect()
            })
            .unwrap_or_default();
        let price = raw
            .get("basePriceINR")
            .filter(|value| !value.is_null())
            .or_else(|| raw.get("price"));
        let category = ["category", "type"]
            .iter()
            .find_map(|key| raw.get(key).and_then(Value::as_str))
            .unwrap_or(DEFAULT_ACTIVITY_CATEGORY)
            .to_string();

        Self {
            id,
            name,
            islands,
            base_price: coerce_amount(price),
            category,
        }
    }
}

/// Activities recommended for a given location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationActivities {
    pub location_id: String,
    pub activity_ids: Vec<String>,
}

impl LocationActivities {
    #[must_use]
    pub fn normalize(raw: &Value) -> Option<Self> {
        let location_id = text_id(raw.get("locationId").or_else(|| raw.get("location_id")))?;
        let activity_ids = ["adventureIds", "adventure_ids"]
            .iter()
            .find_map(|key| raw.get(key).and_then(Value::as_array))
            .map(|ids| ids.iter().filter_map(|id| text_id(Some(id))).collect())
            .unwrap_or_default();
        Some(Self {
            location_id,
            activity_ids,
        })
    }
}

fn text_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn records(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

/// A bookable hotel with a per-night rate in whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub tier: String,
    #[serde(rename = "sellPrice")]
    pub sell_price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandHotels {
    pub island: Island,
    pub hotels: Vec<Hotel>,
}

/// Hotels offered on each island.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelCatalog {
    pub islands: Vec<IslandHotels>,
}

impl HotelCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_HOTEL_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<HotelCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a hotel catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn hotels_for(&self, island: &Island) -> &[Hotel] {
        self.islands
            .iter()
            .find(|entry| entry.island == *island)
            .map(|entry| entry.hotels.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn find(&self, island: &Island, hotel_id: &str) -> Option<&Hotel> {
        self.hotels_for(island)
            .iter()
            .find(|hotel| hotel.id == hotel_id)
    }
}

/// A ground-transport cab model with a full-day rate in whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabModel {
    pub id: String,
    pub label: String,
    pub category: String,
    #[serde(rename = "dayRate")]
    pub day_rate: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CabCatalog {
    pub models: Vec<CabModel>,
}

impl CabCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_CAB_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<CabCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a cab catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn find(&self, model_id: &str) -> Option<&CabModel> {
        self.models.iter().find(|model| model.id == model_id)
    }

    /// Day rate for a model; unknown ids fall back to the first listed model.
    #[must_use]
    pub fn day_rate(&self, model_id: &str) -> i64 {
        self.find(model_id)
            .or_else(|| self.models.first())
            .map_or(0, |model| model.day_rate.max(0))
    }
}

/// One location with its same-island neighbours and linked activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetail<'a> {
    pub location: &'a Location,
    pub nearby: Vec<&'a Location>,
    pub activities: Vec<&'a Activity>,
}

/// All reference collections the planner works from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub locations: Vec<Location>,
    pub activities: Vec<Activity>,
    pub location_activities: Vec<LocationActivities>,
    /// Reserved; not used by pricing.
    pub ferries: Vec<Value>,
}

impl ReferenceData {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build reference data from raw collections. Anything that is not a JSON
    /// array is treated as an empty collection.
    #[must_use]
    pub fn from_values(
        locations: &Value,
        activities: &Value,
        location_activities: &Value,
        ferries: &Value,
    ) -> Self {
        let mut seen = HashSet::new();
        let locations = records(locations)
            .iter()
            .enumerate()
            .map(|(index, raw)| Location::normalize(raw, index))
            .filter(|location| {
                let fresh = seen.insert(location.id.clone());
                if !fresh {
                    log::warn!("dropping duplicate location id {}", location.id);
                }
                fresh
            })
            .collect();
        let activities = records(activities)
            .iter()
            .enumerate()
            .map(|(index, raw)| Activity::normalize(raw, index))
            .collect();
        let location_activities = records(location_activities)
            .iter()
            .filter_map(LocationActivities::normalize)
            .collect();

        Self {
            locations,
            activities,
            location_activities,
            ferries: records(ferries).to_vec(),
        }
    }

    #[must_use]
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    #[must_use]
    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    /// Locations a traveller may pick; airport entries are fixtures, not stops.
    pub fn selectable_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|location| !location.name.to_lowercase().contains("airport"))
    }

    /// Selectable locations narrowed by island and mood; `None` means "All".
    #[must_use]
    pub fn filter_locations(&self, island: Option<&Island>, mood: Option<&Mood>) -> Vec<&Location> {
        self.selectable_locations()
            .filter(|location| island.is_none_or(|island| location.island == *island))
            .filter(|location| mood.is_none_or(|mood| location.has_mood(mood)))
            .collect()
    }

    /// Islands present in the data in encounter order, or the canonical list when empty.
    #[must_use]
    pub fn islands(&self) -> Vec<Island> {
        let mut islands: Vec<Island> = Vec::new();
        for location in &self.locations {
            if !islands.contains(&location.island) {
                islands.push(location.island.clone());
            }
        }
        if islands.is_empty() {
            islands.extend(Island::CANONICAL);
        }
        islands
    }

    /// Selected locations in catalog order; unknown ids are skipped.
    #[must_use]
    pub fn selected_locations(&self, ids: &[String]) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|location| ids.contains(&location.id))
            .collect()
    }

    /// Islands the selected activities operate on, in first-seen order.
    #[must_use]
    pub fn activity_islands(&self, ids: &[String]) -> Vec<Island> {
        let mut islands: Vec<Island> = Vec::new();
        for activity in self.activities.iter().filter(|a| ids.contains(&a.id)) {
            for island in &activity.islands {
                if !islands.contains(island) {
                    islands.push(island.clone());
                }
            }
        }
        islands
    }

    fn linked_activity_ids<'a>(&'a self, location_ids: &[&str]) -> HashSet<&'a str> {
        self.location_activities
            .iter()
            .filter(|link| location_ids.contains(&link.location_id.as_str()))
            .flat_map(|link| link.activity_ids.iter().map(String::as_str))
            .collect()
    }

    /// Activities worth offering for a selection.
    ///
    /// Prefers activities linked to a selected location, then activities on a
    /// selected location's island, then everything.
    #[must_use]
    pub fn suggested_activities(&self, selected_ids: &[String]) -> Vec<&Activity> {
        let ids: Vec<&str> = selected_ids.iter().map(String::as_str).collect();
        let linked = self.linked_activity_ids(&ids);
        let mapped: Vec<&Activity> = self
            .activities
            .iter()
            .filter(|activity| linked.contains(activity.id.as_str()))
            .collect();
        if !mapped.is_empty() {
            return mapped;
        }

        let selected_islands: Vec<&Island> = self
            .selected_locations(selected_ids)
            .into_iter()
            .map(|location| &location.island)
            .collect();
        let on_island: Vec<&Activity> = self
            .activities
            .iter()
            .filter(|activity| activity.islands.iter().any(|i| selected_islands.contains(&i)))
            .collect();
        if on_island.is_empty() {
            self.activities.iter().collect()
        } else {
            on_island
        }
    }

    /// Detail view for one location, or `None` when the id is unknown.
    #[must_use]
    pub fn location_detail(&self, id: &str) -> Option<LocationDetail<'_>> {
        let location = self.location(id)?;
        let nearby = self
            .locations
            .iter()
            .filter(|other| other.island == location.island && other.id != location.id)
            .take(NEARBY_LIMIT)
            .collect();
        let linked = self.linked_activity_ids(&[id]);
        let activities = self
            .activities
            .iter()
            .filter(|activity| linked.contains(activity.id.as_str()))
            .collect();
        Some(LocationDetail {
            location,
            nearby,
            activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ReferenceData {
        ReferenceData::from_values(
            &json!([
                { "id": "a", "name": "Airport Lounge", "island": "Port Blair" },
                { "id": "b", "name": "Radhanagar Beach", "island": "Havelock" },
                { "id": "c", "name": "Elephant Beach", "island": "Havelock", "durationHrs": 4 },
                { "id": "b", "name": "Duplicate", "island": "Neil" },
                { "id": "d", "name": "Natural Bridge", "island": "Neil" }
            ]),
            &json!([
                { "id": "x", "name": "Scuba", "operatedIn": ["Havelock"], "basePriceINR": 4500 },
                { "id": "y", "name": "Glass Boat", "islands": ["Neil"], "price": 1200 },
                { "id": "z", "name": "Odd", "basePriceINR": null, "price": "n/a" }
            ]),
            &json!([{ "location_id": "c", "adventure_ids": ["x"] }]),
            &json!({ "not": "a list" }),
        )
    }

    #[test]
    fn from_values_tolerates_shapes() {
        let data = sample();
        assert_eq!(data.locations.len(), 4);
        assert_eq!(data.location("b").map(|l| l.name.as_str()), Some("Radhanagar Beach"));
        assert_eq!(data.activity("y").map(|a| a.base_price), Some(1200));
        assert_eq!(data.activity("z").map(|a| a.base_price), Some(0));
        assert!(data.ferries.is_empty());

        let empty = ReferenceData::from_values(&Value::Null, &json!(3), &json!("x"), &json!([]));
        assert_eq!(empty, ReferenceData::empty());
    }

    #[test]
    fn airport_entries_are_not_selectable() {
        let data = sample();
        assert!(data.selectable_locations().all(|l| l.id != "a"));
        let havelock = data.filter_locations(Some(&Island::Havelock), None);
        assert_eq!(havelock.len(), 2);
        let active = data.filter_locations(None, Some(&Mood::Active));
        assert_eq!(active.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn suggestions_fall_back_in_order() {
        let data = sample();
        let mapped = data.suggested_activities(&["c".to_string()]);
        assert_eq!(mapped.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), ["x"]);

        let by_island = data.suggested_activities(&["d".to_string()]);
        assert_eq!(by_island.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(), ["y"]);

        let everything = data.suggested_activities(&[]);
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn detail_lists_neighbours_and_links() {
        let data = sample();
        let detail = data.location_detail("c").expect("known location");
        assert_eq!(detail.nearby.len(), 1);
        assert_eq!(detail.nearby[0].id, "b");
        assert_eq!(detail.activities.len(), 1);
        assert!(data.location_detail("missing").is_none());
    }

    #[test]
    fn islands_default_to_canonical_list() {
        assert_eq!(ReferenceData::empty().islands().len(), 8);
        assert_eq!(
            sample().islands(),
            vec![Island::PortBlair, Island::Havelock, Island::Neil]
        );
    }

    #[test]
    fn static_catalogs_parse() {
        let hotels = HotelCatalog::default_catalog();
        assert_eq!(hotels.islands.len(), 8);
        assert_eq!(
            hotels.find(&Island::Havelock, "hl_h2").map(|h| h.sell_price),
            Some(6999)
        );
        assert!(hotels.find(&Island::Neil, "hl_h2").is_none());

        let cabs = CabCatalog::default_catalog();
        assert_eq!(cabs.day_rate("innova"), 3800);
        assert_eq!(cabs.day_rate("hovercraft"), 2500);
        assert_eq!(CabCatalog::default().day_rate("suv"), 0);
    }
}
