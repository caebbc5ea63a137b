//! Itinerary days and the items scheduled on them.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::island::{Island, LegKind};
use crate::location::{BestTimes, Location};

/// Raised when a user-supplied label names no known option.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} `{label}` (expected one of: {expected})")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
    pub expected: &'static str,
}

/// How the traveller gets around on a given day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    #[default]
    #[serde(rename = "Point-to-Point")]
    PointToPoint,
    #[serde(rename = "Cab (full day)")]
    FullDayCab,
    #[serde(rename = "Day Cab")]
    DayCab,
    #[serde(rename = "Scooter")]
    Scooter,
    /// Leg and departure days, where no local transport applies.
    #[serde(rename = "—")]
    NotApplicable,
}

impl TransportMode {
    pub const ALL: [Self; 5] = [
        Self::PointToPoint,
        Self::FullDayCab,
        Self::DayCab,
        Self::Scooter,
        Self::NotApplicable,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PointToPoint => "Point-to-Point",
            Self::FullDayCab => "Cab (full day)",
            Self::DayCab => "Day Cab",
            Self::Scooter => "Scooter",
            Self::NotApplicable => "—",
        }
    }

    /// Whether the day is charged a cab model's full-day rate.
    #[must_use]
    pub const fn is_cab(self) -> bool {
        matches!(self, Self::FullDayCab | Self::DayCab)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransportMode {
    type Err = ParseLabelError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let wanted = label.trim().to_lowercase();
        let compact: String = wanted.chars().filter(char::is_ascii_alphanumeric).collect();
        Self::ALL
            .into_iter()
            .find(|mode| {
                mode.label().to_lowercase() == wanted
                    || format!("{mode:?}").to_lowercase() == compact
            })
            .ok_or_else(|| ParseLabelError {
                kind: "transport mode",
                label: label.to_string(),
                expected: "Point-to-Point, Cab (full day), Day Cab, Scooter",
            })
    }
}

/// An inter-island transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: Island,
    pub to: Island,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Leg {
    #[must_use]
    pub fn new(kind: LegKind, from: &Island, to: &Island, time: Option<String>) -> Self {
        Self {
            from: from.clone(),
            to: to.clone(),
            name: format!("{} {from} → {to}", kind.label()),
            time,
        }
    }
}

/// A scheduled visit to a location, caching what the day view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub location_id: String,
    pub name: String,
    pub duration_hrs: f64,
    pub best_times: BestTimes,
}

impl From<&Location> for Visit {
    fn from(location: &Location) -> Self {
        Self {
            location_id: location.id.clone(),
            name: location.name.clone(),
            duration_hrs: location.duration_hrs,
            best_times: location.best_times.clone(),
        }
    }
}

/// One entry on a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Arrival { name: String },
    Transfer { name: String },
    Location(Visit),
    Ferry(Leg),
    Boat(Leg),
    Departure { name: String },
}

impl Item {
    #[must_use]
    pub fn leg(kind: LegKind, leg: Leg) -> Self {
        match kind {
            LegKind::Ferry => Self::Ferry(leg),
            LegKind::Boat => Self::Boat(leg),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Arrival { name } | Self::Transfer { name } | Self::Departure { name } => name,
            Self::Location(visit) => &visit.name,
            Self::Ferry(leg) | Self::Boat(leg) => &leg.name,
        }
    }

    #[must_use]
    pub const fn leg_kind(&self) -> Option<LegKind> {
        match self {
            Self::Ferry(_) => Some(LegKind::Ferry),
            Self::Boat(_) => Some(LegKind::Boat),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_visit(&self) -> Option<&Visit> {
        match self {
            Self::Location(visit) => Some(visit),
            _ => None,
        }
    }
}

/// One itinerary day at an island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub island: Island,
    pub items: Vec<Item>,
    pub transport: TransportMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Day {
    #[must_use]
    pub fn new(island: Island, items: Vec<Item>, transport: TransportMode) -> Self {
        Self {
            island,
            items,
            transport,
            date: None,
        }
    }

    #[must_use]
    pub fn has_leg(&self) -> bool {
        self.items.iter().any(|item| item.leg_kind().is_some())
    }

    #[must_use]
    pub fn is_departure(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::Departure { .. }))
    }

    #[must_use]
    pub fn is_arrival(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::Arrival { .. }))
    }

    /// A day spent on the island overnight: neither travelling nor flying out.
    #[must_use]
    pub fn counts_as_night(&self) -> bool {
        !self.has_leg() && !self.is_departure()
    }

    pub fn visits(&self) -> impl Iterator<Item = &Visit> {
        self.items.iter().filter_map(Item::as_visit)
    }

    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.visits().count()
    }

    #[must_use]
    pub fn leg_count(&self, kind: LegKind) -> usize {
        self.items
            .iter()
            .filter(|item| item.leg_kind() == Some(kind))
            .count()
    }

    /// Total scheduled visit hours.
    #[must_use]
    pub fn visit_hours(&self) -> f64 {
        self.visits().map(|visit| visit.duration_hrs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_labels_parse_loosely() {
        assert_eq!("Scooter".parse(), Ok(TransportMode::Scooter));
        assert_eq!("day cab".parse(), Ok(TransportMode::DayCab));
        assert_eq!("full-day-cab".parse(), Ok(TransportMode::FullDayCab));
        assert_eq!("Cab (full day)".parse(), Ok(TransportMode::FullDayCab));
        assert_eq!(
            "point to point".parse(),
            Ok(TransportMode::PointToPoint)
        );
        assert!("hovercraft".parse::<TransportMode>().is_err());
    }

    #[test]
    fn transport_serializes_as_label() {
        let json = serde_json::to_string(&TransportMode::FullDayCab).unwrap();
        assert_eq!(json, "\"Cab (full day)\"");
    }

    #[test]
    fn night_rules_exclude_legs_and_departure() {
        let leg = Leg::new(LegKind::Ferry, &Island::PortBlair, &Island::Havelock, None);
        assert_eq!(leg.name, "Ferry Port Blair (South Andaman) → Havelock (Swaraj Dweep)");

        let ferry_day = Day::new(
            Island::PortBlair,
            vec![Item::leg(LegKind::Ferry, leg)],
            TransportMode::NotApplicable,
        );
        assert!(!ferry_day.counts_as_night());
        assert_eq!(ferry_day.leg_count(LegKind::Ferry), 1);
        assert_eq!(ferry_day.leg_count(LegKind::Boat), 0);

        let departure = Day::new(
            Island::PortBlair,
            vec![Item::Departure {
                name: "Fly out".into(),
            }],
            TransportMode::NotApplicable,
        );
        assert!(!departure.counts_as_night());

        let empty = Day::new(Island::Neil, Vec::new(), TransportMode::PointToPoint);
        assert!(empty.counts_as_night());
        assert_eq!(empty.stop_count(), 0);
    }

    #[test]
    fn items_serialize_with_type_tag() {
        let item = Item::Arrival {
            name: "Land".into(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "arrival");
        assert_eq!(value["name"], "Land");
    }
}
