//! Location records: normalization of heterogeneous raw JSON and mood inference.
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::OnceLock;

use crate::constants::{
    DEFAULT_DURATION_HRS, MOOD_ACTIVE_MIN_HRS, MOOD_BALANCED_MIN_HRS, MOOD_RELAXED_MAX_HRS,
    UNNAMED_LOCATION,
};
use crate::island::Island;
use crate::numbers::finite_number;

/// Preferred time of day for a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Unspecified,
}

impl TimeOfDay {
    /// Classify a free-form best-time label.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let lowered = label.to_lowercase();
        if lowered.contains("morning") || lowered.contains("sunrise") {
            Self::Morning
        } else if lowered.contains("afternoon") {
            Self::Afternoon
        } else if lowered.contains("evening") || lowered.contains("sunset") {
            Self::Evening
        } else {
            Self::Unspecified
        }
    }

    /// Sort rank used when ordering a day: morning first, untagged last.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Evening => 2,
            Self::Unspecified => 3,
        }
    }
}

pub type BestTimes = SmallVec<[TimeOfDay; 2]>;
pub type Moods = SmallVec<[Mood; 4]>;

/// Rank of the earliest tagged time; untagged locations sort last.
#[must_use]
pub fn best_time_rank(times: &[TimeOfDay]) -> u8 {
    times
        .iter()
        .map(|time| time.rank())
        .min()
        .unwrap_or(TimeOfDay::Unspecified.rank())
}

/// Coarse thematic label used to filter locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Relaxed,
    Balanced,
    Active,
    Adventure,
    Romantic,
    Family,
    Photography,
    Offbeat,
    Other(String),
}

impl Mood {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Relaxed => "Relaxed",
            Self::Balanced => "Balanced",
            Self::Active => "Active",
            Self::Adventure => "Adventure",
            Self::Romantic => "Romantic",
            Self::Family => "Family",
            Self::Photography => "Photography",
            Self::Offbeat => "Offbeat",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Mood {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "relaxed" => Self::Relaxed,
            "balanced" => Self::Balanced,
            "active" => Self::Active,
            "adventure" => Self::Adventure,
            "romantic" => Self::Romantic,
            "family" => Self::Family,
            "photography" => Self::Photography,
            "offbeat" => Self::Offbeat,
            _ => Self::Other(label.trim().to_string()),
        }
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// A normalized, immutable visit location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub island: Island,
    pub duration_hrs: f64,
    pub best_times: BestTimes,
    pub moods: Moods,
    #[serde(default)]
    pub brief: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Location {
    /// Normalize one raw record. `index` seeds the fallback id for records without one.
    ///
    /// Never fails: every field falls back to a default when absent or malformed.
    #[must_use]
    pub fn normalize(raw: &Value, index: usize) -> Self {
        let id = record_id(raw).unwrap_or_else(|| format!("location-{index}"));
        let name = first_text(raw, &["name", "location"])
            .unwrap_or_else(|| UNNAMED_LOCATION.to_string());
        let duration_hrs = ["durationHrs", "typicalHours"]
            .iter()
            .filter_map(|key| raw.get(key).and_then(finite_number))
            .find(|hours| *hours >= 0.0)
            .unwrap_or(DEFAULT_DURATION_HRS);
        let island = Island::resolve_opt(raw.get("island").and_then(Value::as_str));
        let brief = first_text(raw, &["brief"]).unwrap_or_default();
        let description = first_text(raw, &["description"]).unwrap_or_default();
        let image = first_text(raw, &["image"]).unwrap_or_default();
        let best_times = parse_best_times(raw);

        let given: Moods = raw
            .get("moods")
            .and_then(Value::as_array)
            .map(|moods| {
                moods
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|label| !label.trim().is_empty())
                    .map(|label| Mood::from(label.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let moods = if given.is_empty() {
            infer_moods(&name, &brief, &description, duration_hrs)
        } else {
            given
        };

        Self {
            id,
            name,
            island,
            duration_hrs,
            best_times,
            moods,
            brief,
            description,
            image,
        }
    }

    /// Earliest best-time rank for ordering within a day.
    #[must_use]
    pub fn time_rank(&self) -> u8 {
        best_time_rank(&self.best_times)
    }

    #[must_use]
    pub fn has_mood(&self, mood: &Mood) -> bool {
        self.moods.contains(mood)
    }
}

fn record_id(raw: &Value) -> Option<String> {
    match raw.get("id")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.trim().to_string()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

fn parse_best_times(raw: &Value) -> BestTimes {
    let labels: Vec<&str> = match (raw.get("bestTimes"), raw.get("bestTime")) {
        (Some(Value::Array(list)), _) => list.iter().filter_map(Value::as_str).collect(),
        (_, Some(Value::String(single))) => vec![single.as_str()],
        _ => Vec::new(),
    };
    let mut times = BestTimes::new();
    for time in labels.into_iter().map(TimeOfDay::classify) {
        if !times.contains(&time) {
            times.push(time);
        }
    }
    times
}

fn theme_patterns() -> &'static [(Mood, Regex)] {
    static PATTERNS: OnceLock<Vec<(Mood, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                Mood::Adventure,
                r"snorkel|scuba|dive|trek|kayak|surf|jet|parasail",
            ),
            (Mood::Romantic, r"beach|sunset|view|cove|lagoon|bay|sandbar"),
            (
                Mood::Family,
                r"museum|culture|heritage|jail|cellular|memorial",
            ),
            (
                Mood::Photography,
                r"wildlife|reef|coral|mangrove|bird|nature|peak|national park",
            ),
            (
                Mood::Offbeat,
                r"lighthouse|mangrove|cave|long island|mud volcano|baratang|saddle peak|remote",
            ),
        ]
        .into_iter()
        .filter_map(|(mood, pattern)| Regex::new(pattern).ok().map(|re| (mood, re)))
        .collect()
    })
}

/// Infer mood tags from duration and text. Deterministic for identical input.
///
/// Duration thresholds are additive: a 4-hour visit is both Balanced and Active.
#[must_use]
pub fn infer_moods(name: &str, brief: &str, description: &str, duration_hrs: f64) -> Moods {
    let mut moods = Moods::new();
    let duration = if duration_hrs.is_finite() {
        duration_hrs
    } else {
        DEFAULT_DURATION_HRS
    };
    if duration <= MOOD_RELAXED_MAX_HRS {
        moods.push(Mood::Relaxed);
    }
    if duration >= MOOD_BALANCED_MIN_HRS {
        moods.push(Mood::Balanced);
    }
    if duration >= MOOD_ACTIVE_MIN_HRS {
        moods.push(Mood::Active);
    }

    let text = format!("{name} {brief} {description}").to_lowercase();
    for (mood, pattern) in theme_patterns() {
        if pattern.is_match(&text) {
            moods.push(mood.clone());
        }
    }

    if moods.is_empty() {
        moods.push(Mood::Balanced);
    }
    moods
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_alternate_keys() {
        let raw = json!({
            "id": 17,
            "location": "Chidiya Tapu",
            "typicalHours": 3,
            "bestTime": "Sunset",
            "island": "port blair"
        });
        let loc = Location::normalize(&raw, 0);
        assert_eq!(loc.id, "17");
        assert_eq!(loc.name, "Chidiya Tapu");
        assert!((loc.duration_hrs - 3.0).abs() < f64::EPSILON);
        assert_eq!(loc.best_times.as_slice(), &[TimeOfDay::Evening]);
        assert_eq!(loc.island, Island::PortBlair);
    }

    #[test]
    fn missing_fields_fall_back() {
        let loc = Location::normalize(&json!({ "durationHrs": "long" }), 4);
        assert_eq!(loc.id, "location-4");
        assert_eq!(loc.name, UNNAMED_LOCATION);
        assert!((loc.duration_hrs - DEFAULT_DURATION_HRS).abs() < f64::EPSILON);
        assert!(loc.best_times.is_empty());
        assert_eq!(loc.island, Island::HOME);
        assert_eq!(loc.moods.as_slice(), &[Mood::Relaxed]);
    }

    #[test]
    fn non_object_record_is_placeholder() {
        let loc = Location::normalize(&json!(42), 1);
        assert_eq!(loc.name, UNNAMED_LOCATION);
        assert!(loc.duration_hrs.is_finite());
    }

    #[test]
    fn negative_duration_is_ignored() {
        let loc = Location::normalize(&json!({ "durationHrs": -1, "typicalHours": 5 }), 0);
        assert!((loc.duration_hrs - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn given_moods_are_kept() {
        let raw = json!({ "name": "Radhanagar Beach", "moods": ["romantic", "Sunbathing"] });
        let loc = Location::normalize(&raw, 0);
        assert_eq!(
            loc.moods.as_slice(),
            &[Mood::Romantic, Mood::Other("Sunbathing".into())]
        );
    }

    #[test]
    fn inference_combines_duration_and_themes() {
        let moods = infer_moods("Cellular Jail", "", "Light and sound show", 4.0);
        assert_eq!(
            moods.as_slice(),
            &[Mood::Balanced, Mood::Active, Mood::Family]
        );

        let moods = infer_moods("Baratang Mud Volcano", "", "", 2.5);
        assert_eq!(moods.as_slice(), &[Mood::Offbeat]);

        let moods = infer_moods("Quiet spot", "", "", 2.5);
        assert_eq!(moods.as_slice(), &[Mood::Balanced]);
    }

    #[test]
    fn best_times_rank_by_earliest() {
        let raw = json!({ "bestTimes": ["Evening", "early morning", "evening"] });
        let loc = Location::normalize(&raw, 0);
        assert_eq!(
            loc.best_times.as_slice(),
            &[TimeOfDay::Evening, TimeOfDay::Morning]
        );
        assert_eq!(loc.time_rank(), 0);
        assert_eq!(best_time_rank(&[]), 3);
    }
}
