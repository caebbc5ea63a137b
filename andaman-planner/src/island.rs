//! Canonical islands, alias resolution and transfer classification.
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight canonical islands, or an unrecognised label kept verbatim.
///
/// Variant order matches the fixed visiting order, so the derived `Ord` sorts
/// canonical islands by rank and pass-through labels after them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Island {
    #[default]
    PortBlair,
    Havelock,
    Neil,
    LongIsland,
    Rangat,
    Mayabunder,
    Diglipur,
    LittleAndaman,
    Other(String),
}

/// Transfer variant between two distinct islands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    Ferry,
    Boat,
}

impl LegKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ferry => "Ferry",
            Self::Boat => "Boat",
        }
    }
}

// Checked in order; the first alias hit wins.
const ALIASES: &[(Island, &[&str])] = &[
    (Island::Havelock, &["havelock", "swaraj"]),
    (Island::Neil, &["neil", "shaheed dweep"]),
    (Island::LongIsland, &["long island"]),
    (Island::Rangat, &["rangat"]),
    (Island::Mayabunder, &["mayabunder"]),
    (Island::Diglipur, &["diglipur", "north andaman"]),
    (Island::LittleAndaman, &["little andaman", "hut bay"]),
];

const REMOTE_MARKERS: &[&str] = &[
    "baratang",
    "long island",
    "little andaman",
    "diglipur",
    "north andaman",
];

impl Island {
    /// The island every trip arrives at and departs from.
    pub const HOME: Self = Self::PortBlair;

    /// Canonical islands in visiting order.
    pub const CANONICAL: [Self; 8] = [
        Self::PortBlair,
        Self::Havelock,
        Self::Neil,
        Self::LongIsland,
        Self::Rangat,
        Self::Mayabunder,
        Self::Diglipur,
        Self::LittleAndaman,
    ];

    /// Resolve an arbitrary island label.
    ///
    /// Blank labels resolve to [`Island::HOME`]; non-blank labels that match no
    /// alias are kept as [`Island::Other`] with surrounding whitespace trimmed.
    #[must_use]
    pub fn resolve(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Self::HOME;
        }
        let lowered = trimmed.to_lowercase();
        if lowered.starts_with("port blair") {
            return Self::PortBlair;
        }
        ALIASES
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| lowered.contains(alias)))
            .map_or_else(|| Self::Other(trimmed.to_string()), |(island, _)| island.clone())
    }

    /// Resolve an optional label; `None` is the home island.
    #[must_use]
    pub fn resolve_opt(label: Option<&str>) -> Self {
        label.map_or(Self::HOME, Self::resolve)
    }

    /// Display name for the island.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PortBlair => "Port Blair (South Andaman)",
            Self::Havelock => "Havelock (Swaraj Dweep)",
            Self::Neil => "Neil (Shaheed Dweep)",
            Self::LongIsland => "Long Island (Middle Andaman)",
            Self::Rangat => "Rangat (Middle Andaman)",
            Self::Mayabunder => "Mayabunder (Middle Andaman)",
            Self::Diglipur => "Diglipur (North Andaman)",
            Self::LittleAndaman => "Little Andaman",
            Self::Other(label) => label,
        }
    }

    /// Position in the fixed visiting order; `None` for pass-through labels.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        Self::CANONICAL.iter().position(|island| island == self)
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        *self == Self::HOME
    }

    /// Whether reaching this island needs a boat rather than a scheduled ferry.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        match self {
            Self::LongIsland | Self::Diglipur | Self::LittleAndaman => true,
            Self::Other(label) => {
                let lowered = label.to_lowercase();
                REMOTE_MARKERS.iter().any(|marker| lowered.contains(marker))
            }
            _ => false,
        }
    }

    /// Classify the transfer between two islands. Identical endpoints need no leg.
    #[must_use]
    pub fn leg_kind(from: &Self, to: &Self) -> Option<LegKind> {
        if from == to {
            None
        } else if from.is_remote() || to.is_remote() {
            Some(LegKind::Boat)
        } else {
            Some(LegKind::Ferry)
        }
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Island {
    fn from(label: &str) -> Self {
        Self::resolve(label)
    }
}

impl From<String> for Island {
    fn from(label: String) -> Self {
        Self::resolve(&label)
    }
}

impl From<Island> for String {
    fn from(island: Island) -> Self {
        match island {
            Island::Other(label) => label,
            canonical => canonical.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases_case_insensitively() {
        assert_eq!(Island::resolve("PORT BLAIR"), Island::PortBlair);
        assert_eq!(Island::resolve("Swaraj Dweep"), Island::Havelock);
        assert_eq!(Island::resolve("  havelock island "), Island::Havelock);
        assert_eq!(Island::resolve("Shaheed Dweep"), Island::Neil);
        assert_eq!(Island::resolve("North Andaman"), Island::Diglipur);
        assert_eq!(Island::resolve("Hut Bay"), Island::LittleAndaman);
        assert_eq!(Island::resolve("Mayabunder"), Island::Mayabunder);
    }

    #[test]
    fn blank_defaults_home_and_unknown_passes_through() {
        assert_eq!(Island::resolve(""), Island::HOME);
        assert_eq!(Island::resolve("   "), Island::HOME);
        assert_eq!(Island::resolve_opt(None), Island::HOME);
        assert_eq!(
            Island::resolve(" Baratang "),
            Island::Other("Baratang".to_string())
        );
    }

    #[test]
    fn canonical_names_round_trip() {
        for island in Island::CANONICAL {
            assert_eq!(Island::resolve(island.name()), island);
        }
    }

    #[test]
    fn ranks_follow_visiting_order() {
        assert_eq!(Island::PortBlair.rank(), Some(0));
        assert_eq!(Island::LittleAndaman.rank(), Some(7));
        assert_eq!(Island::Other("Ross".into()).rank(), None);
        assert!(Island::LittleAndaman < Island::Other("Ross".into()));
    }

    #[test]
    fn legs_are_boats_when_either_end_is_remote() {
        assert_eq!(
            Island::leg_kind(&Island::PortBlair, &Island::Havelock),
            Some(LegKind::Ferry)
        );
        assert_eq!(
            Island::leg_kind(&Island::Diglipur, &Island::PortBlair),
            Some(LegKind::Boat)
        );
        assert_eq!(
            Island::leg_kind(&Island::Neil, &Island::Other("Baratang".into())),
            Some(LegKind::Boat)
        );
        assert_eq!(Island::leg_kind(&Island::Neil, &Island::Neil), None);
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Island::Neil).unwrap();
        assert_eq!(json, "\"Neil (Shaheed Dweep)\"");
        let parsed: Island = serde_json::from_str("\"neil\"").unwrap();
        assert_eq!(parsed, Island::Neil);
    }
}
