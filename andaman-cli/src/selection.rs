use andaman_planner::{FerryClass, Island, TripSelection};
use chrono::NaiveDate;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionArgError {
    #[error("expected ISLAND=HOTEL, got `{0}`")]
    HotelPair(String),
}

/// A `--hotel ISLAND=HOTEL` choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelChoice {
    pub island: Island,
    pub hotel_id: String,
}

impl FromStr for HotelChoice {
    type Err = SelectionArgError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (island, hotel_id) = raw
            .split_once('=')
            .ok_or_else(|| SelectionArgError::HotelPair(raw.to_string()))?;
        let hotel_id = hotel_id.trim();
        if island.trim().is_empty() || hotel_id.is_empty() {
            return Err(SelectionArgError::HotelPair(raw.to_string()));
        }
        Ok(Self {
            island: Island::resolve(island),
            hotel_id: hotel_id.to_string(),
        })
    }
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Command-line trip choices before they become a [`TripSelection`].
#[derive(Debug, Clone, Default)]
pub struct SelectionArgs {
    pub locations: Option<String>,
    pub activities: Option<String>,
    pub hotels: Vec<HotelChoice>,
    pub scooters: Vec<String>,
    pub bicycles: Vec<String>,
    pub ferry_class: Option<FerryClass>,
    pub cab: Option<String>,
    pub adults: Option<u32>,
    pub infants: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub no_start_home: bool,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> TripSelection {
        let mut selection = TripSelection::new()
            .with_locations(self.locations.as_deref().map(split_csv).unwrap_or_default());
        for activity in self.activities.as_deref().map(split_csv).unwrap_or_default() {
            if !selection.is_activity_selected(&activity) {
                selection = selection.with_activity_toggled(&activity);
            }
        }
        for choice in &self.hotels {
            selection = selection.with_hotel(choice.island.clone(), &choice.hotel_id);
        }
        for island in &self.scooters {
            selection = selection.with_scooter(Island::resolve(island), Some(true));
        }
        for island in &self.bicycles {
            let island = Island::resolve(island);
            if !selection.bicycle_islands.contains(&island) {
                selection = selection.with_bicycle_toggled(island);
            }
        }
        if let Some(class) = self.ferry_class {
            selection = selection.with_ferry_class(class);
        }
        if let Some(cab) = &self.cab {
            selection = selection.with_cab_model(cab);
        }
        let adults = self.adults.unwrap_or(selection.adults);
        let infants = self.infants.unwrap_or(selection.infants);
        selection
            .with_travellers(adults, infants)
            .with_start_date(self.start_date)
            .with_start_from_home(!self.no_start_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotel_pairs_resolve_island_aliases() {
        let choice: HotelChoice = "swaraj=hl_h2".parse().unwrap();
        assert_eq!(choice.island, Island::Havelock);
        assert_eq!(choice.hotel_id, "hl_h2");
        assert_eq!(
            "hl_h2".parse::<HotelChoice>(),
            Err(SelectionArgError::HotelPair("hl_h2".into()))
        );
        assert!("Neil=".parse::<HotelChoice>().is_err());
    }

    #[test]
    fn split_csv_trims_and_filters() {
        assert_eq!(split_csv(" a, ,b,,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn args_build_a_selection() {
        let args = SelectionArgs {
            locations: Some("x, y,x".into()),
            activities: Some("scuba,scuba".into()),
            hotels: vec!["Neil=nl_h1".parse().unwrap()],
            scooters: vec!["port blair".into()],
            bicycles: vec!["Neil".into(), "Neil".into()],
            ferry_class: Some(FerryClass::Economy),
            cab: Some("innova".into()),
            adults: Some(3),
            infants: None,
            start_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            no_start_home: true,
        };
        let selection = args.to_selection();
        assert_eq!(selection.location_ids, ["x", "y"]);
        assert_eq!(selection.activity_ids, ["scuba"]);
        assert_eq!(
            selection.hotels.get(&Island::Neil).map(String::as_str),
            Some("nl_h1")
        );
        assert!(selection.scooter_islands.contains(&Island::PortBlair));
        assert!(selection.bicycle_islands.contains(&Island::Neil));
        assert_eq!(selection.ferry_class, FerryClass::Economy);
        assert_eq!(selection.cab_model, "innova");
        assert_eq!((selection.adults, selection.infants), (3, 0));
        assert!(!selection.start_from_home);
    }

    #[test]
    fn empty_args_keep_defaults() {
        let selection = SelectionArgs::default().to_selection();
        assert_eq!(selection, TripSelection::new());
    }
}
