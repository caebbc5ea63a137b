use andaman_planner::{
    CabCatalog, HotelCatalog, Island, Mood, ReferenceData, TimeOfDay, visiting_order,
};
use serde_json::Value;

fn sample() -> ReferenceData {
    let parse = |raw: &str| serde_json::from_str::<Value>(raw).unwrap();
    ReferenceData::from_values(
        &parse(include_str!("../data/sample/locations.json")),
        &parse(include_str!("../data/sample/activities.json")),
        &parse(include_str!("../data/sample/location_adventures.json")),
        &parse(include_str!("../data/sample/ferries.json")),
    )
}

#[test]
fn sample_locations_normalize_every_record() {
    let data = sample();
    assert_eq!(data.locations.len(), 19);

    let chidiya = data.location("pb-chidiya-tapu").unwrap();
    assert_eq!(chidiya.name, "Chidiya Tapu");
    assert!((chidiya.duration_hrs - 3.0).abs() < f64::EPSILON);
    assert_eq!(chidiya.best_times.as_slice(), [TimeOfDay::Evening]);
    assert!(chidiya.has_mood(&Mood::Photography));

    let placeholder = data.location("location-17").unwrap();
    assert_eq!(placeholder.name, "Unnamed spot");
    assert_eq!(placeholder.island, Island::PortBlair);

    let mystery = data.location("location-18").unwrap();
    assert_eq!(mystery.name, "Mystery Viewpoint");

    let ross = data.location("pb-ross-island").unwrap();
    assert_eq!(ross.moods.as_slice(), [Mood::Family, Mood::Photography]);
}

#[test]
fn island_labels_resolve_to_canonical_names() {
    let data = sample();
    let island_of = |id: &str| data.location(id).unwrap().island.clone();
    assert_eq!(island_of("pb-corbyns-cove"), Island::PortBlair);
    assert_eq!(island_of("hl-elephant-beach"), Island::Havelock);
    assert_eq!(island_of("nl-laxmanpur"), Island::Neil);
    assert_eq!(island_of("dg-ross-smith"), Island::Diglipur);
    assert_eq!(island_of("la-butler-bay"), Island::LittleAndaman);
    assert_eq!(island_of("bt-limestone-caves"), Island::Other("Baratang".into()));
    assert!(island_of("bt-limestone-caves").is_remote());

    let islands = data.islands();
    assert_eq!(islands.first(), Some(&Island::PortBlair));
    assert!(islands.contains(&Island::Other("Baratang".into())));

    let order = visiting_order(&islands, true);
    assert_eq!(order.first(), Some(&Island::PortBlair));
    assert_eq!(order.last(), Some(&Island::Other("Baratang".into())));
}

#[test]
fn selectable_locations_hide_the_airport() {
    let data = sample();
    assert!(
        data.selectable_locations()
            .all(|location| location.id != "pb-airport")
    );
    let havelock = data.filter_locations(Some(&Island::Havelock), None);
    assert_eq!(havelock.len(), 3);
    let adventurous = data.filter_locations(Some(&Island::Havelock), Some(&Mood::Adventure));
    assert_eq!(
        adventurous.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
        ["hl-elephant-beach"]
    );
}

#[test]
fn activities_coerce_prices_and_islands() {
    let data = sample();
    assert_eq!(data.activities.len(), 5);
    assert_eq!(data.activity("act-seawalk-nb").unwrap().base_price, 3500);
    assert_eq!(data.activity("act-seawalk-nb").unwrap().category, "Water sports");
    assert_eq!(data.activity("act-turtle-dg").unwrap().base_price, 0);
    assert_eq!(
        data.activity("act-kayak-hl").unwrap().islands,
        [Island::Havelock]
    );
    assert_eq!(data.location_activities.len(), 3);
    assert_eq!(data.ferries.len(), 2);
}

#[test]
fn suggestions_prefer_linked_then_island_then_all() {
    let data = sample();
    let ids = |list: Vec<&andaman_planner::Activity>| {
        list.into_iter().map(|a| a.id.clone()).collect::<Vec<_>>()
    };

    let linked = data.suggested_activities(&["pb-north-bay".to_string()]);
    assert_eq!(ids(linked), ["act-seawalk-nb"]);

    let same_island = data.suggested_activities(&["hl-radhanagar".to_string()]);
    assert_eq!(ids(same_island), ["act-scuba-hl", "act-kayak-hl"]);

    let everything = data.suggested_activities(&["bt-limestone-caves".to_string()]);
    assert_eq!(everything.len(), 5);
}

#[test]
fn location_detail_lists_neighbours_and_links() {
    let data = sample();
    let detail = data.location_detail("hl-elephant-beach").unwrap();
    assert_eq!(detail.nearby.len(), 2);
    assert_eq!(detail.activities.len(), 2);

    let port_blair = data.location_detail("pb-cellular-jail").unwrap();
    assert_eq!(port_blair.nearby.len(), 6);
    assert!(data.location_detail("nowhere").is_none());
}

#[test]
fn built_in_catalogs_cover_every_canonical_island() {
    let hotels = HotelCatalog::default_catalog();
    for island in Island::CANONICAL {
        assert!(
            !hotels.hotels_for(&island).is_empty(),
            "no hotels for {island}"
        );
    }
    assert!(
        hotels
            .islands
            .iter()
            .flat_map(|entry| &entry.hotels)
            .all(|hotel| hotel.sell_price > 0)
    );

    let cabs = CabCatalog::default_catalog();
    assert_eq!(cabs.day_rate("suv"), 3200);
    assert_eq!(cabs.day_rate("hovercraft"), 2500);
}
