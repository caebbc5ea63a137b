//! Planning session binding reference data, the current selection and the working itinerary.
use crate::catalog::{CabCatalog, HotelCatalog, ReferenceData};
use crate::cost::{CostBreakdown, PriceTables, compute_costs};
use crate::day::TransportMode;
use crate::island::Island;
use crate::itinerary::{Itinerary, MoveDirection};
use crate::policy::PlannerPolicy;
use crate::trip::TripSelection;

/// Handle for one in-flight reference-data load.
///
/// Only the ticket from the most recent [`PlannerSession::begin_load`] is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// A planning session. The itinerary is regenerated whenever a selection change
/// touches its inputs; manual edits survive only price-affecting changes.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    reference: ReferenceData,
    selection: TripSelection,
    policy: PlannerPolicy,
    hotels: HotelCatalog,
    cabs: CabCatalog,
    itinerary: Itinerary,
    load_generation: u64,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::new(ReferenceData::empty(), PlannerPolicy::default())
    }
}

impl PlannerSession {
    /// Start a session with the built-in hotel and cab catalogs.
    #[must_use]
    pub fn new(reference: ReferenceData, policy: PlannerPolicy) -> Self {
        Self::with_catalogs(
            reference,
            policy,
            HotelCatalog::default_catalog().clone(),
            CabCatalog::default_catalog().clone(),
        )
    }

    #[must_use]
    pub fn with_catalogs(
        reference: ReferenceData,
        policy: PlannerPolicy,
        hotels: HotelCatalog,
        cabs: CabCatalog,
    ) -> Self {
        let mut session = Self {
            reference,
            selection: TripSelection::new(),
            policy,
            hotels,
            cabs,
            itinerary: Itinerary::default(),
            load_generation: 0,
        };
        session.regenerate();
        session
    }

    #[must_use]
    pub const fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    #[must_use]
    pub const fn selection(&self) -> &TripSelection {
        &self.selection
    }

    #[must_use]
    pub const fn policy(&self) -> &PlannerPolicy {
        &self.policy
    }

    #[must_use]
    pub const fn hotels(&self) -> &HotelCatalog {
        &self.hotels
    }

    #[must_use]
    pub const fn cabs(&self) -> &CabCatalog {
        &self.cabs
    }

    #[must_use]
    pub const fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// The working itinerary with dates filled from the selection's start date.
    #[must_use]
    pub fn dated_itinerary(&self) -> Itinerary {
        self.itinerary.dated(self.selection.start_date)
    }

    /// Rebuild the itinerary from the current selection, discarding manual edits.
    pub fn regenerate(&mut self) {
        let locations = self.reference.selected_locations(&self.selection.location_ids);
        let activity_islands = self
            .reference
            .activity_islands(&self.selection.activity_ids);
        self.itinerary = Itinerary::generate(
            &locations,
            &activity_islands,
            self.selection.start_from_home,
            &self.policy,
        );
        log::debug!(
            "generated {} day(s) for {} location(s)",
            self.itinerary.len(),
            locations.len()
        );
    }

    /// Replace the selection. Returns whether the itinerary was regenerated.
    pub fn apply_selection(&mut self, next: TripSelection) -> bool {
        let regenerate = self.selection.requires_regeneration(&next);
        self.selection = next;
        if regenerate {
            self.regenerate();
        }
        regenerate
    }

    /// Apply a transition to the current selection.
    pub fn update_selection(&mut self, f: impl FnOnce(&TripSelection) -> TripSelection) -> bool {
        let next = f(&self.selection);
        self.apply_selection(next)
    }

    /// Swap in a new policy and rebuild the itinerary under it.
    pub fn set_policy(&mut self, policy: PlannerPolicy) {
        self.policy = policy;
        self.regenerate();
    }

    pub fn insert_empty_day_after(&mut self, index: usize) {
        self.itinerary.insert_empty_day_after(index);
    }

    pub fn delete_day(&mut self, index: usize) -> bool {
        self.itinerary.delete_day(index)
    }

    pub fn move_item(&mut self, day: usize, item: usize, direction: MoveDirection) -> bool {
        self.itinerary.move_item(day, item, direction)
    }

    pub fn set_transport(&mut self, index: usize, transport: TransportMode) -> bool {
        self.itinerary.set_transport(index, transport)
    }

    /// Price breakdown for the working itinerary and current selection.
    #[must_use]
    pub fn cost(&self) -> CostBreakdown {
        compute_costs(
            &self.itinerary,
            &self.selection,
            PriceTables {
                hotels: &self.hotels,
                cabs: &self.cabs,
                activities: &self.reference.activities,
                policy: &self.policy,
            },
        )
    }

    /// Islands that need a hotel choice.
    #[must_use]
    pub fn hotel_islands(&self) -> Vec<Island> {
        self.cost().hotel_islands()
    }

    /// Start a reference-data load; any earlier outstanding ticket goes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation = self.load_generation.wrapping_add(1);
        LoadTicket(self.load_generation)
    }

    /// Install loaded reference data if `ticket` is still current.
    ///
    /// Stale results are dropped and the itinerary is left untouched.
    pub fn finish_load(&mut self, ticket: LoadTicket, reference: ReferenceData) -> bool {
        if ticket.0 != self.load_generation {
            log::info!(
                "ignoring stale reference load {} (current {})",
                ticket.0,
                self.load_generation
            );
            return false;
        }
        log::info!(
            "installed reference data: {} locations, {} activities",
            reference.locations.len(),
            reference.activities.len()
        );
        self.reference = reference;
        self.regenerate();
        true
    }
}
