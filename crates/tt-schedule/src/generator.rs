//! Daily schedule generation from the age-band policy tables.

use rustc_hash::FxHashMap;

use tt_core::{AgentRng, GeoPoint, MINUTES_PER_DAY};

use crate::{AgeGroup, Destination, PoiCategory, PointOfInterest, Schedule, Trip, TripPolicy};

/// How many of the nearest candidates a discretionary destination is drawn
/// from.  Keeps trips local without sending every agent to the same shop.
pub const NEAREST_CANDIDATES: usize = 5;

/// Builds schedules against a fixed set of points of interest.
///
/// POIs are bucketed by category once at construction, so per-agent
/// generation only scans the relevant categories.
pub struct ScheduleGenerator<'a> {
    pois:        &'a [PointOfInterest],
    by_category: FxHashMap<PoiCategory, Vec<usize>>,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(pois: &'a [PointOfInterest]) -> Self {
        let mut by_category: FxHashMap<PoiCategory, Vec<usize>> = FxHashMap::default();
        for (i, poi) in pois.iter().enumerate() {
            by_category.entry(poi.category).or_default().push(i);
        }
        Self { pois, by_category }
    }

    pub fn pois(&self) -> &'a [PointOfInterest] {
        self.pois
    }

    /// Pick the school or workplace for an agent of `age` living at `home`.
    ///
    /// Returns `None` for seniors and when the city has no POI of the
    /// band's primary category.
    pub fn assign_primary(
        &self,
        home: GeoPoint,
        age:  u8,
        rng:  &mut AgentRng,
    ) -> Option<&'a PointOfInterest> {
        let category = AgeGroup::from_age(age).primary_category()?;
        self.pick_nearby(home, &[category], rng)
    }

    /// Generate the day's trips for one agent.
    ///
    /// `primary` (if any) is used for every policy row whose categories
    /// include its category; other POI rows draw from the
    /// [`NEAREST_CANDIDATES`] closest matches to `home`.  Rows with no
    /// matching POI are omitted.
    pub fn generate(
        &self,
        home:    GeoPoint,
        age:     u8,
        primary: Option<&PointOfInterest>,
        rng:     &mut AgentRng,
    ) -> Schedule {
        let trips = AgeGroup::from_age(age)
            .policies()
            .iter()
            .filter_map(|policy| self.realise(policy, home, primary, rng))
            .collect();
        Schedule::new(trips)
    }

    fn realise(
        &self,
        policy:  &TripPolicy,
        home:    GeoPoint,
        primary: Option<&PointOfInterest>,
        rng:     &mut AgentRng,
    ) -> Option<Trip> {
        if !rng.gen_bool(policy.probability) {
            return None;
        }

        let destination = match policy.destination {
            Destination::Home => home,
            Destination::Poi(categories) => match primary {
                Some(p) if categories.contains(&p.category) => p.pos,
                _ => self.pick_nearby(home, categories, rng)?.pos,
            },
        };

        let departure = rng.gen_range(policy.earliest..=policy.latest);
        let departure = departure.clamp(0, MINUTES_PER_DAY as i32 - 1) as u32;
        let dwell = rng.gen_range(policy.dwell_min..=policy.dwell_max);

        Some(Trip { departure, destination, dwell, purpose: policy.purpose })
    }

    /// Uniform pick among the nearest POIs (to `origin`) in `categories`.
    fn pick_nearby(
        &self,
        origin:     GeoPoint,
        categories: &[PoiCategory],
        rng:        &mut AgentRng,
    ) -> Option<&'a PointOfInterest> {
        let mut candidates: Vec<(f64, usize)> = categories
            .iter()
            .filter_map(|c| self.by_category.get(c))
            .flatten()
            .map(|&i| (origin.distance_km(self.pois[i].pos), i))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        // Ties broken by POI index so the pick is independent of map order.
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        candidates.truncate(NEAREST_CANDIDATES);
        let &(_, i) = rng.choose(&candidates)?;
        Some(&self.pois[i])
    }
}
