//! Trips and the per-agent daily `Schedule`.

use tt_core::{GeoPoint, MINUTES_PER_DAY};

/// Why a trip is made.  Carried for output and analysis only; the stepper
/// treats every trip identically.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TripPurpose {
    Education,
    Employment,
    Retail,
    Social,
    Healthcare,
    ReturnHome,
}

impl TripPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            TripPurpose::Education  => "education",
            TripPurpose::Employment => "employment",
            TripPurpose::Retail     => "retail",
            TripPurpose::Social     => "social",
            TripPurpose::Healthcare => "healthcare",
            TripPurpose::ReturnHome => "return_home",
        }
    }
}

/// One scheduled journey.  Immutable once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    /// Earliest minute-of-day the agent leaves, in `0..MINUTES_PER_DAY`.
    pub departure:   u32,
    pub destination: GeoPoint,
    /// Minutes spent at the destination after arriving.
    pub dwell:       u32,
    pub purpose:     TripPurpose,
}

/// An agent's trips for the day, sorted ascending by departure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    trips: Vec<Trip>,
}

impl Schedule {
    /// Construct a schedule; departures are clamped into the day and the
    /// trips sorted (stable, so equal departures keep policy order).
    pub fn new(mut trips: Vec<Trip>) -> Self {
        for t in &mut trips {
            t.departure = t.departure.min(MINUTES_PER_DAY - 1);
        }
        trips.sort_by_key(|t| t.departure);
        Self { trips }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The trip at `cursor`, or `None` once the day's trips are exhausted.
    #[inline]
    pub fn get(&self, cursor: usize) -> Option<&Trip> {
        self.trips.get(cursor)
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
