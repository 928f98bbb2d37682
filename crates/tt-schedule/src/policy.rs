//! Age-banded trip policies.
//!
//! Each [`AgeGroup`] owns a static table of [`TripPolicy`] rows.  The
//! generator walks the table top to bottom, draws once against each row's
//! probability, and emits a trip for every row that fires and resolves to a
//! destination.  Adding a band or a trip type is a table edit.
//!
//! ```text
//! band    purpose      p     departure      dwell      destination
//! child   education    1.00  455..=505      300..=420  education
//!         retail       0.35  930..=1000     20..=60    retail
//!         return home  1.00  1010..=1080    600..=900  home
//! adult   employment   1.00  375..=480      360..=540  employment
//!         retail       0.55  1065..=1155    20..=70    retail
//!         social       0.35  1140..=1260    45..=150   social|leisure|religious
//!         return home  1.00  1200..=1380    600..=900  home
//! senior  healthcare   0.65  570..=690      30..=120   healthcare
//!         social       0.55  770..=920      40..=160   social
//!         retail       0.40  940..=1080     15..=70    retail
//!         return home  1.00  1080..=1260    700..=1000 home
//! ```

use crate::{PoiCategory, TripPurpose};

// ── AgeGroup ──────────────────────────────────────────────────────────────────

/// Behavioural age band.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum AgeGroup {
    /// Under 18.
    Child,
    /// 18 to 64.
    Adult,
    /// 65 and over.
    Senior,
}

impl AgeGroup {
    pub fn from_age(age: u8) -> Self {
        match age {
            0..=17  => AgeGroup::Child,
            18..=64 => AgeGroup::Adult,
            _       => AgeGroup::Senior,
        }
    }

    /// The trip-generation table for this band.
    pub fn policies(self) -> &'static [TripPolicy] {
        match self {
            AgeGroup::Child  => CHILD,
            AgeGroup::Adult  => ADULT,
            AgeGroup::Senior => SENIOR,
        }
    }

    /// Category of the pre-assigned "primary" destination (school or
    /// workplace), if the band has one.
    pub fn primary_category(self) -> Option<PoiCategory> {
        match self {
            AgeGroup::Child  => Some(PoiCategory::Education),
            AgeGroup::Adult  => Some(PoiCategory::Employment),
            AgeGroup::Senior => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::Child  => "child",
            AgeGroup::Adult  => "adult",
            AgeGroup::Senior => "senior",
        }
    }
}

// ── TripPolicy ────────────────────────────────────────────────────────────────

/// Where a policy row sends the agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Destination {
    /// The agent's own home coordinate.  Always resolvable.
    Home,
    /// A point of interest in any of these categories.
    Poi(&'static [PoiCategory]),
}

/// One row of a band's trip table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TripPolicy {
    pub purpose:     TripPurpose,
    /// Chance the trip is made at all, in `[0, 1]`.
    pub probability: f64,
    /// Inclusive departure window, minute-of-day.  May extend outside the
    /// day; the generator clamps the drawn value.
    pub earliest:    i32,
    pub latest:      i32,
    /// Inclusive dwell range in minutes.
    pub dwell_min:   u32,
    pub dwell_max:   u32,
    pub destination: Destination,
}

impl TripPolicy {
    const fn new(
        purpose:     TripPurpose,
        probability: f64,
        (earliest, latest): (i32, i32),
        (dwell_min, dwell_max): (u32, u32),
        destination: Destination,
    ) -> Self {
        Self { purpose, probability, earliest, latest, dwell_min, dwell_max, destination }
    }
}

use Destination::{Home, Poi};
use PoiCategory as C;
use TripPurpose as P;

const CHILD: &[TripPolicy] = &[
    TripPolicy::new(P::Education,  1.00, (480 - 25, 480 + 25),  (300, 420), Poi(&[C::Education])),
    TripPolicy::new(P::Retail,     0.35, (960 - 30, 960 + 40),  (20, 60),   Poi(&[C::Retail])),
    TripPolicy::new(P::ReturnHome, 1.00, (1020 - 10, 1020 + 60), (600, 900), Home),
];

const ADULT: &[TripPolicy] = &[
    TripPolicy::new(P::Employment, 1.00, (420 - 45, 420 + 60),  (360, 540), Poi(&[C::Employment])),
    TripPolicy::new(P::Retail,     0.55, (1080 - 15, 1080 + 75), (20, 70),   Poi(&[C::Retail])),
    TripPolicy::new(
        P::Social, 0.35, (1140, 1140 + 120), (45, 150),
        Poi(&[C::Social, C::Leisure, C::Religious]),
    ),
    TripPolicy::new(P::ReturnHome, 1.00, (1200, 1200 + 180),    (600, 900), Home),
];

const SENIOR: &[TripPolicy] = &[
    TripPolicy::new(P::Healthcare, 0.65, (600 - 30, 600 + 90),  (30, 120),   Poi(&[C::Healthcare])),
    TripPolicy::new(P::Social,     0.55, (780 - 10, 780 + 140), (40, 160),   Poi(&[C::Social])),
    TripPolicy::new(P::Retail,     0.40, (960 - 20, 960 + 120), (15, 70),    Poi(&[C::Retail])),
    TripPolicy::new(P::ReturnHome, 1.00, (1080, 1080 + 180),    (700, 1000), Home),
];
