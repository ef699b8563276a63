//! Tiered threshold classification.
//!
//! Part severity and registration risk share the same four-step shape:
//! anything overdue is red, anything within the high cutoff is orange,
//! anything within the medium cutoff is yellow, the rest is green. Only the
//! cutoffs and the number of axes differ.

use serde::{Deserialize, Serialize};

use crate::due::Remaining;
use crate::types::{RegistrationCutoffs, SeverityCutoffs, Tier};

/// Inclusive upper bounds for the orange (`high`) and yellow (`medium`) tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cutoffs {
    pub high: i64,
    pub medium: i64,
}

/// Classify one or more remaining values, each against its own cutoffs.
/// The first matching rule wins across all axes.
pub fn classify(axes: &[(Remaining, Cutoffs)]) -> Tier {
    if axes.iter().any(|(remaining, _)| remaining.is_overdue()) {
        Tier::Red
    } else if axes.iter().any(|(remaining, c)| remaining.within(c.high)) {
        Tier::Orange
    } else if axes.iter().any(|(remaining, c)| remaining.within(c.medium)) {
        Tier::Yellow
    } else {
        Tier::Green
    }
}

impl SeverityCutoffs {
    /// Urgency of a part from its remaining distance and months.
    pub fn classify(&self, remaining_distance: Remaining, remaining_months: Remaining) -> Tier {
        classify(&[
            (remaining_distance, self.distance),
            (remaining_months, self.months),
        ])
    }
}

impl RegistrationCutoffs {
    pub fn classify(&self, months_to_go: i64) -> Tier {
        classify(&[(Remaining::Known(months_to_go), self.months)])
    }
}
