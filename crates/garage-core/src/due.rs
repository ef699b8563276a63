use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GarageError, Result};
use crate::months::{add_months, months_between};

/// Signed distance to a due point. `Unbounded` stands for "no basis to
/// compute" and compares greater than every known value, so it never reads as
/// overdue and always sorts last among equally severe items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Remaining {
    Known(i64),
    Unbounded,
}

impl Remaining {
    pub fn known(&self) -> Option<i64> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unbounded => None,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Known(v) if *v < 0)
    }

    /// True when the value is known and at or below `limit`.
    pub fn within(&self, limit: i64) -> bool {
        matches!(self, Self::Known(v) if *v <= limit)
    }
}

impl From<Option<i64>> for Remaining {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Self::Unbounded, Self::Known)
    }
}

impl From<Remaining> for Option<i64> {
    fn from(r: Remaining) -> Self {
        r.known()
    }
}

/// The inputs the calculator needs from a resolved installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeBasis {
    pub installation_date: NaiveDate,
    pub installation_mileage: Option<i64>,
    pub life_mileage: Option<i64>,
    pub life_months: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub due_distance: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub remaining_distance: Remaining,
    pub remaining_months: Remaining,
}

impl DueStatus {
    pub fn is_overdue(&self) -> bool {
        self.remaining_distance.is_overdue() || self.remaining_months.is_overdue()
    }
}

/// Compute where a part's end of life falls relative to `current_mileage` and
/// `today`.
///
/// Returns `None` when the part has no lifespan configured, or when neither a
/// due distance nor a due date can be derived; such parts produce no
/// advisory at all. A due distance past `i64::MAX` is a validation error.
pub fn compute_due_status(
    basis: &LifeBasis,
    current_mileage: i64,
    today: NaiveDate,
) -> Result<Option<DueStatus>> {
    if basis.life_mileage.is_none() && basis.life_months.is_none() {
        return Ok(None);
    }

    let due_distance = match (basis.installation_mileage, basis.life_mileage) {
        (Some(installed_at), Some(life)) => {
            let due = installed_at.checked_add(life).ok_or_else(|| {
                GarageError::Validation(format!(
                    "due distance overflows: installed at {installed_at} with a life of {life}"
                ))
            })?;
            Some(due)
        }
        _ => None,
    };
    let due_date = basis
        .life_months
        .map(|life| add_months(basis.installation_date, life));

    if due_distance.is_none() && due_date.is_none() {
        return Ok(None);
    }

    Ok(Some(DueStatus {
        due_distance,
        due_date,
        remaining_distance: due_distance
            .map(|due| due.saturating_sub(current_mileage))
            .into(),
        remaining_months: due_date
            .map(|due| i64::from(months_between(today, due)))
            .into(),
    }))
}
