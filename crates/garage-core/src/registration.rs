use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::months::months_between;
use crate::types::{RegistrationCutoffs, RegistrationPeriod, StoredRecord, Tier};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// No registration on record; distinct from a green registration.
    Absent,
    Current {
        expiration_date: NaiveDate,
        tier: Tier,
        months_to_go: i32,
        state: String,
    },
}

impl RegistrationStatus {
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Absent => None,
            Self::Current { tier, .. } => Some(*tier),
        }
    }
}

/// Expiry risk of the current registration as of `today`.
pub fn registration_risk(
    period: Option<&RegistrationPeriod>,
    today: NaiveDate,
    cutoffs: &RegistrationCutoffs,
) -> Result<RegistrationStatus> {
    let Some(period) = period else {
        return Ok(RegistrationStatus::Absent);
    };
    period.validate()?;

    let months_to_go = months_between(today, period.expiration_date);
    Ok(RegistrationStatus::Current {
        expiration_date: period.expiration_date,
        tier: cutoffs.classify(i64::from(months_to_go)),
        months_to_go,
        state: period.state.clone(),
    })
}
