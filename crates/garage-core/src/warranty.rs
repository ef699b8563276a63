use chrono::NaiveDate;
use serde::Serialize;

use crate::months::{add_months, is_past};
use crate::types::PartInstallation;

/// Warranty coverage of one installation. Coverage ends as soon as either
/// configured limit is passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WarrantyStatus {
    None,
    Covered {
        until_mileage: Option<i64>,
        until_date: Option<NaiveDate>,
    },
    Expired,
}

pub fn warranty_status(
    installation: &PartInstallation,
    current_mileage: i64,
    today: NaiveDate,
) -> WarrantyStatus {
    let until_mileage = match (installation.installation_mileage, installation.warranty_mileage) {
        // Saturates: a limit past i64::MAX is as good as no mileage limit.
        (Some(installed_at), Some(miles)) => Some(installed_at.saturating_add(miles)),
        _ => None,
    };
    let until_date = installation
        .warranty_months
        .map(|months| add_months(installation.installation_date, months));

    if until_mileage.is_none() && until_date.is_none() {
        return WarrantyStatus::None;
    }

    let mileage_lapsed = until_mileage.is_some_and(|limit| current_mileage > limit);
    let date_lapsed = until_date.is_some_and(|limit| is_past(limit, today));
    if mileage_lapsed || date_lapsed {
        WarrantyStatus::Expired
    } else {
        WarrantyStatus::Covered {
            until_mileage,
            until_date,
        }
    }
}
