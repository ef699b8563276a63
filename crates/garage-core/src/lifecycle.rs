//! "Latest record wins" selection over unordered record sets.
//!
//! Every selector here is a reduction with an explicit tie-break on record
//! id, so the answer never depends on the order rows come back from storage.

use std::collections::BTreeMap;

use crate::types::{Loan, OdometerReading, PartInstallation, RegistrationPeriod};

/// Reduce a vehicle's installation history to the current record per part:
/// latest installation date, ties broken by highest id. Output is ordered by
/// `part_id`.
pub fn resolve_current_installations(history: &[PartInstallation]) -> Vec<&PartInstallation> {
    let mut current: BTreeMap<u64, &PartInstallation> = BTreeMap::new();
    for record in history {
        current
            .entry(record.part_id)
            .and_modify(|held| {
                if (record.installation_date, record.id) > (held.installation_date, held.id) {
                    *held = record;
                }
            })
            .or_insert(record);
    }
    current.into_values().collect()
}

pub fn latest_odometer(readings: &[OdometerReading]) -> Option<&OdometerReading> {
    readings.iter().max_by_key(|r| (r.date, r.id))
}

/// Mileage of the latest reading, or 0 when the vehicle has none.
pub fn current_mileage(readings: &[OdometerReading]) -> i64 {
    latest_odometer(readings).map_or(0, |r| r.mileage)
}

pub fn current_registration(periods: &[RegistrationPeriod]) -> Option<&RegistrationPeriod> {
    periods.iter().max_by_key(|p| (p.expiration_date, p.id))
}

/// The most recently created loan.
pub fn active_loan(loans: &[Loan]) -> Option<&Loan> {
    loans.iter().max_by_key(|l| l.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn install(id: u64, part_id: u64, date: NaiveDate) -> PartInstallation {
        PartInstallation {
            id,
            vehicle_id: 1,
            part_id,
            installation_date: date,
            installation_mileage: Some(10_000),
            warranty_mileage: None,
            warranty_months: None,
            estimated_life_mileage: None,
            estimated_life_months: None,
            cost: None,
            shop_location: None,
            notes: None,
            kind: Default::default(),
        }
    }

    fn ids(resolved: &[&PartInstallation]) -> Vec<u64> {
        resolved.iter().map(|r| r.id).collect()
    }

    #[test]
    fn latest_date_wins() {
        let history = vec![install(5, 7, d(2022, 1, 1)), install(9, 7, d(2023, 6, 1))];
        assert_eq!(ids(&resolve_current_installations(&history)), vec![9]);
    }

    #[test]
    fn later_date_beats_higher_id() {
        let history = vec![install(12, 7, d(2021, 1, 1)), install(3, 7, d(2023, 6, 1))];
        assert_eq!(ids(&resolve_current_installations(&history)), vec![3]);
    }

    #[test]
    fn same_date_highest_id_wins() {
        let history = vec![
            install(4, 7, d(2023, 6, 1)),
            install(8, 7, d(2023, 6, 1)),
            install(6, 7, d(2023, 6, 1)),
        ];
        assert_eq!(ids(&resolve_current_installations(&history)), vec![8]);
    }

    #[test]
    fn one_record_per_part() {
        let history = vec![
            install(1, 2, d(2020, 1, 1)),
            install(2, 1, d(2020, 2, 1)),
            install(3, 2, d(2021, 1, 1)),
            install(4, 3, d(2019, 1, 1)),
            install(5, 1, d(2019, 1, 1)),
        ];
        let resolved = resolve_current_installations(&history);
        let parts: Vec<u64> = resolved.iter().map(|r| r.part_id).collect();
        assert_eq!(parts, vec![1, 2, 3]);
        assert_eq!(ids(&resolved), vec![2, 3, 4]);
    }

    #[test]
    fn permutation_invariant() {
        let history = vec![
            install(1, 1, d(2020, 1, 1)),
            install(2, 1, d(2022, 5, 1)),
            install(3, 2, d(2021, 3, 1)),
            install(4, 2, d(2021, 3, 1)),
            install(5, 3, d(2018, 1, 1)),
        ];
        let expected = ids(&resolve_current_installations(&history));
        assert_eq!(expected, vec![2, 4, 5]);

        // Every rotation and the reverse of each.
        for shift in 0..history.len() {
            let mut rotated = history.clone();
            rotated.rotate_left(shift);
            assert_eq!(ids(&resolve_current_installations(&rotated)), expected);
            rotated.reverse();
            assert_eq!(ids(&resolve_current_installations(&rotated)), expected);
        }
    }

    #[test]
    fn empty_history() {
        assert!(resolve_current_installations(&[]).is_empty());
    }

    #[test]
    fn odometer_latest_reading() {
        let readings = vec![
            OdometerReading {
                id: 1,
                vehicle_id: 1,
                date: d(2024, 1, 1),
                mileage: 40_000,
            },
            OdometerReading {
                id: 3,
                vehicle_id: 1,
                date: d(2024, 3, 1),
                mileage: 42_000,
            },
            OdometerReading {
                id: 2,
                vehicle_id: 1,
                date: d(2024, 3, 1),
                mileage: 41_900,
            },
        ];
        assert_eq!(current_mileage(&readings), 42_000);
        assert_eq!(current_mileage(&[]), 0);
    }

    #[test]
    fn registration_latest_expiration() {
        let period = |id, exp| RegistrationPeriod {
            id,
            vehicle_id: 1,
            start_date: d(2020, 1, 1),
            expiration_date: exp,
            state: "WA".to_string(),
            notes: None,
        };
        let periods = vec![
            period(1, d(2025, 1, 1)),
            period(2, d(2024, 1, 1)),
            period(3, d(2025, 1, 1)),
        ];
        assert_eq!(current_registration(&periods).map(|p| p.id), Some(3));
        assert!(current_registration(&[]).is_none());
    }

    #[test]
    fn most_recent_loan() {
        let loan = |id| Loan {
            id,
            vehicle_id: 1,
            lender: format!("lender {id}"),
            start_date: d(2020, 1, 1),
            term_months: 60,
            interest_rate: 3.0,
            paid_off: false,
            paid_off_date: None,
        };
        let loans = vec![loan(2), loan(7), loan(4)];
        assert_eq!(active_loan(&loans).map(|l| l.id), Some(7));
    }
}
