use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::months::{add_months, months_between};
use crate::types::{Loan, StoredRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoanStatus {
    /// The vehicle has no loan on record; distinct from 0% progress.
    Absent,
    Active {
        lender: String,
        progress: f64,
        is_paid_off: bool,
        end_date: NaiveDate,
        elapsed_months: i32,
        term_months: i32,
    },
}

impl LoanStatus {
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Absent => None,
            Self::Active { progress, .. } => Some(*progress),
        }
    }
}

/// Amortization progress of `loan` as of `today`, as a percentage in 0..=100.
pub fn loan_progress(loan: Option<&Loan>, today: NaiveDate) -> Result<LoanStatus> {
    let Some(loan) = loan else {
        return Ok(LoanStatus::Absent);
    };
    loan.validate()?;

    let scheduled_end = add_months(loan.start_date, loan.term_months);
    let elapsed_months = months_between(loan.start_date, today);

    let (progress, end_date) = if loan.paid_off {
        (100.0, loan.paid_off_date.unwrap_or(scheduled_end))
    } else {
        let pct = f64::from(elapsed_months) / f64::from(loan.term_months) * 100.0;
        (pct.clamp(0.0, 100.0), scheduled_end)
    };

    Ok(LoanStatus::Active {
        lender: loan.lender.clone(),
        progress,
        is_paid_off: loan.paid_off,
        end_date,
        elapsed_months,
        term_months: loan.term_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GarageError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn loan(start: NaiveDate, term: i32, paid_off: bool) -> Loan {
        Loan {
            id: 1,
            vehicle_id: 1,
            lender: "First Auto Credit".to_string(),
            start_date: start,
            term_months: term,
            interest_rate: 5.9,
            paid_off,
            paid_off_date: None,
        }
    }

    #[test]
    fn two_thirds_through() {
        let l = loan(d(2022, 3, 15), 36, false);
        let status = loan_progress(Some(&l), d(2024, 3, 15)).unwrap();
        match status {
            LoanStatus::Active {
                progress,
                elapsed_months,
                end_date,
                is_paid_off,
                ..
            } => {
                assert_eq!(elapsed_months, 24);
                assert!((progress - 66.666).abs() < 0.01, "progress was {progress}");
                assert_eq!(end_date, d(2025, 3, 15));
                assert!(!is_paid_off);
            }
            LoanStatus::Absent => panic!("expected an active loan"),
        }
    }

    #[test]
    fn clamped_past_term() {
        let l = loan(d(2015, 1, 1), 36, false);
        assert_eq!(loan_progress(Some(&l), d(2024, 1, 1)).unwrap().progress(), Some(100.0));
    }

    #[test]
    fn clamped_before_start() {
        let l = loan(d(2025, 1, 1), 36, false);
        assert_eq!(loan_progress(Some(&l), d(2024, 1, 1)).unwrap().progress(), Some(0.0));
    }

    #[test]
    fn paid_off_is_complete() {
        let mut l = loan(d(2024, 1, 1), 60, true);
        l.paid_off_date = Some(d(2024, 6, 1));
        let status = loan_progress(Some(&l), d(2024, 2, 1)).unwrap();
        assert_eq!(status.progress(), Some(100.0));
        match status {
            LoanStatus::Active { end_date, is_paid_off, .. } => {
                assert_eq!(end_date, d(2024, 6, 1));
                assert!(is_paid_off);
            }
            LoanStatus::Absent => panic!("expected an active loan"),
        }
    }

    #[test]
    fn no_loan_is_absent() {
        let status = loan_progress(None, d(2024, 1, 1)).unwrap();
        assert_eq!(status, LoanStatus::Absent);
        assert_eq!(status.progress(), None);
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({"status": "absent"})
        );
    }

    #[test]
    fn non_positive_term_fails() {
        let l = loan(d(2024, 1, 1), 0, false);
        assert!(matches!(
            loan_progress(Some(&l), d(2024, 1, 1)),
            Err(GarageError::Validation(_))
        ));
    }
}
