//! Everything the engine needs about one vehicle, read from the store in one
//! pass and then evaluated without further I/O.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{GarageError, Result};
use crate::forecast::{ForecastResult, forecast_parts};
use crate::lifecycle::{active_loan, current_mileage, current_registration};
use crate::loan::{LoanStatus, loan_progress};
use crate::registration::{RegistrationStatus, registration_risk};
use crate::storage;
use crate::types::{
    GarageConfig, Loan, OdometerReading, PartCatalogEntry, PartInstallation, RegistrationPeriod,
    Tier, Vehicle,
};

#[derive(Debug, Clone)]
pub struct VehicleSnapshot {
    pub vehicle: Vehicle,
    pub catalog: Vec<PartCatalogEntry>,
    pub installations: Vec<PartInstallation>,
    pub odometer: Vec<OdometerReading>,
    pub loans: Vec<Loan>,
    pub registrations: Vec<RegistrationPeriod>,
}

impl VehicleSnapshot {
    pub fn load(cwd: &Path, vehicle_id: u64) -> Result<Self> {
        let vehicle = storage::find_by_id::<Vehicle>(cwd, vehicle_id)?
            .ok_or(GarageError::VehicleNotFound(vehicle_id))?;

        let snapshot = Self {
            vehicle,
            catalog: storage::read_all(cwd)?,
            installations: storage::read_for_vehicle(cwd, vehicle_id)?,
            odometer: storage::read_for_vehicle(cwd, vehicle_id)?,
            loans: storage::read_for_vehicle(cwd, vehicle_id)?,
            registrations: storage::read_for_vehicle(cwd, vehicle_id)?,
        };
        tracing::debug!(
            vehicle = vehicle_id,
            installations = snapshot.installations.len(),
            readings = snapshot.odometer.len(),
            loans = snapshot.loans.len(),
            registrations = snapshot.registrations.len(),
            "loaded vehicle snapshot"
        );
        Ok(snapshot)
    }

    pub fn current_mileage(&self) -> i64 {
        current_mileage(&self.odometer)
    }

    pub fn forecast(&self, today: NaiveDate, config: &GarageConfig) -> Result<ForecastResult> {
        forecast_parts(
            &self.installations,
            &self.catalog,
            self.current_mileage(),
            today,
            config,
        )
    }

    pub fn loan_status(&self, today: NaiveDate) -> Result<LoanStatus> {
        loan_progress(active_loan(&self.loans), today)
    }

    pub fn registration_status(
        &self,
        today: NaiveDate,
        config: &GarageConfig,
    ) -> Result<RegistrationStatus> {
        registration_risk(
            current_registration(&self.registrations),
            today,
            &config.registration,
        )
    }

    /// Full overview: mileage, advisory counts, loan and registration.
    pub fn report(&self, today: NaiveDate, config: &GarageConfig) -> Result<VehicleReport> {
        let forecast = self.forecast(today, config)?;
        let tier_counts = Tier::ALL
            .iter()
            .map(|t| TierCount {
                tier: *t,
                count: forecast.count_by_tier(*t),
            })
            .collect();
        Ok(VehicleReport {
            vehicle_id: self.vehicle.id,
            name: self.vehicle.display_name(),
            as_of: today,
            current_mileage: forecast.current_mileage,
            tier_counts,
            loan: self.loan_status(today)?,
            registration: self.registration_status(today, config)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: Tier,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    pub vehicle_id: u64,
    pub name: String,
    pub as_of: NaiveDate,
    pub current_mileage: i64,
    pub tier_counts: Vec<TierCount>,
    pub loan: LoanStatus,
    pub registration: RegistrationStatus,
}
