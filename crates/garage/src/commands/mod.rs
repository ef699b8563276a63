pub mod add_part;
pub mod add_vehicle;
pub mod delete_vehicle;
pub mod edit_part;
pub mod edit_vehicle;
pub mod history;
pub mod init;
pub mod loan;
pub mod odometer;
pub mod parts;
pub mod pay_off;
pub mod register;
pub mod service;
pub mod show;
pub mod status;
pub mod upcoming;
pub mod validate;
pub mod vehicles;

use std::path::Path;

use anyhow::Result;
use garage_core::config;
use garage_core::storage;
use garage_core::types::Vehicle;

/// Check the store exists and the vehicle is in it.
pub fn require_vehicle(cwd: &Path, vehicle_id: u64) -> Result<Vehicle> {
    config::ensure_garage_dir(cwd)?;
    let vehicle = storage::find_by_id::<Vehicle>(cwd, vehicle_id)?
        .ok_or(garage_core::error::GarageError::VehicleNotFound(vehicle_id))?;
    Ok(vehicle)
}
