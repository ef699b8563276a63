use anyhow::Result;

use crate::cli::VehicleArg;
use crate::commands::require_vehicle;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::storage::{self, remove_for_vehicle};
use garage_core::types::{Loan, OdometerReading, PartInstallation, RegistrationPeriod, Vehicle};

/// Removes the vehicle and every record that belongs to it. The shared part
/// catalog is left alone. Dependents go first so an interrupted delete
/// never leaves records pointing at a missing vehicle.
pub fn run(ctx: &RuntimeContext, args: &VehicleArg) -> Result<()> {
    let vehicle = require_vehicle(&ctx.cwd, args.vehicle)?;

    let installations = remove_for_vehicle::<PartInstallation>(&ctx.cwd, vehicle.id)?;
    let readings = remove_for_vehicle::<OdometerReading>(&ctx.cwd, vehicle.id)?;
    let loans = remove_for_vehicle::<Loan>(&ctx.cwd, vehicle.id)?;
    let registrations = remove_for_vehicle::<RegistrationPeriod>(&ctx.cwd, vehicle.id)?;
    storage::update_records::<Vehicle, _, _>(&ctx.cwd, |vehicles| {
        vehicles.retain(|v| v.id != vehicle.id);
        Ok(())
    })?;
    tracing::debug!(
        vehicle = vehicle.id,
        installations,
        readings,
        loans,
        registrations,
        "deleted vehicle"
    );

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "delete-vehicle",
            "id": vehicle.id,
            "removed": {
                "installations": installations,
                "odometer": readings,
                "loans": loans,
                "registrations": registrations,
            },
        }));
    } else {
        print_success(&format!(
            "Deleted vehicle #{} ({}) with {installations} installation(s), {readings} reading(s), {loans} loan(s) and {registrations} registration(s).",
            vehicle.id,
            vehicle.display_name()
        ));
    }

    Ok(())
}
