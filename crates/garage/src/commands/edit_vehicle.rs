use anyhow::{Result, bail};

use crate::cli::EditVehicleArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::error::GarageError;
use garage_core::types::Vehicle;
use garage_core::{config, storage};

fn has_changes(args: &EditVehicleArgs) -> bool {
    args.make.is_some()
        || args.model.is_some()
        || args.year.is_some()
        || args.vin.is_some()
        || args.plate.is_some()
        || args.trim.is_some()
        || args.nickname.is_some()
        || args.color.is_some()
        || args.purchase_date.is_some()
        || args.purchase_mileage.is_some()
        || args.purchase_type.is_some()
}

fn apply(vehicle: &mut Vehicle, args: &EditVehicleArgs) {
    if let Some(ref make) = args.make {
        vehicle.make = make.clone();
    }
    if let Some(ref model) = args.model {
        vehicle.model = model.clone();
    }
    if let Some(year) = args.year {
        vehicle.year = year;
    }
    if let Some(ref vin) = args.vin {
        vehicle.vin = Some(vin.to_ascii_uppercase());
    }
    if let Some(ref plate) = args.plate {
        vehicle.plate = Some(plate.clone());
    }
    if let Some(ref trim) = args.trim {
        vehicle.trim = Some(trim.clone());
    }
    if let Some(ref nickname) = args.nickname {
        vehicle.nickname = Some(nickname.clone());
    }
    if let Some(ref color) = args.color {
        vehicle.color = Some(color.clone());
    }
    if let Some(date) = args.purchase_date {
        vehicle.purchase_date = Some(date);
    }
    if let Some(mileage) = args.purchase_mileage {
        vehicle.purchase_mileage = Some(mileage);
    }
    if let Some(ref kind) = args.purchase_type {
        vehicle.purchase_type = Some(kind.clone());
    }
}

pub fn run(ctx: &RuntimeContext, args: &EditVehicleArgs) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    if !has_changes(args) {
        bail!("Nothing to change. Pass at least one field, e.g. --plate or --color.");
    }

    // Lookup, edit and validation all happen under the file lock.
    let updated = storage::update_records::<Vehicle, _, _>(&ctx.cwd, |vehicles| {
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.id == args.vehicle)
            .ok_or(GarageError::VehicleNotFound(args.vehicle))?;
        apply(vehicle, args);
        Ok(vehicle.clone())
    })?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "edit-vehicle",
            "vehicle": updated,
        }));
    } else {
        print_success(&format!(
            "Updated vehicle #{}: {}.",
            updated.id,
            updated.display_name()
        ));
    }

    Ok(())
}
