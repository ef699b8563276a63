use anyhow::Result;

use crate::cli::VehicleArg;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::config;
use garage_core::format::{format_date, format_thousands};
use garage_core::snapshot::VehicleSnapshot;

pub fn run(ctx: &RuntimeContext, args: &VehicleArg) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    let cfg = config::read_config(&ctx.cwd)?;
    let snapshot = VehicleSnapshot::load(&ctx.cwd, args.vehicle)?;
    let vehicle = &snapshot.vehicle;
    let mileage = snapshot.current_mileage();

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "show",
            "vehicle": vehicle,
            "current_mileage": mileage,
            "installations": snapshot.installations.len(),
            "odometer_readings": snapshot.odometer.len(),
            "loans": snapshot.loans.len(),
            "registrations": snapshot.registrations.len(),
        }));
        return Ok(());
    }

    let unit = &cfg.distance_unit;
    println!("#{} {}", vehicle.id, vehicle.display_name());
    println!("  {} {} {}", vehicle.year, vehicle.make, vehicle.model);

    let optional = [
        ("Trim", vehicle.trim.clone()),
        ("Color", vehicle.color.clone()),
        ("VIN", vehicle.vin.clone()),
        ("Plate", vehicle.plate.clone()),
        ("Purchased", vehicle.purchase_date.map(format_date)),
        (
            "Purchase mileage",
            vehicle
                .purchase_mileage
                .map(|m| format!("{} {unit}", format_thousands(m))),
        ),
        ("Purchase type", vehicle.purchase_type.clone()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            println!("  {label}: {value}");
        }
    }

    println!("  Mileage: {} {unit}", format_thousands(mileage));
    println!(
        "  Records: {} installations, {} odometer readings, {} loans, {} registrations",
        snapshot.installations.len(),
        snapshot.odometer.len(),
        snapshot.loans.len(),
        snapshot.registrations.len()
    );

    Ok(())
}
