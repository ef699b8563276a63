use anyhow::Result;

use crate::cli::AddVehicleArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::types::Vehicle;
use garage_core::{config, storage};

pub fn run(ctx: &RuntimeContext, args: &AddVehicleArgs) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;

    let mut vehicle = Vehicle {
        id: 0,
        make: args.make.clone(),
        model: args.model.clone(),
        year: args.year,
        vin: args.vin.as_ref().map(|v| v.to_ascii_uppercase()),
        plate: args.plate.clone(),
        trim: args.trim.clone(),
        nickname: args.nickname.clone(),
        color: args.color.clone(),
        purchase_date: args.purchase_date,
        purchase_mileage: args.purchase_mileage,
        purchase_type: args.purchase_type.clone(),
    };
    let id = storage::append_record(&ctx.cwd, &mut vehicle)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "add-vehicle",
            "id": id,
            "vehicle": vehicle,
        }));
    } else {
        print_success(&format!("Added vehicle #{id}: {}.", vehicle.display_name()));
    }

    Ok(())
}
