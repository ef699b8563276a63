use anyhow::Result;

use crate::cli::OdometerArgs;
use crate::commands::require_vehicle;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::format::format_thousands;
use garage_core::storage;
use garage_core::types::OdometerReading;

pub fn run(ctx: &RuntimeContext, args: &OdometerArgs) -> Result<()> {
    require_vehicle(&ctx.cwd, args.vehicle)?;

    let mut reading = OdometerReading {
        id: 0,
        vehicle_id: args.vehicle,
        date: args.date.unwrap_or(ctx.today),
        mileage: args.mileage,
    };
    let id = storage::append_record(&ctx.cwd, &mut reading)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "odometer",
            "id": id,
            "reading": reading,
        }));
    } else {
        print_success(&format!(
            "Recorded {} on {} for vehicle #{}.",
            format_thousands(reading.mileage),
            reading.date,
            args.vehicle
        ));
    }

    Ok(())
}
