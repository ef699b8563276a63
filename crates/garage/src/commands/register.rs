use anyhow::Result;

use crate::cli::RegisterArgs;
use crate::commands::require_vehicle;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::format::format_date;
use garage_core::storage;
use garage_core::types::RegistrationPeriod;

pub fn run(ctx: &RuntimeContext, args: &RegisterArgs) -> Result<()> {
    require_vehicle(&ctx.cwd, args.vehicle)?;

    let mut period = RegistrationPeriod {
        id: 0,
        vehicle_id: args.vehicle,
        start_date: args.start,
        expiration_date: args.expires,
        state: args.state.clone(),
        notes: args.notes.clone(),
    };
    let id = storage::append_record(&ctx.cwd, &mut period)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "register",
            "registration": period,
        }));
    } else {
        print_success(&format!(
            "Recorded registration #{id} ({}) for vehicle #{}, expiring {}.",
            period.state,
            args.vehicle,
            format_date(period.expiration_date)
        ));
    }

    Ok(())
}
