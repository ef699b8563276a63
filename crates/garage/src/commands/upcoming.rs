use anyhow::Result;

use crate::cli::UpcomingArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::config;
use garage_core::format::{format_advisory_line, format_thousands};
use garage_core::forecast::SortMode;
use garage_core::snapshot::VehicleSnapshot;

fn parse_sort_mode(s: &str) -> SortMode {
    match s {
        "importance" => SortMode::Importance,
        _ => SortMode::Urgency,
    }
}

pub fn run(ctx: &RuntimeContext, args: &UpcomingArgs) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    let cfg = config::read_config(&ctx.cwd)?;
    let snapshot = VehicleSnapshot::load(&ctx.cwd, args.vehicle)?;

    let mode = parse_sort_mode(&args.sort);
    let forecast = snapshot.forecast(ctx.today, &cfg)?;
    let items = forecast.ordered(mode);

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "upcoming",
            "vehicle": args.vehicle,
            "as_of": ctx.today,
            "sort": mode.as_str(),
            "current_mileage": forecast.current_mileage,
            "items": items,
        }));
        return Ok(());
    }

    println!(
        "{} at {} {}",
        snapshot.vehicle.display_name(),
        format_thousands(forecast.current_mileage),
        cfg.distance_unit
    );
    if items.is_empty() {
        print_success("Nothing due soon!");
        return Ok(());
    }
    for item in items {
        println!("{}", tier_line(item.severity, &format_advisory_line(item)));
    }

    Ok(())
}
