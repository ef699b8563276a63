use anyhow::Result;

use crate::cli::VehicleArg;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::config;
use garage_core::format::{
    format_date, format_loan_status, format_registration_status, format_thousands,
};
use garage_core::snapshot::VehicleSnapshot;

pub fn run(ctx: &RuntimeContext, args: &VehicleArg) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    let cfg = config::read_config(&ctx.cwd)?;
    let snapshot = VehicleSnapshot::load(&ctx.cwd, args.vehicle)?;
    let report = snapshot.report(ctx.today, &cfg)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "status",
            "report": report,
        }));
        return Ok(());
    }

    println!("{} (as of {})", report.name, format_date(report.as_of));
    println!(
        "Mileage: {} {}",
        format_thousands(report.current_mileage),
        cfg.distance_unit
    );

    let summary: Vec<String> = report
        .tier_counts
        .iter()
        .map(|tc| tier_line(tc.tier, &format!("{} {}", tc.count, tc.tier)))
        .collect();
    println!("Maintenance: {}", summary.join(", "));

    println!("{}", format_loan_status(&report.loan));
    let registration = format_registration_status(&report.registration);
    match report.registration.tier() {
        Some(tier) => println!("{}", tier_line(tier, &registration)),
        None => println!("{registration}"),
    }

    Ok(())
}
