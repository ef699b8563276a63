use std::collections::HashMap;

use anyhow::Result;

use crate::cli::VehicleArg;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::config;
use garage_core::format::format_history_line;
use garage_core::snapshot::VehicleSnapshot;
use garage_core::types::{PartCatalogEntry, PartInstallation};
use garage_core::warranty::warranty_status;

pub fn run(ctx: &RuntimeContext, args: &VehicleArg) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    let cfg = config::read_config(&ctx.cwd)?;
    let snapshot = VehicleSnapshot::load(&ctx.cwd, args.vehicle)?;
    let mileage = snapshot.current_mileage();

    let mut history: Vec<&PartInstallation> = snapshot.installations.iter().collect();
    history.sort_by(|a, b| {
        b.installation_date
            .cmp(&a.installation_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    let parts: HashMap<u64, &PartCatalogEntry> =
        snapshot.catalog.iter().map(|p| (p.part_id, p)).collect();

    if ctx.json {
        let entries: Vec<serde_json::Value> = history
            .iter()
            .map(|inst| {
                serde_json::json!({
                    "installation": inst,
                    "part": parts.get(&inst.part_id),
                    "warranty": warranty_status(inst, mileage, ctx.today),
                })
            })
            .collect();
        output_json(&serde_json::json!({
            "success": true,
            "command": "history",
            "vehicle": args.vehicle,
            "entries": entries,
        }));
        return Ok(());
    }

    println!("{}", snapshot.vehicle.display_name());
    if history.is_empty() {
        println!("No service history yet. Record one with `garage service`.");
        return Ok(());
    }
    for inst in history {
        let warranty = warranty_status(inst, mileage, ctx.today);
        println!(
            "  {}",
            format_history_line(
                inst,
                parts.get(&inst.part_id).copied(),
                &warranty,
                &cfg.distance_unit
            )
        );
    }

    Ok(())
}
