use std::collections::HashSet;
use std::io::Read;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::cli::ServiceArgs;
use crate::commands::require_vehicle;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::error::GarageError;
use garage_core::storage;
use garage_core::types::{
    InstallKind, OdometerReading, PartCatalogEntry, PartInstallation, StoredRecord,
};

/// One part line of a service entry, as read from `--stdin`.
#[derive(Debug, Deserialize)]
struct ServicePart {
    part_id: u64,
    #[serde(default)]
    cost: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    warranty_mileage: Option<i64>,
    #[serde(default)]
    warranty_months: Option<i32>,
    #[serde(default)]
    estimated_life_mileage: Option<i64>,
    #[serde(default)]
    estimated_life_months: Option<i32>,
    #[serde(default, rename = "type")]
    kind: InstallKind,
}

fn parts_from_args(args: &ServiceArgs) -> Result<Vec<ServicePart>> {
    let has_overrides = args.cost.is_some()
        || args.notes.is_some()
        || args.warranty_miles.is_some()
        || args.warranty_months.is_some()
        || args.life_miles.is_some()
        || args.life_months.is_some();
    if has_overrides && args.parts.len() > 1 {
        bail!("Per-part options (--cost, --notes, --warranty-*, --life-*) need exactly one --part. Use --stdin for several.");
    }
    let kind = if args.kind == "service" {
        InstallKind::Service
    } else {
        InstallKind::New
    };

    Ok(args
        .parts
        .iter()
        .map(|&part_id| ServicePart {
            part_id,
            cost: args.cost,
            notes: args.notes.clone(),
            warranty_mileage: args.warranty_miles,
            warranty_months: args.warranty_months,
            estimated_life_mileage: args.life_miles,
            estimated_life_months: args.life_months,
            kind,
        })
        .collect())
}

fn parts_from_stdin() -> Result<Vec<ServicePart>> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    let parsed: serde_json::Value =
        serde_json::from_str(&input).context("Failed to parse JSON input")?;
    let raw = if parsed.is_array() {
        parsed
    } else {
        serde_json::Value::Array(vec![parsed])
    };
    serde_json::from_value(raw).context("Invalid part entry")
}

pub fn run(ctx: &RuntimeContext, args: &ServiceArgs) -> Result<()> {
    require_vehicle(&ctx.cwd, args.vehicle)?;

    let entries = if args.stdin {
        parts_from_stdin()?
    } else {
        parts_from_args(args)?
    };
    if entries.is_empty() {
        bail!("A service entry needs at least one part (--part <ID> or --stdin).");
    }

    let catalog: Vec<PartCatalogEntry> = storage::read_all(&ctx.cwd)?;
    let known: HashSet<u64> = catalog.iter().map(|p| p.part_id).collect();
    if let Some(missing) = entries.iter().find(|e| !known.contains(&e.part_id)) {
        return Err(GarageError::PartNotFound(missing.part_id).into());
    }

    let date = args.date.unwrap_or(ctx.today);
    let mut installations: Vec<PartInstallation> = entries
        .into_iter()
        .map(|e| PartInstallation {
            id: 0,
            vehicle_id: args.vehicle,
            part_id: e.part_id,
            installation_date: date,
            installation_mileage: Some(args.mileage),
            warranty_mileage: e.warranty_mileage,
            warranty_months: e.warranty_months,
            estimated_life_mileage: e.estimated_life_mileage,
            estimated_life_months: e.estimated_life_months,
            cost: e.cost,
            shop_location: args.shop.clone(),
            notes: e.notes,
            kind: e.kind,
        })
        .collect();

    // A service visit is also an odometer reading. It is appended first so
    // installations are never stored without it.
    let mut reading = OdometerReading {
        id: 0,
        vehicle_id: args.vehicle,
        date,
        mileage: args.mileage,
    };
    reading.validate()?;
    for inst in &installations {
        inst.validate()?;
    }
    storage::append_record(&ctx.cwd, &mut reading)?;
    let ids = storage::append_records(&ctx.cwd, &mut installations)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "service",
            "vehicle": args.vehicle,
            "created": ids.len(),
            "ids": ids,
        }));
    } else {
        print_success(&format!(
            "Recorded {} part(s) for vehicle #{} on {date}.",
            ids.len(),
            args.vehicle
        ));
    }

    Ok(())
}
