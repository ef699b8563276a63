use anyhow::{Result, bail};

use crate::cli::EditPartArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::error::GarageError;
use garage_core::types::{InstallKind, PartInstallation};
use garage_core::{config, storage};

fn has_changes(args: &EditPartArgs) -> bool {
    args.date.is_some()
        || args.mileage.is_some()
        || args.shop.is_some()
        || args.kind.is_some()
        || args.cost.is_some()
        || args.notes.is_some()
        || args.warranty_miles.is_some()
        || args.warranty_months.is_some()
        || args.life_miles.is_some()
        || args.life_months.is_some()
}

fn apply(inst: &mut PartInstallation, args: &EditPartArgs) {
    if let Some(date) = args.date {
        inst.installation_date = date;
    }
    if let Some(mileage) = args.mileage {
        inst.installation_mileage = Some(mileage);
    }
    if let Some(ref shop) = args.shop {
        inst.shop_location = Some(shop.clone());
    }
    if let Some(ref kind) = args.kind {
        inst.kind = if kind == "service" {
            InstallKind::Service
        } else {
            InstallKind::New
        };
    }
    if let Some(cost) = args.cost {
        inst.cost = Some(cost);
    }
    if let Some(ref notes) = args.notes {
        inst.notes = Some(notes.clone());
    }
    if let Some(miles) = args.warranty_miles {
        inst.warranty_mileage = Some(miles);
    }
    if let Some(months) = args.warranty_months {
        inst.warranty_months = Some(months);
    }
    if let Some(miles) = args.life_miles {
        inst.estimated_life_mileage = Some(miles);
    }
    if let Some(months) = args.life_months {
        inst.estimated_life_months = Some(months);
    }
}

pub fn run(ctx: &RuntimeContext, args: &EditPartArgs) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    if !has_changes(args) {
        bail!("Nothing to change. Pass at least one field, e.g. --mileage or --cost.");
    }

    let updated = storage::update_records::<PartInstallation, _, _>(&ctx.cwd, |history| {
        let inst = history
            .iter_mut()
            .find(|i| i.id == args.installation)
            .ok_or(GarageError::InstallationNotFound(args.installation))?;
        apply(inst, args);
        Ok(inst.clone())
    })?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "edit-part",
            "installation": updated,
        }));
    } else {
        print_success(&format!(
            "Updated installation #{} on vehicle #{}.",
            updated.id, updated.vehicle_id
        ));
    }

    Ok(())
}
