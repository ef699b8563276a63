use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::types::Vehicle;
use garage_core::{config, storage};

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    let mut vehicles: Vec<Vehicle> = storage::read_all(&ctx.cwd)?;
    vehicles.sort_by(|a, b| b.id.cmp(&a.id));

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "vehicles",
            "count": vehicles.len(),
            "vehicles": vehicles,
        }));
    } else if vehicles.is_empty() {
        println!("No vehicles yet. Add one with `garage add-vehicle`.");
    } else {
        for v in &vehicles {
            let plate = v.plate.as_deref().unwrap_or("-");
            println!("  #{} {} [{plate}]", v.id, v.display_name());
        }
    }

    Ok(())
}
