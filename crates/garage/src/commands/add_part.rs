use anyhow::Result;

use crate::cli::AddPartArgs;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::types::{Importance, PartCatalogEntry};
use garage_core::{config, storage};

pub fn run(ctx: &RuntimeContext, args: &AddPartArgs) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;

    let mut entry = PartCatalogEntry {
        part_id: 0,
        category: args.category.clone(),
        name: args.name.clone(),
        expected_lifespan_miles: args.miles,
        expected_lifespan_months: args.months,
        importance: Importance::parse(&args.importance),
    };
    let id = storage::append_record(&ctx.cwd, &mut entry)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "add-part",
            "part": entry,
        }));
    } else {
        print_success(&format!(
            "Added part #{id}: {} - {}.",
            entry.category, entry.name
        ));
    }

    Ok(())
}
