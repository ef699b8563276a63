use std::collections::BTreeMap;

use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::format::format_thousands;
use garage_core::types::PartCatalogEntry;
use garage_core::{config, storage};

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    let cfg = config::read_config(&ctx.cwd)?;
    let catalog: Vec<PartCatalogEntry> = storage::read_all(&ctx.cwd)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "parts",
            "parts": catalog,
        }));
        return Ok(());
    }

    if catalog.is_empty() {
        println!("The part catalog is empty. Add one with `garage add-part`.");
        return Ok(());
    }

    let mut by_category: BTreeMap<&str, Vec<&PartCatalogEntry>> = BTreeMap::new();
    for p in &catalog {
        by_category.entry(p.category.as_str()).or_default().push(p);
    }

    for (category, parts) in by_category {
        println!("{category}:");
        for p in parts {
            let mut life = Vec::new();
            if let Some(miles) = p.expected_lifespan_miles {
                life.push(format!("{} {}", format_thousands(miles), cfg.distance_unit));
            }
            if let Some(months) = p.expected_lifespan_months {
                life.push(format!("{months} months"));
            }
            let life = if life.is_empty() {
                "no lifespan".to_string()
            } else {
                life.join(" / ")
            };
            println!("  #{} {} ({life}, {})", p.part_id, p.name, p.importance);
        }
    }

    Ok(())
}
