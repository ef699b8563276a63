use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::*;

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    garage_core::config::init_garage_dir(&ctx.cwd)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "init",
        }));
    } else {
        print_success("Initialized .garage/ directory.");
    }

    Ok(())
}
