use anyhow::Result;

use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::config;
use garage_core::types::{
    Loan, OdometerReading, PartCatalogEntry, PartInstallation, RegistrationPeriod, StoredRecord,
    Vehicle,
};

#[derive(Default)]
struct Tally {
    records: usize,
    errors: Vec<serde_json::Value>,
}

/// Parse and validate each line of one record file.
fn check_file<T: StoredRecord>(ctx: &RuntimeContext, tally: &mut Tally) {
    let file_path = config::get_records_path::<T>(&ctx.cwd);
    let content = std::fs::read_to_string(&file_path).unwrap_or_default();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        tally.records += 1;
        let line_number = line_num + 1;

        let problem = match serde_json::from_str::<T>(trimmed) {
            Ok(record) => record.validate().err().map(|e| e.to_string()),
            Err(e) => Some(format!("Schema validation failed: {e}")),
        };
        if let Some(message) = problem {
            if !ctx.json {
                print_error(&format!("{}:{} - {}", T::FILE, line_number, message));
            }
            tally.errors.push(serde_json::json!({
                "file": T::FILE,
                "line": line_number,
                "message": message,
            }));
        }
    }
}

pub fn run(ctx: &RuntimeContext) -> Result<()> {
    config::ensure_garage_dir(&ctx.cwd)?;
    config::read_config(&ctx.cwd)?;

    let mut tally = Tally::default();
    check_file::<Vehicle>(ctx, &mut tally);
    check_file::<PartCatalogEntry>(ctx, &mut tally);
    check_file::<PartInstallation>(ctx, &mut tally);
    check_file::<OdometerReading>(ctx, &mut tally);
    check_file::<Loan>(ctx, &mut tally);
    check_file::<RegistrationPeriod>(ctx, &mut tally);

    let total_errors = tally.errors.len();
    if ctx.json {
        output_json(&serde_json::json!({
            "success": total_errors == 0,
            "command": "validate",
            "valid": total_errors == 0,
            "totalRecords": tally.records,
            "totalErrors": total_errors,
            "errors": tally.errors,
        }));
    } else if total_errors > 0 {
        print_error(&format!(
            "{} records validated, {} errors found",
            tally.records, total_errors
        ));
    } else {
        print_success(&format!(
            "{} records validated, {} errors found",
            tally.records, total_errors
        ));
    }

    Ok(())
}
