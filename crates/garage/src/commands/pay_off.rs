use anyhow::Result;

use crate::cli::PayOffArgs;
use crate::commands::require_vehicle;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::error::GarageError;
use garage_core::lifecycle::active_loan;
use garage_core::storage;
use garage_core::types::Loan;

pub fn run(ctx: &RuntimeContext, args: &PayOffArgs) -> Result<()> {
    require_vehicle(&ctx.cwd, args.vehicle)?;
    let date = args.date.unwrap_or(ctx.today);

    let loan_id = storage::update_records::<Loan, _, _>(&ctx.cwd, |loans| {
        let mine: Vec<Loan> = loans
            .iter()
            .filter(|l| l.vehicle_id == args.vehicle)
            .cloned()
            .collect();
        let Some(current) = active_loan(&mine) else {
            return Err(GarageError::Validation(format!(
                "vehicle #{} has no loan on record",
                args.vehicle
            )));
        };
        if current.paid_off {
            return Err(GarageError::Validation(format!(
                "loan #{} from {} is already paid off",
                current.id, current.lender
            )));
        }
        let loan_id = current.id;
        for loan in loans.iter_mut().filter(|l| l.id == loan_id) {
            loan.paid_off = true;
            loan.paid_off_date = Some(date);
        }
        Ok(loan_id)
    })?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "pay-off",
            "loan": loan_id,
            "paid_off_date": date,
        }));
    } else {
        print_success(&format!("Marked loan #{loan_id} paid off on {date}."));
    }

    Ok(())
}
