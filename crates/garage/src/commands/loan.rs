use anyhow::Result;

use crate::cli::LoanArgs;
use crate::commands::require_vehicle;
use crate::context::RuntimeContext;
use crate::output::*;
use garage_core::storage;
use garage_core::types::Loan;

pub fn run(ctx: &RuntimeContext, args: &LoanArgs) -> Result<()> {
    require_vehicle(&ctx.cwd, args.vehicle)?;

    let mut loan = Loan {
        id: 0,
        vehicle_id: args.vehicle,
        lender: args.lender.clone(),
        start_date: args.start,
        term_months: args.term,
        interest_rate: args.rate,
        paid_off: false,
        paid_off_date: None,
    };
    let id = storage::append_record(&ctx.cwd, &mut loan)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "success": true,
            "command": "loan",
            "loan": loan,
        }));
    } else {
        print_success(&format!(
            "Recorded loan #{id} from {} ({} months) for vehicle #{}.",
            loan.lender, loan.term_months, args.vehicle
        ));
    }

    Ok(())
}
