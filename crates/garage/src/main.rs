mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Logs go to stderr so `--json` stdout stays parseable.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("GARAGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    let ctx = RuntimeContext::from_global_args(&cli.global);

    let (name, result) = match &cli.command {
        Commands::Init => ("init", commands::init::run(&ctx)),
        Commands::AddVehicle(args) => ("add-vehicle", commands::add_vehicle::run(&ctx, args)),
        Commands::Vehicles => ("vehicles", commands::vehicles::run(&ctx)),
        Commands::Show(args) => ("show", commands::show::run(&ctx, args)),
        Commands::EditVehicle(args) => ("edit-vehicle", commands::edit_vehicle::run(&ctx, args)),
        Commands::DeleteVehicle(args) => {
            ("delete-vehicle", commands::delete_vehicle::run(&ctx, args))
        }
        Commands::AddPart(args) => ("add-part", commands::add_part::run(&ctx, args)),
        Commands::Parts => ("parts", commands::parts::run(&ctx)),
        Commands::Service(args) => ("service", commands::service::run(&ctx, args)),
        Commands::EditPart(args) => ("edit-part", commands::edit_part::run(&ctx, args)),
        Commands::Odometer(args) => ("odometer", commands::odometer::run(&ctx, args)),
        Commands::Loan(args) => ("loan", commands::loan::run(&ctx, args)),
        Commands::PayOff(args) => ("pay-off", commands::pay_off::run(&ctx, args)),
        Commands::Register(args) => ("register", commands::register::run(&ctx, args)),
        Commands::History(args) => ("history", commands::history::run(&ctx, args)),
        Commands::Upcoming(args) => ("upcoming", commands::upcoming::run(&ctx, args)),
        Commands::Status(args) => ("status", commands::status::run(&ctx, args)),
        Commands::Validate => ("validate", commands::validate::run(&ctx)),
    };

    if let Err(e) = result {
        tracing::debug!(command = name, error = %e, "command failed");
        if ctx.json {
            output::output_json_error(name, &format!("{e:#}"));
        } else {
            output::print_error(&format!("Error: {e:#}"));
        }
        std::process::exit(1);
    }
}
