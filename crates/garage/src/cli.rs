use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "garage",
    about = "Know what your car needs next",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output as structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log engine decisions to stderr (same as GARAGE_LOG=debug).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today.
    #[arg(long = "as-of", global = true)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .garage directory
    Init,

    /// Add a vehicle
    #[command(name = "add-vehicle")]
    AddVehicle(AddVehicleArgs),

    /// List vehicles, newest first
    Vehicles,

    /// Show one vehicle's details
    Show(VehicleArg),

    /// Change fields on a vehicle
    #[command(name = "edit-vehicle")]
    EditVehicle(EditVehicleArgs),

    /// Delete a vehicle and all of its records
    #[command(name = "delete-vehicle")]
    DeleteVehicle(VehicleArg),

    /// Add a part type to the catalog
    #[command(name = "add-part")]
    AddPart(AddPartArgs),

    /// List the part catalog
    Parts,

    /// Record a service entry (parts installed or serviced)
    Service(ServiceArgs),

    /// Change fields on an installation record
    #[command(name = "edit-part")]
    EditPart(EditPartArgs),

    /// Record an odometer reading
    Odometer(OdometerArgs),

    /// Record a loan on a vehicle
    Loan(LoanArgs),

    /// Mark a vehicle's current loan as paid off
    #[command(name = "pay-off")]
    PayOff(PayOffArgs),

    /// Record a registration period
    Register(RegisterArgs),

    /// Show a vehicle's service history
    History(VehicleArg),

    /// Show maintenance coming due
    Upcoming(UpcomingArgs),

    /// Show mileage, maintenance summary, loan and registration
    Status(VehicleArg),

    /// Validate all records
    Validate,
}

// ── Argument structs ───────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct VehicleArg {
    /// Vehicle ID
    pub vehicle: u64,
}

#[derive(Args, Debug)]
pub struct AddVehicleArgs {
    #[arg(long)]
    pub make: String,

    #[arg(long)]
    pub model: String,

    #[arg(long)]
    pub year: i32,

    /// 17-character vehicle identification number
    #[arg(long)]
    pub vin: Option<String>,

    #[arg(long)]
    pub plate: Option<String>,

    #[arg(long)]
    pub trim: Option<String>,

    #[arg(long)]
    pub nickname: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long = "purchase-date")]
    pub purchase_date: Option<NaiveDate>,

    #[arg(long = "purchase-mileage")]
    pub purchase_mileage: Option<i64>,

    /// e.g. new, used, lease
    #[arg(long = "purchase-type")]
    pub purchase_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditVehicleArgs {
    /// Vehicle ID
    pub vehicle: u64,

    #[arg(long)]
    pub make: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub vin: Option<String>,

    #[arg(long)]
    pub plate: Option<String>,

    #[arg(long)]
    pub trim: Option<String>,

    #[arg(long)]
    pub nickname: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long = "purchase-date")]
    pub purchase_date: Option<NaiveDate>,

    #[arg(long = "purchase-mileage")]
    pub purchase_mileage: Option<i64>,

    #[arg(long = "purchase-type")]
    pub purchase_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddPartArgs {
    /// Category, e.g. Engine, Brakes, Tires
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub name: String,

    /// Expected lifespan in distance units
    #[arg(long)]
    pub miles: Option<i64>,

    /// Expected lifespan in months
    #[arg(long)]
    pub months: Option<i32>,

    #[arg(long, default_value = "medium", value_parser = ["low", "medium", "high", "critical"])]
    pub importance: String,
}

#[derive(Args, Debug)]
pub struct ServiceArgs {
    /// Vehicle ID
    pub vehicle: u64,

    /// Odometer reading at the time of service
    #[arg(long)]
    pub mileage: i64,

    /// Service date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Shop where the work was done
    #[arg(long)]
    pub shop: Option<String>,

    /// Catalog part ID (repeatable)
    #[arg(long = "part")]
    pub parts: Vec<u64>,

    /// Read part entries as a JSON array from stdin
    #[arg(long)]
    pub stdin: bool,

    #[arg(long = "type", default_value = "new", value_parser = ["new", "service"])]
    pub kind: String,

    #[arg(long)]
    pub cost: Option<f64>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long = "warranty-miles")]
    pub warranty_miles: Option<i64>,

    #[arg(long = "warranty-months")]
    pub warranty_months: Option<i32>,

    /// Override the catalog lifespan in distance units
    #[arg(long = "life-miles")]
    pub life_miles: Option<i64>,

    /// Override the catalog lifespan in months
    #[arg(long = "life-months")]
    pub life_months: Option<i32>,
}

#[derive(Args, Debug)]
pub struct EditPartArgs {
    /// Installation ID (see `garage history`)
    pub installation: u64,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub mileage: Option<i64>,

    #[arg(long)]
    pub shop: Option<String>,

    #[arg(long = "type", value_parser = ["new", "service"])]
    pub kind: Option<String>,

    #[arg(long)]
    pub cost: Option<f64>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long = "warranty-miles")]
    pub warranty_miles: Option<i64>,

    #[arg(long = "warranty-months")]
    pub warranty_months: Option<i32>,

    #[arg(long = "life-miles")]
    pub life_miles: Option<i64>,

    #[arg(long = "life-months")]
    pub life_months: Option<i32>,
}

#[derive(Args, Debug)]
pub struct OdometerArgs {
    /// Vehicle ID
    pub vehicle: u64,

    pub mileage: i64,

    /// Reading date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Vehicle ID
    pub vehicle: u64,

    #[arg(long)]
    pub lender: String,

    #[arg(long)]
    pub start: NaiveDate,

    /// Term in months
    #[arg(long)]
    pub term: i32,

    /// Annual interest rate in percent
    #[arg(long, default_value_t = 0.0)]
    pub rate: f64,
}

#[derive(Args, Debug)]
pub struct PayOffArgs {
    /// Vehicle ID
    pub vehicle: u64,

    /// Payoff date (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Vehicle ID
    pub vehicle: u64,

    #[arg(long)]
    pub start: NaiveDate,

    #[arg(long)]
    pub expires: NaiveDate,

    /// Issuing state
    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpcomingArgs {
    /// Vehicle ID
    pub vehicle: u64,

    /// Order by urgency (default) or by intrinsic part importance
    #[arg(long, default_value = "urgency", value_parser = ["urgency", "importance"])]
    pub sort: String,
}
