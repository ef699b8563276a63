use thiserror::Error;

#[derive(Error, Debug)]
pub enum GarageError {
    #[error("No .garage/ directory found. Run `garage init` first.")]
    NotInitialized,

    #[error("Vehicle {0} not found. Run `garage vehicles` to see vehicle IDs.")]
    VehicleNotFound(u64),

    #[error("Part {0} not found in the catalog. Run `garage parts` to see part IDs.")]
    PartNotFound(u64),

    #[error("Installation {0} not found. Run `garage history <vehicle>` to see installation IDs.")]
    InstallationNotFound(u64),

    #[error("Invalid VIN: \"{0}\". A VIN is 17 characters (letters and digits, no I, O or Q).")]
    InvalidVin(String),

    #[error(
        "Timed out waiting for lock on {0}. If no other garage process is running, delete the lock file manually."
    )]
    LockTimeout(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, GarageError>;
