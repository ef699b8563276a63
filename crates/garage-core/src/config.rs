use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GarageError, Result};
use crate::types::{
    GarageConfig, Loan, OdometerReading, PartCatalogEntry, PartInstallation, RegistrationPeriod,
    StoredRecord, Vehicle,
};

const GARAGE_DIR: &str = ".garage";
const CONFIG_FILE: &str = "garage.config.yaml";
const RECORDS_DIR: &str = "records";

pub const GARAGE_README: &str = r#"# .garage/

This directory holds the records for `garage`, a vehicle ownership and maintenance tracker.

## Key Commands

- `garage init`         — Initialize a .garage directory
- `garage add-vehicle`  — Add a vehicle
- `garage show`         — Show one vehicle's details
- `garage edit-vehicle` — Change fields on a vehicle
- `garage delete-vehicle` — Delete a vehicle and all of its records
- `garage add-part`     — Add a part type to the catalog
- `garage service`      — Record a service entry (parts installed or serviced)
- `garage edit-part`    — Change fields on an installation record
- `garage odometer`     — Record an odometer reading
- `garage loan`         — Record a loan
- `garage pay-off`      — Mark the current loan paid off
- `garage register`     — Record a registration period
- `garage history`      — Show service history with warranty coverage
- `garage upcoming`     — Show maintenance coming due
- `garage status`       — Show mileage, loan and registration status
- `garage validate`     — Validate all records

## Structure

- `garage.config.yaml` — Severity and registration thresholds
- `records/`           — JSONL files, one per record type
"#;

static VIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").expect("valid VIN regex"));

pub fn get_garage_dir(cwd: &Path) -> PathBuf {
    cwd.join(GARAGE_DIR)
}

pub fn get_config_path(cwd: &Path) -> PathBuf {
    get_garage_dir(cwd).join(CONFIG_FILE)
}

pub fn get_records_dir(cwd: &Path) -> PathBuf {
    get_garage_dir(cwd).join(RECORDS_DIR)
}

pub fn get_records_path<T: StoredRecord>(cwd: &Path) -> PathBuf {
    get_records_dir(cwd).join(format!("{}.jsonl", T::FILE))
}

/// Every record file, in the order `validate` reports them.
pub fn record_file_stems() -> [&'static str; 6] {
    [
        Vehicle::FILE,
        PartCatalogEntry::FILE,
        PartInstallation::FILE,
        OdometerReading::FILE,
        Loan::FILE,
        RegistrationPeriod::FILE,
    ]
}

/// VINs are 17 characters; I, O and Q are never used.
pub fn validate_vin(vin: &str) -> Result<()> {
    if !VIN_RE.is_match(&vin.to_ascii_uppercase()) {
        return Err(GarageError::InvalidVin(vin.to_string()));
    }
    Ok(())
}

pub fn read_config(cwd: &Path) -> Result<GarageConfig> {
    let config_path = get_config_path(cwd);
    let content = fs::read_to_string(&config_path)?;
    let config: GarageConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn write_config(config: &GarageConfig, cwd: &Path) -> Result<()> {
    let config_path = get_config_path(cwd);
    let content = serde_yaml::to_string(config)?;
    fs::write(&config_path, content)?;
    Ok(())
}

/// Cutoffs must be ordered: the orange bound can't exceed the yellow one.
fn validate_config(config: &GarageConfig) -> Result<()> {
    let tables = [
        ("severity.distance", config.severity.distance),
        ("severity.months", config.severity.months),
        ("registration.months", config.registration.months),
    ];
    for (name, cutoffs) in tables {
        if cutoffs.high < 0 || cutoffs.high > cutoffs.medium {
            return Err(GarageError::Validation(format!(
                "{name}: expected 0 <= high <= medium, got high={} medium={}",
                cutoffs.high, cutoffs.medium
            )));
        }
    }
    Ok(())
}

pub fn ensure_garage_dir(cwd: &Path) -> Result<()> {
    if !get_garage_dir(cwd).is_dir() {
        return Err(GarageError::NotInitialized);
    }
    Ok(())
}

pub fn init_garage_dir(cwd: &Path) -> Result<()> {
    let garage_dir = get_garage_dir(cwd);
    let records_dir = get_records_dir(cwd);
    fs::create_dir_all(&garage_dir)?;
    fs::create_dir_all(&records_dir)?;

    // Only write default config if none exists
    let config_path = get_config_path(cwd);
    if !config_path.exists() {
        write_config(&GarageConfig::default(), cwd)?;
    }

    for stem in record_file_stems() {
        let path = records_dir.join(format!("{stem}.jsonl"));
        if !path.exists() {
            fs::write(&path, "")?;
        }
    }

    let readme_path = garage_dir.join("README.md");
    if !readme_path.exists() {
        fs::write(&readme_path, GARAGE_README)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_vins() {
        assert!(validate_vin("1HGCM82633A004352").is_ok());
        assert!(validate_vin("1hgcm82633a004352").is_ok());
    }

    #[test]
    fn invalid_vins() {
        assert!(validate_vin("").is_err());
        assert!(validate_vin("1HGCM82633A00435").is_err());
        assert!(validate_vin("1HGCM82633A0043O2").is_err());
        assert!(validate_vin("1HGCM 2633A004352").is_err());
    }

    #[test]
    fn init_creates_structure() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();

        assert!(get_garage_dir(tmp.path()).is_dir());
        assert!(get_config_path(tmp.path()).exists());
        assert!(get_records_dir(tmp.path()).is_dir());
        assert!(get_records_path::<PartInstallation>(tmp.path()).exists());

        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config, GarageConfig::default());
    }

    #[test]
    fn init_preserves_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();

        let mut config = read_config(tmp.path()).unwrap();
        config.distance_unit = "km".to_string();
        write_config(&config, tmp.path()).unwrap();

        init_garage_dir(tmp.path()).unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.distance_unit, "km");
    }

    #[test]
    fn misordered_cutoffs_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        init_garage_dir(tmp.path()).unwrap();

        let mut config = GarageConfig::default();
        config.severity.distance.high = 9_000;
        write_config(&config, tmp.path()).unwrap();

        assert!(matches!(
            read_config(tmp.path()),
            Err(GarageError::Validation(_))
        ));
    }

    #[test]
    fn uninitialized_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            ensure_garage_dir(tmp.path()),
            Err(GarageError::NotInitialized)
        ));
    }
}
