use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GarageError, Result};
use crate::tier::Cutoffs;

// ── Enums ──────────────────────────────────────────────────────────────────

/// Intrinsic criticality of a part type, independent of how soon it is due.
/// Unrecognized stored values read back as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Importance {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    Unknown,
}

impl Importance {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }

    /// Numeric priority used by the importance ordering.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low | Self::Unknown => 1,
        }
    }
}

impl From<String> for Importance {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Importance> for String {
    fn from(i: Importance) -> Self {
        i.as_str().to_string()
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency classification. Red is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Red,
    Orange,
    Yellow,
    Green,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Self::Red => 4,
            Self::Orange => 3,
            Self::Yellow => 2,
            Self::Green => 1,
        }
    }

    pub const ALL: [Tier; 4] = [Tier::Red, Tier::Orange, Tier::Yellow, Tier::Green];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallKind {
    #[default]
    New,
    Service,
}

impl InstallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Service => "service",
        }
    }
}

impl std::fmt::Display for InstallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Stored records ─────────────────────────────────────────────────────────

/// A row in one of the JSONL record files.
pub trait StoredRecord: Serialize + serde::de::DeserializeOwned {
    /// File stem under `.garage/records/`.
    const FILE: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);

    /// Owning vehicle, for per-vehicle record sets.
    fn vehicle_id(&self) -> Option<u64> {
        None
    }

    /// Reject values that no real record can carry.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn non_negative(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v < 0 => Err(GarageError::Validation(format!(
            "{field} must not be negative (got {v})"
        ))),
        _ => Ok(()),
    }
}

fn finite(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(GarageError::Validation(format!(
            "{field} must be a finite number"
        ))),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: u64,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_type: Option<String>,
}

impl Vehicle {
    /// "2018 Blue Honda Civic", or the nickname when one is set.
    pub fn display_name(&self) -> String {
        if let Some(ref nick) = self.nickname {
            return nick.clone();
        }
        let mut parts = vec![self.year.to_string()];
        if let Some(ref color) = self.color {
            parts.push(color.clone());
        }
        parts.push(self.make.clone());
        parts.push(self.model.clone());
        parts.join(" ")
    }
}

impl StoredRecord for Vehicle {
    const FILE: &'static str = "vehicles";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_negative("purchase_mileage", self.purchase_mileage)?;
        if let Some(ref vin) = self.vin {
            crate::config::validate_vin(vin)?;
        }
        Ok(())
    }
}

/// Reference data describing a part type and its default lifespan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartCatalogEntry {
    #[serde(default)]
    pub part_id: u64,
    pub category: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_lifespan_miles: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_lifespan_months: Option<i32>,
    #[serde(default)]
    pub importance: Importance,
}

impl StoredRecord for PartCatalogEntry {
    const FILE: &'static str = "catalog";

    fn id(&self) -> u64 {
        self.part_id
    }

    fn set_id(&mut self, id: u64) {
        self.part_id = id;
    }

    fn validate(&self) -> Result<()> {
        non_negative("expected_lifespan_miles", self.expected_lifespan_miles)?;
        non_negative(
            "expected_lifespan_months",
            self.expected_lifespan_months.map(i64::from),
        )
    }
}

/// One replacement or service event for a part on a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartInstallation {
    #[serde(default)]
    pub id: u64,
    pub vehicle_id: u64,
    pub part_id: u64,
    pub installation_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_months: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_life_mileage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_life_months: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: InstallKind,
}

impl PartInstallation {
    /// Life in distance units, falling back to the catalog default.
    pub fn life_mileage(&self, catalog: &PartCatalogEntry) -> Option<i64> {
        self.estimated_life_mileage.or(catalog.expected_lifespan_miles)
    }

    /// Life in months, falling back to the catalog default.
    pub fn life_months(&self, catalog: &PartCatalogEntry) -> Option<i32> {
        self.estimated_life_months.or(catalog.expected_lifespan_months)
    }
}

impl StoredRecord for PartInstallation {
    const FILE: &'static str = "installations";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn vehicle_id(&self) -> Option<u64> {
        Some(self.vehicle_id)
    }

    fn validate(&self) -> Result<()> {
        non_negative("installation_mileage", self.installation_mileage)?;
        non_negative("warranty_mileage", self.warranty_mileage)?;
        non_negative("warranty_months", self.warranty_months.map(i64::from))?;
        non_negative("estimated_life_mileage", self.estimated_life_mileage)?;
        non_negative(
            "estimated_life_months",
            self.estimated_life_months.map(i64::from),
        )?;
        finite("cost", self.cost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdometerReading {
    #[serde(default)]
    pub id: u64,
    pub vehicle_id: u64,
    pub date: NaiveDate,
    pub mileage: i64,
}

impl StoredRecord for OdometerReading {
    const FILE: &'static str = "odometer";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn vehicle_id(&self) -> Option<u64> {
        Some(self.vehicle_id)
    }

    fn validate(&self) -> Result<()> {
        non_negative("mileage", Some(self.mileage))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(default)]
    pub id: u64,
    pub vehicle_id: u64,
    pub lender: String,
    pub start_date: NaiveDate,
    pub term_months: i32,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub paid_off: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_off_date: Option<NaiveDate>,
}

impl StoredRecord for Loan {
    const FILE: &'static str = "loans";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn vehicle_id(&self) -> Option<u64> {
        Some(self.vehicle_id)
    }

    fn validate(&self) -> Result<()> {
        if self.term_months <= 0 {
            return Err(GarageError::Validation(format!(
                "term_months must be positive (got {})",
                self.term_months
            )));
        }
        finite("interest_rate", Some(self.interest_rate))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPeriod {
    #[serde(default)]
    pub id: u64,
    pub vehicle_id: u64,
    pub start_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StoredRecord for RegistrationPeriod {
    const FILE: &'static str = "registrations";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn vehicle_id(&self) -> Option<u64> {
        Some(self.vehicle_id)
    }

    fn validate(&self) -> Result<()> {
        if self.expiration_date < self.start_date {
            return Err(GarageError::Validation(format!(
                "expiration_date {} is before start_date {}",
                self.expiration_date, self.start_date
            )));
        }
        Ok(())
    }
}

// ── Config ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityCutoffs {
    pub distance: Cutoffs,
    pub months: Cutoffs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationCutoffs {
    pub months: Cutoffs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarageConfig {
    pub version: String,
    pub distance_unit: String,
    pub severity: SeverityCutoffs,
    pub registration: RegistrationCutoffs,
}

impl Default for GarageConfig {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            distance_unit: "mi".to_string(),
            severity: SeverityCutoffs {
                distance: Cutoffs {
                    high: 3000,
                    medium: 5000,
                },
                months: Cutoffs { high: 3, medium: 6 },
            },
            registration: RegistrationCutoffs {
                months: Cutoffs { high: 1, medium: 3 },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_parses_unknown_values() {
        let entry: PartCatalogEntry = serde_json::from_str(
            r#"{"part_id":3,"category":"Engine","name":"Oil","importance":"whatever"}"#,
        )
        .unwrap();
        assert_eq!(entry.importance, Importance::Unknown);
        assert_eq!(entry.importance.priority(), 1);

        let missing: PartCatalogEntry =
            serde_json::from_str(r#"{"part_id":4,"category":"Engine","name":"Filter"}"#).unwrap();
        assert_eq!(missing.importance, Importance::Unknown);
    }

    #[test]
    fn importance_priorities() {
        assert_eq!(Importance::Critical.priority(), 4);
        assert_eq!(Importance::High.priority(), 3);
        assert_eq!(Importance::Medium.priority(), 2);
        assert_eq!(Importance::Low.priority(), 1);
        assert_eq!(Importance::parse("CRITICAL"), Importance::Critical);
    }

    #[test]
    fn installation_type_tag() {
        let json = r#"{"id":1,"vehicle_id":2,"part_id":3,"installation_date":"2023-06-01","installation_mileage":50000,"type":"service"}"#;
        let inst: PartInstallation = serde_json::from_str(json).unwrap();
        assert_eq!(inst.kind, InstallKind::Service);
        assert_eq!(inst.estimated_life_mileage, None);

        let out = serde_json::to_string(&inst).unwrap();
        assert!(out.contains(r#""type":"service""#));
    }

    #[test]
    fn life_falls_back_to_catalog() {
        let catalog = PartCatalogEntry {
            part_id: 3,
            category: "Brakes".to_string(),
            name: "Pads".to_string(),
            expected_lifespan_miles: Some(40000),
            expected_lifespan_months: Some(36),
            importance: Importance::High,
        };
        let mut inst: PartInstallation = serde_json::from_str(
            r#"{"vehicle_id":1,"part_id":3,"installation_date":"2023-01-01"}"#,
        )
        .unwrap();
        assert_eq!(inst.life_mileage(&catalog), Some(40000));
        assert_eq!(inst.life_months(&catalog), Some(36));

        inst.estimated_life_mileage = Some(25000);
        assert_eq!(inst.life_mileage(&catalog), Some(25000));
    }

    #[test]
    fn loan_validation() {
        let mut loan = Loan {
            id: 1,
            vehicle_id: 1,
            lender: "Credit Union".to_string(),
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            term_months: 36,
            interest_rate: 4.5,
            paid_off: false,
            paid_off_date: None,
        };
        assert!(loan.validate().is_ok());

        loan.term_months = -1;
        assert!(matches!(loan.validate(), Err(GarageError::Validation(_))));

        loan.term_months = 12;
        loan.interest_rate = f64::NAN;
        assert!(loan.validate().is_err());
    }

    #[test]
    fn negative_mileage_rejected() {
        let reading = OdometerReading {
            id: 1,
            vehicle_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            mileage: -5,
        };
        assert!(reading.validate().is_err());
    }

    #[test]
    fn vehicle_display_name() {
        let mut v: Vehicle =
            serde_json::from_str(r#"{"make":"Honda","model":"Civic","year":2018,"color":"Blue"}"#)
                .unwrap();
        assert_eq!(v.display_name(), "2018 Blue Honda Civic");
        v.nickname = Some("Blue Thunder".to_string());
        assert_eq!(v.display_name(), "Blue Thunder");
    }

    #[test]
    fn config_default() {
        let config = GarageConfig::default();
        assert_eq!(config.version, "1");
        assert_eq!(config.severity.distance.high, 3000);
        assert_eq!(config.severity.months.medium, 6);
        assert_eq!(config.registration.months.high, 1);
    }

    #[test]
    fn config_yaml_round_trip() {
        let config = GarageConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: GarageConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
