use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::due::{LifeBasis, Remaining, compute_due_status};
use crate::error::{GarageError, Result};
use crate::format;
use crate::lifecycle::resolve_current_installations;
use crate::types::{
    GarageConfig, Importance, PartCatalogEntry, PartInstallation, StoredRecord, Tier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most severe first, then least remaining distance.
    #[default]
    Urgency,
    /// Highest intrinsic importance first, input order kept among equals.
    Importance,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgency => "urgency",
            Self::Importance => "importance",
        }
    }
}

/// One maintenance forecast for a single part type on a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryItem {
    pub part_id: u64,
    pub name: String,
    pub category: String,
    pub installation_id: u64,
    pub due_distance: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub remaining_distance: Remaining,
    pub remaining_months: Remaining,
    pub severity: Tier,
    pub importance: Importance,
    pub priority: u8,
    pub reason: String,
}

/// Sort advisories in place. Both orders are stable.
pub fn sort_advisories(items: &mut [&AdvisoryItem], mode: SortMode) {
    match mode {
        SortMode::Urgency => items.sort_by(|a, b| {
            b.severity
                .rank()
                .cmp(&a.severity.rank())
                .then_with(|| a.remaining_distance.cmp(&b.remaining_distance))
        }),
        SortMode::Importance => items.sort_by(|a, b| b.priority.cmp(&a.priority)),
    }
}

/// The advisory list for one vehicle, held in resolver order so either
/// ordering can be produced without recomputing anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastResult {
    pub current_mileage: i64,
    pub items: Vec<AdvisoryItem>,
}

impl ForecastResult {
    pub fn ordered(&self, mode: SortMode) -> Vec<&AdvisoryItem> {
        let mut items: Vec<&AdvisoryItem> = self.items.iter().collect();
        sort_advisories(&mut items, mode);
        items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_by_tier(&self, tier: Tier) -> usize {
        self.items.iter().filter(|i| i.severity == tier).count()
    }
}

/// Build the advisory for one resolved installation, or `None` when the part
/// has no basis for a due estimate.
pub fn build_advisory(
    installation: &PartInstallation,
    catalog: &PartCatalogEntry,
    current_mileage: i64,
    today: NaiveDate,
    config: &GarageConfig,
) -> Result<Option<AdvisoryItem>> {
    let basis = LifeBasis {
        installation_date: installation.installation_date,
        installation_mileage: installation.installation_mileage,
        life_mileage: installation.life_mileage(catalog),
        life_months: installation.life_months(catalog),
    };
    let Some(status) = compute_due_status(&basis, current_mileage, today)? else {
        return Ok(None);
    };
    let severity = config
        .severity
        .classify(status.remaining_distance, status.remaining_months);

    Ok(Some(AdvisoryItem {
        part_id: catalog.part_id,
        name: catalog.name.clone(),
        category: catalog.category.clone(),
        installation_id: installation.id,
        due_distance: status.due_distance,
        due_date: status.due_date,
        remaining_distance: status.remaining_distance,
        remaining_months: status.remaining_months,
        severity,
        importance: catalog.importance,
        priority: catalog.importance.priority(),
        reason: format::describe_due(&status, &config.distance_unit),
    }))
}

/// Resolve, evaluate and classify every part on a vehicle.
///
/// `history` is the vehicle's full installation history in any order.
/// Installations that reference a part missing from `catalog` are skipped.
pub fn forecast_parts(
    history: &[PartInstallation],
    catalog: &[PartCatalogEntry],
    current_mileage: i64,
    today: NaiveDate,
    config: &GarageConfig,
) -> Result<ForecastResult> {
    if current_mileage < 0 {
        return Err(GarageError::Validation(format!(
            "current mileage must not be negative (got {current_mileage})"
        )));
    }

    let by_id: HashMap<u64, &PartCatalogEntry> =
        catalog.iter().map(|p| (p.part_id, p)).collect();

    let resolved = resolve_current_installations(history);
    tracing::debug!(
        records = history.len(),
        parts = resolved.len(),
        "resolved current installations"
    );

    let mut items = Vec::with_capacity(resolved.len());
    for installation in resolved {
        installation.validate()?;
        let Some(entry) = by_id.get(&installation.part_id) else {
            tracing::warn!(
                installation = installation.id,
                part_id = installation.part_id,
                "installation references a part missing from the catalog; skipping"
            );
            continue;
        };
        entry.validate()?;
        match build_advisory(installation, entry, current_mileage, today, config)? {
            Some(item) => items.push(item),
            None => tracing::debug!(part_id = entry.part_id, "no lifespan basis; no advisory"),
        }
    }

    Ok(ForecastResult {
        current_mileage,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InstallKind;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn part(
        part_id: u64,
        name: &str,
        miles: Option<i64>,
        months: Option<i32>,
        importance: Importance,
    ) -> PartCatalogEntry {
        PartCatalogEntry {
            part_id,
            category: "General".to_string(),
            name: name.to_string(),
            expected_lifespan_miles: miles,
            expected_lifespan_months: months,
            importance,
        }
    }

    fn install(id: u64, part_id: u64, date: NaiveDate, mileage: i64) -> PartInstallation {
        PartInstallation {
            id,
            vehicle_id: 1,
            part_id,
            installation_date: date,
            installation_mileage: Some(mileage),
            warranty_mileage: None,
            warranty_months: None,
            estimated_life_mileage: None,
            estimated_life_months: None,
            cost: None,
            shop_location: None,
            notes: None,
            kind: InstallKind::New,
        }
    }

    fn names(items: &[&AdvisoryItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn mileage_scenario_is_orange() {
        let catalog = vec![part(1, "Timing Belt", Some(30_000), None, Importance::High)];
        let history = vec![install(1, 1, d(2020, 1, 1), 50_000)];
        let result =
            forecast_parts(&history, &catalog, 78_500, d(2024, 1, 1), &GarageConfig::default())
                .unwrap();

        assert_eq!(result.items.len(), 1);
        let item = &result.items[0];
        assert_eq!(item.due_distance, Some(80_000));
        assert_eq!(item.remaining_distance, Remaining::Known(1_500));
        assert_eq!(item.remaining_months, Remaining::Unbounded);
        assert_eq!(item.severity, Tier::Orange);
        assert_eq!(item.priority, 3);
    }

    #[test]
    fn parts_without_lifespan_are_excluded() {
        let catalog = vec![
            part(1, "Floor Mats", None, None, Importance::Low),
            part(2, "Oil Change", Some(5_000), Some(6), Importance::Medium),
        ];
        let history = vec![
            install(1, 1, d(2023, 1, 1), 10_000),
            install(2, 2, d(2023, 1, 1), 10_000),
        ];
        let result =
            forecast_parts(&history, &catalog, 11_000, d(2023, 2, 1), &GarageConfig::default())
                .unwrap();
        assert_eq!(names(&result.ordered(SortMode::Urgency)), vec!["Oil Change"]);
    }

    #[test]
    fn overdue_low_outranks_healthy_critical() {
        let catalog = vec![
            part(1, "Brakes", Some(60_000), None, Importance::Critical),
            part(2, "Wipers", Some(10_000), None, Importance::Low),
        ];
        let history = vec![
            install(1, 1, d(2023, 1, 1), 0),
            install(2, 2, d(2023, 1, 1), 40_001),
        ];
        // Brakes: 9,998 left. Wipers: 1 over.
        let result =
            forecast_parts(&history, &catalog, 50_002, d(2023, 6, 1), &GarageConfig::default())
                .unwrap();
        let urgency = result.ordered(SortMode::Urgency);
        assert_eq!(names(&urgency), vec!["Wipers", "Brakes"]);
        assert_eq!(urgency[0].remaining_distance, Remaining::Known(-1));
        assert_eq!(urgency[0].severity, Tier::Red);
        assert_eq!(urgency[1].remaining_distance, Remaining::Known(9_998));

        let importance = result.ordered(SortMode::Importance);
        assert_eq!(names(&importance), vec!["Brakes", "Wipers"]);
    }

    #[test]
    fn urgency_ties_break_on_remaining_distance() {
        let catalog = vec![
            part(1, "A", Some(4_000), None, Importance::Low),
            part(2, "B", Some(2_000), None, Importance::Low),
            part(3, "C", None, Some(2), Importance::Low),
        ];
        let history = vec![
            install(1, 1, d(2024, 1, 1), 1_000),
            install(2, 2, d(2024, 1, 1), 1_000),
            install(3, 3, d(2024, 1, 1), 1_000),
        ];
        let result =
            forecast_parts(&history, &catalog, 2_000, d(2024, 1, 1), &GarageConfig::default())
                .unwrap();
        // All orange; B has 1,000 left, A 3,000, C has no distance basis.
        assert_eq!(
            names(&result.ordered(SortMode::Urgency)),
            vec!["B", "A", "C"]
        );
    }

    #[test]
    fn importance_order_is_stable() {
        let catalog = vec![
            part(1, "First", Some(1_000), None, Importance::Medium),
            part(2, "Second", Some(1_000), None, Importance::Critical),
            part(3, "Third", Some(1_000), None, Importance::Medium),
            part(4, "Fourth", Some(1_000), None, Importance::Unknown),
            part(5, "Fifth", Some(1_000), None, Importance::Low),
        ];
        let history: Vec<PartInstallation> = (1..=5)
            .map(|i| install(i, i, d(2024, 1, 1), 0))
            .collect();
        let result =
            forecast_parts(&history, &catalog, 0, d(2024, 1, 1), &GarageConfig::default())
                .unwrap();
        assert_eq!(
            names(&result.ordered(SortMode::Importance)),
            vec!["Second", "First", "Third", "Fourth", "Fifth"]
        );
    }

    #[test]
    fn only_current_installation_is_forecast() {
        let catalog = vec![part(7, "Battery", None, Some(48), Importance::High)];
        let history = vec![
            install(9, 7, d(2023, 6, 1), 30_000),
            install(5, 7, d(2022, 1, 1), 20_000),
        ];
        let result =
            forecast_parts(&history, &catalog, 31_000, d(2024, 1, 1), &GarageConfig::default())
                .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].installation_id, 9);
        assert_eq!(result.items[0].due_date, Some(d(2027, 6, 1)));
        assert_eq!(result.items[0].severity, Tier::Green);
    }

    #[test]
    fn unknown_catalog_part_is_skipped() {
        let history = vec![install(1, 99, d(2023, 1, 1), 0)];
        let result =
            forecast_parts(&history, &[], 1_000, d(2024, 1, 1), &GarageConfig::default())
                .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn negative_catalog_lifespan_is_rejected() {
        let catalog = vec![part(1, "Coolant", Some(-100_000), None, Importance::Medium)];
        let history = vec![install(1, 1, d(2023, 1, 1), 10_000)];
        let err = forecast_parts(&history, &catalog, 10_000, d(2024, 1, 1), &GarageConfig::default())
            .unwrap_err();
        assert!(matches!(err, GarageError::Validation(_)));
    }

    #[test]
    fn overflowing_lifespan_is_rejected() {
        let catalog = vec![part(1, "Chassis", Some(i64::MAX), None, Importance::Low)];
        let history = vec![install(1, 1, d(2023, 1, 1), 10)];
        let err = forecast_parts(&history, &catalog, 10, d(2024, 1, 1), &GarageConfig::default())
            .unwrap_err();
        assert!(matches!(err, GarageError::Validation(_)));
    }

    #[test]
    fn negative_mileage_is_rejected() {
        let err = forecast_parts(&[], &[], -1, d(2024, 1, 1), &GarageConfig::default())
            .unwrap_err();
        assert!(matches!(err, GarageError::Validation(_)));
    }

    #[test]
    fn empty_history_means_nothing_due() {
        let result =
            forecast_parts(&[], &[], 12_000, d(2024, 1, 1), &GarageConfig::default()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.count_by_tier(Tier::Red), 0);
    }
}
