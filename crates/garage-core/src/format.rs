use chrono::NaiveDate;

use crate::due::{DueStatus, Remaining};
use crate::forecast::AdvisoryItem;
use crate::loan::LoanStatus;
use crate::registration::RegistrationStatus;
use crate::types::{PartCatalogEntry, PartInstallation};
use crate::warranty::WarrantyStatus;

// ── Helpers ────────────────────────────────────────────────────────────────

/// Group digits in threes: `80000` → `"80,000"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn describe_distance(remaining: i64, unit: &str) -> String {
    if remaining < 0 {
        format!("overdue by {} {unit}", format_thousands(-remaining))
    } else {
        format!("{} {unit} left", format_thousands(remaining))
    }
}

fn describe_months(remaining: i64) -> String {
    match remaining {
        r if r < 0 => format!("overdue by {}", plural(-r, "month")),
        0 => "due this month".to_string(),
        r => format!("{} left", plural(r, "month")),
    }
}

/// One-line summary of where a part stands, e.g.
/// `"Due at 80,000 mi (1,500 mi left)"`.
pub fn describe_due(status: &DueStatus, unit: &str) -> String {
    let mut parts = Vec::new();
    if let (Some(due), Remaining::Known(left)) = (status.due_distance, status.remaining_distance) {
        parts.push(format!(
            "Due at {} {unit} ({})",
            format_thousands(due),
            describe_distance(left, unit)
        ));
    }
    if let (Some(due), Remaining::Known(left)) = (status.due_date, status.remaining_months) {
        parts.push(format!("Due by {} ({})", format_date(due), describe_months(left)));
    }
    parts.join("; ")
}

// ── Sections ───────────────────────────────────────────────────────────────

pub fn format_advisory_line(item: &AdvisoryItem) -> String {
    format!(
        "[{}] {} ({}, {} importance) - {}",
        item.severity, item.name, item.category, item.importance, item.reason
    )
}

pub fn format_history_line(
    installation: &PartInstallation,
    part: Option<&PartCatalogEntry>,
    warranty: &WarrantyStatus,
    unit: &str,
) -> String {
    let name = part.map_or_else(
        || format!("part #{}", installation.part_id),
        |p| p.name.clone(),
    );
    let prefix = if installation.kind == crate::types::InstallKind::New {
        "New "
    } else {
        ""
    };
    let mut line = format!(
        "#{} {prefix}{name} - installed {}",
        installation.id,
        format_date(installation.installation_date)
    );
    if let Some(mileage) = installation.installation_mileage {
        line.push_str(&format!(" at {} {unit}", format_thousands(mileage)));
    }
    if let Some(ref shop) = installation.shop_location {
        line.push_str(&format!(" ({shop})"));
    }
    if let Some(cost) = installation.cost {
        line.push_str(&format!(" ${cost:.2}"));
    }
    match warranty {
        WarrantyStatus::None => {}
        WarrantyStatus::Expired => line.push_str(" [warranty expired]"),
        WarrantyStatus::Covered {
            until_mileage,
            until_date,
        } => {
            let mut limits = Vec::new();
            if let Some(m) = until_mileage {
                limits.push(format!("{} {unit}", format_thousands(*m)));
            }
            if let Some(d) = until_date {
                limits.push(format_date(*d));
            }
            line.push_str(&format!(" [warranty until {}]", limits.join(" or ")));
        }
    }
    line
}

pub fn format_loan_status(status: &LoanStatus) -> String {
    match status {
        LoanStatus::Absent => "Loan: none".to_string(),
        LoanStatus::Active {
            lender,
            is_paid_off: true,
            end_date,
            ..
        } => format!("Loan: {lender}, paid off ({})", format_date(*end_date)),
        LoanStatus::Active {
            lender,
            progress,
            end_date,
            elapsed_months,
            term_months,
            ..
        } => format!(
            "Loan: {lender}, {progress:.1}% complete ({}/{} months, ends {})",
            (*elapsed_months).clamp(0, *term_months),
            term_months,
            format_date(*end_date)
        ),
    }
}

pub fn format_registration_status(status: &RegistrationStatus) -> String {
    match status {
        RegistrationStatus::Absent => "Registration: none".to_string(),
        RegistrationStatus::Current {
            expiration_date,
            tier,
            months_to_go,
            state,
        } => {
            let when = if *months_to_go < 0 { "expired" } else { "expires" };
            format!(
                "Registration: {state}, {when} {} [{tier}] ({})",
                format_date(*expiration_date),
                describe_months(i64::from(*months_to_go))
            )
        }
    }
}
