use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::fabric::FabricCatalog;
use crate::domain::order::Order;

// ============================================================================
// Reports - monthly order roll-up and fabric popularity
// ============================================================================

/// Number of calendar months in the monthly roll-up, ending with the current one
pub const REPORT_MONTHS: u32 = 6;

/// How many fabrics the popularity list shows
pub const TOP_FABRICS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub year: i32,
    /// 1-based
    pub month: u32,
    /// Short month name, e.g. "Mar"
    pub label: String,
    pub order_count: usize,
    /// Sum of order totals
    pub revenue: f64,
}

/// Order count and revenue for the trailing calendar months, oldest first.
/// Orders are bucketed by the UTC year and month of `createdAt`.
pub fn monthly_totals(orders: &[Order], now: DateTime<Utc>) -> Vec<MonthlyTotal> {
    (0..REPORT_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_before(now.year(), now.month(), back);
            let in_month: Vec<&Order> = orders
                .iter()
                .filter(|o| o.created_at().year() == year && o.created_at().month() == month)
                .collect();

            MonthlyTotal {
                year,
                month,
                label: month_label(year, month),
                order_count: in_month.len(),
                revenue: in_month.iter().map(|o| o.payment().total).sum(),
            }
        })
        .collect()
}

fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FabricUsage {
    pub fabric_id: Uuid,
    pub name: String,
    /// Number of order items referencing the fabric (not meters)
    pub used: usize,
}

/// Most referenced fabrics, descending. Ties keep catalog order and unused
/// fabrics fill the list when fewer than [`TOP_FABRICS_LIMIT`] are in use.
pub fn top_fabrics(fabrics: &FabricCatalog, orders: &[Order]) -> Vec<FabricUsage> {
    let mut usage: Vec<FabricUsage> = fabrics
        .iter()
        .map(|fabric| FabricUsage {
            fabric_id: fabric.id,
            name: fabric.name.clone(),
            used: orders
                .iter()
                .flat_map(|o| o.items())
                .filter(|item| item.fabric_id == Some(fabric.id))
                .count(),
        })
        .collect();

    usage.sort_by(|a, b| b.used.cmp(&a.used));
    usage.truncate(TOP_FABRICS_LIMIT);
    usage
}

// ============================================================================
// Unit Tests
// ============================================================================
