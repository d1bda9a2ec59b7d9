//! Reporting Aggregator
//!
//! Filters enriched orders by an inclusive calendar-day range and an
//! optional product-name substring, groups them by business-timezone day,
//! and computes per-day and per-product totals.
//!
//! All day boundaries come from the configured business timezone, never
//! from the ambient environment, so report grouping is deterministic.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::orders::EnrichedOrder;
use crate::utils::money::{line_total, to_f64};
use crate::utils::time::{business_date, day_end_millis, day_start_millis};

/// Aggregated sales for one product name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub quantity: i64,
    pub total: f64,
}

/// All orders of one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct DailyReportGroup {
    pub date: NaiveDate,
    pub orders: Vec<EnrichedOrder>,
    pub day_total: f64,
}

/// Full report: day groups plus, when a product filter was given,
/// per-product sales totals
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub groups: Vec<DailyReportGroup>,
    pub product_sales: BTreeMap<String, ProductSales>,
}

/// Normalized product filter: trimmed, lowercased, empty → None
fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
}

/// Case-insensitive substring match against a line's resolved name
fn line_matches(line_name: Option<&str>, filter: &str) -> bool {
    line_name
        .map(|name| name.trim().to_lowercase().contains(filter))
        .unwrap_or(false)
}

/// Build the daily report over `[start, end]` (inclusive calendar days)
///
/// An order passes the product filter if ANY of its lines matches, or the
/// filter is empty. Zero orders in range yields empty groups, not an error.
pub fn daily_report(
    orders: Vec<EnrichedOrder>,
    start: NaiveDate,
    end: NaiveDate,
    filter: Option<&str>,
    tz: Tz,
) -> DailyReport {
    let filter = normalize_filter(filter);
    let start_ms = day_start_millis(start, tz);
    let end_ms = day_end_millis(end, tz);

    let mut passing: Vec<EnrichedOrder> = orders
        .into_iter()
        .filter(|order| order.created_at >= start_ms && order.created_at < end_ms)
        .filter(|order| match &filter {
            None => true,
            Some(f) => order
                .product_data
                .iter()
                .any(|line| line_matches(line.name.as_deref(), f)),
        })
        .collect();

    // Newest first; grouping below keeps this order within each day
    passing.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut sales_acc: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
    if let Some(f) = &filter {
        for order in &passing {
            for line in &order.product_data {
                if !line_matches(line.name.as_deref(), f) {
                    continue;
                }
                let (Some(name), Some(price)) = (&line.name, line.price) else {
                    continue;
                };
                let entry = sales_acc.entry(name.clone()).or_insert((0, Decimal::ZERO));
                entry.0 += line.quantity;
                entry.1 += line_total(price, line.quantity);
            }
        }
    }
    let product_sales: BTreeMap<String, ProductSales> = sales_acc
        .into_iter()
        .map(|(name, (quantity, total))| {
            (
                name,
                ProductSales {
                    quantity,
                    total: to_f64(total),
                },
            )
        })
        .collect();

    let mut by_day: BTreeMap<NaiveDate, Vec<EnrichedOrder>> = BTreeMap::new();
    for order in passing {
        by_day
            .entry(business_date(order.created_at, tz))
            .or_default()
            .push(order);
    }

    let groups = by_day
        .into_iter()
        .rev()
        .map(|(date, orders)| {
            let day_total: Decimal = orders.iter().map(|o| o.total()).sum();
            DailyReportGroup {
                date,
                day_total: to_f64(day_total),
                orders,
            }
        })
        .collect();

    DailyReport {
        groups,
        product_sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Category;
    use crate::orders::EnrichedLine;
    use chrono_tz::Africa::Dakar;

    const TZ: Tz = Dakar;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn make_line(name: &str, price: f64, quantity: i64) -> EnrichedLine {
        EnrichedLine {
            id: 1,
            quantity,
            name: Some(name.to_string()),
            price: Some(price),
            category: Some(Category::Boissons),
            image: None,
        }
    }

    fn make_order(id: i64, day: &str, offset_ms: i64, lines: Vec<EnrichedLine>) -> EnrichedOrder {
        EnrichedOrder {
            id,
            created_at: day_start_millis(date(day), TZ) + offset_ms,
            note: None,
            product_data: lines,
        }
    }

    #[test]
    fn test_groups_sorted_by_date_descending() {
        let orders = vec![
            make_order(1, "2024-01-01", 1000, vec![make_line("Thé", 1000.0, 1)]),
            make_order(2, "2024-01-02", 1000, vec![make_line("Café", 500.0, 1)]),
        ];

        let report = daily_report(orders, date("2024-01-01"), date("2024-01-02"), None, TZ);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].date, date("2024-01-02"));
        assert_eq!(report.groups[0].day_total, 500.0);
        assert_eq!(report.groups[1].date, date("2024-01-01"));
        assert_eq!(report.groups[1].day_total, 1000.0);
    }

    #[test]
    fn test_end_date_is_inclusive() {
        let orders = vec![
            make_order(1, "2024-01-01", 1000, vec![make_line("Thé", 1000.0, 1)]),
            // last millisecond of the end day still counts
            make_order(2, "2024-01-01", 24 * 3600 * 1000 - 1, vec![make_line("Café", 500.0, 1)]),
            make_order(3, "2024-01-02", 1000, vec![make_line("Café", 500.0, 1)]),
        ];

        let report = daily_report(orders, date("2024-01-01"), date("2024-01-01"), None, TZ);
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].date, date("2024-01-01"));
        assert_eq!(report.groups[0].orders.len(), 2);
        assert_eq!(report.groups[0].day_total, 1500.0);
    }

    #[test]
    fn test_orders_within_day_sorted_newest_first() {
        let orders = vec![
            make_order(1, "2024-01-01", 1000, vec![make_line("Thé", 100.0, 1)]),
            make_order(2, "2024-01-01", 5000, vec![make_line("Café", 100.0, 1)]),
        ];

        let report = daily_report(orders, date("2024-01-01"), date("2024-01-01"), None, TZ);
        let ids: Vec<i64> = report.groups[0].orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_empty_range_yields_empty_groups() {
        let orders = vec![make_order(1, "2024-01-05", 0, vec![make_line("Thé", 100.0, 1)])];
        let report = daily_report(orders, date("2024-01-01"), date("2024-01-02"), None, TZ);
        assert!(report.groups.is_empty());
        assert!(report.product_sales.is_empty());
    }

    #[test]
    fn test_product_filter_drops_non_matching_orders() {
        let orders = vec![
            make_order(1, "2024-01-01", 1000, vec![make_line("Cola", 500.0, 2)]),
            make_order(2, "2024-01-01", 2000, vec![make_line("Thé", 300.0, 1)]),
        ];

        let report = daily_report(
            orders,
            date("2024-01-01"),
            date("2024-01-01"),
            Some("  CoLa "),
            TZ,
        );
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].orders.len(), 1);
        assert_eq!(report.groups[0].orders[0].id, 1);
    }

    #[test]
    fn test_product_sales_summary() {
        let orders = vec![
            make_order(1, "2024-01-01", 1000, vec![make_line("Cola", 500.0, 2)]),
            make_order(2, "2024-01-02", 1000, vec![make_line("Cola", 500.0, 1)]),
        ];

        let report = daily_report(
            orders,
            date("2024-01-01"),
            date("2024-01-02"),
            Some("cola"),
            TZ,
        );
        let sales = &report.product_sales["Cola"];
        assert_eq!(sales.quantity, 3);
        assert_eq!(sales.total, 1500.0);
    }

    #[test]
    fn test_no_summary_without_filter() {
        let orders = vec![make_order(1, "2024-01-01", 0, vec![make_line("Cola", 500.0, 2)])];
        let report = daily_report(orders, date("2024-01-01"), date("2024-01-01"), None, TZ);
        assert!(report.product_sales.is_empty());

        // blank filter behaves like no filter
        let orders = vec![make_order(1, "2024-01-01", 0, vec![make_line("Cola", 500.0, 2)])];
        let report = daily_report(orders, date("2024-01-01"), date("2024-01-01"), Some("   "), TZ);
        assert!(report.product_sales.is_empty());
        assert_eq!(report.groups.len(), 1);
    }

    #[test]
    fn test_mixed_order_only_matching_lines_counted() {
        let orders = vec![make_order(
            1,
            "2024-01-01",
            0,
            vec![make_line("Cola", 500.0, 1), make_line("Thé", 300.0, 4)],
        )];

        let report = daily_report(
            orders,
            date("2024-01-01"),
            date("2024-01-01"),
            Some("cola"),
            TZ,
        );
        assert_eq!(report.product_sales.len(), 1);
        assert_eq!(report.product_sales["Cola"].quantity, 1);
        // day total still counts the whole passing order
        assert_eq!(report.groups[0].day_total, 1700.0);
    }
}
