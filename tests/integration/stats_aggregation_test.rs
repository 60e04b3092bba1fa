// Integration tests for period aggregation and report assembly.
//
// The report service is exercised against an in-memory aggregation source
// so window semantics, revenue attribution and profit derivation are
// verified without a database.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kadra::core::Result;
use kadra::reports::models::{DateWindow, EmployeeReportRow, Entity, EntityRef, EntryKind, ReportKind};
use kadra::reports::services::{month_window, ReportService};
use kadra::reports::AggregationSource;

const MANAGER: &str = "m1";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An amount booked against an entity on a date
#[derive(Debug, Clone)]
struct Entry {
    entity_id: String,
    date: NaiveDate,
    amount: Decimal,
}

#[derive(Debug, Clone)]
struct RevenueRow {
    workplace_id: Option<String>,
    employee_id: Option<String>,
    date: NaiveDate,
    amount: Decimal,
}

#[derive(Debug, Clone)]
struct AssignmentRow {
    employee_id: String,
    workplace_id: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

impl AssignmentRow {
    fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| end >= date)
    }
}

/// In-memory stand-in for the SQL aggregation queries
#[derive(Default)]
struct MemorySource {
    workplaces: Vec<EntityRef>,
    employees: Vec<EntityRef>,
    workplace_costs: Vec<Entry>,
    employee_costs: Vec<Entry>,
    revenues: Vec<RevenueRow>,
    assignments: Vec<AssignmentRow>,
    schedules: Vec<Entry>, // amount holds hours
}

impl MemorySource {
    fn sum<'a>(entries: impl Iterator<Item = &'a Entry>) -> Decimal {
        entries.map(|e| e.amount).sum()
    }
}

#[async_trait]
impl AggregationSource for MemorySource {
    async fn workplaces(&self, _manager_id: &str) -> Result<Vec<EntityRef>> {
        Ok(self.workplaces.clone())
    }

    async fn employees(&self, _manager_id: &str) -> Result<Vec<EntityRef>> {
        Ok(self.employees.clone())
    }

    async fn workplace_cost_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        Ok(Self::sum(self.workplace_costs.iter().filter(|e| {
            e.entity_id == workplace_id && window.contains(e.date)
        })))
    }

    async fn workplace_revenue_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        Ok(self
            .revenues
            .iter()
            .filter(|r| r.workplace_id.as_deref() == Some(workplace_id) && window.contains(r.date))
            .map(|r| r.amount)
            .sum())
    }

    async fn workplace_attributed_revenue_sum(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        Ok(self
            .revenues
            .iter()
            .filter(|r| {
                r.workplace_id.is_none()
                    && window.contains(r.date)
                    && r.employee_id.as_deref().is_some_and(|employee_id| {
                        self.assignments.iter().any(|a| {
                            a.employee_id == employee_id
                                && a.workplace_id == workplace_id
                                && a.covers(r.date)
                        })
                    })
            })
            .map(|r| r.amount)
            .sum())
    }

    async fn workplace_active_employee_count(
        &self,
        workplace_id: &str,
        window: &DateWindow,
    ) -> Result<i64> {
        let mut seen: Vec<&str> = Vec::new();
        for revenue in self.revenues.iter().filter(|r| window.contains(r.date)) {
            let Some(employee_id) = revenue.employee_id.as_deref() else {
                continue;
            };
            let counts = match revenue.workplace_id.as_deref() {
                Some(id) => id == workplace_id,
                None => self.assignments.iter().any(|a| {
                    a.employee_id == employee_id
                        && a.workplace_id == workplace_id
                        && a.covers(revenue.date)
                }),
            };
            if counts && !seen.contains(&employee_id) {
                seen.push(employee_id);
            }
        }
        Ok(seen.len() as i64)
    }

    async fn employee_cost_sum(&self, employee_id: &str, window: &DateWindow) -> Result<Decimal> {
        Ok(Self::sum(self.employee_costs.iter().filter(|e| {
            e.entity_id == employee_id && window.contains(e.date)
        })))
    }

    async fn employee_workplace_revenue_sum(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        Ok(self
            .revenues
            .iter()
            .filter(|r| {
                r.employee_id.as_deref() == Some(employee_id)
                    && r.workplace_id.is_some()
                    && window.contains(r.date)
            })
            .map(|r| r.amount)
            .sum())
    }

    async fn employee_direct_revenue_sum(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Decimal> {
        Ok(self
            .revenues
            .iter()
            .filter(|r| {
                r.employee_id.as_deref() == Some(employee_id)
                    && r.workplace_id.is_none()
                    && window.contains(r.date)
            })
            .map(|r| r.amount)
            .sum())
    }

    async fn employee_hours_sum(&self, employee_id: &str, window: &DateWindow) -> Result<f64> {
        use rust_decimal::prelude::ToPrimitive;
        Ok(Self::sum(self.schedules.iter().filter(|e| {
            e.entity_id == employee_id && window.contains(e.date)
        }))
        .to_f64()
        .unwrap_or(0.0))
    }

    async fn employee_workplace_names(
        &self,
        employee_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .revenues
            .iter()
            .filter(|r| r.employee_id.as_deref() == Some(employee_id) && window.contains(r.date))
            .filter_map(|r| r.workplace_id.as_deref())
            .filter_map(|workplace_id| {
                self.workplaces
                    .iter()
                    .find(|w| w.id == workplace_id)
                    .map(|w| w.name.clone())
            })
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// Two workplaces, two employees, entries straddling the March window
fn fixture() -> MemorySource {
    MemorySource {
        workplaces: vec![
            EntityRef {
                id: "w1".to_string(),
                name: "Magazyn".to_string(),
            },
            EntityRef {
                id: "w2".to_string(),
                name: "Sklep".to_string(),
            },
        ],
        employees: vec![
            EntityRef {
                id: "e1".to_string(),
                name: "Jan Kowalski".to_string(),
            },
            EntityRef {
                id: "e2".to_string(),
                name: "Anna Nowak".to_string(),
            },
        ],
        workplace_costs: vec![
            Entry {
                entity_id: "w1".to_string(),
                date: date(2024, 3, 5),
                amount: dec!(100),
            },
            Entry {
                entity_id: "w1".to_string(),
                date: date(2024, 4, 1),
                amount: dec!(50),
            },
        ],
        employee_costs: vec![
            // Both window boundaries are inclusive
            Entry {
                entity_id: "e1".to_string(),
                date: date(2024, 3, 1),
                amount: dec!(30),
            },
            Entry {
                entity_id: "e1".to_string(),
                date: date(2024, 3, 31),
                amount: dec!(20),
            },
            Entry {
                entity_id: "e1".to_string(),
                date: date(2024, 4, 1),
                amount: dec!(10),
            },
            Entry {
                entity_id: "e2".to_string(),
                date: date(2024, 3, 10),
                amount: dec!(100),
            },
        ],
        revenues: vec![
            // Plain workplace revenue
            RevenueRow {
                workplace_id: Some("w1".to_string()),
                employee_id: None,
                date: date(2024, 3, 10),
                amount: dec!(200),
            },
            // Employee revenue earned at the workplace
            RevenueRow {
                workplace_id: Some("w1".to_string()),
                employee_id: Some("e1".to_string()),
                date: date(2024, 3, 12),
                amount: dec!(150),
            },
            // Direct employee revenue, attributed to w1 via assignment
            RevenueRow {
                workplace_id: None,
                employee_id: Some("e1".to_string()),
                date: date(2024, 3, 15),
                amount: dec!(80),
            },
            // Direct employee revenue with no covering assignment
            RevenueRow {
                workplace_id: None,
                employee_id: Some("e2".to_string()),
                date: date(2024, 3, 20),
                amount: dec!(60),
            },
        ],
        assignments: vec![AssignmentRow {
            employee_id: "e1".to_string(),
            workplace_id: "w1".to_string(),
            start_date: date(2024, 1, 1),
            end_date: None,
        }],
        schedules: vec![
            Entry {
                entity_id: "e1".to_string(),
                date: date(2024, 3, 5),
                amount: dec!(8),
            },
            Entry {
                entity_id: "e1".to_string(),
                date: date(2024, 3, 6),
                amount: dec!(6),
            },
            Entry {
                entity_id: "e1".to_string(),
                date: date(2024, 4, 2),
                amount: dec!(5),
            },
        ],
    }
}

fn march() -> DateWindow {
    DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap()
}

#[tokio::test]
async fn range_sum_includes_both_boundaries_and_nothing_outside() {
    let service = ReportService::new(fixture());

    let costs = service
        .range_sum(Entity::Employee("e1"), EntryKind::Cost, &march())
        .await
        .unwrap();

    // 30 on the first day + 20 on the last; the April entry is excluded
    assert_eq!(costs, dec!(50));
}

#[tokio::test]
async fn monthly_sum_equals_range_sum_over_the_month_window() {
    let service = ReportService::new(fixture());

    let monthly = service
        .monthly_sum(Entity::Workplace("w1"), EntryKind::Cost, 2024, 4)
        .await
        .unwrap();
    let window = month_window(2024, 4).unwrap();
    let ranged = service
        .range_sum(Entity::Workplace("w1"), EntryKind::Cost, &window)
        .await
        .unwrap();

    assert_eq!(monthly, dec!(50));
    assert_eq!(monthly, ranged);

    let march_sum = service
        .monthly_sum(Entity::Workplace("w1"), EntryKind::Cost, 2024, 3)
        .await
        .unwrap();
    assert_eq!(march_sum, dec!(100));
}

#[tokio::test]
async fn empty_window_sums_to_zero_not_error() {
    let service = ReportService::new(fixture());
    let window = DateWindow::new(date(2030, 1, 1), date(2030, 1, 31)).unwrap();

    let sum = service
        .range_sum(Entity::Workplace("w1"), EntryKind::Revenue, &window)
        .await
        .unwrap();

    assert_eq!(sum, Decimal::ZERO);
}

#[tokio::test]
async fn workplace_revenue_includes_attributed_direct_revenue() {
    let service = ReportService::new(fixture());

    let revenue = service
        .range_sum(Entity::Workplace("w1"), EntryKind::Revenue, &march())
        .await
        .unwrap();

    // 200 direct + 150 employee-at-workplace + 80 attributed through the
    // assignment; Anna's unassigned 60 stays out
    assert_eq!(revenue, dec!(430));

    let other = service
        .range_sum(Entity::Workplace("w2"), EntryKind::Revenue, &march())
        .await
        .unwrap();
    assert_eq!(other, Decimal::ZERO);
}

#[tokio::test]
async fn profit_can_be_negative() {
    let service = ReportService::new(fixture());

    // Anna: 60 revenue vs 100 costs
    let profit = service.profit(Entity::Employee("e2"), &march()).await.unwrap();
    assert_eq!(profit, dec!(-40));
}

#[tokio::test]
async fn stats_report_carries_per_entity_totals() {
    let service = ReportService::new(fixture());

    let stats = service
        .generate_stats(MANAGER, &march(), ReportKind::All)
        .await
        .unwrap();

    assert_eq!(stats.employees.len(), 2);
    assert_eq!(stats.workplaces.len(), 2);

    let jan = &stats.employees[0];
    assert_eq!(jan.name, "Jan Kowalski");
    assert_eq!(jan.total_costs, dec!(50));
    assert_eq!(jan.total_revenues, dec!(230)); // 150 at workplace + 80 direct
    assert_eq!(jan.total_profit, dec!(180));
    assert_eq!(jan.total_hours, 14.0);

    let magazyn = &stats.workplaces[0];
    assert_eq!(magazyn.name, "Magazyn");
    assert_eq!(magazyn.total_costs, dec!(100));
    assert_eq!(magazyn.total_revenues, dec!(430));
    assert_eq!(magazyn.total_profit, dec!(330));
}

#[tokio::test]
async fn stats_kind_filters_entity_lists() {
    let service = ReportService::new(fixture());

    let stats = service
        .generate_stats(MANAGER, &march(), ReportKind::Employee)
        .await
        .unwrap();
    assert!(!stats.employees.is_empty());
    assert!(stats.workplaces.is_empty());

    let stats = service
        .generate_stats(MANAGER, &march(), ReportKind::Workplace)
        .await
        .unwrap();
    assert!(stats.employees.is_empty());
    assert!(!stats.workplaces.is_empty());
}

#[tokio::test]
async fn employee_rows_decompose_revenue_for_the_sheet() {
    let service = ReportService::new(fixture());

    let rows = service.employee_rows(MANAGER, &march()).await.unwrap();
    let jan: &EmployeeReportRow = rows.iter().find(|r| r.name == "Jan Kowalski").unwrap();

    assert_eq!(jan.workplace_revenues, dec!(150));
    assert_eq!(jan.direct_revenues, dec!(80));
    assert_eq!(jan.total_revenues(), dec!(230));
    assert_eq!(jan.profit(), dec!(180));
    assert_eq!(jan.workplace_display(), "Magazyn");

    let anna = rows.iter().find(|r| r.name == "Anna Nowak").unwrap();
    assert_eq!(anna.workplace_display(), "-");
}

#[tokio::test]
async fn workplace_rows_count_distinct_active_employees() {
    let service = ReportService::new(fixture());

    let rows = service.workplace_rows(MANAGER, &march()).await.unwrap();
    let magazyn = rows.iter().find(|r| r.name == "Magazyn").unwrap();

    // Jan appears through both a workplace-tied row and an attributed one,
    // but is counted once
    assert_eq!(magazyn.employee_count, 1);

    let sklep = rows.iter().find(|r| r.name == "Sklep").unwrap();
    assert_eq!(sklep.employee_count, 0);
}

#[tokio::test]
async fn excel_report_renders_even_for_an_empty_portfolio() {
    let service = ReportService::new(MemorySource::default());

    let bytes = service
        .generate_excel(MANAGER, &march(), ReportKind::All)
        .await
        .unwrap();

    assert_eq!(&bytes[0..2], b"PK");
}

#[tokio::test]
async fn excel_report_renders_fixture_data() {
    let service = ReportService::new(fixture());

    let bytes = service
        .generate_excel(MANAGER, &march(), ReportKind::All)
        .await
        .unwrap();

    assert!(bytes.len() > 500);
    assert_eq!(&bytes[0..2], b"PK");
}
