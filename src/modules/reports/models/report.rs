use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which entity sheets a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Employee,
    Workplace,
    #[default]
    All,
}

impl ReportKind {
    pub fn includes_employees(&self) -> bool {
        matches!(self, ReportKind::Employee | ReportKind::All)
    }

    pub fn includes_workplaces(&self) -> bool {
        matches!(self, ReportKind::Workplace | ReportKind::All)
    }
}

/// Inclusive date range bounding every aggregation query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> crate::core::Result<Self> {
        if start > end {
            return Err(crate::core::AppError::validation(
                "start_date must not be after end_date",
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Which entry table an aggregation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Cost,
    Revenue,
}

/// The entity an aggregation is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    Employee(&'a str),
    Workplace(&'a str),
}

/// Id and display name of an owned employee or workplace
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

/// Body of `POST /reports/stats` and `POST /reports/excel`
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: ReportKind,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmployeeStats {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenues: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkplaceStats {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenues: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_profit: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsReport {
    pub employees: Vec<EmployeeStats>,
    pub workplaces: Vec<WorkplaceStats>,
}

/// One data row of the workplace sheet
#[derive(Debug, Clone, PartialEq)]
pub struct WorkplaceReportRow {
    pub name: String,
    pub employee_count: i64,
    pub costs: Decimal,
    pub revenues: Decimal,
}

impl WorkplaceReportRow {
    pub fn profit(&self) -> Decimal {
        self.revenues - self.costs
    }
}

/// One data row of the employee sheet
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeReportRow {
    pub name: String,
    pub workplace_names: Vec<String>,
    pub costs: Decimal,
    pub workplace_revenues: Decimal,
    pub direct_revenues: Decimal,
}

impl EmployeeReportRow {
    pub fn total_revenues(&self) -> Decimal {
        self.workplace_revenues + self.direct_revenues
    }

    pub fn profit(&self) -> Decimal {
        self.total_revenues() - self.costs
    }

    /// Display form of the workplace column: comma-joined names, `-` when
    /// the employee had no workplace revenue in the window.
    pub fn workplace_display(&self) -> String {
        if self.workplace_names.is_empty() {
            "-".to_string()
        } else {
            self.workplace_names.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_kind_deserializes_with_default() {
        let request: ReportRequest = serde_json::from_str(
            r#"{"start_date": "2024-03-01", "end_date": "2024-03-31"}"#,
        )
        .unwrap();
        assert_eq!(request.kind, ReportKind::All);

        let request: ReportRequest = serde_json::from_str(
            r#"{"start_date": "2024-03-01", "end_date": "2024-03-31", "type": "employee"}"#,
        )
        .unwrap();
        assert_eq!(request.kind, ReportKind::Employee);

        assert!(serde_json::from_str::<ReportRequest>(
            r#"{"start_date": "2024-03-01", "end_date": "2024-03-31", "type": "vendor"}"#,
        )
        .is_err());
    }

    #[test]
    fn test_kind_sheet_selection() {
        assert!(ReportKind::All.includes_employees());
        assert!(ReportKind::All.includes_workplaces());
        assert!(ReportKind::Employee.includes_employees());
        assert!(!ReportKind::Employee.includes_workplaces());
        assert!(!ReportKind::Workplace.includes_employees());
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap();

        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        assert!(DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .is_err());
    }

    #[test]
    fn test_employee_row_derived_figures() {
        let row = EmployeeReportRow {
            name: "Jan Kowalski".to_string(),
            workplace_names: vec!["Magazyn".to_string(), "Sklep".to_string()],
            costs: dec!(300),
            workplace_revenues: dec!(150),
            direct_revenues: dec!(50),
        };

        assert_eq!(row.total_revenues(), dec!(200));
        assert_eq!(row.profit(), dec!(-100)); // losses stay negative
        assert_eq!(row.workplace_display(), "Magazyn, Sklep");

        let idle = EmployeeReportRow {
            workplace_names: vec![],
            ..row
        };
        assert_eq!(idle.workplace_display(), "-");
    }
}
