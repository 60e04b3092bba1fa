use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{
    DateWindow, EmployeeReportRow, EmployeeStats, Entity, EntryKind, ReportKind, StatsReport,
    WorkplaceReportRow, WorkplaceStats,
};
use crate::modules::reports::repositories::AggregationSource;
use crate::modules::reports::services::excel;

/// The window covering a calendar month, first day through last day
pub fn month_window(year: i32, month: u32) -> Result<DateWindow> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation("Invalid month"))?;
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::validation("Invalid month"))?;
    let end = next_month_start
        .pred_opt()
        .ok_or_else(|| AppError::validation("Invalid month"))?;

    DateWindow::new(start, end)
}

/// Period statistics and spreadsheet reports over a manager's entities.
///
/// Generic over the aggregation source so the assembly logic can run
/// against an in-memory fixture in tests.
pub struct ReportService<A: AggregationSource> {
    source: A,
}

impl<A: AggregationSource> ReportService<A> {
    pub fn new(source: A) -> Self {
        Self { source }
    }

    /// Sum of cost or revenue amounts for one entity inside a window.
    ///
    /// Workplace revenue includes employee revenue attributed through
    /// assignments; employee revenue includes both workplace-tied and
    /// direct rows. An empty window sums to zero, never an error.
    pub async fn range_sum(
        &self,
        entity: Entity<'_>,
        kind: EntryKind,
        window: &DateWindow,
    ) -> Result<Decimal> {
        match (entity, kind) {
            (Entity::Workplace(id), EntryKind::Cost) => {
                self.source.workplace_cost_sum(id, window).await
            }
            (Entity::Workplace(id), EntryKind::Revenue) => {
                let direct = self.source.workplace_revenue_sum(id, window).await?;
                let attributed = self
                    .source
                    .workplace_attributed_revenue_sum(id, window)
                    .await?;
                Ok(direct + attributed)
            }
            (Entity::Employee(id), EntryKind::Cost) => {
                self.source.employee_cost_sum(id, window).await
            }
            (Entity::Employee(id), EntryKind::Revenue) => {
                let at_workplaces = self
                    .source
                    .employee_workplace_revenue_sum(id, window)
                    .await?;
                let direct = self.source.employee_direct_revenue_sum(id, window).await?;
                Ok(at_workplaces + direct)
            }
        }
    }

    /// `range_sum` over one calendar month
    pub async fn monthly_sum(
        &self,
        entity: Entity<'_>,
        kind: EntryKind,
        year: i32,
        month: u32,
    ) -> Result<Decimal> {
        let window = month_window(year, month)?;
        self.range_sum(entity, kind, &window).await
    }

    /// Revenue minus cost over a window; negative when the entity ran at a
    /// loss.
    pub async fn profit(&self, entity: Entity<'_>, window: &DateWindow) -> Result<Decimal> {
        let revenues = self.range_sum(entity, EntryKind::Revenue, window).await?;
        let costs = self.range_sum(entity, EntryKind::Cost, window).await?;
        Ok(revenues - costs)
    }

    /// Per-entity totals for `POST /reports/stats`
    pub async fn generate_stats(
        &self,
        manager_id: &str,
        window: &DateWindow,
        kind: ReportKind,
    ) -> Result<StatsReport> {
        let mut employees = Vec::new();
        if kind.includes_employees() {
            for employee in self.source.employees(manager_id).await? {
                let total_costs = self
                    .range_sum(Entity::Employee(&employee.id), EntryKind::Cost, window)
                    .await?;
                let total_revenues = self
                    .range_sum(Entity::Employee(&employee.id), EntryKind::Revenue, window)
                    .await?;
                let total_hours = self.source.employee_hours_sum(&employee.id, window).await?;

                employees.push(EmployeeStats {
                    name: employee.name,
                    total_costs,
                    total_revenues,
                    total_profit: total_revenues - total_costs,
                    total_hours,
                });
            }
        }

        let mut workplaces = Vec::new();
        if kind.includes_workplaces() {
            for workplace in self.source.workplaces(manager_id).await? {
                let total_costs = self
                    .range_sum(Entity::Workplace(&workplace.id), EntryKind::Cost, window)
                    .await?;
                let total_revenues = self
                    .range_sum(Entity::Workplace(&workplace.id), EntryKind::Revenue, window)
                    .await?;

                workplaces.push(WorkplaceStats {
                    name: workplace.name,
                    total_costs,
                    total_revenues,
                    total_profit: total_revenues - total_costs,
                });
            }
        }

        info!(
            manager_id = %manager_id,
            employees = employees.len(),
            workplaces = workplaces.len(),
            "Statistics generated"
        );

        Ok(StatsReport {
            employees,
            workplaces,
        })
    }

    /// Sheet rows for the workplace side of the spreadsheet
    pub async fn workplace_rows(
        &self,
        manager_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<WorkplaceReportRow>> {
        let mut rows = Vec::new();
        for workplace in self.source.workplaces(manager_id).await? {
            let costs = self
                .range_sum(Entity::Workplace(&workplace.id), EntryKind::Cost, window)
                .await?;
            let revenues = self
                .range_sum(Entity::Workplace(&workplace.id), EntryKind::Revenue, window)
                .await?;
            let employee_count = self
                .source
                .workplace_active_employee_count(&workplace.id, window)
                .await?;

            rows.push(WorkplaceReportRow {
                name: workplace.name,
                employee_count,
                costs,
                revenues,
            });
        }

        Ok(rows)
    }

    /// Sheet rows for the employee side of the spreadsheet
    pub async fn employee_rows(
        &self,
        manager_id: &str,
        window: &DateWindow,
    ) -> Result<Vec<EmployeeReportRow>> {
        let mut rows = Vec::new();
        for employee in self.source.employees(manager_id).await? {
            let costs = self
                .range_sum(Entity::Employee(&employee.id), EntryKind::Cost, window)
                .await?;
            let workplace_revenues = self
                .source
                .employee_workplace_revenue_sum(&employee.id, window)
                .await?;
            let direct_revenues = self
                .source
                .employee_direct_revenue_sum(&employee.id, window)
                .await?;
            let workplace_names = self
                .source
                .employee_workplace_names(&employee.id, window)
                .await?;

            rows.push(EmployeeReportRow {
                name: employee.name,
                workplace_names,
                costs,
                workplace_revenues,
                direct_revenues,
            });
        }

        Ok(rows)
    }

    /// Render the spreadsheet for `POST /reports/excel`.
    ///
    /// The workbook only ever exists in memory; an error on any entity
    /// aborts the whole report and nothing is left behind.
    pub async fn generate_excel(
        &self,
        manager_id: &str,
        window: &DateWindow,
        kind: ReportKind,
    ) -> Result<Vec<u8>> {
        let workplaces = if kind.includes_workplaces() {
            self.workplace_rows(manager_id, window).await?
        } else {
            Vec::new()
        };

        let employees = if kind.includes_employees() {
            self.employee_rows(manager_id, window).await?
        } else {
            Vec::new()
        };

        let bytes = excel::render_workbook(kind, &workplaces, &employees)?;

        info!(
            manager_id = %manager_id,
            bytes = bytes.len(),
            "Spreadsheet report generated"
        );

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_window_regular_month() {
        let window = month_window(2024, 4).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_month_window_leap_february() {
        let window = month_window(2024, 2).unwrap();
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let window = month_window(2023, 2).unwrap();
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_month_window_december_wraps_year() {
        let window = month_window(2024, 12).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_month_window_rejects_bad_month() {
        assert!(month_window(2024, 0).is_err());
        assert!(month_window(2024, 13).is_err());
    }
}
