//! Spreadsheet rendering for period reports.
//!
//! One sheet per requested entity kind, Polish sheet and column titles as
//! the frontend expects, currency cells pre-formatted as `1,234.56 zł`
//! strings. The workbook is serialized to an in-memory buffer and never
//! touches the filesystem.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::core::{format_currency, AppError, Result};
use crate::modules::reports::models::{EmployeeReportRow, ReportKind, WorkplaceReportRow};

const WORKPLACE_SHEET: &str = "Miejsca pracy";
const WORKPLACE_HEADERS: [&str; 5] = [
    "Miejsce pracy",
    "Liczba pracowników",
    "Koszty",
    "Przychody",
    "Zysk",
];
const WORKPLACE_COLUMN_WIDTH: f64 = 15.0;

const EMPLOYEE_SHEET: &str = "Pracownicy";
const EMPLOYEE_HEADERS: [&str; 7] = [
    "Pracownik",
    "Miejsce pracy",
    "Koszty",
    "Przychody z miejsc pracy",
    "Przychody bezpośrednie",
    "Łączne przychody",
    "Zysk",
];
const EMPLOYEE_COLUMN_WIDTH: f64 = 20.0;

fn xe(e: XlsxError) -> AppError {
    AppError::Report(e.to_string())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(0xFFFFFF)
        .set_background_color(0x366092)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

fn write_headers(
    sheet: &mut Worksheet,
    headers: &[&str],
    column_width: f64,
    format: &Format,
) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, format)
            .map_err(xe)?;
        sheet.set_column_width(col as u16, column_width).map_err(xe)?;
    }
    Ok(())
}

fn add_workplace_sheet(workbook: &mut Workbook, rows: &[WorkplaceReportRow]) -> Result<()> {
    let format = header_format();
    let sheet = workbook.add_worksheet();
    sheet.set_name(WORKPLACE_SHEET).map_err(xe)?;
    write_headers(sheet, &WORKPLACE_HEADERS, WORKPLACE_COLUMN_WIDTH, &format)?;

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write(r, 0, row.name.as_str()).map_err(xe)?;
        sheet.write(r, 1, row.employee_count as u32).map_err(xe)?;
        sheet.write(r, 2, format_currency(row.costs)).map_err(xe)?;
        sheet.write(r, 3, format_currency(row.revenues)).map_err(xe)?;
        sheet.write(r, 4, format_currency(row.profit())).map_err(xe)?;
    }

    Ok(())
}

fn add_employee_sheet(workbook: &mut Workbook, rows: &[EmployeeReportRow]) -> Result<()> {
    let format = header_format();
    let sheet = workbook.add_worksheet();
    sheet.set_name(EMPLOYEE_SHEET).map_err(xe)?;
    write_headers(sheet, &EMPLOYEE_HEADERS, EMPLOYEE_COLUMN_WIDTH, &format)?;

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write(r, 0, row.name.as_str()).map_err(xe)?;
        sheet.write(r, 1, row.workplace_display()).map_err(xe)?;
        sheet.write(r, 2, format_currency(row.costs)).map_err(xe)?;
        sheet
            .write(r, 3, format_currency(row.workplace_revenues))
            .map_err(xe)?;
        sheet
            .write(r, 4, format_currency(row.direct_revenues))
            .map_err(xe)?;
        sheet
            .write(r, 5, format_currency(row.total_revenues()))
            .map_err(xe)?;
        sheet.write(r, 6, format_currency(row.profit())).map_err(xe)?;
    }

    Ok(())
}

/// Render the requested sheets into xlsx bytes.
///
/// A kind with no matching entities still yields a valid workbook with a
/// header-only sheet.
pub fn render_workbook(
    kind: ReportKind,
    workplaces: &[WorkplaceReportRow],
    employees: &[EmployeeReportRow],
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    if kind.includes_workplaces() {
        add_workplace_sheet(&mut workbook, workplaces)?;
    }
    if kind.includes_employees() {
        add_employee_sheet(&mut workbook, employees)?;
    }

    workbook.save_to_buffer().map_err(xe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_rows() -> (Vec<WorkplaceReportRow>, Vec<EmployeeReportRow>) {
        let workplaces = vec![WorkplaceReportRow {
            name: "Magazyn".to_string(),
            employee_count: 2,
            costs: dec!(1500),
            revenues: dec!(4200.50),
        }];
        let employees = vec![EmployeeReportRow {
            name: "Jan Kowalski".to_string(),
            workplace_names: vec!["Magazyn".to_string()],
            costs: dec!(800),
            workplace_revenues: dec!(1200),
            direct_revenues: dec!(300),
        }];
        (workplaces, employees)
    }

    #[test]
    fn test_workbook_bytes_are_xlsx() {
        let (workplaces, employees) = sample_rows();
        let bytes = render_workbook(ReportKind::All, &workplaces, &employees).unwrap();

        // XLSX is a ZIP container
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_empty_portfolio_still_renders_headers() {
        let bytes = render_workbook(ReportKind::All, &[], &[]).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_single_kind_renders_one_sheet() {
        let (workplaces, employees) = sample_rows();
        assert!(render_workbook(ReportKind::Workplace, &workplaces, &[]).is_ok());
        assert!(render_workbook(ReportKind::Employee, &[], &employees).is_ok());
    }
}
