// Spreadsheet rendering: sheet selection, header-only workbooks, xlsx magic

use kadra::reports::models::{EmployeeReportRow, ReportKind, WorkplaceReportRow};
use kadra::reports::services::excel::render_workbook;
use rust_decimal_macros::dec;

fn workplace_rows() -> Vec<WorkplaceReportRow> {
    vec![
        WorkplaceReportRow {
            name: "Magazyn".to_string(),
            employee_count: 3,
            costs: dec!(1500.00),
            revenues: dec!(4200.50),
        },
        WorkplaceReportRow {
            name: "Sklep".to_string(),
            employee_count: 0,
            costs: dec!(900),
            revenues: dec!(250),
        },
    ]
}

fn employee_rows() -> Vec<EmployeeReportRow> {
    vec![EmployeeReportRow {
        name: "Jan Kowalski".to_string(),
        workplace_names: vec!["Magazyn".to_string(), "Sklep".to_string()],
        costs: dec!(800),
        workplace_revenues: dec!(1200),
        direct_revenues: dec!(300.25),
    }]
}

#[test]
fn full_report_is_a_zip_container() {
    let bytes = render_workbook(ReportKind::All, &workplace_rows(), &employee_rows()).unwrap();

    assert!(bytes.len() > 500);
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn empty_portfolio_returns_header_only_workbook() {
    // No entities at all must still produce a valid file, not an error
    let bytes = render_workbook(ReportKind::All, &[], &[]).unwrap();
    assert_eq!(&bytes[0..2], b"PK");

    let bytes = render_workbook(ReportKind::Workplace, &[], &[]).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn sheets_follow_the_requested_kind() {
    // A workplace-only report must succeed without employee rows and
    // vice versa; the unrequested side is simply absent.
    assert!(render_workbook(ReportKind::Workplace, &workplace_rows(), &[]).is_ok());
    assert!(render_workbook(ReportKind::Employee, &[], &employee_rows()).is_ok());
}

#[test]
fn loss_making_rows_render() {
    let rows = vec![WorkplaceReportRow {
        name: "Nierentowny".to_string(),
        employee_count: 1,
        costs: dec!(5000),
        revenues: dec!(1200),
    }];
    assert!(rows[0].profit().is_sign_negative());

    let bytes = render_workbook(ReportKind::Workplace, &rows, &[]).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}
