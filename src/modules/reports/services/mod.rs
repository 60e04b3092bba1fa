pub mod excel;
mod report_service;

pub use report_service::{month_window, ReportService};
