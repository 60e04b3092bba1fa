mod report;

pub use report::{
    DateWindow, EmployeeReportRow, EmployeeStats, Entity, EntityRef, EntryKind, ReportKind,
    ReportRequest, StatsReport, WorkplaceReportRow, WorkplaceStats,
};
