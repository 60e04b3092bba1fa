// Period aggregation and report generation

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{DateWindow, Entity, EntryKind, ReportKind};
pub use repositories::{AggregationSource, MySqlAggregationSource};
pub use services::{month_window, ReportService};
