// Costs booked against workplaces or employees

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{CostEntry, CostKind};
pub use repositories::CostRepository;
