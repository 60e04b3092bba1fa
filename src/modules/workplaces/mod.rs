// Workplaces and their employee assignments

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{Workplace, WorkplaceAssignment};
pub use repositories::WorkplaceRepository;
