// Revenues: workplace-owned, employee-owned, or both

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::Revenue;
pub use repositories::RevenueRepository;
