mod cost_repository;

pub use cost_repository::{new_entry, CostRepository};
