// Employees and their manager-scoped records

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::Employee;
pub use repositories::EmployeeRepository;
