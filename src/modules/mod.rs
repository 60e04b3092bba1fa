pub mod auth;
pub mod costs;
pub mod employees;
pub mod reports;
pub mod revenues;
pub mod schedules;
pub mod workplaces;
