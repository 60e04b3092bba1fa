//! Kadra: multi-tenant workforce and finance management backend
//!
//! Managers track employees, workplaces, schedules, costs and revenues,
//! with JWT-based authentication, period statistics and Excel export.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::auth;
pub use modules::costs;
pub use modules::employees;
pub use modules::reports;
pub use modules::revenues;
pub use modules::schedules;
pub use modules::workplaces;
