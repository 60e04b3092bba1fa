// Daily work schedules with the 24h-per-day cap

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Schedule;
pub use repositories::ScheduleRepository;
pub use services::ScheduleService;
