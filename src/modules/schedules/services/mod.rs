mod schedule_service;

pub use schedule_service::{check_hours, ScheduleService, MAX_DAILY_HOURS};
