mod schedule;

pub use schedule::{
    CreateScheduleRequest, ListedSchedule, Schedule, ScheduleResponse, UpdateScheduleRequest,
};
