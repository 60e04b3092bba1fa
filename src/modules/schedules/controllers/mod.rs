pub mod schedule_controller;
