pub mod employee_controller;
