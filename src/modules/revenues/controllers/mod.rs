pub mod revenue_controller;
