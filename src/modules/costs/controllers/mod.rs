pub mod cost_controller;
