pub mod workplace_controller;
