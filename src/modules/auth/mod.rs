// Manager accounts: registration, login, profile

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Manager;
pub use repositories::ManagerRepository;
pub use services::AuthService;
