mod manager;

pub use manager::{
    ChangePasswordRequest, LoginRequest, LoginResponse, Manager, ManagerResponse, RegisterRequest,
    UpdateProfileRequest,
};
