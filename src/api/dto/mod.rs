pub mod auth;
pub mod common;

pub use auth::{
    ChangePasswordRequest, DashboardResponse, LoginRequest, LoginResponse, SignupRequest,
    UserInfo,
};
pub use common::{ApiResponse, EmptyData};
