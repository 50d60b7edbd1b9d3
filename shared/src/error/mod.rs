//! Unified error handling for the Brew platform
//!
//! - [`ErrorCode`]: numeric error codes shared between server, client and
//!   frontend
//! - [`ErrorCategory`]: classification by code range
//! - [`AppError`] / [`ApiResponse`]: application error and response envelope

pub mod category;
pub mod codes;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{ApiResponse, AppError, AppResult};
