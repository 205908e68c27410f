pub mod app_error;
pub mod billing;
pub mod jwt;
pub mod use_cases;
pub mod validators;
