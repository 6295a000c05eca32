//! Authentication

mod admins;
mod errors;
mod models;
mod password;
mod repository;
mod service;
mod token;

pub use admins::PgAdminUsersService;
pub use errors::*;
pub use models::*;
pub use password::{PasswordHashError, hash_password, verify_password};
pub use service::*;
pub use token::*;
