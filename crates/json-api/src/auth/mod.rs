//! Authentication

mod errors;
pub(crate) mod login;
pub(crate) mod middleware;
mod rate_limit;

pub(crate) use errors::*;
pub(crate) use rate_limit::LoginRateLimit;
