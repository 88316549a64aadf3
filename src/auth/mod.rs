//! User registration, log-in and the bearer token gate in front of every per-user route.

mod log_in;
mod middleware;
mod register;
mod token;

pub use log_in::post_log_in;
pub use middleware::auth_guard;
pub use register::register_user;
pub use token::{DEFAULT_TOKEN_DURATION, JwtKeys};
