pub mod auth_service;
pub mod counter;

pub use auth_service::AuthService;
pub use counter::{AtomicCounter, Counter};
