//! Account orchestration services.

mod account;

pub use account::{AccountService, MIN_PASSWORD_LEN, RegisterRequest};
