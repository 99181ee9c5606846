//! Adapter implementations for user account ports.

pub mod memory;
pub mod password;
pub mod token;

pub use memory::InMemoryUserRepository;
pub use password::Argon2PasswordHasher;
pub use token::JwtTokenIssuer;
