//! # tourhub-auth
//!
//! Authentication and access control for the TourHub platform.
//!
//! ## Modules
//!
//! - `jwt`: session token issuance and verification
//! - `password`: Argon2id password hashing and policy enforcement
//! - `reset`: single-use password reset tokens
//! - `rbac`: role gates
//! - `guard`: principal resolution for incoming requests
//! - `account`: signup, login, and password recovery flows

pub mod account;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod reset;

pub use account::{AuthService, AuthSession, SignupInput};
pub use guard::AccessGuard;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RbacEnforcer;
pub use reset::ResetTokenVault;
