//! Credential primitives for the fleet back office.
//!
//! - Password hashing (Argon2id, fixed cost per instance)
//! - Session token signing and verification (HS256 JWT)
//! - An `Authenticator` that pairs the two for login flows
//!
//! The service crate owns accounts and roles; this crate only knows about
//! strings, hashes and signatures.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 168);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint token
//! let claims = Claims::for_account("acc-1", "alice@fleet.io", Some("admin".into()), 168);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Per request: verify token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.email, "alice@fleet.io");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
