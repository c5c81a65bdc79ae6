// Authentication module
// Argon2id password hashing, credential storage and stateless JWT bearer tokens

pub mod clock;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use error::AuthError;
pub use handlers::{login_handler, me_handler, register_handler};
pub use middleware::AuthenticatedUser;
pub use models::{Credentials, TokenResponse, User, UserResponse};
pub use password::{HashCost, PasswordService};
pub use repository::{CredentialStore, InMemoryCredentialStore, SqliteCredentialStore};
pub use service::{AuthService, ACCESS_TOKEN_TTL_MINUTES};
pub use token::{Claims, TokenError, TokenService};
