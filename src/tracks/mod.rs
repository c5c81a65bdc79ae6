// Track collection: index-addressed, in-memory CRUD

pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

pub use error::*;
pub use handlers::*;
pub use models::*;
pub use store::*;
