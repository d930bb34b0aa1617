//! Account Sentry HTTP API
//! Checklist scoring and a server-side proxy for username lookups

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use middleware::REQUEST_ID_HEADER;
pub use routes::create_router;
pub use types::*;
