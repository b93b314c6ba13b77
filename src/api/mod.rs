//! API Module
//!
//! HTTP handlers and routing for the demo server embedding one facade.
//!
//! # Endpoints
//! - `PUT|GET|DELETE /cache/:key` - Set, read or delete a value
//! - `GET /cache/:key/ttl` - Remaining TTL
//! - `DELETE /cache` - Flush the namespace
//! - `GET /keys` - List the namespace's keys
//! - `GET /stats` - Memory engine statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
