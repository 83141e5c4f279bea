//! API Module
//!
//! HTTP handlers and routing that expose the `cache` binding.
//!
//! # Endpoints
//! - `GET /cache/:key` - Retrieve a value
//! - `GET /cache/:key/exists` - Check for a live entry
//! - `PUT /cache/:key` - Store a value
//! - `DELETE /cache/:key` - Forget a key
//! - `DELETE /cache` - Flush the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
