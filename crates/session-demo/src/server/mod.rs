//! Axum HTTP server for the cookie session demo.
//!
//! # Responsibilities
//! - Define the router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Keep login state only in the sealed session cookie.

pub mod cookie;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod state;
