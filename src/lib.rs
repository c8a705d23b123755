//! Client for the school management API.
//!
//! - [`http`]: shared HTTP client with bearer-token attachment and 401 hook
//! - [`store`]: centralized state with one lifecycle slice per domain
//! - [`handlers`]: action creators tying the two together

pub mod config;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod models;
pub mod session;
pub mod store;
