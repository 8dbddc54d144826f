//! Bridge E2E test suite.
//!
//! Drives the full actix app (routing, middleware, bridge) against stub backends
//! and a temporary directory served by the local backend.
//!
//! Run with: cargo test --test bridge_e2e


mod test_download;
mod test_health;
mod test_local_backend;
